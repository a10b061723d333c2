// driftwatch-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Column '{column}' not found in result set")]
    #[diagnostic(
        code(driftwatch::domain::column_not_found),
        help("Available columns: {available}")
    )]
    ColumnNotFound { column: String, available: String },

    #[error("Expectation suite '{0}' not found")]
    #[diagnostic(code(driftwatch::domain::suite_not_found))]
    SuiteNotFound(String),

    #[error("Checkpoint '{0}' not found")]
    #[diagnostic(code(driftwatch::domain::checkpoint_not_found))]
    CheckpointNotFound(String),

    #[error("Invalid artifact name '{0}'")]
    #[diagnostic(
        code(driftwatch::domain::artifact_name),
        help("Names may only contain letters, digits, '_', '.' and '-', and must not start with '.' or '-'.")
    )]
    InvalidArtifactName(String),

    #[error("Malformed result set: column '{column}' holds {actual} rows, expected {expected}")]
    #[diagnostic(code(driftwatch::domain::malformed_table))]
    MalformedTable {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("SQL Parsing Error: {0}")]
    #[diagnostic(
        code(driftwatch::domain::sql),
        help("Check the CREATE EXTERNAL DATABASE ... OPTIONS (...) syntax.")
    )]
    SqlParse(String),

    #[error("Missing required option '{0}' in CREATE EXTERNAL DATABASE")]
    #[diagnostic(code(driftwatch::domain::missing_option))]
    MissingOption(String),

    #[error("Invalid warehouse options: {0}")]
    #[diagnostic(code(driftwatch::domain::warehouse_options))]
    InvalidOptions(String),
}
