// driftwatch-core/src/infrastructure/error.rs

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DatabaseError {
    #[error("DuckDB Engine Error: {0}")]
    #[diagnostic(
        code(driftwatch::infra::database::duckdb),
        help("An error occurred inside the SQL engine.")
    )]
    DuckDB(#[from] duckdb::Error),
}

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- DATABASE (Abstracted) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DatabaseError),

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(driftwatch::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- STORE / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(driftwatch::infra::yaml),
        help("Check the suite/checkpoint YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON Serialization Error: {0}")]
    #[diagnostic(code(driftwatch::infra::json))]
    JsonError(#[from] serde_json::Error),

    // --- CONNECTION STRING ---
    #[error("Invalid connection string: {0}")]
    #[diagnostic(
        code(driftwatch::infra::connection_string),
        help("Expected 'duckdb:<path>[;key=value]*' (use 'duckdb::memory:' for in-memory).")
    )]
    ConnectionString(String),

    #[error("External database '{name}' not found at {path}")]
    #[diagnostic(
        code(driftwatch::infra::external_database),
        help("The OPTIONS database name must resolve to a file under warehouse_dir.")
    )]
    ExternalDatabaseNotFound { name: String, path: PathBuf },

    #[error("Configuration Error: {0}")]
    ConfigError(String),
}

// Manual implementation for shortcuts (e.g. `?` operator on duckdb calls)
impl From<duckdb::Error> for InfrastructureError {
    fn from(err: duckdb::Error) -> Self {
        InfrastructureError::Database(DatabaseError::DuckDB(err))
    }
}
