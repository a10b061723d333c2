// driftwatch-core/src/ports/connector.rs

// This file defines what your application needs, without knowing how it's done.
// The session layer talks to "a SQL engine that can federate sources"; which
// embedded engine actually answers is an infrastructure detail.

use std::path::Path;

use crate::domain::table::Table;
use crate::error::DriftwatchError;
use async_trait::async_trait;

// Struct simple pour décrire une colonne (indépendant de la DB)
#[derive(Debug, Clone)]
pub struct ColumnSchema {
    pub name: String,
    pub data_type: String,
    pub is_nullable: bool,
}

#[async_trait]
pub trait Connector: Send + Sync {
    /// Runs a statement for its side effects (DDL/DML, no result set).
    async fn execute(&self, query: &str) -> Result<(), DriftwatchError>;

    /// Runs a query and materializes the full result set in memory.
    async fn fetch_table(&self, query: &str) -> Result<Table, DriftwatchError>;

    /// Schema of a table known to the engine.
    async fn fetch_columns(&self, table_name: &str) -> Result<Vec<ColumnSchema>, DriftwatchError>;

    /// Attaches an already-materialized database file read-only under `name`,
    /// making `name.schema.table` references resolvable in queries.
    async fn attach_database(&self, name: &str, path: &Path) -> Result<(), DriftwatchError>;

    fn engine_name(&self) -> &str;
}
