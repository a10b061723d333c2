// driftwatch-core/src/application/session.rs
//
// The analyst-facing query surface: one session per engine connection.
// Everything is passed to the engine verbatim except CREATE EXTERNAL
// DATABASE, which the engine does not know; we resolve it against the
// session's warehouse directory and attach the database read-only.

use std::path::PathBuf;

use tracing::info;

use crate::application::engine;
use crate::domain::sql::external::ExternalDatabaseDdl;
use crate::domain::table::Table;
use crate::error::DriftwatchError;
use crate::infrastructure::adapters::duckdb::DuckDBConnector;
use crate::infrastructure::config::connection::ConnectionString;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::connector::{ColumnSchema, Connector};

pub struct Session {
    connector: Box<dyn Connector>,
    warehouse_dir: PathBuf,
}

impl Session {
    /// Opens a session from an opaque connection string
    /// (`duckdb:<path>[;warehouse_dir=<dir>]`).
    pub fn connect(connection_string: &str) -> Result<Self, DriftwatchError> {
        let parsed = ConnectionString::parse(connection_string)?;
        let connector = DuckDBConnector::new(&parsed.database_path)?;
        Ok(Self::with_connector(
            Box::new(connector),
            parsed.warehouse_dir,
        ))
    }

    /// Injection point for tests and alternative engines.
    pub fn with_connector(connector: Box<dyn Connector>, warehouse_dir: PathBuf) -> Self {
        Self {
            connector,
            warehouse_dir,
        }
    }

    pub fn engine_name(&self) -> &str {
        self.connector.engine_name()
    }

    /// Runs a statement for its side effects. `CREATE EXTERNAL DATABASE` is
    /// intercepted here; everything else goes to the engine untouched.
    pub async fn execute(&self, sql: &str) -> Result<(), DriftwatchError> {
        if let Some(ddl) = ExternalDatabaseDdl::parse(sql)? {
            return self.register_external_database(&ddl).await;
        }
        engine::execute_query(self.connector.as_ref(), sql).await
    }

    /// Runs a query and returns the in-memory result set.
    pub async fn sql(&self, query: &str) -> Result<Table, DriftwatchError> {
        engine::fetch_table(self.connector.as_ref(), query).await
    }

    pub async fn fetch_columns(
        &self,
        table_name: &str,
    ) -> Result<Vec<ColumnSchema>, DriftwatchError> {
        self.connector.fetch_columns(table_name).await
    }

    /// Registers a warehouse-style external database: the OPTIONS are
    /// validated by the parser, the database name resolves to a file under
    /// `warehouse_dir`, and the engine attaches it read-only.
    async fn register_external_database(
        &self,
        ddl: &ExternalDatabaseDdl,
    ) -> Result<(), DriftwatchError> {
        let path = self
            .warehouse_dir
            .join(format!("{}.duckdb", ddl.options.database));

        if !path.exists() {
            return Err(InfrastructureError::ExternalDatabaseNotFound {
                name: ddl.name.clone(),
                path,
            }
            .into());
        }

        self.connector.attach_database(&ddl.name, &path).await?;
        // Account and credentials are recorded by the parser but never logged
        info!(
            "🔌 External database '{}' ({}) attached from {:?}",
            ddl.name, ddl.engine, path
        );
        Ok(())
    }
}
