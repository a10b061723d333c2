// driftwatch-core/src/infrastructure/adapters/duckdb.rs

use async_trait::async_trait;
use duckdb::types::Value as DuckValue;
use duckdb::{Config, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};

// Imports Hexagonaux
use crate::domain::table::{Column, Table, Value};
use crate::error::DriftwatchError;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::ports::connector::{ColumnSchema, Connector};

pub struct DuckDBConnector {
    conn: Arc<Mutex<Connection>>,
}

impl DuckDBConnector {
    pub fn new(db_path: &str) -> Result<Self, InfrastructureError> {
        let config = Config::default();

        let conn = if db_path == ":memory:" {
            Connection::open_in_memory_with_flags(config)?
        } else {
            Connection::open_with_flags(db_path, config)?
        };

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, DriftwatchError> {
        self.conn.lock().map_err(|_| {
            DriftwatchError::Infrastructure(InfrastructureError::Io(std::io::Error::other(
                "DuckDB Mutex Poisoned",
            )))
        })
    }

    fn convert_value(value: DuckValue) -> Value {
        match value {
            DuckValue::Null => Value::Null,
            DuckValue::Boolean(b) => Value::Bool(b),
            DuckValue::TinyInt(i) => Value::Int(i as i64),
            DuckValue::SmallInt(i) => Value::Int(i as i64),
            DuckValue::Int(i) => Value::Int(i as i64),
            DuckValue::BigInt(i) => Value::Int(i),
            DuckValue::UTinyInt(i) => Value::Int(i as i64),
            DuckValue::USmallInt(i) => Value::Int(i as i64),
            DuckValue::UInt(i) => Value::Int(i as i64),
            DuckValue::UBigInt(i) => i64::try_from(i)
                .map(Value::Int)
                .unwrap_or_else(|_| Value::Text(i.to_string())),
            DuckValue::HugeInt(i) => i64::try_from(i)
                .map(Value::Int)
                .unwrap_or_else(|_| Value::Text(i.to_string())),
            DuckValue::Float(f) => Value::Float(f as f64),
            DuckValue::Double(f) => Value::Float(f),
            DuckValue::Decimal(d) => d
                .to_string()
                .parse::<f64>()
                .map(Value::Float)
                .unwrap_or_else(|_| Value::Text(d.to_string())),
            DuckValue::Text(s) => Value::Text(s),
            DuckValue::Enum(s) => Value::Text(s),
            // Temporal/nested types only need to survive display, not math
            other => Value::Text(format!("{:?}", other)),
        }
    }
}

#[async_trait]
impl Connector for DuckDBConnector {
    async fn execute(&self, query: &str) -> Result<(), DriftwatchError> {
        let conn = self.lock()?;
        conn.execute(query, []).map(|_rows| ()).map_err(|e| {
            DriftwatchError::Infrastructure(InfrastructureError::Database(DatabaseError::DuckDB(e)))
        })
    }

    async fn fetch_table(&self, query: &str) -> Result<Table, DriftwatchError> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(query).map_err(|e| {
            DriftwatchError::Infrastructure(InfrastructureError::Database(DatabaseError::DuckDB(e)))
        })?;

        let mut rows = stmt.query([]).map_err(|e| {
            DriftwatchError::Infrastructure(InfrastructureError::Database(DatabaseError::DuckDB(e)))
        })?;

        let mut names: Vec<String> = Vec::new();
        let mut data: Vec<Vec<Value>> = Vec::new();

        loop {
            let row = match rows.next().map_err(|e| {
                DriftwatchError::Infrastructure(InfrastructureError::Database(
                    DatabaseError::DuckDB(e),
                ))
            })? {
                Some(row) => row,
                None => break,
            };

            if names.is_empty() {
                let stmt_ref = row.as_ref();
                for idx in 0..stmt_ref.column_count() {
                    let name = stmt_ref.column_name(idx).map_err(|e| {
                        DriftwatchError::Infrastructure(InfrastructureError::Database(
                            DatabaseError::DuckDB(e),
                        ))
                    })?;
                    names.push(name.to_string());
                    data.push(Vec::new());
                }
            }

            for (idx, values) in data.iter_mut().enumerate() {
                let raw: DuckValue = row.get(idx).map_err(|e| {
                    DriftwatchError::Infrastructure(InfrastructureError::Database(
                        DatabaseError::DuckDB(e),
                    ))
                })?;
                values.push(Self::convert_value(raw));
            }
        }
        drop(rows);

        // Empty result set: the statement was still executed, so column
        // metadata is available for a zero-row table.
        if names.is_empty() {
            names = stmt.column_names().iter().map(|n| n.to_string()).collect();
            data = vec![Vec::new(); names.len()];
        }

        let columns = names
            .into_iter()
            .zip(data)
            .map(|(name, values)| Column { name, values })
            .collect();

        Table::from_columns(columns).map_err(DriftwatchError::Domain)
    }

    async fn fetch_columns(&self, table_name: &str) -> Result<Vec<ColumnSchema>, DriftwatchError> {
        let conn = self.lock()?;

        let mut stmt = conn
            .prepare(&format!("PRAGMA table_info('{}')", table_name))
            .map_err(|e| {
                DriftwatchError::Infrastructure(InfrastructureError::Database(
                    DatabaseError::DuckDB(e),
                ))
            })?;

        let rows = stmt
            .query_map([], |row| {
                Ok(ColumnSchema {
                    name: row.get("name")?,
                    data_type: row.get("type")?,
                    is_nullable: !row.get::<_, bool>("notnull")?,
                })
            })
            .map_err(|e| {
                DriftwatchError::Infrastructure(InfrastructureError::Database(
                    DatabaseError::DuckDB(e),
                ))
            })?;

        let mut columns = Vec::new();
        for row in rows {
            columns.push(row.map_err(|e| {
                DriftwatchError::Infrastructure(InfrastructureError::Database(
                    DatabaseError::DuckDB(e),
                ))
            })?);
        }

        Ok(columns)
    }

    async fn attach_database(&self, name: &str, path: &Path) -> Result<(), DriftwatchError> {
        // Read-only: a registered external database is a source, never a sink
        let query = format!(
            "ATTACH IF NOT EXISTS '{}' AS \"{}\" (READ_ONLY)",
            path.to_string_lossy().replace('\'', "''"),
            name.replace('"', "\"\"")
        );
        self.execute(&query).await
    }

    fn engine_name(&self) -> &str {
        "duckdb"
    }
}
