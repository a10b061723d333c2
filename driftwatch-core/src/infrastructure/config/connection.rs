// driftwatch-core/src/infrastructure/config/connection.rs
//
// The connection string is deliberately opaque to callers: one string an
// analyst can paste into a notebook, a shell, or a CI variable.
//
//     duckdb:<path>[;key=value]*
//     duckdb::memory:                    (in-memory engine)
//     duckdb:analytics.duckdb;warehouse_dir=warehouses
//
// `warehouse_dir` is where CREATE EXTERNAL DATABASE resolves its database
// files; it defaults to the directory holding the engine file.

use std::path::PathBuf;

use crate::infrastructure::error::InfrastructureError;

pub const MEMORY_PATH: &str = ":memory:";

#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionString {
    pub database_path: String,
    pub warehouse_dir: PathBuf,
}

impl ConnectionString {
    pub fn parse(raw: &str) -> Result<Self, InfrastructureError> {
        let rest = raw.trim().strip_prefix("duckdb:").ok_or_else(|| {
            InfrastructureError::ConnectionString(format!(
                "unsupported scheme in '{}', expected 'duckdb:'",
                raw
            ))
        })?;

        let mut segments = rest.split(';');
        let database_path = segments.next().unwrap_or("").trim().to_string();
        if database_path.is_empty() {
            return Err(InfrastructureError::ConnectionString(
                "missing database path".to_string(),
            ));
        }

        let mut warehouse_dir: Option<PathBuf> = None;
        for segment in segments {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            let (key, value) = segment.split_once('=').ok_or_else(|| {
                InfrastructureError::ConnectionString(format!(
                    "expected key=value, got '{}'",
                    segment
                ))
            })?;
            match key.trim() {
                "warehouse_dir" => warehouse_dir = Some(PathBuf::from(value.trim())),
                other => {
                    return Err(InfrastructureError::ConnectionString(format!(
                        "unknown option '{}'",
                        other
                    )));
                }
            }
        }

        let warehouse_dir = warehouse_dir.unwrap_or_else(|| Self::default_warehouse_dir(&database_path));

        Ok(Self {
            database_path,
            warehouse_dir,
        })
    }

    fn default_warehouse_dir(database_path: &str) -> PathBuf {
        if database_path == MEMORY_PATH {
            return PathBuf::from(".");
        }
        PathBuf::from(database_path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path == MEMORY_PATH
    }
}
