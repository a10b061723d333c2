// driftwatch-core/src/application/engine.rs

use std::time::Instant;
use tracing::{debug, error, instrument};

// Imports Hexagonaux
use crate::domain::table::Table;
use crate::error::DriftwatchError;
use crate::ports::connector::Connector;

/// Exécute une requête SQL brute avec instrumentation (Logs + Timing).
/// Ce wrapper permet de surveiller la performance de toutes les requêtes ad-hoc.
#[instrument(skip(connector), fields(query.len = query.len()))]
pub async fn execute_query(connector: &dyn Connector, query: &str) -> Result<(), DriftwatchError> {
    let start = Instant::now();
    debug!("⚡ Executing Query: {}", query);

    let result = connector.execute(query).await;

    let duration = start.elapsed();

    match result {
        Ok(_) => {
            debug!("✅ Query finished in {:.2?}", duration);
            Ok(())
        }
        Err(e) => {
            error!("❌ Query failed after {:.2?}: {}", duration, e);
            Err(e)
        }
    }
}

/// Même instrumentation pour les requêtes qui matérialisent un résultat.
#[instrument(skip(connector), fields(query.len = query.len()))]
pub async fn fetch_table(connector: &dyn Connector, query: &str) -> Result<Table, DriftwatchError> {
    let start = Instant::now();
    debug!("⚡ Fetching Query: {}", query);

    let result = connector.fetch_table(query).await;

    let duration = start.elapsed();

    match result {
        Ok(table) => {
            debug!(
                "✅ Query returned {} rows x {} cols in {:.2?}",
                table.num_rows(),
                table.num_columns(),
                duration
            );
            Ok(table)
        }
        Err(e) => {
            error!("❌ Query failed after {:.2?}: {}", duration, e);
            Err(e)
        }
    }
}
