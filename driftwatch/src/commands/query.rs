// driftwatch/src/commands/query.rs
//
// USE CASE: Execute a raw SQL statement or query (ad-hoc).

use driftwatch_core::application::Session;

use crate::render::render_table;

/// Statements that produce rows are fetched and rendered; everything else
/// (DDL, INSERT, CREATE EXTERNAL DATABASE...) runs for its side effects.
fn produces_rows(query: &str) -> bool {
    let head = query.trim_start().to_uppercase();
    ["SELECT", "WITH", "FROM", "SHOW", "DESCRIBE"]
        .iter()
        .any(|kw| head.starts_with(kw))
}

pub async fn execute(query: String, connect: String, limit: usize) -> anyhow::Result<()> {
    let session = Session::connect(&connect)?;
    tracing::debug!("Session opened (engine: {})", session.engine_name());

    if produces_rows(&query) {
        let table = session.sql(&query).await?;
        let total = table.num_rows();

        println!("{}", render_table(&table.head(limit)));
        if total > limit {
            println!("   ... {} rows total (showing {})", total, limit);
        } else {
            println!("   {} rows", total);
        }
    } else {
        session.execute(&query).await?;
        println!("✨ Statement executed successfully.");
    }

    Ok(())
}
