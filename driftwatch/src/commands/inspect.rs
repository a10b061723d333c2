// driftwatch/src/commands/inspect.rs
//
// USE CASE: Inspect a table (schema + sample rows).

use driftwatch_core::application::Session;

use crate::render::{render_schema, render_table};

pub async fn execute(connect: String, table: String, limit: usize) -> anyhow::Result<()> {
    let session = Session::connect(&connect)?;

    println!("\n🔍 Inspecting Table: '{}'", table);

    let columns = session.fetch_columns(&table).await?;
    if columns.is_empty() {
        anyhow::bail!("❌ Table '{}' not found (no columns reported).", table);
    }
    println!("{}", render_schema(&columns));

    println!("   --- Rows (Limit {}) ---", limit);
    let sample = session
        .sql(&format!("SELECT * FROM \"{}\" LIMIT {}", table, limit))
        .await?;
    println!("{}", render_table(&sample));

    Ok(())
}
