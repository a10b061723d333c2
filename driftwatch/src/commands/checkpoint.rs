// driftwatch/src/commands/checkpoint.rs
//
// USE CASE: List checkpoints and run one against fresh query results.

use std::path::Path;

use driftwatch_core::application::{Session, run_checkpoint};
use driftwatch_core::infrastructure::store::QualityContext;

use crate::render::render_checkpoint_result;

pub fn list(context_dir: &Path) -> anyhow::Result<()> {
    let context = QualityContext::new(context_dir)?;
    let checkpoints = context.list_checkpoints()?;

    if checkpoints.is_empty() {
        println!("🧪 No checkpoints in {}", context_dir.display());
        return Ok(());
    }

    println!("🧪 Checkpoints ({}):", checkpoints.len());
    for name in checkpoints {
        let checkpoint = context.get_checkpoint(&name)?;
        println!("   ➜ {} (suite: {})", checkpoint.name, checkpoint.suite_name);
    }
    Ok(())
}

/// Runs the named checkpoint against the result of `sql` and returns whether
/// every expectation passed. Failed expectations are rendered, not raised.
pub async fn run(
    name: &str,
    sql: &str,
    connect: &str,
    context_dir: &Path,
) -> anyhow::Result<bool> {
    let context = QualityContext::new(context_dir)?;
    let checkpoint = context.get_checkpoint(name)?;

    let session = Session::connect(connect)?;
    let table = session.sql(sql).await?;

    println!(
        "\n🧪 Running checkpoint '{}' (suite: {}) on {} rows",
        checkpoint.name,
        checkpoint.suite_name,
        table.num_rows()
    );

    let result = run_checkpoint(&context, &checkpoint, &table)?;
    println!("{}", render_checkpoint_result(&result));

    if result.success() {
        println!(
            "✨ SUCCESS! {}/{} expectations passed.",
            result.report.passed(),
            result.report.results.len()
        );
    } else {
        eprintln!(
            "❌ FAILURE. {} expectation(s) failed.",
            result.report.failed()
        );
    }

    Ok(result.success())
}
