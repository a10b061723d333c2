// driftwatch/src/commands/suite.rs
//
// USE CASE: List and show persisted expectation suites.

use std::path::Path;

use driftwatch_core::infrastructure::store::QualityContext;

use crate::render::render_suite;

pub fn list(context_dir: &Path) -> anyhow::Result<()> {
    let context = QualityContext::new(context_dir)?;
    let suites = context.list_suites()?;

    if suites.is_empty() {
        println!("📚 No expectation suites in {}", context_dir.display());
        return Ok(());
    }

    println!("📚 Expectation suites ({}):", suites.len());
    for name in suites {
        println!("   ➜ {}", name);
    }
    Ok(())
}

pub fn show(name: &str, context_dir: &Path) -> anyhow::Result<()> {
    let context = QualityContext::new(context_dir)?;
    let suite = context.load_suite(name)?;

    println!("\n📚 Suite '{}' ({} expectations)", suite.name, suite.len());
    println!("{}", render_suite(&suite));
    Ok(())
}
