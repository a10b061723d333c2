// driftwatch/src/main.rs

use clap::Parser;

mod cli;
mod commands;
mod render;

use cli::{CheckpointCommands, Cli, Commands, SuiteCommands};
use driftwatch_core::DriftwatchError;

/// Typed errors carry miette diagnostics (code + help); render those fully,
/// fall back to the anyhow chain for everything else.
fn fail(prefix: &str, e: anyhow::Error) -> ! {
    match e.downcast::<DriftwatchError>() {
        Ok(DriftwatchError::Domain(d)) => {
            eprintln!("{} {:?}", prefix, miette::Report::new(d));
        }
        Ok(DriftwatchError::Infrastructure(i)) => {
            eprintln!("{} {:?}", prefix, miette::Report::new(i));
        }
        Ok(other) => eprintln!("{} {}", prefix, other),
        Err(e) => eprintln!("{} {:#}", prefix, e),
    }
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG=debug driftwatch query ... pour voir les détails
    tracing_subscriber::fmt::init();

    let args = Cli::parse();

    match args.command {
        // --- USE CASE: AD-HOC QUERY ---
        Commands::Query {
            query,
            connect,
            limit,
        } => {
            if let Err(e) = commands::query::execute(query, connect, limit).await {
                fail("❌ Query failed:", e);
            }
        }

        // --- USE CASE: INSPECT TABLE ---
        Commands::Inspect {
            connect,
            table,
            limit,
        } => {
            if let Err(e) = commands::inspect::execute(connect, table, limit).await {
                fail("❌ Inspect failed:", e);
            }
        }

        // --- USE CASE: EXPECTATION SUITES ---
        Commands::Suite { command } => match command {
            SuiteCommands::List { context_dir } => {
                if let Err(e) = commands::suite::list(&context_dir) {
                    fail("❌ Suite listing failed:", e);
                }
            }
            SuiteCommands::Show { name, context_dir } => {
                if let Err(e) = commands::suite::show(&name, &context_dir) {
                    fail("❌ Suite lookup failed:", e);
                }
            }
        },

        // --- USE CASE: CHECKPOINTS ---
        Commands::Checkpoint { command } => match command {
            CheckpointCommands::List { context_dir } => {
                if let Err(e) = commands::checkpoint::list(&context_dir) {
                    fail("❌ Checkpoint listing failed:", e);
                }
            }
            CheckpointCommands::Run {
                name,
                sql,
                connect,
                context_dir,
            } => match commands::checkpoint::run(&name, &sql, &connect, &context_dir).await {
                // Exit with error code for CI/CD
                Ok(false) => std::process::exit(1),
                Ok(true) => {}
                Err(e) => fail("💥 CRITICAL CHECKPOINT ERROR:", e),
            },
        },
    }

    Ok(())
}
