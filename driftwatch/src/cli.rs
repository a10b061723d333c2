// driftwatch/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_CONNECT: &str = "duckdb::memory:";

#[derive(Parser)]
#[command(name = "driftwatch")]
#[command(about = "Federated SQL queries with drift-aware data quality checkpoints", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ⚡ Executes a raw SQL statement or query (Ad-hoc)
    Query {
        query: String,

        /// Engine connection string (duckdb:<path>[;warehouse_dir=<dir>])
        #[arg(long, short, default_value = DEFAULT_CONNECT)]
        connect: String,

        /// Maximum number of result rows to display
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// 🔍 Inspects a table (schema + sample rows)
    Inspect {
        /// Engine connection string
        #[arg(long, short, default_value = "duckdb:driftwatch.duckdb")]
        connect: String,

        /// Table name to inspect
        #[arg(long, short)]
        table: String,

        /// Number of sample rows to display
        #[arg(long, default_value = "5")]
        limit: usize,
    },

    /// 📚 Lists or shows persisted expectation suites
    Suite {
        #[command(subcommand)]
        command: SuiteCommands,
    },

    /// 🧪 Manages and runs checkpoints
    Checkpoint {
        #[command(subcommand)]
        command: CheckpointCommands,
    },
}

#[derive(Subcommand)]
pub enum SuiteCommands {
    /// Lists persisted suites
    List {
        /// Quality context directory (suites/, checkpoints/, validations/)
        #[arg(long, default_value = ".")]
        context_dir: PathBuf,
    },

    /// Shows one suite definition
    Show {
        name: String,

        #[arg(long, default_value = ".")]
        context_dir: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum CheckpointCommands {
    /// Lists persisted checkpoints
    List {
        #[arg(long, default_value = ".")]
        context_dir: PathBuf,
    },

    /// Runs a checkpoint against the result of a SQL query
    Run {
        name: String,

        /// Query producing the table to validate
        #[arg(long)]
        sql: String,

        /// Engine connection string
        #[arg(long, short, default_value = DEFAULT_CONNECT)]
        connect: String,

        #[arg(long, default_value = ".")]
        context_dir: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, bail};
    use clap::Parser;

    #[test]
    fn test_cli_parse_query_defaults() -> Result<()> {
        let args = Cli::parse_from(["driftwatch", "query", "SELECT 1"]);
        match args.command {
            Commands::Query {
                query,
                connect,
                limit,
            } => {
                assert_eq!(query, "SELECT 1");
                assert_eq!(connect, DEFAULT_CONNECT);
                assert_eq!(limit, 20);
                Ok(())
            }
            _ => bail!("Expected Query command"),
        }
    }

    #[test]
    fn test_cli_parse_inspect() -> Result<()> {
        let args = Cli::parse_from(["driftwatch", "inspect", "--table", "nyc_sales", "--limit", "10"]);
        match args.command {
            Commands::Inspect {
                table,
                limit,
                connect,
            } => {
                assert_eq!(table, "nyc_sales");
                assert_eq!(limit, 10);
                assert_eq!(connect, "duckdb:driftwatch.duckdb");
                Ok(())
            }
            _ => bail!("Expected Inspect command"),
        }
    }

    #[test]
    fn test_cli_parse_checkpoint_run() -> Result<()> {
        let args = Cli::parse_from([
            "driftwatch",
            "checkpoint",
            "run",
            "tree_suite_checkpoint",
            "--sql",
            "SELECT * FROM nyc_sales",
            "--context-dir",
            "/tmp/ctx",
        ]);
        match args.command {
            Commands::Checkpoint {
                command:
                    CheckpointCommands::Run {
                        name,
                        sql,
                        connect,
                        context_dir,
                    },
            } => {
                assert_eq!(name, "tree_suite_checkpoint");
                assert_eq!(sql, "SELECT * FROM nyc_sales");
                assert_eq!(connect, DEFAULT_CONNECT);
                assert_eq!(context_dir.to_string_lossy(), "/tmp/ctx");
                Ok(())
            }
            _ => bail!("Expected Checkpoint Run command"),
        }
    }

    #[test]
    fn test_cli_parse_suite_show() -> Result<()> {
        let args = Cli::parse_from(["driftwatch", "suite", "show", "nyc_tree_suite"]);
        match args.command {
            Commands::Suite {
                command: SuiteCommands::Show { name, context_dir },
            } => {
                assert_eq!(name, "nyc_tree_suite");
                assert_eq!(context_dir.to_string_lossy(), ".");
                Ok(())
            }
            _ => bail!("Expected Suite Show command"),
        }
    }
}
