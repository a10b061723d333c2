use anyhow::{Context, Result};
use assert_cmd::prelude::*;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

use driftwatch_core::application::{Session, Validator, run_checkpoint};
use driftwatch_core::infrastructure::store::QualityContext;

/// Abstraction for managing the driftwatch test environment: a copy of the
/// nyc_quality demo plus a warehouse directory holding the "Snowflake" side
/// of the federation as a DuckDB file.
struct DriftTestEnv {
    _tmp: TempDir,
    root: PathBuf,
}

impl DriftTestEnv {
    fn new() -> Result<Self> {
        let tmp = tempfile::tempdir()?;
        let fixture = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .context("Workspace root not found")?
            .join("demos/nyc_quality");

        let dest = tmp.path().join("nyc_quality");
        Self::copy_dir(&fixture, &dest)?;

        let env = Self {
            _tmp: tmp,
            root: dest,
        };
        env.build_warehouse()?;
        Ok(env)
    }

    fn copy_dir(src: &PathBuf, dst: &PathBuf) -> std::io::Result<()> {
        let mut options = fs_extra::dir::CopyOptions::new();
        options.skip_exist = true;
        options.content_only = true;

        std::fs::create_dir_all(dst)?;
        fs_extra::dir::copy(src, dst, &options)
            .map(|_| ())
            .map_err(|e| std::io::Error::other(e.to_string()))
    }

    /// Seeds `warehouse/nyc_tree_db.duckdb` from the tree census CSV, plus
    /// bin 99: a park-adjacent building with 120 trees that only ever shows
    /// up once drifted sales batches reference it.
    fn build_warehouse(&self) -> Result<()> {
        let warehouse = self.root.join("warehouse");
        std::fs::create_dir_all(&warehouse)?;

        let conn = duckdb::Connection::open(warehouse.join("nyc_tree_db.duckdb"))?;
        conn.execute_batch(&format!(
            "CREATE TABLE trees AS SELECT * FROM read_csv_auto('{}');
             INSERT INTO trees VALUES (99, 120);",
            self.root.join("data/nyc_trees.csv").display()
        ))?;
        Ok(())
    }

    fn connect_string(&self) -> String {
        format!(
            "duckdb:{};warehouse_dir={}",
            self.root.join("local.duckdb").display(),
            self.root.join("warehouse").display()
        )
    }

    fn join_sql() -> &'static str {
        "SELECT s.address, t.number_trees
         FROM nyc_sales s
         JOIN snowflake_wh.trees t ON s.bin = t.bin
         ORDER BY s.bin"
    }

    fn driftwatch(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("driftwatch"));
        cmd.current_dir(&self.root);
        cmd
    }
}

/// The full analyst loop: local CSV ingest, external warehouse registration,
/// federated join, interactive expectations, checkpoint, drift via parquet
/// batches, then a suite revision that accepts the new reality.
#[tokio::test]
async fn test_federated_drift_workflow() -> Result<()> {
    let env = DriftTestEnv::new()?;
    let session = Session::connect(&env.connect_string())?;

    session
        .execute(&format!(
            "CREATE TABLE nyc_sales AS SELECT * FROM read_csv_auto('{}')",
            env.root.join("data/nyc_sales.csv").display()
        ))
        .await?;

    session
        .execute(
            "CREATE EXTERNAL DATABASE snowflake_wh FROM snowflake OPTIONS (
                account = 'xy12345',
                username = 'analyst',
                password = 's3cret',
                database = 'nyc_tree_db',
                warehouse = 'COMPUTE_WH',
                role = 'ANALYST'
            )",
        )
        .await?;

    let joined = session.sql(DriftTestEnv::join_sql()).await?;
    assert_eq!(joined.num_rows(), 6);

    // Declare expectations interactively against the joined result
    let mut validator = Validator::new(joined);
    assert!(
        validator
            .expect_column_values_to_not_be_null("address")?
            .success
    );
    assert!(
        validator
            .expect_column_values_to_be_between("number_trees", 0.0, 10.0)?
            .success
    );
    validator.set_expectation_suite_name("nyc_tree_suite")?;

    let context = QualityContext::new(&env.root.join("quality"))?;
    validator.save_expectation_suite(&context)?;
    let checkpoint = context.add_or_update_checkpoint("tree_suite_checkpoint", "nyc_tree_suite")?;

    let result = run_checkpoint(&context, &checkpoint, validator.table())?;
    assert!(result.success());

    // Two daily sales batches land as parquet partitions; day 1 references
    // bin 99 (the 120-tree outlier)
    for (day, row) in [
        ("day1", "SELECT 99 AS bin, '99 Drift Blvd' AS address, 125000 AS sale_price"),
        ("day2", "SELECT 6 AS bin, '6 Maple Dr' AS address, 870000 AS sale_price"),
    ] {
        let dir = env.root.join("batches").join(day);
        std::fs::create_dir_all(&dir)?;
        session
            .execute(&format!(
                "COPY ({}) TO '{}' (FORMAT PARQUET)",
                row,
                dir.join("sales.parquet").display()
            ))
            .await?;
    }

    // Glob paths federate straight into the query surface
    let glob = format!("{}/batches/*/*.parquet", env.root.display());
    let batch = session.sql(&format!("SELECT * FROM '{}'", glob)).await?;
    assert_eq!(batch.num_rows(), 2);

    session
        .execute(&format!(
            "INSERT INTO nyc_sales SELECT * FROM '{}'",
            glob
        ))
        .await?;

    let drifted = session.sql(DriftTestEnv::join_sql()).await?;
    assert_eq!(drifted.num_rows(), 8);

    // The checkpoint catches the drift; only the tracked range fails
    let result = run_checkpoint(&context, &checkpoint, &drifted)?;
    assert!(!result.success());
    let failed: Vec<_> = result
        .report
        .failures()
        .map(|r| r.expectation.predicate.kind())
        .collect();
    assert_eq!(failed, vec!["between"]);

    // The analyst decides the data are right: widen the bounds, re-save
    // under the SAME name, and the same checkpoint now passes
    validator.bind(drifted.clone());
    assert!(
        validator
            .expect_column_values_to_be_between("number_trees", 0.0, 1500.0)?
            .success
    );
    validator.save_expectation_suite(&context)?;

    let result = run_checkpoint(&context, &checkpoint, &drifted)?;
    assert!(result.success());

    // Every run left a JSON artifact behind
    let artifacts: Vec<_> = walkdir::WalkDir::new(
        env.root.join("quality/validations/tree_suite_checkpoint"),
    )
    .min_depth(1)
    .into_iter()
    .collect::<Result<Vec<_>, _>>()?;
    assert_eq!(artifacts.len(), 3);

    Ok(())
}

#[tokio::test]
async fn test_cli_checkpoint_run_exit_codes() -> Result<()> {
    let env = DriftTestEnv::new()?;

    // Seed a persistent database the CLI can reconnect to
    let db_path = env.root.join("local.duckdb");
    let conn = duckdb::Connection::open(&db_path)?;
    conn.execute_batch(
        "CREATE TABLE nyc_sales (bin INT, address VARCHAR, sale_price INT);
         INSERT INTO nyc_sales VALUES (1, '1 Main St', 550000), (2, '2 Oak Ave', 720000);",
    )?;
    drop(conn);

    let context = QualityContext::new(&env.root.join("quality"))?;
    let mut validator = Validator::new(
        Session::connect(&env.connect_string())?
            .sql("SELECT * FROM nyc_sales")
            .await?,
    );
    validator.expect_column_values_to_be_between("sale_price", 0.0, 1_000_000.0)?;
    validator.set_expectation_suite_name("sales_suite")?;
    validator.save_expectation_suite(&context)?;
    context.add_or_update_checkpoint("sales_checkpoint", "sales_suite")?;

    env.driftwatch()
        .args([
            "checkpoint",
            "run",
            "sales_checkpoint",
            "--sql",
            "SELECT * FROM nyc_sales",
            "--connect",
            &env.connect_string(),
            "--context-dir",
            "quality",
        ])
        .assert()
        .success()
        .stdout(predicates::str::contains("SUCCESS"));

    // Tighten the suite until it must fail; the CLI signals drift via exit 1
    let mut suite = context.load_suite("sales_suite")?;
    suite.add_or_replace(
        driftwatch_core::domain::expectation::rule::Expectation::between(
            "sale_price",
            0.0,
            100.0,
        ),
    );
    context.save_suite(&suite)?;

    env.driftwatch()
        .args([
            "checkpoint",
            "run",
            "sales_checkpoint",
            "--sql",
            "SELECT * FROM nyc_sales",
            "--connect",
            &env.connect_string(),
            "--context-dir",
            "quality",
        ])
        .assert()
        .failure()
        .stderr(predicates::str::contains("FAILURE"));

    // Unknown checkpoints are hard errors, not failed runs
    env.driftwatch()
        .args([
            "checkpoint",
            "run",
            "ghost",
            "--sql",
            "SELECT 1",
            "--context-dir",
            "quality",
        ])
        .assert()
        .failure()
        .stderr(predicates::str::contains("CRITICAL"));

    Ok(())
}

#[test]
fn test_cli_query_and_suite_listing() -> Result<()> {
    let env = DriftTestEnv::new()?;

    env.driftwatch()
        .args(["query", "SELECT 42 AS answer"])
        .assert()
        .success()
        .stdout(predicates::str::contains("answer"))
        .stdout(predicates::str::contains("42"));

    let context = QualityContext::new(&env.root.join("quality"))?;
    context.save_suite(
        &driftwatch_core::domain::expectation::suite::ExpectationSuite::new("nyc_tree_suite"),
    )?;

    env.driftwatch()
        .args(["suite", "list", "--context-dir", "quality"])
        .assert()
        .success()
        .stdout(predicates::str::contains("nyc_tree_suite"));

    env.driftwatch()
        .args(["suite", "show", "ghost", "--context-dir", "quality"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("Suite lookup failed"));

    Ok(())
}
