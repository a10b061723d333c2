// driftwatch-core/src/application/checkpoint.rs
//
// Running a checkpoint: load the bound suite, evaluate it against the table
// the caller rebinds, persist the outcome as a run artifact, hand the result
// back. Failed expectations are part of the RESULT — the run itself only
// errors on shape or store problems.

use chrono::Utc;
use tracing::info;

use crate::domain::checkpoint::{Checkpoint, CheckpointResult};
use crate::domain::table::Table;
use crate::error::DriftwatchError;
use crate::infrastructure::store::QualityContext;

pub fn run_checkpoint(
    context: &QualityContext,
    checkpoint: &Checkpoint,
    table: &Table,
) -> Result<CheckpointResult, DriftwatchError> {
    let suite = context.load_suite(&checkpoint.suite_name)?;
    let report = suite.evaluate(table)?;

    let result = CheckpointResult {
        checkpoint_name: checkpoint.name.clone(),
        run_time: Utc::now(),
        report,
    };

    let artifact = context.store_validation_result(&result)?;
    info!(
        "🧪 Checkpoint '{}': {}/{} expectations passed (artifact: {:?})",
        result.checkpoint_name,
        result.report.passed(),
        result.report.results.len(),
        artifact
    );

    Ok(result)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::error::DomainError;
    use crate::domain::expectation::rule::Expectation;
    use crate::domain::expectation::suite::ExpectationSuite;
    use crate::domain::table::{Column, Value};
    use anyhow::Result;
    use tempfile::tempdir;

    fn context_with_suite(dir: &std::path::Path) -> Result<QualityContext> {
        let context = QualityContext::new(dir)?;
        let mut suite = ExpectationSuite::new("nyc_tree_suite");
        suite.add_or_replace(Expectation::not_null("address"));
        suite.add_or_replace(Expectation::between("number_trees", 1.0, 10.0));
        context.save_suite(&suite)?;
        Ok(context)
    }

    fn table_with_trees(counts: &[i64]) -> Table {
        Table::from_columns(vec![
            Column::new(
                "address",
                counts
                    .iter()
                    .map(|i| Value::Text(format!("{} Main St", i)))
                    .collect(),
            ),
            Column::new(
                "number_trees",
                counts.iter().map(|i| Value::Int(*i)).collect(),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_same_data_twice_identical_outcomes() -> Result<()> {
        let dir = tempdir()?;
        let context = context_with_suite(dir.path())?;
        let checkpoint = context.add_or_update_checkpoint("tree_suite_checkpoint", "nyc_tree_suite")?;

        let table = table_with_trees(&[2, 5, 9]);
        let first = run_checkpoint(&context, &checkpoint, &table)?;
        let second = run_checkpoint(&context, &checkpoint, &table)?;

        assert!(first.success());
        assert_eq!(first.report, second.report);
        Ok(())
    }

    #[test]
    fn test_drifted_data_fails_only_tracked_expectation() -> Result<()> {
        let dir = tempdir()?;
        let context = context_with_suite(dir.path())?;
        let checkpoint = context.add_or_update_checkpoint("tree_suite_checkpoint", "nyc_tree_suite")?;

        // 120 exceeds max_value=10: the range fails, not_null still passes
        let result = run_checkpoint(&context, &checkpoint, &table_with_trees(&[2, 120]))?;
        assert!(!result.success());

        let by_kind: Vec<(&str, bool)> = result
            .report
            .results
            .iter()
            .map(|r| (r.expectation.predicate.kind(), r.success))
            .collect();
        assert_eq!(by_kind, vec![("not_null", true), ("between", false)]);
        Ok(())
    }

    #[test]
    fn test_resaved_suite_changes_next_run() -> Result<()> {
        let dir = tempdir()?;
        let context = context_with_suite(dir.path())?;
        let checkpoint = context.add_or_update_checkpoint("tree_suite_checkpoint", "nyc_tree_suite")?;

        let drifted = table_with_trees(&[2, 120]);
        assert!(!run_checkpoint(&context, &checkpoint, &drifted)?.success());

        // The analyst decides the DATA are right: widen and re-save the suite
        let mut suite = context.load_suite("nyc_tree_suite")?;
        suite.add_or_replace(Expectation::between("number_trees", 0.0, 1500.0));
        context.save_suite(&suite)?;

        // Same checkpoint, same data, new definition
        assert!(run_checkpoint(&context, &checkpoint, &drifted)?.success());
        Ok(())
    }

    #[test]
    fn test_unknown_suite_errors() -> Result<()> {
        let dir = tempdir()?;
        let context = QualityContext::new(dir.path())?;
        let checkpoint = Checkpoint::new("cp", "missing_suite");

        let err = run_checkpoint(&context, &checkpoint, &table_with_trees(&[1])).unwrap_err();
        assert!(matches!(
            err,
            DriftwatchError::Domain(DomainError::SuiteNotFound(_))
        ));
        Ok(())
    }

    #[test]
    fn test_run_persists_artifact() -> Result<()> {
        let dir = tempdir()?;
        let context = context_with_suite(dir.path())?;
        let checkpoint = context.add_or_update_checkpoint("tree_suite_checkpoint", "nyc_tree_suite")?;

        run_checkpoint(&context, &checkpoint, &table_with_trees(&[3]))?;

        let artifacts: Vec<_> = walkdir::WalkDir::new(
            dir.path().join("validations").join("tree_suite_checkpoint"),
        )
        .min_depth(1)
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;
        assert_eq!(artifacts.len(), 1);
        Ok(())
    }
}
