// driftwatch-core/src/application/validator.rs
//
// The interactive validation surface: wrap a query result, declare a rule,
// see the outcome immediately, keep iterating until the suite matches your
// understanding of the data, then save it under a name.

use crate::domain::expectation::outcome::ExpectationResult;
use crate::domain::expectation::rule::Expectation;
use crate::domain::expectation::suite::ExpectationSuite;
use crate::domain::table::Table;
use crate::error::DriftwatchError;
use crate::infrastructure::store::{QualityContext, validate_artifact_name};

pub const DEFAULT_SUITE_NAME: &str = "default";

pub struct Validator {
    table: Table,
    suite: ExpectationSuite,
}

impl Validator {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            suite: ExpectationSuite::new(DEFAULT_SUITE_NAME),
        }
    }

    /// Rebinds the validator to fresh data, keeping the working suite.
    pub fn bind(&mut self, table: Table) {
        self.table = table;
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Preview of the bound data, `.head()` style.
    pub fn head(&self, n: usize) -> Table {
        self.table.head(n)
    }

    pub fn expectation_suite(&self) -> &ExpectationSuite {
        &self.suite
    }

    pub fn set_expectation_suite_name(&mut self, name: &str) -> Result<(), DriftwatchError> {
        validate_artifact_name(name)?;
        self.suite.name = name.to_string();
        Ok(())
    }

    /// Declares and immediately evaluates a non-null rule. The rule is
    /// recorded in the working suite (replacing a previous declaration of the
    /// same kind on the same column).
    pub fn expect_column_values_to_not_be_null(
        &mut self,
        column: &str,
    ) -> Result<ExpectationResult, DriftwatchError> {
        self.declare(Expectation::not_null(column))
    }

    /// Declares and immediately evaluates a numeric range rule.
    pub fn expect_column_values_to_be_between(
        &mut self,
        column: &str,
        min_value: f64,
        max_value: f64,
    ) -> Result<ExpectationResult, DriftwatchError> {
        self.declare(Expectation::between(column, min_value, max_value))
    }

    fn declare(
        &mut self,
        expectation: Expectation,
    ) -> Result<ExpectationResult, DriftwatchError> {
        let result = expectation.evaluate(&self.table)?;
        self.suite.add_or_replace(expectation);
        Ok(result)
    }

    /// Persists the working suite under its current name (overwrite
    /// semantics live in the store).
    pub fn save_expectation_suite(
        &self,
        context: &QualityContext,
    ) -> Result<std::path::PathBuf, DriftwatchError> {
        context.save_suite(&self.suite)
    }
}
