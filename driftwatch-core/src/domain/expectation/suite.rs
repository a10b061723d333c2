// driftwatch-core/src/domain/expectation/suite.rs

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::expectation::outcome::SuiteReport;
use crate::domain::expectation::rule::Expectation;
use crate::domain::table::Table;

/// A named, persisted collection of expectations. The name is what suites
/// are stored and overwritten under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectationSuite {
    pub name: String,
    #[serde(default)]
    pub expectations: Vec<Expectation>,
}

impl ExpectationSuite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expectations: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.expectations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expectations.is_empty()
    }

    /// Records an expectation. Re-declaring the same predicate kind on the
    /// same column REPLACES the previous declaration — that is the
    /// interactive "edit the rule until it matches your understanding" loop.
    pub fn add_or_replace(&mut self, expectation: Expectation) {
        if let Some(existing) = self.expectations.iter_mut().find(|e| {
            e.column == expectation.column && e.predicate.kind() == expectation.predicate.kind()
        }) {
            *existing = expectation;
        } else {
            self.expectations.push(expectation);
        }
    }

    /// Evaluates every expectation against the table, in declaration order.
    /// Failures are collected in the report; only shape problems error out.
    pub fn evaluate(&self, table: &Table) -> Result<SuiteReport, DomainError> {
        let mut results = Vec::with_capacity(self.expectations.len());
        for expectation in &self.expectations {
            results.push(expectation.evaluate(table)?);
        }
        Ok(SuiteReport {
            suite_name: self.name.clone(),
            results,
        })
    }
}
