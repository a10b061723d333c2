// driftwatch-core/src/domain/expectation/outcome.rs
//
// Evaluation outcomes. A failed expectation lives here as DATA: the caller
// decides what a failure means (abort a CI run, or just tell the analyst).

use serde::{Deserialize, Serialize};

use crate::domain::expectation::rule::Expectation;
use crate::domain::table::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectationResult {
    pub expectation: Expectation,
    pub success: bool,
    pub element_count: usize,
    pub unexpected_count: usize,
    /// First few offending values, for display.
    pub unexpected_sample: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteReport {
    pub suite_name: String,
    pub results: Vec<ExpectationResult>,
}

impl SuiteReport {
    pub fn success(&self) -> bool {
        self.results.iter().all(|r| r.success)
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ExpectationResult> {
        self.results.iter().filter(|r| !r.success)
    }
}
