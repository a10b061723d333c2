// driftwatch-core/src/domain/checkpoint.rs
//
// A checkpoint is the persisted, re-executable unit: a name bound to a suite
// name. The data it runs against is REBOUND at every run, which is the whole
// point — the same checkpoint against drifted data yields different outcomes
// while the suite definition stays untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::expectation::outcome::SuiteReport;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub name: String,
    pub suite_name: String,
}

impl Checkpoint {
    pub fn new(name: impl Into<String>, suite_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            suite_name: suite_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointResult {
    pub checkpoint_name: String,
    pub run_time: DateTime<Utc>,
    pub report: SuiteReport,
}

impl CheckpointResult {
    pub fn success(&self) -> bool {
        self.report.success()
    }
}
