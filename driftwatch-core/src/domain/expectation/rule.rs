// driftwatch-core/src/domain/expectation/rule.rs
//
// A single declarative data-quality rule: a column plus a predicate with its
// parameters. Evaluation is pure domain logic against an in-memory Table;
// a value that breaks the rule is COUNTED, never raised as an error.

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::table::{Column, Table, Value};

/// How many offending values we keep per result, for display purposes.
const UNEXPECTED_SAMPLE_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Predicate {
    /// Every value must be non-NULL.
    NotNull,
    /// Every non-NULL value must be numeric and inside [min_value, max_value].
    /// NULLs are ignored here; non-null-ness is NotNull's job.
    Between { min_value: f64, max_value: f64 },
}

impl Predicate {
    /// Stable identifier used for replace-on-redeclare and display.
    pub fn kind(&self) -> &'static str {
        match self {
            Predicate::NotNull => "not_null",
            Predicate::Between { .. } => "between",
        }
    }

    fn is_unexpected(&self, value: &Value) -> bool {
        match self {
            Predicate::NotNull => value.is_null(),
            Predicate::Between {
                min_value,
                max_value,
            } => {
                if value.is_null() {
                    return false;
                }
                match value.as_f64() {
                    Some(v) => v < *min_value || v > *max_value,
                    // Non-numeric content cannot satisfy a range
                    None => true,
                }
            }
        }
    }

    pub(crate) fn evaluate(&self, column: &Column) -> PredicateOutcome {
        let mut unexpected_count = 0;
        let mut unexpected_sample = Vec::new();

        for value in &column.values {
            if self.is_unexpected(value) {
                unexpected_count += 1;
                if unexpected_sample.len() < UNEXPECTED_SAMPLE_LIMIT {
                    unexpected_sample.push(value.clone());
                }
            }
        }

        PredicateOutcome {
            element_count: column.values.len(),
            unexpected_count,
            unexpected_sample,
        }
    }
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Predicate::NotNull => write!(f, "not_null"),
            Predicate::Between {
                min_value,
                max_value,
            } => write!(f, "between [{}, {}]", min_value, max_value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PredicateOutcome {
    pub element_count: usize,
    pub unexpected_count: usize,
    pub unexpected_sample: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expectation {
    pub column: String,
    #[serde(flatten)]
    pub predicate: Predicate,
}

impl Expectation {
    pub fn not_null(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            predicate: Predicate::NotNull,
        }
    }

    pub fn between(column: impl Into<String>, min_value: f64, max_value: f64) -> Self {
        Self {
            column: column.into(),
            predicate: Predicate::Between {
                min_value,
                max_value,
            },
        }
    }

    /// Evaluates against a table. A missing column is a SHAPE error (the
    /// table cannot satisfy the contract at all), not a failed result.
    pub fn evaluate(
        &self,
        table: &Table,
    ) -> Result<crate::domain::expectation::outcome::ExpectationResult, DomainError> {
        let column = table
            .column(&self.column)
            .ok_or_else(|| DomainError::ColumnNotFound {
                column: self.column.clone(),
                available: table.column_names().join(", "),
            })?;

        let outcome = self.predicate.evaluate(column);

        Ok(crate::domain::expectation::outcome::ExpectationResult {
            expectation: self.clone(),
            success: outcome.unexpected_count == 0,
            element_count: outcome.element_count,
            unexpected_count: outcome.unexpected_count,
            unexpected_sample: outcome.unexpected_sample,
        })
    }
}
