pub mod outcome;
pub mod rule;
pub mod suite;

// Re-exports pratiques
pub use outcome::{ExpectationResult, SuiteReport};
pub use rule::{Expectation, Predicate};
pub use suite::ExpectationSuite;
