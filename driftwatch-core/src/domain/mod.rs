pub mod checkpoint;
pub mod error;
pub mod expectation;
pub mod sql;
pub mod table;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use error::DomainError;
pub use table::{Column, Table, Value};
