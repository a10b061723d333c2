pub mod connector;

pub use connector::{ColumnSchema, Connector};
