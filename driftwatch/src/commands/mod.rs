// driftwatch/src/commands/mod.rs

pub mod checkpoint;
pub mod inspect;
pub mod query;
pub mod suite;
