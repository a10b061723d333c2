// driftwatch-core/src/infrastructure/mod.rs

pub mod adapters;
pub mod config;
pub mod error;
pub mod fs;
pub mod store;

// Optional: Re-export specific adapters if you want cleaner imports elsewhere
pub use store::QualityContext;
