// driftwatch-core/src/application/mod.rs

pub mod checkpoint;
pub mod engine;
pub mod session;
pub mod validator;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Cela permet au CLI de faire :
// `use driftwatch_core::application::{Session, Validator, run_checkpoint};`
// sans avoir à connaître la structure interne des fichiers.

pub use checkpoint::run_checkpoint;
pub use engine::{execute_query, fetch_table};
pub use session::Session;
pub use validator::Validator;
