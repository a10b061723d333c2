pub mod external;

pub use external::{ExternalDatabaseDdl, WarehouseOptions};
