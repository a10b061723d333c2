pub mod connection;

pub use connection::ConnectionString;
