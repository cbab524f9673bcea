// Database modules
pub mod connection;

// Re-export database connection types
pub use connection::*;
