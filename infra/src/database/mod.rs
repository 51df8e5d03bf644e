//! Database module - MySQL implementations using SQLx
//!
//! Provides the connection pool, embedded migrations and the MySQL
//! implementations of the core repository traits.

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlCallbackRepository, MySqlOtpRepository, MySqlSmsRepository};
