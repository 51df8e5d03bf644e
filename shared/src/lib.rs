//! Shared utilities and common types for the OTP gateway server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures and error codes
//! - Phone number utilities
//! - Health report types

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, CorsConfig, DatabaseConfig, Environment, LoggingConfig, OtpConfig,
    RateLimitConfig, ServerConfig, SmsConfig, StorageBackend,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{HealthResponse, HealthStatus};
pub use utils::phone;
