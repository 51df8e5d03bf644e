//! # OTP Gateway Core
//!
//! Core business logic and domain layer for the OTP gateway.
//! This crate contains domain entities, the OTP lifecycle services,
//! repository interfaces with in-memory stores, and error types that
//! form the foundation of the application architecture.

pub mod clock;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
