//! Types shared between the gateway facade and the HTTP layer

pub mod health;

pub use health::{HealthResponse, HealthStatus, ServiceHealth};
