//! Operator view of recent gateway activity

mod service;

pub use service::{LogsService, DEFAULT_LOG_LIMIT, MAX_LOG_LIMIT};
