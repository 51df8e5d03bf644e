//! Route handlers grouped by resource

pub mod callback;
pub mod health;
pub mod logs;
pub mod sms;
