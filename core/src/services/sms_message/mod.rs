//! Free-form SMS sending with a persisted message log

mod service;

#[cfg(test)]
mod tests;

pub use service::{SendSmsResult, SmsMessageService, MAX_SMS_LENGTH};
