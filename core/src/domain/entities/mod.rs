//! Domain entities representing core business objects.

pub mod callback;
pub mod otp_record;
pub mod sms_message;

// Re-export commonly used types
pub use callback::{CallbackPriority, CallbackRequest, CallbackStatus};
pub use otp_record::{OtpRecord, CODE_LENGTH, DEFAULT_EXPIRATION_SECONDS, MAX_ATTEMPTS};
pub use sms_message::{SmsMessage, SmsStatus};

#[cfg(test)]
mod tests;
