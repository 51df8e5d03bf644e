pub mod callback;
pub mod otp;
pub mod sms;

pub use callback::{CallbackRepository, InMemoryCallbackRepository};
pub use otp::{InMemoryOtpRepository, OtpRepository};
pub use sms::{InMemorySmsRepository, SmsRepository};
