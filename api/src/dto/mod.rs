//! Request and response bodies

pub mod callback;
pub mod logs;
pub mod sms;

pub use callback::{CallbackRequestDto, CallbackResponse, UpdateCallbackStatusRequest};
pub use logs::LogsQuery;
pub use sms::{
    SendOtpRequest, SendOtpResponse, SendSmsRequest, SendSmsResponse, VerifyOtpRequest, VerifyOtpResponse,
};

use og_shared::utils::is_valid_phone;
use validator::ValidationError;

/// E.164 check shared by every body carrying a `phone_number`
pub fn validate_phone_number(phone: &str) -> Result<(), ValidationError> {
    if is_valid_phone(phone) {
        Ok(())
    } else {
        let mut error = ValidationError::new("phone_format");
        error.message = Some("Invalid phone number format".into());
        Err(error)
    }
}
