//! Dispatch transport consumed by the OTP and SMS services

use async_trait::async_trait;

/// Text sent with every OTP; `{code}` is replaced by the passcode
pub const OTP_MESSAGE_TEMPLATE: &str = "Your OTP is: {code}. Valid for 5 minutes. Do not share this code.";

/// Render the OTP message for `code`
pub fn render_otp_message(code: &str) -> String {
    OTP_MESSAGE_TEMPLATE.replace("{code}", code)
}

/// Trait for SMS provider integration
///
/// A call either succeeds with the provider's message id or fails; delivery
/// receipts are not consumed.
#[async_trait]
pub trait SmsServiceTrait: Send + Sync {
    /// Send an OTP using [`OTP_MESSAGE_TEMPLATE`]
    async fn send_otp(&self, phone: &str, code: &str) -> Result<String, String>;

    /// Send a free-form message
    async fn send_sms(&self, phone: &str, message: &str) -> Result<String, String>;

    /// Short provider identifier recorded with each message
    fn provider_name(&self) -> &str;

    /// Number messages are sent from
    fn sender_number(&self) -> &str;
}
