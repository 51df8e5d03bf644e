//! Business services containing domain logic and use cases.

mod bounded;

pub mod callback;
pub mod gateway;
pub mod logs;
pub mod otp;
pub mod sms_message;
pub mod throttle;

// Re-export commonly used types
pub use callback::CallbackService;
pub use gateway::{Gateway, GatewayConfig, GatewayDependencies, GatewayService};
pub use logs::LogsService;
pub use otp::{
    render_otp_message, OtpReaper, OtpService, OtpServiceConfig, ReapReport, ReaperHandle, SendOtpOutcome, SendOtpResult,
    SmsServiceTrait, VerifyOtpResult, VerifyRejection, OTP_MESSAGE_TEMPLATE,
};
pub use sms_message::{SendSmsResult, SmsMessageService};
pub use throttle::{RequestThrottle, SlidingWindowThrottle, ThrottleDecision, UnlimitedThrottle};
