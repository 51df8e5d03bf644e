//! OTP lifecycle module
//!
//! This module provides the one-time passcode workflow:
//! - Code generation, resend cooldown and dispatch (issuer)
//! - Expiry and attempt-ceiling enforcement (verifier)
//! - Background purge of expired records (reaper)

mod config;
mod reaper;
mod service;
mod traits;
mod types;


pub use config::OtpServiceConfig;
pub use reaper::{OtpReaper, ReapReport, ReaperHandle};
pub use service::OtpService;
pub(crate) use service::ensure_phone;
pub use traits::{render_otp_message, SmsServiceTrait, OTP_MESSAGE_TEMPLATE};
pub use types::{SendOtpOutcome, SendOtpResult, VerifyOtpResult, VerifyRejection};
