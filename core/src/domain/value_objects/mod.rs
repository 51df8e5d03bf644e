//! Read-only views assembled from domain entities.

pub mod activity_log;
pub mod otp_status;

pub use activity_log::{ActivityLog, LogSection, RedactedOtp};
pub use otp_status::OtpStatus;
