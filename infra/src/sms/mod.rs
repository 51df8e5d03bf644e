//! SMS Service Module
//!
//! Implementations of the core `SmsServiceTrait`:
//!
//! - **Plivo**: production delivery over the Plivo REST API
//! - **Mock**: logs messages instead of sending them, for development

use std::sync::Arc;

use og_core::services::otp::SmsServiceTrait;
use og_shared::config::{SmsConfig, SmsProvider};

pub mod mock_sms;
pub mod plivo;

pub use mock_sms::MockSmsService;
pub use plivo::{PlivoConfig, PlivoSmsService};

#[cfg(test)]
mod tests;

/// Create an SMS service based on configuration
///
/// A Plivo configuration that fails validation falls back to the mock
/// transport with a warning, so a misconfigured development box still boots.
pub fn create_sms_service(config: &SmsConfig) -> Arc<dyn SmsServiceTrait> {
    match config.provider {
        SmsProvider::Mock => Arc::new(MockSmsService::new(config.from_number.clone())),
        SmsProvider::Plivo => match PlivoConfig::from_sms_config(config).and_then(PlivoSmsService::new) {
            Ok(service) => Arc::new(service),
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize Plivo SMS service");
                tracing::warn!("Falling back to mock SMS service");
                Arc::new(MockSmsService::new(config.from_number.clone()))
            }
        },
    }
}
