//! Unit tests for SMS module

mod create_service_tests;
mod mock_sms_tests;
mod plivo_tests;
