//! Per-identity request throttling
//!
//! The throttle is an injected component: the OTP issuer and the SMS
//! sender both hold an `Arc<dyn RequestThrottle>` handed to them at
//! construction.

mod sliding_window;
mod traits;

#[cfg(test)]
mod tests;

pub use sliding_window::{SlidingWindowThrottle, UnlimitedThrottle};
pub use traits::{RequestThrottle, ThrottleDecision};
