//! Callback request tracking

mod service;

#[cfg(test)]
mod tests;

pub use service::{CallbackService, DEFAULT_CALLBACK_MESSAGE};
