//! Service facade consumed by the HTTP layer

mod service;

#[cfg(test)]
mod tests;

pub use service::{Gateway, GatewayConfig, GatewayDependencies, GatewayService};
