//! # OTP Gateway API
//!
//! actix-web surface over the gateway services: request DTOs with
//! `validator`, route handlers, and the mapping of domain errors to HTTP
//! responses.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::{configure_routes, create_app, AppState};
