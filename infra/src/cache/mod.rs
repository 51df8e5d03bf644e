//! Cache module for Redis-based state shared across gateway instances

pub mod redis_client;

pub use redis_client::RedisClient;

// Re-export commonly used types
pub use og_shared::config::CacheConfig;
