//! Request throttle backed by Redis, shared by every gateway instance

mod redis_throttle;

pub use redis_throttle::RedisSlidingWindowThrottle;
