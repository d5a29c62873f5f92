//! Clients for external services

pub mod cache;

pub use cache::RedisCache;
