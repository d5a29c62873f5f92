//! Request and response DTOs of the HTTP API

pub mod roi;

pub use roi::*;
