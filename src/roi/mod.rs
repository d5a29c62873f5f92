//! Renovation cost and return-on-investment engine
//!
//! Pure, synchronous calculations over static tables. Nothing here performs
//! I/O or holds state between calls, so every function is safe to call from
//! any number of request handlers at once.

pub mod advisory;
pub mod calculator;
pub mod cost;
pub mod market;
pub mod returns;
pub mod tables;
pub mod types;

pub use advisory::{generate_recommendations, generate_risk_factors};
pub use calculator::{calculate_multi_room_roi, calculate_roi};
pub use cost::calculate_renovation_cost;
pub use market::get_market_comparison;
pub use returns::estimate_roi;
pub use types::*;
