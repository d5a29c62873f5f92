//! Renovation cost model

use super::tables::{
    quality_cost_factor, regional_factors, room_cost, size_factor, CONTINGENCY_SHARE,
    LABOR_SHARE, MATERIALS_SHARE, OVERHEAD_SHARE, PERMITS_SHARE,
};
use super::types::{CostBreakdown, QualityLevel, Region, RoomSize, RoomType};

/// Estimate what a renovation costs, split into categories.
///
/// The base rate per square foot is scaled by independent quality, size,
/// regional and room-complexity factors, then divided into fixed shares.
/// Labor is additionally scaled by the room's and the region's labor
/// multipliers. `style` does not affect the price.
pub fn calculate_renovation_cost(
    room_type: RoomType,
    room_size: RoomSize,
    _style: &str,
    square_footage: f64,
    region: Region,
    quality_level: QualityLevel,
) -> CostBreakdown {
    let room = room_cost(room_type);
    let regional = regional_factors(region);

    let base_cost = room.base_cost_per_sqft * square_footage;
    let adjusted_cost = base_cost
        * quality_cost_factor(quality_level)
        * size_factor(room_size)
        * regional.cost_multiplier
        * room.complexity_factor;

    let materials = adjusted_cost * MATERIALS_SHARE;
    let labor =
        adjusted_cost * LABOR_SHARE * room.labor_multiplier * regional.labor_multiplier;
    let permits = adjusted_cost * PERMITS_SHARE;
    let overhead = adjusted_cost * OVERHEAD_SHARE;
    let contingency = adjusted_cost * CONTINGENCY_SHARE;

    // Rounded once from the unrounded parts, not re-added from the rounded ones.
    let total = materials + labor + permits + overhead + contingency;

    CostBreakdown {
        materials: materials.round(),
        labor: labor.round(),
        permits: permits.round(),
        overhead: overhead.round(),
        contingency: contingency.round(),
        total: total.round(),
    }
}
