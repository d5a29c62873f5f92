use super::tables::{market_benchmark, regional_factors, MARKET_CONFIDENCE_LEVEL};
use super::types::{MarketComparison, Region, RoomType};

/// Industry benchmark for a room, with cost adjusted to the region.
pub fn get_market_comparison(room_type: RoomType, region: Region) -> MarketComparison {
    let benchmark = market_benchmark(room_type);

    MarketComparison {
        average_roi: benchmark.roi,
        average_cost: benchmark.cost * regional_factors(region).cost_multiplier,
        average_timeframe: benchmark.months,
        confidence_level: MARKET_CONFIDENCE_LEVEL,
    }
}
