//! Static pricing, return and benchmark tables

use super::types::{QualityLevel, Region, RoomSize, RoomType};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomCost {
    pub base_cost_per_sqft: f64,
    pub complexity_factor: f64,
    pub labor_multiplier: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionalFactors {
    pub cost_multiplier: f64,
    pub labor_multiplier: f64,
}

/// Benchmark figures: ROI in percent, cost in currency units, time in months
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Benchmark {
    pub roi: f64,
    pub cost: f64,
    pub months: u32,
}

/// Share of the adjusted cost assigned to each category
pub const MATERIALS_SHARE: f64 = 0.40;
pub const LABOR_SHARE: f64 = 0.35;
pub const PERMITS_SHARE: f64 = 0.05;
pub const OVERHEAD_SHARE: f64 = 0.10;
pub const CONTINGENCY_SHARE: f64 = 0.10;

/// ROI factor for a lookup that resolves to no table entry
pub const DEFAULT_ROI_FACTOR: f64 = 0.60;

pub const MARKET_CONFIDENCE_LEVEL: u32 = 85;

pub const fn room_cost(room: RoomType) -> RoomCost {
    let (base, complexity, labor) = match room {
        RoomType::Kitchen => (150.0, 1.30, 1.20),
        RoomType::Bathroom => (125.0, 1.25, 1.15),
        RoomType::LivingRoom => (60.0, 1.00, 1.00),
        RoomType::Bedroom => (50.0, 0.90, 0.95),
        RoomType::DiningRoom => (55.0, 0.95, 1.00),
        RoomType::HomeOffice => (65.0, 1.05, 1.00),
        RoomType::Basement => (70.0, 1.20, 1.10),
        RoomType::Attic => (80.0, 1.25, 1.15),
    };
    RoomCost {
        base_cost_per_sqft: base,
        complexity_factor: complexity,
        labor_multiplier: labor,
    }
}

pub const fn quality_cost_factor(quality: QualityLevel) -> f64 {
    match quality {
        QualityLevel::Budget => 0.70,
        QualityLevel::MidRange => 1.00,
        QualityLevel::Luxury => 1.80,
    }
}

pub const fn size_factor(size: RoomSize) -> f64 {
    match size {
        RoomSize::Small => 0.90,
        RoomSize::Medium => 1.00,
        RoomSize::Large => 1.15,
        RoomSize::ExtraLarge => 1.30,
    }
}

pub const fn regional_factors(region: Region) -> RegionalFactors {
    let (cost, labor) = match region {
        Region::MajorCity => (1.35, 1.40),
        Region::Suburban => (1.00, 1.00),
        Region::Rural => (0.85, 0.80),
    };
    RegionalFactors {
        cost_multiplier: cost,
        labor_multiplier: labor,
    }
}

/// Share of the investment expected to come back as property value
pub const fn roi_factor(room: RoomType, quality: QualityLevel) -> f64 {
    // budget, mid-range, luxury
    let row: [f64; 3] = match room {
        RoomType::Kitchen => [0.70, 0.75, 0.85],
        RoomType::Bathroom => [0.65, 0.70, 0.80],
        RoomType::LivingRoom => [0.55, DEFAULT_ROI_FACTOR, 0.65],
        RoomType::Bedroom => [0.50, 0.55, 0.60],
        RoomType::DiningRoom => [0.50, 0.55, 0.60],
        RoomType::HomeOffice => [0.55, 0.62, 0.68],
        RoomType::Basement => [0.60, 0.70, 0.75],
        RoomType::Attic => [0.55, 0.65, 0.70],
    };
    match quality {
        QualityLevel::Budget => row[0],
        QualityLevel::MidRange => row[1],
        QualityLevel::Luxury => row[2],
    }
}

pub const fn market_benchmark(room: RoomType) -> Benchmark {
    let (roi, cost, months) = match room {
        RoomType::Kitchen => (75.0, 35_000.0, 3),
        RoomType::Bathroom => (70.0, 20_000.0, 2),
        RoomType::LivingRoom => (60.0, 15_000.0, 2),
        RoomType::Bedroom => (55.0, 10_000.0, 1),
        RoomType::DiningRoom => (55.0, 12_000.0, 1),
        RoomType::HomeOffice => (62.0, 12_000.0, 1),
        RoomType::Basement => (70.0, 30_000.0, 3),
        RoomType::Attic => (65.0, 28_000.0, 3),
    };
    Benchmark { roi, cost, months }
}
