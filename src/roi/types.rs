//! Input and output records of the ROI engine
//!
//! Categorical inputs are closed enums. Parsing never fails: unrecognized
//! text maps to the category's default so a bad value from a form or an old
//! persisted record still yields a best-effort estimate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Normalizes a categorical label: lowercase, with `-`, `_` and spaces folded to `_`.
fn normalize(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c })
        .collect()
}

/// Implements string (de)serialization through `parse`/`as_str`
macro_rules! string_enum_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                Ok(Self::parse(&raw))
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Room being renovated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoomType {
    Kitchen,
    Bathroom,
    #[default]
    LivingRoom,
    Bedroom,
    DiningRoom,
    HomeOffice,
    Basement,
    Attic,
}

impl RoomType {
    pub const ALL: [RoomType; 8] = [
        Self::Kitchen,
        Self::Bathroom,
        Self::LivingRoom,
        Self::Bedroom,
        Self::DiningRoom,
        Self::HomeOffice,
        Self::Basement,
        Self::Attic,
    ];

    /// Parse a room label, falling back to `living_room`.
    pub fn parse(s: &str) -> Self {
        match normalize(s).as_str() {
            "kitchen" => Self::Kitchen,
            "bathroom" => Self::Bathroom,
            "living_room" => Self::LivingRoom,
            "bedroom" => Self::Bedroom,
            "dining_room" => Self::DiningRoom,
            "home_office" | "office" => Self::HomeOffice,
            "basement" => Self::Basement,
            "attic" => Self::Attic,
            _ => Self::default(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kitchen => "kitchen",
            Self::Bathroom => "bathroom",
            Self::LivingRoom => "living_room",
            Self::Bedroom => "bedroom",
            Self::DiningRoom => "dining_room",
            Self::HomeOffice => "home_office",
            Self::Basement => "basement",
            Self::Attic => "attic",
        }
    }

    /// Human-readable name used in advisory text
    pub fn label(&self) -> &'static str {
        match self {
            Self::Kitchen => "Kitchen",
            Self::Bathroom => "Bathroom",
            Self::LivingRoom => "Living Room",
            Self::Bedroom => "Bedroom",
            Self::DiningRoom => "Dining Room",
            Self::HomeOffice => "Home Office",
            Self::Basement => "Basement",
            Self::Attic => "Attic",
        }
    }
}

string_enum_serde!(RoomType);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoomSize {
    Small,
    #[default]
    Medium,
    Large,
    ExtraLarge,
}

impl RoomSize {
    pub const ALL: [RoomSize; 4] = [Self::Small, Self::Medium, Self::Large, Self::ExtraLarge];

    /// Parse a size label, falling back to `medium`.
    pub fn parse(s: &str) -> Self {
        match normalize(s).as_str() {
            "small" => Self::Small,
            "medium" => Self::Medium,
            "large" => Self::Large,
            "extra_large" => Self::ExtraLarge,
            _ => Self::default(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::ExtraLarge => "extra_large",
        }
    }
}

string_enum_serde!(RoomSize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Region {
    MajorCity,
    #[default]
    Suburban,
    Rural,
}

impl Region {
    pub const ALL: [Region; 3] = [Self::MajorCity, Self::Suburban, Self::Rural];

    /// Parse a region label, falling back to `suburban`.
    pub fn parse(s: &str) -> Self {
        match normalize(s).as_str() {
            "major_city" => Self::MajorCity,
            "suburban" => Self::Suburban,
            "rural" => Self::Rural,
            _ => Self::default(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MajorCity => "major_city",
            Self::Suburban => "suburban",
            Self::Rural => "rural",
        }
    }
}

string_enum_serde!(Region);

/// Finish quality tier; drives both the cost multiplier and the ROI factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QualityLevel {
    Budget,
    #[default]
    MidRange,
    Luxury,
}

impl QualityLevel {
    pub const ALL: [QualityLevel; 3] = [Self::Budget, Self::MidRange, Self::Luxury];

    /// Parse a quality label, falling back to `mid-range`.
    pub fn parse(s: &str) -> Self {
        match normalize(s).as_str() {
            "budget" => Self::Budget,
            "mid_range" => Self::MidRange,
            "luxury" => Self::Luxury,
            _ => Self::default(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::MidRange => "mid-range",
            Self::Luxury => "luxury",
        }
    }
}

string_enum_serde!(QualityLevel);

/// A single-room calculation request.
///
/// `square_footage` and `current_property_value` must be positive for a
/// meaningful result; the engine does not check this, the caller does.
/// Missing categorical fields take the same defaults as unknown labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    #[serde(default)]
    pub room_type: RoomType,
    #[serde(default)]
    pub room_size: RoomSize,
    /// Display-only; pricing uses `quality_level`
    #[serde(default)]
    pub style: String,
    pub square_footage: f64,
    pub current_property_value: f64,
    #[serde(default)]
    pub region: Region,
    #[serde(default)]
    pub quality_level: QualityLevel,
    /// Requested duration; informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<u32>,
}

/// Cost split into fixed categories.
///
/// Each category is rounded on its own, while `total` is the unrounded sum
/// rounded once, so `category_sum()` can differ from `total` by a few units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub materials: f64,
    pub labor: f64,
    pub permits: f64,
    pub overhead: f64,
    pub contingency: f64,
    pub total: f64,
}

impl CostBreakdown {
    /// Sum of the independently rounded categories
    pub fn category_sum(&self) -> f64 {
        self.materials + self.labor + self.permits + self.overhead + self.contingency
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiMetrics {
    pub total_investment: f64,
    pub estimated_value_increase: f64,
    pub roi_percentage: f64,
    pub payback_timeline_months: u32,
    pub annual_return: f64,
    pub five_year_projection: f64,
}

/// Industry benchmark for a room type in a region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketComparison {
    #[serde(rename = "averageROI")]
    pub average_roi: f64,
    pub average_cost: f64,
    pub average_timeframe: u32,
    pub confidence_level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub input: CalculationInput,
    pub cost_breakdown: CostBreakdown,
    pub roi_metrics: RoiMetrics,
    pub market_comparison: MarketComparison,
    pub recommendations: Vec<String>,
    pub risk_factors: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// One room of a multi-room request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomInput {
    #[serde(flatten)]
    pub input: CalculationInput,
    /// Accepted and echoed; no aggregation uses it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedMetrics {
    pub total_cost: f64,
    pub total_value_increase: f64,
    #[serde(rename = "totalROI")]
    pub total_roi: f64,
    /// Cost-weighted average payback in months
    pub weighted_payback: u32,
    /// Negative when the plan exceeds the budget
    pub budget_remaining: f64,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiRoomResult {
    pub individual: Vec<CalculationResult>,
    pub combined: CombinedMetrics,
}
