//! Rule-based recommendations and risk factors
//!
//! Every rule is an independent predicate over the calculated figures. All
//! rules are evaluated; each one that holds appends its message, in the
//! order listed here.

use super::types::{
    CalculationInput, CostBreakdown, MarketComparison, QualityLevel, RoiMetrics, RoomType,
};

pub const ROI_ABOVE_MARKET: &str =
    "Projected ROI exceeds the market average for this room type - a strong investment opportunity.";
pub const ROI_BELOW_MARKET: &str =
    "Projected ROI is below the market average - focus on improvements with the highest resale impact.";
pub const COST_ABOVE_MARKET: &str =
    "Estimated cost is more than 20% above the market average - review the scope and collect several contractor quotes.";
pub const COST_BELOW_MARKET: &str =
    "Estimated cost is well below the market average - confirm that quotes cover the full scope of work.";
pub const LONG_PAYBACK: &str =
    "Payback period exceeds 5 years - treat this renovation as a long-term value play rather than a quick return.";
pub const KITCHEN_ADVICE: &str =
    "Kitchens have the strongest resale appeal - prioritize cabinetry, countertops and energy-efficient appliances.";
pub const BATHROOM_ADVICE: &str =
    "Modern fixtures, better lighting and good ventilation make bathroom updates a reliable return.";
pub const BASEMENT_ADVICE: &str =
    "A finished basement adds livable space - solve moisture and waterproofing issues before finishing work.";
pub const ATTIC_ADVICE: &str =
    "Attic conversions need insulation and headroom checks - confirm the space can legally count as livable area.";
pub const LUXURY_ROI_WARNING: &str =
    "Luxury finishes rarely recoup their full premium at resale - mix high-end focal pieces with mid-range materials.";

pub const LOW_CONTINGENCY_RISK: &str =
    "Contingency reserve is below 10% of the total budget - unexpected issues could push costs over budget.";
pub const PERMIT_RISK: &str =
    "Basement and attic conversions often require additional permits, egress upgrades and structural inspections.";
pub const PLUMBING_RISK: &str =
    "Plumbing and electrical work may uncover hidden problems such as outdated wiring or water damage.";
pub const DURABILITY_RISK: &str =
    "Budget-quality materials may wear faster and need earlier replacement.";

/// Cost above this multiple of the market average is flagged
const COST_HIGH_RATIO: f64 = 1.2;
const COST_LOW_RATIO: f64 = 0.8;
const LONG_PAYBACK_MONTHS: u32 = 60;
const MIN_CONTINGENCY_RATIO: f64 = 0.10;

pub fn generate_recommendations(
    input: &CalculationInput,
    cost: &CostBreakdown,
    roi: &RoiMetrics,
    market: &MarketComparison,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if roi.roi_percentage > market.average_roi {
        recommendations.push(ROI_ABOVE_MARKET.to_string());
    }
    if roi.roi_percentage < market.average_roi {
        recommendations.push(ROI_BELOW_MARKET.to_string());
    }
    if cost.total > market.average_cost * COST_HIGH_RATIO {
        recommendations.push(COST_ABOVE_MARKET.to_string());
    }
    if cost.total < market.average_cost * COST_LOW_RATIO {
        recommendations.push(COST_BELOW_MARKET.to_string());
    }
    if roi.payback_timeline_months > LONG_PAYBACK_MONTHS {
        recommendations.push(LONG_PAYBACK.to_string());
    }

    let room_advice = match input.room_type {
        RoomType::Kitchen => Some(KITCHEN_ADVICE),
        RoomType::Bathroom => Some(BATHROOM_ADVICE),
        RoomType::Basement => Some(BASEMENT_ADVICE),
        RoomType::Attic => Some(ATTIC_ADVICE),
        _ => None,
    };
    if let Some(advice) = room_advice {
        recommendations.push(advice.to_string());
    }

    if input.quality_level == QualityLevel::Luxury {
        recommendations.push(LUXURY_ROI_WARNING.to_string());
    }

    recommendations
}

pub fn generate_risk_factors(input: &CalculationInput, cost: &CostBreakdown) -> Vec<String> {
    let mut risks = Vec::new();

    if cost.total > 0.0 && cost.contingency / cost.total < MIN_CONTINGENCY_RATIO {
        risks.push(LOW_CONTINGENCY_RISK.to_string());
    }
    if matches!(input.room_type, RoomType::Basement | RoomType::Attic) {
        risks.push(PERMIT_RISK.to_string());
    }
    if matches!(input.room_type, RoomType::Kitchen | RoomType::Bathroom) {
        risks.push(PLUMBING_RISK.to_string());
    }
    if input.quality_level == QualityLevel::Budget {
        risks.push(DURABILITY_RISK.to_string());
    }

    risks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roi::types::{Region, RoomSize};

    fn input(room_type: RoomType, quality_level: QualityLevel) -> CalculationInput {
        CalculationInput {
            room_type,
            room_size: RoomSize::Medium,
            style: String::new(),
            square_footage: 200.0,
            current_property_value: 400_000.0,
            region: Region::Suburban,
            quality_level,
            timeline: None,
        }
    }

    fn cost(total: f64, contingency: f64) -> CostBreakdown {
        CostBreakdown {
            materials: 0.0,
            labor: 0.0,
            permits: 0.0,
            overhead: 0.0,
            contingency,
            total,
        }
    }

    fn roi(roi_percentage: f64, payback_timeline_months: u32) -> RoiMetrics {
        RoiMetrics {
            total_investment: 0.0,
            estimated_value_increase: 0.0,
            roi_percentage,
            payback_timeline_months,
            annual_return: 0.0,
            five_year_projection: 0.0,
        }
    }

    fn market(average_roi: f64, average_cost: f64) -> MarketComparison {
        MarketComparison {
            average_roi,
            average_cost,
            average_timeframe: 2,
            confidence_level: 85,
        }
    }

    #[test]
    fn quiet_when_everything_matches_the_market() {
        let recs = generate_recommendations(
            &input(RoomType::Bedroom, QualityLevel::MidRange),
            &cost(10_000.0, 1_000.0),
            &roi(55.0, 12),
            &market(55.0, 10_000.0),
        );
        assert!(recs.is_empty());
    }

    #[test]
    fn rules_fire_independently_in_order() {
        let recs = generate_recommendations(
            &input(RoomType::Kitchen, QualityLevel::Luxury),
            &cost(50_000.0, 5_000.0),
            &roi(85.0, 1_412),
            &market(75.0, 35_000.0),
        );
        assert_eq!(
            recs,
            vec![
                ROI_ABOVE_MARKET,
                COST_ABOVE_MARKET,
                LONG_PAYBACK,
                KITCHEN_ADVICE,
                LUXURY_ROI_WARNING
            ]
        );
    }

    #[test]
    fn cheap_low_return_project() {
        let recs = generate_recommendations(
            &input(RoomType::Attic, QualityLevel::Budget),
            &cost(5_000.0, 500.0),
            &roi(55.0, 60),
            &market(65.0, 28_000.0),
        );
        assert_eq!(recs, vec![ROI_BELOW_MARKET, COST_BELOW_MARKET, ATTIC_ADVICE]);
    }

    #[test]
    fn contingency_at_exactly_ten_percent_is_fine() {
        let risks = generate_risk_factors(
            &input(RoomType::LivingRoom, QualityLevel::MidRange),
            &cost(12_000.0, 1_200.0),
        );
        assert!(risks.is_empty());
    }

    #[test]
    fn kitchen_budget_risks() {
        let risks = generate_risk_factors(
            &input(RoomType::Kitchen, QualityLevel::Budget),
            &cost(29_211.0, 2_730.0),
        );
        assert_eq!(
            risks,
            vec![LOW_CONTINGENCY_RISK, PLUMBING_RISK, DURABILITY_RISK]
        );
    }

    #[test]
    fn basement_needs_permits() {
        let risks = generate_risk_factors(
            &input(RoomType::Basement, QualityLevel::Luxury),
            &cost(10_000.0, 1_000.0),
        );
        assert_eq!(risks, vec![PERMIT_RISK]);
    }

    #[test]
    fn zero_total_skips_contingency_ratio() {
        let risks = generate_risk_factors(
            &input(RoomType::Bedroom, QualityLevel::MidRange),
            &cost(0.0, 0.0),
        );
        assert!(risks.is_empty());
    }
}
