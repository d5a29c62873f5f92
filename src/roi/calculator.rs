//! Single-room and multi-room calculation entry points

use chrono::Utc;

use super::advisory::{generate_recommendations, generate_risk_factors};
use super::cost::calculate_renovation_cost;
use super::market::get_market_comparison;
use super::returns::{estimate_roi, round2};
use super::types::{CalculationInput, CalculationResult, CombinedMetrics, MultiRoomResult, RoomInput};

/// Run every model for one room and assemble the result.
pub fn calculate_roi(input: &CalculationInput) -> CalculationResult {
    let cost_breakdown = calculate_renovation_cost(
        input.room_type,
        input.room_size,
        &input.style,
        input.square_footage,
        input.region,
        input.quality_level,
    );

    let roi_metrics = estimate_roi(
        cost_breakdown.total,
        input.current_property_value,
        input.room_type,
        input.quality_level,
    );

    let market_comparison = get_market_comparison(input.room_type, input.region);

    let recommendations =
        generate_recommendations(input, &cost_breakdown, &roi_metrics, &market_comparison);
    let risk_factors = generate_risk_factors(input, &cost_breakdown);

    tracing::debug!(
        room_type = %input.room_type,
        quality_level = %input.quality_level,
        total_cost = cost_breakdown.total,
        roi_percentage = roi_metrics.roi_percentage,
        "ROI calculated"
    );

    CalculationResult {
        input: input.clone(),
        cost_breakdown,
        roi_metrics,
        market_comparison,
        recommendations,
        risk_factors,
        created_at: Utc::now(),
    }
}

/// Calculate each room on its own, then aggregate cost-weighted figures.
///
/// `priority` on the rooms is carried through but does not influence the
/// aggregation.
pub fn calculate_multi_room_roi(rooms: &[RoomInput], total_budget: f64) -> MultiRoomResult {
    let individual: Vec<CalculationResult> =
        rooms.iter().map(|room| calculate_roi(&room.input)).collect();

    let total_cost: f64 = individual.iter().map(|r| r.cost_breakdown.total).sum();
    let total_value_increase: f64 = individual
        .iter()
        .map(|r| r.roi_metrics.estimated_value_increase)
        .sum();

    let (total_roi, weighted_payback) = if total_cost > 0.0 {
        let roi = round2(total_value_increase / total_cost * 100.0);
        let payback: f64 = individual
            .iter()
            .map(|r| {
                f64::from(r.roi_metrics.payback_timeline_months) * r.cost_breakdown.total
                    / total_cost
            })
            .sum();
        (roi, payback.round() as u32)
    } else {
        (0.0, 0)
    };

    let budget_remaining = total_budget - total_cost;
    let recommendations =
        combined_recommendations(&individual, total_roi, total_cost, total_budget);

    if total_cost > total_budget {
        tracing::info!(
            rooms = individual.len(),
            total_cost,
            total_budget,
            "Multi-room plan exceeds budget"
        );
    }

    MultiRoomResult {
        individual,
        combined: CombinedMetrics {
            total_cost,
            total_value_increase,
            total_roi,
            weighted_payback,
            budget_remaining,
            recommendations,
        },
    }
}

fn combined_recommendations(
    individual: &[CalculationResult],
    total_roi: f64,
    total_cost: f64,
    total_budget: f64,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if individual.is_empty() {
        return recommendations;
    }

    recommendations.push(format!(
        "Renovating {} rooms together gives a combined ROI of {:.1}% on ${:.0}.",
        individual.len(),
        total_roi,
        total_cost
    ));

    // First room wins ties
    let best = individual.iter().fold(None::<&CalculationResult>, |best, r| match best {
        Some(b) if b.roi_metrics.roi_percentage >= r.roi_metrics.roi_percentage => Some(b),
        _ => Some(r),
    });
    if let Some(best) = best {
        recommendations.push(format!(
            "{} offers the highest return at {:.1}% ROI - start there.",
            best.input.room_type.label(),
            best.roi_metrics.roi_percentage
        ));
    }

    if total_cost > total_budget {
        recommendations.push(format!(
            "Total cost exceeds your budget by ${:.0} - consider phasing the renovation over time, beginning with the highest-return rooms.",
            total_cost - total_budget
        ));
    } else {
        recommendations.push(format!(
            "The plan fits your budget with ${:.0} left over to strengthen the contingency reserve.",
            total_budget - total_cost
        ));
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roi::advisory::{KITCHEN_ADVICE, LONG_PAYBACK, PLUMBING_RISK};
    use crate::roi::types::{QualityLevel, Region, RoomSize, RoomType};

    fn room(room_type: RoomType, square_footage: f64) -> RoomInput {
        RoomInput {
            input: CalculationInput {
                room_type,
                room_size: RoomSize::Medium,
                style: "modern".to_string(),
                square_footage,
                current_property_value: 500_000.0,
                region: Region::Suburban,
                quality_level: QualityLevel::MidRange,
                timeline: Some(8),
            },
            priority: None,
        }
    }

    #[test]
    fn single_room_composes_all_models() {
        let input = room(RoomType::Kitchen, 200.0).input;
        let result = calculate_roi(&input);

        assert_eq!(result.input, input);
        assert_eq!(result.cost_breakdown.total, 41_730.0);
        assert_eq!(result.roi_metrics.total_investment, 41_730.0);
        assert_eq!(result.roi_metrics.roi_percentage, 75.0);
        assert_eq!(result.market_comparison.average_cost, 35_000.0);
        assert_eq!(result.recommendations, vec![LONG_PAYBACK, KITCHEN_ADVICE]);
        assert!(result.risk_factors.iter().any(|r| r == PLUMBING_RISK));
    }

    #[test]
    fn combined_cost_is_the_sum_of_rooms() {
        let rooms = vec![room(RoomType::Kitchen, 200.0), room(RoomType::LivingRoom, 200.0)];
        let result = calculate_multi_room_roi(&rooms, 100_000.0);

        assert_eq!(result.individual.len(), 2);
        // 41,730 kitchen + 12,000 living room
        assert_eq!(result.combined.total_cost, 53_730.0);
        assert_eq!(result.combined.budget_remaining, 46_270.0);

        let value = 41_730.0 * 0.75 + 12_000.0 * 0.60;
        assert!((result.combined.total_value_increase - value).abs() < 1e-6);
        assert_eq!(result.combined.total_roi, round2(value / 53_730.0 * 100.0));
    }

    #[test]
    fn payback_is_weighted_by_cost() {
        let rooms = vec![room(RoomType::Kitchen, 200.0), room(RoomType::LivingRoom, 200.0)];
        let result = calculate_multi_room_roi(&rooms, 100_000.0);

        // 1,600 months for the kitchen, 2,000 for the living room
        let expected: f64 = (1_600.0 * 41_730.0 + 2_000.0 * 12_000.0) / 53_730.0;
        assert_eq!(result.combined.weighted_payback, expected.round() as u32);
    }

    #[test]
    fn over_budget_suggests_phasing() {
        let rooms = vec![room(RoomType::Kitchen, 200.0), room(RoomType::Bathroom, 80.0)];
        let result = calculate_multi_room_roi(&rooms, 20_000.0);

        assert!(result.combined.budget_remaining < 0.0);
        assert!(result
            .combined
            .recommendations
            .iter()
            .any(|r| r.contains("phasing")));
    }

    #[test]
    fn highest_return_room_is_named() {
        let rooms = vec![room(RoomType::Bedroom, 150.0), room(RoomType::Kitchen, 150.0)];
        let result = calculate_multi_room_roi(&rooms, 1_000_000.0);

        assert!(result.combined.recommendations[1].starts_with("Kitchen offers"));
        assert!(!result
            .combined
            .recommendations
            .iter()
            .any(|r| r.contains("phasing")));
    }

    #[test]
    fn empty_plan_has_zero_metrics() {
        let result = calculate_multi_room_roi(&[], 10_000.0);

        assert!(result.individual.is_empty());
        assert_eq!(result.combined.total_cost, 0.0);
        assert_eq!(result.combined.total_roi, 0.0);
        assert_eq!(result.combined.weighted_payback, 0);
        assert!(result.combined.recommendations.is_empty());
    }
}
