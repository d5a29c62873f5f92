//! Scenario tests for the ROI engine

use rstest::{fixture, rstest};
use roomcraft_backend::roi::{
    advisory, calculate_roi, estimate_roi, CalculationInput, QualityLevel, Region, RoomSize,
    RoomType,
};

#[fixture]
fn kitchen() -> CalculationInput {
    CalculationInput {
        room_type: RoomType::Kitchen,
        room_size: RoomSize::Medium,
        style: "transitional".to_string(),
        square_footage: 200.0,
        current_property_value: 500_000.0,
        region: Region::Suburban,
        quality_level: QualityLevel::MidRange,
        timeline: Some(12),
    }
}

#[rstest]
fn mid_range_kitchen(kitchen: CalculationInput) {
    let result = calculate_roi(&kitchen);

    // 150/sqft * 200 sqft * 1.3 complexity, labor scaled by 1.2
    assert_eq!(result.cost_breakdown.total, 41_730.0);
    assert_eq!(result.roi_metrics.roi_percentage, 75.0);
    assert_eq!(result.market_comparison.average_roi, 75.0);
    assert_eq!(result.market_comparison.confidence_level, 85);
}

#[rstest]
fn luxury_kitchen_costs_and_returns_more(kitchen: CalculationInput) {
    let mid = calculate_roi(&kitchen);
    let luxury = calculate_roi(&CalculationInput {
        quality_level: QualityLevel::Luxury,
        ..kitchen
    });

    assert!(luxury.cost_breakdown.total > mid.cost_breakdown.total);
    assert!(luxury.roi_metrics.roi_percentage > mid.roi_metrics.roi_percentage);
    assert_eq!(luxury.roi_metrics.roi_percentage, 85.0);
    assert!(luxury
        .recommendations
        .iter()
        .any(|r| r == advisory::LUXURY_ROI_WARNING));
}

#[rstest]
fn unknown_room_is_priced_as_living_room(kitchen: CalculationInput) {
    let unknown = calculate_roi(&CalculationInput {
        room_type: RoomType::parse("unknown_room_xyz"),
        ..kitchen.clone()
    });
    let living = calculate_roi(&CalculationInput {
        room_type: RoomType::LivingRoom,
        ..kitchen
    });

    assert_eq!(unknown.input, living.input);
    assert_eq!(unknown.cost_breakdown, living.cost_breakdown);
    assert_eq!(unknown.roi_metrics, living.roi_metrics);
    assert_eq!(unknown.market_comparison, living.market_comparison);
    assert_eq!(unknown.recommendations, living.recommendations);
    assert_eq!(unknown.risk_factors, living.risk_factors);
}

#[rstest]
fn doubling_property_value_shifts_projection(kitchen: CalculationInput) {
    let base = calculate_roi(&kitchen);
    let doubled = calculate_roi(&CalculationInput {
        current_property_value: 1_000_000.0,
        ..kitchen
    });

    let shift = doubled.roi_metrics.five_year_projection - base.roi_metrics.five_year_projection;
    assert!((shift - 500_000.0).abs() < 1e-6);
    assert_eq!(doubled.cost_breakdown, base.cost_breakdown);
    assert_eq!(doubled.roi_metrics.roi_percentage, base.roi_metrics.roi_percentage);
}

#[rstest]
#[case::kitchen_budget(RoomType::Kitchen, QualityLevel::Budget, 70.0)]
#[case::kitchen_mid(RoomType::Kitchen, QualityLevel::MidRange, 75.0)]
#[case::kitchen_luxury(RoomType::Kitchen, QualityLevel::Luxury, 85.0)]
#[case::bathroom_budget(RoomType::Bathroom, QualityLevel::Budget, 65.0)]
#[case::bathroom_mid(RoomType::Bathroom, QualityLevel::MidRange, 70.0)]
#[case::bathroom_luxury(RoomType::Bathroom, QualityLevel::Luxury, 80.0)]
#[case::living_budget(RoomType::LivingRoom, QualityLevel::Budget, 55.0)]
#[case::living_mid(RoomType::LivingRoom, QualityLevel::MidRange, 60.0)]
#[case::living_luxury(RoomType::LivingRoom, QualityLevel::Luxury, 65.0)]
#[case::bedroom_budget(RoomType::Bedroom, QualityLevel::Budget, 50.0)]
#[case::bedroom_mid(RoomType::Bedroom, QualityLevel::MidRange, 55.0)]
#[case::bedroom_luxury(RoomType::Bedroom, QualityLevel::Luxury, 60.0)]
#[case::dining_budget(RoomType::DiningRoom, QualityLevel::Budget, 50.0)]
#[case::dining_mid(RoomType::DiningRoom, QualityLevel::MidRange, 55.0)]
#[case::dining_luxury(RoomType::DiningRoom, QualityLevel::Luxury, 60.0)]
#[case::office_budget(RoomType::HomeOffice, QualityLevel::Budget, 55.0)]
#[case::office_mid(RoomType::HomeOffice, QualityLevel::MidRange, 62.0)]
#[case::office_luxury(RoomType::HomeOffice, QualityLevel::Luxury, 68.0)]
#[case::basement_budget(RoomType::Basement, QualityLevel::Budget, 60.0)]
#[case::basement_mid(RoomType::Basement, QualityLevel::MidRange, 70.0)]
#[case::basement_luxury(RoomType::Basement, QualityLevel::Luxury, 75.0)]
#[case::attic_budget(RoomType::Attic, QualityLevel::Budget, 55.0)]
#[case::attic_mid(RoomType::Attic, QualityLevel::MidRange, 65.0)]
#[case::attic_luxury(RoomType::Attic, QualityLevel::Luxury, 70.0)]
fn roi_percentage_matches_factor_table(
    #[case] room: RoomType,
    #[case] quality: QualityLevel,
    #[case] expected: f64,
) {
    let metrics = estimate_roi(25_000.0, 400_000.0, room, quality);
    assert_eq!(metrics.roi_percentage, expected);
}

#[rstest]
#[case::basement(RoomType::Basement, advisory::PERMIT_RISK)]
#[case::attic(RoomType::Attic, advisory::PERMIT_RISK)]
#[case::kitchen(RoomType::Kitchen, advisory::PLUMBING_RISK)]
#[case::bathroom(RoomType::Bathroom, advisory::PLUMBING_RISK)]
fn room_specific_risks(kitchen: CalculationInput, #[case] room: RoomType, #[case] risk: &str) {
    let result = calculate_roi(&CalculationInput {
        room_type: room,
        ..kitchen
    });
    assert!(result.risk_factors.iter().any(|r| r == risk));
}

#[rstest]
#[case::kitchen(RoomType::Kitchen, Some(advisory::KITCHEN_ADVICE))]
#[case::bathroom(RoomType::Bathroom, Some(advisory::BATHROOM_ADVICE))]
#[case::basement(RoomType::Basement, Some(advisory::BASEMENT_ADVICE))]
#[case::attic(RoomType::Attic, Some(advisory::ATTIC_ADVICE))]
#[case::bedroom(RoomType::Bedroom, None)]
fn room_specific_advice(
    kitchen: CalculationInput,
    #[case] room: RoomType,
    #[case] advice: Option<&str>,
) {
    let result = calculate_roi(&CalculationInput {
        room_type: room,
        ..kitchen
    });
    let room_advice = [
        advisory::KITCHEN_ADVICE,
        advisory::BATHROOM_ADVICE,
        advisory::BASEMENT_ADVICE,
        advisory::ATTIC_ADVICE,
    ];
    let found: Vec<&str> = result
        .recommendations
        .iter()
        .map(String::as_str)
        .filter(|r| room_advice.contains(r))
        .collect();

    assert_eq!(found, advice.into_iter().collect::<Vec<_>>());
}

#[rstest]
fn budget_finishes_carry_durability_risk(kitchen: CalculationInput) {
    let result = calculate_roi(&CalculationInput {
        quality_level: QualityLevel::Budget,
        ..kitchen
    });
    assert!(result
        .risk_factors
        .iter()
        .any(|r| r == advisory::DURABILITY_RISK));
}

#[rstest]
fn labor_heavy_rooms_have_thin_contingency(kitchen: CalculationInput) {
    // Kitchen labor multiplier pushes the total past 10x contingency
    let result = calculate_roi(&kitchen);
    assert!(result.cost_breakdown.contingency / result.cost_breakdown.total < 0.10);
    assert!(result
        .risk_factors
        .iter()
        .any(|r| r == advisory::LOW_CONTINGENCY_RISK));
}

#[rstest]
fn expensive_city_project_exceeds_market_cost(kitchen: CalculationInput) {
    let result = calculate_roi(&CalculationInput {
        region: Region::MajorCity,
        quality_level: QualityLevel::Luxury,
        ..kitchen
    });
    assert!(result
        .recommendations
        .iter()
        .any(|r| r == advisory::COST_ABOVE_MARKET));
    assert!(result
        .recommendations
        .iter()
        .any(|r| r == advisory::ROI_ABOVE_MARKET));
}

#[rstest]
fn result_serializes_with_camel_case_keys(kitchen: CalculationInput) {
    let json = serde_json::to_value(calculate_roi(&kitchen)).unwrap();

    assert_eq!(json["input"]["roomType"], "kitchen");
    assert_eq!(json["input"]["qualityLevel"], "mid-range");
    assert_eq!(json["costBreakdown"]["total"], 41_730.0);
    assert_eq!(json["roiMetrics"]["paybackTimelineMonths"], 1_600);
    assert_eq!(json["marketComparison"]["averageROI"], 75.0);
    assert!(json["riskFactors"].is_array());
    assert!(json["createdAt"].is_string());
}
