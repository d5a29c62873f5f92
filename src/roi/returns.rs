//! Return-on-investment model

use super::tables::roi_factor;
use super::types::{QualityLevel, RoiMetrics, RoomType};

/// Yield used to treat the added value as rent-equivalent income
const ANNUAL_YIELD: f64 = 0.01;

/// Yearly appreciation applied to the added value in the projection
const ANNUAL_APPRECIATION: f64 = 0.03;

const PROJECTION_YEARS: f64 = 5.0;

/// Round to two decimal places, halves away from zero
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Estimate the value a renovation adds and how long it takes to pay back.
///
/// Payback treats the added value as if it yielded 1% a year in rent;
/// it is 0 when there is no added value to pay it back with.
pub fn estimate_roi(
    total_investment: f64,
    current_property_value: f64,
    room_type: RoomType,
    quality_level: QualityLevel,
) -> RoiMetrics {
    let factor = roi_factor(room_type, quality_level);
    let estimated_value_increase = total_investment * factor;

    let roi_percentage = if total_investment != 0.0 {
        round2(estimated_value_increase / total_investment * 100.0)
    } else {
        0.0
    };

    let monthly_rent_increase = estimated_value_increase * ANNUAL_YIELD / 12.0;
    let payback_timeline_months = if monthly_rent_increase > 0.0 {
        (total_investment / monthly_rent_increase).round() as u32
    } else {
        0
    };

    let annual_return = estimated_value_increase * ANNUAL_YIELD;
    let five_year_projection = current_property_value
        + estimated_value_increase
        + estimated_value_increase * ANNUAL_APPRECIATION * PROJECTION_YEARS;

    RoiMetrics {
        total_investment,
        estimated_value_increase,
        roi_percentage,
        payback_timeline_months,
        annual_return,
        five_year_projection,
    }
}
