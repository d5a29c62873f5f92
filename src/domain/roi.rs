//! ROI request/response DTOs
//!
//! Numeric preconditions of the engine are checked here, at the HTTP
//! boundary, so the calculation functions stay total.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::roi::{CalculationInput, QualityLevel, RoomInput, RoomType};

pub const MAX_ROOMS_PER_REQUEST: usize = 20;
pub const MAX_DESIGN_ID_LEN: usize = 128;

/// Largest accepted room area; keeps every estimate well inside `NUMERIC(14, 2)`
pub const MAX_SQUARE_FOOTAGE: f64 = 100_000.0;

/// Largest accepted property value or plan budget
pub const MAX_MONEY_AMOUNT: f64 = 1_000_000_000.0;

/// Body of `POST`/`PUT /api/roi/calculate`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRoiRequest {
    #[serde(flatten)]
    pub input: CalculationInput,
    /// Persist the result under this design when present
    #[serde(default)]
    pub design_id: Option<String>,
}

impl CalculateRoiRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_input(&self.input)?;
        if let Some(design_id) = &self.design_id {
            validate_design_id(design_id)?;
        }
        Ok(())
    }

    /// Design ID for requests that must target a stored calculation
    pub fn require_design_id(&self) -> Result<&str, ApiError> {
        self.design_id
            .as_deref()
            .map(str::trim)
            .ok_or_else(|| ApiError::bad_request("designId is required"))
    }
}

/// Body of `POST /api/roi/calculate/multi-room`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiRoomRequest {
    pub rooms: Vec<RoomInput>,
    pub total_budget: f64,
}

impl MultiRoomRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.rooms.is_empty() {
            return Err(ApiError::bad_request("At least one room is required"));
        }
        if self.rooms.len() > MAX_ROOMS_PER_REQUEST {
            return Err(ApiError::bad_request(format!(
                "At most {} rooms can be calculated at once",
                MAX_ROOMS_PER_REQUEST
            )));
        }
        if !self.total_budget.is_finite() || self.total_budget < 0.0 {
            return Err(ApiError::bad_request(
                "totalBudget must be a non-negative number",
            ));
        }
        if self.total_budget > MAX_MONEY_AMOUNT {
            return Err(ApiError::bad_request(format!(
                "totalBudget must be at most {}",
                MAX_MONEY_AMOUNT
            )));
        }
        for (index, room) in self.rooms.iter().enumerate() {
            validate_input(&room.input)
                .map_err(|e| ApiError::bad_request(format!("rooms[{}]: {}", index, message(&e))))?;
        }
        Ok(())
    }
}

/// Query of `GET /api/roi/calculate`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiLookupQuery {
    pub design_id: String,
}

/// One entry of the calculation history
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiCalculationSummary {
    pub id: Uuid,
    pub design_id: String,
    pub room_type: RoomType,
    pub quality_level: QualityLevel,
    pub estimated_cost: f64,
    pub roi_percentage: f64,
    pub payback_timeline: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stored form of a payback period, e.g. `"18 months"`
pub fn payback_label(months: u32) -> String {
    format!("{} months", months)
}

pub fn validate_input(input: &CalculationInput) -> Result<(), ApiError> {
    check_positive("squareFootage", input.square_footage, MAX_SQUARE_FOOTAGE)?;
    check_positive(
        "currentPropertyValue",
        input.current_property_value,
        MAX_MONEY_AMOUNT,
    )
}

fn check_positive(field: &str, value: f64, max: f64) -> Result<(), ApiError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ApiError::bad_request(format!(
            "{} must be a positive number",
            field
        )));
    }
    if value > max {
        return Err(ApiError::bad_request(format!(
            "{} must be at most {}",
            field, max
        )));
    }
    Ok(())
}

fn validate_design_id(design_id: &str) -> Result<(), ApiError> {
    let trimmed = design_id.trim();
    if trimmed.is_empty() {
        return Err(ApiError::bad_request("designId must not be empty"));
    }
    if trimmed.len() > MAX_DESIGN_ID_LEN {
        return Err(ApiError::bad_request(format!(
            "designId must be at most {} characters",
            MAX_DESIGN_ID_LEN
        )));
    }
    Ok(())
}

fn message(err: &ApiError) -> String {
    match err {
        ApiError::BadRequest(msg) => msg.clone(),
        other => other.to_string(),
    }
}
