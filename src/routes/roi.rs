//! ROI calculator routes
//!
//! Calculation itself is pure; these handlers validate input, run the
//! engine, and persist results per design.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::prelude::*;
use sqlx::types::Json as DbJson;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::{Created, Paginated, PaginationParams, Success};
use crate::app::AppState;
use crate::auth::RequireAuth;
use crate::domain::roi::{
    payback_label, CalculateRoiRequest, MultiRoomRequest, RoiCalculationSummary, RoiLookupQuery,
};
use crate::error::{ApiError, ApiResult};
use crate::middleware::RequestIdExt;
use crate::roi::{calculate_multi_room_roi, calculate_roi, CalculationResult};
use crate::services::cache::keys;

/// Database row for a stored calculation
#[derive(Debug, sqlx::FromRow)]
struct RoiCalculationRow {
    id: Uuid,
    design_id: String,
    estimated_cost: Decimal,
    roi_percentage: Decimal,
    payback_timeline: String,
    calculation_data: DbJson<CalculationResult>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<RoiCalculationRow> for RoiCalculationSummary {
    fn from(row: RoiCalculationRow) -> Self {
        let input = &row.calculation_data.0.input;
        Self {
            id: row.id,
            design_id: row.design_id,
            room_type: input.room_type,
            quality_level: input.quality_level,
            estimated_cost: row.estimated_cost.to_f64().unwrap_or_default(),
            roi_percentage: row.roi_percentage.to_f64().unwrap_or_default(),
            payback_timeline: row.payback_timeline,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Flattened columns stored next to the JSON document
struct PersistedFigures {
    estimated_cost: Decimal,
    roi_percentage: Decimal,
    payback_timeline: String,
}

impl PersistedFigures {
    fn from_result(result: &CalculationResult) -> ApiResult<Self> {
        let estimated_cost = Decimal::from_f64(result.cost_breakdown.total)
            .ok_or_else(|| ApiError::internal("Estimated cost is not representable"))?
            .round_dp(2);
        let roi_percentage = Decimal::from_f64(result.roi_metrics.roi_percentage)
            .ok_or_else(|| ApiError::internal("ROI percentage is not representable"))?
            .round_dp(2);

        Ok(Self {
            estimated_cost,
            roi_percentage,
            payback_timeline: payback_label(result.roi_metrics.payback_timeline_months),
        })
    }
}

const ROW_COLUMNS: &str = "id, design_id, estimated_cost, roi_percentage, payback_timeline, calculation_data, created_at, updated_at";

/// POST /api/roi/calculate
///
/// Calculate ROI for one room. With a `designId` the result is also stored
/// (replacing any earlier calculation for that design).
pub async fn calculate(
    auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<CalculateRoiRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(req) = payload?;
    req.validate()?;

    tracing::info!(
        user_id = %auth.user_id,
        request_id = ?headers.request_id(),
        design_id = ?req.design_id,
        room_type = %req.input.room_type,
        quality_level = %req.input.quality_level,
        "Calculating ROI"
    );

    let result = calculate_roi(&req.input);

    if let Some(design_id) = req.design_id.as_deref().map(str::trim) {
        let figures = PersistedFigures::from_result(&result)?;

        sqlx::query(
            r#"
            INSERT INTO roi_calculations (user_id, design_id, estimated_cost, roi_percentage, payback_timeline, calculation_data)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, design_id) DO UPDATE
            SET estimated_cost = EXCLUDED.estimated_cost,
                roi_percentage = EXCLUDED.roi_percentage,
                payback_timeline = EXCLUDED.payback_timeline,
                calculation_data = EXCLUDED.calculation_data,
                updated_at = NOW()
            "#,
        )
        .bind(auth.user_id)
        .bind(design_id)
        .bind(figures.estimated_cost)
        .bind(figures.roi_percentage)
        .bind(&figures.payback_timeline)
        .bind(DbJson(&result))
        .execute(&state.db)
        .await?;

        state
            .cache
            .replace_quietly(&keys::roi_calculation(auth.user_id, design_id), &result)
            .await;

        tracing::info!(user_id = %auth.user_id, design_id = %design_id, "ROI calculation saved");
        return Ok(Created(result).into_response());
    }

    Ok(Success::new(result).into_response())
}

/// GET /api/roi/calculate?designId=...
///
/// Fetch the stored calculation for a design.
pub async fn get_calculation(
    auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    query: Result<Query<RoiLookupQuery>, QueryRejection>,
) -> ApiResult<Success<CalculationResult>> {
    let Query(query) = query?;
    let design_id = query.design_id.trim();
    if design_id.is_empty() {
        return Err(ApiError::bad_request("designId is required"));
    }

    let cache_key = keys::roi_calculation(auth.user_id, design_id);
    if let Some(result) = state.cache.get::<CalculationResult>(&cache_key).await {
        return Ok(Success::new(result));
    }

    let row = sqlx::query_as::<_, RoiCalculationRow>(&format!(
        "SELECT {ROW_COLUMNS} FROM roi_calculations WHERE user_id = $1 AND design_id = $2"
    ))
    .bind(auth.user_id)
    .bind(design_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| ApiError::not_found("ROI calculation not found"))?;

    let result = row.calculation_data.0;
    state.cache.set_quietly(&cache_key, &result).await;

    Ok(Success::new(result))
}

/// PUT /api/roi/calculate
///
/// Recalculate and overwrite the stored calculation of an existing design.
pub async fn update_calculation(
    auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CalculateRoiRequest>, JsonRejection>,
) -> ApiResult<Success<CalculationResult>> {
    let Json(req) = payload?;
    req.validate()?;
    let design_id = req.require_design_id()?;

    tracing::info!(
        user_id = %auth.user_id,
        design_id = %design_id,
        room_type = %req.input.room_type,
        "Recalculating ROI"
    );

    let result = calculate_roi(&req.input);
    let figures = PersistedFigures::from_result(&result)?;

    let updated = sqlx::query(
        r#"
        UPDATE roi_calculations
        SET estimated_cost = $3,
            roi_percentage = $4,
            payback_timeline = $5,
            calculation_data = $6,
            updated_at = NOW()
        WHERE user_id = $1 AND design_id = $2
        "#,
    )
    .bind(auth.user_id)
    .bind(design_id)
    .bind(figures.estimated_cost)
    .bind(figures.roi_percentage)
    .bind(&figures.payback_timeline)
    .bind(DbJson(&result))
    .execute(&state.db)
    .await?;

    if updated.rows_affected() == 0 {
        return Err(ApiError::not_found("ROI calculation not found"));
    }

    state
        .cache
        .replace_quietly(&keys::roi_calculation(auth.user_id, design_id), &result)
        .await;

    Ok(Success::new(result))
}

/// POST /api/roi/calculate/multi-room
///
/// Calculate several rooms against one budget. Nothing is stored.
pub async fn calculate_multi_room(
    auth: RequireAuth,
    payload: Result<Json<MultiRoomRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(req) = payload?;
    req.validate()?;

    tracing::info!(
        user_id = %auth.user_id,
        rooms = req.rooms.len(),
        total_budget = req.total_budget,
        "Calculating multi-room ROI"
    );

    Ok(Success::new(calculate_multi_room_roi(
        &req.rooms,
        req.total_budget,
    )))
}

/// GET /api/roi/history
///
/// The caller's stored calculations, most recently updated first.
pub async fn list_history(
    auth: RequireAuth,
    State(state): State<Arc<AppState>>,
    pagination: Result<Query<PaginationParams>, QueryRejection>,
) -> ApiResult<Paginated<RoiCalculationSummary>> {
    let Query(pagination) = pagination?;

    tracing::debug!(
        user_id = %auth.user_id,
        page = pagination.page(),
        per_page = pagination.per_page(),
        "Listing ROI history"
    );

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM roi_calculations WHERE user_id = $1")
        .bind(auth.user_id)
        .fetch_one(&state.db)
        .await?;

    let rows = sqlx::query_as::<_, RoiCalculationRow>(&format!(
        "SELECT {ROW_COLUMNS} FROM roi_calculations WHERE user_id = $1 ORDER BY updated_at DESC LIMIT $2 OFFSET $3"
    ))
    .bind(auth.user_id)
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(&state.db)
    .await?;

    let data: Vec<RoiCalculationSummary> = rows.into_iter().map(Into::into).collect();
    Ok(Paginated::new(data, &pagination, total.max(0) as u64))
}
