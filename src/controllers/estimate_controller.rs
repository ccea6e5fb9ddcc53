use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use solar_yield_estimator::models::api::{
    DatasetInfo, EstimateRequest, EstimateResponse, LocationsResponse, RadiationResponse,
};
use solar_yield_estimator::models::estimate::SystemParameters;
use solar_yield_estimator::services::yield_estimator;

use crate::controllers::api_error::{ApiError, ApiJson};
use crate::shared_state::AppState;

/// GET /api/locations
/// List every municipality in the radiation dataset
///
/// Locations are returned in dataset order. A name that appears on several rows is
/// listed once.
#[utoipa::path(
    get,
    path = "/api/locations",
    responses(
        (status = 200, description = "Locations in dataset order", body = LocationsResponse),
        (status = 503, description = "Radiation dataset missing or unreadable")
    )
)]
pub async fn list_locations(State(state): State<AppState>) -> Result<Json<LocationsResponse>, ApiError> {
    let table = state.table().await?;
    let locations = table.locations();
    Ok(Json(LocationsResponse {
        source: state.source_name(),
        count: locations.len(),
        locations,
    }))
}

/// GET /api/locations/{name}/radiation
/// Radiation record for one municipality
///
/// Annual and monthly mean daily irradiation in kWh/m²/day. Cells that could not be
/// parsed are null. With duplicate names the first row of the dataset is returned.
#[utoipa::path(
    get,
    path = "/api/locations/{name}/radiation",
    params(
        ("name" = String, Path, description = "Municipality name, exact match")
    ),
    responses(
        (status = 200, description = "Radiation record", body = RadiationResponse),
        (status = 404, description = "Location not found"),
        (status = 503, description = "Radiation dataset missing or unreadable")
    )
)]
pub async fn get_location_radiation(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<RadiationResponse>, ApiError> {
    let table = state.table().await?;
    let record = table
        .record_for(&name)
        .ok_or_else(|| ApiError::LocationNotFound(name.clone()))?;
    Ok(Json(RadiationResponse::from(record)))
}

/// POST /api/estimate
/// Estimate annual and monthly generation
///
/// Parameters left out of the body take the configured defaults. Figures that depend
/// on a missing radiation cell are null and the cell is listed in `missing`.
#[utoipa::path(
    post,
    path = "/api/estimate",
    request_body = EstimateRequest,
    responses(
        (status = 200, description = "Yield estimate", body = EstimateResponse),
        (status = 400, description = "Parameter out of range or malformed body"),
        (status = 404, description = "Location not found"),
        (status = 503, description = "Radiation dataset missing or unreadable")
    )
)]
pub async fn estimate_yield(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<EstimateRequest>,
) -> Result<Json<EstimateResponse>, ApiError> {
    let params = req.parameters(&state.defaults)?;

    let table = state.table().await?;
    let record = table
        .record_for(&req.location)
        .ok_or_else(|| ApiError::LocationNotFound(req.location.clone()))?;

    let partial = yield_estimator::estimate_partial(record, &params)?;
    Ok(Json(EstimateResponse::new(&record.location, params, partial)))
}

/// GET /api/defaults
/// Default system parameters
#[utoipa::path(
    get,
    path = "/api/defaults",
    responses(
        (status = 200, description = "Parameters applied when a request omits them", body = SystemParameters)
    )
)]
pub async fn get_defaults(State(state): State<AppState>) -> Json<SystemParameters> {
    Json(state.defaults)
}

/// POST /api/dataset/reload
/// Drop the cached radiation table and read the source again
#[utoipa::path(
    post,
    path = "/api/dataset/reload",
    responses(
        (status = 200, description = "Dataset reloaded", body = DatasetInfo),
        (status = 503, description = "Radiation dataset missing or unreadable")
    )
)]
pub async fn reload_dataset(State(state): State<AppState>) -> Result<Json<DatasetInfo>, ApiError> {
    let table = state.reload().await?;
    Ok(Json(DatasetInfo {
        source: state.source_name(),
        rows: table.len(),
        locations: table.locations().len(),
        missing_cells: table.missing_cells(),
        loaded_at: Utc::now(),
    }))
}
