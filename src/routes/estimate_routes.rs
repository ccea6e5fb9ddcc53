use axum::{routing::{get, post}, Router};
use crate::controllers::estimate_controller::{
    // Dataset browsing
    list_locations, get_location_radiation,
    // Estimation
    estimate_yield, get_defaults,
    // Dataset maintenance
    reload_dataset,
};
use crate::shared_state::AppState;

/// Build the `/api/*` sub-router.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/locations",                  get(list_locations))
        .route("/locations/{name}/radiation", get(get_location_radiation))
        .route("/estimate",                   post(estimate_yield))
        .route("/defaults",                   get(get_defaults))
        .route("/dataset/reload",             post(reload_dataset))
        .with_state(state)
}
