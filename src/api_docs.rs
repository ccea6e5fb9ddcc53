use utoipa::OpenApi;
use crate::controllers::estimate_controller;
use solar_yield_estimator::models::{api, estimate, radiation};

#[derive(OpenApi)]
#[openapi(
    paths(
        estimate_controller::list_locations,
        estimate_controller::get_location_radiation,
        estimate_controller::estimate_yield,
        estimate_controller::get_defaults,
        estimate_controller::reload_dataset
    ),
    components(
        schemas(
            api::LocationsResponse,
            api::RadiationResponse,
            api::MonthlyValue,
            api::EstimateRequest,
            api::EstimateResponse,
            api::DatasetInfo,
            estimate::SystemParameters,
            radiation::Month
        )
    ),
    tags(
        (name = "solar-yield-estimator", description = "Photovoltaic yield estimation from municipal radiation data")
    )
)]
pub struct ApiDoc;
