pub mod api_error;
pub mod estimate_controller;
