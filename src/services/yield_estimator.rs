//! ============================================================
//!  Yield Estimation Engine
//!
//!  Pipeline (per location, per parameter set):
//!   1. Total area         – panel_count × panel_area
//!   2. Daily theoretical  – H_annual × A × η
//!   3. Annual theoretical – daily × 365
//!   4. Annual estimated   – annual theoretical × PR
//!   5. Monthly estimated  – H_month × A × η × 30.4375 × PR
//!
//!  30.4375 (= 365.25 / 12) is applied to every month alike. It is
//!  an average month, not a calendar count, so the 12 monthly figures
//!  do not add up exactly to the 365-day annual figure when the
//!  monthly and annual irradiation agree. That mismatch is kept.
//!
//!  Everything here is pure: no I/O, no logging, no mutation.
//! ============================================================

use crate::error::{EstimateError, InvalidParameterError, MissingDataError};
use crate::models::estimate::{EstimationResult, PartialEstimate, SystemParameters};
use crate::models::radiation::{Month, RadiationCell, RadiationRecord, ANNUAL_COLUMN};

pub const DAYS_PER_YEAR: f64 = 365.0;
/// Average month length used for every month.
pub const AVERAGE_DAYS_PER_MONTH: f64 = 30.4375;

fn require(record: &RadiationRecord, cell: RadiationCell, column: &'static str) -> Result<f64, MissingDataError> {
    cell.value().ok_or_else(|| MissingDataError {
        location: record.location.clone(),
        column,
    })
}

/// m²
pub fn total_area(params: &SystemParameters) -> f64 {
    params.panel_count as f64 * params.panel_area_m2
}

fn efficiency_factor(params: &SystemParameters) -> f64 {
    params.module_efficiency_pct / 100.0
}

/// Theoretical energy for one day of mean annual irradiation (kWh/day).
pub fn daily_theoretical_kwh(record: &RadiationRecord, params: &SystemParameters) -> Result<f64, MissingDataError> {
    let h = require(record, record.annual_radiation, ANNUAL_COLUMN)?;
    Ok(h * total_area(params) * efficiency_factor(params))
}

pub fn annual_theoretical_kwh(record: &RadiationRecord, params: &SystemParameters) -> Result<f64, MissingDataError> {
    Ok(daily_theoretical_kwh(record, params)? * DAYS_PER_YEAR)
}

pub fn annual_estimated_kwh(record: &RadiationRecord, params: &SystemParameters) -> Result<f64, MissingDataError> {
    Ok(annual_theoretical_kwh(record, params)? * params.performance_ratio)
}

pub fn monthly_estimated_kwh(
    record: &RadiationRecord,
    params: &SystemParameters,
    month: Month,
) -> Result<f64, MissingDataError> {
    let h = require(record, record.monthly(month), month.column())?;
    Ok(h * total_area(params) * efficiency_factor(params) * AVERAGE_DAYS_PER_MONTH * params.performance_ratio)
}

/// Every figure computed independently. Parameters are validated first; a missing
/// cell only fails the figures that depend on it.
pub fn estimate_partial(
    record: &RadiationRecord,
    params: &SystemParameters,
) -> Result<PartialEstimate, InvalidParameterError> {
    params.validate()?;

    let annual_estimated = annual_estimated_kwh(record, params);
    Ok(PartialEstimate {
        annual_radiation: require(record, record.annual_radiation, ANNUAL_COLUMN),
        total_area: total_area(params),
        annual_theoretical_kwh: annual_theoretical_kwh(record, params),
        monthly_average_kwh: annual_estimated.clone().map(|kwh| kwh / 12.0),
        annual_estimated_kwh: annual_estimated,
        monthly_estimated_kwh: Month::ALL.map(|m| monthly_estimated_kwh(record, params, m)),
    })
}

/// Complete estimate; fails if the parameters are invalid or any radiation cell of
/// the record is missing.
pub fn estimate(record: &RadiationRecord, params: &SystemParameters) -> Result<EstimationResult, EstimateError> {
    Ok(estimate_partial(record, params)?.complete()?)
}
