use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::InvalidParameterError;
use crate::models::estimate::{PartialEstimate, SystemParameters};
use crate::models::radiation::{Month, RadiationRecord};

// ─── Locations & radiation ───────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct LocationsResponse {
    pub source: String,
    pub count: usize,
    pub locations: Vec<String>,
}

/// One month of a 12-month breakdown. `value` is null when the radiation cell
/// behind it is missing.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MonthlyValue {
    pub month: Month,
    pub label: String,
    pub value: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RadiationResponse {
    pub location: String,
    /// Mean daily irradiation (kWh/m²/day)
    pub annual_radiation_kwh_m2_day: Option<f64>,
    /// Mean daily irradiation per month (kWh/m²/day)
    pub monthly: Vec<MonthlyValue>,
    /// Dataset columns that could not be parsed for this location
    pub missing: Vec<String>,
}

impl From<&RadiationRecord> for RadiationResponse {
    fn from(record: &RadiationRecord) -> Self {
        Self {
            location: record.location.clone(),
            annual_radiation_kwh_m2_day: record.annual_radiation.value(),
            monthly: Month::ALL
                .iter()
                .map(|&m| MonthlyValue {
                    month: m,
                    label: m.label().to_string(),
                    value: record.monthly(m).value(),
                })
                .collect(),
            missing: record.missing_columns().into_iter().map(String::from).collect(),
        }
    }
}

// ─── Estimation ──────────────────────────────────────────────────────────────

/// Omitted parameters take the service defaults. `panel_count` is signed so a
/// negative count is reported as an out-of-range parameter.
#[derive(Debug, Deserialize, ToSchema)]
pub struct EstimateRequest {
    pub location: String,
    pub panel_count: Option<i64>,
    pub panel_area_m2: Option<f64>,
    pub module_efficiency_pct: Option<f64>,
    pub performance_ratio: Option<f64>,
}

impl EstimateRequest {
    /// Merges the request with `defaults` and validates the result.
    pub fn parameters(&self, defaults: &SystemParameters) -> Result<SystemParameters, InvalidParameterError> {
        let panel_count = match self.panel_count {
            Some(n) => u32::try_from(n).map_err(|_| InvalidParameterError::PanelCount(n))?,
            None => defaults.panel_count,
        };
        let params = SystemParameters {
            panel_count,
            panel_area_m2: self.panel_area_m2.unwrap_or(defaults.panel_area_m2),
            module_efficiency_pct: self.module_efficiency_pct.unwrap_or(defaults.module_efficiency_pct),
            performance_ratio: self.performance_ratio.unwrap_or(defaults.performance_ratio),
        };
        params.validate()?;
        Ok(params)
    }
}

/// Estimate for display. Figures that depend on a missing radiation cell are
/// null and their column is listed in `missing`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EstimateResponse {
    pub location: String,
    pub generated_at: DateTime<Utc>,
    pub parameters: SystemParameters,
    pub annual_radiation_kwh_m2_day: Option<f64>,
    pub total_area_m2: f64,
    pub annual_theoretical_kwh: Option<f64>,
    pub annual_estimated_kwh: Option<f64>,
    pub monthly_average_kwh: Option<f64>,
    pub monthly_estimated_kwh: Vec<MonthlyValue>,
    pub missing: Vec<String>,
}

impl EstimateResponse {
    pub fn new(location: &str, parameters: SystemParameters, estimate: PartialEstimate) -> Self {
        let mut missing: Vec<String> = Vec::new();
        let mut note = |r: &Result<f64, crate::error::MissingDataError>| match r {
            Ok(v) => Some(*v),
            Err(e) => {
                if !missing.iter().any(|c| c == e.column) {
                    missing.push(e.column.to_string());
                }
                None
            }
        };

        let annual_radiation_kwh_m2_day = note(&estimate.annual_radiation);
        let annual_theoretical_kwh = note(&estimate.annual_theoretical_kwh);
        let annual_estimated_kwh = note(&estimate.annual_estimated_kwh);
        let monthly_average_kwh = note(&estimate.monthly_average_kwh);
        let monthly_estimated_kwh = Month::ALL
            .iter()
            .zip(estimate.monthly_estimated_kwh.iter())
            .map(|(&m, r)| MonthlyValue {
                month: m,
                label: m.label().to_string(),
                value: note(r),
            })
            .collect();

        Self {
            location: location.to_string(),
            generated_at: Utc::now(),
            parameters,
            annual_radiation_kwh_m2_day,
            total_area_m2: estimate.total_area,
            annual_theoretical_kwh,
            annual_estimated_kwh,
            monthly_average_kwh,
            monthly_estimated_kwh,
            missing,
        }
    }
}

// ─── Dataset ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct DatasetInfo {
    pub source: String,
    pub rows: usize,
    pub locations: usize,
    pub missing_cells: usize,
    pub loaded_at: DateTime<Utc>,
}
