use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{InvalidParameterError, MissingDataError};

fn default_panel_count() -> u32 { 12 }
fn default_panel_area_m2() -> f64 { 1.74 }
fn default_module_efficiency_pct() -> f64 { 16.2 }
fn default_performance_ratio() -> f64 { 0.75 }

/// Array parameters supplied for one estimation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SystemParameters {
    #[serde(default = "default_panel_count")]
    pub panel_count: u32,
    /// Area of a single panel (m²)
    #[serde(default = "default_panel_area_m2")]
    pub panel_area_m2: f64,
    /// Module efficiency (%), in (0, 100]
    #[serde(default = "default_module_efficiency_pct")]
    pub module_efficiency_pct: f64,
    /// Performance ratio, in [0, 1]. Typical plants run between 0.70 and 0.85.
    #[serde(default = "default_performance_ratio")]
    pub performance_ratio: f64,
}

impl Default for SystemParameters {
    fn default() -> Self {
        Self {
            panel_count: default_panel_count(),
            panel_area_m2: default_panel_area_m2(),
            module_efficiency_pct: default_module_efficiency_pct(),
            performance_ratio: default_performance_ratio(),
        }
    }
}

impl SystemParameters {
    pub fn new(panel_count: u32, panel_area_m2: f64, module_efficiency_pct: f64, performance_ratio: f64) -> Self {
        Self { panel_count, panel_area_m2, module_efficiency_pct, performance_ratio }
    }

    /// Checks every field against its range. Values are never clamped.
    pub fn validate(&self) -> Result<(), InvalidParameterError> {
        if self.panel_count < 1 {
            return Err(InvalidParameterError::PanelCount(i64::from(self.panel_count)));
        }
        if !(self.panel_area_m2.is_finite() && self.panel_area_m2 > 0.0) {
            return Err(InvalidParameterError::PanelArea(self.panel_area_m2));
        }
        let eff = self.module_efficiency_pct;
        if !(eff.is_finite() && eff > 0.0 && eff <= 100.0) {
            return Err(InvalidParameterError::ModuleEfficiency(eff));
        }
        let pr = self.performance_ratio;
        if !(pr.is_finite() && (0.0..=1.0).contains(&pr)) {
            return Err(InvalidParameterError::PerformanceRatio(pr));
        }
        Ok(())
    }
}

/// Full yield estimate for one location and one parameter set.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimationResult {
    /// Mean daily irradiation used for the annual figures (kWh/m²/day)
    pub annual_radiation: f64,
    /// Total panel area (m²)
    pub total_area: f64,
    pub annual_theoretical_kwh: f64,
    pub annual_estimated_kwh: f64,
    /// annual_estimated_kwh / 12
    pub monthly_average_kwh: f64,
    /// January..December
    pub monthly_estimated_kwh: [f64; 12],
}

/// Per-figure estimate: each figure fails independently when its radiation cell
/// is missing.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialEstimate {
    pub annual_radiation: Result<f64, MissingDataError>,
    pub total_area: f64,
    pub annual_theoretical_kwh: Result<f64, MissingDataError>,
    pub annual_estimated_kwh: Result<f64, MissingDataError>,
    pub monthly_average_kwh: Result<f64, MissingDataError>,
    pub monthly_estimated_kwh: [Result<f64, MissingDataError>; 12],
}

impl PartialEstimate {
    /// Collapses into a full result, failing on the first missing figure
    /// (annual first, then months in calendar order).
    pub fn complete(self) -> Result<EstimationResult, MissingDataError> {
        let annual_radiation = self.annual_radiation?;
        let annual_theoretical_kwh = self.annual_theoretical_kwh?;
        let annual_estimated_kwh = self.annual_estimated_kwh?;
        let monthly_average_kwh = self.monthly_average_kwh?;
        let mut monthly = [0.0; 12];
        for (slot, value) in monthly.iter_mut().zip(self.monthly_estimated_kwh) {
            *slot = value?;
        }
        Ok(EstimationResult {
            annual_radiation,
            total_area: self.total_area,
            annual_theoretical_kwh,
            annual_estimated_kwh,
            monthly_average_kwh,
            monthly_estimated_kwh: monthly,
        })
    }
}
