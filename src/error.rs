use std::path::PathBuf;
use thiserror::Error;

/// Failure to produce a radiation table. No partial table is ever returned.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("radiation source '{}' not found", .path.display())]
    NotFound { path: PathBuf },

    #[error("radiation source '{}' is unreadable: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("radiation table is malformed: {0}")]
    Malformed(#[from] csv::Error),

    #[error("radiation table has no '{0}' column")]
    MissingLocationColumn(&'static str),
}

/// A radiation cell needed for a figure could not be parsed when the table was loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("radiation value '{column}' is missing for '{location}'")]
pub struct MissingDataError {
    pub location: String,
    pub column: &'static str,
}

/// A system parameter outside its allowed range. Raised before any arithmetic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidParameterError {
    #[error("panel_count must be between 1 and 4294967295, got {0}")]
    PanelCount(i64),

    #[error("panel_area must be a finite value > 0 m², got {0}")]
    PanelArea(f64),

    #[error("module_efficiency_pct must be in (0, 100], got {0}")]
    ModuleEfficiency(f64),

    #[error("performance_ratio must be in [0, 1], got {0}")]
    PerformanceRatio(f64),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimateError {
    #[error(transparent)]
    InvalidParameter(#[from] InvalidParameterError),

    #[error(transparent)]
    MissingData(#[from] MissingDataError),
}
