use serde::Serialize;
use utoipa::ToSchema;

// ─── Dataset schema ──────────────────────────────────────────────────────────

/// Column holding the municipality name.
pub const LOCATION_COLUMN: &str = "MUNICIPIO";

/// Column holding the annual mean of daily irradiation.
pub const ANNUAL_COLUMN: &str = "00_ANNUAL";

// ─── Radiation cell ──────────────────────────────────────────────────────────

/// One radiation field of a record, in kWh/m²/day.
///
/// A cell that could not be parsed is `Missing`. There is no numeric sentinel:
/// callers must go through [`RadiationCell::value`] to do arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RadiationCell {
    Value(f64),
    #[default]
    Missing,
}

impl RadiationCell {
    pub fn value(self) -> Option<f64> {
        match self {
            RadiationCell::Value(v) => Some(v),
            RadiationCell::Missing => None,
        }
    }

    pub fn is_missing(self) -> bool {
        matches!(self, RadiationCell::Missing)
    }
}

impl From<Option<f64>> for RadiationCell {
    fn from(v: Option<f64>) -> Self {
        v.map_or(RadiationCell::Missing, RadiationCell::Value)
    }
}

// ─── Months ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Zero-based position, January = 0.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name in the radiation dataset. December is `12_DEZ` in the source files.
    pub fn column(self) -> &'static str {
        match self {
            Month::January   => "01_JAN",
            Month::February  => "02_FEB",
            Month::March     => "03_MAR",
            Month::April     => "04_APR",
            Month::May       => "05_MAY",
            Month::June      => "06_JUN",
            Month::July      => "07_JUL",
            Month::August    => "08_AUG",
            Month::September => "09_SEP",
            Month::October   => "10_OCT",
            Month::November  => "11_NOV",
            Month::December  => "12_DEZ",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Month::January   => "Jan",
            Month::February  => "Feb",
            Month::March     => "Mar",
            Month::April     => "Apr",
            Month::May       => "May",
            Month::June      => "Jun",
            Month::July      => "Jul",
            Month::August    => "Aug",
            Month::September => "Sep",
            Month::October   => "Oct",
            Month::November  => "Nov",
            Month::December  => "Dec",
        }
    }
}

/// All 13 radiation columns in dataset order: annual first, then January..December.
pub fn radiation_columns() -> impl Iterator<Item = &'static str> {
    std::iter::once(ANNUAL_COLUMN).chain(Month::ALL.iter().map(|m| m.column()))
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// Normalized radiation data for one location. Every `Value` is kWh/m²/day,
/// finite and non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiationRecord {
    pub location: String,
    pub annual_radiation: RadiationCell,
    pub monthly_radiation: [RadiationCell; 12],
}

impl RadiationRecord {
    pub fn monthly(&self, month: Month) -> RadiationCell {
        self.monthly_radiation[month.index()]
    }

    /// Look up a cell by its dataset column name.
    pub fn cell(&self, column: &str) -> Option<RadiationCell> {
        if column == ANNUAL_COLUMN {
            return Some(self.annual_radiation);
        }
        Month::ALL
            .iter()
            .find(|m| m.column() == column)
            .map(|m| self.monthly(*m))
    }

    /// Dataset columns whose cell is missing for this record, in dataset order.
    pub fn missing_columns(&self) -> Vec<&'static str> {
        radiation_columns()
            .filter(|col| self.cell(col).is_some_and(RadiationCell::is_missing))
            .collect()
    }
}
