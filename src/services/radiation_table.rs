//! Radiation dataset ingestion.
//!
//! The source is a comma-delimited table with one row per municipality. Radiation
//! cells are Wh/m²/day written with a comma decimal separator (`"5230,5"`), so
//! each cell goes through two pure steps: [`parse_decimal_comma`] then
//! [`wh_to_kwh`]. A cell that fails the first step is kept as
//! [`RadiationCell::Missing`]; only I/O and framing problems fail the load.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use csv::StringRecord;

use crate::error::LoadError;
use crate::models::radiation::{Month, RadiationCell, RadiationRecord, ANNUAL_COLUMN, LOCATION_COLUMN};

/// Parses a decimal written with a comma separator. Periods are also accepted,
/// so already-normalized values survive a second pass.
pub fn parse_decimal_comma(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok()
}

/// Wh/m²/day → kWh/m²/day.
pub fn wh_to_kwh(wh: f64) -> f64 {
    wh / 1000.0
}

/// Full cell pipeline. Negative and non-finite values break the record invariant
/// and are treated as unparseable.
fn normalize_cell(raw: Option<&str>) -> RadiationCell {
    raw.and_then(parse_decimal_comma)
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(wh_to_kwh)
        .into()
}

/// Header positions of the columns the core reads. Radiation columns absent from
/// the header are `None`.
struct ColumnIndex {
    location: usize,
    annual: Option<usize>,
    monthly: [Option<usize>; 12],
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, LoadError> {
        // A repeated header resolves to its first column.
        let mut by_name: HashMap<&str, usize> = HashMap::new();
        for (idx, name) in headers.iter().enumerate() {
            by_name.entry(name.trim().trim_start_matches('\u{feff}')).or_insert(idx);
        }

        let location = *by_name
            .get(LOCATION_COLUMN)
            .ok_or(LoadError::MissingLocationColumn(LOCATION_COLUMN))?;
        let monthly = Month::ALL.map(|m| by_name.get(m.column()).copied());

        Ok(Self {
            location,
            annual: by_name.get(ANNUAL_COLUMN).copied(),
            monthly,
        })
    }

    fn record(&self, row: &StringRecord) -> RadiationRecord {
        let cell = |idx: Option<usize>| normalize_cell(idx.and_then(|i| row.get(i)));
        RadiationRecord {
            location: row.get(self.location).unwrap_or_default().trim().to_string(),
            annual_radiation: cell(self.annual),
            monthly_radiation: self.monthly.map(cell),
        }
    }
}

/// Immutable, normalized radiation dataset. Rows keep table order.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiationTable {
    records: Vec<RadiationRecord>,
    /// First row index for each location name.
    first_row: HashMap<String, usize>,
}

impl RadiationTable {
    /// Reads and normalizes the table at `path`. The whole source is read before
    /// parsing, so every I/O failure surfaces as `NotFound` or `Unreadable` and
    /// `Malformed` is left to framing errors.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound { path: path.to_path_buf() },
            _ => LoadError::Unreadable { path: path.to_path_buf(), source: e },
        })?;
        Self::from_reader(content.as_slice())
    }

    /// Same as [`RadiationTable::load`] for an already open source.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b',')
            .flexible(true)
            .from_reader(reader);

        let columns = ColumnIndex::from_headers(reader.headers()?)?;

        let mut records = Vec::new();
        let mut first_row = HashMap::new();
        for row in reader.records() {
            let record = columns.record(&row?);
            first_row.entry(record.location.clone()).or_insert(records.len());
            records.push(record);
        }

        Ok(Self { records, first_row })
    }

    /// Distinct location names in first-seen table order.
    pub fn locations(&self) -> Vec<String> {
        self.records
            .iter()
            .enumerate()
            .filter(|(idx, r)| self.first_row.get(&r.location) == Some(idx))
            .map(|(_, r)| r.location.clone())
            .collect()
    }

    /// Exact-name lookup. With duplicate names the first row in the table wins.
    pub fn record_for(&self, location: &str) -> Option<&RadiationRecord> {
        self.first_row.get(location).map(|&idx| &self.records[idx])
    }

    pub fn records(&self) -> impl Iterator<Item = &RadiationRecord> {
        self.records.iter()
    }

    /// Number of rows, duplicates included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Radiation cells across the whole table that failed to parse.
    pub fn missing_cells(&self) -> usize {
        self.records.iter().map(|r| r.missing_columns().len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use std::io::Write;

    const HEADER: &str = "MUNICIPIO,UF,00_ANNUAL,01_JAN,02_FEB,03_MAR,04_APR,05_MAY,06_JUN,07_JUL,08_AUG,09_SEP,10_OCT,11_NOV,12_DEZ";

    fn row(name: &str, annual: &str, month: &str) -> String {
        let months = vec![format!("\"{month}\""); 12].join(",");
        format!("{name},PE,\"{annual}\",{months}")
    }

    fn table(rows: &[String]) -> RadiationTable {
        let csv = format!("{HEADER}\n{}\n", rows.join("\n"));
        RadiationTable::from_reader(csv.as_bytes()).unwrap()
    }

    #[rstest]
    #[case("5,23", Some(5.23))]
    #[case(" 5230,5 ", Some(5230.5))]
    #[case("5230", Some(5230.0))]
    #[case("5.23", Some(5.23))]
    #[case("", None)]
    #[case("n/d", None)]
    #[case("1,234,5", None)]
    fn test_parse_decimal_comma(#[case] raw: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_decimal_comma(raw), expected);
    }

    #[test]
    fn test_negative_and_non_finite_cells_are_missing() {
        assert_eq!(normalize_cell(Some("-12,5")), RadiationCell::Missing);
        assert_eq!(normalize_cell(Some("inf")), RadiationCell::Missing);
        assert_eq!(normalize_cell(Some("NaN")), RadiationCell::Missing);
        assert_eq!(normalize_cell(None), RadiationCell::Missing);
        assert_eq!(normalize_cell(Some("0")), RadiationCell::Value(0.0));
    }

    #[test]
    fn test_load_converts_wh_to_kwh() {
        let t = table(&[row("Recife", "5230,5", "4870,25")]);
        let r = t.record_for("Recife").unwrap();
        let annual = r.annual_radiation.value().unwrap();
        assert!((annual - 5.2305).abs() < 1e-9);
        for m in Month::ALL {
            assert!((r.monthly(m).value().unwrap() - 4.87025).abs() < 1e-9);
        }
    }

    #[test]
    fn test_non_numeric_cell_is_missing_and_rest_of_table_loads() {
        let csv = format!(
            "{HEADER}\nCaruaru,PE,\"5100,0\",\"5000\",\"x\",\"5000\",\"5000\",\"5000\",\"5000\",\"5000\",\"5000\",\"5000\",\"5000\",\"5000\",\"5000\"\n{}\n",
            row("Olinda", "5300", "5200")
        );
        let t = RadiationTable::from_reader(csv.as_bytes()).unwrap();
        let caruaru = t.record_for("Caruaru").unwrap();
        assert!(caruaru.monthly(Month::February).is_missing());
        assert_eq!(caruaru.monthly(Month::January), RadiationCell::Value(5.0));
        assert_eq!(t.len(), 2);
        assert_eq!(t.missing_cells(), 1);
    }

    #[test]
    fn test_absent_radiation_column_is_missing_everywhere() {
        let csv = "MUNICIPIO,00_ANNUAL,01_JAN\nGaranhuns,\"4900\",\"5100\"\n";
        let t = RadiationTable::from_reader(csv.as_bytes()).unwrap();
        let r = t.record_for("Garanhuns").unwrap();
        assert_eq!(r.annual_radiation, RadiationCell::Value(4.9));
        assert!(r.monthly(Month::December).is_missing());
        assert_eq!(r.missing_columns().len(), 11);
    }

    #[test]
    fn test_short_row_yields_missing_cells() {
        let csv = format!("{HEADER}\nSalgueiro,PE,\"5800\"\n");
        let t = RadiationTable::from_reader(csv.as_bytes()).unwrap();
        let r = t.record_for("Salgueiro").unwrap();
        assert_eq!(r.annual_radiation, RadiationCell::Value(5.8));
        assert!(r.monthly(Month::January).is_missing());
    }

    #[test]
    fn test_missing_location_column_fails_load() {
        let csv = "CIDADE,00_ANNUAL\nRecife,\"5000\"\n";
        let err = RadiationTable::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingLocationColumn("MUNICIPIO")));
    }

    #[test]
    fn test_bom_on_first_header_is_ignored() {
        let csv = "\u{feff}MUNICIPIO,00_ANNUAL\nRecife,\"5000\"\n";
        let t = RadiationTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(t.locations(), vec!["Recife".to_string()]);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = RadiationTable::load(dir.path().join("radiation.csv")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
    }

    #[test]
    fn test_directory_source_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = RadiationTable::load(dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::Unreadable { .. }), "got {err:?}");
        assert!(err.to_string().contains("unreadable"));
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let mut bytes = b"MUNICIPIO,00_ANNUAL\nRecife,\"".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.extend_from_slice(b"\"\n");
        let err = RadiationTable::from_reader(bytes.as_slice()).unwrap_err();
        assert!(matches!(err, LoadError::Malformed(_)), "got {err:?}");
    }

    #[test]
    fn test_repeated_header_uses_first_column() {
        let csv = "MUNICIPIO,01_JAN,01_JAN\nRecife,\"1000\",\"9000\"\n";
        let t = RadiationTable::from_reader(csv.as_bytes()).unwrap();
        let r = t.record_for("Recife").unwrap();
        assert_eq!(r.monthly(Month::January), RadiationCell::Value(1.0));
    }

    #[test]
    fn test_duplicate_location_resolves_to_first_row() {
        let t = table(&[
            row("Bonito", "5000", "4000"),
            row("Recife", "5200", "5200"),
            row("Bonito", "6000", "6000"),
        ]);
        assert_eq!(t.locations(), vec!["Bonito".to_string(), "Recife".to_string()]);
        for _ in 0..3 {
            let r = t.record_for("Bonito").unwrap();
            assert_eq!(r.annual_radiation, RadiationCell::Value(5.0));
        }
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn test_unknown_location_is_none() {
        let t = table(&[row("Recife", "5200", "5200")]);
        assert!(t.record_for("recife").is_none());
    }

    #[test]
    fn test_loading_same_file_twice_is_identical() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        writeln!(file, "{}", row("Arcoverde", "5400,5", "5100")).unwrap();
        writeln!(file, "{}", row("Triunfo", "5600", "5300,75")).unwrap();
        file.flush().unwrap();

        let a = RadiationTable::load(file.path()).unwrap();
        let b = RadiationTable::load(file.path()).unwrap();
        assert_eq!(a.locations(), b.locations());
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_comma_cell_loads_as_value_over_1000(int_part in 0u32..20_000, frac in 0u32..1000) {
            let raw = format!("{int_part},{frac:03}");
            let expected = format!("{int_part}.{frac:03}").parse::<f64>().unwrap() / 1000.0;
            let t = table(&[row("Exu", &raw, &raw)]);
            let r = t.record_for("Exu").unwrap();
            prop_assert!((r.annual_radiation.value().unwrap() - expected).abs() < 1e-9);
            prop_assert!((r.monthly(Month::July).value().unwrap() - expected).abs() < 1e-9);
        }
    }
}
