//! Load cash flow series from CSV

use super::CashFlowSeries;
use csv::Reader;
use std::error::Error;
use std::path::Path;

/// Raw CSV row with `Period` and `Amount` columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Period")]
    period: u32,
    #[serde(rename = "Amount")]
    amount: f64,
}

/// Load a cash flow series from a CSV file
///
/// Rows are appended in file order; periods are taken as given, with no
/// uniqueness or ordering checks.
pub fn load_series<P: AsRef<Path>>(path: P) -> Result<CashFlowSeries, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    let mut series = CashFlowSeries::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        series.add_entry(row.period, row.amount);
    }

    Ok(series)
}

/// Load a cash flow series from any reader (e.g., string buffer, network stream)
pub fn load_series_from_reader<R: std::io::Read>(reader: R) -> Result<CashFlowSeries, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut series = CashFlowSeries::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        series.add_entry(row.period, row.amount);
    }

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_load_from_reader() {
        let data = "Period,Amount\n0,-100.0\n1,60.0\n2,60.0\n";
        let series = load_series_from_reader(data.as_bytes()).unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.entries()[0].period, 0);
        assert_relative_eq!(series.entries()[0].amount, -100.0);
        assert_relative_eq!(series.total(), 20.0);
    }

    #[test]
    fn test_load_preserves_file_order() {
        let data = "Period,Amount\n3,25.0\n0,-100.0\n3,25.0\n";
        let series = load_series_from_reader(data.as_bytes()).unwrap();

        let periods: Vec<u32> = series.iter().map(|e| e.period).collect();
        assert_eq!(periods, vec![3, 0, 3]);
    }

    #[test]
    fn test_load_rejects_malformed_amount() {
        let data = "Period,Amount\n0,not_a_number\n";
        assert!(load_series_from_reader(data.as_bytes()).is_err());
    }

    #[test]
    fn test_load_empty_file_yields_empty_series() {
        let data = "Period,Amount\n";
        let series = load_series_from_reader(data.as_bytes()).unwrap();
        assert!(series.is_empty());
    }
}
