//! CSV Data Loader Module
//! Fetches the exchange rate table over HTTP and parses it with Polars.

use super::model::{Dataset, REQUIRED_COLUMNS};
use polars::prelude::*;
use std::io::Cursor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to fetch data: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server returned HTTP {status} for {url}")]
    Status { status: u16, url: String },
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("CSV is missing required column '{0}'")]
    MissingColumn(String),
}

/// Single-attempt loader. No retries, no caching.
pub struct DataLoader;

impl DataLoader {
    /// Download and parse the table at `url`.
    pub fn fetch(url: &str) -> Result<Dataset, LoaderError> {
        log::info!("Fetching exchange rates from {url}");

        let response = reqwest::blocking::get(url)?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoaderError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes()?;
        log::debug!("Received {} bytes", body.len());

        Self::parse_csv(body.to_vec())
    }

    /// Parse CSV bytes into a normalized dataset.
    pub fn parse_csv(bytes: Vec<u8>) -> Result<Dataset, LoaderError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;

        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|name| df.get_column_index(name).is_none())
        {
            return Err(LoaderError::MissingColumn(missing.to_string()));
        }

        let dataset = Dataset::from_frame(df)?;
        log::info!("Loaded {} observations", dataset.len());
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
refArea,Year,Item Code,Item,Value,Currency
Lebanon,1989,5540,Local currency units per USD,496.69,Lebanese Pound
Lebanon,1990,5540,Local currency units per USD,695.09,Lebanese Pound
Lebanon,2022,5541,Standard local currency units per USD,1507.5,Lebanese Pound
";

    #[test]
    fn test_parse_csv() {
        let dataset = DataLoader::parse_csv(SAMPLE_CSV.as_bytes().to_vec()).unwrap();
        assert_eq!(dataset.len(), 3);

        let rows = dataset.observations().unwrap();
        assert_eq!(rows[0].year, 1989);
        assert_eq!(rows[1].value, 695.09);
        assert_eq!(rows[2].item, "Standard local currency units per USD");
        assert_eq!(rows[2].item_code, "5541");
        assert_eq!(rows[2].currency, "Lebanese Pound");
    }

    #[test]
    fn test_parse_csv_missing_column() {
        let csv = "Year,Value,Item\n2000,1507.5,Local currency units per USD\n";
        let err = DataLoader::parse_csv(csv.as_bytes().to_vec()).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(ref name) if name == "Item Code"));
    }

    #[test]
    fn test_parse_csv_empty_input() {
        let result = DataLoader::parse_csv(Vec::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_fetch_unreachable_url() {
        let err = DataLoader::fetch("http://127.0.0.1:9/rates.csv").unwrap_err();
        assert!(matches!(err, LoaderError::Http(_)));
        assert!(err.to_string().starts_with("Failed to fetch data"));
    }
}
