use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use relay_client::Country;
use thiserror::Error;

/// Header row of the export.
pub const CSV_FIELDS: [&str; 3] = ["Country Name", "Capital", "Currency"];
/// Written in place of a missing capital or currency.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to write CSV file: {0}")]
    Io(#[from] std::io::Error),
}

/// Returns `value`, or [`NOT_AVAILABLE`] when it is missing or empty.
pub fn or_not_available(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(NOT_AVAILABLE)
}

/// Renders one quoted row per country under the [`CSV_FIELDS`] header.
pub fn render_csv(countries: &[Country]) -> Result<Vec<u8>, ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_FIELDS)?;
    for country in countries {
        writer.write_record([
            country.name.as_str(),
            or_not_available(country.capital.as_deref()),
            or_not_available(country.currency.as_deref()),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Io(std::io::Error::new(e.error().kind(), e.to_string())))
}

/// Replaces the file at `path` with the CSV export of `countries`.
pub async fn write_csv(path: &Path, countries: &[Country]) -> Result<(), ExportError> {
    let csv = render_csv(countries)?;
    tokio::fs::write(path, csv).await?;
    Ok(())
}
