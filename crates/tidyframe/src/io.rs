//! CSV loading and writing around the cleaning engine.
//!
//! The loader maps empty cells and common missing markers to null, which
//! is the only missing sentinel the engine understands.

use crate::error::{Result, ResultExt};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{Cursor, Write};
use std::path::Path;
use tracing::{debug, info};

/// Cell values read as missing by default.
pub const DEFAULT_MISSING_MARKERS: [&str; 9] =
    ["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None", "#N/A"];

/// Options for turning CSV text into a table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Cell values treated as missing, compared exactly.
    pub missing_markers: Vec<String>,
    /// Rows sampled for schema inference. `None` scans the whole file.
    pub infer_schema_length: Option<usize>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            missing_markers: DEFAULT_MISSING_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            infer_schema_length: Some(100),
        }
    }
}

impl LoadOptions {
    fn read_options(&self) -> CsvReadOptions {
        let markers: Vec<PlSmallStr> = self
            .missing_markers
            .iter()
            .map(|m| m.as_str().into())
            .collect();

        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(self.infer_schema_length)
            .with_parse_options(
                CsvParseOptions::default()
                    .with_quote_char(Some(b'"'))
                    .with_null_values(Some(NullValues::AllColumns(markers))),
            )
    }
}

/// Parse CSV text (header row required) into a table.
pub fn read_csv_str(text: &str, options: &LoadOptions) -> Result<DataFrame> {
    let cursor = Cursor::new(text.as_bytes().to_vec());
    let df = options
        .read_options()
        .into_reader_with_file_handle(cursor)
        .finish()
        .context("Failed to parse CSV data")?;
    debug!("Parsed CSV text: {:?}", df.shape());
    Ok(df)
}

/// Load a CSV file into a table.
pub fn load_csv(path: &Path, options: &LoadOptions) -> Result<DataFrame> {
    info!("Loading dataset from: {}", path.display());
    let text = fs::read_to_string(path)?;
    read_csv_str(&text, options)
        .context(format!("Failed to load '{}'", path.display()))
}

fn write_csv_to<W: Write>(df: &mut DataFrame, writer: W) -> PolarsResult<()> {
    CsvWriter::new(writer)
        .include_header(true)
        .with_separator(b',')
        .with_quote_char(b'"')
        .finish(df)
}

/// Create the parent directory of `path` if it has one.
fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Serialize a table to CSV text. Missing values become empty cells.
pub fn to_csv_string(df: &mut DataFrame) -> Result<String> {
    let mut buf: Vec<u8> = Vec::new();
    write_csv_to(df, &mut buf).context("Failed to write CSV data")?;

    // polars only emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write a table to a CSV file, creating parent directories as needed.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path)?;
    write_csv_to(df, file).context(format!("Failed to write '{}'", path.display()))?;

    info!("Dataset saved: {}", path.display());
    Ok(())
}

/// Write any serializable report as pretty JSON, creating parent
/// directories as needed.
pub fn write_json_report<T: Serialize>(report: &T, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

    info!("Report written to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_become_missing() {
        let text = "id,city,score\n1,Oslo,3.5\n2,,NA\n3,N/A,4.0\n";
        let df = read_csv_str(text, &LoadOptions::default()).unwrap();

        assert_eq!(df.shape(), (3, 3));
        let city = df.column("city").unwrap().as_materialized_series();
        let score = df.column("score").unwrap().as_materialized_series();
        assert_eq!(city.null_count(), 2);
        assert_eq!(score.null_count(), 1);
        assert_eq!(score.dtype(), &DataType::Float64);
    }

    #[test]
    fn test_custom_markers() {
        let options = LoadOptions {
            missing_markers: vec!["?".to_string()],
            ..LoadOptions::default()
        };
        let df = read_csv_str("id,tag\n1,?\n2,NA\n", &options).unwrap();

        let tag = df.column("tag").unwrap().as_materialized_series();
        assert_eq!(tag.null_count(), 1);
    }

    #[test]
    fn test_csv_string_round_trip_keeps_order() {
        let mut df = df![
            "id" => [3i64, 1, 2],
            "name" => [Some("c"), None, Some("b")],
        ]
        .unwrap();

        let text = to_csv_string(&mut df).unwrap();
        assert!(text.starts_with("id,name\n3,c\n1,\n2,b"));

        let back = read_csv_str(&text, &LoadOptions::default()).unwrap();
        assert!(back.equals_missing(&df));
    }

    #[test]
    fn test_write_csv_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results").join("cleaned.csv");
        let mut df = df![
            "id" => [1i64, 2],
        ]
        .unwrap();

        write_csv(&mut df, &path).unwrap();

        let loaded = load_csv(&path, &LoadOptions::default()).unwrap();
        assert_eq!(loaded.height(), 2);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_csv(Path::new("/nonexistent/data.csv"), &LoadOptions::default())
            .unwrap_err();
        assert_eq!(err.error_code(), "IO_ERROR");
    }

    #[test]
    fn test_write_json_report_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("run.json");

        write_json_report(&LoadOptions::default(), &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let back: LoadOptions = serde_json::from_str(&text).unwrap();
        assert_eq!(back.missing_markers.len(), DEFAULT_MISSING_MARKERS.len());
        assert_eq!(back.infer_schema_length, Some(100));
    }
}
