//! CSV Data Loader Module
//! Reads the state dataset with Polars and hands it to the processor for coercion.

use crate::data::processor::DataProcessor;
use crate::data::record::Dataset;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("Dataset file not found: {0}")]
    NotFound(PathBuf),
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Anything that can produce the chart dataset.
///
/// `load` blocks; the responsive renderer calls it from a worker thread so the
/// UI thread never waits on it.
pub trait DatasetSource: Send + Sync {
    fn load(&self) -> Result<Dataset, DataLoadError>;
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file with every column kept as text.
    ///
    /// Type coercion is the processor's job, so schema inference is switched off.
    pub fn load_csv(file_path: &Path) -> Result<DataFrame, DataLoadError> {
        if !file_path.is_file() {
            return Err(DataLoadError::NotFound(file_path.to_path_buf()));
        }

        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        Ok(df)
    }

    /// Get list of column names from a loaded DataFrame.
    pub fn get_columns(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

/// Dataset source backed by a CSV file at a fixed path.
#[derive(Debug, Clone)]
pub struct CsvDatasetSource {
    path: PathBuf,
}

impl CsvDatasetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSource for CsvDatasetSource {
    fn load(&self) -> Result<Dataset, DataLoadError> {
        let df = DataLoader::load_csv(&self.path)?;
        tracing::debug!(
            path = %self.path.display(),
            rows = df.height(),
            columns = ?DataLoader::get_columns(&df),
            "read dataset"
        );
        DataProcessor::coerce(&df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_and_coerces_rows() {
        let file = write_csv(
            "id,state,abbr,poverty,povertyMoe,healthcare\n\
             1,Alabama,AL,19.3,0.5,13.9\n\
             39,Ohio,OH,14.2,0.3,11.5\n",
        );
        let dataset = CsvDatasetSource::new(file.path()).load().unwrap();

        assert_eq!(dataset.len(), 2);
        let ohio = &dataset.points()[1];
        assert_eq!(ohio.state, "Ohio");
        assert_eq!(ohio.abbreviation, "OH");
        assert_eq!(ohio.poverty_rate, 14.2);
        assert_eq!(ohio.healthcare_lack_rate, 11.5);
    }

    #[test]
    fn columns_arrive_as_text() {
        let file = write_csv("state,abbr,poverty,healthcare\nOhio,OH,14.2,11.5\n");
        let df = DataLoader::load_csv(file.path()).unwrap();

        assert_eq!(
            DataLoader::get_columns(&df),
            vec!["state", "abbr", "poverty", "healthcare"]
        );
        assert_eq!(df.column("poverty").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        let err = CsvDatasetSource::new(&path).load().unwrap_err();

        assert!(matches!(err, DataLoadError::NotFound(p) if p == path));
    }

    #[test]
    fn missing_column_is_a_load_error() {
        let file = write_csv("state,abbr,poverty\nOhio,OH,14.2\n");
        let err = CsvDatasetSource::new(file.path()).load().unwrap_err();

        assert!(matches!(err, DataLoadError::MissingColumn(c) if c == "healthcare"));
    }
}
