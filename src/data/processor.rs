//! Data Processor Module
//! Coerces the raw text columns into typed records.

use crate::data::loader::DataLoadError;
use crate::data::record::{DataPoint, Dataset};
use polars::prelude::*;
use std::borrow::Cow;

pub const STATE_COL: &str = "state";
pub const ABBR_COL: &str = "abbr";
pub const POVERTY_COL: &str = "poverty";
pub const HEALTHCARE_COL: &str = "healthcare";

/// Handles type coercion from the CSV frame to [`Dataset`].
pub struct DataProcessor;

impl DataProcessor {
    /// Convert every row into a [`DataPoint`].
    ///
    /// The rate columns are cast non-strictly, so text that does not parse as a
    /// number ends up as `NaN` rather than failing the load. Extra columns are ignored.
    pub fn coerce(df: &DataFrame) -> Result<Dataset, DataLoadError> {
        let states = Self::text_column(df, STATE_COL)?;
        let abbrs = Self::text_column(df, ABBR_COL)?;
        let poverty = Self::numeric_column(df, POVERTY_COL)?;
        let healthcare = Self::numeric_column(df, HEALTHCARE_COL)?;

        let points = states
            .into_iter()
            .zip(abbrs)
            .zip(poverty.into_iter().zip(healthcare))
            .map(|((state, abbreviation), (poverty_rate, healthcare_lack_rate))| DataPoint {
                state,
                abbreviation,
                poverty_rate,
                healthcare_lack_rate,
            })
            .collect();

        Ok(Dataset::new(points))
    }

    fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, DataLoadError> {
        df.column(name)
            .map_err(|_| DataLoadError::MissingColumn(name.to_string()))
    }

    fn text_column(df: &DataFrame, name: &str) -> Result<Vec<String>, DataLoadError> {
        let text = Self::column(df, name)?.cast(&DataType::String)?;
        let values = text
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect();
        Ok(values)
    }

    fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<f64>, DataLoadError> {
        let raw = Self::column(df, name)?.cast(&DataType::String)?;
        // Polars does not trim before parsing, stray whitespace would become null
        let trimmed = raw
            .as_materialized_series()
            .str()?
            .apply_values(|v| Cow::Borrowed(v.trim()))
            .into_series();
        let numeric = trimmed.cast(&DataType::Float64)?;
        let values = numeric
            .f64()?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerces_rate_columns_only() {
        let df = df!(
            "state" => ["Ohio", "Texas"],
            "abbr" => ["OH", "TX"],
            "poverty" => ["14.2", "17"],
            "healthcare" => ["11.5", " 24.9 "],
            "income" => ["49644", "53207"]
        )
        .unwrap();

        let dataset = DataProcessor::coerce(&df).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(
            dataset.points()[0],
            DataPoint {
                state: "Ohio".into(),
                abbreviation: "OH".into(),
                poverty_rate: 14.2,
                healthcare_lack_rate: 11.5,
            }
        );
        assert_eq!(dataset.points()[1].poverty_rate, 17.0);
        assert_eq!(dataset.points()[1].healthcare_lack_rate, 24.9);
    }

    #[test]
    fn unparsable_rates_become_nan() {
        let df = df!(
            "state" => ["Nowhere"],
            "abbr" => ["NW"],
            "poverty" => ["n/a"],
            "healthcare" => ["12.0"]
        )
        .unwrap();

        let dataset = DataProcessor::coerce(&df).unwrap();

        assert!(dataset.points()[0].poverty_rate.is_nan());
        assert_eq!(dataset.points()[0].healthcare_lack_rate, 12.0);
    }

    #[test]
    fn reports_the_missing_column() {
        let df = df!(
            "state" => ["Ohio"],
            "poverty" => ["14.2"],
            "healthcare" => ["11.5"]
        )
        .unwrap();

        let err = DataProcessor::coerce(&df).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn(c) if c == ABBR_COL));
    }
}
