//! Typed records for the state dataset.

/// One row of the dataset after coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub state: String,
    /// Two-letter postal code, drawn on top of the marker.
    pub abbreviation: String,
    /// Percent of residents in poverty.
    pub poverty_rate: f64,
    /// Percent of residents lacking healthcare.
    pub healthcare_lack_rate: f64,
}

/// All rows of the source file, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    points: Vec<DataPoint>,
}

impl Dataset {
    pub fn new(points: Vec<DataPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Min and max poverty rate, skipping `NaN`.
    pub fn poverty_extent(&self) -> Option<(f64, f64)> {
        extent(self.points.iter().map(|p| p.poverty_rate))
    }

    /// Min and max healthcare-lack rate, skipping `NaN`.
    pub fn healthcare_extent(&self) -> Option<(f64, f64)> {
        extent(self.points.iter().map(|p| p.healthcare_lack_rate))
    }
}

fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(poverty_rate: f64, healthcare_lack_rate: f64) -> DataPoint {
        DataPoint {
            state: "Test".into(),
            abbreviation: "TS".into(),
            poverty_rate,
            healthcare_lack_rate,
        }
    }

    #[test]
    fn extents_are_independent() {
        let dataset = Dataset::new(vec![point(5.0, 8.0), point(12.3, 20.0), point(30.1, 9.5)]);

        assert_eq!(dataset.poverty_extent(), Some((5.0, 30.1)));
        assert_eq!(dataset.healthcare_extent(), Some((8.0, 20.0)));
    }

    #[test]
    fn extent_skips_nan() {
        let dataset = Dataset::new(vec![point(f64::NAN, 8.0), point(12.3, 20.0)]);
        assert_eq!(dataset.poverty_extent(), Some((12.3, 12.3)));
    }

    #[test]
    fn empty_dataset_has_no_extent() {
        let dataset = Dataset::default();
        assert!(dataset.is_empty());
        assert_eq!(dataset.poverty_extent(), None);
    }
}
