#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Loader and normalizer for the ward environmental stress dataset.
//!
//! The dataset is a single CSV read once at startup. Loading happens in two
//! stages: the header row becomes a [`DatasetSchema`] describing which
//! optional columns exist, then each row is deserialized into a
//! [`RawWardRecord`] and normalized into a [`WardRecord`] against that
//! schema. The result is an immutable [`Dataset`].
//!
//! [`load`] never fails. Any I/O or parse problem is logged and the
//! dataset becomes [`Dataset::Unavailable`], which every query treats as
//! zero rows.

pub mod normalize;
pub mod schema;

use std::collections::BTreeSet;
use std::io::Read;
use std::path::{Path, PathBuf};

use stress_map_ward_models::WardRecord;
use thiserror::Error;

pub use normalize::RawWardRecord;
pub use schema::{ColumnPresence, CoordinateColumn, DatasetSchema};

/// Errors that can occur while loading the dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened.
    #[error("Failed to open {}: {source}", path.display())]
    Io {
        /// Path that was being opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The CSV could not be read or a cell could not be parsed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A column needed to build ward records is absent from the header.
    #[error("Missing required column '{column}'")]
    MissingColumn {
        /// Name of the absent column.
        column: &'static str,
    },

    /// A `ward`, coordinate or `stress_zone` cell is blank.
    #[error("Row {row}: missing value for '{column}'")]
    MissingValue {
        /// 1-based data row number.
        row: usize,
        /// Column name.
        column: &'static str,
    },

    /// A cell holds a value outside its domain.
    #[error("Row {row}: invalid value {value} for '{column}'")]
    InvalidValue {
        /// 1-based data row number.
        row: usize,
        /// Column name.
        column: &'static str,
        /// The offending value.
        value: String,
    },
}

/// The immutable in-memory ward table.
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    /// Rows were read successfully (possibly zero of them).
    Loaded {
        /// Ward rows in source order.
        wards: Vec<WardRecord>,
        /// Header names as they appeared in the source.
        columns: Vec<String>,
    },
    /// The source could not be read; behaves as an empty table.
    Unavailable,
}

impl Dataset {
    /// Wraps already-normalized records, e.g. for tests or embedding.
    #[must_use]
    pub fn from_wards(wards: Vec<WardRecord>) -> Self {
        Self::Loaded {
            wards,
            columns: Vec::new(),
        }
    }

    /// Ward rows in source order; empty when unavailable.
    #[must_use]
    pub fn wards(&self) -> &[WardRecord] {
        match self {
            Self::Loaded { wards, .. } => wards,
            Self::Unavailable => &[],
        }
    }

    /// Source header names; empty when unavailable.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        match self {
            Self::Loaded { columns, .. } => columns,
            Self::Unavailable => &[],
        }
    }

    /// Number of wards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.wards().len()
    }

    /// Whether there are no wards to report on.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wards().is_empty()
    }

    /// Whether the source file was read successfully.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}

/// Loads the dataset at `path`, falling back to [`Dataset::Unavailable`].
///
/// Failures are logged at `error` level so the dashboard keeps serving
/// degraded results instead of refusing to start.
#[must_use]
pub fn load(path: &Path) -> Dataset {
    log::info!("Loading ward data from {}...", path.display());

    match try_load(path) {
        Ok(dataset) => {
            log_report(&dataset);
            dataset
        }
        Err(e) => {
            log::error!("Failed to load ward data: {e}");
            log::error!("Running with an empty dataset");
            Dataset::Unavailable
        }
    }
}

/// Loads the dataset at `path`.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be opened, is not valid CSV,
/// lacks a required column, or has a blank identity, coordinate or zone
/// cell. Blank metric cells are not errors.
pub fn try_load(path: &Path) -> Result<Dataset, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_reader(file)
}

/// Reads and normalizes a ward CSV from any reader.
///
/// # Errors
///
/// Returns [`LoadError`] on CSV, schema, or row normalization failures.
pub fn from_reader<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let schema = DatasetSchema::from_headers(reader.headers()?);
    schema.validate()?;

    for column in schema.defaulted_columns() {
        log::warn!("'{column}' column not found - using default values");
    }

    let mut wards = Vec::new();
    for (i, result) in reader.deserialize::<RawWardRecord>().enumerate() {
        let raw = result?;
        wards.push(normalize::normalize(raw, &schema, i + 1)?);
    }

    warn_duplicate_wards(&wards);

    Ok(Dataset::Loaded {
        wards,
        columns: schema.columns,
    })
}

fn warn_duplicate_wards(wards: &[WardRecord]) {
    let mut seen = BTreeSet::new();
    for record in wards {
        if !seen.insert(record.ward.as_str()) {
            log::warn!("Duplicate ward name '{}'", record.ward);
        }
    }
}

fn log_report(dataset: &Dataset) {
    log::info!("CSV loaded: {} rows", dataset.len());
    log::info!("Columns: {:?}", dataset.columns());
    log::info!("Data ready for {} wards", dataset.len());
}

#[cfg(test)]
mod tests {
    use stress_map_ward_models::{DEFAULT_POPULATION, StressZone};

    use super::*;

    const HEADER: &str = "ward,lat,lon,pm25,heat,green_cover,pop_density,esi,stress_zone";

    #[test]
    fn reads_rows_in_source_order() {
        let csv = format!(
            "{HEADER}\n\
             Aundh,18.558,73.807,38.2,32.1,0.22,9000,0.41,Low Stress\n\
             Hadapsar,18.502,73.926,61.7,35.4,0.09,21000,0.73,High Stress\n"
        );
        let dataset = from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.wards()[0].ward, "Aundh");
        assert_eq!(dataset.wards()[1].stress_zone, StressZone::High);
        assert_eq!(dataset.columns().len(), 9);
    }

    #[test]
    fn single_row_without_population_gets_default() {
        let csv = format!("{HEADER}\nBaner,18.559,73.786,30.0,31.0,0.3,5000,0.35,Low Stress\n");
        let dataset = from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.wards()[0].population, DEFAULT_POPULATION);
    }

    #[test]
    fn present_population_is_never_defaulted() {
        let csv = format!(
            "{HEADER},population\n\
             Baner,18.559,73.786,30.0,31.0,0.3,5000,0.35,Low Stress,120000\n\
             Wakad,18.598,73.765,44.0,32.0,0.2,7000,0.5,Medium Stress,80000.0\n"
        );
        let dataset = from_reader(csv.as_bytes()).unwrap();
        let populations: Vec<u64> = dataset.wards().iter().map(|w| w.population).collect();
        assert_eq!(populations, vec![120_000, 80_000]);
    }

    #[test]
    fn aliased_coordinates_are_copied() {
        let csv = "ward,latitude,longitude,pm25,heat,green_cover,pop_density,esi,stress_zone\n\
                   Baner,18.559,73.786,30.0,31.0,0.3,5000,0.35,Low Stress\n";
        let dataset = from_reader(csv.as_bytes()).unwrap();
        assert!((dataset.wards()[0].lat - 18.559).abs() < f64::EPSILON);
        assert!((dataset.wards()[0].lon - 73.786).abs() < f64::EPSILON);
    }

    #[test]
    fn ignores_extra_columns_and_whitespace() {
        let csv = format!(
            "{HEADER},notes\n Baner , 18.559 ,73.786,30.0,31.0,0.3,5000,0.35, Low Stress ,quiet\n"
        );
        let dataset = from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.wards()[0].ward, "Baner");
        assert_eq!(dataset.wards()[0].stress_zone, StressZone::Low);
    }

    #[test]
    fn unparsable_number_fails_the_load() {
        let csv = format!("{HEADER}\nBaner,18.559,73.786,lots,31.0,0.3,5000,0.35,Low Stress\n");
        assert!(matches!(
            from_reader(csv.as_bytes()),
            Err(LoadError::Csv(_))
        ));
    }

    #[test]
    fn blank_metric_cell_keeps_every_row() {
        let csv = format!(
            "{HEADER}\n\
             A,18.5,73.8,50,,0.2,1000,0.7,High Stress\n\
             B,18.6,73.9,10,30,0.3,900,0.3,Low Stress\n"
        );
        let dataset = from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert!(dataset.wards()[0].heat.is_nan());
        assert!((dataset.wards()[1].heat - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn header_only_file_is_loaded_but_empty() {
        let dataset = from_reader(format!("{HEADER}\n").as_bytes()).unwrap();
        assert!(dataset.is_available());
        assert!(dataset.is_empty());
    }

    #[test]
    fn missing_file_becomes_unavailable() {
        let dataset = load(Path::new("does/not/exist/wards.csv"));
        assert_eq!(dataset, Dataset::Unavailable);
        assert!(dataset.is_empty());
        assert!(dataset.wards().is_empty());
        assert!(dataset.columns().is_empty());
    }

    #[test]
    fn loads_bundled_sample_data() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../data/pune_environmental_data.csv");
        let dataset = try_load(&path).unwrap();
        assert_eq!(dataset.len(), 12);
        assert_eq!(
            dataset.wards().iter().filter(|w| w.is_high_stress()).count(),
            3
        );
        assert!((dataset.wards()[0].lat - 18.5089).abs() < 1e-9);
    }

    #[test]
    fn try_load_reports_io_error() {
        assert!(matches!(
            try_load(Path::new("does/not/exist/wards.csv")),
            Err(LoadError::Io { .. })
        ));
    }
}
