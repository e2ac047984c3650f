//! Header inspection for the ward dataset.
//!
//! The header row is read once and turned into a [`DatasetSchema`] so that
//! column presence is decided per file, never per row. Row normalization
//! then matches on these enums instead of probing for columns.

use csv::StringRecord;

use crate::LoadError;

/// Columns every ward dataset must carry (besides coordinates).
pub const REQUIRED_COLUMNS: &[&str] = &[
    "ward",
    "pm25",
    "heat",
    "green_cover",
    "pop_density",
    "esi",
    "stress_zone",
];

/// Whether an optional column exists in the source header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnPresence {
    /// Column exists; every row must supply a value.
    Present,
    /// Column is missing from the whole file; every row gets the default.
    Absent,
}

impl ColumnPresence {
    const fn of(present: bool) -> Self {
        if present { Self::Present } else { Self::Absent }
    }
}

/// Which source column a coordinate axis is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateColumn {
    /// The short name (`lat` / `lon`).
    Native,
    /// The long alias (`latitude` / `longitude`), used when the short name
    /// is absent.
    Aliased,
    /// Neither name is present.
    Missing,
}

impl CoordinateColumn {
    const fn resolve(native: bool, alias: bool) -> Self {
        if native {
            Self::Native
        } else if alias {
            Self::Aliased
        } else {
            Self::Missing
        }
    }
}

/// Column layout of a ward dataset, derived from its header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSchema {
    /// Header names in file order, trimmed.
    pub columns: Vec<String>,
    /// Source of the latitude values.
    pub lat: CoordinateColumn,
    /// Source of the longitude values.
    pub lon: CoordinateColumn,
    /// Whether the `population` column exists.
    pub population: ColumnPresence,
    /// Whether the `total_budget` column exists.
    pub total_budget: ColumnPresence,
}

impl DatasetSchema {
    /// Builds a schema from a CSV header record.
    #[must_use]
    pub fn from_headers(headers: &StringRecord) -> Self {
        let columns: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();
        let has = |name: &str| columns.iter().any(|c| c == name);

        Self {
            lat: CoordinateColumn::resolve(has("lat"), has("latitude")),
            lon: CoordinateColumn::resolve(has("lon"), has("longitude")),
            population: ColumnPresence::of(has("population")),
            total_budget: ColumnPresence::of(has("total_budget")),
            columns,
        }
    }

    /// Checks that every column needed to build a ward record is present.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::MissingColumn`] naming the first absent column.
    pub fn validate(&self) -> Result<(), LoadError> {
        for &column in REQUIRED_COLUMNS {
            if !self.columns.iter().any(|c| c == column) {
                return Err(LoadError::MissingColumn { column });
            }
        }
        if self.lat == CoordinateColumn::Missing {
            return Err(LoadError::MissingColumn { column: "lat" });
        }
        if self.lon == CoordinateColumn::Missing {
            return Err(LoadError::MissingColumn { column: "lon" });
        }
        Ok(())
    }

    /// Names of optional columns that will be filled with defaults.
    #[must_use]
    pub fn defaulted_columns(&self) -> Vec<&'static str> {
        let mut defaulted = Vec::new();
        if self.population == ColumnPresence::Absent {
            defaulted.push("population");
        }
        if self.total_budget == ColumnPresence::Absent {
            defaulted.push("total_budget");
        }
        defaulted
    }
}
