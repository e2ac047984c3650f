//! Row normalization: raw optional-field records into [`WardRecord`]s.

use serde::Deserialize;
use stress_map_ward_models::{
    DEFAULT_POPULATION, DEFAULT_TOTAL_BUDGET, StressZone, WardRecord,
};

use crate::LoadError;
use crate::schema::{ColumnPresence, CoordinateColumn, DatasetSchema};

/// A CSV row exactly as read, before aliasing and defaulting.
///
/// Every field is optional: a column can be missing from the file or a
/// cell can be blank. [`normalize`] decides which of those is an error;
/// only identity, coordinates and zone label are required per row.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct RawWardRecord {
    pub ward: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub pm25: Option<f64>,
    pub heat: Option<f64>,
    pub green_cover: Option<f64>,
    pub pop_density: Option<f64>,
    pub esi: Option<f64>,
    pub stress_zone: Option<String>,
    /// Read as a float so exports like `52000.0` are accepted.
    pub population: Option<f64>,
    pub total_budget: Option<f64>,
}

/// Converts one raw row into a canonical record.
///
/// `row` is the 1-based data row number used in error messages.
///
/// # Errors
///
/// * [`LoadError::MissingValue`] if a `ward`, coordinate or `stress_zone`
///   cell is blank
/// * [`LoadError::MissingColumn`] if the schema has no coordinate source
/// * [`LoadError::InvalidValue`] if `population` is negative or not finite
pub fn normalize(
    raw: RawWardRecord,
    schema: &DatasetSchema,
    row: usize,
) -> Result<WardRecord, LoadError> {
    let lat = match schema.lat {
        CoordinateColumn::Native => required(raw.lat, "lat", row)?,
        CoordinateColumn::Aliased => required(raw.latitude, "latitude", row)?,
        CoordinateColumn::Missing => return Err(LoadError::MissingColumn { column: "lat" }),
    };
    let lon = match schema.lon {
        CoordinateColumn::Native => required(raw.lon, "lon", row)?,
        CoordinateColumn::Aliased => required(raw.longitude, "longitude", row)?,
        CoordinateColumn::Missing => return Err(LoadError::MissingColumn { column: "lon" }),
    };

    let population = match schema.population {
        ColumnPresence::Absent => DEFAULT_POPULATION,
        ColumnPresence::Present => {
            raw.population
                .map_or(Ok(0), |value| parse_population(value, row))?
        }
    };
    let total_budget = match schema.total_budget {
        ColumnPresence::Absent => DEFAULT_TOTAL_BUDGET,
        ColumnPresence::Present => raw.total_budget.unwrap_or(0.0),
    };

    Ok(WardRecord {
        ward: required(raw.ward, "ward", row)?,
        lat,
        lon,
        pm25: metric(raw.pm25),
        heat: metric(raw.heat),
        green_cover: metric(raw.green_cover),
        pop_density: metric(raw.pop_density),
        esi: metric(raw.esi),
        stress_zone: StressZone::from(required(raw.stress_zone, "stress_zone", row)?),
        population,
        total_budget,
    })
}

/// Blank metric cells load as NaN and are caught by the queries that read
/// them.
fn metric(value: Option<f64>) -> f64 {
    value.unwrap_or(f64::NAN)
}

fn required<T>(value: Option<T>, column: &'static str, row: usize) -> Result<T, LoadError> {
    value.ok_or(LoadError::MissingValue { row, column })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_population(value: f64, row: usize) -> Result<u64, LoadError> {
    if !value.is_finite() || value < 0.0 {
        return Err(LoadError::InvalidValue {
            row,
            column: "population",
            value: value.to_string(),
        });
    }
    Ok(value.round() as u64)
}
