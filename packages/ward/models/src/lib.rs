#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Ward record and stress zone types.
//!
//! This crate defines the canonical per-ward record that the dataset
//! loader produces and every metrics query consumes. Stress zones arrive
//! precomputed in the source data and are carried through verbatim; the
//! documented ESI thresholds are exposed for legends and FAQ copy only.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Population assigned to every ward when the source has no `population`
/// column.
pub const DEFAULT_POPULATION: u64 = 50_000;

/// Budget assigned to every ward when the source has no `total_budget`
/// column.
pub const DEFAULT_TOTAL_BUDGET: f64 = 100_000_000.0;

/// ESI above which a ward is documented as high stress.
pub const HIGH_STRESS_ESI: f64 = 0.65;

/// ESI at or above which a ward is documented as medium stress.
pub const MEDIUM_STRESS_ESI: f64 = 0.45;

/// Marker color for labels outside the known taxonomy.
pub const UNKNOWN_ZONE_COLOR: &str = "#999";

/// Environmental stress bucket assigned to a ward upstream.
///
/// Labels that don't match one of the three known zones are kept as
/// [`StressZone::Other`] so they still group and render, just without a
/// zone color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(from = "String", into = "String")]
pub enum StressZone {
    /// ESI > 0.65: immediate intervention.
    #[strum(serialize = "High Stress")]
    High,
    /// ESI 0.45-0.65: preventive measures.
    #[strum(serialize = "Medium Stress")]
    Medium,
    /// ESI < 0.45: maintenance only.
    #[strum(serialize = "Low Stress")]
    Low,
    /// Any other label found in the source data.
    #[strum(default)]
    Other(String),
}

impl StressZone {
    /// Known zones in chart order (lowest stress first).
    pub const KNOWN: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Returns the label exactly as it appears in the source data.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::High => "High Stress",
            Self::Medium => "Medium Stress",
            Self::Low => "Low Stress",
            Self::Other(label) => label,
        }
    }

    /// Returns the hex color used for this zone on charts and the map.
    #[must_use]
    pub const fn color(&self) -> &'static str {
        match self {
            Self::High => "#e74c3c",
            Self::Medium => "#f39c12",
            Self::Low => "#2ecc71",
            Self::Other(_) => UNKNOWN_ZONE_COLOR,
        }
    }

    /// Parses a source label, keeping unknown labels as [`Self::Other`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        trimmed
            .parse()
            .unwrap_or_else(|_| Self::Other(trimmed.to_string()))
    }

    /// Returns the zone the documented thresholds would assign to `esi`.
    ///
    /// Never used to override a source label; a ward whose label disagrees
    /// with its ESI keeps its label.
    #[must_use]
    pub fn documented_for_esi(esi: f64) -> Self {
        if esi > HIGH_STRESS_ESI {
            Self::High
        } else if esi >= MEDIUM_STRESS_ESI {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl From<String> for StressZone {
    fn from(value: String) -> Self {
        Self::from_label(&value)
    }
}

impl From<StressZone> for String {
    fn from(zone: StressZone) -> Self {
        match zone {
            StressZone::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

/// A fully normalized ward row.
///
/// Every field is populated: coordinate aliases have been resolved and
/// absent `population`/`total_budget` columns have been filled with
/// [`DEFAULT_POPULATION`] and [`DEFAULT_TOTAL_BUDGET`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WardRecord {
    /// Ward name, unique within the dataset.
    pub ward: String,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
    /// PM2.5 concentration in µg/m³.
    pub pm25: f64,
    /// Temperature proxy in °C.
    pub heat: f64,
    /// Vegetated fraction of the ward area, in `[0, 1]`.
    pub green_cover: f64,
    /// Residents per km².
    pub pop_density: f64,
    /// Environmental Stress Index, nominally in `[0, 1]`.
    pub esi: f64,
    /// Stress zone as labelled by the source.
    pub stress_zone: StressZone,
    /// Resident count.
    pub population: u64,
    /// Allocated budget in rupees.
    pub total_budget: f64,
}

impl WardRecord {
    /// Whether this ward is labelled high stress.
    #[must_use]
    pub const fn is_high_stress(&self) -> bool {
        matches!(self.stress_zone, StressZone::High)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_labels() {
        assert_eq!(StressZone::from_label("High Stress"), StressZone::High);
        assert_eq!(StressZone::from_label("Medium Stress"), StressZone::Medium);
        assert_eq!(StressZone::from_label(" Low Stress "), StressZone::Low);
    }

    #[test]
    fn keeps_unknown_labels_verbatim() {
        let zone = StressZone::from_label("Severe");
        assert_eq!(zone, StressZone::Other("Severe".to_string()));
        assert_eq!(zone.label(), "Severe");
        assert_eq!(zone.color(), UNKNOWN_ZONE_COLOR);
    }

    #[test]
    fn label_roundtrips_through_string() {
        for zone in StressZone::KNOWN {
            let label: String = zone.clone().into();
            assert_eq!(StressZone::from(label), zone);
        }
    }

    #[test]
    fn displays_source_label() {
        assert_eq!(StressZone::High.to_string(), "High Stress");
        assert_eq!(StressZone::Low.to_string(), "Low Stress");
        assert_eq!(StressZone::from_label("Severe").to_string(), "Severe");
        for zone in StressZone::KNOWN {
            assert_eq!(zone.to_string(), zone.label());
        }
    }

    #[test]
    fn serializes_as_source_label() {
        let json = serde_json::to_string(&StressZone::Medium).unwrap();
        assert_eq!(json, "\"Medium Stress\"");
        let zone: StressZone = serde_json::from_str("\"High Stress\"").unwrap();
        assert_eq!(zone, StressZone::High);
    }

    #[test]
    fn documented_thresholds() {
        assert_eq!(StressZone::documented_for_esi(0.66), StressZone::High);
        assert_eq!(StressZone::documented_for_esi(0.65), StressZone::Medium);
        assert_eq!(StressZone::documented_for_esi(0.45), StressZone::Medium);
        assert_eq!(StressZone::documented_for_esi(0.449), StressZone::Low);
    }

    #[test]
    fn zone_colors() {
        assert_eq!(StressZone::High.color(), "#e74c3c");
        assert_eq!(StressZone::Medium.color(), "#f39c12");
        assert_eq!(StressZone::Low.color(), "#2ecc71");
    }
}
