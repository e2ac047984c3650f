#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result types for the ward stress metrics engine.
//!
//! Every query in `stress_map_metrics` returns one of these plain values.
//! Field names are kept in `snake_case` on the wire because the dashboard
//! frontend reads them directly.

use serde::{Deserialize, Serialize};
use stress_map_ward_models::{StressZone, WardRecord};

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    /// Number of wards in the dataset.
    pub total_wards: u64,
    /// Wards labelled `High Stress`.
    pub high_stress_count: u64,
    /// Wards labelled `Medium Stress`.
    pub medium_stress_count: u64,
    /// Wards labelled `Low Stress`.
    pub low_stress_count: u64,
    /// Mean PM2.5, rounded to one decimal.
    pub avg_pm25: f64,
    /// Mean ESI, rounded to three decimals.
    pub avg_esi: f64,
}

/// Number of wards carrying one stress zone label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneCount {
    /// Zone label.
    pub zone: StressZone,
    /// Number of wards with that label.
    pub count: u64,
}

/// One ward on the PM2.5 vs green cover scatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    /// Green cover as a percentage (`green_cover * 100`).
    pub green_cover_pct: f64,
    /// PM2.5 concentration.
    pub pm25: f64,
    /// Ward name, used as the point label.
    pub ward: String,
}

/// All scatter points of one stress zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneSeries {
    /// Zone this series covers.
    pub zone: StressZone,
    /// Points in source order. Never empty.
    pub points: Vec<ScatterPoint>,
}

/// A row of the ward ranking table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WardTableRow {
    pub ward: String,
    pub pm25: f64,
    pub heat: f64,
    pub pop_density: f64,
    pub green_cover: f64,
    pub esi: f64,
    pub stress_zone: StressZone,
}

impl From<&WardRecord> for WardTableRow {
    fn from(record: &WardRecord) -> Self {
        Self {
            ward: record.ward.clone(),
            pm25: record.pm25,
            heat: record.heat,
            pop_density: record.pop_density,
            green_cover: record.green_cover,
            esi: record.esi,
            stress_zone: record.stress_zone.clone(),
        }
    }
}

/// Display-ready values for a ward's map popup.
///
/// Numbers are pre-formatted to the precision the dashboard shows so the
/// HTML layer only has to lay them out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerDetail {
    /// Ward name.
    pub name: String,
    /// `(lat, lon)` to four decimals.
    pub coordinates: String,
    /// PM2.5 with unit, e.g. `54.2 µg/m³`.
    pub pm25: String,
    /// Heat with unit, e.g. `34.1°C`.
    pub heat: String,
    /// Green cover as a percentage, e.g. `18.0%`.
    pub green_cover: String,
    /// Population density, e.g. `12000/km²`.
    pub pop_density: String,
    /// ESI to three decimals.
    pub esi: String,
    /// Zone label.
    pub stress_zone: String,
    /// Population with thousands separators, e.g. `50,000`.
    pub population: String,
}

/// A circle marker for one ward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    /// Ward name.
    pub ward: String,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
    /// Circle radius in pixels, always within `[8, 25]`.
    pub radius: f64,
    /// Stroke and fill color.
    pub color: String,
    /// Zone label.
    pub zone: StressZone,
    /// Popup contents.
    pub detail: MarkerDetail,
}

/// Category of an insight card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Share of high stress wards.
    Critical,
    /// Ward with the worst PM2.5.
    Pollution,
    /// Mean green cover vs the 25% target.
    Green,
    /// Residents of high stress wards.
    Population,
    /// Budget allocated to high stress wards.
    Budget,
}

impl InsightKind {
    /// All kinds in the order cards are returned.
    pub const ALL: [Self; 5] = [
        Self::Critical,
        Self::Pollution,
        Self::Green,
        Self::Population,
        Self::Budget,
    ];

    /// Emoji shown on the card.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Critical => "🚨",
            Self::Pollution => "💨",
            Self::Green => "🌳",
            Self::Population => "👥",
            Self::Budget => "💰",
        }
    }

    /// Card heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Critical => "Critical Zones",
            Self::Pollution => "Pollution Hotspot",
            Self::Green => "Green Cover Gap",
            Self::Population => "Population at Risk",
            Self::Budget => "Budget Strategy",
        }
    }
}

/// A single narrative insight derived from the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightCard {
    /// Card category.
    #[serde(rename = "type")]
    pub kind: InsightKind,
    /// Emoji icon.
    pub icon: String,
    /// Heading.
    pub title: String,
    /// Main sentence.
    pub text: String,
    /// Call to action or supporting figure.
    pub action: String,
    /// The headline number behind the card (count, percentage, millions,
    /// or crores depending on `kind`).
    pub value: f64,
}

impl InsightCard {
    /// Builds a card with the icon and title for `kind`.
    #[must_use]
    pub fn new(kind: InsightKind, text: String, action: String, value: f64) -> Self {
        Self {
            kind,
            icon: kind.icon().to_string(),
            title: kind.title().to_string(),
            text,
            action,
            value,
        }
    }
}
