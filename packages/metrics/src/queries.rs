//! Read-only queries over the ward dataset.
//!
//! Each function takes the loaded [`Dataset`] by reference and computes its
//! result from scratch. An unavailable dataset behaves as zero rows.

use std::cmp::Ordering;

use stress_map_dataset::Dataset;
use stress_map_metrics_models::{
    MapMarker, MarkerDetail, Overview, ScatterPoint, WardTableRow, ZoneCount, ZoneSeries,
};
use stress_map_ward_models::{StressZone, WardRecord};

use crate::MetricsError;
use crate::format::{mean, round_to, thousands};

/// Smallest marker radius in pixels.
pub const MIN_MARKER_RADIUS: f64 = 8.0;

/// Largest marker radius in pixels.
pub const MAX_MARKER_RADIUS: f64 = 25.0;

/// Headline counts and averages.
///
/// # Errors
///
/// Returns [`MetricsError::NonFinite`] if the PM2.5 or ESI mean is NaN or
/// infinite.
pub fn overview(dataset: &Dataset) -> Result<Overview, MetricsError> {
    let wards = dataset.wards();

    let count = |zone: &StressZone| wards.iter().filter(|w| &w.stress_zone == zone).count() as u64;

    let avg_pm25 = crate::finite("avg_pm25", mean(wards.iter().map(|w| w.pm25)))?;
    let avg_esi = crate::finite("avg_esi", mean(wards.iter().map(|w| w.esi)))?;

    Ok(Overview {
        total_wards: wards.len() as u64,
        high_stress_count: count(&StressZone::High),
        medium_stress_count: count(&StressZone::Medium),
        low_stress_count: count(&StressZone::Low),
        avg_pm25: round_to(avg_pm25, 1),
        avg_esi: round_to(avg_esi, 3),
    })
}

/// Ward counts per zone label, in order of first appearance.
#[must_use]
pub fn stress_distribution(dataset: &Dataset) -> Vec<ZoneCount> {
    let mut counts: Vec<ZoneCount> = Vec::new();

    for ward in dataset.wards() {
        if let Some(entry) = counts.iter_mut().find(|c| c.zone == ward.stress_zone) {
            entry.count += 1;
        } else {
            counts.push(ZoneCount {
                zone: ward.stress_zone.clone(),
                count: 1,
            });
        }
    }

    counts
}

/// PM2.5 against green cover, one series per known zone (Low, Medium,
/// High). Zones without wards are left out.
#[must_use]
pub fn pm25_vs_green(dataset: &Dataset) -> Vec<ZoneSeries> {
    StressZone::KNOWN
        .into_iter()
        .filter_map(|zone| {
            let points: Vec<ScatterPoint> = dataset
                .wards()
                .iter()
                .filter(|w| w.stress_zone == zone)
                .map(|w| ScatterPoint {
                    green_cover_pct: w.green_cover * 100.0,
                    pm25: w.pm25,
                    ward: w.ward.clone(),
                })
                .collect();

            (!points.is_empty()).then_some(ZoneSeries { zone, points })
        })
        .collect()
}

/// All wards ranked by ESI, highest first.
///
/// The sort is stable, so wards with equal ESI keep their source order.
/// NaN ESI values sort last.
#[must_use]
pub fn ward_table(dataset: &Dataset) -> Vec<WardTableRow> {
    let mut rows: Vec<WardTableRow> = dataset.wards().iter().map(WardTableRow::from).collect();
    rows.sort_by(|a, b| esi_descending(a.esi, b.esi));
    rows
}

fn esi_descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// One circle marker per ward, in source order.
///
/// # Errors
///
/// Returns [`MetricsError::NonFinite`] if a ward's coordinates are NaN or
/// infinite, since it cannot be placed on the map.
pub fn map_markers(dataset: &Dataset) -> Result<Vec<MapMarker>, MetricsError> {
    dataset.wards().iter().map(map_marker).collect()
}

fn map_marker(ward: &WardRecord) -> Result<MapMarker, MetricsError> {
    let lat = crate::finite("lat", ward.lat)?;
    let lon = crate::finite("lon", ward.lon)?;

    Ok(MapMarker {
        ward: ward.ward.clone(),
        lat,
        lon,
        radius: marker_radius(ward.esi),
        color: ward.stress_zone.color().to_string(),
        zone: ward.stress_zone.clone(),
        detail: marker_detail(ward),
    })
}

/// Circle radius for a ward with the given ESI: `5 + esi * 20`, kept
/// within [`MIN_MARKER_RADIUS`]..=[`MAX_MARKER_RADIUS`].
///
/// A NaN ESI yields the maximum radius.
#[must_use]
#[allow(clippy::manual_clamp)]
pub fn marker_radius(esi: f64) -> f64 {
    // `f64::clamp` would propagate NaN
    esi.mul_add(20.0, 5.0)
        .min(MAX_MARKER_RADIUS)
        .max(MIN_MARKER_RADIUS)
}

fn marker_detail(ward: &WardRecord) -> MarkerDetail {
    MarkerDetail {
        name: ward.ward.clone(),
        coordinates: format!("({:.4}, {:.4})", ward.lat, ward.lon),
        pm25: format!("{:.1} µg/m³", ward.pm25),
        heat: format!("{:.1}°C", ward.heat),
        green_cover: format!("{:.1}%", ward.green_cover * 100.0),
        pop_density: format!("{:.0}/km²", ward.pop_density),
        esi: format!("{:.3}", ward.esi),
        stress_zone: ward.stress_zone.label().to_string(),
        population: thousands(ward.population),
    }
}
