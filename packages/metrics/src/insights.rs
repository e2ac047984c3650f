//! Narrative insight cards.
//!
//! Five cards are always produced, in [`InsightKind::ALL`] order. An empty
//! dataset yields the same five cards with zero figures.

use stress_map_dataset::Dataset;
use stress_map_metrics_models::{InsightCard, InsightKind};
use stress_map_ward_models::WardRecord;

use crate::MetricsError;
use crate::format::{mean, percent_of};

/// Recommended minimum green cover fraction.
pub const GREEN_COVER_TARGET: f64 = 0.25;

/// Rupees per crore.
pub const RUPEES_PER_CRORE: f64 = 10_000_000.0;

const PEOPLE_PER_MILLION: f64 = 1_000_000.0;

/// Ward name shown on the hotspot card when there are no wards.
const NO_WARD: &str = "N/A";

/// Builds the five insight cards.
///
/// # Errors
///
/// Returns [`MetricsError::NonFinite`] if any mean or sum the cards depend
/// on is NaN or infinite.
pub fn insights(dataset: &Dataset) -> Result<[InsightCard; 5], MetricsError> {
    let wards = dataset.wards();

    Ok([
        critical_zones(wards),
        pollution_hotspot(wards)?,
        green_cover_gap(wards)?,
        population_at_risk(wards)?,
        budget_strategy(wards)?,
    ])
}

#[allow(clippy::cast_precision_loss)]
fn critical_zones(wards: &[WardRecord]) -> InsightCard {
    let critical = wards.iter().filter(|w| w.is_high_stress()).count();
    let pct = percent_of(critical as f64, wards.len() as f64);

    InsightCard::new(
        InsightKind::Critical,
        format!("{critical} wards ({pct:.0}%) need urgent intervention"),
        "High ESI > 0.65".to_string(),
        critical as f64,
    )
}

fn pollution_hotspot(wards: &[WardRecord]) -> Result<InsightCard, MetricsError> {
    let avg_pm25 = crate::finite("avg_pm25", mean(wards.iter().map(|w| w.pm25)))?;

    let (name, worst) = worst_pm25(wards).map_or((NO_WARD, 0.0), |w| (w.ward.as_str(), w.pm25));
    let pct_above = if avg_pm25 > 0.0 {
        (worst / avg_pm25 - 1.0) * 100.0
    } else {
        0.0
    };

    Ok(InsightCard::new(
        InsightKind::Pollution,
        format!("{name}: {worst:.1} µg/m³"),
        format!("{pct_above:.0}% above avg"),
        worst,
    ))
}

/// First ward holding the maximum PM2.5.
fn worst_pm25(wards: &[WardRecord]) -> Option<&WardRecord> {
    wards.iter().fold(None, |best: Option<&WardRecord>, w| match best {
        Some(b) if w.pm25 <= b.pm25 => Some(b),
        _ => Some(w),
    })
}

fn green_cover_gap(wards: &[WardRecord]) -> Result<InsightCard, MetricsError> {
    let avg_green = crate::finite("avg_green_cover", mean(wards.iter().map(|w| w.green_cover)))?;
    let gap = (GREEN_COVER_TARGET - avg_green) * 100.0;

    Ok(InsightCard::new(
        InsightKind::Green,
        format!(
            "Current: {:.1}% | Target: {:.0}%",
            avg_green * 100.0,
            GREEN_COVER_TARGET * 100.0
        ),
        format!("Need {gap:+.1}%"),
        gap,
    ))
}

#[allow(clippy::cast_precision_loss)]
fn population_at_risk(wards: &[WardRecord]) -> Result<InsightCard, MetricsError> {
    let at_risk: u64 = wards
        .iter()
        .filter(|w| w.is_high_stress())
        .map(|w| w.population)
        .sum();
    let millions = crate::finite("population_at_risk", at_risk as f64 / PEOPLE_PER_MILLION)?;

    Ok(InsightCard::new(
        InsightKind::Population,
        format!("{millions:.1}M people in critical zones"),
        "Urgent action".to_string(),
        millions,
    ))
}

fn budget_strategy(wards: &[WardRecord]) -> Result<InsightCard, MetricsError> {
    let critical_budget = crate::finite(
        "critical_budget",
        wards
            .iter()
            .filter(|w| w.is_high_stress())
            .map(|w| w.total_budget)
            .sum(),
    )?;
    let total_budget = crate::finite("total_budget", wards.iter().map(|w| w.total_budget).sum())?;

    let crores = critical_budget / RUPEES_PER_CRORE;
    let pct = percent_of(critical_budget, total_budget);

    Ok(InsightCard::new(
        InsightKind::Budget,
        format!("₹{crores:.1}Cr to critical zones"),
        format!("{pct:.0}% of total"),
        crores,
    ))
}
