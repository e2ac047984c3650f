#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API response types for the stress map server.
//!
//! Chart endpoints return Plotly-compatible figure objects (`data` +
//! `layout`) so the dashboard can hand them straight to `Plotly.newPlot`.
//! These types are separate from the metrics result types to allow
//! independent evolution of the API contract.

use serde::{Deserialize, Serialize};
use stress_map_metrics_models::{ZoneCount, ZoneSeries};

/// Chart height in pixels used by every dashboard figure.
pub const CHART_HEIGHT: u32 = 450;

/// A Plotly figure: traces plus layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotlyFigure {
    /// Traces to draw.
    pub data: Vec<Trace>,
    /// Figure layout.
    pub layout: Layout,
}

impl PlotlyFigure {
    /// A figure with no traces and an empty layout (`{"data": [], "layout":
    /// {}}`), served when there is no data to chart.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Pie chart of ward counts per stress zone.
    ///
    /// Slice colors follow the zone, not the slice position.
    #[must_use]
    pub fn stress_pie(counts: &[ZoneCount]) -> Self {
        let pie = PieTrace {
            labels: counts.iter().map(|c| c.zone.label().to_string()).collect(),
            values: counts.iter().map(|c| c.count).collect(),
            marker: PieMarker {
                colors: counts.iter().map(|c| c.zone.color().to_string()).collect(),
            },
            textinfo: "label+percent+value".to_string(),
        };

        Self {
            data: vec![Trace::Pie(pie)],
            layout: Layout {
                title: Some(Title::new("Stress Zone Distribution")),
                height: Some(CHART_HEIGHT),
                ..Layout::default()
            },
        }
    }

    /// Scatter of PM2.5 against green cover, one trace per zone series.
    #[must_use]
    pub fn pm25_green_scatter(series: &[ZoneSeries]) -> Self {
        let data = series
            .iter()
            .map(|s| {
                Trace::Scatter(ScatterTrace {
                    x: s.points.iter().map(|p| p.green_cover_pct).collect(),
                    y: s.points.iter().map(|p| p.pm25).collect(),
                    mode: "markers".to_string(),
                    name: s.zone.label().to_string(),
                    marker: ScatterMarker {
                        size: 10,
                        color: s.zone.color().to_string(),
                        opacity: 0.7,
                    },
                    text: s.points.iter().map(|p| p.ward.clone()).collect(),
                    hovertemplate:
                        "<b>%{text}</b><br>Green: %{x:.1f}%<br>PM2.5: %{y:.1f}<extra></extra>"
                            .to_string(),
                })
            })
            .collect();

        Self {
            data,
            layout: Layout {
                title: Some(Title::new("PM2.5 vs Green Cover")),
                height: Some(CHART_HEIGHT),
                xaxis: Some(Axis {
                    title: Title::new("Green Cover (%)"),
                }),
                yaxis: Some(Axis {
                    title: Title::new("PM2.5 (µg/m³)"),
                }),
            },
        }
    }
}

/// A single Plotly trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    /// Pie chart.
    Pie(PieTrace),
    /// Scatter plot.
    Scatter(ScatterTrace),
}

/// Pie trace attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieTrace {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    pub marker: PieMarker,
    pub textinfo: String,
}

/// Per-slice colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieMarker {
    pub colors: Vec<String>,
}

/// Scatter trace attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterTrace {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub mode: String,
    pub name: String,
    pub marker: ScatterMarker,
    /// Hover labels, one per point.
    pub text: Vec<String>,
    pub hovertemplate: String,
}

/// Scatter point styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterMarker {
    pub size: u32,
    pub color: String,
    pub opacity: f64,
}

/// Figure layout. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
}

/// A chart or axis title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

/// Axis settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Axis {
    pub title: Title,
}

/// Body returned in place of a result when a query fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable failure reason.
    pub error: String,
}

impl ApiError {
    /// Wraps an error message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Whether the ward dataset loaded.
    pub data_available: bool,
    /// Number of wards loaded.
    pub wards: u64,
}

/// A question and answer shown in the dashboard FAQ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}
