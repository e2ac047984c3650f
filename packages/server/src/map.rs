//! Leaflet map rendering for `GET /api/map`.
//!
//! Markers come from the metrics engine as structured values; this module
//! lays them out as popup/tooltip HTML and embeds them in a standalone
//! Leaflet page with a fixed legend.

use serde::Serialize;
use stress_map_metrics_models::MapMarker;

/// Map center (Pune).
pub const MAP_CENTER: (f64, f64) = (18.52, 73.85);

/// Initial zoom level.
pub const MAP_ZOOM: u8 = 11;

const LEAFLET_VERSION: &str = "1.9.4";

const LEGEND_HTML: &str = r#"<div style="position: fixed; bottom: 50px; right: 10px; width: 280px; background-color: white; border: 2px solid grey; z-index: 9999; font-size: 12px; padding: 10px; border-radius: 5px; box-shadow: 0 0 15px rgba(0,0,0,0.2);">
    <h4 style="margin: 0 0 10px 0; color: #2c3e50; border-bottom: 2px solid #e74c3c; padding-bottom: 5px;">PUNE DISTRICT - ENVIRONMENTAL STRESS ZONES</h4>
    <p style="margin: 8px 0; font-weight: bold; color: #2c3e50;">STRESS LEVELS:</p>
    <div style="margin-bottom: 10px;">
        <div style="display: flex; align-items: center; margin: 5px 0;">
            <div style="width: 15px; height: 15px; background: #e74c3c; border-radius: 50%; margin-right: 8px;"></div>
            <span><b>High Stress</b> - Immediate Intervention (ESI &gt; 0.65)</span>
        </div>
        <div style="display: flex; align-items: center; margin: 5px 0;">
            <div style="width: 15px; height: 15px; background: #f39c12; border-radius: 50%; margin-right: 8px;"></div>
            <span><b>Medium Stress</b> - Preventive Measures (ESI 0.45-0.65)</span>
        </div>
        <div style="display: flex; align-items: center; margin: 5px 0;">
            <div style="width: 15px; height: 15px; background: #2ecc71; border-radius: 50%; margin-right: 8px;"></div>
            <span><b>Low Stress</b> - Maintenance Only (ESI &lt; 0.45)</span>
        </div>
    </div>
    <p style="margin: 8px 0; font-weight: bold; color: #2c3e50;">CIRCLE SIZE:</p>
    <p style="margin: 5px 0; font-size: 11px;">&bull; Larger circles = Higher ESI (more stressed)<br>&bull; Smaller circles = Lower ESI (healthier)</p>
</div>"#;

/// Marker data handed to the page script.
#[derive(Debug, Serialize)]
struct LeafletMarker {
    lat: f64,
    lon: f64,
    radius: f64,
    color: String,
    popup: String,
    tooltip: String,
}

impl From<&MapMarker> for LeafletMarker {
    fn from(marker: &MapMarker) -> Self {
        Self {
            lat: marker.lat,
            lon: marker.lon,
            radius: marker.radius,
            color: marker.color.clone(),
            popup: popup_html(marker),
            tooltip: tooltip_html(marker),
        }
    }
}

/// Renders the full map page.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if the marker data cannot be encoded.
pub fn render_map(markers: &[MapMarker]) -> Result<String, serde_json::Error> {
    let leaflet: Vec<LeafletMarker> = markers.iter().map(LeafletMarker::from).collect();
    // `</` would end the inline script early
    let markers_json = serde_json::to_string(&leaflet)?.replace("</", "<\\/");
    let (lat, lon) = MAP_CENTER;

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <link rel="stylesheet" href="https://unpkg.com/leaflet@{version}/dist/leaflet.css">
    <script src="https://unpkg.com/leaflet@{version}/dist/leaflet.js"></script>
    <style>html, body, #map {{ height: 100%; margin: 0; }}</style>
</head>
<body>
    <div id="map"></div>
    {legend}
    <script>
        const markers = {markers_json};
        const map = L.map('map').setView([{lat}, {lon}], {zoom});
        L.tileLayer('https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png', {{
            maxZoom: 19,
            attribution: '&copy; OpenStreetMap contributors'
        }}).addTo(map);
        for (const m of markers) {{
            L.circleMarker([m.lat, m.lon], {{
                radius: m.radius,
                color: m.color,
                fill: true,
                fillColor: m.color,
                fillOpacity: 0.7,
                weight: 2
            }})
                .bindPopup(m.popup, {{ maxWidth: 350 }})
                .bindTooltip(m.tooltip)
                .addTo(map);
        }}
    </script>
</body>
</html>"#,
        version = LEAFLET_VERSION,
        legend = LEGEND_HTML,
        zoom = MAP_ZOOM,
    ))
}

/// Small inline error shown in place of the map.
#[must_use]
pub fn error_fragment(message: &str) -> String {
    format!(
        r#"<div style="color: red; padding: 2rem;">Error: {}</div>"#,
        escape_html(message)
    )
}

fn popup_html(marker: &MapMarker) -> String {
    let d = &marker.detail;
    let color = escape_html(&marker.color);

    format!(
        r#"<div style="font-family: Arial, sans-serif; width: 300px;">
    <h4 style="margin: 5px 0; color: #2c3e50; border-bottom: 2px solid {color}; padding-bottom: 5px;">{name}</h4>
    <div style="margin-top: 10px;">
        <p style="margin: 5px 0;"><b>Geographic Location:</b></p>
        <div style="background: #f5f5f5; padding: 8px; border-radius: 4px; margin: 5px 0;">
            <p style="margin: 3px 0; font-size: 12px;"><b>Coordinates:</b> {coordinates}</p>
        </div>
    </div>
    <div style="margin-top: 10px;">
        <p style="margin: 5px 0;"><b>Environmental Metrics:</b></p>
        <table style="width: 100%; font-size: 12px; border-collapse: collapse;">
            <tr style="background: #f9f9f9;"><td style="padding: 5px; border: 1px solid #ddd;"><b>PM2.5</b></td><td style="padding: 5px; border: 1px solid #ddd;">{pm25}</td></tr>
            <tr><td style="padding: 5px; border: 1px solid #ddd;"><b>Heat</b></td><td style="padding: 5px; border: 1px solid #ddd;">{heat}</td></tr>
            <tr style="background: #f9f9f9;"><td style="padding: 5px; border: 1px solid #ddd;"><b>Green Cover</b></td><td style="padding: 5px; border: 1px solid #ddd;">{green_cover}</td></tr>
            <tr><td style="padding: 5px; border: 1px solid #ddd;"><b>Population Density</b></td><td style="padding: 5px; border: 1px solid #ddd;">{pop_density}</td></tr>
            <tr style="background: #f9f9f9;"><td style="padding: 5px; border: 1px solid #ddd;"><b>ESI Score</b></td><td style="padding: 5px; border: 1px solid #ddd;"><b style="color: {color};">{esi}</b></td></tr>
        </table>
    </div>
    <div style="margin-top: 10px;">
        <p style="margin: 5px 0;"><b>Stress Zone:</b></p>
        <div style="padding: 6px; background: {color}; color: white; border-radius: 4px; text-align: center; font-weight: bold;">{zone}</div>
    </div>
    <div style="margin-top: 10px;">
        <p style="margin: 5px 0;"><b>Population Information:</b></p>
        <p style="font-size: 12px; margin: 5px 0;">Total Population: <b>{population}</b></p>
    </div>
</div>"#,
        name = escape_html(&d.name),
        coordinates = escape_html(&d.coordinates),
        pm25 = escape_html(&d.pm25),
        heat = escape_html(&d.heat),
        green_cover = escape_html(&d.green_cover),
        pop_density = escape_html(&d.pop_density),
        esi = escape_html(&d.esi),
        zone = escape_html(&d.stress_zone),
        population = escape_html(&d.population),
    )
}

fn tooltip_html(marker: &MapMarker) -> String {
    format!(
        "<b>{}</b><br>ESI: {}<br>Stress: {}",
        escape_html(&marker.detail.name),
        escape_html(&marker.detail.esi),
        escape_html(&marker.detail.stress_zone),
    )
}

/// Escapes text for interpolation into HTML content or attributes.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use stress_map_metrics_models::MarkerDetail;
    use stress_map_ward_models::StressZone;

    use super::*;

    fn marker(name: &str) -> MapMarker {
        MapMarker {
            ward: name.to_string(),
            lat: 18.5,
            lon: 73.8,
            radius: 15.0,
            color: "#e74c3c".to_string(),
            zone: StressZone::High,
            detail: MarkerDetail {
                name: name.to_string(),
                coordinates: "(18.5000, 73.8000)".to_string(),
                pm25: "61.0 µg/m³".to_string(),
                heat: "35.2°C".to_string(),
                green_cover: "9.0%".to_string(),
                pop_density: "21000/km²".to_string(),
                esi: "0.731".to_string(),
                stress_zone: "High Stress".to_string(),
                population: "50,000".to_string(),
            },
        }
    }

    #[test]
    fn page_is_centered_with_legend() {
        let html = render_map(&[marker("Hadapsar")]).unwrap();
        assert!(html.contains("setView([18.52, 73.85], 11)"));
        assert!(html.contains("PUNE DISTRICT - ENVIRONMENTAL STRESS ZONES"));
        assert!(html.contains("Larger circles = Higher ESI"));
        assert!(html.contains("Hadapsar"));
        assert!(html.contains("50,000"));
    }

    #[test]
    fn renders_with_no_markers() {
        let html = render_map(&[]).unwrap();
        assert!(html.contains("const markers = [];"));
    }

    #[test]
    fn ward_names_are_escaped() {
        let html = render_map(&[marker("<script>alert(1)</script>")]).unwrap();
        assert!(!html.contains("<script>alert(1)"));
        assert!(html.contains("&lt;script&gt;alert(1)"));
    }

    #[test]
    fn error_fragment_escapes_message() {
        assert_eq!(
            error_fragment("a < b"),
            r#"<div style="color: red; padding: 2rem;">Error: a &lt; b</div>"#
        );
    }

    #[test]
    fn tooltip_summarizes_ward() {
        assert_eq!(
            tooltip_html(&marker("Aundh")),
            "<b>Aundh</b><br>ESI: 0.731<br>Stress: High Stress"
        );
    }
}
