//! HTTP handler functions for the stress map API.
//!
//! Every handler answers `200 OK`. Query failures are logged and replaced
//! with the endpoint's degraded body so the dashboard stays live.

use actix_web::{HttpResponse, web};
use stress_map_metrics as metrics;
use stress_map_server_models::{ApiError, ApiHealth, PlotlyFigure};

use crate::AppState;

const DASHBOARD_HTML: &str = include_str!("../templates/dashboard.html");

const HTML: &str = "text/html; charset=utf-8";

/// `GET /`
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().content_type(HTML).body(DASHBOARD_HTML)
}

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        data_available: state.dataset.is_available(),
        wards: state.dataset.len() as u64,
    })
}

/// `GET /api/overview`
///
/// Ward counts per zone and average PM2.5/ESI.
pub async fn overview(state: web::Data<AppState>) -> HttpResponse {
    match metrics::overview(&state.dataset) {
        Ok(overview) => {
            log::debug!("Overview: {overview:?}");
            HttpResponse::Ok().json(overview)
        }
        Err(e) => {
            log::error!("Failed to compute overview: {e}");
            HttpResponse::Ok().json(ApiError::new(e.to_string()))
        }
    }
}

/// `GET /api/stress-distribution`
///
/// Pie chart of wards per stress zone.
pub async fn stress_distribution(state: web::Data<AppState>) -> HttpResponse {
    if state.dataset.is_empty() {
        return HttpResponse::Ok().json(PlotlyFigure::empty());
    }

    let counts = metrics::stress_distribution(&state.dataset);
    HttpResponse::Ok().json(PlotlyFigure::stress_pie(&counts))
}

/// `GET /api/pm25-green`
///
/// Scatter of PM2.5 against green cover, one trace per zone.
pub async fn pm25_green(state: web::Data<AppState>) -> HttpResponse {
    if state.dataset.is_empty() {
        return HttpResponse::Ok().json(PlotlyFigure::empty());
    }

    let series = metrics::pm25_vs_green(&state.dataset);
    HttpResponse::Ok().json(PlotlyFigure::pm25_green_scatter(&series))
}

/// `GET /api/map`
///
/// Leaflet page with one circle marker per ward.
pub async fn map(state: web::Data<AppState>) -> HttpResponse {
    if !state.dataset.is_available() {
        return html(crate::map::error_fragment("No data"));
    }

    let rendered = metrics::map_markers(&state.dataset)
        .map_err(|e| e.to_string())
        .and_then(|markers| crate::map::render_map(&markers).map_err(|e| e.to_string()));

    match rendered {
        Ok(page) => {
            log::debug!("Map rendered for {} wards", state.dataset.len());
            html(page)
        }
        Err(e) => {
            log::error!("Failed to render map: {e}");
            html(crate::map::error_fragment(&e))
        }
    }
}

/// `GET /api/wards`
///
/// All wards ranked by ESI, highest first.
pub async fn wards(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(metrics::ward_table(&state.dataset))
}

/// `GET /api/insights`
///
/// The five insight cards.
pub async fn insights(state: web::Data<AppState>) -> HttpResponse {
    match metrics::insights(&state.dataset) {
        Ok(cards) => HttpResponse::Ok().json(cards),
        Err(e) => {
            log::error!("Failed to compute insights: {e}");
            HttpResponse::Ok().json(Vec::<()>::new())
        }
    }
}

/// `GET /api/faq`
pub async fn faq() -> HttpResponse {
    HttpResponse::Ok().json(crate::faq::entries())
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok().content_type(HTML).body(body)
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test};
    use stress_map_dataset::Dataset;
    use stress_map_ward_models::{StressZone, WardRecord};

    use crate::{AppState, configure};

    fn ward(name: &str, esi: f64, zone: StressZone, pm25: f64) -> WardRecord {
        WardRecord {
            ward: name.to_string(),
            lat: 18.52,
            lon: 73.85,
            pm25,
            heat: 33.0,
            green_cover: 0.2,
            pop_density: 10_000.0,
            esi,
            stress_zone: zone,
            population: 50_000,
            total_budget: 100_000_000.0,
        }
    }

    fn sample() -> Dataset {
        Dataset::from_wards(vec![
            ward("A", 0.7, StressZone::High, 50.0),
            ward("B", 0.3, StressZone::Low, 10.0),
        ])
    }

    macro_rules! app {
        ($dataset:expr) => {
            test::init_service(
                App::new()
                    .app_data(actix_web::web::Data::new(AppState { dataset: $dataset }))
                    .configure(configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn overview_reports_counts() {
        let app = app!(sample());
        let req = test::TestRequest::get().uri("/api/overview").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total_wards"], 2);
        assert_eq!(body["high_stress_count"], 1);
        assert_eq!(body["low_stress_count"], 1);
        assert_eq!(body["avg_pm25"], 30.0);
    }

    #[actix_web::test]
    async fn overview_error_is_still_ok() {
        let app = app!(Dataset::from_wards(vec![ward("A", 0.7, StressZone::High, f64::NAN)]));
        let req = test::TestRequest::get().uri("/api/overview").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("avg_pm25"));
    }

    #[actix_web::test]
    async fn unavailable_dataset_degrades_every_route() {
        let app = app!(Dataset::Unavailable);

        for uri in [
            "/",
            "/api/health",
            "/api/overview",
            "/api/stress-distribution",
            "/api/pm25-green",
            "/api/map",
            "/api/wards",
            "/api/insights",
            "/api/faq",
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        }

        let req = test::TestRequest::get().uri("/api/stress-distribution").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, serde_json::json!({ "data": [], "layout": {} }));

        let req = test::TestRequest::get().uri("/api/wards").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, serde_json::json!([]));

        let req = test::TestRequest::get().uri("/api/insights").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.as_array().unwrap().len(), 5);

        let req = test::TestRequest::get().uri("/api/map").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert!(String::from_utf8_lossy(&body).contains("Error: No data"));
    }

    #[actix_web::test]
    async fn scatter_omits_zones_without_wards() {
        let app = app!(sample());
        let req = test::TestRequest::get().uri("/api/pm25-green").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let names: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Low Stress", "High Stress"]);
    }

    #[actix_web::test]
    async fn wards_are_ranked_by_esi() {
        let app = app!(Dataset::from_wards(vec![
            ward("B", 0.3, StressZone::Low, 10.0),
            ward("A", 0.7, StressZone::High, 50.0),
        ]));
        let req = test::TestRequest::get().uri("/api/wards").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body[0]["ward"], "A");
        assert_eq!(body[0]["stress_zone"], "High Stress");
        assert_eq!(body[1]["ward"], "B");
    }

    #[actix_web::test]
    async fn insights_failure_returns_empty_list() {
        let app = app!(Dataset::from_wards(vec![ward("A", 0.7, StressZone::High, f64::NAN)]));
        let req = test::TestRequest::get().uri("/api/insights").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, serde_json::json!([]));
    }

    #[actix_web::test]
    async fn map_with_zero_rows_renders_empty_map() {
        let app = app!(Dataset::from_wards(Vec::new()));
        let req = test::TestRequest::get().uri("/api/map").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert!(String::from_utf8_lossy(&body).contains("const markers = [];"));
    }

    #[actix_web::test]
    async fn map_with_bad_coordinates_returns_error_fragment() {
        let mut record = ward("A", 0.5, StressZone::Low, 10.0);
        record.lat = f64::NAN;
        let app = app!(Dataset::from_wards(vec![record]));
        let req = test::TestRequest::get().uri("/api/map").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert!(String::from_utf8_lossy(&body).contains("Error: Non-finite value for lat"));
    }

    #[actix_web::test]
    async fn faq_has_five_entries() {
        let app = app!(Dataset::Unavailable);
        let req = test::TestRequest::get().uri("/api/faq").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.as_array().unwrap().len(), 5);
        assert!(body[0]["question"].is_string());
    }

    #[actix_web::test]
    async fn health_reports_ward_count() {
        let app = app!(sample());
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["healthy"], true);
        assert_eq!(body["dataAvailable"], true);
        assert_eq!(body["wards"], 2);
    }
}
