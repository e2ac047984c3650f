#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web dashboard server for ward environmental stress data.
//!
//! Loads the ward CSV once at startup into an immutable
//! [`stress_map_dataset::Dataset`] and serves the dashboard page, JSON
//! aggregates, Plotly chart figures, a Leaflet map, and static FAQ content.
//! A dataset that fails to load is replaced by an empty one; the server
//! still starts and every route degrades instead of erroring.

pub mod config;
mod faq;
mod handlers;
pub mod map;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use stress_map_dataset::Dataset;

pub use config::ServerConfig;

/// Shared application state.
pub struct AppState {
    /// Ward table loaded at startup. Never mutated.
    pub dataset: Dataset,
}

/// Registers the dashboard and API routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index)).service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/overview", web::get().to(handlers::overview))
            .route(
                "/stress-distribution",
                web::get().to(handlers::stress_distribution),
            )
            .route("/pm25-green", web::get().to(handlers::pm25_green))
            .route("/map", web::get().to(handlers::map))
            .route("/wards", web::get().to(handlers::wards))
            .route("/insights", web::get().to(handlers::insights))
            .route("/faq", web::get().to(handlers::faq)),
    );
}

/// Starts the stress map server.
///
/// Loads the dataset named by `config`, then starts the Actix-Web HTTP
/// server. This is a regular async function; the caller is responsible
/// for providing the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let dataset = stress_map_dataset::load(&config.data_path);

    if dataset.is_available() {
        let high = dataset
            .wards()
            .iter()
            .filter(|w| w.is_high_stress())
            .count();
        log::info!("Data: {} wards", dataset.len());
        log::info!("High Stress: {high}");
    } else {
        log::warn!("CSV not found - running with empty data");
    }

    let state = web::Data::new(AppState { dataset });

    let ServerConfig {
        bind_addr, port, ..
    } = config;

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
