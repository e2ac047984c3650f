#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web dashboard server for ward environmental stress data.

use std::path::PathBuf;

use clap::Parser;
use stress_map_server::{ServerConfig, run_server};

#[derive(Parser)]
#[command(
    name = "stress_map_server",
    about = "Ward environmental stress dashboard server"
)]
struct Cli {
    /// Ward CSV to load (overrides `STRESS_MAP_DATA` env var)
    #[arg(long)]
    data: Option<PathBuf>,
    /// Address to bind (overrides `BIND_ADDR` env var)
    #[arg(long)]
    bind_addr: Option<String>,
    /// Port to listen on (overrides `PORT` env var)
    #[arg(long)]
    port: Option<u16>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    run_server(ServerConfig::resolve(cli.data, cli.bind_addr, cli.port)).await
}
