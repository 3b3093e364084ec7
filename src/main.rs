mod app;
mod color;
mod data;
mod error;
mod state;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use app::LaunchDashApp;
use clap::Parser;
use eframe::egui;

/// Interactive dashboard over a table of rocket launch records.
#[derive(Parser, Debug)]
#[command(name = "launch-dash")]
#[command(about = "Launch records dashboard: success by site and payload vs. outcome")]
struct Args {
    /// Launch table (.csv, .json or .parquet)
    #[arg(default_value = "spacex_launch_dash.csv")]
    data: PathBuf,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .parse_filters(&args.log_level)
        .parse_env("RUST_LOG")
        .init();

    // The table is required up front; a bad file ends the process here.
    let table = match data::loader::load_file(&args.data) {
        Ok(table) => table,
        Err(e) => {
            log::error!("Failed to load launch table: {e:#}");
            return Err(e);
        }
    };
    log::info!(
        "Loaded {} launches from {} ({} sites, payload {:.0}–{:.0} kg)",
        table.len(),
        args.data.display(),
        table.sites().len(),
        table.min_payload(),
        table.max_payload()
    );
    let table = Arc::new(table);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashApp::new(table)))),
    )
    .map_err(|e| anyhow!("window failed: {e}"))
}
