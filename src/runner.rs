//! Runs the dashboard app

use std::{
    fs,
    io::{self, Read},
};

use anyhow::{Context, Result, anyhow};
use eframe::{NativeOptions, run_native};
use egui::ViewportBuilder;
use log::{debug, warn};

use crate::{Args, dashboard::DashboardApp, dataset::DashboardError, parsers::SAMPLE_DATA};

/// Initial window size, wide enough for four summary cards side by side
const WINDOW_SIZE: [f32; 2] = [1100.0, 900.0];

/// Text the paste area starts with
fn initial_text(args: &Args) -> Result<String> {
    if args.sample {
        return Ok(SAMPLE_DATA.to_string());
    }
    match args.input.as_deref() {
        None => Ok(String::new()),
        Some("-") => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(DashboardError::Io)
                .context("Failed to read input from stdin")?;
            debug!("Read {} bytes from stdin", text.len());
            Ok(text)
        }
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(DashboardError::Io)
                .with_context(|| format!("Failed to read input file {}", path))?;
            debug!("Read {} bytes from {}", text.len(), path);
            Ok(text)
        }
    }
}

/// Builds the app state from the command line
fn build_app(args: &Args) -> Result<DashboardApp> {
    let mut app = DashboardApp::new(initial_text(args)?, args.chart.into());
    if args.visualize {
        // a failure is shown inline in the app, same as pressing the button
        if let Err(e) = app.visualize() {
            warn!("Initial visualize failed: {}", e);
        }
    }
    Ok(app)
}

/// Runs the dashboard app
pub fn run_dashboard(args: Args) -> Result<()> {
    let app = build_app(&args)?;

    let viewport = ViewportBuilder::default()
        .with_app_id("quarterly")
        .with_inner_size(WINDOW_SIZE);
    let native_options = NativeOptions {
        viewport,
        ..Default::default()
    };
    run_native(
        "Performance Analytics Dashboard",
        native_options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|_| anyhow!("Failed to run native app"))?;

    Ok(())
}
