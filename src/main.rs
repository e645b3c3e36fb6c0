mod app;
mod color;
mod config;
mod data;
mod error;
mod pipeline;
mod present;
mod state;
mod theme;
mod ui;

use anyhow::{Context, Result};
use app::LoanDeskApp;
use config::DashboardConfig;
use eframe::egui;
use theme::Theme;

fn main() -> Result<()> {
    env_logger::init();
    run().inspect_err(|e| log::error!("{e:#}"))
}

fn run() -> Result<()> {
    let config = DashboardConfig::from_args();

    // The table is loaded exactly once; without it there is nothing to show.
    let table = data::loader::load_file(&config.data_path)
        .with_context(|| format!("loading loan data from {}", config.data_path.display()))?;
    if table.is_empty() {
        log::warn!("{} holds no loan records", config.data_path.display());
    }
    let theme = Theme::load(config.theme_path.as_deref()).context("loading theme")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    eframe::run_native(
        "Loan Desk – Bank Loan Analysis",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(theme.visuals());
            Ok(Box::new(LoanDeskApp::new(table, theme)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}
