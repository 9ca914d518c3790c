use std::path::PathBuf;

mod backend_bridge;
mod config;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::{
    backend_bridge::commands::BackendCommand, controller::events::UiEvent, ui::CalculatorApp,
};

#[derive(Parser, Debug)]
#[command(about = "Desktop calculator backed by a remote arithmetic service")]
struct Args {
    /// Base URL of the calculation/memory service.
    #[arg(long)]
    server_url: Option<String>,
    /// Directory holding the persisted session id.
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// TOML settings file; defaults to ./calculator.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let settings = config::load_settings(args.config.as_deref())
        .with_cli_overrides(args.server_url, args.data_dir);
    tracing::info!(
        server_url = %settings.server_url,
        data_dir = %settings.data_dir.display(),
        "starting calculator"
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Calculator")
            .with_inner_size([320.0, 460.0])
            .with_min_inner_size([300.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Calculator",
        options,
        Box::new(|_cc| Ok(Box::new(CalculatorApp::new(cmd_tx, ui_rx)))),
    )
}
