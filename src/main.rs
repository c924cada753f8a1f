mod app;
mod cli;
mod console;
mod state;
mod ui;

use anyhow::Result;
use app::ScatterApp;
use clap::Parser;
use cli::Cli;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    if cli.is_headless() {
        return console::run(&cli);
    }

    let mut state = AppState::new(cli.load_options());
    if let Some(path) = &cli.file {
        state.load_path(path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Scatter Plot Creator",
        options,
        Box::new(move |_cc| Ok(Box::new(ScatterApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("window error: {e}"))
}
