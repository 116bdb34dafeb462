mod app;
mod color;
mod config;
mod controller;
mod data;
mod prompt;
mod ui;

use anyhow::Context;
use app::QuakeViewApp;
use clap::Parser;
use config::Config;
use controller::{InteractionController, Mode};
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::parse();
    log::debug!("{config:?}");

    let controller = if config.prompt {
        let stdin = std::io::stdin();
        let criteria = prompt::gather_criteria(&mut stdin.lock(), &mut std::io::stdout())
            .context("reading filter prompts")?;
        InteractionController::with_criteria(config.feed_source(), criteria, Mode::Prompted)
    } else {
        InteractionController::new(config.feed_source())
    };
    let apply_on_start = config.should_apply_on_start();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Earthquake Filter",
        options,
        Box::new(move |_cc| Ok(Box::new(QuakeViewApp::new(controller, apply_on_start)))),
    )
    .map_err(|e| anyhow::anyhow!("running viewer: {e}"))
}
