//! Binary entry point: read configuration, start logging, kick off the
//! catalog load in the background, and drive the Ratatui event loop until the
//! user exits.
use anyhow::Context;
use clap::Parser;
use tracing::info;

use course_browser::{logging, run_app, spawn_loader, App, Config, CourseBrowser, CoursePicker};

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    let log_path = config.log_path()?;
    logging::init(&log_path).context("failed to start logging")?;
    info!(data = %config.data.display(), "starting course browser");

    let picker = match config.seed {
        Some(seed) => CoursePicker::seeded(seed),
        None => CoursePicker::from_clock(),
    };
    let loader = spawn_loader(config.data.clone());

    let mut app = App::new(CourseBrowser::new(picker), Some(loader));
    run_app(&mut app)
}
