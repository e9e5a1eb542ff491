//! Plinth Runtime
//!
//! Headless host loop: loads settings, then drives the demo scene.
//!
//! Usage: `plinth [settings.json]`

mod demo;

use anyhow::{Context, Result};
use std::path::PathBuf;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    tracing::info!("Plinth v{}", plinth_core::VERSION);

    let settings_path = std::env::args_os().nth(1).map(PathBuf::from);
    let settings = plinth_services::load_settings(settings_path.as_deref())
        .context("failed to load settings")?;

    let report = demo::run(&settings)?;
    tracing::info!(
        frames = report.frames,
        live_entities = report.live_entities,
        "runtime finished"
    );
    println!("{}", report.last_frame);

    Ok(())
}
