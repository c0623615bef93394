//! Interactive forum.

use std::time::Instant;

use anyhow::{Context, Result};
use nexus_core::config::{self, paths};
use nexus_core::logging;

pub fn run(config: &config::Config) -> Result<()> {
    let started = Instant::now();
    // flushes the log writer on drop
    let _guard = logging::init(&paths::logs_dir(), &config.log_level)
        .context("initialize logging")?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        home = %paths::nexus_home().display(),
        "nexus starting"
    );

    let result = nexus_tui::run_interactive(config).context("interactive session failed");
    tracing::info!(elapsed_ms = started.elapsed().as_millis(), "nexus exited");
    result
}
