//! Nexus terminal front-end.
//!
//! Elm-style: `update` reduces `UiEvent`s into state and returns
//! `UiEffect`s, `render` draws state, and `runtime` owns the terminal and
//! executes effects.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod layout;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::{Result, bail};
use nexus_core::config::Config;
use nexus_core::forum::Forum;
use nexus_core::prefs::PreferenceStore;
pub use runtime::TuiRuntime;

/// Runs the full-screen forum until the user quits.
///
/// Must be called inside a tokio runtime context; timers and the clipboard
/// run as tasks on it.
///
/// # Errors
/// Fails without a terminal, when the forum file is invalid, or when the
/// preference store cannot be opened.
pub fn run_interactive(config: &Config) -> Result<()> {
    if !stderr().is_terminal() {
        bail!("Interactive mode requires a terminal.");
    }

    let forum = Forum::load(config.forum_path().as_deref())?;
    let prefs = PreferenceStore::open_default()?;
    tracing::info!(
        threads = forum.threads.len(),
        prefs = %prefs.path().display(),
        "starting front-end"
    );

    writeln!(stderr(), "Nexus · loading {} threads…", forum.threads.len())?;

    let mut runtime = TuiRuntime::new(config, prefs, forum)?;
    let result = runtime.run();
    drop(runtime);

    writeln!(stderr(), "Goodbye!")?;
    result
}
