//! Raw mode and alternate screen lifecycle.
//!
//! `restore_terminal` is reached from three places: `TuiRuntime`'s drop,
//! the Ctrl+C restore hook, and the panic hook. It must stay idempotent.

use std::io::{self, Stdout};
use std::panic;

use anyhow::{Context, Result};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Switches to raw mode on the alternate screen.
///
/// # Errors
/// Fails when stdout is not a usable terminal.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

/// Turns on mouse reporting and bracketed paste for the event loop.
///
/// # Errors
/// Fails when the escape sequences cannot be written.
pub fn enable_input_features() -> Result<()> {
    execute!(io::stdout(), EnableBracketedPaste, EnableMouseCapture)
        .context("Failed to enable mouse and paste")
}

/// Undoes [`enable_input_features`].
///
/// # Errors
/// Fails when the escape sequences cannot be written.
pub fn disable_input_features() -> Result<()> {
    execute!(io::stdout(), DisableMouseCapture, DisableBracketedPaste)
        .context("Failed to disable mouse and paste")
}

/// Puts the terminal back the way the shell expects it.
///
/// # Errors
/// Fails when leaving the alternate screen or raw mode fails.
pub fn restore_terminal() -> Result<()> {
    // input features go first, while still in raw mode
    let _ = execute!(io::stdout(), DisableMouseCapture, DisableBracketedPaste);
    execute!(io::stdout(), LeaveAlternateScreen).context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")
}

/// Restores the terminal before the default panic message is printed.
/// Install before [`setup_terminal`].
pub fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        previous(info);
    }));
}
