use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);
static RESTORE_HOOK: OnceLock<Box<dyn Fn() + Send + Sync>> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
#[error("Interrupted")]
pub struct InterruptedError;

/// Installs the Ctrl+C handler.
///
/// The handler only sets a flag; the event loop polls it. In raw mode the
/// terminal delivers Ctrl+C as a key instead, so this covers signals sent
/// from outside.
pub fn init() -> Result<()> {
    ctrlc::set_handler(trigger_ctrl_c).context("Failed to set Ctrl+C handler")
}

/// Sets the interrupt flag, force-exiting on the second one.
pub fn trigger_ctrl_c() {
    if INTERRUPTED.swap(true, Ordering::SeqCst) {
        // process::exit skips Drop, so restore the terminal first.
        if let Some(hook) = RESTORE_HOOK.get() {
            hook();
        }
        std::process::exit(130);
    }
}

pub fn is_interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

pub fn reset() {
    INTERRUPTED.store(false, Ordering::SeqCst);
}

/// Registers a hook run on the second Ctrl+C before exit.
pub fn set_restore_hook<F>(hook: F)
where
    F: Fn() + Send + Sync + 'static,
{
    let _ = RESTORE_HOOK.set(Box::new(hook));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_trigger_sets_flag() {
        reset();
        assert!(!is_interrupted());
        trigger_ctrl_c();
        assert!(is_interrupted());
        reset();
        assert!(!is_interrupted());
    }
}
