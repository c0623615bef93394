//! Copy-to-clipboard for code blocks.
//!
//! The system clipboard is tried first; when it is unavailable (headless,
//! SSH) the text is sent to the terminal as an OSC 52 sequence.

use std::io::Write;

use base64::Engine;

pub const COPIED_MESSAGE: &str = "Copied to clipboard! 📋";
pub const COPY_FAILED_MESSAGE: &str = "Copy failed! ❌";

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("system clipboard failed: {0}")]
    System(String),
    #[error("OSC 52 write failed: {0}")]
    Osc52(#[from] std::io::Error),
}

/// Copies `text`, returning the last transport error when both fail.
pub fn copy(text: &str) -> Result<(), ClipboardError> {
    match copy_system(text) {
        Ok(()) => Ok(()),
        Err(err) => {
            tracing::debug!(error = %err, "falling back to OSC 52");
            copy_osc52(&mut std::io::stdout(), text)
        }
    }
}

fn copy_system(text: &str) -> Result<(), ClipboardError> {
    arboard::Clipboard::new()
        .and_then(|mut clipboard| clipboard.set_text(text))
        .map_err(|e| ClipboardError::System(e.to_string()))
}

fn copy_osc52(out: &mut impl Write, text: &str) -> Result<(), ClipboardError> {
    out.write_all(osc52_sequence(text).as_bytes())?;
    out.flush()?;
    Ok(())
}

/// `ESC ] 52 ; c ; <base64> BEL`
fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text);
    format!("\x1b]52;c;{encoded}\x07")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence_encodes_payload() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn test_copy_osc52_writes_to_sink() {
        let mut sink = Vec::new();
        copy_osc52(&mut sink, "fn main() {}").unwrap();
        let written = String::from_utf8(sink).unwrap();
        assert!(written.starts_with("\x1b]52;c;"));
        assert!(written.ends_with('\x07'));
    }
}
