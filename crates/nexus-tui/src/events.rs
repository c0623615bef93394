//! UI event types.
//!
//! Everything the reducer reacts to arrives as a `UiEvent`: terminal input,
//! frame/tick timing from the runtime loop, and results posted back to the
//! inbox by spawned tasks.

use crossterm::event::Event;
use nexus_core::overlay::FocusRequest;

#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Animation/timer heartbeat; the only event that marks a frame dirty.
    Tick,

    /// Current terminal size, prepended to every batch of events.
    Frame { width: u16, height: u16 },

    /// Raw crossterm input (keys, mouse, paste, resize).
    Terminal(Event),

    /// A deferred focus request whose settle delay elapsed without being
    /// cancelled.
    FocusDue(FocusRequest),

    /// Outcome of a clipboard copy.
    ClipboardResult { ok: bool },
}
