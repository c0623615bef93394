//! Global keyboard shortcuts.
//!
//! Bound once at startup; dispatch only. The table holds no overlay state.

use super::OverlayId;

/// A key press stripped down to what shortcut matching needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub ctrl: bool,
    pub key: char,
}

impl KeyChord {
    pub fn ctrl(key: char) -> Self {
        Self {
            ctrl: true,
            key: key.to_ascii_lowercase(),
        }
    }

    pub fn plain(key: char) -> Self {
        Self { ctrl: false, key }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Open(OverlayId),
    Toggle(OverlayId),
    ToggleTheme,
}

#[derive(Debug, Clone)]
pub struct Shortcuts {
    bindings: Vec<(KeyChord, ShortcutAction)>,
}

impl Default for Shortcuts {
    /// `Ctrl+K` search, `Ctrl+/` theme, `Ctrl+N` new thread, `Ctrl+B` menu.
    fn default() -> Self {
        let mut shortcuts = Self::empty();
        shortcuts.bind(KeyChord::ctrl('k'), ShortcutAction::Open(OverlayId::Search));
        shortcuts.bind(KeyChord::ctrl('/'), ShortcutAction::ToggleTheme);
        shortcuts.bind(
            KeyChord::ctrl('n'),
            ShortcutAction::Open(OverlayId::CreateThread),
        );
        shortcuts.bind(
            KeyChord::ctrl('b'),
            ShortcutAction::Toggle(OverlayId::NavDrawer),
        );
        shortcuts
    }
}

impl Shortcuts {
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Binds a chord, replacing any existing binding for it.
    pub fn bind(&mut self, chord: KeyChord, action: ShortcutAction) {
        self.bindings.retain(|(existing, _)| *existing != chord);
        self.bindings.push((chord, action));
    }

    pub fn lookup(&self, chord: KeyChord) -> Option<ShortcutAction> {
        let chord = if chord.ctrl {
            KeyChord::ctrl(chord.key)
        } else {
            chord
        };
        self.bindings
            .iter()
            .find(|(bound, _)| *bound == chord)
            .map(|(_, action)| *action)
    }

    pub fn bindings(&self) -> impl Iterator<Item = &(KeyChord, ShortcutAction)> {
        self.bindings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let s = Shortcuts::default();
        assert_eq!(
            s.lookup(KeyChord::ctrl('k')),
            Some(ShortcutAction::Open(OverlayId::Search))
        );
        assert_eq!(
            s.lookup(KeyChord::ctrl('/')),
            Some(ShortcutAction::ToggleTheme)
        );
        assert_eq!(s.lookup(KeyChord::plain('k')), None);
    }

    #[test]
    fn test_ctrl_lookup_is_case_insensitive() {
        let s = Shortcuts::default();
        let upper = KeyChord {
            ctrl: true,
            key: 'K',
        };
        assert_eq!(
            s.lookup(upper),
            Some(ShortcutAction::Open(OverlayId::Search))
        );
    }

    #[test]
    fn test_bind_replaces_existing_chord() {
        let mut s = Shortcuts::default();
        s.bind(
            KeyChord::ctrl('k'),
            ShortcutAction::Toggle(OverlayId::Search),
        );
        assert_eq!(
            s.lookup(KeyChord::ctrl('k')),
            Some(ShortcutAction::Toggle(OverlayId::Search))
        );
        assert_eq!(s.bindings().count(), 4);
    }
}
