//! Light/dark theme preference.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;

use crate::prefs::PreferenceStore;

/// Preference key the theme is stored under.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Icon shown on the toggle: the theme you would switch to.
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Theme::Dark => "☀",
            Theme::Light => "☾",
        }
    }

    pub fn activated_message(self) -> &'static str {
        match self {
            Theme::Dark => "Dark mode activated 🌙",
            Theme::Light => "Light mode activated ☀️",
        }
    }

    /// Reads the stored theme; unknown or missing values fall back to dark.
    pub fn load(store: &PreferenceStore) -> Self {
        match store.get(THEME_KEY).map(str::parse::<Theme>) {
            Some(Ok(theme)) => theme,
            Some(Err(err)) => {
                tracing::warn!(error = %err, "ignoring stored theme");
                Theme::default()
            }
            None => Theme::default(),
        }
    }

    pub fn save(self, store: &mut PreferenceStore) -> Result<()> {
        store.set(THEME_KEY, self.as_str())
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => anyhow::bail!("unknown theme '{other}' (expected dark or light)"),
        }
    }
}
