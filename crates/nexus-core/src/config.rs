//! Configuration management for Nexus.
//!
//! Loads configuration from ${NEXUS_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Returns the default config template with comments.
///
/// Embedded from default_config.toml at compile time. Regenerate with
/// `cargo run -p xtask -- update-default-config` after changing defaults.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Merges user config values into the default template.
///
/// New comments/sections from the template stay present while the user's
/// values win.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;
    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    merge_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source.iter() {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for Nexus configuration and data directories.
    //!
    //! NEXUS_HOME resolution order:
    //! 1. NEXUS_HOME environment variable (if set)
    //! 2. ~/.config/nexus (default)
    //! 3. ./.nexus when no home directory can be determined

    use std::path::PathBuf;

    pub fn nexus_home() -> PathBuf {
        if let Ok(home) = std::env::var("NEXUS_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("nexus"))
            .unwrap_or_else(|| PathBuf::from(".nexus"))
    }

    pub fn config_path() -> PathBuf {
        nexus_home().join("config.toml")
    }

    /// Persisted UI preferences (theme, bookmarks).
    pub fn prefs_path() -> PathBuf {
        nexus_home().join("prefs.json")
    }

    pub fn logs_dir() -> PathBuf {
        nexus_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Delay before an opened overlay's input takes focus, in milliseconds
    pub focus_delay_ms: u64,

    /// How long a toast stays visible, in milliseconds
    pub toast_duration_ms: u64,

    /// Duration of the stat counter animation, in milliseconds
    pub counter_duration_ms: u64,

    /// How long the startup loading screen shows before fading (0 skips it)
    pub loading_screen_ms: u64,

    /// Quiet period before a terminal resize is acted on, in milliseconds
    pub resize_debounce_ms: u64,

    /// Number of background particles (0 disables them)
    pub particles: usize,

    /// Optional forum content file replacing the built-in content
    pub forum_file: Option<String>,

    /// Log filter directive (overridden by NEXUS_LOG)
    pub log_level: String,
}

/// Keys accepted by [`Config::save_value_to`].
pub const KEYS: &[&str] = &[
    "focus_delay_ms",
    "toast_duration_ms",
    "counter_duration_ms",
    "loading_screen_ms",
    "resize_debounce_ms",
    "particles",
    "forum_file",
    "log_level",
];

impl Config {
    const DEFAULT_FOCUS_DELAY_MS: u64 = 300;
    const DEFAULT_TOAST_DURATION_MS: u64 = 3000;
    const DEFAULT_COUNTER_DURATION_MS: u64 = 2000;
    const DEFAULT_LOADING_SCREEN_MS: u64 = 1500;
    const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 250;
    const DEFAULT_PARTICLES: usize = 50;
    const DEFAULT_LOG_LEVEL: &str = "info";

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn focus_delay(&self) -> Duration {
        Duration::from_millis(self.focus_delay_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    pub fn counter_duration(&self) -> Duration {
        Duration::from_millis(self.counter_duration_ms)
    }

    pub fn loading_screen(&self) -> Option<Duration> {
        (self.loading_screen_ms > 0).then(|| Duration::from_millis(self.loading_screen_ms))
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    /// Resolved forum content path; relative paths are under NEXUS_HOME.
    pub fn forum_path(&self) -> Option<PathBuf> {
        let file = self.forum_file.as_deref()?.trim();
        if file.is_empty() {
            return None;
        }
        let path = PathBuf::from(file);
        if path.is_absolute() {
            Some(path)
        } else {
            Some(paths::nexus_home().join(path))
        }
    }

    /// Sets a single key in the default config file.
    pub fn save_value(key: &str, raw: &str) -> Result<()> {
        Self::save_value_to(&paths::config_path(), key, raw)
    }

    /// Sets a single key in a specific config file.
    ///
    /// `raw` is read as a TOML value when it parses as one, otherwise as a
    /// string. The result must still deserialize as a `Config`. Creates the
    /// file from the template when missing, otherwise merges the user's
    /// values into the latest template first.
    pub fn save_value_to(path: &Path, key: &str, raw: &str) -> Result<()> {
        use toml_edit::{DocumentMut, Value};

        if !KEYS.contains(&key) {
            anyhow::bail!("Unknown config key '{key}' (expected one of: {})", KEYS.join(", "));
        }

        let contents = if path.exists() {
            let user_config = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            merge_with_template(&user_config)?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        let value = raw
            .parse::<Value>()
            .unwrap_or_else(|_| Value::from(raw));
        doc[key] = toml_edit::value(value);

        let updated = doc.to_string();
        toml::from_str::<Config>(&updated)
            .with_context(|| format!("Invalid value for '{key}': {raw}"))?;

        Self::write_config(path, &updated)
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Generates a fresh config TOML from Rust defaults.
    ///
    /// Used by `cargo run -p xtask -- update-default-config` to keep
    /// `default_config.toml` in sync. The embedded template supplies structure
    /// and comments.
    pub fn generate() -> Result<String> {
        use toml_edit::DocumentMut;

        let generated_toml = toml::to_string(&Config::default())
            .context("Failed to serialize default config to TOML")?;

        let mut doc: DocumentMut = default_config_template()
            .parse()
            .context("Failed to parse default config template")?;
        let generated_doc: DocumentMut = generated_toml
            .parse()
            .context("Failed to parse generated config")?;

        merge_items(doc.as_table_mut(), generated_doc.as_table());

        Ok(doc.to_string())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename).
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            focus_delay_ms: Self::DEFAULT_FOCUS_DELAY_MS,
            toast_duration_ms: Self::DEFAULT_TOAST_DURATION_MS,
            counter_duration_ms: Self::DEFAULT_COUNTER_DURATION_MS,
            loading_screen_ms: Self::DEFAULT_LOADING_SCREEN_MS,
            resize_debounce_ms: Self::DEFAULT_RESIZE_DEBOUNCE_MS,
            particles: Self::DEFAULT_PARTICLES,
            forum_file: None,
            log_level: Self::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}
