//! Preference store handlers.

use anyhow::{Result, bail};
use nexus_core::config::paths;
use nexus_core::prefs::PreferenceStore;

pub fn path() {
    println!("{}", paths::prefs_path().display());
}

pub fn get(key: &str) -> Result<()> {
    let store = PreferenceStore::open_default()?;
    let Some(value) = store.get(key) else {
        bail!("No preference named '{key}'");
    };
    println!("{value}");
    Ok(())
}

pub fn set(key: &str, value: &str) -> Result<()> {
    let mut store = PreferenceStore::open_default()?;
    store.set(key, value)?;
    println!("Set {key}");
    Ok(())
}

pub fn remove(key: &str) -> Result<()> {
    let mut store = PreferenceStore::open_default()?;
    if store.remove(key)? {
        println!("Removed {key}");
    } else {
        println!("No preference named '{key}'");
    }
    Ok(())
}

pub fn clear() -> Result<()> {
    let mut store = PreferenceStore::open_default()?;
    let count = store.len();
    store.clear()?;
    println!("Cleared {count} preference(s)");
    Ok(())
}
