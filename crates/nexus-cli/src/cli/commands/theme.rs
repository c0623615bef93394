//! Theme handlers. Same storage key the TUI's toggle writes.

use anyhow::Result;
use nexus_core::prefs::PreferenceStore;
use nexus_core::widgets::Theme;

pub fn show() -> Result<()> {
    let store = PreferenceStore::open_default()?;
    let theme = Theme::load(&store);
    println!("{theme}");
    Ok(())
}

pub fn toggle() -> Result<()> {
    let mut store = PreferenceStore::open_default()?;
    let theme = Theme::load(&store).toggled();
    theme.save(&mut store)?;
    println!("{}", theme.activated_message());
    Ok(())
}
