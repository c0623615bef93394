//! Application state composition.
//!
//! ```text
//! AppState
//! ├── overlays: OverlayCoordinator   (open/closed, focus, scroll lock)
//! ├── panels: Panels                 (per-overlay input state)
//! ├── view: View                     (home or a thread)
//! ├── home / thread / votes          (page state)
//! └── toasts, theme, bookmarks, konami, loading, resize
//! ```
//!
//! The coordinator owns which overlays are open; panels only hold what the
//! user typed into them.

use std::time::Instant;

use nexus_core::config::Config;
use nexus_core::forum::Forum;
use nexus_core::overlay::{
    FocusTarget, OverlayCoordinator, OverlayId, OverlaySpec, Shortcuts,
};
use nexus_core::particles::ParticleField;
use nexus_core::prefs::PreferenceStore;
use nexus_core::widgets::{
    Bookmarks, Debouncer, KonamiDetector, LoadingScreen, Theme, ToastQueue,
};

use crate::common::Palette;
use crate::features::home::HomeState;
use crate::features::thread::{PostVotes, ThreadView};
use crate::layout::{HeaderControl, ScreenLayout};
use crate::overlays::{
    AuthDialog, AuthKind, CreateThreadPanel, LOGIN_DIALOG, NavDrawer, SIGNUP_DIALOG, SearchPanel,
};

/// Which page the body shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Thread,
}

/// Input state of every overlay panel, kept across open/close cycles and
/// reset on open.
#[derive(Debug, Clone)]
pub struct Panels {
    pub search: SearchPanel,
    pub create_thread: CreateThreadPanel,
    pub login: AuthDialog,
    pub signup: AuthDialog,
    pub drawer: NavDrawer,
}

impl Default for Panels {
    fn default() -> Self {
        Self {
            search: SearchPanel::new(),
            create_thread: CreateThreadPanel::new(),
            login: AuthDialog::new(AuthKind::Login),
            signup: AuthDialog::new(AuthKind::Signup),
            drawer: NavDrawer::default(),
        }
    }
}

impl Panels {
    /// Clears a panel's input before it is shown again.
    pub fn reset(&mut self, id: OverlayId) {
        match id {
            OverlayId::Search => self.search.reset(),
            OverlayId::CreateThread => self.create_thread.reset(),
            LOGIN_DIALOG => self.login.reset(),
            SIGNUP_DIALOG => self.signup.reset(),
            OverlayId::NavDrawer | OverlayId::Dialog(_) => {}
        }
    }
}

/// Registers every overlay the front-end uses.
pub fn register_overlays(overlays: &mut OverlayCoordinator) {
    overlays.register(OverlaySpec::modal(OverlayId::Search).with_focus(FocusTarget::SearchQuery));
    overlays.register(
        OverlaySpec::modal(OverlayId::CreateThread).with_focus(FocusTarget::ThreadTitle),
    );
    overlays.register(OverlaySpec::drawer(OverlayId::NavDrawer));
    overlays.register(OverlaySpec::modal(LOGIN_DIALOG).with_focus(FocusTarget::LoginUsername));
    overlays.register(OverlaySpec::modal(SIGNUP_DIALOG).with_focus(FocusTarget::SignupUsername));
}

pub struct AppState {
    /// Clock of the event being processed.
    pub now: Instant,
    pub started_at: Instant,
    pub should_quit: bool,

    pub overlays: OverlayCoordinator,
    pub shortcuts: Shortcuts,
    pub panels: Panels,

    pub forum: Forum,
    pub view: View,
    pub home: HomeState,
    pub thread: Option<ThreadView>,
    pub votes: PostVotes,

    pub toasts: ToastQueue,
    pub theme: Theme,
    pub prefs: PreferenceStore,
    pub bookmarks: Bookmarks,
    pub konami: KonamiDetector,
    pub loading: Option<LoadingScreen>,
    pub particles: ParticleField,
    pub resize: Debouncer<(u16, u16)>,

    /// Username after a successful login or signup.
    pub user: Option<String>,
    /// Header control under the mouse pointer.
    pub hover: Option<HeaderControl>,
    pub layout: ScreenLayout,
    pub size: (u16, u16),
}

impl AppState {
    pub fn new(config: &Config, prefs: PreferenceStore, forum: Forum) -> Self {
        Self::new_at(config, prefs, forum, Instant::now())
    }

    pub fn new_at(config: &Config, prefs: PreferenceStore, forum: Forum, now: Instant) -> Self {
        let mut overlays = OverlayCoordinator::new(config.focus_delay());
        register_overlays(&mut overlays);

        let theme = Theme::load(&prefs);
        let bookmarks = Bookmarks::load(&prefs);
        let home = HomeState::new(&forum.stats, config.counter_duration());
        let loading = config
            .loading_screen()
            .map(|duration| LoadingScreen::new(now, duration));

        Self {
            now,
            started_at: now,
            should_quit: false,
            overlays,
            shortcuts: Shortcuts::default(),
            panels: Panels::default(),
            forum,
            view: View::Home,
            home,
            thread: None,
            votes: PostVotes::default(),
            toasts: ToastQueue::new(config.toast_duration()),
            theme,
            prefs,
            bookmarks,
            konami: KonamiDetector::new(),
            loading,
            particles: ParticleField::new(config.particles),
            resize: Debouncer::new(config.resize_debounce()),
            user: None,
            hover: None,
            layout: ScreenLayout::default(),
            size: (0, 0),
        }
    }

    pub fn signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Colors for this frame; matrix mode overrides the theme.
    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.theme, self.konami.matrix_active(self.now))
    }

    /// Whether something on screen moves without input, so the runtime
    /// should tick at frame rate.
    pub fn is_animating(&self) -> bool {
        let now = self.now;
        self.loading.is_some()
            || self.resize.is_pending()
            || self.konami.matrix_active(now)
            || self
                .home
                .counters
                .iter()
                .any(|c| c.is_started() && !c.is_finished(now))
    }

    /// Scroll offset of the page currently shown.
    pub fn page_scroll(&self) -> u32 {
        match (self.view, &self.thread) {
            (View::Thread, Some(thread)) => thread.scroll,
            _ => self.home.scroll,
        }
    }

    pub fn open_thread(&mut self, id: &str) -> bool {
        if self.forum.thread(id).is_none() {
            tracing::warn!(thread = id, "Unknown thread requested");
            return false;
        }
        self.thread = Some(ThreadView::new(id));
        self.view = View::Thread;
        true
    }

    pub fn go_home(&mut self) {
        self.view = View::Home;
        self.thread = None;
    }
}

/// App over the built-in forum with prefs in a temp dir.
#[cfg(test)]
pub(crate) fn test_app() -> (tempfile::TempDir, AppState) {
    let dir = tempfile::tempdir().unwrap();
    let prefs = PreferenceStore::open(&dir.path().join("prefs.json")).unwrap();
    let app = AppState::new(&Config::default(), prefs, Forum::builtin().unwrap());
    (dir, app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registers_all_overlays() {
        let (_dir, app) = test_app();
        for id in [
            OverlayId::Search,
            OverlayId::CreateThread,
            OverlayId::NavDrawer,
            LOGIN_DIALOG,
            SIGNUP_DIALOG,
        ] {
            assert!(app.overlays.is_registered(id), "{id} not registered");
            assert!(!app.overlays.is_open(id).unwrap());
        }
        assert!(app.loading.is_some());
        assert_eq!(app.view, View::Home);
    }

    #[test]
    fn test_open_thread_rejects_unknown_id() {
        let (_dir, mut app) = test_app();
        assert!(!app.open_thread("does-not-exist"));
        assert_eq!(app.view, View::Home);

        let id = app.forum.threads[0].id.clone();
        assert!(app.open_thread(&id));
        assert_eq!(app.view, View::Thread);
        app.go_home();
        assert!(app.thread.is_none());
    }

    #[test]
    fn test_theme_loads_from_prefs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let mut prefs = PreferenceStore::open(&path).unwrap();
        Theme::Light.save(&mut prefs).unwrap();
        let app = AppState::new(&Config::default(), prefs, Forum::builtin().unwrap());
        assert_eq!(app.theme, Theme::Light);
    }
}
