//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! The reducer never sleeps or touches the outside world. Timers, the
//! clipboard and preference writes run here, and anything asynchronous
//! reports back through the inbox channel as a `UiEvent`.

mod focus;

use std::future::Future;
use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use nexus_core::config::Config;
use nexus_core::forum::Forum;
use nexus_core::interrupt;
use nexus_core::prefs::PreferenceStore;
use nexus_core::widgets::{ToastKind, ToastNotifier};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::common::clipboard;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Tick interval while something animates (~60fps).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Tick interval when nothing moves.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// First frames slower than this get a warning in the log.
const SLOW_STARTUP: Duration = Duration::from_secs(3);

const SAVE_FAILED_MESSAGE: &str = "Could not save preferences ⚠️";

/// Full-screen runtime. The terminal is restored on drop, panic and
/// Ctrl+C.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    /// Spawned effects post their results here.
    inbox_tx: mpsc::UnboundedSender<UiEvent>,
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,
    last_tick: Instant,
    /// Keeps ticking fast for a moment after input.
    last_terminal_event: Instant,
}

impl TuiRuntime {
    pub fn new(config: &Config, prefs: PreferenceStore, forum: Forum) -> Result<Self> {
        terminal::install_panic_hook();
        interrupt::set_restore_hook(|| {
            let _ = terminal::restore_terminal();
        });
        interrupt::reset();

        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        let state = AppState::new(config, prefs, forum);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        let now = Instant::now();
        Ok(Self {
            terminal,
            state,
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;
        let result = self.event_loop();
        let _ = terminal::disable_input_features();
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;
        let mut first_frame = true;

        while !self.state.should_quit {
            if interrupt::is_interrupted() {
                tracing::info!("interrupted, leaving");
                self.state.should_quit = true;
                break;
            }

            let mut events = self.collect_events()?;

            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                }
                // renders are batched to the tick cadence
                if matches!(&event, UiEvent::Tick) {
                    dirty = true;
                }
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;

                if first_frame {
                    first_frame = false;
                    log_startup(self.state.started_at.elapsed());
                }
            }
        }

        Ok(())
    }

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let recent_input = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let tick_interval = if recent_input || self.state.is_animating() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => self.state.should_quit = true,
            UiEffect::ScheduleFocus(request) => {
                self.spawn_effect(move || focus::focus_due(request));
            }
            UiEffect::PersistTheme(theme) => {
                let result = theme.save(&mut self.state.prefs);
                self.report_save("theme", result);
            }
            UiEffect::PersistBookmarks => {
                let result = self.state.bookmarks.save(&mut self.state.prefs);
                self.report_save("bookmarks", result);
            }
            UiEffect::CopyToClipboard { text } => {
                self.spawn_effect(move || copy_to_clipboard(text));
            }
        }
    }

    fn report_save(&mut self, what: &str, result: Result<()>) {
        if let Err(err) = result {
            tracing::warn!(error = %format!("{err:#}"), what, "saving preference failed");
            self.state.toasts.notify(SAVE_FAILED_MESSAGE, ToastKind::Error);
        }
    }

    /// Runs `f` on the tokio runtime and posts its event, if any, to the
    /// inbox.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Option<UiEvent>> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            if let Some(event) = f().await {
                let _ = tx.send(event);
            }
        });
    }
}

fn log_startup(elapsed: Duration) {
    let ms = elapsed.as_millis();
    if elapsed > SLOW_STARTUP {
        tracing::warn!(startup_ms = ms, "slow startup");
    } else {
        tracing::info!(startup_ms = ms, "first frame drawn");
    }
}

/// The clipboard call blocks (X11/Wayland round trips), so it runs off the
/// async workers.
async fn copy_to_clipboard(text: String) -> Option<UiEvent> {
    let ok = match tokio::task::spawn_blocking(move || clipboard::copy(&text)).await {
        Ok(Ok(())) => true,
        Ok(Err(err)) => {
            tracing::warn!(error = %err, "copy failed");
            false
        }
        Err(err) => {
            tracing::warn!(error = %err, "copy task failed");
            false
        }
    };
    Some(UiEvent::ClipboardResult { ok })
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
