//! Timer engine implementation.
//!
//! The engine is a countdown state machine over `(mode, active, time_left)`.
//! It owns no thread: an injected [`ClockSource`] is armed while the timer is
//! active and the caller feeds each delivered token back through `tick()`.
//!
//! ## State Transitions
//!
//! ```text
//! Focus --(complete: sessions += 1)--> Break --(complete)--> Focus
//! Focus <--------------(skip)--------------> Break
//! any   --(reset | apply_settings)--> Focus, inactive, full focus duration
//! ```
//!
//! Active means exactly one live clock token. Pausing, resetting, skipping,
//! applying settings and completion all cancel it before anything else.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(Persistence::new(store), clock, alarm);
//! engine.toggle();
//! // For each token the clock delivers:
//! engine.tick(token); // Some(Event::TimerCompleted { .. }) when the interval ends
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::mode::TimerMode;
use super::settings::TimerSettings;
use crate::alarm::Alarm;
use crate::clock::{ClockSource, ClockToken, TICK_INTERVAL};
use crate::error::ValidationError;
use crate::events::Event;
use crate::storage::{KeyValueStore, Persistence, Theme};

/// Read-only view of the timer handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub mode: TimerMode,
    pub is_active: bool,
    pub time_left: u32,
    /// Length of the current mode's interval in seconds.
    pub duration: u32,
    /// `time_left / duration`, in `[0, 1]`.
    pub progress: f64,
    pub sessions_completed: u32,
    pub settings: TimerSettings,
    pub theme: Theme,
}

/// Core timer engine.
pub struct TimerEngine<S, C, A> {
    persistence: Persistence<S>,
    clock: C,
    alarm: A,
    settings: TimerSettings,
    mode: TimerMode,
    time_left: u32,
    sessions_completed: u32,
    theme: Theme,
    /// The one live clock interval. `Some` exactly while active.
    ticker: Option<ClockToken>,
}

impl<S, C, A> TimerEngine<S, C, A>
where
    S: KeyValueStore,
    C: ClockSource,
    A: Alarm,
{
    /// Cold start: load persisted state and sit paused at the top of a
    /// focus interval.
    pub fn new(persistence: Persistence<S>, clock: C, alarm: A) -> Self {
        let settings = persistence.load_settings();
        let sessions_completed = persistence.load_sessions();
        let theme = persistence.load_theme();
        debug!(
            focus = settings.focus_duration,
            brk = settings.break_duration,
            sessions_completed,
            %theme,
            "timer engine loaded"
        );
        Self {
            persistence,
            clock,
            alarm,
            settings,
            mode: TimerMode::Focus,
            time_left: settings.focus_duration,
            sessions_completed,
            theme,
            ticker: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn is_active(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn sessions_completed(&self) -> u32 {
        self.sessions_completed
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Token of the live clock interval, if active.
    pub fn live_token(&self) -> Option<ClockToken> {
        self.ticker
    }

    pub fn duration_for_mode(&self) -> u32 {
        self.settings.duration_for(self.mode)
    }

    /// Remaining fraction of the current interval, 1.0 at the start.
    pub fn progress(&self) -> f64 {
        let total = self.duration_for_mode();
        if total == 0 {
            return 0.0;
        }
        f64::from(self.time_left) / f64::from(total)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            mode: self.mode,
            is_active: self.is_active(),
            time_left: self.time_left,
            duration: self.duration_for_mode(),
            progress: self.progress(),
            sessions_completed: self.sessions_completed,
            settings: self.settings,
            theme: self.theme,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start when paused, pause when running.
    pub fn toggle(&mut self) -> Option<Event> {
        if self.is_active() {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Arm the clock. No-op when already running or sitting at zero.
    pub fn start(&mut self) -> Option<Event> {
        if self.is_active() {
            return None;
        }
        if self.time_left == 0 {
            debug!(mode = %self.mode, "start ignored at zero");
            return None;
        }
        self.arm();
        debug!(mode = %self.mode, time_left = self.time_left, "timer started");
        Some(Event::TimerStarted {
            mode: self.mode,
            time_left: self.time_left,
            at: Utc::now(),
        })
    }

    /// Cancel the clock, keeping mode and time left.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.is_active() {
            return None;
        }
        self.disarm();
        debug!(mode = %self.mode, time_left = self.time_left, "timer paused");
        Some(Event::TimerPaused {
            mode: self.mode,
            time_left: self.time_left,
            at: Utc::now(),
        })
    }

    /// Back to a paused, full focus interval. Sessions and settings stay.
    pub fn reset(&mut self) -> Event {
        self.disarm();
        self.mode = TimerMode::Focus;
        self.time_left = self.settings.focus_duration;
        debug!("timer reset");
        Event::TimerReset { at: Utc::now() }
    }

    /// Jump to the other mode without counting a session.
    pub fn skip(&mut self) -> Event {
        self.disarm();
        let from = self.mode;
        self.mode = from.next();
        self.time_left = self.settings.duration_for(self.mode);
        debug!(%from, to = %self.mode, "timer skipped");
        Event::TimerSkipped {
            from,
            to: self.mode,
            at: Utc::now(),
        }
    }

    /// Advance one second for the clock interval `token`.
    ///
    /// Ticks from anything but the live interval are dropped. The tick that
    /// reaches zero runs completion before returning, so an active timer is
    /// never observed at zero.
    pub fn tick(&mut self, token: ClockToken) -> Option<Event> {
        if self.ticker != Some(token) {
            debug!(token = token.id(), "stale tick dropped");
            return None;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            return Some(self.complete());
        }
        Some(Event::TimerTicked {
            mode: self.mode,
            time_left: self.time_left,
        })
    }

    /// Replace and persist the settings, then hard reset onto them.
    ///
    /// # Errors
    /// Returns `ValidationError` for a zero duration; nothing changes.
    pub fn apply_settings(&mut self, settings: TimerSettings) -> Result<Event, ValidationError> {
        settings.validate()?;
        self.disarm();
        self.settings = settings;
        self.persistence.save_settings(&settings);
        self.mode = TimerMode::Focus;
        self.time_left = settings.focus_duration;
        info!(
            focus = settings.focus_duration,
            brk = settings.break_duration,
            "settings applied"
        );
        Ok(Event::SettingsApplied {
            settings,
            at: Utc::now(),
        })
    }

    /// Flip and persist the theme.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.persistence.save_theme(self.theme);
        self.theme
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete(&mut self) -> Event {
        self.disarm();
        if let Err(e) = self.alarm.play() {
            warn!(error = %e, "alarm playback failed");
        }

        let completed = self.mode;
        if completed == TimerMode::Focus {
            self.sessions_completed = self.sessions_completed.saturating_add(1);
            self.persistence.save_sessions(self.sessions_completed);
        }
        self.mode = completed.next();
        self.time_left = self.settings.duration_for(self.mode);

        info!(
            %completed,
            next = %self.mode,
            sessions_completed = self.sessions_completed,
            "interval completed"
        );
        Event::TimerCompleted {
            completed,
            next: self.mode,
            sessions_completed: self.sessions_completed,
            at: Utc::now(),
        }
    }

    fn arm(&mut self) {
        self.disarm();
        self.ticker = Some(self.clock.schedule(TICK_INTERVAL));
    }

    fn disarm(&mut self) {
        if let Some(token) = self.ticker.take() {
            self.clock.cancel(token);
        }
    }
}
