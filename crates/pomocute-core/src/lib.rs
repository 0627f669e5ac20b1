//! # PomoCute Core Library
//!
//! Business logic for the PomoCute Pomodoro timer. The terminal front end
//! is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a focus/break countdown state machine. It owns no
//!   thread; an injected clock source delivers ticks that the caller feeds
//!   back into `tick()`
//! - **Settings**: validated focus/break durations and the minutes form
//! - **Storage**: a string key-value store (SQLite or in-memory) behind a
//!   persistence adapter that degrades to defaults, plus TOML configuration
//! - **Alarm**: fire-and-forget completion cue
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`Persistence`]: Typed access to the persisted keys
//! - [`ClockSource`]: Cancellable recurring tick
//! - [`Config`]: Application configuration management

pub mod alarm;
pub mod clock;
pub mod error;
pub mod events;
pub mod storage;
pub mod timer;

pub use alarm::{Alarm, SilentAlarm, ALARM_URL};
pub use clock::{ClockSource, ClockToken, ManualClock, TokioClock, TICK_INTERVAL};
pub use error::{AlarmError, ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use storage::{Config, KeyValueStore, MemoryStore, Persistence, SqliteStore, Theme};
pub use timer::{SettingsForm, TimerEngine, TimerMode, TimerSettings, TimerSnapshot};
