use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{TimerMode, TimerSettings};

/// Every state change in the timer produces an Event.
/// The presentation layer renders and logs from these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        mode: TimerMode,
        time_left: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: TimerMode,
        time_left: u32,
        at: DateTime<Utc>,
    },
    TimerTicked {
        mode: TimerMode,
        time_left: u32,
    },
    /// An interval ran down to zero while active.
    TimerCompleted {
        completed: TimerMode,
        next: TimerMode,
        sessions_completed: u32,
        at: DateTime<Utc>,
    },
    TimerSkipped {
        from: TimerMode,
        to: TimerMode,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    SettingsApplied {
        settings: TimerSettings,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn is_completion(&self) -> bool {
        matches!(self, Event::TimerCompleted { .. })
    }
}
