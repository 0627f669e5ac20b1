//! Typed access to the three persisted keys.
//!
//! Loads never fail: a missing or malformed value degrades to its default
//! with a warning. Saves log failures and carry on, so nothing reaches the
//! timer. The `try_save_*` variants report the failure for callers whose
//! only job is the write.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use super::KeyValueStore;
use crate::error::StorageError;
use crate::timer::TimerSettings;

pub const SESSIONS_KEY: &str = "pomodoro_sessions_count";
pub const SETTINGS_KEY: &str = "pomodoro_settings";
pub const THEME_KEY: &str = "pomodoro_theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

/// Persistence adapter over any [`KeyValueStore`].
#[derive(Debug)]
pub struct Persistence<S> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Completed focus sessions; 0 when missing or not a number.
    pub fn load_sessions(&self) -> u32 {
        let Some(raw) = self.read(SESSIONS_KEY) else {
            return 0;
        };
        match raw.trim().parse::<u32>() {
            Ok(n) => n,
            Err(e) => {
                warn!(key = SESSIONS_KEY, value = %raw, error = %e, "malformed session count, using 0");
                0
            }
        }
    }

    pub fn save_sessions(&mut self, count: u32) {
        self.write(SESSIONS_KEY, &count.to_string());
    }

    /// Stored settings; defaults when missing, unparsable or non-positive.
    pub fn load_settings(&self) -> TimerSettings {
        let Some(raw) = self.read(SETTINGS_KEY) else {
            return TimerSettings::default();
        };
        let parsed = serde_json::from_str::<TimerSettings>(&raw)
            .map_err(|e| e.to_string())
            .and_then(|s| s.validate().map(|()| s).map_err(|e| e.to_string()));
        match parsed {
            Ok(settings) => settings,
            Err(error) => {
                warn!(key = SETTINGS_KEY, %error, "malformed settings, using defaults");
                TimerSettings::default()
            }
        }
    }

    pub fn save_settings(&mut self, settings: &TimerSettings) {
        if let Err(e) = self.try_save_settings(settings) {
            warn!(key = SETTINGS_KEY, error = %e, "storage write failed");
        }
    }

    pub fn try_save_settings(&mut self, settings: &TimerSettings) -> Result<(), StorageError> {
        let json = serde_json::to_string(settings)
            .map_err(|e| StorageError::QueryFailed(format!("serialize settings: {e}")))?;
        self.store.set(SETTINGS_KEY, &json)
    }

    /// Stored theme; light when missing or unknown.
    pub fn load_theme(&self) -> Theme {
        let Some(raw) = self.read(THEME_KEY) else {
            return Theme::default();
        };
        raw.parse::<Theme>().unwrap_or_else(|error| {
            warn!(key = THEME_KEY, %error, "malformed theme, using light");
            Theme::default()
        })
    }

    pub fn save_theme(&mut self, theme: Theme) {
        self.write(THEME_KEY, theme.as_str());
    }

    pub fn try_save_theme(&mut self, theme: Theme) -> Result<(), StorageError> {
        self.store.set(THEME_KEY, theme.as_str())
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "storage read failed, using default");
                None
            }
        }
    }

    fn write(&mut self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            warn!(key, error = %e, "storage write failed");
        }
    }
}
