//! Timer settings and the settings form.
//!
//! Durations are stored in seconds but entered in whole minutes. The stored
//! JSON keeps camelCase keys (`focusDuration`, `breakDuration`).

use serde::{Deserialize, Serialize};

use super::mode::TimerMode;
use crate::error::ValidationError;

pub const DEFAULT_FOCUS_SECS: u32 = 25 * 60;
pub const DEFAULT_BREAK_SECS: u32 = 5 * 60;

/// Smallest accepted form value, in minutes.
pub const MIN_MINUTES: i64 = 1;
/// Largest accepted form value, in minutes (one day).
pub const MAX_MINUTES: i64 = 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSettings {
    /// Focus interval length in seconds.
    pub focus_duration: u32,
    /// Break interval length in seconds.
    pub break_duration: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            focus_duration: DEFAULT_FOCUS_SECS,
            break_duration: DEFAULT_BREAK_SECS,
        }
    }
}

impl TimerSettings {
    /// Build settings from whole minutes, rejecting anything outside
    /// `MIN_MINUTES..=MAX_MINUTES`.
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidValue` naming the offending field.
    pub fn from_minutes(focus_min: i64, break_min: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            focus_duration: minutes_to_secs("focus", focus_min)?,
            break_duration: minutes_to_secs("break", break_min)?,
        })
    }

    /// Duration in seconds governing `mode`.
    pub fn duration_for(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Focus => self.focus_duration,
            TimerMode::Break => self.break_duration,
        }
    }

    /// Both durations strictly positive.
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidValue` for a zero duration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.focus_duration == 0 {
            return Err(invalid("focusDuration", "must be greater than zero"));
        }
        if self.break_duration == 0 {
            return Err(invalid("breakDuration", "must be greater than zero"));
        }
        Ok(())
    }

    pub fn focus_minutes(&self) -> u32 {
        self.focus_duration / 60
    }

    pub fn break_minutes(&self) -> u32 {
        self.break_duration / 60
    }
}

/// Raw settings form input, as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    pub focus_minutes: String,
    pub break_minutes: String,
}

impl SettingsForm {
    /// Prefill the form from the current settings.
    pub fn from_settings(settings: &TimerSettings) -> Self {
        Self {
            focus_minutes: settings.focus_minutes().to_string(),
            break_minutes: settings.break_minutes().to_string(),
        }
    }

    pub fn new(focus_minutes: impl Into<String>, break_minutes: impl Into<String>) -> Self {
        Self {
            focus_minutes: focus_minutes.into(),
            break_minutes: break_minutes.into(),
        }
    }

    /// Validate the form into settings.
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidValue` for non-numeric or
    /// out-of-range minutes. The caller keeps its prior settings.
    pub fn parse(&self) -> Result<TimerSettings, ValidationError> {
        let focus = parse_minutes("focus", &self.focus_minutes)?;
        let brk = parse_minutes("break", &self.break_minutes)?;
        TimerSettings::from_minutes(focus, brk)
    }
}

fn parse_minutes(field: &str, raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| invalid(field, &format!("'{}' is not a whole number of minutes", raw.trim())))
}

fn minutes_to_secs(field: &str, minutes: i64) -> Result<u32, ValidationError> {
    if !(MIN_MINUTES..=MAX_MINUTES).contains(&minutes) {
        return Err(invalid(
            field,
            &format!("{minutes} minutes is outside {MIN_MINUTES}..={MAX_MINUTES}"),
        ));
    }
    // Range-checked above, so this fits comfortably in u32.
    Ok(minutes as u32 * 60)
}

fn invalid(field: &str, message: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
}
