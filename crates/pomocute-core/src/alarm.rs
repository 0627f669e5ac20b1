//! Completion alarm capability.
//!
//! Playback is fire-and-forget: the engine logs a failed `play` and moves on.

use crate::error::AlarmError;

/// Default cue for players that accept a URL.
pub const ALARM_URL: &str = "https://assets.mixkit.co/active_storage/sfx/2869/2869-preview.mp3";

pub trait Alarm {
    fn play(&mut self) -> Result<(), AlarmError>;
}

impl<A: Alarm + ?Sized> Alarm for Box<A> {
    fn play(&mut self) -> Result<(), AlarmError> {
        (**self).play()
    }
}

/// Plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAlarm;

impl Alarm for SilentAlarm {
    fn play(&mut self) -> Result<(), AlarmError> {
        Ok(())
    }
}
