//! Terminal-side alarm implementations.

use std::io::Write;
use std::process::{Command, Stdio};

use pomocute_core::storage::AlarmConfig;
use pomocute_core::{Alarm, AlarmError, SilentAlarm, ALARM_URL};

/// Rings the terminal bell.
pub struct TerminalBell;

impl Alarm for TerminalBell {
    fn play(&mut self) -> Result<(), AlarmError> {
        let mut out = std::io::stdout();
        out.write_all(b"\x07")?;
        out.flush()?;
        Ok(())
    }
}

/// Spawns an external player and does not wait for it.
pub struct CommandAlarm {
    program: String,
    args: Vec<String>,
    cue: String,
}

impl CommandAlarm {
    /// Split `command` on whitespace; `None` when it is blank.
    pub fn parse(command: &str, cue: Option<&str>) -> Option<Self> {
        let mut words = command.split_whitespace().map(str::to_string);
        let program = words.next()?;
        Some(Self {
            program,
            args: words.collect(),
            cue: cue.unwrap_or(ALARM_URL).to_string(),
        })
    }
}

impl Alarm for CommandAlarm {
    fn play(&mut self) -> Result<(), AlarmError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(&self.cue)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        // Reap in the background so playback never holds up the timer.
        std::thread::spawn(move || {
            let _ = child.wait();
        });
        Ok(())
    }
}

/// Plays every alarm in order, reporting the first failure.
pub struct AlarmSet(Vec<Box<dyn Alarm>>);

impl Alarm for AlarmSet {
    fn play(&mut self) -> Result<(), AlarmError> {
        let mut first_err = None;
        for alarm in &mut self.0 {
            if let Err(e) = alarm.play() {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

pub fn from_config(cfg: &AlarmConfig) -> Box<dyn Alarm> {
    if !cfg.enabled {
        return Box::new(SilentAlarm);
    }
    let mut alarms: Vec<Box<dyn Alarm>> = Vec::new();
    if cfg.bell {
        alarms.push(Box::new(TerminalBell));
    }
    if let Some(cmd) = cfg
        .command
        .as_deref()
        .and_then(|c| CommandAlarm::parse(c, cfg.sound.as_deref()))
    {
        alarms.push(Box::new(cmd));
    }
    Box::new(AlarmSet(alarms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_parse_splits_args_and_defaults_cue() {
        let alarm = CommandAlarm::parse("mpv --no-video", None).unwrap();
        assert_eq!(alarm.program, "mpv");
        assert_eq!(alarm.args, vec!["--no-video".to_string()]);
        assert_eq!(alarm.cue, ALARM_URL);
        assert!(CommandAlarm::parse("   ", None).is_none());
    }

    #[test]
    fn missing_player_is_an_error_not_a_panic() {
        let mut alarm =
            CommandAlarm::parse("definitely-not-a-real-player-binary", Some("x.mp3")).unwrap();
        assert!(alarm.play().is_err());
    }

    #[test]
    fn set_keeps_playing_after_failure() {
        struct Fails;
        impl Alarm for Fails {
            fn play(&mut self) -> Result<(), AlarmError> {
                Err(AlarmError::Playback("nope".into()))
            }
        }
        let mut set = AlarmSet(vec![Box::new(Fails), Box::new(SilentAlarm)]);
        assert!(set.play().is_err());
        let mut ok = AlarmSet(vec![Box::new(SilentAlarm)]);
        assert!(ok.play().is_ok());
    }
}
