//! Line-oriented user intents for the interactive widget.

use pomocute_core::SettingsForm;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Toggle,
    Start,
    Pause,
    Reset,
    Skip,
    SaveSettings(SettingsForm),
    /// `set` with no arguments: show the prefilled form.
    OpenSettings,
    ToggleTheme,
    Help,
    Quit,
    Unknown(String),
}

pub const HELP: &str = "\
commands:
  <enter> | t                   start/pause
  start | pause                 start or pause only
  r | reset                     back to a fresh focus interval
  s | skip                      jump to the other mode
  set <focus_min> <break_min>   save new durations
  theme                         toggle light/dark
  h | help                      this text
  q | quit                      exit";

pub fn parse(line: &str) -> Intent {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Intent::Toggle;
    };
    match head.to_ascii_lowercase().as_str() {
        "t" | "toggle" => Intent::Toggle,
        "start" => Intent::Start,
        "p" | "pause" => Intent::Pause,
        "r" | "reset" => Intent::Reset,
        "s" | "skip" => Intent::Skip,
        "set" | "settings" => match (words.next(), words.next()) {
            (None, _) => Intent::OpenSettings,
            (Some(focus), brk) => {
                Intent::SaveSettings(SettingsForm::new(focus, brk.unwrap_or_default()))
            }
        },
        "theme" => Intent::ToggleTheme,
        "h" | "help" | "?" => Intent::Help,
        "q" | "quit" | "exit" => Intent::Quit,
        _ => Intent::Unknown(line.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_toggles() {
        assert_eq!(parse(""), Intent::Toggle);
        assert_eq!(parse("   "), Intent::Toggle);
        assert_eq!(parse("t"), Intent::Toggle);
    }

    #[test]
    fn start_and_pause_are_not_toggles() {
        assert_eq!(parse("START"), Intent::Start);
        assert_eq!(parse("pause"), Intent::Pause);
        assert_eq!(parse("p"), Intent::Pause);
    }

    #[test]
    fn set_builds_form() {
        assert_eq!(
            parse("set 30 10"),
            Intent::SaveSettings(SettingsForm::new("30", "10"))
        );
        assert_eq!(parse("set"), Intent::OpenSettings);
        // Missing break value is left for the form to reject.
        assert_eq!(parse("set 30"), Intent::SaveSettings(SettingsForm::new("30", "")));
        assert!(SettingsForm::new("30", "").parse().is_err());
    }

    #[test]
    fn other_commands() {
        assert_eq!(parse("r"), Intent::Reset);
        assert_eq!(parse("skip"), Intent::Skip);
        assert_eq!(parse("theme"), Intent::ToggleTheme);
        assert_eq!(parse("q"), Intent::Quit);
        assert_eq!(parse("?"), Intent::Help);
        assert_eq!(parse("dance"), Intent::Unknown("dance".into()));
    }
}
