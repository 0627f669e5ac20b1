//! Text rendering of the timer widget.

use pomocute_core::storage::UiConfig;
use pomocute_core::{Theme, TimerMode, TimerSnapshot};

/// `MM:SS`; minutes are not capped at 99.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Remaining-time bar, full at the start of an interval.
pub fn progress_bar(progress: f64, width: usize) -> String {
    let filled = (progress.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

/// One dot per session, at least four, completed ones filled.
pub fn session_dots(sessions: u32) -> String {
    let total = sessions.max(4);
    (0..total)
        .map(|i| if i < sessions { '●' } else { '○' })
        .collect()
}

pub fn mascot(mode: TimerMode, is_active: bool) -> &'static str {
    match (mode, is_active) {
        (TimerMode::Focus, true) => "🍅(•̀ᴗ•́)",
        (TimerMode::Focus, false) => "🍅(-ᴗ-)",
        (TimerMode::Break, true) => "🍵(ˆᴗˆ)",
        (TimerMode::Break, false) => "🍵(-ᴗ-)",
    }
}

/// ANSI colour for the mode accent; brighter variants on dark terminals.
fn accent(mode: TimerMode, theme: Theme) -> &'static str {
    match (mode, theme) {
        (TimerMode::Focus, Theme::Light) => "\x1b[31m",
        (TimerMode::Focus, Theme::Dark) => "\x1b[91m",
        (TimerMode::Break, Theme::Light) => "\x1b[32m",
        (TimerMode::Break, Theme::Dark) => "\x1b[92m",
    }
}

const RESET: &str = "\x1b[0m";

pub struct Widget {
    ui: UiConfig,
    color: bool,
}

impl Widget {
    pub fn new(ui: UiConfig, color: bool) -> Self {
        Self { ui, color }
    }

    pub fn line(&self, snap: &TimerSnapshot) -> String {
        let mut parts = Vec::new();
        if self.ui.show_mascot {
            parts.push(mascot(snap.mode, snap.is_active).to_string());
        }
        let label = if self.color {
            format!("{}{}{RESET}", accent(snap.mode, snap.theme), snap.mode.label())
        } else {
            snap.mode.label().to_string()
        };
        parts.push(label);
        parts.push(format_clock(snap.time_left));
        parts.push(progress_bar(snap.progress, self.ui.bar_width as usize));
        parts.push(if snap.is_active { "▶" } else { "⏸" }.to_string());
        parts.push(format!("Session #{}", snap.sessions_completed + 1));
        if self.ui.show_dots {
            parts.push(session_dots(snap.sessions_completed));
        }
        parts.join("  ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pomocute_core::TimerSettings;

    fn snap(time_left: u32, sessions: u32) -> TimerSnapshot {
        TimerSnapshot {
            mode: TimerMode::Focus,
            is_active: false,
            time_left,
            duration: 1500,
            progress: f64::from(time_left) / 1500.0,
            sessions_completed: sessions,
            settings: TimerSettings::default(),
            theme: Theme::Light,
        }
    }

    #[test]
    fn clock_format() {
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(6000), "100:00");
    }

    #[test]
    fn bar_fill() {
        assert_eq!(progress_bar(1.0, 4), "[████]");
        assert_eq!(progress_bar(0.5, 4), "[██░░]");
        assert_eq!(progress_bar(0.0, 4), "[░░░░]");
    }

    #[test]
    fn dots_grow_past_four() {
        assert_eq!(session_dots(0), "○○○○");
        assert_eq!(session_dots(2), "●●○○");
        assert_eq!(session_dots(5), "●●●●●");
    }

    #[test]
    fn plain_line_has_all_parts() {
        let widget = Widget::new(UiConfig::default(), false);
        let line = widget.line(&snap(1500, 1));
        assert!(line.contains("Focus Time"));
        assert!(line.contains("25:00"));
        assert!(line.contains("Session #2"));
        assert!(line.contains("●○○○"));
        assert!(!line.contains('\x1b'));
    }
}
