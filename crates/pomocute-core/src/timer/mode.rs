use serde::{Deserialize, Serialize};
use std::fmt;

/// Which interval the countdown is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimerMode {
    #[default]
    Focus,
    Break,
}

impl TimerMode {
    /// The mode that follows this one on completion or skip.
    pub fn next(self) -> Self {
        match self {
            TimerMode::Focus => TimerMode::Break,
            TimerMode::Break => TimerMode::Focus,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimerMode::Focus => "FOCUS",
            TimerMode::Break => "BREAK",
        }
    }

    /// Human label shown above the countdown.
    pub fn label(self) -> &'static str {
        match self {
            TimerMode::Focus => "Focus Time",
            TimerMode::Break => "Tea Break",
        }
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_alternates() {
        assert_eq!(TimerMode::Focus.next(), TimerMode::Break);
        assert_eq!(TimerMode::Break.next(), TimerMode::Focus);
    }

    #[test]
    fn serializes_uppercase() {
        assert_eq!(serde_json::to_string(&TimerMode::Break).unwrap(), "\"BREAK\"");
        let mode: TimerMode = serde_json::from_str("\"FOCUS\"").unwrap();
        assert_eq!(mode, TimerMode::Focus);
    }
}
