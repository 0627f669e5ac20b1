mod engine;
mod mode;
pub mod settings;

pub use engine::{TimerEngine, TimerSnapshot};
pub use mode::TimerMode;
pub use settings::{SettingsForm, TimerSettings};
