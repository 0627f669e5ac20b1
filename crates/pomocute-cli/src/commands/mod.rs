pub mod config;
pub mod run;
pub mod settings;
pub mod status;
pub mod theme;

use pomocute_core::error::Result;
use pomocute_core::{ManualClock, Persistence, SilentAlarm, SqliteStore, TimerEngine};

/// Engine over the on-disk store for one-shot commands. Nothing ticks, so
/// the clock is manual and the alarm silent.
pub(crate) type OneShotEngine = TimerEngine<SqliteStore, ManualClock, SilentAlarm>;

pub(crate) fn open_one_shot() -> Result<OneShotEngine> {
    Ok(TimerEngine::new(
        open_persistence()?,
        ManualClock::new(),
        SilentAlarm,
    ))
}

/// Direct access to the persisted keys, for commands that only write.
pub(crate) fn open_persistence() -> Result<Persistence<SqliteStore>> {
    Ok(Persistence::new(SqliteStore::open()?))
}
