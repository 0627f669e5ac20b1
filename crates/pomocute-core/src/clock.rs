//! Clock sources that drive the countdown.
//!
//! A clock source hands out a [`ClockToken`] per armed interval and delivers
//! ticks tagged with that token. The engine keeps at most one live token and
//! drops ticks carrying any other, so a cancelled source can never advance
//! the countdown even if one of its ticks was already in flight.

use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

/// Countdown resolution.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Identifies one armed interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ClockToken(u64);

impl ClockToken {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Something that can fire a recurring tick and be cancelled.
pub trait ClockSource {
    /// Arm a recurring tick every `interval`.
    fn schedule(&mut self, interval: Duration) -> ClockToken;

    /// Stop the interval identified by `token`. Unknown tokens are ignored.
    fn cancel(&mut self, token: ClockToken);
}

impl<C: ClockSource + ?Sized> ClockSource for Box<C> {
    fn schedule(&mut self, interval: Duration) -> ClockToken {
        (**self).schedule(interval)
    }

    fn cancel(&mut self, token: ClockToken) {
        (**self).cancel(token)
    }
}

/// Deterministic clock for tests and step-by-step simulation.
///
/// Nothing fires on its own; the caller feeds [`ManualClock::live_tokens`]
/// back into the engine.
#[derive(Debug, Default)]
pub struct ManualClock {
    next_id: u64,
    live: BTreeSet<ClockToken>,
    scheduled: usize,
    cancelled: usize,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_tokens(&self) -> Vec<ClockToken> {
        self.live.iter().copied().collect()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Total number of `schedule` calls so far.
    pub fn scheduled_count(&self) -> usize {
        self.scheduled
    }

    /// Total number of `cancel` calls that hit a live token.
    pub fn cancelled_count(&self) -> usize {
        self.cancelled
    }
}

impl ClockSource for ManualClock {
    fn schedule(&mut self, _interval: Duration) -> ClockToken {
        self.next_id += 1;
        let token = ClockToken(self.next_id);
        self.live.insert(token);
        self.scheduled += 1;
        token
    }

    fn cancel(&mut self, token: ClockToken) {
        if self.live.remove(&token) {
            self.cancelled += 1;
        }
    }
}

/// Wall-clock source backed by tokio intervals.
///
/// Each armed interval is its own task sending its token into a channel;
/// the receiver returned by [`TokioClock::new`] is where ticks arrive.
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct TokioClock {
    next_id: u64,
    tx: mpsc::UnboundedSender<ClockToken>,
    tasks: HashMap<ClockToken, JoinHandle<()>>,
}

impl TokioClock {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ClockToken>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let clock = Self {
            next_id: 0,
            tx,
            tasks: HashMap::new(),
        };
        (clock, rx)
    }

    pub fn live_count(&self) -> usize {
        self.tasks.len()
    }
}

impl ClockSource for TokioClock {
    fn schedule(&mut self, interval: Duration) -> ClockToken {
        self.next_id += 1;
        let token = ClockToken(self.next_id);
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            // First tick one full interval after arming, not immediately.
            let start = tokio::time::Instant::now() + interval;
            let mut ticker = tokio::time::interval_at(start, interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if tx.send(token).is_err() {
                    break;
                }
            }
        });
        trace!(token = token.0, "clock armed");
        self.tasks.insert(token, handle);
        token
    }

    fn cancel(&mut self, token: ClockToken) {
        if let Some(handle) = self.tasks.remove(&token) {
            handle.abort();
            trace!(token = token.0, "clock cancelled");
        }
    }
}

impl Drop for TokioClock {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}
