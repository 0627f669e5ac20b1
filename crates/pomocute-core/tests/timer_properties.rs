//! Property tests for the timer engine invariants.
//!
//! Random sequences of user intents and clock ticks are replayed against a
//! fresh engine; the invariants must hold after every step.

use pomocute_core::{
    Event, ManualClock, MemoryStore, Persistence, SilentAlarm, TimerEngine, TimerMode,
    TimerSettings,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Toggle,
    Reset,
    Skip,
    Tick,
    StaleTick,
    Apply(u32, u32),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Toggle),
        1 => Just(Op::Reset),
        1 => Just(Op::Skip),
        10 => Just(Op::Tick),
        1 => Just(Op::StaleTick),
        1 => (1u32..=5, 1u32..=5).prop_map(|(f, b)| Op::Apply(f * 60, b * 60)),
    ]
}

type Engine = TimerEngine<MemoryStore, ManualClock, SilentAlarm>;

fn small_engine() -> Engine {
    let mut p = Persistence::new(MemoryStore::new());
    p.save_settings(&TimerSettings {
        focus_duration: 3,
        break_duration: 2,
    });
    TimerEngine::new(p, ManualClock::new(), SilentAlarm)
}

proptest! {
    #[test]
    fn invariants_hold_for_any_sequence(ops in prop::collection::vec(op(), 0..200)) {
        let mut e = small_engine();
        let mut stale = None;

        for op in ops {
            let before = e.snapshot();
            match op {
                Op::Toggle => {
                    if let Some(t) = e.live_token() {
                        stale = Some(t);
                    }
                    e.toggle();
                }
                Op::Reset => {
                    e.reset();
                    prop_assert_eq!(e.mode(), TimerMode::Focus);
                    prop_assert!(!e.is_active());
                    prop_assert_eq!(e.time_left(), e.settings().focus_duration);
                    prop_assert_eq!(e.sessions_completed(), before.sessions_completed);
                    prop_assert_eq!(e.settings(), &before.settings);
                }
                Op::Skip => {
                    e.skip();
                    prop_assert_eq!(e.mode(), before.mode.next());
                    prop_assert!(!e.is_active());
                    prop_assert_eq!(e.sessions_completed(), before.sessions_completed);
                }
                Op::Tick => {
                    if let Some(token) = e.live_token() {
                        match e.tick(token) {
                            Some(Event::TimerTicked { .. }) => {
                                prop_assert_eq!(e.time_left(), before.time_left - 1);
                                prop_assert_eq!(e.mode(), before.mode);
                                prop_assert!(e.is_active());
                                prop_assert_eq!(e.sessions_completed(), before.sessions_completed);
                            }
                            Some(Event::TimerCompleted { completed, .. }) => {
                                prop_assert_eq!(before.time_left, 1);
                                prop_assert_eq!(completed, before.mode);
                                prop_assert!(!e.is_active());
                                prop_assert_eq!(e.mode(), before.mode.next());
                                prop_assert_eq!(e.time_left(), e.duration_for_mode());
                                let bump = u32::from(before.mode == TimerMode::Focus);
                                prop_assert_eq!(e.sessions_completed(), before.sessions_completed + bump);
                            }
                            other => prop_assert!(false, "unexpected tick result {:?}", other),
                        }
                    }
                }
                Op::StaleTick => {
                    if let Some(token) = stale {
                        if Some(token) != e.live_token() {
                            prop_assert!(e.tick(token).is_none());
                            prop_assert_eq!(e.snapshot(), before);
                        }
                    }
                }
                Op::Apply(f, b) => {
                    if let Some(t) = e.live_token() {
                        stale = Some(t);
                    }
                    let s = TimerSettings { focus_duration: f, break_duration: b };
                    e.apply_settings(s).unwrap();
                    prop_assert_eq!(e.mode(), TimerMode::Focus);
                    prop_assert!(!e.is_active());
                    prop_assert_eq!(e.time_left(), f);
                }
            }

            prop_assert!(e.time_left() <= e.duration_for_mode());
            prop_assert!(e.clock().live_count() <= 1);
            prop_assert_eq!(e.is_active(), e.clock().live_count() == 1);
            prop_assert!((0.0..=1.0).contains(&e.progress()));
            if e.is_active() {
                prop_assert!(e.time_left() > 0);
            }
        }
    }

    #[test]
    fn settings_round_trip(f in 1u32..=1440, b in 1u32..=1440) {
        let s = TimerSettings { focus_duration: f * 60, break_duration: b * 60 };
        let mut p = Persistence::new(MemoryStore::new());
        p.save_settings(&s);
        prop_assert_eq!(p.load_settings(), s);
    }

    #[test]
    fn garbage_settings_load_as_defaults(raw in "\\PC*") {
        let store = MemoryStore::with_entries([(pomocute_core::storage::SETTINGS_KEY, raw.clone())]);
        let p = Persistence::new(store);
        let loaded = p.load_settings();
        if serde_json::from_str::<TimerSettings>(&raw).map(|s| s.validate().is_ok()).unwrap_or(false) {
            prop_assert_eq!(loaded, serde_json::from_str::<TimerSettings>(&raw).unwrap());
        } else {
            prop_assert_eq!(loaded, TimerSettings::default());
        }
    }
}
