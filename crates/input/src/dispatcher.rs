//! Action dispatcher with per-direction auto-repeat.
//!
//! Each repeating action (left, right, down) owns one slot in a small timer
//! table. Starting a repeat always cancels the slot first, so two timers for
//! the same direction never coexist. Timestamps are host milliseconds from
//! any monotonic clock.
//!
//! Terminals that never report key releases can set
//! [`DispatcherConfig::auto_release_ms`]: a held key that is not refreshed
//! within that window is released automatically. Soft drop is tracked the
//! same way so it stops even when the release never arrives.

use arrayvec::ArrayVec;

use crate::types::{
    GameAction, DOWN_REPEAT_DELAY_MS, DOWN_REPEAT_INTERVAL_MS, HORIZONTAL_REPEAT_DELAY_MS,
    HORIZONTAL_REPEAT_INTERVAL_MS,
};
use emoji_tetris_core::GameSession;

/// Most repeats fired by one [`ActionDispatcher::update`] call.
pub const MAX_REPEATS_PER_UPDATE: usize = 32;

pub type FiredActions = ArrayVec<GameAction, MAX_REPEATS_PER_UPDATE>;

/// Anything that can carry out game actions.
pub trait ActionSink {
    fn apply_action(&mut self, action: GameAction) -> bool;
}

impl ActionSink for GameSession {
    fn apply_action(&mut self, action: GameAction) -> bool {
        GameSession::apply_action(self, action)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatcherConfig {
    /// Release held keys not refreshed within this many milliseconds.
    pub auto_release_ms: Option<u32>,
}

/// Initial delay and steady interval for one repeating action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatTiming {
    pub delay_ms: u32,
    pub interval_ms: u32,
}

impl RepeatTiming {
    pub fn for_action(action: GameAction) -> Option<Self> {
        match action {
            GameAction::MoveLeft | GameAction::MoveRight => Some(Self {
                delay_ms: HORIZONTAL_REPEAT_DELAY_MS,
                interval_ms: HORIZONTAL_REPEAT_INTERVAL_MS,
            }),
            GameAction::MoveDown => Some(Self {
                delay_ms: DOWN_REPEAT_DELAY_MS,
                interval_ms: DOWN_REPEAT_INTERVAL_MS,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RepeatTimer {
    action: GameAction,
    next_fire_ms: u64,
    interval_ms: u32,
    last_seen_ms: u64,
}

const SLOTS: usize = 3;

fn slot(action: GameAction) -> Option<usize> {
    match action {
        GameAction::MoveLeft => Some(0),
        GameAction::MoveRight => Some(1),
        GameAction::MoveDown => Some(2),
        _ => None,
    }
}

#[derive(Debug, Clone, Default)]
pub struct ActionDispatcher {
    config: DispatcherConfig,
    timers: [Option<RepeatTimer>; SLOTS],
    /// Last time the soft-drop key was seen down.
    soft_drop_seen_ms: Option<u64>,
}

impl ActionDispatcher {
    pub fn new(config: DispatcherConfig) -> Self {
        Self {
            config,
            timers: [None; SLOTS],
            soft_drop_seen_ms: None,
        }
    }

    pub fn config(&self) -> DispatcherConfig {
        self.config
    }

    /// Whether `action` is currently held (repeating, or soft drop).
    pub fn is_held(&self, action: GameAction) -> bool {
        if action == GameAction::SoftDropStart {
            return self.soft_drop_seen_ms.is_some();
        }
        slot(action).is_some_and(|i| self.timers[i].is_some())
    }

    /// Perform `action` now and (re)start its repeat timer.
    pub fn press<S: ActionSink + ?Sized>(
        &mut self,
        action: GameAction,
        now_ms: u64,
        sink: &mut S,
    ) -> bool {
        if matches!(action, GameAction::Pause | GameAction::Restart) {
            if self.soft_drop_seen_ms.is_some() {
                sink.apply_action(GameAction::SoftDropStop);
            }
            self.reset();
        }
        let applied = sink.apply_action(action);
        match action {
            GameAction::SoftDropStart => self.soft_drop_seen_ms = Some(now_ms),
            GameAction::SoftDropStop => self.soft_drop_seen_ms = None,
            _ => self.start_repeat(action, now_ms),
        }
        applied
    }

    /// Key-down from a source that may resend presses while a key is held.
    ///
    /// With auto-release enabled a press for an already held action only
    /// refreshes it; otherwise it behaves like [`press`](Self::press).
    pub fn key_down<S: ActionSink + ?Sized>(
        &mut self,
        action: GameAction,
        now_ms: u64,
        sink: &mut S,
    ) -> bool {
        if self.config.auto_release_ms.is_some() && self.is_held(action) {
            self.refresh(action, now_ms);
            return false;
        }
        self.press(action, now_ms, sink)
    }

    /// Stop repeating `action`. Releasing soft drop stops it.
    pub fn release<S: ActionSink + ?Sized>(
        &mut self,
        action: GameAction,
        _now_ms: u64,
        sink: &mut S,
    ) {
        self.stop_repeat(action);
        if action == GameAction::SoftDropStart {
            self.soft_drop_seen_ms = None;
            sink.apply_action(GameAction::SoftDropStop);
        }
    }

    /// Mark a held action as still down without restarting its timer.
    pub fn refresh(&mut self, action: GameAction, now_ms: u64) {
        if action == GameAction::SoftDropStart {
            if let Some(seen) = self.soft_drop_seen_ms.as_mut() {
                *seen = now_ms;
            }
            return;
        }
        if let Some(timer) = slot(action).and_then(|i| self.timers[i].as_mut()) {
            timer.last_seen_ms = now_ms;
        }
    }

    /// Cancel every repeat timer and forget a held soft drop.
    pub fn reset(&mut self) {
        self.timers = [None; SLOTS];
        self.soft_drop_seen_ms = None;
    }

    /// Fire every repeat due at `now_ms`, oldest first.
    pub fn update<S: ActionSink + ?Sized>(
        &mut self,
        now_ms: u64,
        sink: &mut S,
    ) -> FiredActions {
        let mut fired = FiredActions::new();

        if let Some(timeout) = self.config.auto_release_ms {
            for timer in self.timers.iter_mut() {
                if timer.is_some_and(|t| now_ms.saturating_sub(t.last_seen_ms) > timeout as u64) {
                    *timer = None;
                }
            }
            if self
                .soft_drop_seen_ms
                .is_some_and(|seen| now_ms.saturating_sub(seen) > timeout as u64)
            {
                self.soft_drop_seen_ms = None;
                sink.apply_action(GameAction::SoftDropStop);
            }
        }

        while !fired.is_full() {
            let due = self
                .timers
                .iter()
                .enumerate()
                .filter_map(|(i, t)| t.map(|t| (t.next_fire_ms, i)))
                .filter(|&(at, _)| at <= now_ms)
                .min();
            let Some((_, i)) = due else {
                break;
            };
            let Some(timer) = self.timers[i].as_mut() else {
                break;
            };
            timer.next_fire_ms += timer.interval_ms as u64;
            let action = timer.action;
            sink.apply_action(action);
            fired.push(action);
        }

        if fired.is_full() {
            // Host fell far behind; drop the backlog instead of replaying it.
            for timer in self.timers.iter_mut().flatten() {
                if timer.next_fire_ms <= now_ms {
                    timer.next_fire_ms = now_ms + timer.interval_ms as u64;
                }
            }
            log::debug!("input repeat backlog dropped");
        }

        fired
    }

    fn start_repeat(&mut self, action: GameAction, now_ms: u64) {
        let (Some(i), Some(timing)) = (slot(action), RepeatTiming::for_action(action)) else {
            return;
        };
        self.stop_repeat(action);
        self.timers[i] = Some(RepeatTimer {
            action,
            next_fire_ms: now_ms + timing.delay_ms as u64,
            interval_ms: timing.interval_ms,
            last_seen_ms: now_ms,
        });
    }

    fn stop_repeat(&mut self, action: GameAction) {
        if let Some(i) = slot(action) {
            self.timers[i] = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<GameAction>);

    impl ActionSink for Recorder {
        fn apply_action(&mut self, action: GameAction) -> bool {
            self.0.push(action);
            true
        }
    }

    #[test]
    fn press_applies_immediately() {
        let mut d = ActionDispatcher::default();
        let mut sink = Recorder::default();
        d.press(GameAction::Rotate, 0, &mut sink);
        assert_eq!(sink.0, vec![GameAction::Rotate]);
        assert!(!d.is_held(GameAction::Rotate));
    }

    #[test]
    fn horizontal_repeat_timing() {
        let mut d = ActionDispatcher::default();
        let mut sink = Recorder::default();
        d.press(GameAction::MoveLeft, 1000, &mut sink);
        assert!(d.update(1199, &mut sink).is_empty());
        assert_eq!(d.update(1200, &mut sink).len(), 1);
        assert!(d.update(1299, &mut sink).is_empty());
        assert_eq!(d.update(1300, &mut sink).len(), 1);
        assert_eq!(sink.0.len(), 3);
    }

    #[test]
    fn down_repeat_timing_and_catch_up() {
        let mut d = ActionDispatcher::default();
        let mut sink = Recorder::default();
        d.press(GameAction::MoveDown, 0, &mut sink);
        // Fires at 100, 150, 200, 250.
        let fired = d.update(250, &mut sink);
        assert_eq!(fired.len(), 4);
        assert!(fired.iter().all(|&a| a == GameAction::MoveDown));
    }

    #[test]
    fn release_cancels_repeat() {
        let mut d = ActionDispatcher::default();
        let mut sink = Recorder::default();
        d.press(GameAction::MoveRight, 0, &mut sink);
        d.release(GameAction::MoveRight, 50, &mut sink);
        assert!(d.update(1000, &mut sink).is_empty());
        assert_eq!(sink.0, vec![GameAction::MoveRight]);
    }

    #[test]
    fn repress_restarts_instead_of_stacking() {
        let mut d = ActionDispatcher::default();
        let mut sink = Recorder::default();
        d.press(GameAction::MoveLeft, 0, &mut sink);
        d.press(GameAction::MoveLeft, 150, &mut sink);
        // The first timer would have fired at 200; only the restarted one fires (350).
        assert!(d.update(349, &mut sink).is_empty());
        assert_eq!(d.update(350, &mut sink).len(), 1);
    }

    #[test]
    fn directions_fire_in_timestamp_order() {
        let mut d = ActionDispatcher::default();
        let mut sink = Recorder::default();
        d.press(GameAction::MoveLeft, 0, &mut sink);
        d.press(GameAction::MoveDown, 120, &mut sink);
        let fired = d.update(260, &mut sink);
        // Left at 200, down at 220; down's next repeat (270) is not due.
        assert_eq!(
            fired.as_slice(),
            &[GameAction::MoveLeft, GameAction::MoveDown]
        );
    }

    #[test]
    fn soft_drop_release_stops_soft_drop() {
        let mut d = ActionDispatcher::default();
        let mut sink = Recorder::default();
        d.press(GameAction::SoftDropStart, 0, &mut sink);
        d.release(GameAction::SoftDropStart, 10, &mut sink);
        assert_eq!(
            sink.0,
            vec![GameAction::SoftDropStart, GameAction::SoftDropStop]
        );
    }

    #[test]
    fn auto_release_without_refresh() {
        let mut d = ActionDispatcher::new(DispatcherConfig {
            auto_release_ms: Some(150),
        });
        let mut sink = Recorder::default();
        d.key_down(GameAction::MoveLeft, 0, &mut sink);
        d.key_down(GameAction::MoveLeft, 100, &mut sink);
        assert_eq!(sink.0.len(), 1);
        assert!(d.is_held(GameAction::MoveLeft));

        // Last seen at 100; 300 is past the window.
        assert!(d.update(300, &mut sink).is_empty());
        assert!(!d.is_held(GameAction::MoveLeft));
    }

    #[test]
    fn soft_drop_auto_release() {
        let mut d = ActionDispatcher::new(DispatcherConfig {
            auto_release_ms: Some(150),
        });
        let mut sink = Recorder::default();
        d.key_down(GameAction::SoftDropStart, 0, &mut sink);
        d.key_down(GameAction::SoftDropStart, 100, &mut sink);
        assert!(d.is_held(GameAction::SoftDropStart));
        d.update(200, &mut sink);
        assert_eq!(sink.0, vec![GameAction::SoftDropStart]);
        d.update(300, &mut sink);
        assert_eq!(
            sink.0,
            vec![GameAction::SoftDropStart, GameAction::SoftDropStop]
        );
        assert!(!d.is_held(GameAction::SoftDropStart));
    }

    #[test]
    fn pause_stops_held_soft_drop() {
        let mut d = ActionDispatcher::default();
        let mut sink = Recorder::default();
        d.press(GameAction::SoftDropStart, 0, &mut sink);
        d.press(GameAction::Pause, 10, &mut sink);
        assert_eq!(
            sink.0,
            vec![
                GameAction::SoftDropStart,
                GameAction::SoftDropStop,
                GameAction::Pause
            ]
        );
    }

    #[test]
    fn pause_cancels_all_repeats() {
        let mut d = ActionDispatcher::default();
        let mut sink = Recorder::default();
        d.press(GameAction::MoveLeft, 0, &mut sink);
        d.press(GameAction::MoveDown, 0, &mut sink);
        d.press(GameAction::Pause, 10, &mut sink);
        assert!(d.update(1000, &mut sink).is_empty());
    }

    #[test]
    fn drives_a_session() {
        use emoji_tetris_core::{SessionConfig, SkinCatalog};

        let mut session = GameSession::new(SessionConfig::default(), SkinCatalog::builtin());
        session.start();
        let x0 = session.active().unwrap().x;
        let mut d = ActionDispatcher::default();
        d.press(GameAction::MoveLeft, 0, &mut session);
        d.update(200, &mut session);
        assert_eq!(session.active().unwrap().x, x0 - 2);
    }
}
