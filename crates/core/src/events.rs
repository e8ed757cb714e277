//! Events module - typed notifications from a running session
//!
//! Collaborators (persistence, media, effects) implement [`GameObserver`] and
//! override only the callbacks they care about. [`EventLog`] records every
//! callback as a [`GameEvent`] for hosts that prefer polling.

use std::cell::RefCell;
use std::rc::Rc;

use crate::board::FullRows;
use crate::types::BOARD_HEIGHT;

/// Receiver for session notifications. All methods default to no-ops.
pub trait GameObserver {
    fn on_score_changed(&mut self, _score: u32) {}
    fn on_high_score_changed(&mut self, _high_score: u32) {}
    /// `rows` are the removed row indices, bottom to top.
    fn on_lines_cleared(&mut self, _count: usize, _rows: &[usize]) {}
    fn on_level_up(&mut self, _level: u32) {}
    /// A single lock cleared enough lines to advance ambient media.
    fn on_round_complete(&mut self) {}
    fn on_game_over(&mut self, _score: u32, _level: u32, _lines: u32) {}
    fn on_piece_locked(&mut self) {}
    /// A spectacular clear asked the loop for a slow-motion window.
    fn on_slow_motion(&mut self, _duration_ms: u32, _factor: f64) {}
}

impl<T: GameObserver + ?Sized> GameObserver for Rc<RefCell<T>> {
    fn on_score_changed(&mut self, score: u32) {
        self.borrow_mut().on_score_changed(score);
    }

    fn on_high_score_changed(&mut self, high_score: u32) {
        self.borrow_mut().on_high_score_changed(high_score);
    }

    fn on_lines_cleared(&mut self, count: usize, rows: &[usize]) {
        self.borrow_mut().on_lines_cleared(count, rows);
    }

    fn on_level_up(&mut self, level: u32) {
        self.borrow_mut().on_level_up(level);
    }

    fn on_round_complete(&mut self) {
        self.borrow_mut().on_round_complete();
    }

    fn on_game_over(&mut self, score: u32, level: u32, lines: u32) {
        self.borrow_mut().on_game_over(score, level, lines);
    }

    fn on_piece_locked(&mut self) {
        self.borrow_mut().on_piece_locked();
    }

    fn on_slow_motion(&mut self, duration_ms: u32, factor: f64) {
        self.borrow_mut().on_slow_motion(duration_ms, factor);
    }
}

/// Sound hook for an event. Hosts map these to whatever clips they ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Lock,
    LineClear,
    RoundComplete,
    LevelUp,
    GameOver,
}

impl SoundCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Lock => "lock",
            SoundCue::LineClear => "lineClear",
            SoundCue::RoundComplete => "roundComplete",
            SoundCue::LevelUp => "levelUp",
            SoundCue::GameOver => "gameOver",
        }
    }
}

/// One recorded notification.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ScoreChanged(u32),
    HighScoreChanged(u32),
    LinesCleared { count: usize, rows: FullRows },
    LevelUp(u32),
    RoundComplete,
    GameOver { score: u32, level: u32, lines: u32 },
    PieceLocked,
    SlowMotion { duration_ms: u32, factor: f64 },
}

impl GameEvent {
    /// Sound to play for this event, if any.
    pub fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            GameEvent::PieceLocked => Some(SoundCue::Lock),
            GameEvent::LinesCleared { .. } => Some(SoundCue::LineClear),
            GameEvent::RoundComplete => Some(SoundCue::RoundComplete),
            GameEvent::LevelUp(_) => Some(SoundCue::LevelUp),
            GameEvent::GameOver { .. } => Some(SoundCue::GameOver),
            GameEvent::ScoreChanged(_)
            | GameEvent::HighScoreChanged(_)
            | GameEvent::SlowMotion { .. } => None,
        }
    }
}

/// Observer that records every notification in order.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take all recorded events, leaving the log empty.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl GameObserver for EventLog {
    fn on_score_changed(&mut self, score: u32) {
        self.events.push(GameEvent::ScoreChanged(score));
    }

    fn on_high_score_changed(&mut self, high_score: u32) {
        self.events.push(GameEvent::HighScoreChanged(high_score));
    }

    fn on_lines_cleared(&mut self, count: usize, rows: &[usize]) {
        let rows: FullRows = rows.iter().copied().take(BOARD_HEIGHT as usize).collect();
        self.events.push(GameEvent::LinesCleared { count, rows });
    }

    fn on_level_up(&mut self, level: u32) {
        self.events.push(GameEvent::LevelUp(level));
    }

    fn on_round_complete(&mut self) {
        self.events.push(GameEvent::RoundComplete);
    }

    fn on_game_over(&mut self, score: u32, level: u32, lines: u32) {
        self.events.push(GameEvent::GameOver {
            score,
            level,
            lines,
        });
    }

    fn on_piece_locked(&mut self) {
        self.events.push(GameEvent::PieceLocked);
    }

    fn on_slow_motion(&mut self, duration_ms: u32, factor: f64) {
        self.events.push(GameEvent::SlowMotion {
            duration_ms,
            factor,
        });
    }
}

/// Fan-out list of observers owned by a session.
#[derive(Default)]
pub struct Observers {
    list: Vec<Box<dyn GameObserver>>,
}

impl Observers {
    pub fn push(&mut self, observer: Box<dyn GameObserver>) {
        self.list.push(observer);
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub(crate) fn each(&mut self, mut f: impl FnMut(&mut dyn GameObserver)) {
        for observer in &mut self.list {
            f(observer.as_mut());
        }
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.list.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct ScoreOnly {
        last: Option<u32>,
    }

    impl GameObserver for ScoreOnly {
        fn on_score_changed(&mut self, score: u32) {
            self.last = Some(score);
        }
    }

    #[test]
    fn default_methods_are_no_ops() {
        let mut observer = ScoreOnly::default();
        observer.on_level_up(3);
        observer.on_game_over(1, 2, 3);
        observer.on_score_changed(10);
        assert_eq!(observer.last, Some(10));
    }

    #[test]
    fn shared_observer_sees_calls() {
        let shared = Rc::new(RefCell::new(EventLog::new()));
        let mut observers = Observers::default();
        observers.push(Box::new(Rc::clone(&shared)));
        observers.each(|o| o.on_lines_cleared(2, &[19, 18]));
        observers.each(|o| o.on_round_complete());

        let log = shared.borrow();
        assert_eq!(log.len(), 2);
        match &log.events()[0] {
            GameEvent::LinesCleared { count, rows } => {
                assert_eq!(*count, 2);
                assert_eq!(rows.as_slice(), &[19, 18]);
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(log.events()[1], GameEvent::RoundComplete);
    }

    #[test]
    fn sound_cues() {
        assert_eq!(GameEvent::PieceLocked.sound_cue(), Some(SoundCue::Lock));
        assert_eq!(GameEvent::LevelUp(2).sound_cue(), Some(SoundCue::LevelUp));
        assert_eq!(GameEvent::ScoreChanged(5).sound_cue(), None);
        assert_eq!(SoundCue::LineClear.as_str(), "lineClear");
    }

    #[test]
    fn drain_empties_log() {
        let mut log = EventLog::new();
        log.on_piece_locked();
        assert_eq!(log.drain(), vec![GameEvent::PieceLocked]);
        assert!(log.is_empty());
    }
}
