//! Game state module - the owned game session
//!
//! [`GameSession`] ties together the board, the piece queue, scoring, and
//! the lifecycle state machine:
//!
//! ```text
//! Idle --start--> Playing <--toggle_pause--> Paused
//!                    |
//!                    +--spawn collision--> GameOver
//! any state --restart--> Playing
//! ```
//!
//! Every gameplay operation is a silent no-op unless the session is
//! `Playing`. Observers registered with [`GameSession::add_observer`] are
//! notified synchronously from inside the operation that caused the event.

use crate::board::Board;
use crate::events::{GameObserver, Observers};
use crate::piece::Piece;
use crate::resolver::{collides, drop_distance, try_move, try_rotate};
use crate::scoring::{hard_drop_points, soft_drop_points, Scoring};
use crate::skins::SkinCatalog;
use crate::snapshot::{ActiveSnapshot, PieceSnapshot, RenderSnapshot};
use crate::spawner::PieceQueue;
use crate::types::{
    GameAction, GameStatus, PREVIEW_DEPTH, SLOW_MOTION_FACTOR, SLOW_MOTION_MS,
    SOFT_DROP_INTERVAL_MS,
};

/// Session construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionConfig {
    /// Seed for piece generation. Restarts derive new seeds from it.
    pub seed: u64,
    /// High score carried over from earlier sessions.
    pub high_score: u32,
}

/// Slow-motion window requested by a spectacular clear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlowMotionRequest {
    pub duration_ms: u32,
    pub factor: f64,
}

/// One game session.
#[derive(Debug)]
pub struct GameSession {
    config: SessionConfig,
    skins: SkinCatalog,
    board: Board,
    active: Option<Piece>,
    hold: Option<Piece>,
    queue: PieceQueue,
    scoring: Scoring,
    high_score: u32,
    status: GameStatus,
    can_hold: bool,
    soft_dropping: bool,
    /// Incremented on every restart.
    episode: u32,
    slow_motion: Option<SlowMotionRequest>,
    observers: Observers,
}

impl GameSession {
    pub fn new(config: SessionConfig, skins: SkinCatalog) -> Self {
        let queue = PieceQueue::new(config.seed, &skins);
        Self {
            config,
            skins,
            board: Board::new(),
            active: None,
            hold: None,
            queue,
            scoring: Scoring::new(),
            high_score: config.high_score,
            status: GameStatus::Idle,
            can_hold: true,
            soft_dropping: false,
            episode: 0,
            slow_motion: None,
            observers: Observers::default(),
        }
    }

    /// Register an observer. Observers live as long as the session.
    pub fn add_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.observers.push(observer);
    }

    /// Leave `Idle` and spawn the first piece.
    pub fn start(&mut self) {
        if self.status != GameStatus::Idle {
            return;
        }
        log::info!("session started (seed {})", self.config.seed);
        self.status = GameStatus::Playing;
        self.spawn_piece();
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    pub fn score(&self) -> u32 {
        self.scoring.score()
    }

    pub fn level(&self) -> u32 {
        self.scoring.level()
    }

    pub fn lines(&self) -> u32 {
        self.scoring.lines()
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn soft_dropping(&self) -> bool {
        self.soft_dropping
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn held(&self) -> Option<Piece> {
        self.hold
    }

    pub fn next_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.queue.peek()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for scenario setup in tools and tests.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn skins(&self) -> &SkinCatalog {
        &self.skins
    }

    /// Swap in a new skin catalog (e.g. once custom assets have loaded).
    ///
    /// Tokens already on the board or in the queue keep their index and wrap
    /// when resolved against the new catalog.
    pub fn replace_skins(&mut self, skins: SkinCatalog) {
        log::info!("skin catalog replaced ({} skins)", skins.len());
        self.skins = skins;
        self.queue.spawner_mut().reset_recent();
    }

    /// Replace the active piece, if the target position is free.
    pub fn place_active(&mut self, piece: Piece) -> bool {
        if !self.is_playing() || collides(&self.board, &piece) {
            return false;
        }
        self.active = Some(piece);
        true
    }

    /// Gravity interval currently in effect (soft drop overrides level speed).
    pub fn current_drop_interval(&self) -> u32 {
        if self.soft_dropping {
            SOFT_DROP_INTERVAL_MS
        } else {
            self.scoring.drop_interval_ms()
        }
    }

    /// Take the pending slow-motion request, if a clear produced one.
    pub fn take_slow_motion_request(&mut self) -> Option<SlowMotionRequest> {
        self.slow_motion.take()
    }

    /// Dispatch a discrete action. Returns whether it changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_piece(-1, 0),
            GameAction::MoveRight => self.move_piece(1, 0),
            GameAction::MoveDown => self.move_piece(0, 1),
            GameAction::SoftDropStart => self.start_soft_drop(),
            GameAction::SoftDropStop => self.stop_soft_drop(),
            GameAction::HardDrop => self.hard_drop().is_some(),
            GameAction::Rotate => self.rotate_piece(),
            GameAction::Hold => self.hold_piece(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Move the active piece. A blocked downward move locks the piece.
    ///
    /// Returns whether the piece moved.
    pub fn move_piece(&mut self, dx: i8, dy: i8) -> bool {
        if !self.is_playing() {
            return false;
        }
        let Some(mut piece) = self.active else {
            return false;
        };

        if try_move(&self.board, &mut piece, dx, dy) {
            self.active = Some(piece);
            return true;
        }

        if dy > 0 {
            self.lock_piece();
        }
        false
    }

    /// Rotate the active piece clockwise with kicks.
    pub fn rotate_piece(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        let Some(mut piece) = self.active else {
            return false;
        };
        if try_rotate(&self.board, &mut piece).is_some() {
            self.active = Some(piece);
            return true;
        }
        false
    }

    /// Swap the active piece with the hold slot, once per spawn.
    ///
    /// A stored piece comes back at the spawn anchor in the orientation it
    /// was stored with. If that position is blocked the game ends.
    pub fn hold_piece(&mut self) -> bool {
        if !self.is_playing() || !self.can_hold {
            return false;
        }
        let Some(current) = self.active else {
            return false;
        };

        match self.hold.replace(current) {
            Some(mut stored) => {
                stored.reset_position();
                if collides(&self.board, &stored) {
                    self.active = None;
                    self.end_game();
                    return true;
                }
                self.active = Some(stored);
            }
            None => {
                self.active = None;
                if !self.spawn_piece() {
                    return true;
                }
            }
        }

        self.can_hold = false;
        true
    }

    /// Drop the active piece to its resting row and lock it.
    ///
    /// Returns the number of rows dropped, or `None` if there was nothing to drop.
    pub fn hard_drop(&mut self) -> Option<u32> {
        if !self.is_playing() {
            return None;
        }
        let mut piece = self.active?;

        let mut distance: u32 = 0;
        while try_move(&self.board, &mut piece, 0, 1) {
            distance += 1;
        }
        self.active = Some(piece);

        // Drop points are credited before the lock.
        self.add_points(hard_drop_points(distance));
        self.lock_piece();
        Some(distance)
    }

    pub fn start_soft_drop(&mut self) -> bool {
        if !self.is_playing() || self.soft_dropping {
            return false;
        }
        self.soft_dropping = true;
        true
    }

    /// Clear the soft drop flag. Allowed in any state.
    pub fn stop_soft_drop(&mut self) -> bool {
        std::mem::replace(&mut self.soft_dropping, false)
    }

    /// Flip between `Playing` and `Paused`. No-op otherwise.
    pub fn toggle_pause(&mut self) -> bool {
        self.status = match self.status {
            GameStatus::Playing => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Playing,
            _ => return false,
        };
        log::debug!("status -> {}", self.status.as_str());
        true
    }

    /// Start over with a fresh board, score, and queue. The high score stays.
    pub fn restart(&mut self) {
        self.episode = self.episode.wrapping_add(1);
        let seed = self.config.seed.wrapping_add(self.episode as u64);
        log::info!("session restarted (episode {}, seed {seed})", self.episode);

        self.board.clear();
        self.active = None;
        self.hold = None;
        self.queue = PieceQueue::new(seed, &self.skins);
        self.scoring.reset();
        self.can_hold = true;
        self.soft_dropping = false;
        self.slow_motion = None;
        self.status = GameStatus::Playing;

        let score = self.scoring.score();
        self.observers.each(|o| o.on_score_changed(score));
        self.spawn_piece();
    }

    /// Promote the queue head to the active piece.
    ///
    /// Returns `false` (and ends the game) if the spawn position is blocked.
    pub fn spawn_piece(&mut self) -> bool {
        let piece = self.queue.draw(&self.skins);
        self.can_hold = true;

        if collides(&self.board, &piece) {
            log::debug!("spawn blocked for {}", piece.kind.as_str());
            self.active = None;
            self.end_game();
            return false;
        }

        self.active = Some(piece);
        true
    }

    /// One forced downward step from the loop.
    ///
    /// Returns whether the piece moved (a blocked step locks it instead).
    pub fn gravity_step(&mut self) -> bool {
        if !self.is_playing() || self.active.is_none() {
            return false;
        }
        let moved = self.move_piece(0, 1);
        if self.soft_dropping && self.is_playing() {
            self.add_points(soft_drop_points());
        }
        moved
    }

    /// Resting row of the active piece, without moving it.
    pub fn ghost_y(&self) -> Option<i8> {
        let piece = self.active?;
        Some(piece.y + drop_distance(&self.board, &piece) as i8)
    }

    pub fn snapshot_into(&self, out: &mut RenderSnapshot) {
        self.board.write_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.hold = self.hold.map(PieceSnapshot::from);
        out.next.clear();
        for piece in self.queue.peek().take(PREVIEW_DEPTH) {
            out.next.push((*piece).into());
        }
        out.can_hold = self.can_hold;
        out.status = self.status;
        out.soft_dropping = self.soft_dropping;
        out.score = self.scoring.score();
        out.level = self.scoring.level();
        out.lines = self.scoring.lines();
        out.high_score = self.high_score;
        out.drop_interval_ms = self.current_drop_interval();
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        let mut s = RenderSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Lock the active piece, clear rows, score, and spawn the next piece.
    fn lock_piece(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        self.board.lock_cells(&piece);
        self.observers.each(|o| o.on_piece_locked());

        let rows = self.board.clear_full_rows();
        if !rows.is_empty() {
            let outcome = self.scoring.apply_line_clear(rows.len());
            log::debug!(
                "cleared {} rows for {} points",
                outcome.lines,
                outcome.points
            );

            self.observers
                .each(|o| o.on_lines_cleared(rows.len(), rows.as_slice()));
            self.notify_score();

            if outcome.leveled_up() {
                let level = outcome.level_after;
                log::info!("level up -> {level}");
                self.observers.each(|o| o.on_level_up(level));
            }
            if outcome.round_complete {
                self.observers.each(|o| o.on_round_complete());
            }
            if outcome.spectacular {
                let request = SlowMotionRequest {
                    duration_ms: SLOW_MOTION_MS,
                    factor: SLOW_MOTION_FACTOR,
                };
                self.slow_motion = Some(request);
                self.observers
                    .each(|o| o.on_slow_motion(request.duration_ms, request.factor));
            }
        }

        self.spawn_piece();
    }

    fn add_points(&mut self, points: u32) {
        if points == 0 {
            return;
        }
        self.scoring.add_points(points);
        self.notify_score();
    }

    fn notify_score(&mut self) {
        let score = self.scoring.score();
        self.observers.each(|o| o.on_score_changed(score));
        if score > self.high_score {
            self.high_score = score;
            self.observers.each(|o| o.on_high_score_changed(score));
        }
    }

    fn end_game(&mut self) {
        self.status = GameStatus::GameOver;
        self.soft_dropping = false;
        let (score, level, lines) = (
            self.scoring.score(),
            self.scoring.level(),
            self.scoring.lines(),
        );
        log::info!("game over: score {score}, level {level}, lines {lines}");
        self.observers.each(|o| o.on_game_over(score, level, lines));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventLog, GameEvent};
    use crate::types::{Block, ShapeKind, SkinToken, BOARD_HEIGHT, BOARD_WIDTH};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn session() -> GameSession {
        let mut s = GameSession::new(
            SessionConfig {
                seed: 12345,
                high_score: 0,
            },
            SkinCatalog::builtin(),
        );
        s.start();
        s
    }

    fn block() -> Option<Block> {
        Some(Block {
            token: SkinToken(0),
            wildcard: false,
        })
    }

    #[test]
    fn test_new_session_is_idle() {
        let s = GameSession::new(SessionConfig::default(), SkinCatalog::builtin());
        assert_eq!(s.status(), GameStatus::Idle);
        assert!(s.active().is_none());
        assert_eq!(s.level(), 1);
        assert_eq!(s.current_drop_interval(), 1000);
    }

    #[test]
    fn test_actions_ignored_while_idle() {
        let mut s = GameSession::new(SessionConfig::default(), SkinCatalog::builtin());
        assert!(!s.move_piece(1, 0));
        assert!(!s.rotate_piece());
        assert!(!s.hold_piece());
        assert!(s.hard_drop().is_none());
        assert!(!s.toggle_pause());
        assert_eq!(s.status(), GameStatus::Idle);
    }

    #[test]
    fn test_start_spawns_piece() {
        let s = session();
        assert_eq!(s.status(), GameStatus::Playing);
        assert!(s.active().is_some());
        assert!(s.can_hold());
        assert_eq!(s.next_pieces().count(), 4);
    }

    #[test]
    fn test_pause_blocks_actions() {
        let mut s = session();
        let before = s.active();
        assert!(s.toggle_pause());
        assert_eq!(s.status(), GameStatus::Paused);
        assert!(!s.move_piece(1, 0));
        assert!(!s.rotate_piece());
        assert!(!s.gravity_step());
        assert_eq!(s.active(), before);
        assert!(s.toggle_pause());
        assert_eq!(s.status(), GameStatus::Playing);
    }

    #[test]
    fn test_hold_once_per_spawn() {
        let mut s = session();
        let first = s.active().unwrap();
        let queued = *s.next_pieces().next().unwrap();

        assert!(s.hold_piece());
        assert_eq!(s.held().unwrap().kind, first.kind);
        assert_eq!(s.active().unwrap().kind, queued.kind);
        assert!(!s.can_hold());

        let active = s.active();
        assert!(!s.hold_piece());
        assert_eq!(s.active(), active);
    }

    #[test]
    fn test_hold_swap_recenters_with_stored_orientation() {
        let mut s = session();
        s.rotate_piece();
        let stored = s.active().unwrap();
        s.hold_piece();
        s.hard_drop();

        assert!(s.can_hold());
        assert!(s.hold_piece());
        let back = s.active().unwrap();
        assert_eq!(back.kind, stored.kind);
        assert_eq!(back.matrix, stored.matrix);
        assert_eq!(back.y, 0);
    }

    #[test]
    fn test_hard_drop_scores_distance_and_locks() {
        let mut s = session();
        let distance = s.hard_drop().unwrap();
        assert!(distance > 0);
        assert_eq!(s.score(), distance * 2);
        assert_eq!(s.board().filled_count(), 4);
        assert!(s.active().is_some());
    }

    #[test]
    fn test_gravity_step_soft_drop_awards_point() {
        let mut s = session();
        assert!(s.start_soft_drop());
        assert_eq!(s.current_drop_interval(), SOFT_DROP_INTERVAL_MS);
        assert!(s.gravity_step());
        assert_eq!(s.score(), 1);
        s.stop_soft_drop();
        assert!(s.gravity_step());
        assert_eq!(s.score(), 1);
    }

    #[test]
    fn test_blocked_spawn_ends_game() {
        let log = Rc::new(RefCell::new(EventLog::new()));
        let mut s = session();
        s.add_observer(Box::new(Rc::clone(&log)));

        for y in 0..2 {
            for x in 0..BOARD_WIDTH as i8 {
                if x != 0 {
                    s.board_mut().set(x, y, block());
                }
            }
        }
        assert!(!s.spawn_piece());
        assert_eq!(s.status(), GameStatus::GameOver);
        assert!(s.active().is_none());
        assert!(!s.toggle_pause());
        assert!(log
            .borrow()
            .events()
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. })));
    }

    #[test]
    fn test_restart_keeps_high_score() {
        let mut s = session();
        s.hard_drop();
        let high = s.high_score();
        assert!(high > 0);

        s.restart();
        assert_eq!(s.status(), GameStatus::Playing);
        assert_eq!(s.score(), 0);
        assert_eq!(s.high_score(), high);
        assert_eq!(s.board().filled_count(), 0);
        assert!(s.held().is_none());
        assert_eq!(s.episode(), 1);
    }

    #[test]
    fn test_high_score_follows_score_changed() {
        let log = Rc::new(RefCell::new(EventLog::new()));
        let mut s = GameSession::new(
            SessionConfig {
                seed: 1,
                high_score: 5,
            },
            SkinCatalog::builtin(),
        );
        s.add_observer(Box::new(Rc::clone(&log)));
        s.start();
        let distance = s.hard_drop().unwrap();

        let events = log.borrow();
        let score_idx = events
            .events()
            .iter()
            .position(|e| *e == GameEvent::ScoreChanged(distance * 2))
            .unwrap();
        assert_eq!(
            events.events()[score_idx + 1],
            GameEvent::HighScoreChanged(distance * 2)
        );
    }

    #[test]
    fn test_tetris_requests_slow_motion() {
        let mut s = session();
        for y in (BOARD_HEIGHT as i8 - 4)..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                if x != 0 {
                    s.board_mut().set(x, y, block());
                }
            }
        }
        let mut piece = Piece::new(ShapeKind::I, SkinToken(1), false);
        piece.matrix = piece.matrix.rotated_cw();
        piece.x = -2;
        assert!(s.place_active(piece));
        s.hard_drop();

        assert_eq!(s.lines(), 4);
        let request = s.take_slow_motion_request().unwrap();
        assert_eq!(request.duration_ms, SLOW_MOTION_MS);
        assert!(s.take_slow_motion_request().is_none());
    }

    #[test]
    fn test_snapshot_reports_state() {
        let s = session();
        let snap = s.snapshot();
        assert_eq!(snap.status, GameStatus::Playing);
        assert!(snap.active.is_some());
        assert_eq!(snap.next.len(), PREVIEW_DEPTH);
        assert!(snap.ghost_y.unwrap() >= snap.active.unwrap().y);
        assert!(snap.hold.is_none());
    }
}
