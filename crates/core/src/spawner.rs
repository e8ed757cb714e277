//! Spawner module - random piece generation and the upcoming-piece queue
//!
//! Shapes are drawn uniformly. Skin tokens avoid repeating the most recent
//! picks, with a window that scales with the catalog:
//!
//! - window `k = min(20, floor(0.3 * n))`
//! - minimum candidate pool `min(10, floor(0.2 * n))`
//!
//! When fewer candidates than the minimum remain, the window is reset so a
//! tiny catalog still makes progress. Every 7th generated piece has a 30%
//! chance of becoming a wildcard.
//!
//! Generation is deterministic for a given seed (`Pcg32`).

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::piece::Piece;
use crate::skins::SkinCatalog;
use crate::types::{ShapeKind, SkinToken, QUEUE_DEPTH, WILDCARD_CHANCE, WILDCARD_PERIOD};

/// Number of recent tokens to avoid for a catalog of `catalog_len` skins.
pub fn recency_window(catalog_len: usize) -> usize {
    (catalog_len * 3 / 10).min(20)
}

/// Smallest candidate pool tolerated before the recency window resets.
pub fn min_candidate_pool(catalog_len: usize) -> usize {
    (catalog_len * 2 / 10).min(10)
}

/// Random piece generator.
#[derive(Debug, Clone)]
pub struct Spawner {
    seed: u64,
    rng: Pcg32,
    recent: VecDeque<SkinToken>,
    /// Number of pieces generated so far.
    generated: u64,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            recent: VecDeque::new(),
            generated: 0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn generated(&self) -> u64 {
        self.generated
    }

    /// Forget recently used tokens (e.g. after the catalog changed).
    pub fn reset_recent(&mut self) {
        self.recent.clear();
    }

    /// Generate a fresh piece at the spawn anchor.
    pub fn next_piece(&mut self, skins: &SkinCatalog) -> Piece {
        self.generated += 1;
        let kind = ShapeKind::ALL[self.rng.random_range(0..ShapeKind::ALL.len())];
        let token = self.pick_token(skins);
        let wildcard =
            self.generated % WILDCARD_PERIOD == 0 && self.rng.random_bool(WILDCARD_CHANCE);
        Piece::new(kind, token, wildcard)
    }

    fn pick_token(&mut self, skins: &SkinCatalog) -> SkinToken {
        let n = skins.len();
        let window = recency_window(n);

        let mut pool = self.candidates(skins).count();
        if pool < min_candidate_pool(n).max(1) {
            self.recent.clear();
            pool = n;
        }

        let pick = self.rng.random_range(0..pool);
        let token = self.candidates(skins).nth(pick).unwrap_or_default();
        if window > 0 {
            self.recent.push_back(token);
            while self.recent.len() > window {
                self.recent.pop_front();
            }
        }
        token
    }

    /// Catalog tokens not used within the recency window, in catalog order.
    fn candidates<'a>(&'a self, skins: &'a SkinCatalog) -> impl Iterator<Item = SkinToken> + 'a {
        skins.tokens().filter(move |t| !self.recent.contains(t))
    }
}

/// FIFO of upcoming pieces. Taking the head appends a fresh piece at the tail.
#[derive(Debug, Clone)]
pub struct PieceQueue {
    pieces: VecDeque<Piece>,
    spawner: Spawner,
}

impl PieceQueue {
    /// Create a queue pre-filled to [`QUEUE_DEPTH`].
    pub fn new(seed: u64, skins: &SkinCatalog) -> Self {
        let mut queue = Self {
            pieces: VecDeque::with_capacity(QUEUE_DEPTH + 1),
            spawner: Spawner::new(seed),
        };
        queue.refill(skins);
        queue
    }

    fn refill(&mut self, skins: &SkinCatalog) {
        while self.pieces.len() < QUEUE_DEPTH {
            let piece = self.spawner.next_piece(skins);
            self.pieces.push_back(piece);
        }
    }

    /// Take the head piece and top the queue back up.
    pub fn draw(&mut self, skins: &SkinCatalog) -> Piece {
        let head = match self.pieces.pop_front() {
            Some(piece) => piece,
            None => self.spawner.next_piece(skins),
        };
        self.refill(skins);
        head
    }

    /// Upcoming pieces, head first.
    pub fn peek(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    pub fn spawner_mut(&mut self) -> &mut Spawner {
        &mut self.spawner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_scales_with_catalog() {
        assert_eq!(recency_window(1), 0);
        assert_eq!(recency_window(7), 2);
        assert_eq!(recency_window(50), 15);
        assert_eq!(recency_window(500), 20);

        assert_eq!(min_candidate_pool(1), 0);
        assert_eq!(min_candidate_pool(7), 1);
        assert_eq!(min_candidate_pool(500), 10);
    }

    #[test]
    fn same_seed_same_sequence() {
        let skins = SkinCatalog::builtin();
        let mut a = Spawner::new(42);
        let mut b = Spawner::new(42);
        for _ in 0..50 {
            assert_eq!(a.next_piece(&skins), b.next_piece(&skins));
        }
    }

    #[test]
    fn single_skin_catalog_always_makes_progress() {
        let skins = SkinCatalog::new(["only"]);
        let mut spawner = Spawner::new(7);
        for _ in 0..20 {
            assert_eq!(spawner.next_piece(&skins).token, SkinToken(0));
        }
    }

    #[test]
    fn recent_tokens_are_not_repeated() {
        let labels: Vec<String> = (0..50).map(|i| format!("skin{i}")).collect();
        let skins = SkinCatalog::new(labels);
        let window = recency_window(skins.len());
        let mut spawner = Spawner::new(3);

        let tokens: Vec<SkinToken> = (0..200).map(|_| spawner.next_piece(&skins).token).collect();
        for (i, token) in tokens.iter().enumerate() {
            let start = i.saturating_sub(window);
            assert!(
                !tokens[start..i].contains(token),
                "token {token:?} repeated within window at {i}"
            );
        }
    }

    #[test]
    fn largest_catalog_keeps_recency_rule() {
        let skins = SkinCatalog::new((0..crate::skins::MAX_SKINS + 5).map(|i| format!("skin_{i}")));
        let window = recency_window(skins.len());
        let mut spawner = Spawner::new(9);

        let tokens: Vec<SkinToken> = (0..30).map(|_| spawner.next_piece(&skins).token).collect();
        for (i, token) in tokens.iter().enumerate() {
            let start = i.saturating_sub(window);
            assert!(!tokens[start..i].contains(token), "token {token:?} repeated at {i}");
        }
    }

    #[test]
    fn only_every_seventh_piece_can_be_wildcard() {
        let skins = SkinCatalog::builtin();
        let mut spawner = Spawner::new(11);
        let mut wildcards = 0;
        for i in 1..=700u64 {
            let piece = spawner.next_piece(&skins);
            if piece.wildcard {
                assert_eq!(i % WILDCARD_PERIOD, 0);
                wildcards += 1;
            }
        }
        // 100 eligible pieces at 30%.
        assert!(wildcards > 10 && wildcards < 60, "wildcards = {wildcards}");
    }

    #[test]
    fn queue_is_fifo_and_stays_full() {
        let skins = SkinCatalog::builtin();
        let mut queue = PieceQueue::new(5, &skins);
        assert_eq!(queue.len(), QUEUE_DEPTH);

        let second = *queue.peek().nth(1).unwrap();
        let _ = queue.draw(&skins);
        assert_eq!(queue.peek().next(), Some(&second));
        assert_eq!(queue.len(), QUEUE_DEPTH);
    }
}
