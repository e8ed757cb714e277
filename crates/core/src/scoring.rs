//! Scoring module - points, levels, and gravity speed
//!
//! Classic table scoring: `LINE_SCORES[lines] * level`, where `level` is the
//! level in effect before the clear is counted. Levels start at 1 and rise
//! every [`LINES_PER_LEVEL`] lines; each level shortens the drop interval by
//! 100ms down to a 100ms floor.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_INTERVAL_STEP_MS, HARD_DROP_POINTS_PER_CELL,
    LINES_PER_LEVEL, LINE_SCORES, ROUND_COMPLETE_MIN_LINES, SOFT_DROP_POINTS_PER_STEP,
};

/// Level for a running line total (1-based).
pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level, in milliseconds.
pub fn drop_interval_for_level(level: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(DROP_INTERVAL_STEP_MS);
    BASE_DROP_MS
        .saturating_sub(reduction)
        .max(DROP_INTERVAL_MIN_MS)
}

/// Points for clearing `lines` rows at once (1-4) at `level`.
pub fn line_clear_points(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level)
}

/// Points for a hard drop of `cells` rows.
pub fn hard_drop_points(cells: u32) -> u32 {
    cells.saturating_mul(HARD_DROP_POINTS_PER_CELL)
}

/// Points for one gravity step taken while soft dropping.
pub fn soft_drop_points() -> u32 {
    SOFT_DROP_POINTS_PER_STEP
}

/// Result of counting a line clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineClearOutcome {
    pub lines: usize,
    pub points: u32,
    pub level_before: u32,
    pub level_after: u32,
    /// Clear large enough to advance ambient media.
    pub round_complete: bool,
    /// Four lines at once.
    pub spectacular: bool,
}

impl LineClearOutcome {
    pub fn leveled_up(&self) -> bool {
        self.level_after > self.level_before
    }
}

/// Running score, level, line count, and gravity interval for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scoring {
    score: u32,
    level: u32,
    lines: u32,
    drop_interval_ms: u32,
}

impl Scoring {
    pub fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: BASE_DROP_MS,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    /// Add drop (or other bonus) points. Returns the new score.
    pub fn add_points(&mut self, points: u32) -> u32 {
        self.score = self.score.saturating_add(points);
        self.score
    }

    /// Count a line clear of `lines` rows.
    pub fn apply_line_clear(&mut self, lines: usize) -> LineClearOutcome {
        let level_before = self.level;
        if lines == 0 {
            return LineClearOutcome {
                level_before,
                level_after: level_before,
                ..LineClearOutcome::default()
            };
        }

        let points = line_clear_points(lines, level_before);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(lines as u32);

        let level_after = level_for_lines(self.lines);
        if level_after > self.level {
            self.level = level_after;
            self.drop_interval_ms = drop_interval_for_level(level_after);
        }

        LineClearOutcome {
            lines,
            points,
            level_before,
            level_after: self.level,
            round_complete: lines >= ROUND_COMPLETE_MIN_LINES,
            spectacular: lines == 4,
        }
    }
}

impl Default for Scoring {
    fn default() -> Self {
        Self::new()
    }
}
