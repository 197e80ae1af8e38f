//! Scoring module - line clear points, drop bonuses, level and gravity curve
//!
//! - Line clears award `LINE_SCORES[lines] * level`.
//! - Soft drop awards 1 point per row, hard drop 2 points per row.
//! - `level = lines / 10 + 1`.
//! - `drop_interval_ms = max(100, 1000 - (level - 1) * 100)`.

use serde::{Deserialize, Serialize};

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_INTERVAL_STEP_MS, HARD_DROP_POINTS, LINES_PER_LEVEL,
    LINE_SCORES, SOFT_DROP_POINTS,
};

/// Calculate line clear score
/// lines: number of lines cleared in one lock (0-4)
/// level: current level (1-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level)
}

/// Calculate drop score
/// soft_drop: +1 per cell
/// hard_drop: +2 per cell
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        cells.saturating_mul(HARD_DROP_POINTS)
    } else {
        cells.saturating_mul(SOFT_DROP_POINTS)
    }
}

/// Level for a cumulative line count. Level increases every 10 lines, starting at 1.
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Get drop interval for a level (in milliseconds)
pub fn get_drop_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(DROP_INTERVAL_STEP_MS);
    BASE_DROP_MS.saturating_sub(speedup).max(DROP_INTERVAL_MIN_MS)
}

/// Score, line count and the values derived from them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Progression {
    score: u32,
    lines: u32,
    level: u32,
    drop_interval_ms: u32,
}

/// What a line clear changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearResult {
    /// Points awarded for the clear (already added to the score)
    pub points: u32,
    /// Set when the clear moved to a new level
    pub leveled_up: bool,
}

impl Progression {
    pub fn new() -> Self {
        Self {
            score: 0,
            lines: 0,
            level: 1,
            drop_interval_ms: get_drop_interval_ms(1),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    /// Add drop bonus points for `rows` moved
    pub fn award_drop(&mut self, rows: u32, is_hard_drop: bool) -> u32 {
        let points = calculate_drop_score(rows, is_hard_drop);
        self.score = self.score.saturating_add(points);
        points
    }

    /// Record a lock that cleared `cleared` rows.
    ///
    /// Points use the level in effect when the piece locked; the level and gravity are
    /// recomputed afterwards from the new line total.
    pub fn record_clear(&mut self, cleared: usize) -> ClearResult {
        if cleared == 0 {
            return ClearResult::default();
        }

        let points = calculate_line_score(cleared, self.level);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(cleared as u32);

        let level = calculate_level(self.lines);
        let leveled_up = level != self.level;
        if leveled_up {
            self.level = level;
            self.drop_interval_ms = get_drop_interval_ms(level);
        }

        ClearResult { points, leveled_up }
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}
