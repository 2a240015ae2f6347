//! Scoring, level and gravity speed

/// Base points for clearing 0..=4 rows at once
pub const LINE_SCORES: [u64; 5] = [0, 100, 300, 500, 800];
/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;
/// Drop interval at level 1
pub const BASE_DROP_INTERVAL_MS: u64 = 1000;
/// Interval shaved off per level
pub const DROP_INTERVAL_STEP_MS: u64 = 100;
/// Fastest possible drop interval
pub const MIN_DROP_INTERVAL_MS: u64 = 100;

/// Score tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Current level, starting at 1
    pub level: u32,
    /// Total lines cleared
    pub lines: u32,
}

impl Default for Score {
    fn default() -> Self {
        Self::new()
    }
}

impl Score {
    pub fn new() -> Self {
        Self {
            points: 0,
            level: 1,
            lines: 0,
        }
    }

    /// Apply a clear of `rows` rows: award points at the current level, then
    /// accumulate lines and recompute the level. Returns the points awarded.
    pub fn add_clear(&mut self, rows: usize) -> u64 {
        let awarded = line_clear_points(rows, self.level);
        self.points += awarded;
        self.lines += rows as u32;
        self.level = level_for_lines(self.lines);
        awarded
    }

    /// Milliseconds between automatic drops at the current level
    pub fn drop_interval_ms(&self) -> u64 {
        drop_interval_ms(self.level)
    }
}

/// Points for an N-row clear at `level`. Anything outside 1..=4 rows scores nothing.
pub fn line_clear_points(rows: usize, level: u32) -> u64 {
    LINE_SCORES.get(rows).copied().unwrap_or(0) * level as u64
}

/// Level reached after clearing `lines` in total
pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for `level`, floored at 100ms from level 10 on
pub fn drop_interval_ms(level: u32) -> u64 {
    let step = (level.saturating_sub(1) as u64).saturating_mul(DROP_INTERVAL_STEP_MS);
    BASE_DROP_INTERVAL_MS
        .saturating_sub(step)
        .max(MIN_DROP_INTERVAL_MS)
}
