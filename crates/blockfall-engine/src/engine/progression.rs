use std::time::Duration;

use super::GameConfig;

/// Outcome of a line-clear event that advanced the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    /// The level just reached.
    pub level: u32,
    /// The drop interval that applies from now on.
    pub drop_interval: Duration,
}

/// Score, level and speed tracking.
///
/// Progression only reacts to line-clear events:
///
/// - **Score**: a flat `score_per_line` for every cleared row, no bonus for
///   clearing several rows at once
/// - **Level**: +1 per line-clear event, however many rows it removed
/// - **Drop interval**: shrinks by `drop_interval_step_ms` per level-up, never
///   below `min_drop_interval_ms`
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use blockfall_engine::{GameConfig, Progression};
///
/// let mut progression = Progression::new(&GameConfig::default());
/// let level_up = progression.on_lines_cleared(3).unwrap();
///
/// assert_eq!(progression.score(), 300);
/// assert_eq!(level_up.level, 2);
/// assert_eq!(level_up.drop_interval, Duration::from_millis(900));
/// assert_eq!(progression.on_lines_cleared(0), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progression {
    score: u64,
    level: u32,
    drop_interval_ms: u64,
    min_drop_interval_ms: u64,
    drop_interval_step_ms: u64,
    score_per_line: u64,
    completed_pieces: u64,
    total_cleared_lines: u64,
    line_cleared_counter: [u64; 5],
}

impl Progression {
    /// Creates a tracker at level 1 with a zero score and the initial interval.
    #[must_use]
    pub const fn new(config: &GameConfig) -> Self {
        Self {
            score: 0,
            level: 1,
            drop_interval_ms: config.initial_drop_interval_ms,
            min_drop_interval_ms: config.min_drop_interval_ms,
            drop_interval_step_ms: config.drop_interval_step_ms,
            score_per_line: config.score_per_line,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub const fn drop_interval(&self) -> Duration {
        Duration::from_millis(self.drop_interval_ms)
    }

    /// Returns the number of pieces committed to the board.
    #[must_use]
    pub const fn completed_pieces(&self) -> u64 {
        self.completed_pieces
    }

    /// Returns the total number of rows cleared across all events.
    #[must_use]
    pub const fn total_cleared_lines(&self) -> u64 {
        self.total_cleared_lines
    }

    /// Returns how many line-clear events removed 1, 2, 3 or 4 rows.
    ///
    /// - `[0]`: Number of committed pieces that cleared nothing
    /// - `[1]` to `[4]`: Number of events clearing that many rows at once
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[u64; 5] {
        &self.line_cleared_counter
    }

    /// Counts a piece commit and the rows it cleared.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) -> Option<LevelUp> {
        self.completed_pieces += 1;
        if let Some(counter) = self.line_cleared_counter.get_mut(cleared_lines) {
            *counter += 1;
        }
        self.on_lines_cleared(cleared_lines)
    }

    /// Applies a line-clear event. Returns the level-up it caused, if any.
    ///
    /// A zero count is not an event and changes nothing.
    pub fn on_lines_cleared(&mut self, count: usize) -> Option<LevelUp> {
        if count == 0 {
            return None;
        }
        let count = u64::try_from(count).unwrap_or(u64::MAX);
        self.total_cleared_lines = self.total_cleared_lines.saturating_add(count);
        self.score = self
            .score
            .saturating_add(self.score_per_line.saturating_mul(count));
        self.level = self.level.saturating_add(1);
        self.drop_interval_ms = self
            .drop_interval_ms
            .saturating_sub(self.drop_interval_step_ms)
            .max(self.min_drop_interval_ms);
        Some(LevelUp {
            level: self.level,
            drop_interval: self.drop_interval(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progression() -> Progression {
        Progression::new(&GameConfig::default())
    }

    #[test]
    fn test_initial_state() {
        let progression = progression();
        assert_eq!(progression.score(), 0);
        assert_eq!(progression.level(), 1);
        assert_eq!(progression.drop_interval(), Duration::from_millis(1000));
        assert_eq!(progression.total_cleared_lines(), 0);
    }

    #[test]
    fn test_single_line_scores_100() {
        let mut progression = progression();
        let level_up = progression.on_lines_cleared(1);
        assert_eq!(progression.score(), 100);
        assert_eq!(
            level_up,
            Some(LevelUp {
                level: 2,
                drop_interval: Duration::from_millis(900)
            })
        );
    }

    #[test]
    fn test_multi_line_event_levels_once() {
        let mut progression = progression();
        progression.on_lines_cleared(3);
        assert_eq!(progression.score(), 300);
        assert_eq!(progression.level(), 2);
        assert_eq!(progression.total_cleared_lines(), 3);
    }

    #[test]
    fn test_no_bonus_for_simultaneous_clears() {
        let mut at_once = progression();
        at_once.on_lines_cleared(4);

        let mut one_by_one = progression();
        for _ in 0..4 {
            one_by_one.on_lines_cleared(1);
        }

        assert_eq!(at_once.score(), one_by_one.score());
        assert_eq!(at_once.level(), 2);
        assert_eq!(one_by_one.level(), 5);
    }

    #[test]
    fn test_zero_lines_is_not_an_event() {
        let mut progression = progression();
        assert_eq!(progression.on_lines_cleared(0), None);
        assert_eq!(progression, self::progression());
    }

    #[test]
    fn test_interval_floor() {
        let mut progression = progression();
        for _ in 0..20 {
            progression.on_lines_cleared(1);
        }
        assert_eq!(progression.level(), 21);
        assert_eq!(progression.drop_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_interval_floor_with_uneven_step() {
        let config = GameConfig {
            initial_drop_interval_ms: 250,
            min_drop_interval_ms: 100,
            drop_interval_step_ms: 80,
            ..GameConfig::DEFAULT
        };
        let mut progression = Progression::new(&config);
        let intervals: Vec<_> = (0..4)
            .map(|_| progression.on_lines_cleared(1).unwrap().drop_interval.as_millis())
            .collect();
        assert_eq!(intervals, [170, 100, 100, 100]);
    }

    #[test]
    fn test_complete_piece_drop_counts() {
        let mut progression = progression();
        assert_eq!(progression.complete_piece_drop(0), None);
        assert!(progression.complete_piece_drop(2).is_some());
        assert!(progression.complete_piece_drop(4).is_some());

        assert_eq!(progression.completed_pieces(), 3);
        assert_eq!(progression.line_cleared_counter(), &[1, 0, 1, 0, 1]);
        assert_eq!(progression.score(), 600);
        assert_eq!(progression.level(), 3);
    }
}
