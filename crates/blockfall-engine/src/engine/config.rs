use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::MAX_BOARD_SIZE;

/// Tunable game constants.
///
/// Everything the rules depend on is configurable so that tests can run on
/// small boards with short intervals. Missing fields fall back to the
/// defaults when deserializing.
///
/// # Example
///
/// ```
/// use blockfall_engine::GameConfig;
///
/// let config: GameConfig = serde_json::from_str(r#"{ "width": 6, "height": 8 }"#).unwrap();
/// assert_eq!(config.width, 6);
/// assert_eq!(config.initial_drop_interval_ms, 1000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Board width in cells.
    pub width: usize,
    /// Board height in cells.
    pub height: usize,
    /// Rendering hint: terminal columns used for one cell.
    pub block_size: u16,
    /// Drop interval at level 1.
    pub initial_drop_interval_ms: u64,
    /// Floor for the drop interval.
    pub min_drop_interval_ms: u64,
    /// Amount the drop interval shrinks on each level-up.
    pub drop_interval_step_ms: u64,
    /// Points per cleared row.
    pub score_per_line: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl GameConfig {
    pub const DEFAULT: Self = Self {
        width: 12,
        height: 20,
        block_size: 2,
        initial_drop_interval_ms: 1000,
        min_drop_interval_ms: 100,
        drop_interval_step_ms: 100,
        score_per_line: 100,
    };

    /// Returns a copy with a different board size.
    #[must_use]
    pub const fn with_size(self, width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..self
        }
    }

    #[must_use]
    pub const fn initial_drop_interval(&self) -> Duration {
        Duration::from_millis(self.initial_drop_interval_ms)
    }

    /// Checks that the configuration describes a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let size_range = 1..=MAX_BOARD_SIZE;
        if !size_range.contains(&self.width) || !size_range.contains(&self.height) {
            return Err(ConfigError::InvalidBoardSize {
                width: self.width,
                height: self.height,
            });
        }
        if self.block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        if self.min_drop_interval_ms == 0 {
            return Err(ConfigError::ZeroMinDropInterval);
        }
        if self.min_drop_interval_ms > self.initial_drop_interval_ms {
            return Err(ConfigError::MinIntervalAboveInitial {
                min_ms: self.min_drop_interval_ms,
                initial_ms: self.initial_drop_interval_ms,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("board size must be between 1x1 and 255x255, got {width}x{height}")]
    InvalidBoardSize { width: usize, height: usize },
    #[display("block size must be at least 1")]
    ZeroBlockSize,
    #[display("minimum drop interval must be positive")]
    ZeroMinDropInterval,
    #[display(
        "minimum drop interval ({min_ms} ms) exceeds initial drop interval ({initial_ms} ms)"
    )]
    MinIntervalAboveInitial { min_ms: u64, initial_ms: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_classic_constants() {
        let config = GameConfig::default();
        assert_eq!((config.width, config.height), (12, 20));
        assert_eq!(config.initial_drop_interval(), Duration::from_secs(1));
        assert_eq!(config.min_drop_interval_ms, 100);
        assert_eq!(config.drop_interval_step_ms, 100);
        assert_eq!(config.score_per_line, 100);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_invalid_board_size() {
        for (width, height) in [(0, 20), (12, 0), (256, 20), (12, 1000)] {
            let config = GameConfig::DEFAULT.with_size(width, height);
            assert_eq!(
                config.validate(),
                Err(ConfigError::InvalidBoardSize { width, height })
            );
        }
        assert!(GameConfig::DEFAULT.with_size(1, 1).validate().is_ok());
    }

    #[test]
    fn test_invalid_intervals() {
        let config = GameConfig {
            min_drop_interval_ms: 0,
            ..GameConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroMinDropInterval));

        let config = GameConfig {
            initial_drop_interval_ms: 50,
            ..GameConfig::DEFAULT
        };
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "minimum drop interval (100 ms) exceeds initial drop interval (50 ms)"
        );
    }

    #[test]
    fn test_zero_block_size() {
        let config = GameConfig {
            block_size: 0,
            ..GameConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroBlockSize));
    }

    #[test]
    fn test_deserialize_partial_and_unknown_fields() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "score_per_line": 40, "min_drop_interval_ms": 50 }"#)
                .unwrap();
        assert_eq!(config.score_per_line, 40);
        assert_eq!(config.min_drop_interval_ms, 50);
        assert_eq!(config.width, 12);

        let result: Result<GameConfig, _> = serde_json::from_str(r#"{ "colour": "blue" }"#);
        assert!(result.is_err());
    }
}
