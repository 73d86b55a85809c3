use std::{fs, path::PathBuf};

use anyhow::Context as _;
use blockfall_engine::GameConfig;

/// Game configuration options shared by all modes.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct GameArgs {
    /// JSON file with game settings; missing fields use the defaults
    #[clap(long)]
    pub(crate) config: Option<PathBuf>,
    /// Board width in cells (overrides the config file)
    #[clap(long)]
    pub(crate) width: Option<usize>,
    /// Board height in cells (overrides the config file)
    #[clap(long)]
    pub(crate) height: Option<usize>,
}

impl GameArgs {
    /// Loads the config file, if any, and applies the command-line overrides.
    pub(crate) fn load(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => read_config_file(path)?,
            None => GameConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        config.validate().context("invalid game configuration")?;
        Ok(config)
    }
}

fn read_config_file(path: &PathBuf) -> anyhow::Result<GameConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    log::info!("loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let config = GameArgs::default().load().unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_overrides_apply() {
        let args = GameArgs {
            width: Some(6),
            height: Some(30),
            ..GameArgs::default()
        };
        let config = args.load().unwrap();
        assert_eq!((config.width, config.height), (6, 30));
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let args = GameArgs {
            width: Some(0),
            ..GameArgs::default()
        };
        let err = args.load().unwrap_err();
        assert!(format!("{err:#}").contains("board size"), "{err:#}");
    }

    #[test]
    fn test_config_file_with_override() {
        let path = env::temp_dir().join(format!("blockfall-config-{}.json", std::process::id()));
        fs::write(&path, r#"{ "width": 8, "score_per_line": 50 }"#).unwrap();
        let args = GameArgs {
            config: Some(path.clone()),
            height: Some(10),
            ..GameArgs::default()
        };
        let config = args.load();
        fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!((config.width, config.height), (8, 10));
        assert_eq!(config.score_per_line, 50);
        assert_eq!(config.initial_drop_interval_ms, 1000);
    }

    #[test]
    fn test_missing_file_has_context() {
        let args = GameArgs {
            config: Some(PathBuf::from("/nonexistent/blockfall.json")),
            ..GameArgs::default()
        };
        let err = args.load().unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
