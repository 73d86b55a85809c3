use std::{fs::File, path::Path};

use anyhow::Context as _;
use env_logger::{Builder, Env, Target};

fn builder() -> Builder {
    Builder::from_env(Env::default().default_filter_or("info"))
}

/// Sends log output to `path`.
///
/// The terminal belongs to the TUI, so without a log file nothing is logged.
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub(crate) fn init(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    builder()
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to initialize logger")?;
    Ok(())
}

/// Sends log output to `path`, or to stderr when no file is given.
///
/// For commands that leave the terminal alone and keep stdout for results.
pub(crate) fn init_or_stderr(path: Option<&Path>) -> anyhow::Result<()> {
    if path.is_some() {
        return init(path);
    }
    builder()
        .target(Target::Stderr)
        .try_init()
        .context("failed to initialize logger")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{env, fs};

    use super::*;

    #[test]
    fn test_without_log_file_logger_is_untouched() {
        init(None).unwrap();
    }

    #[test]
    fn test_log_file_receives_records() {
        let path = env::temp_dir().join(format!("blockfall-log-{}.log", std::process::id()));
        init_or_stderr(Some(&path)).unwrap();
        log::warn!("written to the log file");
        log::logger().flush();

        let contents = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert!(contents.contains("written to the log file"), "{contents}");
        // Only one logger per process.
        assert!(init_or_stderr(None).is_err());
    }
}
