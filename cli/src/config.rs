use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

use chow_core::DataPaths;

/// Overrides the default data directory when `--data-dir` is not given.
pub const DATA_DIR_ENV: &str = "CHOW_DATA_DIR";

pub struct Config {
    pub data_dir: PathBuf,
}

impl Config {
    /// Resolve the data directory: `--data-dir`, then `$CHOW_DATA_DIR`, then the
    /// platform data directory. The directory is created if missing.
    pub fn load(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir.or_else(env_data_dir) {
            Some(dir) => dir,
            None => ProjectDirs::from("", "", "chow")
                .context("Could not determine home directory")?
                .data_dir()
                .to_path_buf(),
        };
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
        tracing::debug!(data_dir = %data_dir.display(), "using data directory");

        Ok(Config { data_dir })
    }

    pub fn paths(&self) -> DataPaths {
        DataPaths::in_dir(&self.data_dir)
    }
}

fn env_data_dir() -> Option<PathBuf> {
    std::env::var_os(DATA_DIR_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
