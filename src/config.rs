//! Command-line and environment configuration.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for the log file.
const DATA_DIR_NAME: &str = ".course-browser";
const LOG_FILE_NAME: &str = "course-browser.log";
/// Catalog location used when nothing else is configured.
pub const DEFAULT_CATALOG_PATH: &str = "data/data.json";

#[derive(Debug, Clone, Parser)]
#[command(name = "course-browser", version, about = "Browse course materials in the terminal")]
pub struct Config {
    /// JSON file holding the course catalog.
    #[arg(long, env = "COURSE_BROWSER_DATA", default_value = DEFAULT_CATALOG_PATH)]
    pub data: PathBuf,

    /// Where to write logs. Defaults to ~/.course-browser/course-browser.log.
    #[arg(long, env = "COURSE_BROWSER_LOG")]
    pub log_file: Option<PathBuf>,

    /// Fixed seed for the random course picker.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Config {
    /// Resolve the log destination, falling back to the home directory.
    pub fn log_path(&self) -> Result<PathBuf> {
        match &self.log_file {
            Some(path) => Ok(path.clone()),
            None => default_log_path(),
        }
    }
}

fn default_log_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(LOG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_bundled_catalog() {
        let config = Config::try_parse_from(["course-browser"]).unwrap();
        if std::env::var_os("COURSE_BROWSER_DATA").is_none() {
            assert_eq!(config.data, PathBuf::from(DEFAULT_CATALOG_PATH));
        }
        assert_eq!(config.seed, None);
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "course-browser",
            "--data",
            "/tmp/courses.json",
            "--log-file",
            "/tmp/browser.log",
            "--seed",
            "42",
        ])
        .unwrap();
        assert_eq!(config.data, PathBuf::from("/tmp/courses.json"));
        assert_eq!(config.log_path().unwrap(), PathBuf::from("/tmp/browser.log"));
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn rejects_non_numeric_seed() {
        assert!(Config::try_parse_from(["course-browser", "--seed", "many"]).is_err());
    }
}
