//! Startup configuration: command-line flags (each with an environment
//! override) resolved against the user's standard directories.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use directories::{BaseDirs, UserDirs};

/// Folder created on the desktop to hold the data file.
const DATA_DIR_NAME: &str = "data";
/// Parquet file name inside the data folder.
const DATA_FILE_NAME: &str = "people.parquet";
/// Folder beneath the home directory for application logs.
const APP_DIR_NAME: &str = ".people-manager";
/// Folder next to the executable that may ship a bundled viewer.
const TOOLS_DIR_NAME: &str = "tools";

#[cfg(windows)]
const BUNDLED_VIEWER: &str = "ParquetViewer.exe";
#[cfg(not(windows))]
const BUNDLED_VIEWER: &str = "ParquetViewer";

#[derive(Debug, Parser)]
#[command(name = "people-manager")]
#[command(about = "Keep a small list of people in a Parquet file", long_about = None)]
pub struct Cli {
    /// Parquet file holding the list
    #[arg(long, env = "PEOPLE_MANAGER_DATA")]
    pub data_file: Option<PathBuf>,

    /// Program used to inspect the data file
    #[arg(long, env = "PEOPLE_MANAGER_VIEWER")]
    pub viewer: Option<PathBuf>,

    /// Directory for log files
    #[arg(long, env = "PEOPLE_MANAGER_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log level filter (error, warn, info, debug, trace)
    #[arg(long, env = "PEOPLE_MANAGER_LOG", default_value = "info")]
    pub log_level: String,
}

/// Fully resolved settings the app runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub viewer: Option<PathBuf>,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl AppConfig {
    /// Fill in every setting the command line left open.
    pub fn resolve(cli: Cli) -> Result<Self> {
        let data_file = match cli.data_file {
            Some(path) => path,
            None => default_data_file()?,
        };
        let log_dir = match cli.log_dir {
            Some(path) => path,
            None => home_dir()?.join(APP_DIR_NAME).join("logs"),
        };

        Ok(Self {
            data_file,
            viewer: cli.viewer.or_else(bundled_viewer),
            log_dir,
            log_level: cli.log_level,
        })
    }
}

/// `<Desktop>/data/people.parquet`, falling back to `<home>/Desktop` when the
/// platform reports no desktop folder.
fn default_data_file() -> Result<PathBuf> {
    let desktop = match UserDirs::new().and_then(|dirs| dirs.desktop_dir().map(PathBuf::from)) {
        Some(desktop) => desktop,
        None => home_dir()?.join("Desktop"),
    };
    Ok(desktop.join(DATA_DIR_NAME).join(DATA_FILE_NAME))
}

fn home_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().to_path_buf())
}

/// A viewer shipped in `tools/` beside the executable, if there is one.
fn bundled_viewer() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let candidate = exe.parent()?.join(TOOLS_DIR_NAME).join(BUNDLED_VIEWER);
    candidate.exists().then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_flags_win() {
        let cli = Cli::parse_from([
            "people-manager",
            "--data-file",
            "/tmp/people.parquet",
            "--viewer",
            "/opt/viewer",
            "--log-dir",
            "/tmp/logs",
            "--log-level",
            "debug",
        ]);
        let config = AppConfig::resolve(cli).unwrap();

        assert_eq!(config.data_file, PathBuf::from("/tmp/people.parquet"));
        assert_eq!(config.viewer, Some(PathBuf::from("/opt/viewer")));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/logs"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
