//! Configuration file discovery.
//!
//! The config file is optional. Lookup order:
//!
//! 1. An explicit `--config` path.
//! 2. `config.yaml` in the current working directory (handy with `cargo run`
//!    and on kiosk installs that start from the app directory).
//! 3. The per-user config directory, e.g. `~/.config/ps3-pad-tester/config.yaml`.
//!
//! When none of these exist the user config location is still returned, so
//! the "using defaults" log line points at the place a config would go.

use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory name used under the platform config directory
const APP_DIR: &str = "ps3-pad-tester";

/// File name looked up in the working and config directories
const CONFIG_FILE: &str = "config.yaml";

/// Where the config path came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    CommandLine,
    WorkingDir,
    UserConfigDir,
}

/// Resolved application paths
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Path to the configuration file (may not exist)
    pub config: PathBuf,
    pub source: ConfigSource,
}

impl AppPaths {
    /// Resolve the config path from the environment.
    pub fn detect(explicit: Option<PathBuf>) -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let paths = Self::resolve(explicit, &cwd, dirs::config_dir());
        debug!(
            "Config path: {} ({:?})",
            paths.config.display(),
            paths.source
        );
        paths
    }

    fn resolve(explicit: Option<PathBuf>, cwd: &Path, config_dir: Option<PathBuf>) -> Self {
        if let Some(config) = explicit {
            return Self {
                config,
                source: ConfigSource::CommandLine,
            };
        }

        let cwd_config = cwd.join(CONFIG_FILE);
        if cwd_config.exists() {
            return Self {
                config: cwd_config,
                source: ConfigSource::WorkingDir,
            };
        }

        match config_dir {
            Some(dir) => Self {
                config: dir.join(APP_DIR).join(CONFIG_FILE),
                source: ConfigSource::UserConfigDir,
            },
            // No platform config dir: fall back to the (missing) cwd file
            None => Self {
                config: cwd_config,
                source: ConfigSource::WorkingDir,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_path_wins() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(CONFIG_FILE), "").unwrap();

        let paths = AppPaths::resolve(
            Some(PathBuf::from("custom.yaml")),
            temp_dir.path(),
            Some(PathBuf::from("/etc/xdg")),
        );

        assert_eq!(paths.config, PathBuf::from("custom.yaml"));
        assert_eq!(paths.source, ConfigSource::CommandLine);
    }

    #[test]
    fn test_working_dir_config() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(CONFIG_FILE), "").unwrap();

        let paths = AppPaths::resolve(None, temp_dir.path(), Some(PathBuf::from("/etc/xdg")));

        assert_eq!(paths.config, temp_dir.path().join(CONFIG_FILE));
        assert_eq!(paths.source, ConfigSource::WorkingDir);
    }

    #[test]
    fn test_user_config_dir_fallback() {
        let temp_dir = TempDir::new().unwrap();

        let paths = AppPaths::resolve(None, temp_dir.path(), Some(PathBuf::from("/home/pi/.config")));
        assert_eq!(
            paths.config,
            PathBuf::from("/home/pi/.config/ps3-pad-tester/config.yaml")
        );
        assert_eq!(paths.source, ConfigSource::UserConfigDir);

        let paths = AppPaths::resolve(None, temp_dir.path(), None);
        assert_eq!(paths.config, temp_dir.path().join(CONFIG_FILE));
    }
}
