//! Runtime Configuration
//!
//! Defaults suit the shipped games. Deployments override them through
//! environment variables:
//!
//! | Variable                        | Effect                               |
//! |---------------------------------|--------------------------------------|
//! | `MAZE_ADVANCE_DELAY_MS`         | Pause after a win before next level  |
//! | `CODE_BREAKER_ALLOW_DUPLICATES` | Accept guesses with repeated digits  |
//! | `LEVELS_PATH`                   | JSON level catalog to load           |

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::codebreaker::guess::GuessPolicy;
use crate::maze::engine::MazeConfig;
use crate::maze::level::{LevelCatalog, LevelError};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Variable set to something unparseable.
    #[error("{name} must be {expected}, got {value:?}")]
    InvalidVar {
        /// Variable name
        name: &'static str,
        /// What was expected
        expected: &'static str,
        /// What was found
        value: String,
    },
}

/// Application configuration.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Mirror Maze session settings
    pub maze: MazeConfig,
    /// Code Breaker guess rules
    pub guess_policy: GuessPolicy,
    /// Level catalog file; built-in levels when unset
    pub levels_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("MAZE_ADVANCE_DELAY_MS") {
            let ms: u64 = v.trim().parse().map_err(|_| ConfigError::InvalidVar {
                name: "MAZE_ADVANCE_DELAY_MS",
                expected: "a whole number of milliseconds",
                value: v.clone(),
            })?;
            config.maze.advance_delay = Duration::from_millis(ms);
        }

        if let Ok(v) = std::env::var("CODE_BREAKER_ALLOW_DUPLICATES") {
            config.guess_policy.allow_duplicate_digits = parse_flag("CODE_BREAKER_ALLOW_DUPLICATES", &v)?;
        }

        config.levels_path = std::env::var("LEVELS_PATH").ok().map(PathBuf::from);

        Ok(config)
    }

    /// The configured level catalog.
    ///
    /// Files are checked for solvability as well as shape; the built-in
    /// catalog is already known good.
    pub fn load_catalog(&self) -> Result<LevelCatalog, LevelError> {
        match &self.levels_path {
            Some(path) => {
                let catalog = LevelCatalog::from_path(path)?;
                catalog.validate_solvable()?;
                Ok(catalog)
            }
            None => Ok(LevelCatalog::builtin()),
        }
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" | "" => Ok(false),
        _ => Err(ConfigError::InvalidVar {
            name,
            expected: "true, false, 1 or 0",
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.maze.advance_delay, Duration::from_secs(1));
        assert!(!config.guess_policy.allow_duplicate_digits);
        assert_eq!(config.load_catalog().unwrap().len(), 5);
    }

    // Env vars are process-global, so every variable is exercised in this one test
    #[test]
    fn test_from_env() {
        std::env::set_var("MAZE_ADVANCE_DELAY_MS", "250");
        std::env::set_var("CODE_BREAKER_ALLOW_DUPLICATES", "1");
        std::env::set_var("LEVELS_PATH", "/tmp/levels.json");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.maze.advance_delay, Duration::from_millis(250));
        assert!(config.guess_policy.allow_duplicate_digits);
        assert_eq!(config.levels_path, Some(PathBuf::from("/tmp/levels.json")));

        std::env::set_var("MAZE_ADVANCE_DELAY_MS", "soon");
        assert!(matches!(
            AppConfig::from_env(),
            Err(ConfigError::InvalidVar { name: "MAZE_ADVANCE_DELAY_MS", .. })
        ));

        std::env::remove_var("MAZE_ADVANCE_DELAY_MS");
        std::env::set_var("CODE_BREAKER_ALLOW_DUPLICATES", "yes");
        assert!(matches!(
            AppConfig::from_env(),
            Err(ConfigError::InvalidVar { name: "CODE_BREAKER_ALLOW_DUPLICATES", .. })
        ));

        std::env::set_var("CODE_BREAKER_ALLOW_DUPLICATES", "false");
        assert!(!AppConfig::from_env().unwrap().guess_policy.allow_duplicate_digits);

        std::env::remove_var("CODE_BREAKER_ALLOW_DUPLICATES");
        std::env::remove_var("LEVELS_PATH");
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("X", "true").unwrap());
        assert!(parse_flag("X", " 1 ").unwrap());
        assert!(!parse_flag("X", "0").unwrap());
        assert!(matches!(
            parse_flag("X", "yes"),
            Err(ConfigError::InvalidVar { name: "X", .. })
        ));
    }

    #[test]
    fn test_load_catalog_from_file() {
        let path = std::env::temp_dir().join(format!("daily-puzzles-levels-{}.json", std::process::id()));
        let json = serde_json::to_string(&LevelCatalog::builtin()).unwrap();
        std::fs::File::create(&path).unwrap().write_all(json.as_bytes()).unwrap();

        let config = AppConfig {
            levels_path: Some(path.clone()),
            ..AppConfig::default()
        };
        let catalog = config.load_catalog().unwrap();
        assert_eq!(catalog.len(), 5);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_catalog_file() {
        let config = AppConfig {
            levels_path: Some(PathBuf::from("/nonexistent/levels.json")),
            ..AppConfig::default()
        };
        assert!(matches!(config.load_catalog(), Err(LevelError::Io(_))));
    }
}
