use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::game::StartingPlayer;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub scores: ScoreConfig,
    pub logging: LoggingConfig,
}

/// Session setup.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub starting_player: StartingPlayer,
}

/// Where the win counters live.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    pub path: PathBuf,
    pub persist: bool,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        ScoreConfig {
            path: PathBuf::from("scores.json"),
            persist: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `connect_four=debug`.
    pub filter: String,
    /// Log destination. The terminal UI owns stdout, so no file means no logs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: "info".to_string(),
            file: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scores.persist && self.scores.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "scores.path must not be empty when scores.persist is true".into(),
            ));
        }
        if let Err(e) = tracing_subscriber::EnvFilter::try_new(&self.logging.filter) {
            return Err(ConfigError::Validation(format!(
                "logging.filter '{}' is invalid: {e}",
                self.logging.filter
            )));
        }
        if self
            .logging
            .file
            .as_ref()
            .is_some_and(|file| file.as_os_str().is_empty())
        {
            return Err(ConfigError::Validation(
                "logging.file must not be empty (omit it to disable logging)".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.game.starting_player, StartingPlayer::Random);
        assert!(config.scores.persist);
        assert_eq!(config.logging.file, None);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[game]
starting_player = "two"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.game.starting_player, StartingPlayer::Two);
        // Other fields should be defaults
        assert_eq!(config.scores.path, PathBuf::from("scores.json"));
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_unknown_starting_player_fails_to_parse() {
        let result: Result<AppConfig, _> = toml::from_str(
            r#"
[game]
starting_player = "three"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_rejects_empty_score_path() {
        let mut config = AppConfig::default();
        config.scores.path = PathBuf::new();
        assert!(config.validate().is_err());

        config.scores.persist = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_filter() {
        let mut config = AppConfig::default();
        config.logging.filter = "connect_four=loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[scores]
path = "saves/wins.json"

[logging]
filter = "debug"
file = "c4.log"
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.scores.path, PathBuf::from("saves/wins.json"));
        assert_eq!(config.logging.file, Some(PathBuf::from("c4.log")));
        // Others are defaults
        assert_eq!(config.game.starting_player, StartingPlayer::Random);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[scores]\npath = \"\"\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
        assert_eq!(config, AppConfig::default());
    }
}
