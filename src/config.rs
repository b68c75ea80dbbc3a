use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::game::{BoardSize, Player, MAX_SIDE};

/// Board and seat settings used whenever a fresh game is started.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub players: Vec<Player>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: 5,
            height: 5,
            players: vec![
                Player::new("Player 1", "black"),
                Player::new("Player 2", "yellow"),
            ],
        }
    }
}

impl GameConfig {
    pub fn board_size(&self) -> BoardSize {
        BoardSize::new(self.width, self.height)
    }

    /// The two seated players. Falls back to the defaults if the list is not
    /// exactly two long; `AppConfig::validate` reports that case.
    pub fn seats(&self) -> [Player; 2] {
        match self.players.as_slice() {
            [first, second] => [first.clone(), second.clone()],
            _ => {
                let defaults = GameConfig::default().players;
                [defaults[0].clone(), defaults[1].clone()]
            }
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    pub save_file: PathBuf,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        PersistenceConfig {
            save_file: PathBuf::from("save.json"),
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub persistence: PersistenceConfig,
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
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.width == 0 {
            return Err(ConfigError::Validation("game.width must be > 0".into()));
        }
        if self.game.height == 0 {
            return Err(ConfigError::Validation("game.height must be > 0".into()));
        }
        if self.game.width > MAX_SIDE || self.game.height > MAX_SIDE {
            return Err(ConfigError::Validation(format!(
                "game.width and game.height must be <= {MAX_SIDE}"
            )));
        }
        if self.game.players.len() != 2 {
            return Err(ConfigError::Validation(format!(
                "game.players must list exactly 2 players, got {}",
                self.game.players.len()
            )));
        }
        if self.game.players.iter().any(|p| p.name.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "game.players names must not be empty".into(),
            ));
        }
        if self.persistence.save_file.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "persistence.save_file must not be empty".into(),
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
        assert_eq!(config.game.board_size(), BoardSize::new(5, 5));
        assert_eq!(config.game.seats()[1], Player::new("Player 2", "yellow"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[game]
width = 7
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.game.width, 7);
        assert_eq!(config.game.height, 5);
        assert_eq!(config.game.players.len(), 2);
        assert_eq!(config.persistence.save_file, PathBuf::from("save.json"));
    }

    #[test]
    fn test_custom_players() {
        let toml_str = r#"
[[game.players]]
name = "Ada"
color = "red"

[[game.players]]
name = "Grace"
color = "blue"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        config.validate().unwrap();
        assert_eq!(config.game.seats()[0], Player::new("Ada", "red"));
    }

    #[test]
    fn test_validation_rejects_zero_width() {
        let mut config = AppConfig::default();
        config.game.width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_height() {
        let mut config = AppConfig::default();
        config.game.height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_oversized_board() {
        let mut config = AppConfig::default();
        config.game.height = MAX_SIDE + 1;
        assert!(config.validate().is_err());
        config.game.height = MAX_SIDE;
        config.validate().unwrap();
    }

    #[test]
    fn test_validation_rejects_wrong_player_count() {
        let mut config = AppConfig::default();
        config.game.players.push(Player::new("Player 3", "red"));
        assert!(config.validate().is_err());
        config.game.players.truncate(1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_blank_name() {
        let mut config = AppConfig::default();
        config.game.players[0].name = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.game.width, 5);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[persistence]
save_file = "games/current.json"
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.persistence.save_file, PathBuf::from("games/current.json"));
        assert_eq!(config.game.height, 5);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[game]\nwidth = 0\n").unwrap();
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
    }
}
