//! Configuration loading and management for stadiumhq.
//!
//! Loads settings from `stadiumhq.toml` with environment variable overrides for sensitive data.
//! Every section has defaults, so running without a config file talks to English Wikipedia.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_FILE: &str = "stadiumhq.toml";

/// Environment variable holding the static map API key
pub const MAPS_API_KEY_VAR: &str = "STADIUMHQ_MAPS_API_KEY";
/// Environment variable overriding the Wikipedia request timeout
pub const TIMEOUT_VAR: &str = "STADIUMHQ_TIMEOUT_SECS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },
    #[error("wikipedia.timeout_secs must be at least 1")]
    ZeroTimeout,
}

/// Wikipedia endpoints and client identification
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WikipediaConfig {
    /// REST summary endpoint; the page title is appended as a path segment
    pub summary_url: String,
    /// Legacy query endpoint
    pub query_url: String,
    /// User-Agent sent with every request, as Wikimedia's policy requires
    pub user_agent: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

/// Static map image settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapsConfig {
    pub base_url: String,
    pub zoom: u8,
    pub width: u32,
    pub height: u32,
    /// Loaded from the environment in preference to the file
    pub api_key: Option<String>,
}

/// Stadium titles shown by `list` and `search`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StadiumsConfig {
    pub titles: Vec<String>,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub wikipedia: WikipediaConfig,
    #[serde(default)]
    pub maps: MapsConfig,
    #[serde(default)]
    pub stadiums: StadiumsConfig,
}

impl Config {
    /// Load configuration from the default location (stadiumhq.toml in cwd or home).
    ///
    /// Falls back to the built-in defaults when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        let config = match Self::find_config_file() {
            Some(path) => Self::read(&path)?,
            None => {
                tracing::debug!("no {CONFIG_FILE} found, using defaults");
                Config::default()
            }
        };
        config.finish(|name| std::env::var(name).ok())
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::read(path)?.finish(|name| std::env::var(name).ok())
    }

    fn finish<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.apply_env(lookup)?;
        self.validate()?;
        Ok(self)
    }

    /// Reject settings that would make every lookup fail.
    ///
    /// A zero timeout makes reqwest abort each request immediately.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wikipedia.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        tracing::debug!(path = %path.display(), "loading config");
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Override settings from environment variables, looked up through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(MAPS_API_KEY_VAR).filter(|k| !k.trim().is_empty()) {
            self.maps.api_key = Some(key);
        }
        if let Some(value) = lookup(TIMEOUT_VAR) {
            self.wikipedia.timeout_secs = match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        name: TIMEOUT_VAR,
                        value,
                    })
                }
            };
        }
        Ok(())
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        // Check current directory first
        let local_config = PathBuf::from(CONFIG_FILE);
        if local_config.exists() {
            return Some(local_config);
        }

        // Check home directory
        let home_config = dirs::home_dir()?
            .join(".config")
            .join("stadiumhq")
            .join(CONFIG_FILE);
        home_config.exists().then_some(home_config)
    }
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            summary_url: "https://en.wikipedia.org/api/rest_v1/page/summary".to_string(),
            query_url: "https://en.wikipedia.org/w/api.php".to_string(),
            user_agent: concat!(
                "StadiumHQ/",
                env!("CARGO_PKG_VERSION"),
                " (contact: example@example.com)"
            )
            .to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://maps.googleapis.com/maps/api/staticmap".to_string(),
            zoom: 15,
            width: 600,
            height: 300,
            api_key: None,
        }
    }
}

impl Default for StadiumsConfig {
    fn default() -> Self {
        Self {
            titles: [
                "Emirates Stadium",
                "Tottenham Hotspur Stadium",
                "Wembley Stadium",
                "Stamford Bridge",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_target_english_wikipedia() {
        let config = Config::default();
        assert_eq!(config.wikipedia.timeout_secs, 10);
        assert!(config.wikipedia.user_agent.starts_with("StadiumHQ/"));
        assert!(config.wikipedia.query_url.ends_with("/w/api.php"));
        assert_eq!(config.stadiums.titles.len(), 4);
        assert!(config.maps.api_key.is_none());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[wikipedia]\ntimeout_secs = 3\n\n[stadiums]\ntitles = [\"Craven Cottage\"]"
        )
        .unwrap();

        let config = Config::read(file.path()).unwrap();
        assert_eq!(config.wikipedia.timeout_secs, 3);
        assert_eq!(
            config.wikipedia.summary_url,
            WikipediaConfig::default().summary_url
        );
        assert_eq!(config.stadiums.titles, vec!["Craven Cottage".to_string()]);
        assert_eq!(config.maps.zoom, 15);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[wikipedia\ntimeout_secs = ").unwrap();
        assert!(matches!(
            Config::read(file.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn missing_explicit_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_from(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config: Config =
            toml::from_str("[maps]\napi_key = \"from-file\"").unwrap();
        config
            .apply_env(|name| match name {
                MAPS_API_KEY_VAR => Some("from-env".to_string()),
                TIMEOUT_VAR => Some("5".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.maps.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.wikipedia.timeout_secs, 5);
    }

    #[test]
    fn blank_env_key_does_not_clear_file_key() {
        let mut config: Config =
            toml::from_str("[maps]\napi_key = \"from-file\"").unwrap();
        config
            .apply_env(|name| (name == MAPS_API_KEY_VAR).then(|| "  ".to_string()))
            .unwrap();
        assert_eq!(config.maps.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn zero_timeout_in_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[wikipedia]\ntimeout_secs = 0").unwrap();

        let result = Config::read(file.path()).unwrap().finish(|_| None);
        assert!(matches!(result, Err(ConfigError::ZeroTimeout)));
    }

    #[test]
    fn zero_timeout_in_env_is_rejected() {
        let mut config = Config::default();
        let err = config
            .apply_env(|name| (name == TIMEOUT_VAR).then(|| "0".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { name: TIMEOUT_VAR, .. }));
        assert_eq!(config.wikipedia.timeout_secs, 10);
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let mut config = Config::default();
        let err = config
            .apply_env(|name| (name == TIMEOUT_VAR).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains(TIMEOUT_VAR));
    }
}
