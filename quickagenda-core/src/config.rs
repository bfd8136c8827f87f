//! Global quickagenda configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{AgendaError, AgendaResult};

static DEFAULT_API_BASE: &str = "http://127.0.0.1:4096";
const DEFAULT_PORT: u16 = 4096;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Configuration at ~/.config/quickagenda/config.toml, overridable with
/// `QUICKAGENDA_*` environment variables.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AgendaConfig {
    /// Base URL of the event API.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Origin share links are built on. Defaults to `api_base`.
    #[serde(default)]
    pub share_origin: Option<String>,

    /// Port the server listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        AgendaConfig {
            api_base: default_api_base(),
            share_origin: None,
            port: DEFAULT_PORT,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AgendaConfig {
    pub fn config_path() -> AgendaResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AgendaError::Config("Could not determine config directory".into()))?
            .join("quickagenda");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented config file on
    /// first use.
    pub fn load() -> AgendaResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> AgendaResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("QUICKAGENDA").try_parsing(true))
            .build()
            .map_err(|e| AgendaError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| AgendaError::Config(e.to_string()))
    }

    pub fn share_origin(&self) -> &str {
        self.share_origin
            .as_deref()
            .unwrap_or(&self.api_base)
            .trim_end_matches('/')
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> AgendaResult<()> {
        let contents = format!(
            "\
# quickagenda configuration

# Where the event API lives:
# api_base = \"{}\"

# Origin used for share links (defaults to api_base):
# share_origin = \"https://agenda.example.com\"

# Port for quickagenda-server:
# port = {}

# Seconds before an API request is abandoned:
# request_timeout_secs = {}
",
            DEFAULT_API_BASE, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_file_loads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        AgendaConfig::create_default_config(&path).unwrap();
        let config = AgendaConfig::load_from(&path).unwrap();

        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.share_origin(), DEFAULT_API_BASE);
    }

    #[test]
    fn values_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "api_base = \"https://api.x.test\"\nshare_origin = \"https://x.test/\"\nrequest_timeout_secs = 3\n",
        )
        .unwrap();

        let config = AgendaConfig::load_from(&path).unwrap();
        assert_eq!(config.api_base, "https://api.x.test");
        assert_eq!(config.share_origin(), "https://x.test");
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn unwritable_config_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let err = AgendaConfig::create_default_config(&blocker.join("config.toml")).unwrap_err();
        assert!(matches!(err, AgendaError::Io(_)), "{err:?}");
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = AgendaConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
