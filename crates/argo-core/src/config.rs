//! Configuration for the Argo client and relay
//!
//! Read from `~/.argo/config.json` when it exists, then overridden by
//! environment variables. Every field has a default, so a missing file is
//! not an error.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::session::DEFAULT_USER_ID;

pub const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:8787/";
pub const DEFAULT_BIND: &str = "0.0.0.0:8787";
pub const DEFAULT_WEBHOOK_URL: &str = "https://brain.argoassist.com/webhook/argo_chat";
pub const DEFAULT_WEBHOOK_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MEMORY_TABLE: &str = "memory";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid config in {path}: {field} must be greater than zero")]
    NotPositive { path: PathBuf, field: &'static str },

    #[error("Invalid value for {var}: {value}")]
    InvalidEnv { var: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArgoConfig {
    /// Caller identifier sent with every chat request
    pub user_id: String,
    /// Where the client posts chat messages
    pub relay_url: String,
    pub relay: RelayConfig,
}

/// Settings used only by `argo serve`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub bind: String,
    pub webhook_url: String,
    pub webhook_timeout_secs: u64,
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
    pub memory_table: String,
}

impl Default for ArgoConfig {
    fn default() -> Self {
        Self {
            user_id: DEFAULT_USER_ID.to_string(),
            relay_url: DEFAULT_RELAY_URL.to_string(),
            relay: RelayConfig::default(),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            webhook_url: DEFAULT_WEBHOOK_URL.to_string(),
            webhook_timeout_secs: DEFAULT_WEBHOOK_TIMEOUT_SECS,
            supabase_url: None,
            supabase_key: None,
            memory_table: DEFAULT_MEMORY_TABLE.to_string(),
        }
    }
}

impl ArgoConfig {
    /// Default location: `~/.argo/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".argo").join("config.json"))
    }

    /// Load from the default path plus the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::default_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_env(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Load a config file, falling back to defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if config.relay.webhook_timeout_secs == 0 {
            return Err(ConfigError::NotPositive {
                path: path.to_path_buf(),
                field: "relay.webhook_timeout_secs",
            });
        }
        Ok(config)
    }

    /// Override fields from environment variables, looked up through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.is_empty());

        if let Some(v) = get("ARGO_USER_ID") {
            self.user_id = v;
        }
        if let Some(v) = get("ARGO_RELAY_URL") {
            self.relay_url = v;
        }
        if let Some(v) = get("ARGO_BIND") {
            self.relay.bind = v;
        }
        if let Some(v) = get("ARGO_WEBHOOK_URL") {
            self.relay.webhook_url = v;
        }
        if let Some(v) = get("ARGO_WEBHOOK_TIMEOUT_SECS") {
            self.relay.webhook_timeout_secs = v
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidEnv {
                    var: "ARGO_WEBHOOK_TIMEOUT_SECS".to_string(),
                    value: v.clone(),
                })?;
        }
        if let Some(v) = get("SUPABASE_URL") {
            self.relay.supabase_url = Some(v);
        }
        if let Some(v) = get("SUPABASE_SERVICE_ROLE_KEY") {
            self.relay.supabase_key = Some(v);
        }
        if let Some(v) = get("ARGO_MEMORY_TABLE") {
            self.relay.memory_table = v;
        }
        Ok(())
    }

    /// Supabase URL and key, if both are set
    pub fn supabase(&self) -> Option<(&str, &str)> {
        match (&self.relay.supabase_url, &self.relay.supabase_key) {
            (Some(url), Some(key)) => Some((url.as_str(), key.as_str())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ArgoConfig::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, ArgoConfig::default());
        assert_eq!(config.user_id, "test-user");
        assert_eq!(config.relay.webhook_timeout_secs, 30);
        assert!(config.supabase().is_none());
    }

    #[test]
    fn test_partial_file() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, r#"{{"user_id": "alice", "relay": {{"memory_table": "audit"}}}}"#).unwrap();

        let config = ArgoConfig::load_from(tmp.path()).unwrap();
        assert_eq!(config.user_id, "alice");
        assert_eq!(config.relay_url, DEFAULT_RELAY_URL);
        assert_eq!(config.relay.memory_table, "audit");
        assert_eq!(config.relay.webhook_url, DEFAULT_WEBHOOK_URL);
    }

    #[test]
    fn test_invalid_file() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, "not json").unwrap();
        assert!(matches!(
            ArgoConfig::load_from(tmp.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("ARGO_USER_ID", "bob"),
            ("ARGO_WEBHOOK_TIMEOUT_SECS", "5"),
            ("SUPABASE_URL", "https://example.supabase.co"),
            ("SUPABASE_SERVICE_ROLE_KEY", "service-key"),
            ("ARGO_RELAY_URL", ""),
        ]
        .into_iter()
        .collect();

        let mut config = ArgoConfig::default();
        config
            .apply_env(|var| env.get(var).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.user_id, "bob");
        assert_eq!(config.relay.webhook_timeout_secs, 5);
        assert_eq!(config.relay_url, DEFAULT_RELAY_URL); // empty values ignored
        assert_eq!(
            config.supabase(),
            Some(("https://example.supabase.co", "service-key"))
        );
    }

    #[test]
    fn test_bad_timeout_env() {
        let mut config = ArgoConfig::default();
        let err = config
            .apply_env(|var| (var == "ARGO_WEBHOOK_TIMEOUT_SECS").then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { .. }));
    }

    #[test]
    fn test_zero_timeout_env_rejected() {
        let mut config = ArgoConfig::default();
        let err = config
            .apply_env(|var| (var == "ARGO_WEBHOOK_TIMEOUT_SECS").then(|| "0".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { ref value, .. } if value == "0"));
        assert_eq!(config.relay.webhook_timeout_secs, DEFAULT_WEBHOOK_TIMEOUT_SECS);
    }

    #[test]
    fn test_zero_timeout_file_rejected() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, r#"{{"relay": {{"webhook_timeout_secs": 0}}}}"#).unwrap();
        assert!(matches!(
            ArgoConfig::load_from(tmp.path()),
            Err(ConfigError::NotPositive { field: "relay.webhook_timeout_secs", .. })
        ));
    }
}
