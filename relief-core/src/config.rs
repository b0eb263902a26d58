//! Dashboard configuration.
//!
//! Every field has a default, so an empty file (or no file) yields the stock
//! dashboard: a 3 second SOS reset, three toasts visible for five seconds, and
//! a map waiting for a token.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub sos: SosConfig,

    #[serde(default)]
    pub toast: ToastConfig,

    #[serde(default)]
    pub map: MapConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SosConfig {
    /// Delay before a pressed SOS control re-arms.
    #[serde(default = "default_reset_after_ms")]
    pub reset_after_ms: u64,
}

fn default_reset_after_ms() -> u64 {
    3_000
}

impl Default for SosConfig {
    fn default() -> Self {
        Self {
            reset_after_ms: default_reset_after_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastConfig {
    #[serde(default = "default_toast_limit")]
    pub limit: usize,

    #[serde(default = "default_toast_ttl_ms")]
    pub ttl_ms: u64,
}

fn default_toast_limit() -> usize {
    3
}

fn default_toast_ttl_ms() -> u64 {
    5_000
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            limit: default_toast_limit(),
            ttl_ms: default_toast_ttl_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Preset map token; when set the map panel starts initialized.
    #[serde(default)]
    pub token: Option<String>,

    /// Environment variable consulted when `token` is absent.
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

fn default_token_env() -> String {
    "MAPBOX_TOKEN".to_string()
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            token: None,
            token_env: default_token_env(),
        }
    }
}

impl DashboardConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sos.reset_after_ms == 0 {
            return Err(ConfigError::Invalid("sos.reset_after_ms must be > 0".into()));
        }
        if self.toast.limit == 0 {
            return Err(ConfigError::Invalid("toast.limit must be > 0".into()));
        }
        if self.toast.ttl_ms == 0 {
            return Err(ConfigError::Invalid("toast.ttl_ms must be > 0".into()));
        }
        if self.map.token_env.trim().is_empty() {
            return Err(ConfigError::Invalid("map.token_env must not be empty".into()));
        }
        Ok(())
    }

    pub fn sos_reset_after(&self) -> Duration {
        Duration::from_millis(self.sos.reset_after_ms)
    }

    pub fn toast_ttl(&self) -> Duration {
        Duration::from_millis(self.toast.ttl_ms)
    }

    /// Configured token, trimmed. Blank values count as absent.
    pub fn map_token(&self) -> Option<String> {
        self.map
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    }

    /// Fills `map.token` from `lookup(map.token_env)` when no token is
    /// configured. Callers at the process edge supply `std::env::var`.
    pub fn resolve_token_env<F>(&mut self, lookup: F)
    where
        F: FnOnce(&str) -> Option<String>,
    {
        if self.map_token().is_some() {
            return;
        }
        if let Some(token) = lookup(&self.map.token_env).filter(|t| !t.trim().is_empty()) {
            tracing::debug!(var = %self.map.token_env, "map token taken from environment");
            self.map.token = Some(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = DashboardConfig::from_toml_str("").expect("parse");
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.sos_reset_after(), Duration::from_secs(3));
        assert_eq!(config.toast.limit, 3);
        assert_eq!(config.toast_ttl(), Duration::from_secs(5));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = DashboardConfig::from_toml_str(
            r#"
            [sos]
            reset_after_ms = 500

            [map]
            token = "pk.test"
            "#,
        )
        .expect("parse");
        assert_eq!(config.sos_reset_after(), Duration::from_millis(500));
        assert_eq!(config.toast, ToastConfig::default());
        assert_eq!(config.map_token().as_deref(), Some("pk.test"));
    }

    #[test]
    fn zero_delay_is_rejected() {
        let err = DashboardConfig::from_toml_str("[sos]\nreset_after_ms = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn zero_toast_limit_is_rejected() {
        let err = DashboardConfig::from_toml_str("[toast]\nlimit = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn blank_token_counts_as_absent() {
        let config = DashboardConfig {
            map: MapConfig {
                token: Some("   ".into()),
                ..MapConfig::default()
            },
            ..DashboardConfig::default()
        };
        assert_eq!(config.map_token(), None);
    }

    #[test]
    fn token_env_fills_only_missing_token() {
        let mut config = DashboardConfig::default();
        config.resolve_token_env(|name| {
            assert_eq!(name, "MAPBOX_TOKEN");
            Some(" pk.env ".into())
        });
        assert_eq!(config.map_token().as_deref(), Some("pk.env"));

        let mut preset = DashboardConfig::from_toml_str("[map]\ntoken = \"pk.file\"\n").expect("parse");
        preset.resolve_token_env(|_| Some("pk.env".into()));
        assert_eq!(preset.map_token().as_deref(), Some("pk.file"));

        let mut blank = DashboardConfig::default();
        blank.resolve_token_env(|_| Some("  ".into()));
        assert_eq!(blank.map.token, None);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = DashboardConfig::load(Path::new("/nonexistent/relief.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
