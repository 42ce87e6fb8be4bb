//! Client Configuration
//!
//! Values are baked in at build time: a browser bundle has no process
//! environment to read at startup.

use log::Level;

use crate::error::{ApiError, ApiResult};

const DEFAULT_API_BASE: &str = "/api";

/// Frontend settings
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Absolute URL or path prefix the `/todos` routes hang off
    pub api_base: String,
    /// Whether rows can be activated to flip completion
    pub toggle_enabled: bool,
    /// Console log level
    pub log_level: Level,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            toggle_enabled: true,
            log_level: Level::Debug,
        }
    }
}

impl ClientConfig {
    /// Load from `TASKS_API_BASE`, `TASKS_TOGGLE` and `TASKS_LOG_LEVEL`
    /// as seen by the compiler.
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("TASKS_API_BASE"),
            option_env!("TASKS_TOGGLE"),
            option_env!("TASKS_LOG_LEVEL"),
        )
    }

    fn from_values(api_base: Option<&str>, toggle: Option<&str>, log_level: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            api_base: api_base
                .map(str::trim)
                .filter(|base| !base.is_empty())
                .map(str::to_string)
                .unwrap_or(defaults.api_base),
            toggle_enabled: toggle.map(parse_flag).unwrap_or(defaults.toggle_enabled),
            log_level: log_level
                .and_then(|level| level.trim().parse().ok())
                .unwrap_or(defaults.log_level),
        }
    }

    /// Absolute base URL for API calls, without trailing slash.
    ///
    /// Relative bases are joined onto `origin` (the page origin in the browser).
    pub fn resolve_base(&self, origin: Option<&str>) -> ApiResult<String> {
        let invalid = |reason: &str| ApiError::InvalidBase {
            base: self.api_base.clone(),
            reason: reason.to_string(),
        };

        let base = if self.api_base.starts_with('/') {
            let origin = origin.ok_or_else(|| invalid("relative base needs a page origin"))?;
            let origin = reqwest::Url::parse(origin).map_err(|e| invalid(&e.to_string()))?;
            origin.join(&self.api_base).map_err(|e| invalid(&e.to_string()))?
        } else {
            reqwest::Url::parse(&self.api_base).map_err(|e| invalid(&e.to_string()))?
        };

        match base.scheme() {
            "http" | "https" => Ok(base.as_str().trim_end_matches('/').to_string()),
            other => Err(invalid(&format!("unsupported scheme {:?}", other))),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(value.trim().to_ascii_lowercase().as_str(), "0" | "false" | "off" | "no")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_values(None, None, None);

        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_base, "/api");
        assert!(config.toggle_enabled);
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_values(Some("http://localhost:3000/api"), Some("off"), Some("warn"));

        assert_eq!(config.api_base, "http://localhost:3000/api");
        assert!(!config.toggle_enabled);
        assert_eq!(config.log_level, Level::Warn);
    }

    #[test]
    fn test_blank_base_falls_back() {
        let config = ClientConfig::from_values(Some("  "), Some("yes"), Some("loud"));

        assert_eq!(config.api_base, "/api");
        assert!(config.toggle_enabled);
        assert_eq!(config.log_level, Level::Debug);
    }

    #[test]
    fn test_resolve_relative_base() {
        let config = ClientConfig::default();

        let base = config.resolve_base(Some("http://localhost:3000")).unwrap();
        assert_eq!(base, "http://localhost:3000/api");
    }

    #[test]
    fn test_resolve_absolute_base_strips_slash() {
        let config = ClientConfig { api_base: "https://tasks.example.com/v1/".into(), ..Default::default() };

        let base = config.resolve_base(None).unwrap();
        assert_eq!(base, "https://tasks.example.com/v1");
    }

    #[test]
    fn test_resolve_relative_base_without_origin() {
        let config = ClientConfig::default();

        assert!(matches!(config.resolve_base(None), Err(ApiError::InvalidBase { .. })));
    }

    #[test]
    fn test_resolve_rejects_non_http() {
        let config = ClientConfig { api_base: "ftp://example.com/api".into(), ..Default::default() };

        assert!(matches!(config.resolve_base(None), Err(ApiError::InvalidBase { .. })));
    }
}
