//! Guard configuration.
//!
//! Selects the role scheme and the redirect targets used when a guard
//! refuses a request. Configuration is loaded from environment variables
//! with defaults suitable for local development.

use portal_rbac::SchemeKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// Guard configuration for the portal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GuardConfig {
    /// Role scheme sessions are resolved against.
    pub scheme: SchemeKind,

    /// Where unauthenticated visitors are sent.
    pub sign_in_path: String,

    /// Where authenticated visitors without access are sent.
    pub access_denied_path: String,

    /// Whether refused checks are logged.
    pub log_denials: bool,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            scheme: SchemeKind::Enhanced,
            sign_in_path: "/sign-in".to_string(),
            access_denied_path: "/access-denied".to_string(),
            log_denials: true,
        }
    }
}

impl GuardConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORTAL_ROLE_SCHEME`: `legacy` or `enhanced` (default: enhanced)
    /// - `PORTAL_SIGN_IN_PATH`: sign-in redirect (default: /sign-in)
    /// - `PORTAL_ACCESS_DENIED_PATH`: access-denied redirect (default: /access-denied)
    /// - `PORTAL_LOG_DENIALS`: whether to log refused checks, one of
    ///   `true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off` (default: true)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// An unrecognised scheme name is an error rather than a silent
    /// fallback, so a typo cannot switch a deployment to the other scheme.
    ///
    /// # Example
    ///
    /// ```
    /// use portal_guard::GuardConfig;
    /// use portal_rbac::SchemeKind;
    ///
    /// let config = GuardConfig::from_lookup(|key| match key {
    ///     "PORTAL_ROLE_SCHEME" => Some("legacy".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.scheme, SchemeKind::Legacy);
    /// assert_eq!(config.sign_in_path, "/sign-in");
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();

        let scheme = match lookup("PORTAL_ROLE_SCHEME") {
            Some(value) => SchemeKind::parse(&value).ok_or_else(|| ConfigError::InvalidValue {
                key: "PORTAL_ROLE_SCHEME".to_string(),
                message: format!("expected 'legacy' or 'enhanced', got '{value}'"),
            })?,
            None => default.scheme,
        };

        Ok(Self {
            scheme,
            sign_in_path: lookup("PORTAL_SIGN_IN_PATH").unwrap_or(default.sign_in_path),
            access_denied_path: lookup("PORTAL_ACCESS_DENIED_PATH")
                .unwrap_or(default.access_denied_path),
            log_denials: match lookup("PORTAL_LOG_DENIALS") {
                Some(value) => parse_flag("PORTAL_LOG_DENIALS", &value)?,
                None => default.log_denials,
            },
        })
    }

    /// Validate the configuration and the selected scheme's role tables.
    ///
    /// Call once at startup.
    pub fn validate(&self) -> Result<(), crate::GuardError> {
        check_path("PORTAL_SIGN_IN_PATH", &self.sign_in_path)?;
        check_path("PORTAL_ACCESS_DENIED_PATH", &self.access_denied_path)?;
        portal_rbac::validate_kind(self.scheme)?;
        Ok(())
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a boolean, got '{value}'"),
        }),
    }
}

// Browsers treat `\` like `/`, so `/\host` leaves the site just as `//host` does.
fn check_path(key: &str, path: &str) -> Result<(), ConfigError> {
    if !path.starts_with('/') || path.starts_with("//") || path.contains('\\') {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("'{path}' must be an absolute path on this site"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = GuardConfig::default();
        assert_eq!(config.scheme, SchemeKind::Enhanced);
        assert_eq!(config.sign_in_path, "/sign-in");
        assert_eq!(config.access_denied_path, "/access-denied");
        assert!(config.log_denials);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = GuardConfig::from_lookup(lookup_from(&[
            ("PORTAL_ROLE_SCHEME", "LEGACY"),
            ("PORTAL_SIGN_IN_PATH", "/login"),
            ("PORTAL_ACCESS_DENIED_PATH", "/403"),
            ("PORTAL_LOG_DENIALS", "0"),
        ]))
        .unwrap();

        assert_eq!(config.scheme, SchemeKind::Legacy);
        assert_eq!(config.sign_in_path, "/login");
        assert_eq!(config.access_denied_path, "/403");
        assert!(!config.log_denials);
    }

    #[test]
    fn test_unknown_scheme_is_rejected() {
        let err = GuardConfig::from_lookup(lookup_from(&[("PORTAL_ROLE_SCHEME", "v3")]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration value for PORTAL_ROLE_SCHEME: expected 'legacy' or 'enhanced', got 'v3'"
        );
    }

    #[test]
    fn test_validate_rejects_external_redirects() {
        let mut config = GuardConfig::default();
        config.access_denied_path = "https://evil.example/denied".to_string();
        assert!(config.validate().is_err());

        config.access_denied_path = "//evil.example".to_string();
        assert!(config.validate().is_err());

        config.access_denied_path = "/\\evil.example".to_string();
        assert!(config.validate().is_err());

        config.access_denied_path = "/help\\..\\denied".to_string();
        assert!(config.validate().is_err());

        config.access_denied_path = "/access-denied".to_string();
        config.sign_in_path = "/\\evil.example/login".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("PORTAL_SIGN_IN_PATH"));
    }

    #[test]
    fn test_log_denials_flag_parsing() {
        for (value, expected) in [
            ("FALSE", false),
            (" no ", false),
            ("Off", false),
            ("0", false),
            ("True", true),
            ("yes", true),
            ("ON", true),
            ("1", true),
        ] {
            let config =
                GuardConfig::from_lookup(lookup_from(&[("PORTAL_LOG_DENIALS", value)])).unwrap();
            assert_eq!(config.log_denials, expected, "{value:?}");
        }
    }

    #[test]
    fn test_unknown_log_denials_flag_is_rejected() {
        let err = GuardConfig::from_lookup(lookup_from(&[("PORTAL_LOG_DENIALS", "maybe")]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration value for PORTAL_LOG_DENIALS: expected a boolean, got 'maybe'"
        );
    }
}
