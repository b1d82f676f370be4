//! Error types for guard operations
//!
//! Denial is reported through these errors so route handlers can turn it
//! into a redirect or an HTTP status. The resolver itself never fails.

use portal_rbac::TableError;
use thiserror::Error;

use crate::config::ConfigError;

/// Guard error types.
#[derive(Debug, Error)]
pub enum GuardError {
    /// No session, or the session has expired
    #[error("Authentication required")]
    Unauthenticated,

    /// The session's role does not grant the requested access
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A feature key that the active scheme does not define
    #[error("Unknown feature key: {0}")]
    UnknownFeature(String),

    /// A role name that the active scheme does not define
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// The session provider failed
    #[error("Session error: {0}")]
    Session(String),

    /// Invalid guard configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The role tables failed startup validation
    #[error("Role table error: {0}")]
    Table(#[from] TableError),
}

/// Result type for guard operations.
pub type GuardResult<T> = Result<T, GuardError>;

impl GuardError {
    /// Check if this error should be logged at error level.
    ///
    /// Denials are expected and are not server errors.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            GuardError::Session(_) | GuardError::Config(_) | GuardError::Table(_)
        )
    }

    /// Check if this error means access was refused.
    ///
    /// Unknown keys and roles count as refusals.
    pub fn is_denial(&self) -> bool {
        matches!(
            self,
            GuardError::Forbidden(_) | GuardError::UnknownFeature(_) | GuardError::UnknownRole(_)
        )
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            GuardError::Unauthenticated => 401,

            GuardError::Forbidden(_)
            | GuardError::UnknownFeature(_)
            | GuardError::UnknownRole(_) => 403,

            GuardError::Session(_) | GuardError::Config(_) | GuardError::Table(_) => 500,
        }
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            GuardError::Unauthenticated => "UNAUTHENTICATED",
            GuardError::Forbidden(_) => "FORBIDDEN",
            GuardError::UnknownFeature(_) => "UNKNOWN_FEATURE",
            GuardError::UnknownRole(_) => "UNKNOWN_ROLE",
            GuardError::Session(_) => "SESSION_ERROR",
            GuardError::Config(_) => "CONFIG_ERROR",
            GuardError::Table(_) => "ROLE_TABLE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(GuardError::Unauthenticated.status_code(), 401);
        assert_eq!(GuardError::Forbidden("ticket:edit".into()).status_code(), 403);
        assert_eq!(GuardError::UnknownFeature("x:y".into()).status_code(), 403);
        assert_eq!(GuardError::Session("down".into()).status_code(), 500);
    }

    #[test]
    fn test_denials_are_not_server_errors() {
        let forbidden = GuardError::Forbidden("user:delete".into());
        assert!(forbidden.is_denial());
        assert!(!forbidden.is_server_error());

        let unauthenticated = GuardError::Unauthenticated;
        assert!(!unauthenticated.is_denial());
        assert!(!unauthenticated.is_server_error());

        let config = GuardError::from(ConfigError::InvalidValue {
            key: "PORTAL_ROLE_SCHEME".into(),
            message: "unknown scheme".into(),
        });
        assert!(config.is_server_error());
        assert_eq!(config.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_table_error_conversion() {
        let err = GuardError::from(TableError::Unreachable {
            scheme: "legacy",
            feature: "settings:edit",
        });
        assert_eq!(err.error_code(), "ROLE_TABLE_ERROR");
        assert_eq!(
            err.to_string(),
            "Role table error: legacy: feature 'settings:edit' grants no role"
        );
    }
}
