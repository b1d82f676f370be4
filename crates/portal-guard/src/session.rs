//! Portal sessions
//!
//! The identity provider is an external collaborator: it hands the portal a
//! session carrying the user's identity and, possibly, a role string. This
//! module models that session and the provider seam the guards read from.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use portal_rbac::RoleScheme;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::GuardResult;

/// An authenticated portal session.
///
/// The role is kept as the raw string the identity provider supplied; it is
/// only interpreted against a [`RoleScheme`] at check time, and a value the
/// scheme does not know is treated as no role at all.
///
/// # Example
///
/// ```
/// use chrono::Duration;
/// use portal_guard::PortalSession;
/// use portal_rbac::{Enhanced, EnhancedRole, Legacy};
/// use uuid::Uuid;
///
/// let session = PortalSession::new(Uuid::now_v7(), "agent@example.com", Duration::hours(8))
///     .with_role("support-admin");
///
/// assert_eq!(session.role_in::<Enhanced>(), Some(EnhancedRole::SupportAdmin));
/// assert_eq!(session.role_in::<Legacy>(), None);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PortalSession {
    /// User ID
    pub user_id: Uuid,

    /// User email
    pub email: String,

    /// User display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Role as supplied by the identity provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Session ID
    pub session_id: Uuid,

    /// When the session was issued
    pub issued_at: DateTime<Utc>,

    /// When the session stops being valid
    pub expires_at: DateTime<Utc>,
}

impl PortalSession {
    /// Create a new session without a role.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's unique identifier
    /// * `email` - The user's email address
    /// * `duration` - Session validity duration
    pub fn new(user_id: Uuid, email: impl Into<String>, duration: Duration) -> Self {
        let now = Utc::now();

        Self {
            user_id,
            email: email.into(),
            name: None,
            role: None,
            session_id: Uuid::now_v7(),
            issued_at: now,
            expires_at: now + duration,
        }
    }

    /// Set the role string.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Check if the session is expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Interpret the role string in scheme `S`.
    ///
    /// Returns `None` when there is no role or the scheme does not know it.
    pub fn role_in<S: RoleScheme>(&self) -> Option<S::Role> {
        self.role.as_deref().and_then(S::parse_role)
    }
}

/// Source of the current request's session.
///
/// Implemented by the portal's authentication integration.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// The current session, or `None` when the visitor is not signed in.
    async fn current_session(&self) -> GuardResult<Option<PortalSession>>;
}

/// A provider that always returns the same session.
///
/// Useful for local development and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSessionProvider {
    session: Option<PortalSession>,
}

impl StaticSessionProvider {
    /// Provider for a signed-in visitor.
    pub fn new(session: PortalSession) -> Self {
        Self {
            session: Some(session),
        }
    }

    /// Provider for an anonymous visitor.
    pub fn anonymous() -> Self {
        Self { session: None }
    }
}

#[async_trait]
impl SessionProvider for StaticSessionProvider {
    async fn current_session(&self) -> GuardResult<Option<PortalSession>> {
        Ok(self.session.clone())
    }
}
