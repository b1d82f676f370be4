//! Page and route guards
//!
//! A guard resolves the session's role against one [`RoleScheme`] and turns
//! the resolver's boolean answers into [`GuardResult`]s and redirects.
//! Every path that cannot positively establish access ends in a denial.

use portal_rbac::{Enhanced, Legacy, RoleScheme, SchemeKind};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use tracing::{debug, info, instrument, warn};

use crate::config::GuardConfig;
use crate::error::{GuardError, GuardResult};
use crate::session::{PortalSession, SessionProvider};

/// Why a request was turned away.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    /// No valid session
    Unauthenticated,
    /// Signed in, but the role does not grant access
    Forbidden,
    /// Access could not be resolved (session provider, config or tables failed)
    Unavailable,
}

/// What a page should do after a guard check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GuardDecision {
    /// Render the page.
    Allow,
    /// Send the visitor elsewhere.
    Redirect {
        /// Redirect target
        location: String,
        /// Why the visitor was refused
        reason: DenialReason,
    },
}

impl GuardDecision {
    /// Check if the page may render.
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }
}

/// Guard bound to one role scheme.
///
/// # Example
///
/// ```
/// use chrono::Duration;
/// use portal_guard::{GuardConfig, PortalSession, RouteGuard};
/// use portal_rbac::{Enhanced, EnhancedFeature};
/// use uuid::Uuid;
///
/// let guard = RouteGuard::<Enhanced>::new(GuardConfig::default());
/// let session = PortalSession::new(Uuid::now_v7(), "audit@example.com", Duration::hours(1))
///     .with_role("read-only");
///
/// assert!(guard.check_feature(Some(&session), EnhancedFeature::TicketView).is_ok());
/// assert!(guard.check_feature(Some(&session), EnhancedFeature::TicketEdit).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct RouteGuard<S: RoleScheme> {
    config: GuardConfig,
    _scheme: PhantomData<S>,
}

impl<S: RoleScheme> RouteGuard<S> {
    /// Create a guard with the given configuration.
    ///
    /// The configuration's `scheme` field is ignored; `S` decides.
    pub fn new(config: GuardConfig) -> Self {
        Self {
            config,
            _scheme: PhantomData,
        }
    }

    /// The guard's configuration.
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Require that the session's role contains `required_role`.
    pub fn check_role(
        &self,
        session: Option<&PortalSession>,
        required_role: S::Role,
    ) -> GuardResult<()> {
        let role = self.active_role(session)?;

        if S::has_role(role, required_role) {
            debug!(scheme = S::KIND.as_str(), required = %required_role, "Role check passed");
            return Ok(());
        }

        if self.config.log_denials {
            info!(
                scheme = S::KIND.as_str(),
                role = role_label::<S>(role),
                required = %required_role,
                "Role check denied"
            );
        }
        Err(GuardError::Forbidden(format!(
            "role '{}' does not include '{}'",
            role_label::<S>(role),
            S::role_str(required_role)
        )))
    }

    /// Require that the session's role may use `feature`.
    pub fn check_feature(
        &self,
        session: Option<&PortalSession>,
        feature: S::Feature,
    ) -> GuardResult<()> {
        let role = self.active_role(session)?;

        if S::has_feature_access(role, feature) {
            debug!(scheme = S::KIND.as_str(), feature = %feature, "Feature check passed");
            return Ok(());
        }

        if self.config.log_denials {
            if S::is_destructive(feature) {
                warn!(
                    scheme = S::KIND.as_str(),
                    role = role_label::<S>(role),
                    feature = %feature,
                    "Destructive feature denied"
                );
            } else {
                info!(
                    scheme = S::KIND.as_str(),
                    role = role_label::<S>(role),
                    feature = %feature,
                    "Feature check denied"
                );
            }
        }
        Err(GuardError::Forbidden(format!(
            "role '{}' may not use '{}'",
            role_label::<S>(role),
            S::feature_str(feature)
        )))
    }

    /// [`check_feature`](Self::check_feature) for a weakly typed key.
    ///
    /// A key the scheme does not define is denied and logged: it means a
    /// page references a permission that was never added to the table.
    pub fn check_feature_key(&self, session: Option<&PortalSession>, key: &str) -> GuardResult<()> {
        match S::parse_feature(key) {
            Some(feature) => self.check_feature(session, feature),
            None => {
                warn!(scheme = S::KIND.as_str(), key, "Unknown feature key, denying");
                Err(GuardError::UnknownFeature(key.to_string()))
            }
        }
    }

    /// [`check_role`](Self::check_role) for a weakly typed role name.
    pub fn check_role_key(&self, session: Option<&PortalSession>, key: &str) -> GuardResult<()> {
        match S::parse_role(key) {
            Some(role) => self.check_role(session, role),
            None => {
                warn!(scheme = S::KIND.as_str(), key, "Unknown required role, denying");
                Err(GuardError::UnknownRole(key.to_string()))
            }
        }
    }

    /// Features the session may use, in permission-table order.
    ///
    /// Empty for missing or expired sessions and for unknown roles.
    pub fn permissions(&self, session: Option<&PortalSession>) -> Vec<S::Feature> {
        match self.active_role(session) {
            Ok(role) => S::role_permissions(role),
            Err(_) => Vec::new(),
        }
    }

    /// Map a check result to what the page should do.
    pub fn decide(&self, result: &GuardResult<()>) -> GuardDecision {
        decide(&self.config, result)
    }

    /// Load the current session and require `feature`.
    ///
    /// Returns the session on success so the handler can use it.
    #[instrument(skip(self, provider), fields(scheme = S::KIND.as_str()))]
    pub async fn authorize_feature<P>(
        &self,
        provider: &P,
        feature: S::Feature,
    ) -> GuardResult<PortalSession>
    where
        P: SessionProvider + ?Sized,
    {
        let session = provider.current_session().await?;
        self.check_feature(session.as_ref(), feature)?;
        session.ok_or(GuardError::Unauthenticated)
    }

    /// Load the current session and require `required_role`.
    #[instrument(skip(self, provider), fields(scheme = S::KIND.as_str()))]
    pub async fn authorize_role<P>(
        &self,
        provider: &P,
        required_role: S::Role,
    ) -> GuardResult<PortalSession>
    where
        P: SessionProvider + ?Sized,
    {
        let session = provider.current_session().await?;
        self.check_role(session.as_ref(), required_role)?;
        session.ok_or(GuardError::Unauthenticated)
    }

    fn active_role(&self, session: Option<&PortalSession>) -> GuardResult<Option<S::Role>> {
        match session {
            None => Err(GuardError::Unauthenticated),
            Some(session) if session.is_expired() => {
                debug!(session_id = %session.session_id, "Session expired");
                Err(GuardError::Unauthenticated)
            }
            Some(session) => Ok(session.role_in::<S>()),
        }
    }
}

fn role_label<S: RoleScheme>(role: Option<S::Role>) -> &'static str {
    role.map(S::role_str).unwrap_or("none")
}

fn decide(config: &GuardConfig, result: &GuardResult<()>) -> GuardDecision {
    match result {
        Ok(()) => GuardDecision::Allow,
        Err(GuardError::Unauthenticated) => GuardDecision::Redirect {
            location: config.sign_in_path.clone(),
            reason: DenialReason::Unauthenticated,
        },
        Err(e) if e.is_server_error() => GuardDecision::Redirect {
            location: config.access_denied_path.clone(),
            reason: DenialReason::Unavailable,
        },
        Err(_) => GuardDecision::Redirect {
            location: config.access_denied_path.clone(),
            reason: DenialReason::Forbidden,
        },
    }
}

/// Guard for the scheme selected at runtime by [`GuardConfig::scheme`].
///
/// All inputs are strings, for callers that receive role names and feature
/// keys from templates, route tables or request data.
///
/// # Example
///
/// ```
/// use chrono::Duration;
/// use portal_guard::{GuardConfig, PortalGuard, PortalSession};
/// use uuid::Uuid;
///
/// let guard = PortalGuard::from_config(GuardConfig::default()).unwrap();
/// let session = PortalSession::new(Uuid::now_v7(), "agent@example.com", Duration::hours(1))
///     .with_role("support-admin");
///
/// assert!(guard.check_feature(Some(&session), "ticket:edit").is_ok());
/// assert!(guard.check_feature(Some(&session), "ticket:frobnicate").is_err());
/// ```
#[derive(Debug, Clone)]
pub enum PortalGuard {
    /// Resolves against the legacy scheme
    Legacy(RouteGuard<Legacy>),
    /// Resolves against the enhanced scheme
    Enhanced(RouteGuard<Enhanced>),
}

impl PortalGuard {
    /// Validate `config` and build the guard for its scheme.
    pub fn from_config(config: GuardConfig) -> GuardResult<Self> {
        config.validate()?;

        info!(scheme = config.scheme.as_str(), "Portal guard initialised");
        Ok(match config.scheme {
            SchemeKind::Legacy => PortalGuard::Legacy(RouteGuard::new(config)),
            SchemeKind::Enhanced => PortalGuard::Enhanced(RouteGuard::new(config)),
        })
    }

    /// The active scheme.
    pub fn scheme(&self) -> SchemeKind {
        match self {
            PortalGuard::Legacy(_) => SchemeKind::Legacy,
            PortalGuard::Enhanced(_) => SchemeKind::Enhanced,
        }
    }

    /// The guard's configuration.
    pub fn config(&self) -> &GuardConfig {
        match self {
            PortalGuard::Legacy(guard) => guard.config(),
            PortalGuard::Enhanced(guard) => guard.config(),
        }
    }

    /// Require the role named `required_role`.
    pub fn check_role(&self, session: Option<&PortalSession>, required_role: &str) -> GuardResult<()> {
        match self {
            PortalGuard::Legacy(guard) => guard.check_role_key(session, required_role),
            PortalGuard::Enhanced(guard) => guard.check_role_key(session, required_role),
        }
    }

    /// Require the feature named by `key`.
    pub fn check_feature(&self, session: Option<&PortalSession>, key: &str) -> GuardResult<()> {
        match self {
            PortalGuard::Legacy(guard) => guard.check_feature_key(session, key),
            PortalGuard::Enhanced(guard) => guard.check_feature_key(session, key),
        }
    }

    /// Feature keys the session may use, in permission-table order.
    pub fn permissions(&self, session: Option<&PortalSession>) -> Vec<&'static str> {
        match self {
            PortalGuard::Legacy(guard) => guard
                .permissions(session)
                .into_iter()
                .map(|f| f.as_str())
                .collect(),
            PortalGuard::Enhanced(guard) => guard
                .permissions(session)
                .into_iter()
                .map(|f| f.as_str())
                .collect(),
        }
    }

    /// Map a check result to what the page should do.
    pub fn decide(&self, result: &GuardResult<()>) -> GuardDecision {
        decide(self.config(), result)
    }

    /// Load the current session and require the feature named by `key`.
    #[instrument(skip(self, provider), fields(scheme = self.scheme().as_str()))]
    pub async fn authorize_feature<P>(&self, provider: &P, key: &str) -> GuardResult<PortalSession>
    where
        P: SessionProvider + ?Sized,
    {
        let session = provider.current_session().await?;
        self.check_feature(session.as_ref(), key)?;
        session.ok_or(GuardError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use portal_rbac::{EnhancedFeature, EnhancedRole, LegacyFeature, LegacyRole};
    use uuid::Uuid;

    fn session(role: &str) -> PortalSession {
        PortalSession::new(Uuid::now_v7(), "test@example.com", Duration::hours(1)).with_role(role)
    }

    #[test]
    fn test_missing_session_is_unauthenticated() {
        let guard = RouteGuard::<Enhanced>::new(GuardConfig::default());
        let result = guard.check_feature(None, EnhancedFeature::TicketView);
        assert!(matches!(result, Err(GuardError::Unauthenticated)));
    }

    #[test]
    fn test_expired_session_is_unauthenticated() {
        let guard = RouteGuard::<Enhanced>::new(GuardConfig::default());
        let mut expired = session("super-admin");
        expired.expires_at = Utc::now() - Duration::minutes(5);

        let result = guard.check_role(Some(&expired), EnhancedRole::User);
        assert!(matches!(result, Err(GuardError::Unauthenticated)));
        assert!(guard.permissions(Some(&expired)).is_empty());
    }

    #[test]
    fn test_session_without_role_is_forbidden() {
        let guard = RouteGuard::<Enhanced>::new(GuardConfig::default());
        let anonymous_role =
            PortalSession::new(Uuid::now_v7(), "test@example.com", Duration::hours(1));

        let result = guard.check_feature(Some(&anonymous_role), EnhancedFeature::TicketView);
        assert!(matches!(result, Err(GuardError::Forbidden(_))));
        assert!(guard.permissions(Some(&anonymous_role)).is_empty());
    }

    #[test]
    fn test_role_from_other_scheme_is_forbidden() {
        let guard = RouteGuard::<Enhanced>::new(GuardConfig::default());
        let result = guard.check_feature(Some(&session("moderator")), EnhancedFeature::TicketView);
        assert!(matches!(result, Err(GuardError::Forbidden(_))));
    }

    #[test]
    fn test_legacy_guard() {
        let guard = RouteGuard::<Legacy>::new(GuardConfig::default());
        let admin = session("admin");

        assert!(guard.check_role(Some(&admin), LegacyRole::Moderator).is_ok());
        assert!(guard.check_role(Some(&admin), LegacyRole::SuperAdmin).is_err());
        assert!(guard.check_feature(Some(&admin), LegacyFeature::UserDelete).is_err());
        assert!(guard
            .check_feature(Some(&session("super-admin")), LegacyFeature::UserDelete)
            .is_ok());
    }

    #[test]
    fn test_forbidden_message_names_role_and_feature() {
        let guard = RouteGuard::<Enhanced>::new(GuardConfig::default());
        let err = guard
            .check_feature(Some(&session("read-only")), EnhancedFeature::TicketEdit)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Forbidden: role 'read-only' may not use 'ticket:edit'"
        );
    }

    #[test]
    fn test_unknown_feature_key_is_denied() {
        let guard = RouteGuard::<Enhanced>::new(GuardConfig::default());
        let result = guard.check_feature_key(Some(&session("super-admin")), "billing:view");
        assert!(matches!(result, Err(GuardError::UnknownFeature(ref k)) if k == "billing:view"));
    }

    #[test]
    fn test_unknown_required_role_is_denied() {
        let guard = RouteGuard::<Legacy>::new(GuardConfig::default());
        let result = guard.check_role_key(Some(&session("super-admin")), "support-admin");
        assert!(matches!(result, Err(GuardError::UnknownRole(_))));
    }

    #[test]
    fn test_decide_redirects() {
        let guard = RouteGuard::<Enhanced>::new(GuardConfig::default());

        assert_eq!(guard.decide(&Ok(())), GuardDecision::Allow);
        assert_eq!(
            guard.decide(&Err(GuardError::Unauthenticated)),
            GuardDecision::Redirect {
                location: "/sign-in".to_string(),
                reason: DenialReason::Unauthenticated,
            }
        );
        assert_eq!(
            guard.decide(&Err(GuardError::Forbidden(
                "role 'user' may not use 'user:view'".into()
            ))),
            GuardDecision::Redirect {
                location: "/access-denied".to_string(),
                reason: DenialReason::Forbidden,
            }
        );
        assert_eq!(
            guard.decide(&Err(GuardError::UnknownFeature("ticket:publish".into()))),
            GuardDecision::Redirect {
                location: "/access-denied".to_string(),
                reason: DenialReason::Forbidden,
            }
        );
    }

    #[test]
    fn test_server_failures_are_not_reported_as_denials() {
        let guard = RouteGuard::<Enhanced>::new(GuardConfig::default());

        for err in [
            GuardError::Session("provider down".into()),
            GuardError::Config(crate::ConfigError::InvalidValue {
                key: "PORTAL_ROLE_SCHEME".into(),
                message: "unset".into(),
            }),
            GuardError::Table(portal_rbac::TableError::Unreachable {
                scheme: "enhanced",
                feature: "audit-log:view",
            }),
        ] {
            assert_eq!(
                guard.decide(&Err(err)),
                GuardDecision::Redirect {
                    location: "/access-denied".to_string(),
                    reason: DenialReason::Unavailable,
                }
            );
        }

        let json = serde_json::to_value(DenialReason::Unavailable).unwrap();
        assert_eq!(json, "unavailable");
    }

    #[test]
    fn test_decision_serialization() {
        let decision = GuardDecision::Redirect {
            location: "/access-denied".to_string(),
            reason: DenialReason::Forbidden,
        };
        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["decision"], "redirect");
        assert_eq!(json["reason"], "forbidden");
        assert!(!decision.is_allowed());
    }

    #[test]
    fn test_portal_guard_follows_configured_scheme() {
        let legacy = PortalGuard::from_config(GuardConfig {
            scheme: SchemeKind::Legacy,
            ..GuardConfig::default()
        })
        .unwrap();
        assert_eq!(legacy.scheme(), SchemeKind::Legacy);
        assert!(legacy.check_role(Some(&session("admin")), "moderator").is_ok());
        assert!(legacy.check_feature(Some(&session("admin")), "calendar:view").is_err());

        let enhanced = PortalGuard::from_config(GuardConfig::default()).unwrap();
        assert_eq!(enhanced.scheme(), SchemeKind::Enhanced);
        assert!(enhanced.check_feature(Some(&session("read-only")), "calendar:view").is_ok());
    }

    #[test]
    fn test_portal_guard_permissions() {
        let guard = PortalGuard::from_config(GuardConfig::default()).unwrap();
        assert_eq!(
            guard.permissions(Some(&session("user"))),
            vec!["ticket:view", "ticket:create", "document:view", "knowledge-base:view"]
        );
        assert!(guard.permissions(None).is_empty());
    }

    #[test]
    fn test_portal_guard_rejects_bad_config() {
        let result = PortalGuard::from_config(GuardConfig {
            sign_in_path: "sign-in".to_string(),
            ..GuardConfig::default()
        });
        assert!(matches!(result, Err(GuardError::Config(_))));
    }
}
