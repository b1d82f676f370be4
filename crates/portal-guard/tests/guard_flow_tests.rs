//! End-to-end tests for page guards.
//!
//! These tests drive the guards the way portal pages do: load the session
//! from a provider, check a feature or role, and turn the result into a
//! render-or-redirect decision.
//!
//! Covered flows:
//! 1. Signed-in visitor with a sufficient role renders the page
//! 2. Anonymous visitor is sent to sign-in
//! 3. Signed-in visitor without access is sent to access-denied
//! 4. Session provider failure is refused
//! 5. Concurrent checks against the shared static tables

use async_trait::async_trait;
use chrono::Duration;
use portal_guard::{
    DenialReason, GuardConfig, GuardDecision, GuardError, GuardResult, PortalGuard,
    PortalSession, RouteGuard, SessionProvider, StaticSessionProvider,
};
use portal_rbac::{Enhanced, EnhancedFeature, EnhancedRole, Legacy, LegacyRole, SchemeKind};
use std::sync::Arc;
use uuid::Uuid;

/// Provider whose backing identity service is unreachable.
struct FailingProvider;

#[async_trait]
impl SessionProvider for FailingProvider {
    async fn current_session(&self) -> GuardResult<Option<PortalSession>> {
        Err(GuardError::Session("identity provider unreachable".to_string()))
    }
}

fn provider_for(role: &str) -> StaticSessionProvider {
    StaticSessionProvider::new(
        PortalSession::new(Uuid::now_v7(), format!("{role}@example.com"), Duration::hours(8))
            .with_role(role),
    )
}

#[tokio::test]
async fn test_support_admin_opens_ticket_editor() {
    let guard = RouteGuard::<Enhanced>::new(GuardConfig::default());
    let provider = provider_for("support-admin");

    let session = guard
        .authorize_feature(&provider, EnhancedFeature::TicketEdit)
        .await
        .expect("support admins edit tickets");

    assert_eq!(session.role_in::<Enhanced>(), Some(EnhancedRole::SupportAdmin));
}

#[tokio::test]
async fn test_read_only_is_sent_to_access_denied() {
    let guard = RouteGuard::<Enhanced>::new(GuardConfig::default());
    let provider = provider_for("read-only");

    let viewer = guard
        .authorize_feature(&provider, EnhancedFeature::TicketView)
        .await
        .map(|_| ());
    assert_eq!(guard.decide(&viewer), GuardDecision::Allow);

    let editor = guard
        .authorize_feature(&provider, EnhancedFeature::TicketEdit)
        .await
        .map(|_| ());
    assert_eq!(
        guard.decide(&editor),
        GuardDecision::Redirect {
            location: "/access-denied".to_string(),
            reason: DenialReason::Forbidden,
        }
    );
}

#[tokio::test]
async fn test_anonymous_visitor_is_sent_to_sign_in() {
    let config = GuardConfig {
        sign_in_path: "/login".to_string(),
        ..GuardConfig::default()
    };
    let guard = PortalGuard::from_config(config).unwrap();

    let result = guard
        .authorize_feature(&StaticSessionProvider::anonymous(), "knowledge-base:view")
        .await
        .map(|_| ());

    assert!(matches!(result, Err(GuardError::Unauthenticated)));
    assert_eq!(
        guard.decide(&result),
        GuardDecision::Redirect {
            location: "/login".to_string(),
            reason: DenialReason::Unauthenticated,
        }
    );
}

#[tokio::test]
async fn test_provider_failure_is_refused() {
    let guard = RouteGuard::<Legacy>::new(GuardConfig::default());

    let result = guard
        .authorize_role(&FailingProvider, LegacyRole::User)
        .await
        .map(|_| ());

    let err = result.as_ref().unwrap_err();
    assert!(err.is_server_error());
    assert_eq!(err.status_code(), 500);
    assert_eq!(
        guard.decide(&result),
        GuardDecision::Redirect {
            location: "/access-denied".to_string(),
            reason: DenialReason::Unavailable,
        }
    );
}

#[tokio::test]
async fn test_legacy_deployment_from_environment_lookup() {
    let config = GuardConfig::from_lookup(|key| match key {
        "PORTAL_ROLE_SCHEME" => Some("legacy".to_string()),
        _ => None,
    })
    .unwrap();
    let guard = PortalGuard::from_config(config).unwrap();
    assert_eq!(guard.scheme(), SchemeKind::Legacy);

    let admin = provider_for("admin");
    assert!(guard.authorize_feature(&admin, "analytics:view").await.is_ok());

    let err = guard
        .authorize_feature(&admin, "user:delete")
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "FORBIDDEN");

    let super_admin = provider_for("super-admin");
    assert!(guard.authorize_feature(&super_admin, "user:delete").await.is_ok());
}

#[tokio::test]
async fn test_concurrent_checks_share_tables() {
    let guard = Arc::new(PortalGuard::from_config(GuardConfig::default()).unwrap());

    let mut handles = Vec::new();
    for role in ["user", "read-only", "support-admin", "admin", "super-admin"] {
        let guard = Arc::clone(&guard);
        handles.push(tokio::spawn(async move {
            let provider = provider_for(role);
            let mut outcomes = Vec::new();
            for _ in 0..50 {
                let result = guard.authorize_feature(&provider, "ticket:edit").await;
                outcomes.push(result.is_ok());
            }
            (role, outcomes)
        }));
    }

    for handle in handles {
        let (role, outcomes) = handle.await.unwrap();
        let expected = matches!(role, "support-admin" | "admin" | "super-admin");
        assert!(outcomes.iter().all(|&ok| ok == expected), "{role}");
    }
}
