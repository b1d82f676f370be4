//! # Portal Guard
//!
//! Page and route guards for the helpdesk portal, built on `portal-rbac`.
//!
//! ## Overview
//!
//! The portal-guard crate handles:
//! - **Sessions**: The identity handed over by the authentication provider
//! - **Guards**: Role and feature checks that end in allow or redirect
//! - **Configuration**: Scheme selection and redirect targets
//! - **Errors**: Denials mapped to HTTP status codes and error codes
//!
//! ## Flow
//!
//! ```text
//! SessionProvider ─→ PortalSession (raw role string)
//!                        │
//!                        ▼
//!                 RouteGuard<S> ─→ portal_rbac (S::has_feature_access)
//!                        │
//!                        ▼
//!                 GuardDecision::Allow | Redirect { /sign-in, /access-denied }
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use portal_guard::{GuardConfig, PortalGuard, StaticSessionProvider};
//!
//! # async fn handler(provider: StaticSessionProvider) -> Result<(), portal_guard::GuardError> {
//! let guard = PortalGuard::from_config(GuardConfig::from_env()?)?;
//!
//! let result = guard.authorize_feature(&provider, "ticket:edit").await;
//! let decision = guard.decide(&result.map(|_| ()));
//! # Ok(())
//! # }
//! ```
//!
//! ## Default Deny
//!
//! Missing or expired sessions, unknown role strings and unknown feature
//! keys are all refused. A session provider error is refused too.

pub mod config;
pub mod error;
pub mod guard;
pub mod session;

// Re-export main types for convenience
pub use config::{ConfigError, GuardConfig};
pub use error::{GuardError, GuardResult};
pub use guard::{DenialReason, GuardDecision, PortalGuard, RouteGuard};
pub use session::{PortalSession, SessionProvider, StaticSessionProvider};
