//! # Portal RBAC (Role-Based Access Control)
//!
//! This crate answers the helpdesk portal's access-control questions:
//! does a role contain another role, may a role use a feature, and which
//! features does a role hold.
//!
//! ## Overview
//!
//! The portal-rbac crate handles:
//! - **Resources**: The portal areas (users, tickets, documents, calendar,
//!   analytics, knowledge base, settings, audit log)
//! - **Actions**: Operations performed on those areas
//! - **Feature keys**: `resource:action` pairs such as `ticket:edit`
//! - **Role schemes**: Two independent role enumerations, each with a
//!   hand-enumerated hierarchy and a permission table
//!
//! ## Role Schemes
//!
//! ```text
//! legacy:    user < moderator < admin < super-admin
//! enhanced:  user, read-only < support-admin < admin < super-admin
//! ```
//!
//! The schemes have different role sets and are never mapped onto each
//! other. New pages use the enhanced scheme.
//!
//! ## Usage
//!
//! ```rust
//! use portal_rbac::enhanced::{self, EnhancedFeature, EnhancedRole};
//!
//! let role = EnhancedRole::parse("support-admin");
//! assert!(enhanced::has_feature_access(role, EnhancedFeature::TicketEdit));
//! assert!(enhanced::has_role(role, EnhancedRole::ReadOnly));
//!
//! // No role means no access
//! assert!(!enhanced::has_feature_access(None, EnhancedFeature::TicketView));
//! assert!(enhanced::role_permissions(None).is_empty());
//! ```
//!
//! ## Default Deny
//!
//! An absent role, an unknown role string, or an unknown feature key always
//! resolves to "denied". None of the query functions can fail.
//!
//! All tables are compiled-in constants, so every query is a pure lookup
//! that is safe to call from any number of threads.

pub mod actions;
pub mod enhanced;
pub mod legacy;
pub mod resources;
pub mod scheme;
pub mod validate;

// Re-export main types for convenience
pub use actions::Action;
pub use enhanced::{EnhancedFeature, EnhancedRole, RoleInfo};
pub use legacy::{LegacyFeature, LegacyRole};
pub use resources::Resource;
pub use scheme::{Enhanced, Legacy, RoleScheme, SchemeKind};
pub use validate::{validate_kind, validate_scheme, TableError};
