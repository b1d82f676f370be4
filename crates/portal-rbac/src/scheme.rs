//! # Role schemes
//!
//! A [`RoleScheme`] names one role enumeration together with its feature
//! keys and tables. The trait only delegates to the per-scheme modules; the
//! legacy and enhanced tables stay separate and are never mapped onto each
//! other.

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use std::hash::Hash;

use crate::enhanced::{self, EnhancedFeature, EnhancedRole};
use crate::legacy::{self, LegacyFeature, LegacyRole};

/// Which role scheme a deployment resolves against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum SchemeKind {
    /// Four-tier legacy scheme.
    Legacy,
    /// Five-tier enhanced scheme.
    #[default]
    Enhanced,
}

impl SchemeKind {
    /// Get the string representation of the scheme.
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemeKind::Legacy => "legacy",
            SchemeKind::Enhanced => "enhanced",
        }
    }

    /// Parse a scheme name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "legacy" => Some(SchemeKind::Legacy),
            "enhanced" => Some(SchemeKind::Enhanced),
            _ => None,
        }
    }
}

/// A role enumeration with its hierarchy and permission table.
///
/// # Example
///
/// ```
/// use portal_rbac::scheme::{Enhanced, RoleScheme};
///
/// let role = Enhanced::parse_role("support-admin");
/// let feature = Enhanced::parse_feature("ticket:edit").unwrap();
/// assert!(Enhanced::has_feature_access(role, feature));
/// assert!(!Enhanced::has_feature_access(Enhanced::parse_role("nobody"), feature));
/// ```
pub trait RoleScheme: Send + Sync + 'static {
    /// Role enumeration of this scheme.
    type Role: Copy + Eq + Hash + Debug + Display + Send + Sync + 'static;

    /// Feature key enumeration of this scheme.
    type Feature: Copy + Eq + Hash + Debug + Display + Send + Sync + 'static;

    /// Which scheme this is.
    const KIND: SchemeKind;

    /// Every role of the scheme.
    fn roles() -> &'static [Self::Role];

    /// Every feature of the scheme, in permission-table order.
    fn features() -> &'static [Self::Feature];

    /// Parse a role from a weakly typed value. Unknown values are `None`.
    fn parse_role(s: &str) -> Option<Self::Role>;

    /// Parse a `resource:action` key. Unknown keys are `None`.
    fn parse_feature(s: &str) -> Option<Self::Feature>;

    /// Canonical string for a role.
    fn role_str(role: Self::Role) -> &'static str;

    /// Canonical string for a feature.
    fn feature_str(feature: Self::Feature) -> &'static str;

    /// Hand-enumerated hierarchy set of a role.
    fn contained_roles(role: Self::Role) -> &'static [Self::Role];

    /// Permission table entry of a feature.
    fn allowed_roles(feature: Self::Feature) -> &'static [Self::Role];

    /// Whether a feature removes data or changes access.
    fn is_destructive(feature: Self::Feature) -> bool;

    /// See [`legacy::has_role`] / [`enhanced::has_role`].
    fn has_role(user_role: Option<Self::Role>, required_role: Self::Role) -> bool;

    /// See [`legacy::has_feature_access`] / [`enhanced::has_feature_access`].
    fn has_feature_access(user_role: Option<Self::Role>, feature: Self::Feature) -> bool;

    /// See [`legacy::role_permissions`] / [`enhanced::role_permissions`].
    fn role_permissions(user_role: Option<Self::Role>) -> Vec<Self::Feature>;
}

/// Marker for the legacy scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct Legacy;

/// Marker for the enhanced scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct Enhanced;

impl RoleScheme for Legacy {
    type Role = LegacyRole;
    type Feature = LegacyFeature;

    const KIND: SchemeKind = SchemeKind::Legacy;

    fn roles() -> &'static [LegacyRole] {
        &LegacyRole::ALL
    }

    fn features() -> &'static [LegacyFeature] {
        &LegacyFeature::ALL
    }

    fn parse_role(s: &str) -> Option<LegacyRole> {
        LegacyRole::parse(s)
    }

    fn parse_feature(s: &str) -> Option<LegacyFeature> {
        LegacyFeature::parse(s)
    }

    fn role_str(role: LegacyRole) -> &'static str {
        role.as_str()
    }

    fn feature_str(feature: LegacyFeature) -> &'static str {
        feature.as_str()
    }

    fn contained_roles(role: LegacyRole) -> &'static [LegacyRole] {
        role.contained_roles()
    }

    fn allowed_roles(feature: LegacyFeature) -> &'static [LegacyRole] {
        feature.allowed_roles()
    }

    fn is_destructive(feature: LegacyFeature) -> bool {
        feature.action().is_destructive()
    }

    fn has_role(user_role: Option<LegacyRole>, required_role: LegacyRole) -> bool {
        legacy::has_role(user_role, required_role)
    }

    fn has_feature_access(user_role: Option<LegacyRole>, feature: LegacyFeature) -> bool {
        legacy::has_feature_access(user_role, feature)
    }

    fn role_permissions(user_role: Option<LegacyRole>) -> Vec<LegacyFeature> {
        legacy::role_permissions(user_role)
    }
}

impl RoleScheme for Enhanced {
    type Role = EnhancedRole;
    type Feature = EnhancedFeature;

    const KIND: SchemeKind = SchemeKind::Enhanced;

    fn roles() -> &'static [EnhancedRole] {
        &EnhancedRole::ALL
    }

    fn features() -> &'static [EnhancedFeature] {
        &EnhancedFeature::ALL
    }

    fn parse_role(s: &str) -> Option<EnhancedRole> {
        EnhancedRole::parse(s)
    }

    fn parse_feature(s: &str) -> Option<EnhancedFeature> {
        EnhancedFeature::parse(s)
    }

    fn role_str(role: EnhancedRole) -> &'static str {
        role.as_str()
    }

    fn feature_str(feature: EnhancedFeature) -> &'static str {
        feature.as_str()
    }

    fn contained_roles(role: EnhancedRole) -> &'static [EnhancedRole] {
        role.contained_roles()
    }

    fn allowed_roles(feature: EnhancedFeature) -> &'static [EnhancedRole] {
        feature.allowed_roles()
    }

    fn is_destructive(feature: EnhancedFeature) -> bool {
        feature.action().is_destructive()
    }

    fn has_role(user_role: Option<EnhancedRole>, required_role: EnhancedRole) -> bool {
        enhanced::has_role(user_role, required_role)
    }

    fn has_feature_access(user_role: Option<EnhancedRole>, feature: EnhancedFeature) -> bool {
        enhanced::has_feature_access(user_role, feature)
    }

    fn role_permissions(user_role: Option<EnhancedRole>) -> Vec<EnhancedFeature> {
        enhanced::role_permissions(user_role)
    }
}
