//! Legacy role scheme
//!
//! The original four-tier scheme: `user < moderator < admin < super-admin`.
//! Its hierarchy and permission table are kept separate from the enhanced
//! scheme; the two role sets do not map onto each other.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::actions::Action;
use crate::resources::Resource;

/// User role in the legacy scheme.
///
/// # Examples
///
/// ```
/// use portal_rbac::legacy::{self, LegacyRole};
///
/// assert!(legacy::has_role(Some(LegacyRole::Admin), LegacyRole::Moderator));
/// assert!(!legacy::has_role(Some(LegacyRole::Moderator), LegacyRole::Admin));
/// assert!(!legacy::has_role(None, LegacyRole::User));
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum LegacyRole {
    /// Regular portal user
    User,

    /// Can triage tickets and moderate content
    Moderator,

    /// Can manage portal operations
    Admin,

    /// Unrestricted access
    SuperAdmin,
}

impl LegacyRole {
    /// Every legacy role, lowest tier first.
    pub const ALL: [LegacyRole; 4] = [
        LegacyRole::User,
        LegacyRole::Moderator,
        LegacyRole::Admin,
        LegacyRole::SuperAdmin,
    ];

    /// Parse role from string representation.
    ///
    /// Matching is case-insensitive. Unknown strings yield `None`, which
    /// callers treat the same as having no role.
    ///
    /// # Examples
    ///
    /// ```
    /// use portal_rbac::legacy::LegacyRole;
    ///
    /// assert_eq!(LegacyRole::parse("super-admin"), Some(LegacyRole::SuperAdmin));
    /// assert_eq!(LegacyRole::parse("MODERATOR"), Some(LegacyRole::Moderator));
    /// assert_eq!(LegacyRole::parse("support-admin"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" => Some(Self::User),
            "moderator" => Some(Self::Moderator),
            "admin" => Some(Self::Admin),
            "super-admin" => Some(Self::SuperAdmin),
            _ => None,
        }
    }

    /// Get string representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Moderator => "moderator",
            Self::Admin => "admin",
            Self::SuperAdmin => "super-admin",
        }
    }

    /// Roles this role contains: itself plus every role it is senior to.
    ///
    /// The lists are enumerated by hand and are the source of truth for
    /// [`has_role`]; they are not derived from tier order.
    pub fn contained_roles(&self) -> &'static [LegacyRole] {
        use LegacyRole::{Admin, Moderator, SuperAdmin, User};

        match self {
            User => &[User],
            Moderator => &[Moderator, User],
            Admin => &[Admin, Moderator, User],
            SuperAdmin => &[SuperAdmin, Admin, Moderator, User],
        }
    }
}

impl fmt::Display for LegacyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Feature permission keys of the legacy scheme.
///
/// Serialized as `resource:action` strings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum LegacyFeature {
    #[serde(rename = "user:view")]
    UserView,
    #[serde(rename = "user:edit")]
    UserEdit,
    #[serde(rename = "user:delete")]
    UserDelete,
    #[serde(rename = "ticket:view")]
    TicketView,
    #[serde(rename = "ticket:create")]
    TicketCreate,
    #[serde(rename = "ticket:edit")]
    TicketEdit,
    #[serde(rename = "ticket:assign")]
    TicketAssign,
    #[serde(rename = "ticket:delete")]
    TicketDelete,
    #[serde(rename = "document:view")]
    DocumentView,
    #[serde(rename = "document:upload")]
    DocumentUpload,
    #[serde(rename = "document:delete")]
    DocumentDelete,
    #[serde(rename = "analytics:view")]
    AnalyticsView,
    #[serde(rename = "settings:edit")]
    SettingsEdit,
}

impl LegacyFeature {
    /// Every legacy feature in permission-table order.
    pub const ALL: [LegacyFeature; 13] = [
        LegacyFeature::UserView,
        LegacyFeature::UserEdit,
        LegacyFeature::UserDelete,
        LegacyFeature::TicketView,
        LegacyFeature::TicketCreate,
        LegacyFeature::TicketEdit,
        LegacyFeature::TicketAssign,
        LegacyFeature::TicketDelete,
        LegacyFeature::DocumentView,
        LegacyFeature::DocumentUpload,
        LegacyFeature::DocumentDelete,
        LegacyFeature::AnalyticsView,
        LegacyFeature::SettingsEdit,
    ];

    /// The feature key, e.g. `"ticket:edit"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserView => "user:view",
            Self::UserEdit => "user:edit",
            Self::UserDelete => "user:delete",
            Self::TicketView => "ticket:view",
            Self::TicketCreate => "ticket:create",
            Self::TicketEdit => "ticket:edit",
            Self::TicketAssign => "ticket:assign",
            Self::TicketDelete => "ticket:delete",
            Self::DocumentView => "document:view",
            Self::DocumentUpload => "document:upload",
            Self::DocumentDelete => "document:delete",
            Self::AnalyticsView => "analytics:view",
            Self::SettingsEdit => "settings:edit",
        }
    }

    /// The resource this feature guards.
    pub fn resource(&self) -> Resource {
        match self {
            Self::UserView | Self::UserEdit | Self::UserDelete => Resource::User,
            Self::TicketView
            | Self::TicketCreate
            | Self::TicketEdit
            | Self::TicketAssign
            | Self::TicketDelete => Resource::Ticket,
            Self::DocumentView | Self::DocumentUpload | Self::DocumentDelete => {
                Resource::Document
            }
            Self::AnalyticsView => Resource::Analytics,
            Self::SettingsEdit => Resource::Settings,
        }
    }

    /// The action this feature grants.
    pub fn action(&self) -> Action {
        match self {
            Self::UserView | Self::TicketView | Self::DocumentView | Self::AnalyticsView => {
                Action::View
            }
            Self::TicketCreate => Action::Create,
            Self::UserEdit | Self::TicketEdit | Self::SettingsEdit => Action::Edit,
            Self::UserDelete | Self::TicketDelete | Self::DocumentDelete => Action::Delete,
            Self::TicketAssign => Action::Assign,
            Self::DocumentUpload => Action::Upload,
        }
    }

    /// Look up the feature for a resource/action pair.
    ///
    /// Returns `None` when the legacy scheme has no such key.
    pub fn from_parts(resource: Resource, action: Action) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|feature| feature.resource() == resource && feature.action() == action)
    }

    /// Parse a `resource:action` key.
    ///
    /// # Examples
    ///
    /// ```
    /// use portal_rbac::legacy::LegacyFeature;
    ///
    /// assert_eq!(LegacyFeature::parse("user:delete"), Some(LegacyFeature::UserDelete));
    /// assert_eq!(LegacyFeature::parse("calendar:view"), None);
    /// assert_eq!(LegacyFeature::parse("user"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let (resource, action) = s.split_once(':')?;
        Self::from_parts(Resource::parse(resource)?, Action::parse(action)?)
    }

    /// Roles granted this feature. Any role not listed is denied.
    pub fn allowed_roles(&self) -> &'static [LegacyRole] {
        use LegacyRole::{Admin, Moderator, SuperAdmin, User};

        match self {
            Self::UserView => &[Moderator, Admin, SuperAdmin],
            Self::UserEdit => &[Admin, SuperAdmin],
            Self::UserDelete => &[SuperAdmin],
            Self::TicketView => &[User, Moderator, Admin, SuperAdmin],
            Self::TicketCreate => &[User, Moderator, Admin, SuperAdmin],
            Self::TicketEdit => &[Moderator, Admin, SuperAdmin],
            Self::TicketAssign => &[Moderator, Admin, SuperAdmin],
            Self::TicketDelete => &[Admin, SuperAdmin],
            Self::DocumentView => &[User, Moderator, Admin, SuperAdmin],
            Self::DocumentUpload => &[Moderator, Admin, SuperAdmin],
            Self::DocumentDelete => &[Admin, SuperAdmin],
            Self::AnalyticsView => &[Admin, SuperAdmin],
            Self::SettingsEdit => &[SuperAdmin],
        }
    }
}

impl fmt::Display for LegacyFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check whether `user_role` contains `required_role` in the hierarchy.
///
/// An absent role never satisfies any requirement.
pub fn has_role(user_role: Option<LegacyRole>, required_role: LegacyRole) -> bool {
    match user_role {
        Some(role) => role.contained_roles().contains(&required_role),
        None => false,
    }
}

/// Check whether `user_role` is listed for `feature` in the permission table.
///
/// # Examples
///
/// ```
/// use portal_rbac::legacy::{self, LegacyFeature, LegacyRole};
///
/// assert!(!legacy::has_feature_access(Some(LegacyRole::Admin), LegacyFeature::UserDelete));
/// assert!(legacy::has_feature_access(Some(LegacyRole::SuperAdmin), LegacyFeature::UserDelete));
/// ```
pub fn has_feature_access(user_role: Option<LegacyRole>, feature: LegacyFeature) -> bool {
    match user_role {
        Some(role) => feature.allowed_roles().contains(&role),
        None => false,
    }
}

/// Every feature granted to `user_role`, in permission-table order.
pub fn role_permissions(user_role: Option<LegacyRole>) -> Vec<LegacyFeature> {
    let Some(role) = user_role else {
        return Vec::new();
    };

    LegacyFeature::ALL
        .into_iter()
        .filter(|feature| feature.allowed_roles().contains(&role))
        .collect()
}
