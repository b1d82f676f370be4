//! Enhanced role scheme
//!
//! The five-tier scheme that splits the legacy moderator tier into a
//! `read-only` auditor role and a `support-admin` role that works the ticket
//! queue. This is the scheme new portal pages are written against.
//!
//! ```text
//! super-admin
//!   └─ admin
//!        ├─ support-admin
//!        │    └─ read-only
//!        └─ user
//! ```
//!
//! `read-only` deliberately does not contain `user`: auditors can look at the
//! queue but cannot raise tickets of their own.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::actions::Action;
use crate::resources::Resource;

/// User role in the enhanced scheme.
///
/// # Examples
///
/// ```
/// use portal_rbac::enhanced::{self, EnhancedFeature, EnhancedRole};
///
/// assert!(enhanced::has_feature_access(Some(EnhancedRole::SupportAdmin), EnhancedFeature::TicketEdit));
/// assert!(!enhanced::has_feature_access(Some(EnhancedRole::ReadOnly), EnhancedFeature::TicketEdit));
/// assert!(enhanced::has_feature_access(Some(EnhancedRole::ReadOnly), EnhancedFeature::TicketView));
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum EnhancedRole {
    /// Regular portal user
    User,

    /// View-only access to operational pages
    ReadOnly,

    /// Works the support queue
    SupportAdmin,

    /// Manages users, content and operations
    Admin,

    /// Unrestricted access
    SuperAdmin,
}

impl EnhancedRole {
    /// Every enhanced role, lowest tier first.
    pub const ALL: [EnhancedRole; 5] = [
        EnhancedRole::User,
        EnhancedRole::ReadOnly,
        EnhancedRole::SupportAdmin,
        EnhancedRole::Admin,
        EnhancedRole::SuperAdmin,
    ];

    /// Parse role from string representation.
    ///
    /// Matching is case-insensitive. Unknown strings yield `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use portal_rbac::enhanced::EnhancedRole;
    ///
    /// assert_eq!(EnhancedRole::parse("support-admin"), Some(EnhancedRole::SupportAdmin));
    /// assert_eq!(EnhancedRole::parse("Read-Only"), Some(EnhancedRole::ReadOnly));
    /// assert_eq!(EnhancedRole::parse("moderator"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" => Some(Self::User),
            "read-only" => Some(Self::ReadOnly),
            "support-admin" => Some(Self::SupportAdmin),
            "admin" => Some(Self::Admin),
            "super-admin" => Some(Self::SuperAdmin),
            _ => None,
        }
    }

    /// Get string representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::ReadOnly => "read-only",
            Self::SupportAdmin => "support-admin",
            Self::Admin => "admin",
            Self::SuperAdmin => "super-admin",
        }
    }

    /// Get a human-readable display name for the role.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::ReadOnly => "Read Only",
            Self::SupportAdmin => "Support Admin",
            Self::Admin => "Admin",
            Self::SuperAdmin => "Super Admin",
        }
    }

    /// One-line description shown next to the role in role pickers.
    pub fn description(&self) -> &'static str {
        match self {
            Self::User => "Standard portal user who can raise and follow their own tickets",
            Self::ReadOnly => {
                "Can view tickets, users, calendar and analytics without making changes"
            }
            Self::SupportAdmin => "Handles the support queue: edits, assigns and documents tickets",
            Self::Admin => "Manages users, content and portal operations",
            Self::SuperAdmin => "Full access including role management, settings and audit logs",
        }
    }

    /// Roles this role contains: itself plus every role it is senior to.
    pub fn contained_roles(&self) -> &'static [EnhancedRole] {
        use EnhancedRole::{Admin, ReadOnly, SuperAdmin, SupportAdmin, User};

        match self {
            User => &[User],
            ReadOnly => &[ReadOnly],
            SupportAdmin => &[SupportAdmin, ReadOnly],
            Admin => &[Admin, SupportAdmin, ReadOnly, User],
            SuperAdmin => &[SuperAdmin, Admin, SupportAdmin, ReadOnly, User],
        }
    }
}

impl fmt::Display for EnhancedRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Feature permission keys of the enhanced scheme.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EnhancedFeature {
    #[serde(rename = "user:view")]
    UserView,
    #[serde(rename = "user:create")]
    UserCreate,
    #[serde(rename = "user:edit")]
    UserEdit,
    #[serde(rename = "user:delete")]
    UserDelete,
    #[serde(rename = "user:manage-roles")]
    UserManageRoles,
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
    #[serde(rename = "ticket:export")]
    TicketExport,
    #[serde(rename = "document:view")]
    DocumentView,
    #[serde(rename = "document:upload")]
    DocumentUpload,
    #[serde(rename = "document:delete")]
    DocumentDelete,
    #[serde(rename = "calendar:view")]
    CalendarView,
    #[serde(rename = "calendar:edit")]
    CalendarEdit,
    #[serde(rename = "analytics:view")]
    AnalyticsView,
    #[serde(rename = "analytics:export")]
    AnalyticsExport,
    #[serde(rename = "knowledge-base:view")]
    KnowledgeBaseView,
    #[serde(rename = "knowledge-base:edit")]
    KnowledgeBaseEdit,
    #[serde(rename = "knowledge-base:publish")]
    KnowledgeBasePublish,
    #[serde(rename = "settings:view")]
    SettingsView,
    #[serde(rename = "settings:edit")]
    SettingsEdit,
    #[serde(rename = "audit-log:view")]
    AuditLogView,
}

impl EnhancedFeature {
    /// Every enhanced feature in permission-table order.
    pub const ALL: [EnhancedFeature; 24] = [
        EnhancedFeature::UserView,
        EnhancedFeature::UserCreate,
        EnhancedFeature::UserEdit,
        EnhancedFeature::UserDelete,
        EnhancedFeature::UserManageRoles,
        EnhancedFeature::TicketView,
        EnhancedFeature::TicketCreate,
        EnhancedFeature::TicketEdit,
        EnhancedFeature::TicketAssign,
        EnhancedFeature::TicketDelete,
        EnhancedFeature::TicketExport,
        EnhancedFeature::DocumentView,
        EnhancedFeature::DocumentUpload,
        EnhancedFeature::DocumentDelete,
        EnhancedFeature::CalendarView,
        EnhancedFeature::CalendarEdit,
        EnhancedFeature::AnalyticsView,
        EnhancedFeature::AnalyticsExport,
        EnhancedFeature::KnowledgeBaseView,
        EnhancedFeature::KnowledgeBaseEdit,
        EnhancedFeature::KnowledgeBasePublish,
        EnhancedFeature::SettingsView,
        EnhancedFeature::SettingsEdit,
        EnhancedFeature::AuditLogView,
    ];

    /// The feature key, e.g. `"knowledge-base:publish"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserView => "user:view",
            Self::UserCreate => "user:create",
            Self::UserEdit => "user:edit",
            Self::UserDelete => "user:delete",
            Self::UserManageRoles => "user:manage-roles",
            Self::TicketView => "ticket:view",
            Self::TicketCreate => "ticket:create",
            Self::TicketEdit => "ticket:edit",
            Self::TicketAssign => "ticket:assign",
            Self::TicketDelete => "ticket:delete",
            Self::TicketExport => "ticket:export",
            Self::DocumentView => "document:view",
            Self::DocumentUpload => "document:upload",
            Self::DocumentDelete => "document:delete",
            Self::CalendarView => "calendar:view",
            Self::CalendarEdit => "calendar:edit",
            Self::AnalyticsView => "analytics:view",
            Self::AnalyticsExport => "analytics:export",
            Self::KnowledgeBaseView => "knowledge-base:view",
            Self::KnowledgeBaseEdit => "knowledge-base:edit",
            Self::KnowledgeBasePublish => "knowledge-base:publish",
            Self::SettingsView => "settings:view",
            Self::SettingsEdit => "settings:edit",
            Self::AuditLogView => "audit-log:view",
        }
    }

    /// The resource this feature guards.
    pub fn resource(&self) -> Resource {
        match self {
            Self::UserView
            | Self::UserCreate
            | Self::UserEdit
            | Self::UserDelete
            | Self::UserManageRoles => Resource::User,
            Self::TicketView
            | Self::TicketCreate
            | Self::TicketEdit
            | Self::TicketAssign
            | Self::TicketDelete
            | Self::TicketExport => Resource::Ticket,
            Self::DocumentView | Self::DocumentUpload | Self::DocumentDelete => {
                Resource::Document
            }
            Self::CalendarView | Self::CalendarEdit => Resource::Calendar,
            Self::AnalyticsView | Self::AnalyticsExport => Resource::Analytics,
            Self::KnowledgeBaseView | Self::KnowledgeBaseEdit | Self::KnowledgeBasePublish => {
                Resource::KnowledgeBase
            }
            Self::SettingsView | Self::SettingsEdit => Resource::Settings,
            Self::AuditLogView => Resource::AuditLog,
        }
    }

    /// The action this feature grants.
    pub fn action(&self) -> Action {
        match self {
            Self::UserView
            | Self::TicketView
            | Self::DocumentView
            | Self::CalendarView
            | Self::AnalyticsView
            | Self::KnowledgeBaseView
            | Self::SettingsView
            | Self::AuditLogView => Action::View,
            Self::UserCreate | Self::TicketCreate => Action::Create,
            Self::UserEdit
            | Self::TicketEdit
            | Self::CalendarEdit
            | Self::KnowledgeBaseEdit
            | Self::SettingsEdit => Action::Edit,
            Self::UserDelete | Self::TicketDelete | Self::DocumentDelete => Action::Delete,
            Self::UserManageRoles => Action::ManageRoles,
            Self::TicketAssign => Action::Assign,
            Self::TicketExport | Self::AnalyticsExport => Action::Export,
            Self::DocumentUpload => Action::Upload,
            Self::KnowledgeBasePublish => Action::Publish,
        }
    }

    /// Look up the feature for a resource/action pair.
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
    /// use portal_rbac::enhanced::EnhancedFeature;
    ///
    /// assert_eq!(EnhancedFeature::parse("ticket:edit"), Some(EnhancedFeature::TicketEdit));
    /// assert_eq!(EnhancedFeature::parse("ticket:publish"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let (resource, action) = s.split_once(':')?;
        Self::from_parts(Resource::parse(resource)?, Action::parse(action)?)
    }

    /// Roles granted this feature. Any role not listed is denied.
    pub fn allowed_roles(&self) -> &'static [EnhancedRole] {
        use EnhancedRole::{Admin, ReadOnly, SuperAdmin, SupportAdmin, User};

        match self {
            Self::UserView => &[ReadOnly, SupportAdmin, Admin, SuperAdmin],
            Self::UserCreate => &[Admin, SuperAdmin],
            Self::UserEdit => &[Admin, SuperAdmin],
            Self::UserDelete => &[SuperAdmin],
            Self::UserManageRoles => &[SuperAdmin],
            Self::TicketView => &[User, ReadOnly, SupportAdmin, Admin, SuperAdmin],
            Self::TicketCreate => &[User, SupportAdmin, Admin, SuperAdmin],
            Self::TicketEdit => &[SupportAdmin, Admin, SuperAdmin],
            Self::TicketAssign => &[SupportAdmin, Admin, SuperAdmin],
            Self::TicketDelete => &[Admin, SuperAdmin],
            Self::TicketExport => &[Admin, SuperAdmin],
            Self::DocumentView => &[User, ReadOnly, SupportAdmin, Admin, SuperAdmin],
            Self::DocumentUpload => &[SupportAdmin, Admin, SuperAdmin],
            Self::DocumentDelete => &[Admin, SuperAdmin],
            Self::CalendarView => &[ReadOnly, SupportAdmin, Admin, SuperAdmin],
            Self::CalendarEdit => &[SupportAdmin, Admin, SuperAdmin],
            Self::AnalyticsView => &[ReadOnly, SupportAdmin, Admin, SuperAdmin],
            Self::AnalyticsExport => &[Admin, SuperAdmin],
            Self::KnowledgeBaseView => &[User, ReadOnly, SupportAdmin, Admin, SuperAdmin],
            Self::KnowledgeBaseEdit => &[SupportAdmin, Admin, SuperAdmin],
            Self::KnowledgeBasePublish => &[Admin, SuperAdmin],
            Self::SettingsView => &[Admin, SuperAdmin],
            Self::SettingsEdit => &[SuperAdmin],
            Self::AuditLogView => &[SuperAdmin],
        }
    }
}

impl fmt::Display for EnhancedFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check whether `user_role` contains `required_role` in the hierarchy.
pub fn has_role(user_role: Option<EnhancedRole>, required_role: EnhancedRole) -> bool {
    match user_role {
        Some(role) => role.contained_roles().contains(&required_role),
        None => false,
    }
}

/// Check whether `user_role` is listed for `feature` in the permission table.
pub fn has_feature_access(user_role: Option<EnhancedRole>, feature: EnhancedFeature) -> bool {
    match user_role {
        Some(role) => feature.allowed_roles().contains(&role),
        None => false,
    }
}

/// Every feature granted to `user_role`, in permission-table order.
pub fn role_permissions(user_role: Option<EnhancedRole>) -> Vec<EnhancedFeature> {
    let Some(role) = user_role else {
        return Vec::new();
    };

    EnhancedFeature::ALL
        .into_iter()
        .filter(|feature| feature.allowed_roles().contains(&role))
        .collect()
}

/// Display name of `role`.
pub fn role_display_name(role: EnhancedRole) -> &'static str {
    role.display_name()
}

/// Description of `role`.
pub fn role_description(role: EnhancedRole) -> &'static str {
    role.description()
}

/// Everything the role-management page shows about a role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleInfo {
    /// The role itself
    pub role: EnhancedRole,

    /// Human-readable name
    pub display_name: String,

    /// One-line description
    pub description: String,

    /// Granted features in permission-table order
    pub permissions: Vec<EnhancedFeature>,
}

/// Build the [`RoleInfo`] for `role`.
///
/// # Examples
///
/// ```
/// use portal_rbac::enhanced::{self, EnhancedFeature, EnhancedRole};
///
/// let info = enhanced::role_info(EnhancedRole::ReadOnly);
/// assert_eq!(info.display_name, "Read Only");
/// assert!(info.permissions.contains(&EnhancedFeature::TicketView));
/// assert!(!info.permissions.contains(&EnhancedFeature::TicketEdit));
/// ```
pub fn role_info(role: EnhancedRole) -> RoleInfo {
    RoleInfo {
        role,
        display_name: role.display_name().to_string(),
        description: role.description().to_string(),
        permissions: role_permissions(Some(role)),
    }
}

/// [`RoleInfo`] for every enhanced role, lowest tier first.
pub fn all_role_info() -> Vec<RoleInfo> {
    EnhancedRole::ALL.into_iter().map(role_info).collect()
}
