//! # Actions
//!
//! Defines the operations a feature permission grants on a resource.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Actions that can be performed on portal resources.
///
/// - **View**: open the resource's pages
/// - **Create**: create new records
/// - **Edit**: modify existing records
/// - **Delete**: permanently remove records
/// - **Assign**: hand a record to another user
/// - **Upload**: attach files
/// - **Export**: download data out of the portal
/// - **Publish**: make drafted content visible to everyone
/// - **ManageRoles**: change which role a user holds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// View/open the resource.
    View,

    /// Create new resource records.
    Create,

    /// Modify existing records.
    Edit,

    /// Permanently remove records.
    Delete,

    /// Assign a record to another user.
    ///
    /// Used for routing tickets through the support queue.
    Assign,

    /// Upload files.
    Upload,

    /// Export data (CSV downloads and similar).
    Export,

    /// Publish drafted content.
    Publish,

    /// Change user role assignments.
    ManageRoles,
}

impl Action {
    /// Every action, in declaration order.
    pub const ALL: [Action; 9] = [
        Action::View,
        Action::Create,
        Action::Edit,
        Action::Delete,
        Action::Assign,
        Action::Upload,
        Action::Export,
        Action::Publish,
        Action::ManageRoles,
    ];

    /// Get the string representation used in feature keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Delete => "delete",
            Action::Assign => "assign",
            Action::Upload => "upload",
            Action::Export => "export",
            Action::Publish => "publish",
            Action::ManageRoles => "manage-roles",
        }
    }

    /// Parse an action from its feature-key segment.
    ///
    /// Matching is case-insensitive but otherwise exact: aliases are not
    /// accepted, so a misspelled key can never resolve to a different grant.
    ///
    /// # Example
    ///
    /// ```
    /// use portal_rbac::actions::Action;
    ///
    /// assert_eq!(Action::parse("edit"), Some(Action::Edit));
    /// assert_eq!(Action::parse("MANAGE-ROLES"), Some(Action::ManageRoles));
    /// assert_eq!(Action::parse("update"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "view" => Some(Action::View),
            "create" => Some(Action::Create),
            "edit" => Some(Action::Edit),
            "delete" => Some(Action::Delete),
            "assign" => Some(Action::Assign),
            "upload" => Some(Action::Upload),
            "export" => Some(Action::Export),
            "publish" => Some(Action::Publish),
            "manage-roles" => Some(Action::ManageRoles),
            _ => None,
        }
    }

    /// Check if this is a destructive action.
    ///
    /// Destructive actions permanently remove data or change who can access it.
    pub fn is_destructive(&self) -> bool {
        matches!(self, Action::Delete | Action::ManageRoles)
    }

    /// Check if this is a read-only action.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Action::View | Action::Export)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
