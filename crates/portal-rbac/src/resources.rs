//! # Resources
//!
//! Defines the portal resources that feature permissions are scoped to.
//! Each resource backs one group of dashboard views.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Resources guarded by the portal's feature permissions.
///
/// - **User**: user directory and account management
/// - **Ticket**: the helpdesk ticket queue
/// - **Document**: shared documents and attachments
/// - **Calendar**: calendar events
/// - **Analytics**: dashboards and reports
/// - **KnowledgeBase**: knowledge-base articles
/// - **Settings**: portal configuration
/// - **AuditLog**: audit trail of administrative actions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Resource {
    /// User accounts.
    User,
    /// Helpdesk tickets.
    Ticket,
    /// Documents and attachments.
    Document,
    /// Calendar events.
    Calendar,
    /// Analytics dashboards.
    Analytics,
    /// Knowledge-base articles.
    KnowledgeBase,
    /// Portal settings.
    Settings,
    /// Audit log entries.
    AuditLog,
}

impl Resource {
    /// Every resource, in declaration order.
    pub const ALL: [Resource; 8] = [
        Resource::User,
        Resource::Ticket,
        Resource::Document,
        Resource::Calendar,
        Resource::Analytics,
        Resource::KnowledgeBase,
        Resource::Settings,
        Resource::AuditLog,
    ];

    /// Get the string representation used in feature keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::User => "user",
            Resource::Ticket => "ticket",
            Resource::Document => "document",
            Resource::Calendar => "calendar",
            Resource::Analytics => "analytics",
            Resource::KnowledgeBase => "knowledge-base",
            Resource::Settings => "settings",
            Resource::AuditLog => "audit-log",
        }
    }

    /// Parse a resource from its feature-key segment.
    ///
    /// Matching is case-insensitive. Unknown names return `None`.
    ///
    /// # Example
    ///
    /// ```
    /// use portal_rbac::resources::Resource;
    ///
    /// assert_eq!(Resource::parse("ticket"), Some(Resource::Ticket));
    /// assert_eq!(Resource::parse("Knowledge-Base"), Some(Resource::KnowledgeBase));
    /// assert_eq!(Resource::parse("invoice"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" => Some(Resource::User),
            "ticket" => Some(Resource::Ticket),
            "document" => Some(Resource::Document),
            "calendar" => Some(Resource::Calendar),
            "analytics" => Some(Resource::Analytics),
            "knowledge-base" => Some(Resource::KnowledgeBase),
            "settings" => Some(Resource::Settings),
            "audit-log" => Some(Resource::AuditLog),
            _ => None,
        }
    }

    /// Human-readable name, as shown in navigation.
    pub fn display_name(&self) -> &'static str {
        match self {
            Resource::User => "Users",
            Resource::Ticket => "Tickets",
            Resource::Document => "Documents",
            Resource::Calendar => "Calendar",
            Resource::Analytics => "Analytics",
            Resource::KnowledgeBase => "Knowledge Base",
            Resource::Settings => "Settings",
            Resource::AuditLog => "Audit Log",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
