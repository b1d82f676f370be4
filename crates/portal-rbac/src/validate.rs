//! # Table validation
//!
//! Startup checks for a scheme's hierarchy and permission table. Role and
//! feature totality is already enforced by exhaustive matches; these checks
//! cover the properties the compiler cannot see.

use std::collections::HashSet;
use thiserror::Error;

use crate::scheme::{RoleScheme, SchemeKind};

/// A defect in a scheme's static tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A role's hierarchy set does not contain the role itself.
    #[error("{scheme}: role '{role}' does not contain itself")]
    NotReflexive {
        /// Scheme name.
        scheme: &'static str,
        /// Offending role.
        role: &'static str,
    },

    /// `outer` contains `middle` and `middle` contains `inner`, but `outer` misses `inner`.
    #[error("{scheme}: '{outer}' contains '{middle}' which contains '{inner}', but '{outer}' does not")]
    NotTransitive {
        /// Scheme name.
        scheme: &'static str,
        /// Senior role.
        outer: &'static str,
        /// Intermediate role.
        middle: &'static str,
        /// Junior role missing from the senior's set.
        inner: &'static str,
    },

    /// A role or feature is listed twice in one set.
    #[error("{scheme}: '{entry}' is listed more than once in {table}")]
    Duplicate {
        /// Scheme name.
        scheme: &'static str,
        /// Which list holds the duplicate.
        table: String,
        /// Duplicated entry.
        entry: &'static str,
    },

    /// A canonical string does not parse back to the same value.
    #[error("{scheme}: '{key}' does not parse back to itself")]
    RoundTrip {
        /// Scheme name.
        scheme: &'static str,
        /// The canonical string.
        key: &'static str,
    },

    /// A feature that no role is allowed to use.
    #[error("{scheme}: feature '{feature}' grants no role")]
    Unreachable {
        /// Scheme name.
        scheme: &'static str,
        /// The feature key.
        feature: &'static str,
    },

    /// `senior` contains `junior` but is not granted a feature `junior` has.
    #[error("{scheme}: '{senior}' contains '{junior}' but is not granted '{feature}'")]
    NotInherited {
        /// Scheme name.
        scheme: &'static str,
        /// Role whose hierarchy set contains `junior`.
        senior: &'static str,
        /// Contained role.
        junior: &'static str,
        /// Feature granted to `junior` only.
        feature: &'static str,
    },
}

/// Check every table invariant of scheme `S`.
///
/// Returns the first defect found.
///
/// # Example
///
/// ```
/// use portal_rbac::scheme::{Enhanced, Legacy};
/// use portal_rbac::validate::validate_scheme;
///
/// validate_scheme::<Legacy>().unwrap();
/// validate_scheme::<Enhanced>().unwrap();
/// ```
pub fn validate_scheme<S: RoleScheme>() -> Result<(), TableError> {
    let scheme = S::KIND.as_str();

    let result = check_roles::<S>(scheme)
        .and_then(|_| check_hierarchy::<S>(scheme))
        .and_then(|_| check_features::<S>(scheme))
        .and_then(|_| check_inheritance::<S>(scheme));

    match &result {
        Ok(()) => tracing::debug!(
            scheme,
            roles = S::roles().len(),
            features = S::features().len(),
            "Role tables validated"
        ),
        Err(e) => tracing::error!(scheme, error = %e, "Role table validation failed"),
    }

    result
}

/// Validate the tables of the scheme named by `kind`.
pub fn validate_kind(kind: SchemeKind) -> Result<(), TableError> {
    match kind {
        SchemeKind::Legacy => validate_scheme::<crate::scheme::Legacy>(),
        SchemeKind::Enhanced => validate_scheme::<crate::scheme::Enhanced>(),
    }
}

fn check_roles<S: RoleScheme>(scheme: &'static str) -> Result<(), TableError> {
    ensure_unique::<S::Role>(scheme, "role list", S::roles(), S::role_str)?;

    for &role in S::roles() {
        let key = S::role_str(role);
        if S::parse_role(key) != Some(role) {
            return Err(TableError::RoundTrip { scheme, key });
        }
    }

    Ok(())
}

fn check_hierarchy<S: RoleScheme>(scheme: &'static str) -> Result<(), TableError> {
    for &role in S::roles() {
        let contained = S::contained_roles(role);
        let table = format!("hierarchy of '{}'", S::role_str(role));
        ensure_unique::<S::Role>(scheme, &table, contained, S::role_str)?;

        if !contained.contains(&role) {
            return Err(TableError::NotReflexive {
                scheme,
                role: S::role_str(role),
            });
        }
    }

    for &outer in S::roles() {
        for &middle in S::contained_roles(outer) {
            for &inner in S::contained_roles(middle) {
                if !S::contained_roles(outer).contains(&inner) {
                    return Err(TableError::NotTransitive {
                        scheme,
                        outer: S::role_str(outer),
                        middle: S::role_str(middle),
                        inner: S::role_str(inner),
                    });
                }
            }
        }
    }

    Ok(())
}

fn check_features<S: RoleScheme>(scheme: &'static str) -> Result<(), TableError> {
    ensure_unique::<S::Feature>(scheme, "feature list", S::features(), S::feature_str)?;

    for &feature in S::features() {
        let key = S::feature_str(feature);
        if S::parse_feature(key) != Some(feature) {
            return Err(TableError::RoundTrip { scheme, key });
        }

        let allowed = S::allowed_roles(feature);
        if allowed.is_empty() {
            return Err(TableError::Unreachable {
                scheme,
                feature: key,
            });
        }
        let table = format!("permission entry '{key}'");
        ensure_unique::<S::Role>(scheme, &table, allowed, S::role_str)?;
    }

    Ok(())
}

fn check_inheritance<S: RoleScheme>(scheme: &'static str) -> Result<(), TableError> {
    for &senior in S::roles() {
        for &junior in S::contained_roles(senior) {
            for &feature in S::features() {
                let allowed = S::allowed_roles(feature);
                if allowed.contains(&junior) && !allowed.contains(&senior) {
                    return Err(TableError::NotInherited {
                        scheme,
                        senior: S::role_str(senior),
                        junior: S::role_str(junior),
                        feature: S::feature_str(feature),
                    });
                }
            }
        }
    }

    Ok(())
}

fn ensure_unique<T>(
    scheme: &'static str,
    table: &str,
    entries: &[T],
    name: fn(T) -> &'static str,
) -> Result<(), TableError>
where
    T: Copy + Eq + std::hash::Hash,
{
    let mut seen = HashSet::with_capacity(entries.len());
    for &entry in entries {
        if !seen.insert(entry) {
            return Err(TableError::Duplicate {
                scheme,
                table: table.to_string(),
                entry: name(entry),
            });
        }
    }
    Ok(())
}
