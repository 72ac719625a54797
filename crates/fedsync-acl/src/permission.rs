//! Grantable permissions and deterministic authorization addressing

use oxrdf::NamedNodeRef;

use crate::vocab;

/// Permissions that can be granted via an authorization
///
/// "Append" is accepted at the builder surface but folds into `Write`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Permission {
    /// Read the resource
    Read,
    /// Modify the resource (implies read)
    Write,
}

/// All permissions, in reconciliation order
pub const PERMISSIONS: &[Permission] = &[Permission::Read, Permission::Write];

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Read => "Read",
            Permission::Write => "Write",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Read" => Some(Permission::Read),
            "Write" => Some(Permission::Write),
            _ => None,
        }
    }

    /// Mode IRIs an authorization for this permission carries
    ///
    /// Write grants read as well, so its authorization lists both modes.
    pub fn modes(&self) -> &'static [NamedNodeRef<'static>] {
        match self {
            Permission::Read => &[vocab::READ],
            Permission::Write => &[vocab::READ, vocab::WRITE],
        }
    }
}

/// Deterministic address of the per-permission authorization child
///
/// Computed, never looked up, so it cannot go stale.
pub fn authorization_uri(acl_uri: &str, permission: Permission) -> String {
    if acl_uri.ends_with('/') {
        format!("{acl_uri}{}", permission.as_str())
    } else {
        format!("{acl_uri}/{}", permission.as_str())
    }
}
