//! Declarative permission reconciliation

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use fedsync_repo::{Prefer, Repository, ResourceUri};

use crate::driver::AclDriver;
use crate::error::AclResult;
use crate::permission::{PERMISSIONS, Permission, authorization_uri};
use crate::reader::AclGraph;

/// How `perform` reconciles desired grants with repository state
///
/// The two strategies have different failure and idempotence properties,
/// so they are separate entry points rather than a flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Merge into existing authorizations, leave unrelated grants alone
    Additive,
    /// Declare the complete state, prune everything outside it
    Resync,
}

/// Entry point for permission reconciliation on protected resources
pub struct AclManager {
    driver: AclDriver,
}

impl AclManager {
    pub fn new(repo: Arc<dyn Repository>, acl_base: impl Into<ResourceUri>) -> Self {
        Self {
            driver: AclDriver::new(repo, acl_base),
        }
    }

    pub fn driver(&self) -> &AclDriver {
        &self.driver
    }

    /// Merge new grants into the resource's existing authorizations
    pub fn add_permissions(&self, resource: &str) -> PermissionBuilder<'_> {
        PermissionBuilder::new(&self.driver, resource, Mode::Additive)
    }

    /// Declare the resource's complete grant set, revoking everything else
    pub fn set_permissions(&self, resource: &str) -> PermissionBuilder<'_> {
        PermissionBuilder::new(&self.driver, resource, Mode::Resync)
    }

    /// Current permissions of `role` on `resource`
    ///
    /// Read-only: a resource without an ACL simply has no grants.
    pub async fn permissions(&self, resource: &str, role: &str) -> AclResult<HashSet<Permission>> {
        let Some(acl) = self.driver.find_acl(resource).await? else {
            return Ok(HashSet::new());
        };

        let body = self
            .driver
            .repository()
            .get(&acl, &Prefer::with_embedded())
            .await?;
        AclGraph::parse(&body)?.permissions_for_role(role)
    }
}

/// Accumulates desired grants for one resource, then reconciles once
///
/// Consumed by [`PermissionBuilder::perform`]; the repository is the only
/// durable state, so the accumulator is never persisted. Concurrent
/// reconciliation of the same resource is not coordinated here; callers
/// serialize updates per resource URI.
pub struct PermissionBuilder<'a> {
    driver: &'a AclDriver,
    resource: String,
    mode: Mode,
    read: BTreeSet<String>,
    write: BTreeSet<String>,
}

impl<'a> PermissionBuilder<'a> {
    fn new(driver: &'a AclDriver, resource: &str, mode: Mode) -> Self {
        Self {
            driver,
            resource: resource.to_string(),
            mode,
            read: BTreeSet::new(),
            write: BTreeSet::new(),
        }
    }

    /// Grant read access to the given roles
    pub fn grant_read<I, R>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        self.read.extend(roles.into_iter().map(Into::into));
        self
    }

    /// Grant write access to the given roles (write implies read)
    pub fn grant_write<I, R>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        for role in roles {
            let role = role.into();
            self.read.insert(role.clone());
            self.write.insert(role);
        }
        self
    }

    /// Grant append access; folds into write (and, transitively, read)
    pub fn grant_append<I, R>(self, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        self.grant_write(roles)
    }

    /// Agents the authorization for `permission` should name
    ///
    /// A role in the write set never reappears in the read authorization;
    /// its write authorization already carries the read mode.
    fn resolved(&self, permission: Permission) -> BTreeSet<String> {
        match permission {
            Permission::Write => self.write.clone(),
            Permission::Read => self.read.difference(&self.write).cloned().collect(),
        }
    }

    /// Apply the accumulated grants; returns the ACL's URI
    ///
    /// A mid-sequence failure aborts without rollback; re-running the same
    /// reconciliation converges, every step being idempotent.
    pub async fn perform(self) -> AclResult<ResourceUri> {
        let (acl, is_new) = self.driver.find_or_create_acl(&self.resource).await?;

        match self.mode {
            Mode::Additive => {
                for &permission in PERMISSIONS {
                    let roles = self.resolved(permission);
                    if roles.is_empty() {
                        continue;
                    }

                    let uri = authorization_uri(&acl, permission);
                    if self.driver.exists(&uri).await? {
                        self.driver
                            .patch_authorization(&acl, &self.resource, permission, &roles)
                            .await?;
                    } else {
                        self.driver
                            .put_authorization(&acl, &self.resource, permission, &roles)
                            .await?;
                    }
                }

                if is_new {
                    self.driver.link_acl(&acl, &self.resource).await?;
                }
            }
            Mode::Resync => {
                // Every permission is written, empty sets included, so stale
                // agents are revoked by the overwrite.
                for &permission in PERMISSIONS {
                    self.driver
                        .put_authorization(&acl, &self.resource, permission, &self.resolved(permission))
                        .await?;
                }

                if is_new {
                    self.driver.link_acl(&acl, &self.resource).await?;
                }

                let canonical: Vec<ResourceUri> = PERMISSIONS
                    .iter()
                    .map(|&p| authorization_uri(&acl, p))
                    .collect();
                for child in self.driver.children(&acl).await? {
                    if !canonical.contains(&child) {
                        tracing::info!("Pruning stale authorization {}", child);
                        self.driver.delete_completely(&child).await?;
                    }
                }
            }
        }

        Ok(acl)
    }
}
