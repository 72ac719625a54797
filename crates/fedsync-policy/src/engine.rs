//! Lifecycle-driven permission policy

use fedsync_acl::AclManager;
use fedsync_repo::{Prefer, ResourceUri};

use crate::config::RoleConfig;
use crate::error::PolicyResult;
use crate::submission::Submission;

/// Computes desired grants from business-object state and applies them
///
/// Stateless apart from its configuration; concurrent updates of distinct
/// resources are safe, but updates of the same resource must be serialized
/// by the caller (typically via per-resource message ordering).
pub struct PolicyEngine {
    manager: AclManager,
    roles: RoleConfig,
}

impl PolicyEngine {
    pub fn new(manager: AclManager, roles: RoleConfig) -> Self {
        Self { manager, roles }
    }

    /// Re-derive and apply a submission's grants from its current state
    ///
    /// Backend always gets Read+Write; admin and the submitter role always
    /// get Read. The submitting user and preparers keep Read+Write only
    /// while the submission is still open.
    pub async fn update_submission(&self, uri: &str) -> PolicyResult<ResourceUri> {
        let body = self
            .manager
            .driver()
            .repository()
            .get(uri, &Prefer::minimal())
            .await?;
        let submission = Submission::parse(uri, &body)?;

        let mut builder = self
            .manager
            .set_permissions(uri)
            .grant_write(self.roles.backend.iter().cloned())
            .grant_read(self.roles.admin.iter().cloned())
            .grant_read(self.roles.submitter.iter().cloned());

        if submission.is_frozen() {
            tracing::info!("Submission {} is frozen, withholding depositor write", uri);
        } else {
            builder = builder
                .grant_write(submission.submitter.iter().cloned())
                .grant_write(submission.preparers.iter().cloned());
        }

        Ok(builder.perform().await?)
    }

    /// Events are immutable records: Read only, no write grant ever
    pub async fn update_submission_event(&self, uri: &str) -> PolicyResult<ResourceUri> {
        let readers = [&self.roles.backend, &self.roles.admin, &self.roles.submitter];

        Ok(self
            .manager
            .set_permissions(uri)
            .grant_read(readers.into_iter().flatten().cloned())
            .perform()
            .await?)
    }
}
