//! Direct repository interaction for ACL maintenance

use std::collections::BTreeSet;
use std::sync::Arc;

use oxrdf::{NamedNode, TermRef};
use oxrdf::vocab::rdf;

use fedsync_repo::{Prefer, Repository, ResourceUri, tombstone_uri};

use crate::error::{AclError, AclResult};
use crate::permission::{Permission, authorization_uri};
use crate::reader::parse_graph;
use crate::vocab;

/// Owns all direct repository interaction for ACL state
///
/// New ACLs are created under `acl_base`. No retries; every failure
/// surfaces to the caller, and a partially-applied sequence is left for
/// the caller to re-run (each step is idempotent).
pub struct AclDriver {
    repo: Arc<dyn Repository>,
    acl_base: ResourceUri,
}

impl AclDriver {
    pub fn new(repo: Arc<dyn Repository>, acl_base: impl Into<ResourceUri>) -> Self {
        Self {
            repo,
            acl_base: acl_base.into(),
        }
    }

    pub fn repository(&self) -> &Arc<dyn Repository> {
        &self.repo
    }

    /// The resource's linked ACL, if it has one
    ///
    /// More than one `accessControl` link means the repository state is
    /// inconsistent; that is fatal, never repaired here.
    pub async fn find_acl(&self, resource: &str) -> AclResult<Option<ResourceUri>> {
        let body = self.repo.get(resource, &Prefer::minimal()).await?;
        let graph = parse_graph(&body)?;
        let subject = NamedNode::new(resource)?;

        let acls: Vec<ResourceUri> = graph
            .objects_for_subject_predicate(&subject, vocab::ACCESS_CONTROL)
            .filter_map(|term| match term {
                TermRef::NamedNode(n) => Some(n.as_str().to_string()),
                _ => None,
            })
            .collect();

        match acls.as_slice() {
            [] => Ok(None),
            [acl] => Ok(Some(acl.clone())),
            many => Err(AclError::MultipleAcls {
                resource: resource.to_string(),
                count: many.len(),
            }),
        }
    }

    /// Resolve the resource's ACL, creating one when absent
    ///
    /// The second element is true when the ACL was just created and still
    /// needs [`AclDriver::link_acl`] once its authorizations are written.
    pub async fn find_or_create_acl(&self, resource: &str) -> AclResult<(ResourceUri, bool)> {
        if let Some(acl) = self.find_acl(resource).await? {
            return Ok((acl, false));
        }

        let template = format!("<> a <{}> .", vocab::ACL_CLASS.as_str());
        let acl = self.repo.post(&self.acl_base, &template).await?;
        tracing::info!("Created ACL {} for {}", acl, resource);
        Ok((acl, true))
    }

    /// Insert the `accessControl` link from resource to ACL
    ///
    /// Called exactly once per ACL, after its authorization writes succeed.
    pub async fn link_acl(&self, acl: &str, resource: &str) -> AclResult<()> {
        let update = format!(
            "INSERT {{ <{resource}> <{}> <{acl}> . }} WHERE {{}}",
            vocab::ACCESS_CONTROL.as_str()
        );
        self.repo.patch(resource, &update).await?;
        Ok(())
    }

    /// Existence probe for an authorization address
    pub async fn exists(&self, uri: &str) -> AclResult<bool> {
        Ok(self.repo.exists(uri).await?)
    }

    /// Declare an authorization's full desired state (create or overwrite)
    ///
    /// An empty role set still writes the body, revoking every agent.
    pub async fn put_authorization(
        &self,
        acl: &str,
        resource: &str,
        permission: Permission,
        roles: &BTreeSet<String>,
    ) -> AclResult<ResourceUri> {
        let uri = authorization_uri(acl, permission);
        let body = authorization_triples(&uri, resource, permission, roles).join("\n");
        self.repo.put(&uri, &body).await?;
        Ok(uri)
    }

    /// Merge roles into an existing authorization, leaving prior grants intact
    pub async fn patch_authorization(
        &self,
        acl: &str,
        resource: &str,
        permission: Permission,
        roles: &BTreeSet<String>,
    ) -> AclResult<ResourceUri> {
        let uri = authorization_uri(acl, permission);
        let update = format!(
            "INSERT {{ {} }} WHERE {{}}",
            authorization_triples(&uri, resource, permission, roles).join(" ")
        );
        self.repo.patch(&uri, &update).await?;
        Ok(uri)
    }

    /// Two-phase delete: the resource, then its tombstone
    ///
    /// Already-absent is tolerated at either phase, so re-running a
    /// half-finished delete converges.
    pub async fn delete_completely(&self, uri: &str) -> AclResult<()> {
        match self.repo.delete(uri).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                tracing::warn!("Resource already deleted: {}", uri);
            }
            Err(e) => return Err(e.into()),
        }

        match self.repo.delete(&tombstone_uri(uri)).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_not_found() => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Direct children of an ACL container (the resync sweep's candidates)
    pub async fn children(&self, uri: &str) -> AclResult<Vec<ResourceUri>> {
        let body = self.repo.get(uri, &Prefer::with_containment()).await?;
        let graph = parse_graph(&body)?;
        let subject = NamedNode::new(uri)?;

        Ok(graph
            .objects_for_subject_predicate(&subject, vocab::CONTAINS)
            .filter_map(|term| match term {
                TermRef::NamedNode(n) => Some(n.as_str().to_string()),
                _ => None,
            })
            .collect())
    }
}

/// Triples describing one authorization, absolute IRIs throughout
fn authorization_triples(
    authz: &str,
    resource: &str,
    permission: Permission,
    roles: &BTreeSet<String>,
) -> Vec<String> {
    let mut triples = vec![
        format!("<{authz}> <{}> <{}> .", rdf::TYPE.as_str(), vocab::AUTHORIZATION.as_str()),
        format!("<{authz}> <{}> <{resource}> .", vocab::ACCESS_TO.as_str()),
    ];
    for role in roles {
        triples.push(format!("<{authz}> <{}> <{role}> .", vocab::AGENT.as_str()));
    }
    for mode in permission.modes() {
        triples.push(format!("<{authz}> <{}> <{}> .", vocab::MODE.as_str(), mode.as_str()));
    }
    triples
}
