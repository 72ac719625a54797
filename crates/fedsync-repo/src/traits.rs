//! Repository trait definition

use async_trait::async_trait;

use crate::error::RepoResult;
use crate::prefer::Prefer;

/// A repository resource URI
pub type ResourceUri = String;

/// Address of the placeholder a delete leaves behind
///
/// The repository blocks writes to a deleted resource's address until the
/// tombstone is itself deleted.
pub fn tombstone_uri(uri: &str) -> String {
    if uri.ends_with('/') {
        format!("{uri}fcr:tombstone")
    } else {
        format!("{uri}/fcr:tombstone")
    }
}

/// One repository verb per method, RDF bodies as Turtle text
///
/// Implementations perform no retries; every non-success response
/// surfaces as `RepoError::Protocol` with status and body.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Fetch a resource's RDF body under the given representation preference
    ///
    /// Returns `RepoError::Protocol` with status 404 if the resource
    /// does not exist.
    async fn get(&self, uri: &str, prefer: &Prefer) -> RepoResult<String>;

    /// Create a child of `container`; returns the server-assigned URI
    async fn post(&self, container: &str, body: &str) -> RepoResult<ResourceUri>;

    /// Create or fully replace a resource's RDF body
    ///
    /// Rejected by the repository while a tombstone occupies the address.
    async fn put(&self, uri: &str, body: &str) -> RepoResult<()>;

    /// Apply a SPARQL-Update partial update (`INSERT { ... } WHERE {}`)
    async fn patch(&self, uri: &str, update: &str) -> RepoResult<()>;

    /// Delete a resource, leaving a tombstone at [`tombstone_uri`]
    ///
    /// Deleting an absent resource is a 404 protocol error; callers that
    /// tolerate it match on `RepoError::is_not_found`.
    async fn delete(&self, uri: &str) -> RepoResult<()>;

    /// Header-only existence probe; 404 maps to `false`
    async fn exists(&self, uri: &str) -> RepoResult<bool>;
}
