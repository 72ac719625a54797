//! In-memory repository backend (for testing)

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::error::{RepoError, RepoResult};
use crate::prefer::Prefer;
use crate::traits::{Repository, ResourceUri, tombstone_uri};

const LDP_CONTAINS: &str = "http://www.w3.org/ns/ldp#contains";

/// In-memory repository for unit tests
///
/// Thread-safe via `RwLock`, not persistent. Reproduces the protocol
/// behavior the engine depends on: server-assigned create locations,
/// path-based containment, tombstones blocking address reuse, and
/// textual application of `INSERT { ... } WHERE {}` patches.
#[derive(Default)]
pub struct InMemoryRepository {
    /// uri -> Turtle body
    resources: RwLock<HashMap<ResourceUri, String>>,
    /// uris whose address is blocked by a tombstone
    tombstones: RwLock<HashSet<ResourceUri>>,
    next_id: AtomicU64,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live resources
    pub fn resource_count(&self) -> usize {
        self.resources.read().unwrap().len()
    }

    /// Stored body of a resource, if present
    pub fn body_of(&self, uri: &str) -> Option<String> {
        self.resources.read().unwrap().get(uri).cloned()
    }

    /// Whether a tombstone currently blocks `uri`
    pub fn has_tombstone(&self, uri: &str) -> bool {
        self.tombstones.read().unwrap().contains(uri)
    }

    /// Clear all resources and tombstones
    pub fn clear(&self) {
        self.resources.write().unwrap().clear();
        self.tombstones.write().unwrap().clear();
    }

    /// Direct children of `uri` by path containment
    fn children_of(&self, uri: &str) -> Vec<ResourceUri> {
        let base = format!("{}/", uri.trim_end_matches('/'));
        self.resources
            .read()
            .unwrap()
            .keys()
            .filter(|u| {
                u.strip_prefix(&base)
                    .is_some_and(|rest| !rest.is_empty() && !rest.contains('/'))
            })
            .cloned()
            .collect()
    }
}

/// Resolve the empty relative IRI against the resource's own URI,
/// as the repository does when storing a posted body
fn absolutize(uri: &str, body: &str) -> String {
    body.replace("<>", &format!("<{uri}>"))
}

/// Extract the triples block of an `INSERT { ... } WHERE {}` update
fn insert_block(update: &str) -> Option<&str> {
    let rest = &update[update.find("INSERT")?..];
    let open = rest.find('{')?;
    let close = rest[open + 1..].find('}')?;
    Some(rest[open + 1..open + 1 + close].trim())
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn get(&self, uri: &str, prefer: &Prefer) -> RepoResult<String> {
        if self.has_tombstone(uri) {
            return Err(RepoError::status(uri, 410));
        }

        let mut body = self
            .resources
            .read()
            .unwrap()
            .get(uri)
            .cloned()
            .ok_or_else(|| RepoError::status(uri, 404))?;

        if prefer.containment {
            for child in self.children_of(uri) {
                body.push_str(&format!("\n<{uri}> <{LDP_CONTAINS}> <{child}> ."));
            }
        }
        if prefer.embed {
            let children = self.children_of(uri);
            let resources = self.resources.read().unwrap();
            for child in children {
                if let Some(child_body) = resources.get(&child) {
                    body.push('\n');
                    body.push_str(child_body);
                }
            }
        }

        Ok(body)
    }

    async fn post(&self, container: &str, body: &str) -> RepoResult<ResourceUri> {
        if !self.resources.read().unwrap().contains_key(container) {
            return Err(RepoError::status(container, 404));
        }

        let base = container.trim_end_matches('/');
        let uri = loop {
            let id = self.next_id.fetch_add(1, Ordering::Relaxed);
            let candidate = format!("{base}/res{id}");
            if !self.resources.read().unwrap().contains_key(&candidate)
                && !self.has_tombstone(&candidate)
            {
                break candidate;
            }
        };

        self.resources
            .write()
            .unwrap()
            .insert(uri.clone(), absolutize(&uri, body));
        Ok(uri)
    }

    async fn put(&self, uri: &str, body: &str) -> RepoResult<()> {
        if self.has_tombstone(uri) {
            return Err(RepoError::status(uri, 410));
        }

        self.resources
            .write()
            .unwrap()
            .insert(uri.to_string(), absolutize(uri, body));
        Ok(())
    }

    async fn patch(&self, uri: &str, update: &str) -> RepoResult<()> {
        let block = insert_block(update)
            .ok_or_else(|| RepoError::status(uri, 400))?
            .to_string();

        let mut resources = self.resources.write().unwrap();
        let body = resources
            .get_mut(uri)
            .ok_or_else(|| RepoError::status(uri, 404))?;
        body.push('\n');
        body.push_str(&block);
        Ok(())
    }

    async fn delete(&self, uri: &str) -> RepoResult<()> {
        // A tombstone address deletes the marker itself
        let mut tombstones = self.tombstones.write().unwrap();
        if let Some(blocked) = tombstones
            .iter()
            .find(|blocked| tombstone_uri(blocked) == uri)
            .cloned()
        {
            tombstones.remove(&blocked);
            return Ok(());
        }
        if uri.ends_with("/fcr:tombstone") {
            return Err(RepoError::status(uri, 404));
        }
        drop(tombstones);

        let mut resources = self.resources.write().unwrap();
        if resources.remove(uri).is_none() {
            return Err(RepoError::status(uri, 404));
        }

        // The subtree goes with the resource
        let subtree = format!("{}/", uri.trim_end_matches('/'));
        resources.retain(|u, _| !u.starts_with(&subtree));
        drop(resources);

        self.tombstones.write().unwrap().insert(uri.to_string());
        Ok(())
    }

    async fn exists(&self, uri: &str) -> RepoResult<bool> {
        if self.has_tombstone(uri) {
            return Err(RepoError::status(uri, 410));
        }
        Ok(self.resources.read().unwrap().contains_key(uri))
    }
}
