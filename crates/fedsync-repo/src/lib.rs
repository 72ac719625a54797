//! fedsync-repo: Linked-data repository protocol client
//!
//! Speaks the repository's REST dialect (RDF bodies, Prefer negotiation,
//! SPARQL-Update patches, tombstoned deletes). No authorization logic;
//! that lives in `fedsync-acl`.
//!
//! ## Backends
//!
//! | Backend              | Use Case            |
//! |----------------------|---------------------|
//! | `InMemoryRepository` | Unit tests          |
//! | `HttpRepository`     | Production          |
//!
//! ## Example
//!
//! ```rust,ignore
//! use fedsync_repo::{InMemoryRepository, Prefer, Repository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = InMemoryRepository::new();
//!
//!     repo.put("http://repo.local/rest/box", "").await?;
//!     let acl = repo
//!         .post("http://repo.local/rest/box", "<> a <http://example.com/Thing> .")
//!         .await?;
//!     assert!(repo.exists(&acl).await?);
//!
//!     Ok(())
//! }
//! ```

mod error;
mod prefer;
mod traits;

mod http;
mod memory;

// Re-exports
pub use error::{RepoError, RepoResult};
pub use prefer::Prefer;
pub use traits::{Repository, ResourceUri, tombstone_uri};

pub use http::HttpRepository;
pub use memory::InMemoryRepository;
