//! fedsync-acl: ACL reconciliation for a linked-data repository
//!
//! Given a protected resource and a desired set of role-to-permission
//! grants, computes and applies the repository operations that make the
//! stored access-control state match the desired state.
//!
//! Two reconciliation strategies:
//!
//! | Entry point                    | Semantics                                    |
//! |--------------------------------|----------------------------------------------|
//! | `AclManager::add_permissions`  | merge grants into existing authorizations    |
//! | `AclManager::set_permissions`  | declare the full state, prune everything else|
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fedsync_acl::AclManager;
//! use fedsync_repo::HttpRepository;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = Arc::new(HttpRepository::new());
//!     let manager = AclManager::new(repo, "http://repo.local/rest/acls");
//!
//!     let acl = manager
//!         .set_permissions("http://repo.local/rest/submissions/77")
//!         .grant_write(["http://repo.local/rest/users/backend"])
//!         .grant_read(["http://repo.local/rest/roles/admin"])
//!         .perform()
//!         .await?;
//!     println!("reconciled under {acl}");
//!
//!     Ok(())
//! }
//! ```

mod builder;
mod driver;
mod error;
mod permission;
mod reader;

pub mod vocab;

// Re-exports
pub use builder::{AclManager, PermissionBuilder};
pub use driver::AclDriver;
pub use error::{AclError, AclResult};
pub use permission::{PERMISSIONS, Permission, authorization_uri};
pub use reader::AclGraph;
