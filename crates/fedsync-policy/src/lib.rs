//! fedsync-policy: Lifecycle-driven access policy for deposit submissions
//!
//! Pure domain logic on top of `fedsync-acl`: inspects a submission's
//! lifecycle state and declares the complete grant set it should have,
//! letting the reconciliation engine bring the repository in line.
//!
//! The writability state machine is deliberately small:
//!
//! | State  | When                                | Who may write            |
//! |--------|-------------------------------------|--------------------------|
//! | OPEN   | not cancelled, not submitted        | backend, submitter, preparers |
//! | FROZEN | cancelled or submitted              | backend only             |
//!
//! FROZEN is re-derived from the object's fields on every update message,
//! never tracked independently, so there is no un-freeze path here.

mod config;
mod engine;
mod error;
mod submission;

pub mod vocab;

// Re-exports
pub use config::RoleConfig;
pub use engine::PolicyEngine;
pub use error::{PolicyError, PolicyResult};
pub use submission::{Submission, SubmissionStatus};
