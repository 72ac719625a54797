//! Deposit vocabulary of the protected business objects

use oxrdf::NamedNodeRef;

/// Submission was cancelled (boolean)
pub const CANCELLED: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("https://fedsync.dev/ns/deposit#cancelled");

/// Legacy submitted flag (boolean), superseded by `submissionStatus`
pub const SUBMITTED: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("https://fedsync.dev/ns/deposit#submitted");

/// Structured lifecycle status
pub const SUBMISSION_STATUS: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("https://fedsync.dev/ns/deposit#submissionStatus");

/// The user resource that owns the submission
pub const SUBMITTER: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("https://fedsync.dev/ns/deposit#submitter");

/// A user resource preparing the submission on the submitter's behalf
pub const PREPARER: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("https://fedsync.dev/ns/deposit#preparer");

/// Namespace of the `submissionStatus` value IRIs
pub const STATUS_NS: &str = "https://fedsync.dev/ns/deposit/status#";
