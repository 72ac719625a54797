//! ACL engine error types

use thiserror::Error;

use fedsync_repo::RepoError;

pub type AclResult<T> = Result<T, AclError>;

#[derive(Debug, Error)]
pub enum AclError {
    /// Repository protocol or connectivity failure
    #[error("Repository operation failed: {0}")]
    Repo(#[from] RepoError),

    /// A protected resource links more than one ACL
    ///
    /// Never auto-repaired: guessing which duplicate is authoritative
    /// risks silently widening access.
    #[error("Resource {resource} links {count} ACLs, expected at most one")]
    MultipleAcls { resource: String, count: usize },

    /// More than one authorization names the same role as agent
    #[error("Multiple authorizations name role {role}")]
    MultipleAuthorizations { role: String },

    /// Repository response body was not parseable RDF
    #[error("Invalid RDF in repository response: {0}")]
    Rdf(#[from] oxttl::TurtleParseError),

    /// A role or resource identifier is not a valid IRI
    #[error("Invalid IRI: {0}")]
    Iri(#[from] oxrdf::IriParseError),
}
