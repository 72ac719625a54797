//! Policy engine error types

use thiserror::Error;

use fedsync_acl::AclError;
use fedsync_repo::RepoError;

pub type PolicyResult<T> = Result<T, PolicyError>;

#[derive(Debug, Error)]
pub enum PolicyError {
    /// Reconciliation against the repository failed
    #[error("ACL reconciliation failed: {0}")]
    Acl(#[from] AclError),

    /// Fetching the business object failed
    #[error("Repository operation failed: {0}")]
    Repo(#[from] RepoError),

    /// The submission's RDF body was not parseable
    #[error("Invalid RDF in submission body: {0}")]
    Rdf(#[from] oxttl::TurtleParseError),

    /// A submission or role identifier is not a valid IRI
    #[error("Invalid IRI: {0}")]
    Iri(#[from] oxrdf::IriParseError),

    /// Fail closed on a status this engine does not know
    #[error("Unknown submission status: {status}")]
    UnknownStatus { status: String },

    #[error("Cannot read role configuration: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("Invalid role configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
