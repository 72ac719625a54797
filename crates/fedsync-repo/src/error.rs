//! Repository protocol error types

use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Error)]
pub enum RepoError {
    /// Repository answered outside the success range
    #[error("Repository returned {status} for {uri}: {body}")]
    Protocol {
        uri: String,
        status: u16,
        body: String,
    },

    /// Transport-level failure reaching the repository
    #[error("Connection to repository failed: {0}")]
    Connect(#[from] reqwest::Error),
}

impl RepoError {
    /// Protocol error with an empty body
    pub fn status(uri: impl Into<String>, status: u16) -> Self {
        RepoError::Protocol {
            uri: uri.into(),
            status,
            body: String::new(),
        }
    }

    /// True for a 404 protocol error (tolerated at some call sites)
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepoError::Protocol { status: 404, .. })
    }
}
