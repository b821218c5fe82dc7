// src/error.rs
use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Why a login was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    InvalidCredentials,
    UnknownInstitution,
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthFailure::InvalidCredentials => f.write_str("username or password rejected"),
            AuthFailure::UnknownInstitution => f.write_str("institution id not recognised"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("authentication failed for institution {inst_id}: {reason}")]
    Auth { inst_id: u32, reason: AuthFailure },

    #[error("request to {url} failed")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("session no longer accepted while fetching {page}")]
    SessionExpired { page: String },

    /// Expected markup was not found. Almost always a portal layout change.
    #[error("unexpected markup on {page}: {reason}")]
    Parse { page: &'static str, reason: String },

    #[error("user {id} does not exist")]
    UserNotFound { id: u32 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("could not serialise record")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn parse(page: &'static str, reason: impl Into<String>) -> Self {
        Error::Parse { page, reason: reason.into() }
    }

    /// Transport-level failure, whether reqwest gave up or the server said no.
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network { .. } | Error::Status { .. })
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Error::Auth { .. })
    }
}
