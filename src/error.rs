// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for the skey relay
//!
//! Every error kind is handled inside the relay: the interception host
//! always receives a completed decision. The predicates on [`Error`]
//! decide how each kind degrades.

use thiserror::Error;

use crate::host::Alert;

/// Result type alias for relay operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the relay
#[derive(Error, Debug)]
pub enum Error {
    /// Capture request carried no credential header (or an empty one)
    #[error("credential header `{header}` missing or empty")]
    MissingCredential { header: String },

    /// Injection attempted before any credential was captured
    #[error("no stored credential under `{key}`")]
    NoStoredCredential { key: String },

    /// Injection target has no Cookie header to rewrite
    #[error("request to {url} has no cookie to rewrite")]
    MissingCookie { url: String },

    /// Outbound push failed (network error or non-2xx status)
    #[error("push notification to {url} failed: {reason}")]
    Notification { url: String, reason: String },

    /// Anything else that went wrong inside a controller
    #[error("internal failure: {0}")]
    Internal(String),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Route or cookie pattern failed to compile
    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Persistent store failure
    #[error("Store error: {0}")]
    Store(String),
}

impl Error {
    /// Create a missing credential error
    pub fn missing_credential(header: impl Into<String>) -> Self {
        Error::MissingCredential {
            header: header.into(),
        }
    }

    /// Create a no stored credential error
    pub fn no_stored_credential(key: impl Into<String>) -> Self {
        Error::NoStoredCredential { key: key.into() }
    }

    /// Create a missing cookie error
    pub fn missing_cookie(url: impl Into<String>) -> Self {
        Error::MissingCookie { url: url.into() }
    }

    /// Create a notification failure
    pub fn notification(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Notification {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create an internal failure
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Error::Internal(msg.into())
    }

    /// Create a store error
    pub fn store<S: Into<String>>(msg: S) -> Self {
        Error::Store(msg.into())
    }

    /// Errors the user can fix; these short-circuit the request with an alert
    pub fn is_remediable(&self) -> bool {
        matches!(
            self,
            Error::NoStoredCredential { .. } | Error::MissingCookie { .. }
        )
    }

    /// The alert shown to the user for remediable errors
    pub fn remediation_alert(&self) -> Option<Alert> {
        match self {
            Error::NoStoredCredential { .. } => Some(Alert::new(
                "WeRead sync failed",
                "No saved skey",
                "Open the WeRead app first so the skey can be captured",
            )),
            Error::MissingCookie { .. } => Some(Alert::new(
                "WeRead sync failed",
                "Cookie is empty",
                "Re-authenticate with WeRead and retry",
            )),
            _ => None,
        }
    }
}
