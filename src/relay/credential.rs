// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Credential model and extraction from request headers

use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::http::{headers, InterceptedRequest};

/// Who issued an intercepted request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialOrigin {
    /// The client that owns the credential (the WeRead app)
    Owner,
    /// A consumer that needs the credential relayed to it
    ThirdParty,
    /// The identifying header was missing
    Unknown,
}

impl CredentialOrigin {
    /// Classify by looking for `marker` in the `header` value
    pub fn detect(headers: &HeaderMap, header: &str, marker: &str) -> Self {
        match headers::get(headers, header) {
            Some(value) if value.contains(marker) => CredentialOrigin::Owner,
            Some(_) => CredentialOrigin::ThirdParty,
            None => CredentialOrigin::Unknown,
        }
    }

    /// Stable name for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialOrigin::Owner => "owner",
            CredentialOrigin::ThirdParty => "third_party",
            CredentialOrigin::Unknown => "unknown",
        }
    }
}

/// A captured session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Token value; never empty
    pub value: String,
    /// URL of the request it was taken from
    pub origin: String,
    /// When it was observed
    pub observed_at: DateTime<Utc>,
}

impl Credential {
    /// Create a credential, rejecting empty values
    pub fn new(value: impl Into<String>, origin: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() {
            return None;
        }
        Some(Self {
            value,
            origin: origin.into(),
            observed_at: Utc::now(),
        })
    }

    /// Shortened value safe for logs
    pub fn redacted(&self) -> String {
        redact(&self.value)
    }
}

/// First four characters followed by an ellipsis
pub fn redact(value: &str) -> String {
    let mut chars = value.chars();
    let head: String = chars.by_ref().take(4).collect();
    if chars.next().is_some() {
        format!("{}…", head)
    } else {
        head
    }
}

/// Pulls the credential out of a request's headers
#[derive(Debug, Clone)]
pub struct CredentialExtractor {
    header: String,
}

impl Default for CredentialExtractor {
    fn default() -> Self {
        Self::new(headers::SKEY)
    }
}

impl CredentialExtractor {
    /// Extract from the named header (matched case-insensitively)
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
        }
    }

    /// Header being read
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Raw header value; empty when missing
    pub fn incoming<'a>(&self, request: &'a InterceptedRequest) -> &'a str {
        request.header_value(&self.header).unwrap_or("")
    }

    /// Extract a credential, `None` when the header is missing or empty
    pub fn extract(&self, request: &InterceptedRequest) -> Option<Credential> {
        Credential::new(self.incoming(request), request.url_str())
    }
}
