// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Interception host capability interface
//!
//! Proxy engines differ in how they expose persistence, notifications,
//! outbound HTTP and request completion. The relay core only talks to
//! [`InterceptionHost`]; each engine gets its own adapter.

mod local;

pub use local::LocalHost;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Result;
use crate::network::Decision;

/// User-facing alert: title, subtitle, body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub title: String,
    pub subtitle: String,
    pub body: String,
}

impl Alert {
    /// Create a new alert
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            body: body.into(),
        }
    }

    /// Alert raised after a new credential is stored
    pub fn credential_updated(value: &str) -> Self {
        Self::new("WeRead skey updated", "New skey saved", value)
    }
}

/// Everything the relay needs from the engine hosting it
#[async_trait]
pub trait InterceptionHost: Send + Sync {
    /// Read a persisted value
    fn get_value(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite a persisted value
    fn set_value(&self, key: &str, value: &str) -> Result<()>;

    /// Surface an alert to the user; best effort
    fn notify(&self, alert: &Alert);

    /// Fire an outbound GET. Any received status is `Ok`.
    async fn http_get(&self, url: &Url) -> Result<StatusCode>;

    /// Hand the final decision back to the engine
    fn complete(&self, decision: &Decision) {
        tracing::trace!(?decision, "Request completed");
    }
}
