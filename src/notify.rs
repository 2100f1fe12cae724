// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Outbound push notification (Bark-style `GET <endpoint>/<title>/<body>`)

use reqwest::StatusCode;
use url::Url;

use crate::error::{Error, Result};
use crate::host::InterceptionHost;

/// Default push title
pub const DEFAULT_PUSH_TITLE: &str = "WeRead Skey Updated";

/// Builds and fires the push for a newly captured credential
#[derive(Debug, Clone)]
pub struct PushNotifier {
    endpoint: Url,
    title: String,
}

impl PushNotifier {
    /// Create a notifier for a base endpoint such as `https://api.day.app/<device-key>`
    pub fn new(endpoint: impl AsRef<str>, title: impl Into<String>) -> Result<Self> {
        let endpoint = Url::parse(endpoint.as_ref())?;
        if endpoint.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "push endpoint {} cannot take path segments",
                endpoint
            )));
        }

        Ok(Self {
            endpoint,
            title: title.into(),
        })
    }

    /// Full push URL with title and value percent-encoded as path segments
    pub fn url_for(&self, value: &str) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| Error::internal("push endpoint cannot take path segments"))?
            .pop_if_empty()
            .push(&self.title)
            .push(value);
        Ok(url)
    }

    /// Fire the push through the host. One attempt, no retry.
    pub async fn send(&self, host: &dyn InterceptionHost, value: &str) -> Result<StatusCode> {
        let url = self.url_for(value)?;

        let status = host
            .http_get(&url)
            .await
            .map_err(|e| Error::notification(self.endpoint.as_str(), e.to_string()))?;

        if !status.is_success() {
            return Err(Error::notification(
                self.endpoint.as_str(),
                format!("status {}", status),
            ));
        }

        Ok(status)
    }
}
