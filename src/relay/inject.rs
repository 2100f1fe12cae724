// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Injection controller
//!
//! Rewrites the Cookie header of third-party requests on relay routes so
//! they carry the stored credential. Requests that cannot succeed (no
//! stored credential, no cookie at all) are short-circuited with an
//! alert instead of being forwarded.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};

use super::credential::{redact, CredentialOrigin};
use super::route::{Route, RouteSet};
use crate::error::{Error, Result};
use crate::host::InterceptionHost;
use crate::http::{headers, upsert_cookie_attribute, InterceptedRequest};
use crate::network::{Decision, Interception, RequestInterceptor};

/// Injection controller
pub struct InjectionController {
    host: Arc<dyn InterceptionHost>,
    store_key: String,
    cookie_attribute: String,
    routes: Vec<Route>,
    enabled: bool,
}

impl InjectionController {
    /// Create a controller injecting `cookie_attribute` on `routes`
    pub fn new(
        host: Arc<dyn InterceptionHost>,
        store_key: impl Into<String>,
        cookie_attribute: impl Into<String>,
        routes: Vec<Route>,
    ) -> Self {
        Self {
            host,
            store_key: store_key.into(),
            cookie_attribute: cookie_attribute.into(),
            routes,
            enabled: true,
        }
    }

    /// Turn injection on or off without removing it from the dispatcher
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Build the rewritten header set for `request`
    pub fn rewrite(&self, request: &InterceptedRequest) -> Result<HeaderMap> {
        let stored = self
            .host
            .get_value(&self.store_key)?
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::no_stored_credential(&self.store_key))?;

        let cookie = joined_cookie(&request.headers)?
            .ok_or_else(|| Error::missing_cookie(request.url_str()))?;

        let rewritten = upsert_cookie_attribute(&cookie, &self.cookie_attribute, &stored);
        let value = HeaderValue::try_from(rewritten.as_str()).map_err(|e| {
            Error::internal(format!("rewritten cookie is not a valid header value: {}", e))
        })?;

        let mut headers = request.headers.clone();
        headers.insert(COOKIE, value);

        tracing::info!(
            url = %request.url,
            skey = %redact(&stored),
            "Injected skey into cookie"
        );

        Ok(headers)
    }
}

/// All Cookie header values joined into one, `None` when there is nothing.
///
/// A line that is not UTF-8 fails the whole join; dropping it would forward
/// a truncated cookie.
fn joined_cookie(map: &HeaderMap) -> Result<Option<String>> {
    let mut parts = Vec::new();
    for value in map.get_all(COOKIE) {
        let part = headers::decode(value)
            .ok_or_else(|| Error::internal("Cookie header is not valid UTF-8"))?;
        if !part.is_empty() {
            parts.push(part);
        }
    }

    if parts.is_empty() {
        return Ok(None);
    }
    Ok(Some(parts.join("; ")))
}

#[async_trait]
impl RequestInterceptor for InjectionController {
    fn name(&self) -> &'static str {
        "inject"
    }

    fn should_intercept(&self, origin: CredentialOrigin, routes: &RouteSet) -> bool {
        self.enabled && origin == CredentialOrigin::ThirdParty && routes.contains_any(&self.routes)
    }

    async fn intercept(&self, request: &InterceptedRequest) -> Interception {
        match self.rewrite(request) {
            Ok(headers) => Interception::new(Decision::Continue { headers }),
            Err(e) if e.is_remediable() => {
                tracing::warn!(error = %e, url = %request.url, "Request short-circuited");
                if let Some(alert) = e.remediation_alert() {
                    self.host.notify(&alert);
                }
                Interception::new(Decision::ShortCircuit)
            }
            Err(e) => {
                tracing::error!(error = %e, url = %request.url, "Injection failed");
                Interception::pass_through()
            }
        }
    }

    fn priority(&self) -> i32 {
        50
    }
}
