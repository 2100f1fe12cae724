// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request interceptor trait and the decision handed back to the host
//!
//! Mirrors the proxy-script contract: every intercepted request ends in
//! exactly one [`Decision`], pass-through, continue with rewritten
//! headers, or short-circuit.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde_json::{json, Map, Value};
use tokio::task::JoinHandle;

use crate::http::InterceptedRequest;
use crate::relay::{CredentialOrigin, RouteSet};

/// Request interceptor trait
///
/// Implementors observe or rewrite one request. They never fail: every
/// error is handled internally and folded into the returned decision.
#[async_trait]
pub trait RequestInterceptor: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Filter - return true if this interceptor should handle the request
    fn should_intercept(&self, origin: CredentialOrigin, routes: &RouteSet) -> bool;

    /// Handle the request
    async fn intercept(&self, request: &InterceptedRequest) -> Interception;

    /// Priority - higher priority interceptors are consulted first
    fn priority(&self) -> i32 {
        0
    }
}

/// What the host should do with the intercepted request
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Forward the request unmodified
    PassThrough,
    /// Forward the request with this full header set
    Continue { headers: HeaderMap },
    /// Do not forward the request at all
    ShortCircuit,
}

impl Decision {
    /// Check if the request goes out untouched
    pub fn is_pass_through(&self) -> bool {
        matches!(self, Decision::PassThrough)
    }

    /// Check if the request is dropped
    pub fn is_short_circuit(&self) -> bool {
        matches!(self, Decision::ShortCircuit)
    }

    /// Rewritten headers, if any
    pub fn headers(&self) -> Option<&HeaderMap> {
        match self {
            Decision::Continue { headers } => Some(headers),
            _ => None,
        }
    }

    /// Script-host wire form: `{}`, `{"headers": {...}}` or `{"abort": true}`.
    /// Repeated header names are joined with `", "`.
    pub fn to_json(&self) -> Value {
        match self {
            Decision::PassThrough => json!({}),
            Decision::Continue { headers } => {
                let mut map = Map::new();
                for name in headers.keys() {
                    let joined = headers
                        .get_all(name)
                        .iter()
                        .map(|v| String::from_utf8_lossy(v.as_bytes()))
                        .collect::<Vec<_>>()
                        .join(", ");
                    map.insert(name.as_str().to_string(), Value::String(joined));
                }
                json!({ "headers": map })
            }
            Decision::ShortCircuit => json!({ "abort": true }),
        }
    }
}

/// A decision plus any side effect still running in the background
#[derive(Debug)]
pub struct Interception {
    /// Decision for the host
    pub decision: Decision,
    /// Spawned notification, if one was started
    pending: Option<JoinHandle<()>>,
}

impl Interception {
    /// Wrap a decision with nothing pending
    pub fn new(decision: Decision) -> Self {
        Self {
            decision,
            pending: None,
        }
    }

    /// Pass-through with nothing pending
    pub fn pass_through() -> Self {
        Self::new(Decision::PassThrough)
    }

    /// Attach a spawned side effect
    pub fn with_pending(mut self, handle: JoinHandle<()>) -> Self {
        self.pending = Some(handle);
        self
    }

    /// Check if a side effect is still attached
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Wait for the background side effect, then hand back the decision
    pub async fn settle(self) -> Decision {
        if let Some(handle) = self.pending {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Notification task did not finish");
            }
        }
        self.decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_pass_through_json() {
        assert_eq!(Decision::PassThrough.to_json(), json!({}));
        assert_eq!(Decision::ShortCircuit.to_json(), json!({ "abort": true }));
    }

    #[test]
    fn test_continue_json() {
        let mut headers = HeaderMap::new();
        headers.insert("cookie", HeaderValue::from_static("a=1; wr_skey=XYZ"));
        let decision = Decision::Continue { headers };

        assert_eq!(
            decision.to_json(),
            json!({ "headers": { "cookie": "a=1; wr_skey=XYZ" } })
        );
        assert!(decision.headers().is_some());
        assert!(!decision.is_pass_through());
    }

    #[test]
    fn test_continue_json_keeps_repeated_headers() {
        let mut headers = HeaderMap::new();
        headers.append("accept", HeaderValue::from_static("application/json"));
        headers.append("accept", HeaderValue::from_static("text/plain"));
        headers.insert("cookie", HeaderValue::from_str("nick=张三; wr_skey=XYZ").unwrap());

        assert_eq!(
            Decision::Continue { headers }.to_json(),
            json!({ "headers": {
                "accept": "application/json, text/plain",
                "cookie": "nick=张三; wr_skey=XYZ",
            } })
        );
    }

    #[tokio::test]
    async fn test_settle_waits_for_pending() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        let handle = tokio::spawn(async move {
            let _ = tx.send(());
        });

        let interception = Interception::pass_through().with_pending(handle);
        assert!(interception.has_pending());
        assert!(interception.settle().await.is_pass_through());
        assert!(rx.await.is_ok());
    }
}
