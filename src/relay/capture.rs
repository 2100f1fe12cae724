// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Capture controller
//!
//! Watches the owning client's capture route, persists a new credential
//! when it differs from the stored one, then alerts and pushes. The
//! triggering request is always passed through untouched.

use std::sync::Arc;

use async_trait::async_trait;

use super::credential::{redact, Credential, CredentialExtractor, CredentialOrigin};
use super::route::{Route, RouteSet};
use crate::error::{Error, Result};
use crate::host::{Alert, InterceptionHost};
use crate::http::InterceptedRequest;
use crate::network::{Interception, RequestInterceptor};
use crate::notify::PushNotifier;

/// Result of one capture attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// A credential is stored and the incoming one is empty or identical
    Unchanged,
    /// A new credential was written
    Stored(Credential),
}

/// Capture controller
pub struct CaptureController {
    host: Arc<dyn InterceptionHost>,
    extractor: CredentialExtractor,
    store_key: String,
    route: Route,
    push: Option<PushNotifier>,
    alert_on_capture: bool,
}

impl CaptureController {
    /// Create a controller persisting under `store_key`
    pub fn new(
        host: Arc<dyn InterceptionHost>,
        extractor: CredentialExtractor,
        store_key: impl Into<String>,
        route: Route,
    ) -> Self {
        Self {
            host,
            extractor,
            store_key: store_key.into(),
            route,
            push: None,
            alert_on_capture: true,
        }
    }

    /// Push new credentials through this notifier
    pub fn with_push(mut self, push: PushNotifier) -> Self {
        self.push = Some(push);
        self
    }

    /// Enable/disable the local alert on capture
    pub fn alert_on_capture(mut self, enabled: bool) -> Self {
        self.alert_on_capture = enabled;
        self
    }

    /// Read, compare, and persist. No alerts or pushes happen here.
    pub fn capture(&self, request: &InterceptedRequest) -> Result<CaptureOutcome> {
        let existing = self.host.get_value(&self.store_key)?.unwrap_or_default();
        let incoming = self.extractor.incoming(request);

        if !existing.is_empty() && (incoming.is_empty() || incoming == existing) {
            tracing::debug!(
                skey = %redact(incoming),
                "Stored skey unchanged, skipping capture"
            );
            return Ok(CaptureOutcome::Unchanged);
        }

        let credential = self
            .extractor
            .extract(request)
            .ok_or_else(|| Error::missing_credential(self.extractor.header()))?;

        self.host.set_value(&self.store_key, &credential.value)?;

        tracing::info!(
            key = %self.store_key,
            skey = %credential.redacted(),
            observed_at = %credential.observed_at.to_rfc3339(),
            replaced = !existing.is_empty(),
            "Stored new skey"
        );

        Ok(CaptureOutcome::Stored(credential))
    }

    /// Alert now, push in the background. Returns the push task, if any.
    fn announce(&self, credential: &Credential) -> Option<tokio::task::JoinHandle<()>> {
        if self.alert_on_capture {
            self.host.notify(&Alert::credential_updated(&credential.value));
        }

        let push = self.push.clone()?;
        let host = Arc::clone(&self.host);
        let value = credential.value.clone();

        Some(tokio::spawn(async move {
            match push.send(host.as_ref(), &value).await {
                Ok(status) => {
                    tracing::info!(status = %status, skey = %redact(&value), "Push sent")
                }
                Err(e) => tracing::warn!(error = %e, "Push failed"),
            }
        }))
    }
}

#[async_trait]
impl RequestInterceptor for CaptureController {
    fn name(&self) -> &'static str {
        "capture"
    }

    fn should_intercept(&self, origin: CredentialOrigin, routes: &RouteSet) -> bool {
        origin == CredentialOrigin::Owner && routes.contains(self.route)
    }

    async fn intercept(&self, request: &InterceptedRequest) -> Interception {
        match self.capture(request) {
            Ok(CaptureOutcome::Stored(credential)) => match self.announce(&credential) {
                Some(pending) => Interception::pass_through().with_pending(pending),
                None => Interception::pass_through(),
            },
            Ok(CaptureOutcome::Unchanged) => Interception::pass_through(),
            Err(Error::MissingCredential { header }) => {
                tracing::warn!(header = %header, url = %request.url, "skey not found in request headers");
                Interception::pass_through()
            }
            Err(e) => {
                tracing::error!(error = %e, url = %request.url, "Capture failed");
                Interception::pass_through()
            }
        }
    }

    fn priority(&self) -> i32 {
        100
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::LocalHost;
    use crate::http::HttpClient;
    use crate::network::Decision;
    use crate::store::{KeyValueStore, MemoryStore};

    fn setup(store: MemoryStore) -> (Arc<LocalHost>, CaptureController) {
        let host = Arc::new(LocalHost::new(Arc::new(store), HttpClient::new().unwrap()));
        let controller = CaptureController::new(
            host.clone(),
            CredentialExtractor::default(),
            "weread_skey",
            Route::Balance,
        );
        (host, controller)
    }

    fn balance(pairs: &[(&str, &str)]) -> InterceptedRequest {
        InterceptedRequest::from_parts(
            "GET",
            "https://i.weread.qq.com/pay/balance",
            pairs.iter().copied(),
        )
        .unwrap()
    }

    #[test]
    fn test_first_capture_stores() {
        let store = MemoryStore::new();
        let (_, controller) = setup(store.clone());

        let outcome = controller.capture(&balance(&[("Skey", "ABC123")])).unwrap();
        assert!(matches!(outcome, CaptureOutcome::Stored(ref c) if c.value == "ABC123"));
        assert_eq!(store.get("weread_skey").unwrap().as_deref(), Some("ABC123"));
    }

    #[test]
    fn test_same_value_is_unchanged() {
        let (_, controller) = setup(MemoryStore::with_value("weread_skey", "ABC123"));
        let outcome = controller.capture(&balance(&[("skey", "ABC123")])).unwrap();
        assert_eq!(outcome, CaptureOutcome::Unchanged);
    }

    #[test]
    fn test_empty_incoming_keeps_existing() {
        let store = MemoryStore::with_value("weread_skey", "ABC123");
        let (_, controller) = setup(store.clone());

        assert_eq!(
            controller.capture(&balance(&[])).unwrap(),
            CaptureOutcome::Unchanged
        );
        assert_eq!(store.get("weread_skey").unwrap().as_deref(), Some("ABC123"));
    }

    #[test]
    fn test_empty_incoming_without_existing_is_missing() {
        let store = MemoryStore::new();
        let (_, controller) = setup(store.clone());

        let err = controller.capture(&balance(&[("skey", "")])).unwrap_err();
        assert!(matches!(err, Error::MissingCredential { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_different_value_overwrites() {
        let store = MemoryStore::with_value("weread_skey", "OLD");
        let (_, controller) = setup(store.clone());

        controller.capture(&balance(&[("skey", "NEW")])).unwrap();
        assert_eq!(store.get("weread_skey").unwrap().as_deref(), Some("NEW"));
    }

    #[tokio::test]
    async fn test_intercept_alerts_and_passes_through() {
        let (host, controller) = setup(MemoryStore::new());

        let interception = controller.intercept(&balance(&[("skey", "ABC123")])).await;
        assert!(!interception.has_pending());
        assert_eq!(interception.settle().await, Decision::PassThrough);

        let alerts = host.alerts();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0], Alert::credential_updated("ABC123"));
    }

    #[tokio::test]
    async fn test_alert_can_be_disabled() {
        let (host, controller) = setup(MemoryStore::new());
        let controller = controller.alert_on_capture(false);

        controller.intercept(&balance(&[("skey", "ABC123")])).await;
        assert!(host.alerts().is_empty());
        assert_eq!(host.get_value("weread_skey").unwrap().as_deref(), Some("ABC123"));
    }

    #[test]
    fn test_blocking_host_loop() {
        let (host, controller) = setup(MemoryStore::new());
        let first = balance(&[("skey", "ABC123")]);

        let decision = tokio_test::block_on(async {
            controller.intercept(&first).await;
            controller.intercept(&first).await.settle().await
        });

        assert!(decision.is_pass_through());
        assert_eq!(host.alerts().len(), 1);
    }

    #[test]
    fn test_should_intercept() {
        let (_, controller) = setup(MemoryStore::new());
        let balance = RouteSet::from_routes([Route::Balance]);
        let review = RouteSet::from_routes([Route::ReviewList]);

        assert!(controller.should_intercept(CredentialOrigin::Owner, &balance));
        assert!(!controller.should_intercept(CredentialOrigin::ThirdParty, &balance));
        assert!(!controller.should_intercept(CredentialOrigin::Unknown, &balance));
        assert!(!controller.should_intercept(CredentialOrigin::Owner, &review));
    }
}
