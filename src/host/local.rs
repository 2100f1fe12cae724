// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Standalone host adapter backed by a [`KeyValueStore`] and reqwest

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::StatusCode;
use url::Url;

use super::{Alert, InterceptionHost};
use crate::error::Result;
use crate::http::HttpClient;
use crate::network::Decision;
use crate::store::KeyValueStore;

/// Alerts kept for inspection
const MAX_ALERTS: usize = 32;

/// Host adapter for running the relay outside a proxy engine
///
/// Alerts go to the log and into a small ring buffer; the last decision
/// is kept so the caller can render it.
#[derive(Clone)]
pub struct LocalHost {
    store: Arc<dyn KeyValueStore>,
    client: HttpClient,
    alerts: Arc<RwLock<VecDeque<Alert>>>,
    last_decision: Arc<RwLock<Option<Decision>>>,
}

impl LocalHost {
    /// Create a host over an injected store
    pub fn new(store: Arc<dyn KeyValueStore>, client: HttpClient) -> Self {
        Self {
            store,
            client,
            alerts: Arc::new(RwLock::new(VecDeque::new())),
            last_decision: Arc::new(RwLock::new(None)),
        }
    }

    /// Alerts raised so far, oldest first
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.read().iter().cloned().collect()
    }

    /// Decision passed to the most recent `complete`
    pub fn last_decision(&self) -> Option<Decision> {
        self.last_decision.read().clone()
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }
}

#[async_trait]
impl InterceptionHost for LocalHost {
    fn get_value(&self, key: &str) -> Result<Option<String>> {
        self.store.get(key)
    }

    fn set_value(&self, key: &str, value: &str) -> Result<()> {
        self.store.set(key, value)
    }

    fn notify(&self, alert: &Alert) {
        tracing::warn!(
            title = %alert.title,
            subtitle = %alert.subtitle,
            "{}",
            alert.body
        );

        let mut alerts = self.alerts.write();
        if alerts.len() >= MAX_ALERTS {
            alerts.pop_front();
        }
        alerts.push_back(alert.clone());
    }

    async fn http_get(&self, url: &Url) -> Result<StatusCode> {
        self.client.get_status(url).await
    }

    fn complete(&self, decision: &Decision) {
        *self.last_decision.write() = Some(decision.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn host() -> LocalHost {
        LocalHost::new(Arc::new(MemoryStore::new()), HttpClient::new().unwrap())
    }

    #[test]
    fn test_store_passthrough() {
        let host = host();
        assert_eq!(host.get_value("weread_skey").unwrap(), None);
        host.set_value("weread_skey", "ABC").unwrap();
        assert_eq!(host.get_value("weread_skey").unwrap().as_deref(), Some("ABC"));
    }

    #[test]
    fn test_alert_ring_buffer() {
        let host = host();
        for i in 0..(MAX_ALERTS + 3) {
            host.notify(&Alert::new("t", "s", i.to_string()));
        }
        let alerts = host.alerts();
        assert_eq!(alerts.len(), MAX_ALERTS);
        assert_eq!(alerts[0].body, "3");
    }

    #[test]
    fn test_complete_records_decision() {
        let host = host();
        assert!(host.last_decision().is_none());
        host.complete(&Decision::ShortCircuit);
        assert_eq!(host.last_decision(), Some(Decision::ShortCircuit));
    }
}
