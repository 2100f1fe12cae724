// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Dispatcher
//!
//! Classifies each intercepted request, works out whether it came from
//! the credential's own client or a third party, and hands it to at most
//! one controller.

use std::sync::Arc;

use super::capture::CaptureController;
use super::config::RelayConfig;
use super::credential::{CredentialExtractor, CredentialOrigin};
use super::inject::InjectionController;
use super::route::{RouteClassifier, RouteSet};
use crate::error::Result;
use crate::host::InterceptionHost;
use crate::http::InterceptedRequest;
use crate::network::{Decision, Interception, RequestInterceptor};
use crate::notify::PushNotifier;

/// Routes intercepted requests to the capture or injection controller
pub struct Dispatcher {
    host: Arc<dyn InterceptionHost>,
    classifier: RouteClassifier,
    origin_header: String,
    owner_marker: String,
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
}

impl Dispatcher {
    /// Wire up both controllers from a config
    pub fn new(config: &RelayConfig, host: Arc<dyn InterceptionHost>) -> Result<Self> {
        config.validate()?;

        let mut capture = CaptureController::new(
            Arc::clone(&host),
            CredentialExtractor::new(&config.credential_header),
            &config.store_key,
            config.capture_route,
        )
        .alert_on_capture(config.alert_on_capture);

        if let Some(ref endpoint) = config.push_endpoint {
            capture = capture.with_push(PushNotifier::new(endpoint, &config.push_title)?);
        }

        let inject = InjectionController::new(
            Arc::clone(&host),
            &config.store_key,
            &config.cookie_attribute,
            config.relay_routes.clone(),
        )
        .enabled(config.injection_enabled);

        let mut dispatcher = Self {
            host,
            classifier: config.classifier()?,
            origin_header: config.origin_header.clone(),
            owner_marker: config.owner_marker.clone(),
            interceptors: Vec::new(),
        };
        dispatcher.add(capture);
        dispatcher.add(inject);

        Ok(dispatcher)
    }

    /// Register an interceptor
    pub fn add<I: RequestInterceptor + 'static>(&mut self, interceptor: I) {
        self.interceptors.push(Arc::new(interceptor));
        // Sort by priority (highest first)
        self.interceptors
            .sort_by(|a, b| b.priority().cmp(&a.priority()));
    }

    /// Classify a URL
    pub fn classify(&self, url: &str) -> RouteSet {
        self.classifier.classify(url)
    }

    /// Who sent the request
    pub fn origin(&self, request: &InterceptedRequest) -> CredentialOrigin {
        CredentialOrigin::detect(&request.headers, &self.origin_header, &self.owner_marker)
    }

    /// Run the request through at most one interceptor
    pub async fn dispatch(&self, request: &InterceptedRequest) -> Interception {
        let routes = self.classify(request.url_str());
        if routes.is_none() {
            return Interception::pass_through();
        }

        let origin = self.origin(request);
        let Some(interceptor) = self
            .interceptors
            .iter()
            .find(|i| i.should_intercept(origin, &routes))
        else {
            tracing::debug!(
                url = %request.url,
                routes = %routes,
                origin = origin.as_str(),
                "No interceptor for request"
            );
            return Interception::pass_through();
        };

        tracing::debug!(
            url = %request.url,
            routes = %routes,
            origin = origin.as_str(),
            interceptor = interceptor.name(),
            "Dispatching"
        );

        interceptor.intercept(request).await
    }

    /// Dispatch, complete the request with the host, then wait for any
    /// spawned notification before returning.
    pub async fn serve(&self, request: &InterceptedRequest) -> Decision {
        let interception = self.dispatch(request).await;
        self.host.complete(&interception.decision);
        interception.settle().await
    }
}
