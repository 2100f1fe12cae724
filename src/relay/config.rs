// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Relay configuration

use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::route::{Route, RouteClassifier, RoutePattern};
use crate::error::{Error, Result};
use crate::http::headers;
use crate::notify::DEFAULT_PUSH_TITLE;
use crate::store::CREDENTIAL_KEY;

lazy_static! {
    /// RFC 6265 cookie-name token
    static ref COOKIE_NAME: Regex =
        Regex::new(r"^[!#$%&'*+\-.^_`|~0-9A-Za-z]+$").expect("static pattern");
}

/// Relay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Store key of the persisted credential
    pub store_key: String,
    /// Request header carrying the credential on capture
    pub credential_header: String,
    /// Cookie attribute the credential is injected as
    pub cookie_attribute: String,
    /// Header used to tell the owning client from third parties
    pub origin_header: String,
    /// Substring of `origin_header` identifying the owning client
    pub owner_marker: String,
    /// URL patterns per route
    pub routes: Vec<RoutePattern>,
    /// Route the credential is captured from
    pub capture_route: Route,
    /// Routes the credential is injected into
    pub relay_routes: Vec<Route>,
    /// Whether injection runs at all
    pub injection_enabled: bool,
    /// Push endpoint base, e.g. `https://api.day.app/<device-key>`
    pub push_endpoint: Option<String>,
    /// First path segment of the push
    pub push_title: String,
    /// Raise a local alert when a new credential is stored
    pub alert_on_capture: bool,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            store_key: CREDENTIAL_KEY.to_string(),
            credential_header: headers::SKEY.to_string(),
            cookie_attribute: "wr_skey".to_string(),
            origin_header: headers::USER_AGENT.to_string(),
            owner_marker: "WeRead".to_string(),
            routes: RoutePattern::defaults(),
            capture_route: Route::Balance,
            relay_routes: vec![Route::UserNotebooks, Route::BookApi, Route::ReviewList],
            injection_enabled: true,
            push_endpoint: None,
            push_title: DEFAULT_PUSH_TITLE.to_string(),
            alert_on_capture: true,
        }
    }
}

impl RelayConfig {
    /// Create a new relay config
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON file; missing fields take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the push endpoint
    pub fn push_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.push_endpoint = Some(endpoint.into());
        self
    }

    /// Enable/disable injection
    pub fn injection_enabled(mut self, enabled: bool) -> Self {
        self.injection_enabled = enabled;
        self
    }

    /// Enable/disable the capture alert
    pub fn alert_on_capture(mut self, enabled: bool) -> Self {
        self.alert_on_capture = enabled;
        self
    }

    /// Set the store key
    pub fn store_key(mut self, key: impl Into<String>) -> Self {
        self.store_key = key.into();
        self
    }

    /// Set the relay routes
    pub fn relay_routes(mut self, routes: Vec<Route>) -> Self {
        self.relay_routes = routes;
        self
    }

    /// Compile the route table
    pub fn classifier(&self) -> Result<RouteClassifier> {
        RouteClassifier::new(&self.routes)
    }

    /// Check the config for values the relay cannot work with
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("store_key", &self.store_key),
            ("credential_header", &self.credential_header),
            ("origin_header", &self.origin_header),
            ("owner_marker", &self.owner_marker),
        ] {
            if value.is_empty() {
                return Err(Error::Config(format!("{} must not be empty", field)));
            }
        }

        if !COOKIE_NAME.is_match(&self.cookie_attribute) {
            return Err(Error::Config(format!(
                "cookie_attribute {:?} is not a valid cookie name",
                self.cookie_attribute
            )));
        }

        if self.relay_routes.contains(&self.capture_route) {
            return Err(Error::Config(format!(
                "route {} cannot be both the capture route and a relay route",
                self.capture_route
            )));
        }

        for route in std::iter::once(&self.capture_route).chain(&self.relay_routes) {
            if !self.routes.iter().any(|p| p.route == *route) {
                return Err(Error::Config(format!("route {} has no URL pattern", route)));
            }
        }

        self.classifier()
            .map_err(|e| Error::Config(format!("bad route pattern: {}", e)))?;

        Ok(())
    }
}
