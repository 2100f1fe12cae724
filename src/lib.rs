// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # skey-relay - WeRead credential capture and injection
//!
//! Runs inside an HTTP interception pipeline. Requests from the WeRead
//! app to the balance endpoint always carry the session `skey` header;
//! the relay persists it and, when a third-party client (an Obsidian
//! sync plugin, say) calls the notebook/book/review endpoints, injects
//! it into that request's Cookie as `wr_skey`.
//!
//! ## Features
//!
//! - Idempotent capture: a write, alert and push only when the skey changes
//! - Cookie rewriting that preserves every other attribute byte for byte
//! - Short-circuit with an instructive alert when a relayed request cannot succeed
//! - One host interface for persistence, alerts, outbound HTTP and completion
//! - JSON file or in-memory persistence
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use skey_relay::{Dispatcher, HttpClient, InterceptedRequest, LocalHost, MemoryStore, RelayConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let host = Arc::new(LocalHost::new(Arc::new(MemoryStore::new()), HttpClient::new()?));
//!     let dispatcher = Dispatcher::new(&RelayConfig::default(), host)?;
//!
//!     let request = InterceptedRequest::get("https://i.weread.qq.com/pay/balance")?
//!         .header("User-Agent", "WeRead/8.2.1")
//!         .header("skey", "ABC123");
//!
//!     let decision = dispatcher.serve(&request).await;
//!     println!("{}", decision.to_json());
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod host;
pub mod http;
pub mod network;
pub mod notify;
pub mod relay;
pub mod store;

// Re-exports for convenience

// Errors
pub use error::{Error, Result};

// Host adapters
pub use host::{Alert, InterceptionHost, LocalHost};

// HTTP
pub use http::{HttpClient, HttpClientConfig, InterceptedRequest};

// Interception contract
pub use network::{Decision, Interception, RequestInterceptor};

// Notifications
pub use notify::PushNotifier;

// Relay
pub use relay::{
    CaptureController, CaptureOutcome, Credential, CredentialExtractor, CredentialOrigin,
    Dispatcher, InjectionController, RelayConfig, Route, RouteClassifier, RoutePattern, RouteSet,
};

// Storage
pub use store::{FileStore, KeyValueStore, MemoryStore, CREDENTIAL_KEY};

/// skey-relay version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
