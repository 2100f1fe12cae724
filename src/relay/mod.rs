// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Credential capture and injection
//!
//! The capture controller harvests the skey from the WeRead app's own
//! traffic; the injection controller writes it into the Cookie header of
//! third-party sync requests. The dispatcher picks between them.

mod capture;
mod config;
mod credential;
mod dispatcher;
mod inject;
mod route;

pub use capture::{CaptureController, CaptureOutcome};
pub use config::RelayConfig;
pub use credential::{redact, Credential, CredentialExtractor, CredentialOrigin};
pub use dispatcher::Dispatcher;
pub use inject::InjectionController;
pub use route::{Route, RouteClassifier, RoutePattern, RouteSet};
