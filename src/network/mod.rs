// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request interception contract shared by the relay controllers

mod interceptor_trait;

pub use interceptor_trait::{Decision, Interception, RequestInterceptor};
