// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Persistent key-value storage for the captured credential
//!
//! The relay keeps a single record, the latest credential under a fixed
//! key. Stores only read and overwrite: there is no delete, no expiry,
//! and no transaction around read-then-write.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;

/// Store key holding the latest captured credential
pub const CREDENTIAL_KEY: &str = "weread_skey";

/// Durable string storage keyed by string
///
/// `get` returns the last successfully written value. Empty values read
/// back as absent.
pub trait KeyValueStore: Send + Sync {
    /// Read a value
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite a value
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
