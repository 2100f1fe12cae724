// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer for the relay
//!
//! Intercepted request view, cookie rewriting, and the outbound client
//! used for push notifications.

mod client;
pub mod cookie;
mod request;

pub use client::{HttpClient, HttpClientConfig};
pub use cookie::{cookie_attribute, upsert_cookie_attribute};
pub use request::InterceptedRequest;

/// Default user agent for outbound calls
pub const DEFAULT_USER_AGENT: &str = concat!("skey-relay/", env!("CARGO_PKG_VERSION"));

/// Common HTTP headers
pub mod headers {
    use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

    use crate::error::{Error, Result};

    pub const COOKIE: &str = "cookie";
    pub const USER_AGENT: &str = "user-agent";
    pub const SKEY: &str = "skey";

    /// Build a case-insensitive header map from host-supplied pairs.
    ///
    /// This is the one place header names get normalized. Every lookup
    /// after this goes through the returned [`HeaderMap`], so `Skey`,
    /// `skey` and `SKEY` are the same header.
    pub fn normalize<I, K, V>(pairs: I) -> Result<HeaderMap>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            let name = HeaderName::try_from(name.as_ref())
                .map_err(|e| Error::internal(format!("bad header name {:?}: {}", name.as_ref(), e)))?;
            let value = HeaderValue::try_from(value.as_ref())
                .map_err(|e| Error::internal(format!("bad value for header {}: {}", name, e)))?;
            map.append(name, value);
        }
        Ok(map)
    }

    /// Decode a header value as UTF-8.
    ///
    /// `HeaderValue::to_str` only accepts visible ASCII, but hosts hand us
    /// raw UTF-8 (`nick=张三`), which `normalize` lets through.
    pub fn decode(value: &HeaderValue) -> Option<&str> {
        std::str::from_utf8(value.as_bytes()).ok()
    }

    /// Fetch a header as a string; non-UTF-8 or missing values read as `None`
    pub fn get<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
        headers.get(name).and_then(decode)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_lookup_ignores_case() {
            let map = normalize([("Skey", "ABC123"), ("User-Agent", "WeRead/8.2")]).unwrap();
            assert_eq!(get(&map, "skey"), Some("ABC123"));
            assert_eq!(get(&map, "SKEY"), Some("ABC123"));
            assert_eq!(get(&map, USER_AGENT), Some("WeRead/8.2"));
        }

        #[test]
        fn test_empty_value_is_kept() {
            let map = normalize([("cookie", "")]).unwrap();
            assert_eq!(get(&map, COOKIE), Some(""));
        }

        #[test]
        fn test_reads_utf8_values() {
            let map = normalize([("Cookie", "nick=张三; wr_skey=OLD")]).unwrap();
            assert_eq!(get(&map, COOKIE), Some("nick=张三; wr_skey=OLD"));
        }

        #[test]
        fn test_invalid_utf8_reads_absent() {
            let mut map = HeaderMap::new();
            map.insert(
                HeaderName::from_static(COOKIE),
                HeaderValue::from_bytes(b"nick=\xff").unwrap(),
            );
            assert_eq!(get(&map, COOKIE), None);
        }

        #[test]
        fn test_rejects_invalid_name() {
            assert!(normalize([("bad header", "x")]).is_err());
        }
    }
}
