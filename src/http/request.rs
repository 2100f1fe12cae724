// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Read-mostly view of one in-flight intercepted request

use std::collections::HashMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Deserialize;
use url::Url;

use super::headers;
use crate::error::{Error, Result};

/// Intercepted HTTP request
///
/// Built by the host adapter for the duration of one callback. Header
/// names are normalized on construction so every lookup is
/// case-insensitive.
#[derive(Debug, Clone)]
pub struct InterceptedRequest {
    /// Request method
    pub method: Method,
    /// Request URL
    pub url: Url,
    /// Request headers
    pub headers: HeaderMap,
}

/// Wire shape hosts hand us: `{"method": "GET", "url": "...", "headers": {...}}`
#[derive(Debug, Deserialize)]
struct RawRequest {
    #[serde(default)]
    method: Option<String>,
    url: String,
    #[serde(default)]
    headers: HashMap<String, String>,
}

impl InterceptedRequest {
    /// Create a request from its parts
    pub fn new(method: Method, url: impl AsRef<str>, headers: HeaderMap) -> Result<Self> {
        Ok(Self {
            method,
            url: Url::parse(url.as_ref())?,
            headers,
        })
    }

    /// Create a GET request with no headers
    pub fn get(url: impl AsRef<str>) -> Result<Self> {
        Self::new(Method::GET, url, HeaderMap::new())
    }

    /// Build from a host-supplied string map
    pub fn from_parts<K, V>(
        method: &str,
        url: impl AsRef<str>,
        header_pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let method = Method::from_bytes(method.as_bytes())
            .map_err(|e| Error::internal(format!("bad method {:?}: {}", method, e)))?;
        Self::new(method, url, headers::normalize(header_pairs)?)
    }

    /// Parse a host payload in JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawRequest = serde_json::from_str(json)?;
        Self::from_parts(
            raw.method.as_deref().unwrap_or("GET"),
            &raw.url,
            raw.headers,
        )
    }

    /// Set a header, replacing any existing value
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Case-insensitive header lookup
    pub fn header_value(&self, name: &str) -> Option<&str> {
        headers::get(&self.headers, name)
    }

    /// Get the URL as string
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }

    /// Get the host
    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_creation() {
        let req = InterceptedRequest::get("https://i.weread.qq.com/pay/balance").unwrap();
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.host(), Some("i.weread.qq.com"));
    }

    #[test]
    fn test_from_json() {
        let req = InterceptedRequest::from_json(
            r#"{"url":"https://i.weread.qq.com/pay/balance","headers":{"Skey":"ABC123","User-Agent":"WeRead/8.2"}}"#,
        )
        .unwrap();
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.header_value("skey"), Some("ABC123"));
        assert_eq!(req.header_value("user-agent"), Some("WeRead/8.2"));
    }

    #[test]
    fn test_from_json_rejects_bad_url() {
        let err = InterceptedRequest::from_json(r#"{"url":"not a url"}"#).unwrap_err();
        assert!(matches!(err, Error::Url(_)));
    }

    #[test]
    fn test_header_replaces() {
        let req = InterceptedRequest::get("https://i.weread.qq.com/")
            .unwrap()
            .header("Cookie", "a=1")
            .header("cookie", "b=2");
        assert_eq!(req.header_value("COOKIE"), Some("b=2"));
        assert_eq!(req.headers.len(), 1);
    }
}
