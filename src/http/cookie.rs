// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Cookie header attribute lookup and rewriting
//!
//! Works on the raw `Cookie` request header (`a=1; b=2`). Only the value
//! bytes of the targeted attribute are ever touched; names, spacing and
//! ordering of everything else survive byte for byte.

use std::ops::Range;

/// Separator used when appending a new attribute
pub const ATTRIBUTE_SEPARATOR: &str = "; ";

/// Byte range of the value of the first attribute named `name`
fn value_span(cookie: &str, name: &str) -> Option<Range<usize>> {
    let mut offset = 0;
    for part in cookie.split(';') {
        let start = offset;
        offset += part.len() + 1;

        let trimmed = part.trim_start();
        let lead = part.len() - trimmed.len();
        let Some((key, _)) = trimmed.split_once('=') else {
            continue;
        };
        if key.trim_end() != name {
            continue;
        }

        let value_start = start + lead + key.len() + 1;
        let value_end = (start + part.trim_end().len()).max(value_start);
        return Some(value_start..value_end);
    }
    None
}

/// Get the value of a cookie attribute by exact name
pub fn cookie_attribute<'a>(cookie: &'a str, name: &str) -> Option<&'a str> {
    value_span(cookie, name).map(|span| &cookie[span])
}

/// Set `name` to `value` in a Cookie header.
///
/// An existing attribute has its value replaced in place; otherwise the
/// attribute is appended after a `"; "` separator.
pub fn upsert_cookie_attribute(cookie: &str, name: &str, value: &str) -> String {
    if let Some(span) = value_span(cookie, name) {
        let mut rewritten = String::with_capacity(cookie.len() - span.len() + value.len());
        rewritten.push_str(&cookie[..span.start]);
        rewritten.push_str(value);
        rewritten.push_str(&cookie[span.end..]);
        return rewritten;
    }

    if cookie.is_empty() {
        return format!("{}={}", name, value);
    }
    format!("{}{}{}={}", cookie, ATTRIBUTE_SEPARATOR, name, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_in_place() {
        let cookie = "a=1; wr_skey=OLD; b=2";
        assert_eq!(
            upsert_cookie_attribute(cookie, "wr_skey", "XYZ"),
            "a=1; wr_skey=XYZ; b=2"
        );
    }

    #[test]
    fn test_append_when_absent() {
        assert_eq!(
            upsert_cookie_attribute("a=1", "wr_skey", "XYZ"),
            "a=1; wr_skey=XYZ"
        );
    }

    #[test]
    fn test_length_changes_by_value_delta_only() {
        let cookie = "wr_vid=42;wr_skey=abcdef;  theme=dark";
        let rewritten = upsert_cookie_attribute(cookie, "wr_skey", "xy");
        assert_eq!(rewritten, "wr_vid=42;wr_skey=xy;  theme=dark");
        assert_eq!(rewritten.len(), cookie.len() - 4);
    }

    #[test]
    fn test_first_and_last_positions() {
        assert_eq!(
            upsert_cookie_attribute("wr_skey=OLD; a=1", "wr_skey", "N"),
            "wr_skey=N; a=1"
        );
        assert_eq!(
            upsert_cookie_attribute("a=1; wr_skey=OLD", "wr_skey", "N"),
            "a=1; wr_skey=N"
        );
    }

    #[test]
    fn test_similar_names_are_not_matched() {
        let cookie = "old_wr_skey=1; wr_skey_v2=2";
        assert_eq!(cookie_attribute(cookie, "wr_skey"), None);
        assert_eq!(
            upsert_cookie_attribute(cookie, "wr_skey", "N"),
            "old_wr_skey=1; wr_skey_v2=2; wr_skey=N"
        );
    }

    #[test]
    fn test_empty_value_is_replaced() {
        assert_eq!(cookie_attribute("a=1; wr_skey=; b=2", "wr_skey"), Some(""));
        assert_eq!(
            upsert_cookie_attribute("a=1; wr_skey=; b=2", "wr_skey", "N"),
            "a=1; wr_skey=N; b=2"
        );
    }

    #[test]
    fn test_lookup() {
        let cookie = "wr_vid=42; wr_skey=abc";
        assert_eq!(cookie_attribute(cookie, "wr_skey"), Some("abc"));
        assert_eq!(cookie_attribute(cookie, "wr_vid"), Some("42"));
        assert_eq!(cookie_attribute(cookie, "missing"), None);
    }

    #[test]
    fn test_only_first_occurrence_rewritten() {
        assert_eq!(
            upsert_cookie_attribute("wr_skey=A; wr_skey=B", "wr_skey", "N"),
            "wr_skey=N; wr_skey=B"
        );
    }
}
