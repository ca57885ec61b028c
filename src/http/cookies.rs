//! Cookie header parsing.
//!
//! Only exact two-token `name=value` pairs are kept. Entries with an `=`
//! inside the value, or with no `=` at all, are dropped.

use std::collections::HashMap;

use axum::http::{header::COOKIE, HeaderMap};

/// Parsed request cookies, name → value.
pub type Cookies = HashMap<String, String>;

/// Parse a raw `Cookie` header value.
pub fn parse_cookies(raw: &str) -> Cookies {
    raw.split(';')
        .filter_map(|entry| {
            let parts: Vec<&str> = entry.split('=').collect();
            match parts.as_slice() {
                [name, value] => Some((name.trim().to_string(), value.trim().to_string())),
                _ => None,
            }
        })
        .collect()
}

/// Parse the cookies of a request; an absent or non-UTF-8 header is empty.
pub fn cookies_from_headers(headers: &HeaderMap) -> Cookies {
    headers
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(parse_cookies)
        .unwrap_or_default()
}
