//! Cookie merging.
//!
//! # Responsibilities
//! - Combine the header-block cookie with the explicit cookie parameter
//! - Strip control characters from values
//! - Render the merged set as one `Cookie` request header
//!
//! # Design Decisions
//! - Explicit parameter pairs are applied last so they win on conflict
//! - Parts without `=` and pairs with an empty name are dropped
//! - Names are ordered so the rendered header is deterministic

use std::collections::BTreeMap;

/// Cookie name → sanitized value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieMap {
    pairs: BTreeMap<String, String>,
}

impl CookieMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply every `name=value` pair from a cookie string.
    /// Later pairs overwrite earlier ones with the same name.
    pub fn apply(&mut self, source: &str) {
        for (name, value) in parse_pairs(source) {
            self.pairs.insert(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as a `Cookie` header value, or `None` when empty.
    pub fn to_header_value(&self) -> Option<String> {
        if self.pairs.is_empty() {
            return None;
        }
        let rendered: Vec<String> = self
            .pairs
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        Some(rendered.join("; "))
    }
}

/// Merge the header-embedded cookie string with the explicit one.
pub fn merge_cookies(header_cookie: &str, explicit_cookie: &str) -> CookieMap {
    let mut map = CookieMap::new();
    map.apply(header_cookie);
    map.apply(explicit_cookie);
    map
}

fn parse_pairs(source: &str) -> impl Iterator<Item = (String, String)> + '_ {
    strip_cookie_prefix(source.trim())
        .split(';')
        .filter_map(|part| {
            let (name, value) = part.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), sanitize_value(value.trim())))
        })
}

fn strip_cookie_prefix(source: &str) -> &str {
    const PREFIX: &str = "cookie:";
    match source.get(..PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(PREFIX) => &source[PREFIX.len()..],
        _ => source,
    }
}

/// Remove C0 control characters and DEL.
pub fn sanitize_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| (*c as u32) >= 0x20 && *c != '\u{7f}')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_cookie_wins() {
        let merged = merge_cookies("a=1; b=2", "b=9");
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get("a"), Some("1"));
        assert_eq!(merged.get("b"), Some("9"));
    }

    #[test]
    fn strips_control_bytes_but_keeps_pair() {
        let merged = merge_cookies("", "sid=ab\u{7}c\u{7f}d");
        assert_eq!(merged.get("sid"), Some("abcd"));
    }

    #[test]
    fn strips_cookie_prefix() {
        let merged = merge_cookies("Cookie: PHPSESSION=55", "COOKIE:x=1");
        assert_eq!(merged.get("PHPSESSION"), Some("55"));
        assert_eq!(merged.get("x"), Some("1"));
    }

    #[test]
    fn drops_empty_names_and_bare_parts() {
        let merged = merge_cookies("=v; flag; ok=1;;", "");
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.get("ok"), Some("1"));
    }

    #[test]
    fn value_keeps_embedded_equals() {
        let merged = merge_cookies("token=a=b==", "");
        assert_eq!(merged.get("token"), Some("a=b=="));
    }

    #[test]
    fn renders_header_value() {
        assert_eq!(merge_cookies("", "").to_header_value(), None);
        assert_eq!(
            merge_cookies("b=2", "a=1").to_header_value().as_deref(),
            Some("a=1; b=2")
        );
    }
}
