//! Raw header block parsing.
//!
//! # Responsibilities
//! - Parse a multi-line `Key: Value` block into a multimap
//! - Pull the `Cookie` line out so it can be merged separately
//! - Canonicalize header names for display
//!
//! # Design Decisions
//! - Malformed lines are skipped, never an error
//! - Repeated keys keep every value in input order

use std::collections::BTreeMap;

/// Header name → every value received or supplied for it.
pub type HeaderMultimap = BTreeMap<String, Vec<String>>;

/// A parsed header block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderBlock {
    /// Every header except `Cookie`, keyed by canonical name.
    pub headers: HeaderMultimap,
    /// The cookie string carried by `Cookie:` lines, if any.
    pub cookie: Option<String>,
}

/// Parse raw header text.
///
/// ```
/// use httpkit::http::headers::parse_header_block;
///
/// let block = parse_header_block("accept: */*\nCookie: a=1\nnot a header\n");
/// assert_eq!(block.headers["Accept"], vec!["*/*".to_string()]);
/// assert_eq!(block.cookie.as_deref(), Some("a=1"));
/// ```
pub fn parse_header_block(text: &str) -> HeaderBlock {
    let mut block = HeaderBlock::default();
    let mut cookies: Vec<&str> = Vec::new();

    for line in text.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let value = value.trim();

        if key.eq_ignore_ascii_case("cookie") {
            if !value.is_empty() {
                cookies.push(value);
            }
            continue;
        }

        block
            .headers
            .entry(canonical_header_key(key))
            .or_default()
            .push(value.to_string());
    }

    if !cookies.is_empty() {
        block.cookie = Some(cookies.join("; "));
    }
    block
}

/// Canonical MIME header form: first letter and letters after `-`
/// uppercased, the rest lowercased. Names containing spaces or other
/// non-token bytes are returned unchanged.
pub fn canonical_header_key(key: &str) -> String {
    if !key.bytes().all(is_token_byte) {
        return key.to_string();
    }

    let mut out = String::with_capacity(key.len());
    let mut upper = true;
    for c in key.chars() {
        if upper {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c.to_ascii_lowercase());
        }
        upper = c == '-';
    }
    out
}

fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}
