//! Split helpers around a separator.

/// Text before the first `sep`, or all of `s` when `sep` is absent.
pub fn left_of<'a>(s: &'a str, sep: &str) -> &'a str {
    match s.find(sep) {
        Some(idx) => &s[..idx],
        None => s,
    }
}

/// Text after the first `sep`, or all of `s` when `sep` is absent.
pub fn right_of<'a>(s: &'a str, sep: &str) -> &'a str {
    match s.find(sep) {
        Some(idx) => &s[idx + sep.len()..],
        None => s,
    }
}

/// Text between the first `left` and the next `right` after it; empty when
/// either is missing.
pub fn middle_of<'a>(s: &'a str, left: &str, right: &str) -> &'a str {
    let Some(idx) = s.find(left) else {
        return "";
    };
    let rest = &s[idx + left.len()..];
    match rest.find(right) {
        Some(end) => &rest[..end],
        None => "",
    }
}
