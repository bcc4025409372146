//! URL query and HTML text escaping.

use url::form_urlencoded::byte_serialize;

use super::CodecError;

/// Query-component encoding: space becomes `+`, everything outside
/// `A-Z a-z 0-9 * - . _` is percent-encoded.
pub fn url_encode(input: &str) -> String {
    byte_serialize(input.as_bytes()).collect()
}

/// Inverse of [`url_encode`]. Malformed `%` escapes and non-UTF-8 results
/// are errors.
pub fn url_decode(input: &str) -> Result<String, CodecError> {
    let bytes = input.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'%' {
            let escape = bytes.get(i + 1..i + 3).unwrap_or_default();
            if escape.len() != 2 || !escape.iter().all(u8::is_ascii_hexdigit) {
                let end = (i + 3).min(input.len());
                return Err(CodecError::UrlEscape(
                    String::from_utf8_lossy(&bytes[i..end]).into_owned(),
                ));
            }
        }
    }

    let spaced = input.replace('+', " ");
    percent_encoding::percent_decode_str(&spaced)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| CodecError::Utf8)
}

/// Escape `< > & ' "`.
pub fn html_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&#34;"),
            _ => out.push(c),
        }
    }
    out
}

/// Replace named and numeric character references. Unknown or malformed
/// references are left as they are.
pub fn html_unescape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match tail.find(';').and_then(|semi| {
            decode_reference(&tail[1..semi]).map(|c| (c, semi))
        }) {
            Some((c, semi)) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_reference(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "copy" => '©',
        "reg" => '®',
        "trade" => '™',
        "hellip" => '…',
        "mdash" => '—',
        "ndash" => '–',
        "laquo" => '«',
        "raquo" => '»',
        "middot" => '·',
        "yen" => '¥',
        "euro" => '€',
        "pound" => '£',
        "times" => '×',
        "divide" => '÷',
        _ => return None,
    };
    Some(c)
}
