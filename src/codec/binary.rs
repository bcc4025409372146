//! Hex and base64 text forms of binary data.

use base64::prelude::*;

use super::CodecError;

/// Decode hex text. Accepts an optional `0x` prefix, spaces and backslashes
/// between digits, and an odd digit count (a leading `0` is implied).
pub fn hex_decode(text: &str) -> Result<Vec<u8>, CodecError> {
    let lowered = text.to_ascii_lowercase();
    let trimmed = lowered.strip_prefix("0x").unwrap_or(&lowered);
    let mut digits: String = trimmed.chars().filter(|c| *c != ' ' && *c != '\\').collect();
    if digits.len() % 2 != 0 {
        digits.insert(0, '0');
    }
    Ok(hex::decode(digits)?)
}

/// Uppercase hex, optionally with a space between bytes (`12 AB 34`).
pub fn hex_encode(data: &[u8], with_spaces: bool) -> String {
    let encoded = hex::encode_upper(data);
    if !with_spaces {
        return encoded;
    }
    let mut spaced = String::with_capacity(encoded.len() + data.len());
    for (i, pair) in encoded.as_bytes().chunks(2).enumerate() {
        if i > 0 {
            spaced.push(' ');
        }
        spaced.extend(pair.iter().map(|b| *b as char));
    }
    spaced
}

/// Standard-alphabet, padded base64.
pub fn base64_encode(data: impl AsRef<[u8]>) -> String {
    BASE64_STANDARD.encode(data)
}

pub fn base64_decode(text: impl AsRef<[u8]>) -> Result<Vec<u8>, CodecError> {
    Ok(BASE64_STANDARD.decode(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_decode_is_forgiving() {
        assert_eq!(hex_decode("0x12AB").unwrap(), vec![0x12, 0xab]);
        assert_eq!(hex_decode("12 ab\\34").unwrap(), vec![0x12, 0xab, 0x34]);
        assert_eq!(hex_decode("abc").unwrap(), vec![0x0a, 0xbc]);
        assert_eq!(hex_decode("").unwrap(), Vec::<u8>::new());
        assert!(matches!(hex_decode("zz"), Err(CodecError::Hex(_))));
    }

    #[test]
    fn hex_encode_upper_with_optional_spaces() {
        let data = [0x12, 0xab, 0x34, 0xcd];
        assert_eq!(hex_encode(&data, false), "12AB34CD");
        assert_eq!(hex_encode(&data, true), "12 AB 34 CD");
        assert_eq!(hex_encode(&[], true), "");
    }

    #[test]
    fn base64_standard_alphabet() {
        assert_eq!(base64_encode("hello?>"), "aGVsbG8/Pg==");
        assert_eq!(base64_decode("aGVsbG8/Pg==").unwrap(), b"hello?>");
        assert!(matches!(base64_decode("***"), Err(CodecError::Base64(_))));
    }
}
