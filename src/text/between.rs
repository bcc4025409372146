//! Extract the text between two markers.

use std::ops::Range;

/// Find the text between `start` and `end`.
///
/// The search cursor first skips `start_position` bytes, then moves past
/// the first `anchor` (when non-empty), then past `start` (when non-empty).
/// The result runs from there to the next `end`, or to the end of `source`
/// when `end` is empty.
///
/// Returns `(position, text)`. `position` is the byte index just past the
/// `end` marker (or the cursor when `end` is empty) and can seed the next
/// search. On a miss it is `-1` and the text is `source` when `fallback` is
/// set, empty otherwise. A `start_position` past the end of `source` or
/// inside a UTF-8 sequence is a miss; negative values count as `0`.
///
/// ```
/// use httpkit::text::between;
///
/// assert_eq!(between("AAstartXendBB", "start", "end", 0, "", false), (11, "X"));
/// assert_eq!(between("abc", "[", "]", 0, "", true), (-1, "abc"));
/// ```
pub fn between<'a>(
    source: &'a str,
    start: &str,
    end: &str,
    start_position: isize,
    anchor: &str,
    fallback: bool,
) -> (isize, &'a str) {
    let skip = start_position.max(0) as usize;
    let found = if source.is_char_boundary(skip) {
        locate(
            source.as_bytes(),
            start.as_bytes(),
            end.as_bytes(),
            skip,
            anchor.as_bytes(),
        )
    } else {
        None
    };

    // Matches of UTF-8 needles always land on char boundaries.
    match found.and_then(|(pos, range)| source.get(range).map(|text| (pos, text))) {
        Some((pos, text)) => (pos as isize, text),
        None if fallback => (-1, source),
        None => (-1, ""),
    }
}

/// Byte-slice form of [`between`].
pub fn between_bytes<'a>(
    source: &'a [u8],
    start: &[u8],
    end: &[u8],
    start_position: isize,
    anchor: &[u8],
    fallback: bool,
) -> (isize, &'a [u8]) {
    let skip = start_position.max(0) as usize;
    match locate(source, start, end, skip, anchor) {
        Some((pos, range)) => (pos as isize, &source[range]),
        None if fallback => (-1, source),
        None => (-1, &[][..]),
    }
}

fn locate(
    source: &[u8],
    start: &[u8],
    end: &[u8],
    skip: usize,
    anchor: &[u8],
) -> Option<(usize, Range<usize>)> {
    if skip > source.len() {
        return None;
    }
    let mut cursor = skip;

    for marker in [anchor, start] {
        if !marker.is_empty() {
            cursor += find(&source[cursor..], marker)? + marker.len();
        }
    }

    if end.is_empty() {
        return Some((cursor, cursor..source.len()));
    }
    let len = find(&source[cursor..], end)?;
    Some((cursor + len + end.len(), cursor..cursor + len))
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
