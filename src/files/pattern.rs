//! File-name filters: `.ext` suffixes and shell-style wildcards.

use std::path::Path;

/// True when `name` matches any of `patterns`, or when `patterns` is empty.
///
/// A pattern starting with `.` is an extension compared case-insensitively
/// against the name's last extension. Anything else is a wildcard pattern.
pub fn matches_any<S: AsRef<str>>(name: &str, patterns: &[S]) -> bool {
    if patterns.is_empty() {
        return true;
    }
    patterns.iter().any(|p| {
        let p = p.as_ref();
        if p.starts_with('.') {
            extension_of(name).is_some_and(|ext| ext.eq_ignore_ascii_case(p))
        } else {
            wildcard_match(p, name)
        }
    })
}

/// `.csv` for `a.b.csv`; `None` when there is no dot.
fn extension_of(name: &str) -> Option<&str> {
    name.rfind('.').map(|idx| &name[idx..])
}

/// Match `name` against `*`, `?`, `[...]` (ranges, `^`/`!` negation) and
/// `\` escapes. A malformed class never matches.
pub fn wildcard_match(pattern: &str, name: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let name: Vec<char> = name.chars().collect();
    match_from(&pattern, &name)
}

fn match_from(pattern: &[char], name: &[char]) -> bool {
    let (mut p, mut n) = (0, 0);
    // Backtrack point: pattern index after the last `*` and the name index
    // it is currently absorbing up to.
    let mut star: Option<(usize, usize)> = None;

    while n < name.len() {
        if p < pattern.len() {
            match pattern[p] {
                '*' => {
                    star = Some((p + 1, n));
                    p += 1;
                    continue;
                }
                '?' => {
                    p += 1;
                    n += 1;
                    continue;
                }
                '[' => {
                    if let Some((hit, next)) = match_class(&pattern[p..], name[n]) {
                        if hit {
                            p += next;
                            n += 1;
                            continue;
                        }
                    } else {
                        return false;
                    }
                }
                '\\' if p + 1 < pattern.len() => {
                    if pattern[p + 1] == name[n] {
                        p += 2;
                        n += 1;
                        continue;
                    }
                }
                c if c == name[n] => {
                    p += 1;
                    n += 1;
                    continue;
                }
                _ => {}
            }
        }
        match star {
            Some((sp, sn)) => {
                p = sp;
                n = sn + 1;
                star = Some((sp, sn + 1));
            }
            None => return false,
        }
    }

    pattern[p..].iter().all(|c| *c == '*')
}

/// Evaluate a `[...]` class at the start of `pattern` against `c`.
/// Returns whether it matched and the class length, or `None` if the class
/// is unterminated.
fn match_class(pattern: &[char], c: char) -> Option<(bool, usize)> {
    let mut i = 1;
    let negated = matches!(pattern.get(i), Some('^') | Some('!'));
    if negated {
        i += 1;
    }

    let mut hit = false;
    let mut first = true;
    loop {
        let lo = *pattern.get(i)?;
        if lo == ']' && !first {
            return Some((hit != negated, i + 1));
        }
        first = false;
        i += 1;

        if pattern.get(i) == Some(&'-') && pattern.get(i + 1).is_some_and(|hi| *hi != ']') {
            let hi = pattern[i + 1];
            i += 2;
            if lo <= c && c <= hi {
                hit = true;
            }
        } else if lo == c {
            hit = true;
        }
    }
}

/// True when the file name of `path` contains every keyword (or there are
/// none).
pub fn name_contains_all<S: AsRef<str>>(path: &Path, keywords: &[S]) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    keywords.iter().all(|k| name.contains(k.as_ref()))
}
