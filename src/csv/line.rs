//! Line building and field cleanup.

/// Join fields into one comma-separated line.
///
/// Commas inside fields are removed, then `"`, `\r` and `\n` are stripped
/// from the joined line. `line_break` appends `\r\n`.
pub fn fields_to_line<S: AsRef<str>>(fields: &[S], line_break: bool) -> String {
    let joined = fields
        .iter()
        .map(|f| f.as_ref().replace(',', ""))
        .collect::<Vec<_>>()
        .join(",");

    let mut line: String = joined
        .chars()
        .filter(|c| !matches!(c, '"' | '\r' | '\n'))
        .collect();
    if line_break {
        line.push_str("\r\n");
    }
    line
}

/// Trim surrounding quotes, then whitespace, and drop tabs.
pub fn clean_fields<S: AsRef<str>>(fields: &[S]) -> Vec<String> {
    fields
        .iter()
        .map(|f| f.as_ref().trim_matches('"').trim().replace('\t', ""))
        .collect()
}
