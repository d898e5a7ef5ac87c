//! Permissive CSV tokenizer.
//!
//! Lines are split first and scanned one at a time, so a quoted field can
//! never span a line break. Malformed quoting is tolerated: an unterminated
//! quote simply runs to the end of its line.

/// Rows of string fields in input order. Row lengths are not normalized.
pub type ParsedTable = Vec<Vec<String>>;

/// Parse delimited text into rows of trimmed fields.
///
/// `\n` and `\r\n` both end a line; lines that are blank after trimming are
/// dropped. A leading byte order mark is ignored. Never fails: empty input
/// yields an empty table.
pub fn parse(text: &str) -> ParsedTable {
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect()
}

/// Tokenize a single line into fields.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut row = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                row.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }

    row.push(current.trim().to_string());
    row
}
