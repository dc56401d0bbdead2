//! Clipboard text format
//!
//! Copy writes tab-separated rows joined by `\n`. Fields containing tabs,
//! line breaks or quotes are wrapped in quotes with inner quotes doubled.
//! Paste accepts tab- or comma-separated text with CRLF or LF line endings.

use std::io::Cursor;

/// Field delimiter detected in pasted text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Tab,
    Comma,
}

impl Delimiter {
    /// A tab anywhere in the text selects tab splitting, otherwise comma
    pub fn detect(text: &str) -> Self {
        if text.contains('\t') {
            Delimiter::Tab
        } else {
            Delimiter::Comma
        }
    }

    pub fn byte(&self) -> u8 {
        match self {
            Delimiter::Tab => b'\t',
            Delimiter::Comma => b',',
        }
    }
}

/// Quote a value for the clipboard when it would otherwise split.
///
/// Commas count too: text without tabs is read back comma-separated.
pub fn escape_cell_value(value: &str) -> String {
    let needs_quoting = value.contains('\t')
        || value.contains(',')
        || value.contains('\n')
        || value.contains('\r')
        || value.contains('"');

    if needs_quoting {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Join rows of display strings into clipboard text
pub fn write_rows<I, R, S>(rows: I) -> String
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, row) in rows.into_iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for (j, value) in row.into_iter().enumerate() {
            if j > 0 {
                out.push('\t');
            }
            out.push_str(&escape_cell_value(value.as_ref()));
        }
    }
    out
}

/// Split pasted text into rows of fields.
///
/// Records are split on line breaks outside quotes so a blank line stays a
/// row with one empty field. One trailing line break is ignored.
pub fn parse_rows(text: &str) -> Result<Vec<Vec<String>>, csv::Error> {
    let delimiter = Delimiter::detect(text);
    let mut rows = Vec::new();
    for record in split_records(text) {
        rows.push(parse_record(record, delimiter)?);
    }
    Ok(rows)
}

fn parse_record(record: &str, delimiter: Delimiter) -> Result<Vec<String>, csv::Error> {
    if record.is_empty() {
        return Ok(vec![String::new()]);
    }
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.byte())
        .has_headers(false)
        .flexible(true)
        .from_reader(Cursor::new(record.as_bytes()));

    let mut fields = Vec::new();
    for result in reader.records() {
        let record = result?;
        fields.extend(record.iter().map(|s| s.to_string()));
    }
    if fields.is_empty() {
        fields.push(String::new());
    }
    Ok(fields)
}

/// Split on CRLF/LF outside quoted fields
fn split_records(text: &str) -> Vec<&str> {
    let body = text
        .strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text);
    if body.is_empty() {
        return Vec::new();
    }

    let mut records = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    for (i, ch) in body.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '\n' if !in_quotes => {
                let line = &body[start..i];
                records.push(line.strip_suffix('\r').unwrap_or(line));
                start = i + 1;
            }
            _ => {}
        }
    }
    records.push(&body[start..]);
    records
}
