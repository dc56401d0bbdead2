//! Find and replace over cell text
//!
//! Matching is substring-based on display text. Find walks row-major from
//! the cell after the start position and wraps around; replace only touches
//! text cells.

use crate::model::{data::write_cell, CellPosition, CellValue, GridData};

/// Byte range of the first match of `query` in `haystack` at or after `from`
fn find_in(haystack: &str, query: &str, case_sensitive: bool, from: usize) -> Option<(usize, usize)> {
    if query.is_empty() {
        return None;
    }
    if case_sensitive {
        return haystack[from..]
            .find(query)
            .map(|i| (from + i, from + i + query.len()));
    }
    haystack[from..].char_indices().find_map(|(i, _)| {
        let start = from + i;
        match_len_ignore_case(&haystack[start..], query).map(|len| (start, start + len))
    })
}

/// Length in bytes of a case-insensitive prefix match of `query`
fn match_len_ignore_case(text: &str, query: &str) -> Option<usize> {
    let mut consumed = 0;
    let mut chars = text.chars();
    for q in query.chars() {
        let t = chars.next()?;
        if !t.to_lowercase().eq(q.to_lowercase()) {
            return None;
        }
        consumed += t.len_utf8();
    }
    Some(consumed)
}

pub fn cell_matches(value: &CellValue, query: &str, case_sensitive: bool) -> bool {
    find_in(&value.display(), query, case_sensitive, 0).is_some()
}

/// Next matching cell strictly after `after` in row-major order, wrapping
/// back to the start. With no start position the search begins at (0, 0).
/// The start cell itself is checked last.
pub fn find_next(
    data: &GridData,
    after: Option<CellPosition>,
    query: &str,
    case_sensitive: bool,
) -> Option<CellPosition> {
    let cols = data.column_count();
    let total = data.row_count() * cols;
    if total == 0 || query.is_empty() {
        return None;
    }

    let first = match after {
        Some(pos) => (pos.row * cols + pos.col + 1) % total,
        None => 0,
    };
    (0..total)
        .map(|step| (first + step) % total)
        .map(|i| CellPosition::new(i / cols, i % cols))
        .find(|pos| {
            data.get(pos.row, pos.col)
                .is_some_and(|v| cell_matches(v, query, case_sensitive))
        })
}

/// Replace every occurrence of `query` in text cells. Returns the new
/// snapshot and the number of replaced occurrences, or `None` when nothing
/// matched.
pub fn replace_all(
    data: &GridData,
    query: &str,
    replacement: &str,
    case_sensitive: bool,
) -> Option<(GridData, usize)> {
    if query.is_empty() {
        return None;
    }

    let mut changes = Vec::new();
    let mut count = 0;
    for (r, row) in data.rows().iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            let Some(text) = value.as_text() else {
                continue;
            };
            let (replaced, n) = replace_in(text, query, replacement, case_sensitive);
            if n > 0 {
                count += n;
                changes.push((CellPosition::new(r, c), replaced));
            }
        }
    }
    if changes.is_empty() {
        return None;
    }

    let mut rows = data.rows_to_vec();
    for (pos, text) in changes {
        write_cell(&mut rows, pos, CellValue::Text(text));
    }
    tracing::debug!(count, "replaced occurrences");
    Some((data.with_rows(rows), count))
}

fn replace_in(text: &str, query: &str, replacement: &str, case_sensitive: bool) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    let mut count = 0;
    while let Some((start, end)) = find_in(text, query, case_sensitive, pos) {
        out.push_str(&text[pos..start]);
        out.push_str(replacement);
        pos = end;
        count += 1;
    }
    out.push_str(&text[pos..]);
    (out, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> GridData {
        GridData::from_strings(
            &["A", "B"],
            &[vec!["apple", "Banana"], vec!["cherry", "banana split"]],
        )
    }

    #[test]
    fn test_find_next_wraps() {
        let data = data();
        let first = find_next(&data, None, "banana", false);
        assert_eq!(first, Some(CellPosition::new(0, 1)));
        let second = find_next(&data, first, "banana", false);
        assert_eq!(second, Some(CellPosition::new(1, 1)));
        let wrapped = find_next(&data, second, "banana", false);
        assert_eq!(wrapped, Some(CellPosition::new(0, 1)));
    }

    #[test]
    fn test_find_case_sensitive() {
        let data = data();
        assert_eq!(
            find_next(&data, None, "Banana", true),
            Some(CellPosition::new(0, 1))
        );
        assert_eq!(
            find_next(&data, Some(CellPosition::new(0, 1)), "Banana", true),
            Some(CellPosition::new(0, 1))
        );
        assert_eq!(find_next(&data, None, "kiwi", false), None);
    }

    #[test]
    fn test_replace_all_counts_occurrences() {
        let data = data();
        let (next, count) = replace_all(&data, "an", "AN", true).unwrap();
        assert_eq!(count, 4);
        assert_eq!(next.display(0, 1), "BANANa");
        assert_eq!(next.display(1, 1), "bANANa split");
        assert_eq!(data.display(0, 1), "Banana");
    }

    #[test]
    fn test_replace_ignore_case_skips_numbers() {
        let mut rows = data().rows_to_vec();
        rows[0][0] = CellValue::Number(11.0);
        let data = data().with_rows(rows);
        let (next, count) = replace_all(&data, "1", "x", false).unwrap_or((data.clone(), 0));
        assert_eq!(count, 0);
        assert_eq!(next.get(0, 0), Some(&CellValue::Number(11.0)));

        let (next, count) = replace_all(&data, "BANANA", "kiwi", false).unwrap();
        assert_eq!(count, 2);
        assert_eq!(next.display(1, 1), "kiwi split");
    }
}
