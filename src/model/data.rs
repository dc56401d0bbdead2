//! Host-owned grid data snapshots
//!
//! The engine only ever reads a `GridData` and builds new ones. Both vectors
//! sit behind `Arc`, so a renderer holding the previous snapshot keeps seeing
//! exactly what it started reading while an edit produces the next one.

use serde::{Deserialize, Serialize};
use std::io;
use std::sync::Arc;

use super::cell::{CellPosition, CellValue};

/// A single record. May be shorter than the column count; positions past the
/// end are undefined cells.
pub type Row = Vec<CellValue>;

/// Column description supplied by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub field_id: String,
    pub header: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default)]
    pub frozen: bool,
}

impl ColumnSpec {
    pub fn new(field_id: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            header: header.into(),
            width: None,
            frozen: false,
        }
    }

    /// Column created by growing the grid, named by its 1-based position
    pub fn positional(index: usize) -> Self {
        let name = format!("Column {}", index + 1);
        Self::new(name.clone(), name)
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn frozen(mut self) -> Self {
        self.frozen = true;
        self
    }
}

/// Row and column counts of a snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GridBounds {
    pub rows: usize,
    pub cols: usize,
}

impl GridBounds {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn contains(&self, pos: CellPosition) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Bottom-right cell, if any
    pub fn last(&self) -> Option<CellPosition> {
        if self.is_empty() {
            None
        } else {
            Some(CellPosition::new(self.rows - 1, self.cols - 1))
        }
    }

    /// Clamp a position into the grid. `None` for an empty grid.
    pub fn clamp(&self, pos: CellPosition) -> Option<CellPosition> {
        let last = self.last()?;
        Some(CellPosition::new(pos.row.min(last.row), pos.col.min(last.col)))
    }
}

/// Immutable snapshot of rows and columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridData {
    rows: Arc<Vec<Row>>,
    columns: Arc<Vec<ColumnSpec>>,
}

impl GridData {
    pub fn new(rows: Vec<Row>, columns: Vec<ColumnSpec>) -> Self {
        Self {
            rows: Arc::new(rows),
            columns: Arc::new(columns),
        }
    }

    pub fn from_shared(rows: Arc<Vec<Row>>, columns: Arc<Vec<ColumnSpec>>) -> Self {
        Self { rows, columns }
    }

    /// Build a snapshot from string records, one column per header
    pub fn from_strings(headers: &[&str], records: &[Vec<&str>]) -> Self {
        let columns = headers
            .iter()
            .map(|h| ColumnSpec::new(h.to_lowercase().replace(' ', "_"), *h))
            .collect();
        let rows = records
            .iter()
            .map(|r| r.iter().map(|s| CellValue::from(*s)).collect())
            .collect();
        Self::new(rows, columns)
    }

    /// Read a delimited file whose first record is the header row.
    ///
    /// Fields that parse as finite numbers become `Number`, empty fields
    /// `Empty`, everything else `Text`. Ragged records are kept as-is.
    pub fn from_csv_reader<R: io::Read>(reader: R, delimiter: u8) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(reader);

        let columns = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                if h.is_empty() {
                    ColumnSpec::positional(i)
                } else {
                    ColumnSpec::new(h, h)
                }
            })
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(parse_field).collect());
        }
        Ok(Self::new(rows, columns))
    }

    pub fn rows(&self) -> &Arc<Vec<Row>> {
        &self.rows
    }

    pub fn columns(&self) -> &Arc<Vec<ColumnSpec>> {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    /// Number of leading columns marked frozen
    pub fn frozen_column_count(&self) -> usize {
        self.columns.iter().take_while(|c| c.frozen).count()
    }

    pub fn bounds(&self) -> GridBounds {
        GridBounds::new(self.row_count(), self.column_count())
    }

    pub fn contains(&self, pos: CellPosition) -> bool {
        self.bounds().contains(pos)
    }

    /// Cell value, or `None` for an undefined cell
    pub fn get(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row)?.get(col)
    }

    pub fn get_by_field(&self, row: usize, field_id: &str) -> Option<&CellValue> {
        let col = self.columns.iter().position(|c| c.field_id == field_id)?;
        self.get(row, col)
    }

    /// Display text of a cell; undefined cells display as empty
    pub fn display(&self, row: usize, col: usize) -> String {
        self.get(row, col).map(CellValue::display).unwrap_or_default()
    }

    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.header.clone()).collect()
    }

    /// Pixel widths per column, falling back to `default_width`
    pub fn column_widths(&self, default_width: f32) -> Vec<f32> {
        self.columns
            .iter()
            .map(|c| c.width.unwrap_or(default_width).max(0.0))
            .collect()
    }

    /// New snapshot with replaced rows, sharing the column list
    pub fn with_rows(&self, rows: Vec<Row>) -> Self {
        Self {
            rows: Arc::new(rows),
            columns: Arc::clone(&self.columns),
        }
    }

    /// New snapshot with replaced columns, sharing the rows
    pub fn with_columns(&self, columns: Vec<ColumnSpec>) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
            columns: Arc::new(columns),
        }
    }

    /// Owned copy of the rows, the starting point of every copy-on-write change
    pub fn rows_to_vec(&self) -> Vec<Row> {
        self.rows.as_ref().clone()
    }

    /// Owned copy of the columns
    pub fn columns_to_vec(&self) -> Vec<ColumnSpec> {
        self.columns.as_ref().clone()
    }

    /// Whether two snapshots share the same underlying vectors
    pub fn ptr_eq(&self, other: &GridData) -> bool {
        Arc::ptr_eq(&self.rows, &other.rows) && Arc::ptr_eq(&self.columns, &other.columns)
    }
}

fn parse_field(field: &str) -> CellValue {
    if field.is_empty() {
        return CellValue::Empty;
    }
    match field.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => CellValue::Number(n),
        _ => CellValue::Text(field.to_string()),
    }
}

/// Write a value into an owned row list, padding short rows with `Empty`.
/// Rows past the end of `rows` are ignored.
pub(crate) fn write_cell(rows: &mut [Row], pos: CellPosition, value: CellValue) {
    let Some(row) = rows.get_mut(pos.row) else {
        return;
    };
    if row.len() <= pos.col {
        row.resize(pos.col + 1, CellValue::Empty);
    }
    row[pos.col] = value;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GridData {
        GridData::from_strings(
            &["Name", "Age"],
            &[vec!["Alice", "30"], vec!["Bob"]],
        )
    }

    #[test]
    fn test_counts_and_get() {
        let data = sample();
        assert_eq!(data.row_count(), 2);
        assert_eq!(data.column_count(), 2);
        assert_eq!(data.get(0, 1), Some(&CellValue::text("30")));
        assert_eq!(data.get(1, 1), None);
        assert_eq!(data.display(1, 1), "");
        assert_eq!(data.get(9, 0), None);
    }

    #[test]
    fn test_get_by_field() {
        let data = sample();
        assert_eq!(data.get_by_field(0, "age"), Some(&CellValue::text("30")));
        assert_eq!(data.get_by_field(0, "missing"), None);
    }

    #[test]
    fn test_frozen_column_count_only_counts_leading_run() {
        let data = GridData::new(
            vec![],
            vec![
                ColumnSpec::new("a", "A").frozen(),
                ColumnSpec::new("b", "B").frozen(),
                ColumnSpec::new("c", "C"),
                ColumnSpec::new("d", "D").frozen(),
            ],
        );
        assert_eq!(data.frozen_column_count(), 2);
    }

    #[test]
    fn test_with_rows_leaves_original_untouched() {
        let data = sample();
        let mut rows = data.rows_to_vec();
        write_cell(&mut rows, CellPosition::new(1, 1), CellValue::text("41"));
        let next = data.with_rows(rows);

        assert_eq!(data.display(1, 1), "");
        assert_eq!(next.display(1, 1), "41");
        assert!(Arc::ptr_eq(data.columns(), next.columns()));
        assert!(!data.ptr_eq(&next));
    }

    #[test]
    fn test_from_csv_reader_types_fields() {
        let text = "id,name,\n1,Ann,x\n2.5,,\n3\n";
        let data = GridData::from_csv_reader(text.as_bytes(), b',').unwrap();
        assert_eq!(data.headers(), vec!["id", "name", "Column 3"]);
        assert_eq!(data.row_count(), 3);
        assert_eq!(data.get(0, 0), Some(&CellValue::Number(1.0)));
        assert_eq!(data.get(0, 1), Some(&CellValue::text("Ann")));
        assert_eq!(data.get(1, 1), Some(&CellValue::Empty));
        assert_eq!(data.get(2, 1), None);
    }

    #[test]
    fn test_positional_column_name() {
        let col = ColumnSpec::positional(2);
        assert_eq!(col.header, "Column 3");
    }

    #[test]
    fn test_column_widths_default() {
        let data = GridData::new(
            vec![],
            vec![ColumnSpec::new("a", "A").with_width(80.0), ColumnSpec::new("b", "B")],
        );
        assert_eq!(data.column_widths(120.0), vec![80.0, 120.0]);
    }
}
