//! Cell-level value and coordinate types

use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar cell value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    /// Display string used for copy, search and edit seeding
    pub fn display(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Convert user-entered text into a value, using the value it replaces as
    /// a type hint.
    ///
    /// - a numeric string over a `Number` stays a `Number`
    /// - an empty string over a `Text` stays an empty `Text`, otherwise `Empty`
    /// - everything else becomes `Text`
    pub fn from_input(input: &str, replacing: Option<&CellValue>) -> Self {
        if input.is_empty() {
            return match replacing {
                Some(CellValue::Text(_)) => CellValue::Text(String::new()),
                _ => CellValue::Empty,
            };
        }
        if let Some(CellValue::Number(_)) = replacing {
            if let Ok(n) = input.parse::<f64>() {
                if n.is_finite() {
                    return CellValue::Number(n);
                }
            }
        }
        CellValue::Text(input.to_string())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// Zero-based cell coordinate. Ordering is row-major.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CellPosition {
    pub row: usize,
    pub col: usize,
}

impl CellPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for CellPosition {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// Inclusive rectangle of cell indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRect {
    pub min_row: usize,
    pub min_col: usize,
    pub max_row: usize,
    pub max_col: usize,
}

impl CellRect {
    /// Rectangle spanned by two corners, in either order
    pub fn from_corners(a: CellPosition, b: CellPosition) -> Self {
        Self {
            min_row: a.row.min(b.row),
            min_col: a.col.min(b.col),
            max_row: a.row.max(b.row),
            max_col: a.col.max(b.col),
        }
    }

    pub fn top_left(&self) -> CellPosition {
        CellPosition::new(self.min_row, self.min_col)
    }

    pub fn height(&self) -> usize {
        self.max_row - self.min_row + 1
    }

    pub fn width(&self) -> usize {
        self.max_col - self.min_col + 1
    }

    pub fn cell_count(&self) -> usize {
        self.height() * self.width()
    }

    pub fn contains(&self, pos: CellPosition) -> bool {
        pos.row >= self.min_row
            && pos.row <= self.max_row
            && pos.col >= self.min_col
            && pos.col <= self.max_col
    }

    /// Row-major iterator over every position in the rectangle
    pub fn positions(&self) -> impl Iterator<Item = CellPosition> {
        let (min_col, max_col) = (self.min_col, self.max_col);
        (self.min_row..=self.max_row)
            .flat_map(move |row| (min_col..=max_col).map(move |col| CellPosition::new(row, col)))
    }
}
