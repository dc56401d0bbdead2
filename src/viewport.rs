//! Viewport calculations
//!
//! Derives the window of row/column indices eligible for rendering from the
//! scroll offsets, the container size and per-column widths. Rows have a
//! fixed height so their range is arithmetic; columns have variable widths
//! and are found by walking cumulative widths from the first non-frozen
//! column.

use serde::Serialize;

use crate::model::{CellPosition, GridData};
use crate::scroll::ScrollOffsets;

/// Measured size of the grid container
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContainerSize {
    pub width: f32,
    pub height: f32,
}

impl ContainerSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }
}

/// Visible index window, half-open on the high end
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ViewportWindow {
    pub start_row: usize,
    pub end_row: usize,
    pub start_col: usize,
    pub end_col: usize,
}

impl ViewportWindow {
    pub fn is_empty(&self) -> bool {
        self.start_row == self.end_row || self.start_col == self.end_col
    }

    pub fn rows(&self) -> std::ops::Range<usize> {
        self.start_row..self.end_row
    }

    pub fn cols(&self) -> std::ops::Range<usize> {
        self.start_col..self.end_col
    }

    /// Whether a scrollable cell falls inside the window
    pub fn contains(&self, pos: CellPosition) -> bool {
        self.rows().contains(&pos.row) && self.cols().contains(&pos.col)
    }
}

/// Inputs of a visible-range computation
#[derive(Debug, Clone, Copy)]
pub struct RangeParams<'a> {
    pub scroll_top: f32,
    pub scroll_left: f32,
    pub container: ContainerSize,
    pub row_height: f32,
    pub col_widths: &'a [f32],
    pub buffer_rows: usize,
    pub buffer_cols: usize,
    pub frozen_cols: usize,
    pub row_count: usize,
}

/// Compute the visible window.
///
/// Zero rows or columns give an empty window. The result always satisfies
/// `start_row <= end_row <= row_count` and
/// `frozen_cols <= start_col <= end_col <= col_count`, with `frozen_cols`
/// clamped to the column count.
pub fn compute_visible_range(p: &RangeParams<'_>) -> ViewportWindow {
    let col_count = p.col_widths.len();
    let frozen = p.frozen_cols.min(col_count);

    if p.row_count == 0 || col_count == 0 || p.row_height <= 0.0 {
        return ViewportWindow {
            start_row: 0,
            end_row: 0,
            start_col: frozen,
            end_col: frozen,
        };
    }

    let scroll_top = p.scroll_top.max(0.0);
    let first_row = (scroll_top / p.row_height).floor() as usize;
    let start_row = first_row
        .saturating_sub(p.buffer_rows)
        .min(p.row_count);
    let rows_in_view = (p.container.height / p.row_height).ceil() as usize;
    let end_row = start_row
        .saturating_add(rows_in_view)
        .saturating_add(p.buffer_rows.saturating_mul(2))
        .min(p.row_count);

    let (start_col, end_col) = column_range(p, frozen);

    ViewportWindow {
        start_row,
        end_row,
        start_col,
        end_col,
    }
}

fn column_range(p: &RangeParams<'_>, frozen: usize) -> (usize, usize) {
    let col_count = p.col_widths.len();
    let scroll_left = p.scroll_left.max(0.0);
    let right_edge = scroll_left + p.container.width;

    // First column whose right edge passes the left scroll offset
    let mut cumulative = 0.0;
    let mut col = frozen;
    while col < col_count && cumulative + p.col_widths[col] <= scroll_left {
        cumulative += p.col_widths[col];
        col += 1;
    }
    let first_visible = col;

    // Continue until the cumulative width covers the container
    while col < col_count && cumulative < right_edge {
        cumulative += p.col_widths[col];
        col += 1;
    }
    let end_visible = col;

    let start_col = first_visible.saturating_sub(p.buffer_cols).max(frozen);
    let end_col = end_visible
        .saturating_add(p.buffer_cols)
        .min(col_count)
        .max(start_col);
    (start_col, end_col)
}

/// Pixel geometry derived from a data snapshot and the config
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridGeometry {
    pub row_height: f32,
    pub header_height: f32,
    pub col_widths: Vec<f32>,
    pub frozen_cols: usize,
    pub row_count: usize,
}

impl GridGeometry {
    pub fn new(data: &GridData, row_height: f32, header_height: f32, default_width: f32) -> Self {
        let col_widths = data.column_widths(default_width);
        Self {
            row_height,
            header_height,
            frozen_cols: data.frozen_column_count().min(col_widths.len()),
            col_widths,
            row_count: data.row_count(),
        }
    }

    pub fn col_count(&self) -> usize {
        self.col_widths.len()
    }

    pub fn total_height(&self) -> f32 {
        self.row_count as f32 * self.row_height
    }

    /// Width of the frozen column pane
    pub fn frozen_width(&self) -> f32 {
        self.col_widths.iter().take(self.frozen_cols).sum()
    }

    /// Width of all non-frozen columns
    pub fn scrollable_width(&self) -> f32 {
        self.col_widths.iter().skip(self.frozen_cols).sum()
    }

    /// Left edge of a non-frozen column within the scrollable content
    pub fn column_offset(&self, col: usize) -> f32 {
        self.col_widths
            .iter()
            .take(col)
            .skip(self.frozen_cols)
            .sum()
    }

    pub fn row_offset(&self, row: usize) -> f32 {
        row as f32 * self.row_height
    }

    /// Visible size of the main pane once the header band and the frozen
    /// column pane are taken out
    pub fn body_size(&self, container: ContainerSize) -> ContainerSize {
        ContainerSize::new(
            container.width - self.frozen_width(),
            container.height - self.header_height,
        )
    }

    /// Largest valid scroll offsets for a container
    pub fn max_scroll(&self, container: ContainerSize) -> ScrollOffsets {
        let body = self.body_size(container);
        ScrollOffsets {
            top: (self.total_height() - body.height).max(0.0),
            left: (self.scrollable_width() - body.width).max(0.0),
        }
    }
}

/// Viewport state for the grid
#[derive(Debug, Clone, Default)]
pub struct ViewportModel {
    container: Option<ContainerSize>,
    window: ViewportWindow,
    buffer_rows: usize,
    buffer_cols: usize,
}

impl ViewportModel {
    pub fn new(buffer_rows: usize, buffer_cols: usize) -> Self {
        Self {
            container: None,
            window: ViewportWindow::default(),
            buffer_rows,
            buffer_cols,
        }
    }

    pub fn container(&self) -> Option<ContainerSize> {
        self.container
    }

    pub fn is_measured(&self) -> bool {
        self.container.is_some()
    }

    pub fn set_container(&mut self, size: ContainerSize) {
        self.container = Some(size);
    }

    pub fn window(&self) -> ViewportWindow {
        self.window
    }

    /// Recompute the window. No-op until the container has been measured.
    /// Returns whether the window changed.
    pub fn recompute(&mut self, offsets: ScrollOffsets, geometry: &GridGeometry) -> bool {
        let Some(container) = self.container else {
            return false;
        };
        let window = compute_visible_range(&RangeParams {
            scroll_top: offsets.top,
            scroll_left: offsets.left,
            container: geometry.body_size(container),
            row_height: geometry.row_height,
            col_widths: &geometry.col_widths,
            buffer_rows: self.buffer_rows,
            buffer_cols: self.buffer_cols,
            frozen_cols: geometry.frozen_cols,
            row_count: geometry.row_count,
        });
        if window == self.window {
            return false;
        }
        tracing::trace!(?window, "viewport window changed");
        self.window = window;
        true
    }
}
