//! Selection model
//!
//! A set of selected cells plus the anchor used by range gestures. Full rows
//! and full columns are derived from the set and only rewritten when they
//! actually change, so readers can cache on `derived_revision()`.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::time::{Duration, Instant};

use crate::error::{GridError, Result};
use crate::model::{CellPosition, CellRect, GridBounds};
use crate::schedule::Throttle;

/// How a row/column header pick combines with the existing selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SelectMode {
    /// Selection becomes exactly the picked line
    Replace,
    /// Toggle membership of the picked line
    Additive,
    /// Every line between the previous pick and this one
    Range,
}

/// Compact description of a selection handed to the host on change
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SelectionSummary {
    pub len: usize,
    pub anchor: Option<CellPosition>,
    pub bounds: Option<CellRect>,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    cells: BTreeSet<CellPosition>,
    anchor: Option<CellPosition>,
    /// Moving end of a keyboard-extended range
    head: Option<CellPosition>,
    last_row_pick: Option<usize>,
    last_col_pick: Option<usize>,
    full_rows: Vec<usize>,
    full_cols: Vec<usize>,
    derived_revision: u64,
    revision: u64,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, pos: CellPosition) -> bool {
        self.cells.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn anchor(&self) -> Option<CellPosition> {
        self.anchor
    }

    /// End of the range that keyboard extension moves
    pub fn head(&self) -> Option<CellPosition> {
        self.head.or(self.anchor)
    }

    /// Selected cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = CellPosition> + '_ {
        self.cells.iter().copied()
    }

    /// Smallest rectangle containing every selected cell
    pub fn bounding_rect(&self) -> Option<CellRect> {
        let first = *self.cells.first()?;
        let last = *self.cells.last()?;
        let (min_col, max_col) = self
            .cells
            .iter()
            .fold((usize::MAX, 0), |(lo, hi), p| (lo.min(p.col), hi.max(p.col)));
        Some(CellRect {
            min_row: first.row,
            min_col,
            max_row: last.row,
            max_col,
        })
    }

    pub fn summary(&self) -> SelectionSummary {
        SelectionSummary {
            len: self.len(),
            anchor: self.anchor,
            bounds: self.bounding_rect(),
        }
    }

    /// Rows whose every cell is selected
    pub fn selected_rows(&self) -> &[usize] {
        &self.full_rows
    }

    /// Columns whose every cell is selected
    pub fn selected_columns(&self) -> &[usize] {
        &self.full_cols
    }

    /// Bumped whenever the selected set or the anchor changes
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Bumped only when the derived rows or columns change value
    pub fn derived_revision(&self) -> u64 {
        self.derived_revision
    }

    pub fn select_single(&mut self, pos: CellPosition, bounds: GridBounds) -> Result<()> {
        check(pos, bounds)?;
        self.set_cells(BTreeSet::from([pos]), bounds);
        self.set_anchor(pos);
        self.head = None;
        Ok(())
    }

    /// Add or remove one cell; the cell becomes the anchor either way
    pub fn toggle(&mut self, pos: CellPosition, bounds: GridBounds) -> Result<()> {
        check(pos, bounds)?;
        let mut cells = self.cells.clone();
        if !cells.remove(&pos) {
            cells.insert(pos);
        }
        self.set_cells(cells, bounds);
        self.set_anchor(pos);
        self.head = None;
        Ok(())
    }

    /// Select the rectangle spanned by `a` and `b`. The anchor is not touched.
    pub fn select_range(&mut self, a: CellPosition, b: CellPosition, bounds: GridBounds) -> Result<()> {
        check(a, bounds)?;
        check(b, bounds)?;
        let cells = CellRect::from_corners(a, b).positions().collect();
        self.set_cells(cells, bounds);
        Ok(())
    }

    /// Keyboard extension: range from the anchor to `head`
    pub fn extend_to(&mut self, head: CellPosition, bounds: GridBounds) -> Result<()> {
        let anchor = self.anchor.unwrap_or(head);
        self.select_range(anchor, head, bounds)?;
        self.set_anchor(anchor);
        self.head = Some(head);
        Ok(())
    }

    pub fn select_row(&mut self, row: usize, mode: SelectMode, bounds: GridBounds) -> Result<()> {
        check(CellPosition::new(row, 0), bounds)?;
        let line = |r: usize| (0..bounds.cols).map(move |c| CellPosition::new(r, c));

        let cells = match (mode, self.last_row_pick) {
            (SelectMode::Range, Some(prev)) => {
                let (lo, hi) = (prev.min(row), prev.max(row));
                (lo..=hi).flat_map(line).collect()
            }
            (SelectMode::Additive, _) => {
                let mut cells = self.cells.clone();
                if line(row).all(|p| cells.contains(&p)) {
                    line(row).for_each(|p| {
                        cells.remove(&p);
                    });
                } else {
                    cells.extend(line(row));
                }
                cells
            }
            _ => line(row).collect(),
        };

        self.set_cells(cells, bounds);
        if mode != SelectMode::Range || self.anchor.is_none() {
            self.set_anchor(CellPosition::new(row, 0));
        }
        self.head = None;
        self.last_row_pick = Some(row);
        Ok(())
    }

    pub fn select_column(&mut self, col: usize, mode: SelectMode, bounds: GridBounds) -> Result<()> {
        check(CellPosition::new(0, col), bounds)?;
        let line = |c: usize| (0..bounds.rows).map(move |r| CellPosition::new(r, c));

        let cells = match (mode, self.last_col_pick) {
            (SelectMode::Range, Some(prev)) => {
                let (lo, hi) = (prev.min(col), prev.max(col));
                (lo..=hi).flat_map(line).collect()
            }
            (SelectMode::Additive, _) => {
                let mut cells = self.cells.clone();
                if line(col).all(|p| cells.contains(&p)) {
                    line(col).for_each(|p| {
                        cells.remove(&p);
                    });
                } else {
                    cells.extend(line(col));
                }
                cells
            }
            _ => line(col).collect(),
        };

        self.set_cells(cells, bounds);
        if mode != SelectMode::Range || self.anchor.is_none() {
            self.set_anchor(CellPosition::new(0, col));
        }
        self.head = None;
        self.last_col_pick = Some(col);
        Ok(())
    }

    pub fn select_all(&mut self, bounds: GridBounds) {
        let Some(last) = bounds.last() else {
            return;
        };
        let cells = CellRect::from_corners(CellPosition::default(), last)
            .positions()
            .collect();
        self.set_cells(cells, bounds);
        if self.anchor.is_none() {
            self.set_anchor(CellPosition::default());
        }
        self.head = None;
    }

    /// Select exactly a rectangle, anchoring at its top-left
    pub fn select_rect(&mut self, rect: CellRect, bounds: GridBounds) -> Result<()> {
        check(CellPosition::new(rect.max_row, rect.max_col), bounds)?;
        self.set_cells(rect.positions().collect(), bounds);
        self.set_anchor(rect.top_left());
        self.head = None;
        Ok(())
    }

    pub fn clear(&mut self) {
        if !self.cells.is_empty() || self.anchor.is_some() {
            self.revision += 1;
        }
        self.cells.clear();
        self.anchor = None;
        self.head = None;
        self.last_row_pick = None;
        self.last_col_pick = None;
        self.refresh_derived(GridBounds::default());
    }

    /// Drop everything that no longer fits after the data shrank.
    /// Returns whether the selection was cleared.
    pub fn revalidate(&mut self, bounds: GridBounds) -> bool {
        let fits = self.cells.iter().all(|p| bounds.contains(*p))
            && self.anchor.map_or(true, |a| bounds.contains(a));
        if fits {
            self.refresh_derived(bounds);
            return false;
        }
        self.clear();
        true
    }

    fn set_anchor(&mut self, anchor: CellPosition) {
        if self.anchor != Some(anchor) {
            self.anchor = Some(anchor);
            self.revision += 1;
        }
    }

    fn set_cells(&mut self, cells: BTreeSet<CellPosition>, bounds: GridBounds) {
        if cells == self.cells {
            return;
        }
        self.revision += 1;
        self.cells = cells;
        self.refresh_derived(bounds);
    }

    fn refresh_derived(&mut self, bounds: GridBounds) {
        let mut per_row: BTreeMap<usize, usize> = BTreeMap::new();
        let mut per_col: BTreeMap<usize, usize> = BTreeMap::new();
        for p in &self.cells {
            *per_row.entry(p.row).or_default() += 1;
            *per_col.entry(p.col).or_default() += 1;
        }
        let full_rows: Vec<usize> = per_row
            .into_iter()
            .filter(|&(_, n)| bounds.cols > 0 && n == bounds.cols)
            .map(|(r, _)| r)
            .collect();
        let full_cols: Vec<usize> = per_col
            .into_iter()
            .filter(|&(_, n)| bounds.rows > 0 && n == bounds.rows)
            .map(|(c, _)| c)
            .collect();

        if full_rows != self.full_rows || full_cols != self.full_cols {
            self.full_rows = full_rows;
            self.full_cols = full_cols;
            self.derived_revision += 1;
        }
    }
}

fn check(pos: CellPosition, bounds: GridBounds) -> Result<()> {
    if bounds.contains(pos) {
        Ok(())
    } else {
        Err(GridError::invalid(pos))
    }
}

/// An in-progress drag selection
#[derive(Debug, Clone)]
pub struct DragSelect {
    anchor: CellPosition,
    throttle: Throttle<CellPosition>,
    flush_scheduled: bool,
}

impl DragSelect {
    pub fn new(anchor: CellPosition, interval: Duration) -> Self {
        Self {
            anchor,
            throttle: Throttle::new(interval),
            flush_scheduled: false,
        }
    }

    pub fn anchor(&self) -> CellPosition {
        self.anchor
    }

    /// Offer a hovered cell. Returns the cell when the range may be
    /// recomputed now.
    pub fn hover(&mut self, pos: CellPosition, at: Instant) -> Option<CellPosition> {
        self.throttle.offer(pos, at)
    }

    /// Delay before a trailing hover can be flushed, if a flush timer is
    /// still needed
    pub fn flush_delay(&mut self, at: Instant) -> Option<Duration> {
        if self.flush_scheduled || !self.throttle.has_pending() {
            return None;
        }
        self.flush_scheduled = true;
        Some(self.throttle.remaining(at))
    }

    /// Take the trailing hover when its flush timer fires
    pub fn flush(&mut self, at: Instant) -> Option<CellPosition> {
        self.flush_scheduled = false;
        self.throttle.flush(at)
    }
}
