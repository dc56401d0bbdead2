//! Grid model - the complete state of one grid instance
//!
//! This module contains the state types following the Elm Architecture
//! pattern. The host owns the data; the model holds the latest snapshot it
//! was given (or emitted) plus all engine state derived from it.

pub mod cell;
pub mod data;

pub use cell::{CellPosition, CellRect, CellValue};
pub use data::{ColumnSpec, GridBounds, GridData, Row};

use crate::commands::Cmd;
use crate::config::GridConfig;
use crate::edit::EditSession;
use crate::scroll::{reveal_offsets, ScrollCoordinator, ScrollOffsets};
use crate::selection::{DragSelect, SelectionModel};
use crate::viewport::{ContainerSize, GridGeometry, ViewportModel, ViewportWindow};

/// What adopting a new snapshot invalidated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DataChange {
    pub selection_cleared: bool,
    pub edit_discarded: bool,
    pub window_changed: bool,
}

/// The complete grid model
#[derive(Debug, Clone)]
pub struct GridModel {
    /// Latest data snapshot
    pub data: GridData,
    pub config: GridConfig,
    pub viewport: ViewportModel,
    pub scroll: ScrollCoordinator,
    pub selection: SelectionModel,
    /// Open drag selection, if the primary button is held
    pub drag: Option<DragSelect>,
    pub edit: EditSession,
    /// Advisory flag for the host's loading indicator
    pub processing: bool,
    geometry: GridGeometry,
}

impl GridModel {
    pub fn new(config: GridConfig) -> Self {
        Self::with_data(GridData::default(), config)
    }

    pub fn with_data(data: GridData, config: GridConfig) -> Self {
        let geometry = GridGeometry::new(
            &data,
            config.row_height,
            config.header_height,
            config.default_col_width,
        );
        Self {
            viewport: ViewportModel::new(config.buffer_rows, config.buffer_cols),
            scroll: ScrollCoordinator::new(config.scroll_quiet()),
            selection: SelectionModel::new(),
            drag: None,
            edit: EditSession::Idle,
            processing: false,
            geometry,
            data,
            config,
        }
    }

    pub fn window(&self) -> ViewportWindow {
        self.viewport.window()
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    pub fn edit(&self) -> &EditSession {
        &self.edit
    }

    pub fn processing(&self) -> bool {
        self.processing
    }

    pub fn scroll(&self) -> &ScrollCoordinator {
        &self.scroll
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn bounds(&self) -> GridBounds {
        self.data.bounds()
    }

    /// Largest valid scroll offsets; zero until the container is measured
    pub fn max_scroll(&self) -> ScrollOffsets {
        self.viewport
            .container()
            .map(|c| self.geometry.max_scroll(c))
            .unwrap_or_default()
    }

    pub fn should_render_cell_content(&self) -> bool {
        self.scroll
            .should_render_cell_content(self.data.row_count(), self.config.large_dataset_rows)
    }

    /// Recompute the visible window from the current offsets
    pub fn recompute_window(&mut self) -> bool {
        self.viewport.recompute(self.scroll.offsets(), &self.geometry)
    }

    /// Store a measured container size and re-derive scroll and window
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        self.viewport.set_container(ContainerSize::new(width, height));
        self.scroll.clamp_to(self.max_scroll());
        self.recompute_window()
    }

    /// Adopt a snapshot, re-deriving everything that depends on its shape
    pub fn adopt_data(&mut self, data: GridData) -> DataChange {
        let bounds = data.bounds();
        self.geometry = GridGeometry::new(
            &data,
            self.config.row_height,
            self.config.header_height,
            self.config.default_col_width,
        );
        self.data = data;

        let selection_cleared = self.selection.revalidate(bounds);

        let edit_discarded = !self.edit.fits(bounds);
        if edit_discarded {
            tracing::warn!(edit = ?self.edit, "discarding edit outside the new data");
            self.edit = EditSession::Idle;
        }

        if self
            .drag
            .as_ref()
            .is_some_and(|d| !bounds.contains(d.anchor()))
        {
            self.drag = None;
        }

        self.scroll.clamp_to(self.max_scroll());
        let window_changed = self.recompute_window();

        DataChange {
            selection_cleared,
            edit_discarded,
            window_changed,
        }
    }

    /// Scroll the minimal amount that brings a cell fully into view.
    ///
    /// Out-of-range targets are clamped into the grid. Offsets are applied
    /// immediately; `smooth` only tells the host whether to animate.
    pub fn scroll_to_cell(&mut self, row: usize, col: usize, smooth: bool) -> Option<Cmd> {
        let target = self.bounds().clamp(CellPosition::new(row, col))?;
        let container = self.viewport.container()?;
        let offsets = reveal_offsets(self.scroll.offsets(), &self.geometry, container, target)?;
        self.scroll.set_offsets(offsets, self.max_scroll());
        self.recompute_window();
        Some(Cmd::ScrollTo {
            offsets: self.scroll.offsets(),
            smooth,
        })
    }
}

impl Default for GridModel {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}
