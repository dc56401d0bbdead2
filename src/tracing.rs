//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging
//! selection, edit and scroll state transitions.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=grid=debug,message=debug` - scoped filtering
//! - `RUST_LOG=sheetgrid::update=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/sheetgrid/logs/sheetgrid.log` with daily
//! rotation. File logging uses debug level by default.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::edit::EditTarget;
use crate::model::{CellPosition, GridModel};
use crate::viewport::ViewportWindow;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG and defaults to `warn`. A host that
/// installs its own subscriber should not call this.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "sheetgrid.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    // try_init: embedding hosts may already have a subscriber
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of interaction state for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct GridSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub selection_len: usize,
    pub anchor: Option<CellPosition>,
    pub edit_target: Option<EditTarget>,
    pub draft_len: usize,
    pub processing: bool,
    pub window: ViewportWindow,
}

impl GridSnapshot {
    pub fn from_model(model: &GridModel) -> Self {
        Self {
            rows: model.data.row_count(),
            cols: model.data.column_count(),
            selection_len: model.selection.len(),
            anchor: model.selection.anchor(),
            edit_target: model.edit.target(),
            draft_len: model.edit.draft().map_or(0, str::len),
            processing: model.processing,
            window: model.window(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &GridSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if (self.rows, self.cols) != (other.rows, other.cols) {
            changes.push(format!(
                "data: {}x{} → {}x{}",
                self.rows, self.cols, other.rows, other.cols
            ));
        }
        if self.selection_len != other.selection_len || self.anchor != other.anchor {
            changes.push(format!(
                "selection: {} @ {} → {} @ {}",
                self.selection_len,
                fmt_pos(self.anchor),
                other.selection_len,
                fmt_pos(other.anchor)
            ));
        }
        if self.edit_target != other.edit_target {
            changes.push(format!(
                "edit: {} → {}",
                fmt_target(self.edit_target),
                fmt_target(other.edit_target)
            ));
        } else if self.draft_len != other.draft_len {
            changes.push(format!("draft: {} → {} bytes", self.draft_len, other.draft_len));
        }
        if self.processing != other.processing {
            changes.push(format!("processing: {}", other.processing));
        }
        if self.window != other.window {
            let w = other.window;
            changes.push(format!(
                "window: rows {}..{} cols {}..{}",
                w.start_row, w.end_row, w.start_col, w.end_col
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

fn fmt_pos(pos: Option<CellPosition>) -> String {
    pos.map_or_else(|| "-".to_string(), |p| format!("({},{})", p.row, p.col))
}

fn fmt_target(target: Option<EditTarget>) -> String {
    match target {
        None => "idle".to_string(),
        Some(EditTarget::Cell(p)) => format!("cell ({},{})", p.row, p.col),
        Some(EditTarget::Header(col)) => format!("header {}", col),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use crate::model::GridData;

    #[test]
    fn test_diff_reports_selection_and_edit() {
        let data = GridData::from_strings(&["A", "B"], &[vec!["1", "2"]]);
        let mut model = GridModel::with_data(data, GridConfig::default());
        let before = GridSnapshot::from_model(&model);
        assert_eq!(before.diff(&before.clone()), None);

        let bounds = model.bounds();
        model
            .selection
            .select_single(CellPosition::new(0, 1), bounds)
            .unwrap();
        model.edit = crate::edit::EditSession::cell(&model.data, CellPosition::new(0, 1));

        let diff = before.diff(&GridSnapshot::from_model(&model)).unwrap();
        assert!(diff.contains("selection: 0 @ - → 1 @ (0,1)"));
        assert!(diff.contains("edit: idle → cell (0,1)"));
    }
}
