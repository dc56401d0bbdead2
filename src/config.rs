//! Grid configuration
//!
//! Geometry defaults, buffer sizes, processing thresholds and the timing
//! policy. Loaded from `~/.config/sheetgrid/config.yaml` when present; every
//! field falls back to its default.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Fixed height of every data row (pixels)
    pub row_height: f32,
    /// Height of the sticky column header band (pixels)
    pub header_height: f32,
    /// Width used for columns without an explicit width (pixels)
    pub default_col_width: f32,
    /// Extra rows rendered above and below the visible area
    pub buffer_rows: usize,
    /// Extra columns rendered left and right of the visible area
    pub buffer_cols: usize,
    /// Selections larger than this many cells raise the processing flag
    pub selection_processing_threshold: usize,
    /// Pastes with more rows than this raise the processing flag
    pub paste_processing_threshold: usize,
    /// Above this row count, cell content is skipped while scrolling
    pub large_dataset_rows: usize,
    /// Quiet time after the last scroll event before `is_scrolling` clears
    pub scroll_quiet_ms: u64,
    /// Minimum interval between drag-selection recomputes
    pub drag_throttle_ms: u64,
    /// How long the processing flag stays up after a large operation
    pub processing_feedback_ms: u64,
    /// Enter/Tab in a header edit opens the next header
    pub advance_header_on_commit: bool,
    /// A plain click on the only selected cell clears the selection
    pub repeat_click_deselects: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            row_height: 30.0,
            header_height: 32.0,
            default_col_width: 120.0,
            buffer_rows: 5,
            buffer_cols: 2,
            selection_processing_threshold: 5000,
            paste_processing_threshold: 1000,
            large_dataset_rows: 10_000,
            scroll_quiet_ms: 150,
            drag_throttle_ms: 50,
            processing_feedback_ms: 0,
            advance_header_on_commit: true,
            repeat_click_deselects: false,
        }
    }
}

impl GridConfig {
    /// Load config from the user config directory, or return defaults
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{:#}", e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config.sanitized())
    }

    /// Save config to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Replace unusable geometry with defaults
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.row_height.is_finite() && self.row_height > 0.0) {
            self.row_height = defaults.row_height;
        }
        if !(self.default_col_width.is_finite() && self.default_col_width > 0.0) {
            self.default_col_width = defaults.default_col_width;
        }
        if !(self.header_height.is_finite() && self.header_height >= 0.0) {
            self.header_height = defaults.header_height;
        }
        self
    }

    pub fn scroll_quiet(&self) -> Duration {
        Duration::from_millis(self.scroll_quiet_ms)
    }

    pub fn drag_throttle(&self) -> Duration {
        Duration::from_millis(self.drag_throttle_ms)
    }

    pub fn processing_feedback(&self) -> Duration {
        Duration::from_millis(self.processing_feedback_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: GridConfig = serde_yaml::from_str("row_height: 24\nbuffer_rows: 1\n").unwrap();
        assert_eq!(config.row_height, 24.0);
        assert_eq!(config.buffer_rows, 1);
        assert_eq!(config.selection_processing_threshold, 5000);
        assert!(config.advance_header_on_commit);
    }

    #[test]
    fn test_sanitized_rejects_zero_row_height() {
        let config = GridConfig {
            row_height: 0.0,
            ..GridConfig::default()
        }
        .sanitized();
        assert_eq!(config.row_height, 30.0);
    }
}
