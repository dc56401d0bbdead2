//! Command-line argument parsing for the headless driver
//!
//! Supports:
//! - Loading a CSV/TSV file or generating a synthetic grid
//! - Sizing the container and scrolling it
//! - Selecting a range and copying it as TSV

use clap::Parser;
use std::path::PathBuf;

use sheetgrid::CellPosition;

/// Drive a sheetgrid instance without a UI and print what it would show
#[derive(Parser, Debug)]
#[command(name = "sheetgrid", version, about = "Headless spreadsheet grid driver")]
pub struct CliArgs {
    /// CSV or TSV file to load (first record is the header row)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Rows to generate when no file is given
    #[arg(long, default_value_t = 1_000)]
    pub rows: usize,

    /// Columns to generate when no file is given
    #[arg(long, default_value_t = 8)]
    pub cols: usize,

    /// Freeze the first N columns
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub frozen: usize,

    /// Container width in pixels
    #[arg(long, default_value_t = 800.0)]
    pub width: f32,

    /// Container height in pixels
    #[arg(long, default_value_t = 600.0)]
    pub height: f32,

    /// Vertical scroll offset in pixels
    #[arg(long, value_name = "PX")]
    pub scroll_top: Option<f32>,

    /// Horizontal scroll offset in pixels
    #[arg(long, value_name = "PX")]
    pub scroll_left: Option<f32>,

    /// Select a cell or range, 1-indexed: `ROW,COL` or `ROW,COL:ROW,COL`
    #[arg(long, value_name = "RANGE")]
    pub select: Option<String>,

    /// Config file to use instead of the user config
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print a JSON report instead of text
    #[arg(long)]
    pub json: bool,
}

/// Where the grid data comes from
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    File { path: PathBuf, delimiter: u8 },
    Generated { rows: usize, cols: usize },
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source: DataSource,
    pub frozen: usize,
    pub container: (f32, f32),
    pub scroll: Option<(f32, f32)>,
    /// Inclusive corners, 0-indexed
    pub selection: Option<(CellPosition, CellPosition)>,
    pub config_path: Option<PathBuf>,
    pub json: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into a run configuration
    pub fn into_config(self) -> Result<RunConfig, String> {
        let source = match self.file {
            Some(path) => {
                let is_tsv = path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("tsv"));
                DataSource::File {
                    path,
                    delimiter: if is_tsv { b'\t' } else { b',' },
                }
            }
            None => DataSource::Generated {
                rows: self.rows,
                cols: self.cols.max(1),
            },
        };

        let scroll = match (self.scroll_top, self.scroll_left) {
            (None, None) => None,
            (top, left) => Some((top.unwrap_or(0.0), left.unwrap_or(0.0))),
        };

        let selection = self.select.as_deref().map(parse_range).transpose()?;

        Ok(RunConfig {
            source,
            frozen: self.frozen,
            container: (self.width, self.height),
            scroll,
            selection,
            config_path: self.config,
            json: self.json,
        })
    }
}

/// Parse `ROW,COL` or `ROW,COL:ROW,COL` (1-indexed) into 0-indexed corners
fn parse_range(s: &str) -> Result<(CellPosition, CellPosition), String> {
    let (a, b) = s.split_once(':').unwrap_or((s, s));
    Ok((parse_cell(a)?, parse_cell(b)?))
}

fn parse_cell(s: &str) -> Result<CellPosition, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("Expected ROW,COL but got '{}'", s))?;
    let parse = |v: &str| -> Result<usize, String> {
        match v.trim().parse::<usize>() {
            Ok(0) | Err(_) => Err(format!("'{}' is not a 1-indexed position", v)),
            Ok(n) => Ok(n - 1),
        }
    };
    Ok(CellPosition::new(parse(row)?, parse(col)?))
}
