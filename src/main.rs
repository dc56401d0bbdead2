//! Headless driver: load a grid, size and scroll it, optionally select and
//! copy, then report what a host would render.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::time::Instant;

use sheetgrid::clipboard::{tsv, MemoryClipboard};
use sheetgrid::messages::{ClipboardMsg, ScrollMsg, SelectMsg};
use sheetgrid::model::{CellValue, ColumnSpec, GridData};
use sheetgrid::runtime::{GridRuntime, HostEvent, RecordingHost};
use sheetgrid::scroll::ScrollOffsets;
use sheetgrid::selection::SelectionSummary;
use sheetgrid::viewport::ViewportWindow;
use sheetgrid::{GridConfig, GridModel, GridMsg};

use cli::{CliArgs, DataSource, RunConfig};

type Runtime = GridRuntime<RecordingHost, MemoryClipboard>;

#[derive(Debug, Serialize)]
struct Report {
    rows: usize,
    cols: usize,
    window: ViewportWindow,
    offsets: ScrollOffsets,
    selection: SelectionSummary,
    headers: Vec<String>,
    /// Display values inside the window
    visible: Vec<Vec<String>>,
    copied: Option<String>,
    notices: Vec<String>,
}

fn main() -> Result<()> {
    sheetgrid::tracing::init();

    let run = CliArgs::parse()
        .into_config()
        .map_err(anyhow::Error::msg)?;

    let config = match &run.config_path {
        Some(path) => GridConfig::load_from(path)?,
        None => GridConfig::load(),
    };
    let data = load_data(&run)?;
    tracing::info!(
        rows = data.row_count(),
        cols = data.column_count(),
        "loaded grid"
    );

    let model = GridModel::with_data(data, config);
    let mut runtime = GridRuntime::new(model, RecordingHost::new(), MemoryClipboard::new());
    let report = drive(&mut runtime, &run);

    if run.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn load_data(run: &RunConfig) -> Result<GridData> {
    let data = match &run.source {
        DataSource::File { path, delimiter } => {
            let file =
                File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
            GridData::from_csv_reader(BufReader::new(file), *delimiter)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        }
        DataSource::Generated { rows, cols } => generate(*rows, *cols),
    };

    if run.frozen == 0 {
        return Ok(data);
    }
    let columns = data
        .columns()
        .iter()
        .enumerate()
        .map(|(i, c)| if i < run.frozen { c.clone().frozen() } else { c.clone() })
        .collect();
    Ok(data.with_columns(columns))
}

/// Synthetic data: an id column followed by text and number columns
fn generate(rows: usize, cols: usize) -> GridData {
    let mut columns = vec![ColumnSpec::new("id", "ID").with_width(60.0)];
    columns.extend((1..cols).map(|c| ColumnSpec::new(format!("c{}", c), format!("Field {}", c))));

    let rows = (0..rows)
        .map(|r| {
            let mut row = vec![CellValue::Number((r + 1) as f64)];
            row.extend((1..cols).map(|c| {
                if c % 2 == 0 {
                    CellValue::Number((r * c) as f64 / 4.0)
                } else {
                    CellValue::text(format!("r{}c{}", r + 1, c))
                }
            }));
            row
        })
        .collect();
    GridData::new(rows, columns)
}

/// Fire every timer the host was asked for, as if its deadline had passed
fn run_timers(runtime: &mut Runtime, now: Instant) {
    let timers = runtime.host().pending_timers();
    runtime.host_mut().take_events();
    for (id, after) in timers {
        runtime.dispatch(GridMsg::Timer {
            id,
            at: now + after,
        });
    }
}

fn drive(runtime: &mut Runtime, run: &RunConfig) -> Report {
    let now = Instant::now();
    let (width, height) = run.container;
    runtime.dispatch(GridMsg::Resize { width, height });

    if let Some((top, left)) = run.scroll {
        runtime.dispatch(GridMsg::Scroll(ScrollMsg::Scrolled {
            offsets: ScrollOffsets::new(top, left),
            at: now,
        }));
        runtime.dispatch(GridMsg::AnimationFrame);
        run_timers(runtime, now);
    }

    let mut copied = None;
    if let Some((from, to)) = run.selection {
        runtime.dispatch(GridMsg::Select(SelectMsg::Range { from, to }));
        runtime.dispatch(GridMsg::Clipboard(ClipboardMsg::Copy));
        copied = runtime.clipboard().text().map(str::to_string);
        run_timers(runtime, now);
    }

    let notices = runtime
        .host()
        .events
        .iter()
        .filter_map(|e| match e {
            HostEvent::Notice(n) => Some(format!("{:?}", n)),
            _ => None,
        })
        .collect();

    let model = runtime.model();
    let window = model.window();
    let visible = window
        .rows()
        .map(|r| window.cols().map(|c| model.data.display(r, c)).collect())
        .collect();

    Report {
        rows: model.data.row_count(),
        cols: model.data.column_count(),
        window,
        offsets: model.scroll.offsets(),
        selection: model.selection.summary(),
        headers: window
            .cols()
            .filter_map(|c| model.data.columns().get(c).map(|s| s.header.clone()))
            .collect(),
        visible,
        copied,
        notices,
    }
}

fn print_report(report: &Report) {
    let w = report.window;
    println!("grid: {} rows x {} cols", report.rows, report.cols);
    println!(
        "window: rows {}..{} cols {}..{} (scroll {}, {})",
        w.start_row, w.end_row, w.start_col, w.end_col, report.offsets.top, report.offsets.left
    );
    println!("selection: {} cells", report.selection.len);
    println!();
    println!("{}", tsv::write_rows(std::iter::once(report.headers.iter().cloned())));
    println!(
        "{}",
        tsv::write_rows(report.visible.iter().map(|row| row.iter().cloned()))
    );
    if let Some(text) = &report.copied {
        println!();
        println!("copied:");
        println!("{}", text);
    }
    for notice in &report.notices {
        eprintln!("notice: {}", notice);
    }
}
