//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::time::Instant;

use sheetgrid::clipboard::MemoryClipboard;
use sheetgrid::messages::{HitTarget, Key, Modifiers, PointerMsg};
use sheetgrid::model::{CellPosition, CellValue, ColumnSpec, GridData, GridModel};
use sheetgrid::runtime::{GridRuntime, RecordingHost};
use sheetgrid::{Cmd, GridConfig, GridMsg};

/// Container used by `test_model`: 800px wide, header plus 20 body rows
pub const WIDTH: f32 = 800.0;
pub const HEIGHT: f32 = 632.0;

pub fn pos(row: usize, col: usize) -> CellPosition {
    CellPosition::new(row, col)
}

/// `rows` x `cols` grid of text cells reading `r{row}c{col}`
pub fn test_grid(rows: usize, cols: usize) -> GridData {
    let columns = (0..cols)
        .map(|c| ColumnSpec::new(format!("f{}", c), format!("Col {}", c)))
        .collect();
    let rows = (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| CellValue::text(format!("r{}c{}", r, c)))
                .collect()
        })
        .collect();
    GridData::new(rows, columns)
}

/// Measured model over `test_grid(rows, cols)` with default config
pub fn test_model(rows: usize, cols: usize) -> GridModel {
    test_model_with(test_grid(rows, cols), GridConfig::default())
}

pub fn test_model_with(data: GridData, config: GridConfig) -> GridModel {
    let mut model = GridModel::with_data(data, config);
    model.resize(WIDTH, HEIGHT);
    model
}

pub type TestRuntime = GridRuntime<RecordingHost, MemoryClipboard>;

pub fn test_runtime(model: GridModel, clipboard: MemoryClipboard) -> TestRuntime {
    GridRuntime::new(model, RecordingHost::new(), clipboard)
}

pub fn press(model: &mut GridModel, key: Key) -> Option<Cmd> {
    sheetgrid::update(
        model,
        GridMsg::Key {
            key,
            modifiers: Modifiers::NONE,
        },
    )
}

pub fn press_with(model: &mut GridModel, key: Key, modifiers: Modifiers) -> Option<Cmd> {
    sheetgrid::update(model, GridMsg::Key { key, modifiers })
}

pub fn type_text(model: &mut GridModel, text: &str) {
    for ch in text.chars() {
        press(model, Key::Char(ch));
    }
}

pub fn click(model: &mut GridModel, target: HitTarget, modifiers: Modifiers) -> Option<Cmd> {
    sheetgrid::update(
        model,
        GridMsg::Pointer(PointerMsg::Down {
            target,
            modifiers,
            at: Instant::now(),
        }),
    )
}

pub fn click_cell(model: &mut GridModel, row: usize, col: usize) -> Option<Cmd> {
    click(model, HitTarget::Cell(pos(row, col)), Modifiers::NONE)
}

/// Every command in a possibly nested batch
pub fn flat(cmd: Option<Cmd>) -> Vec<Cmd> {
    cmd.map(Cmd::flatten).unwrap_or_default()
}

pub fn emitted_data(cmd: Option<Cmd>) -> Option<GridData> {
    flat(cmd).into_iter().find_map(|c| match c {
        Cmd::EmitDataChange(data) => Some(data),
        _ => None,
    })
}
