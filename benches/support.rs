//! Shared helpers for benchmarks

use sheetgrid::model::{CellValue, ColumnSpec, GridData, GridModel};
use sheetgrid::GridConfig;

/// Mixed text and number grid with `rows` x `cols` cells
#[allow(dead_code)]
pub fn make_grid(rows: usize, cols: usize) -> GridData {
    let columns = (0..cols)
        .map(|c| ColumnSpec::new(format!("f{}", c), format!("Column {}", c)))
        .collect();
    let rows = (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| {
                    if c % 3 == 0 {
                        CellValue::Number((r * cols + c) as f64)
                    } else {
                        CellValue::text(format!("row {} col {}", r, c))
                    }
                })
                .collect()
        })
        .collect();
    GridData::new(rows, columns)
}

/// Measured model at 1920x1080 over `make_grid(rows, cols)`
#[allow(dead_code)]
pub fn make_model(rows: usize, cols: usize) -> GridModel {
    let mut model = GridModel::with_data(make_grid(rows, cols), GridConfig::default());
    model.resize(1920.0, 1080.0);
    model
}
