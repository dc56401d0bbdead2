//! Benchmarks for visible range computation and scroll handling
//!
//! Run with: cargo bench viewport

mod support;

use std::time::Instant;

use sheetgrid::messages::ScrollMsg;
use sheetgrid::scroll::ScrollOffsets;
use sheetgrid::viewport::{compute_visible_range, ContainerSize, RangeParams};
use sheetgrid::{update, GridMsg};
use support::make_model;

fn main() {
    divan::main();
}

// ============================================================================
// Pure range math
// ============================================================================

#[divan::bench(args = [10, 100, 1_000])]
fn compute_range(col_count: usize) {
    let widths: Vec<f32> = (0..col_count).map(|i| 80.0 + (i % 5) as f32 * 20.0).collect();
    let window = compute_visible_range(&RangeParams {
        scroll_top: divan::black_box(123_456.0),
        scroll_left: divan::black_box(4_321.0),
        container: ContainerSize::new(1920.0, 1080.0),
        row_height: 30.0,
        col_widths: &widths,
        buffer_rows: 5,
        buffer_cols: 2,
        frozen_cols: 1,
        row_count: 1_000_000,
    });
    divan::black_box(window);
}

// ============================================================================
// Scroll stream through update
// ============================================================================

#[divan::bench(args = [1_000, 100_000])]
fn scroll_burst_then_frame(bencher: divan::Bencher, rows: usize) {
    bencher
        .with_inputs(|| make_model(rows, 20))
        .bench_local_values(|mut model| {
            let t0 = Instant::now();
            for i in 0..60 {
                update(
                    &mut model,
                    GridMsg::Scroll(ScrollMsg::Scrolled {
                        offsets: ScrollOffsets::new(i as f32 * 45.0, i as f32 * 7.0),
                        at: t0,
                    }),
                );
            }
            update(&mut model, GridMsg::AnimationFrame);
            divan::black_box(model.window());
        });
}

#[divan::bench]
fn scroll_to_cell_far(bencher: divan::Bencher) {
    bencher
        .with_inputs(|| make_model(100_000, 50))
        .bench_local_values(|mut model| {
            divan::black_box(model.scroll_to_cell(75_000, 40, false));
        });
}
