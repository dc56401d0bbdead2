//! Runtime tests - command processing, host callbacks, clipboard round-trips

mod common;

use std::time::{Duration, Instant};

use common::{pos, test_model, test_runtime};
use sheetgrid::clipboard::MemoryClipboard;
use sheetgrid::messages::{
    ClipboardMsg, HitTarget, Modifiers, PointerMsg, SearchMsg, SelectMsg, TimerId,
};
use sheetgrid::model::GridData;
use sheetgrid::runtime::{GridHost, GridRuntime, HostEvent};
use sheetgrid::{GridMsg, Notice};

/// Host that only cares about data changes
#[derive(Default)]
struct SaveCounter {
    saves: usize,
    last_rows: usize,
}

impl GridHost for SaveCounter {
    fn on_data_change(&mut self, data: &GridData) {
        self.saves += 1;
        self.last_rows = data.row_count();
    }
}

#[test]
fn test_host_with_default_callbacks() {
    let mut rt = GridRuntime::new(
        test_model(3, 3),
        SaveCounter::default(),
        MemoryClipboard::with_text("a\nb\nc\nd"),
    );
    rt.dispatch(GridMsg::Select(SelectMsg::Single(pos(1, 0))));
    rt.dispatch(GridMsg::Clipboard(ClipboardMsg::Paste));
    assert_eq!(rt.host().saves, 1);
    assert_eq!(rt.host().last_rows, 5);
}

#[test]
fn test_cut_then_paste_moves_values() {
    let mut rt = test_runtime(test_model(4, 4), MemoryClipboard::new());
    rt.dispatch(GridMsg::Select(SelectMsg::Range {
        from: pos(0, 0),
        to: pos(0, 1),
    }));
    rt.dispatch(GridMsg::Clipboard(ClipboardMsg::Cut));
    rt.dispatch(GridMsg::Select(SelectMsg::Single(pos(3, 2))));
    rt.dispatch(GridMsg::Clipboard(ClipboardMsg::Paste));

    let data = &rt.model().data;
    assert_eq!(data.display(0, 0), "");
    assert_eq!(data.display(3, 2), "r0c0");
    assert_eq!(data.display(3, 3), "r0c1");

    let (_, host, _) = rt.into_parts();
    let saved = host.last_data.unwrap();
    assert_eq!(saved.display(3, 3), "r0c1");
}

#[test]
fn test_write_failure_becomes_notice() {
    let mut rt = test_runtime(test_model(3, 3), MemoryClipboard::denied());
    rt.dispatch(GridMsg::Select(SelectMsg::All));
    rt.dispatch(GridMsg::Clipboard(ClipboardMsg::Copy));
    assert!(rt
        .host()
        .events
        .iter()
        .any(|e| matches!(e, HostEvent::Notice(Notice::ClipboardUnavailable(_)))));
}

#[test]
fn test_two_quick_presses_open_an_edit() {
    let mut rt = test_runtime(test_model(5, 5), MemoryClipboard::new());
    let t0 = Instant::now();
    let target = HitTarget::Cell(pos(1, 1));

    rt.pointer_down(target, Modifiers::NONE, t0);
    assert!(rt.model().edit.is_idle());
    rt.pointer_down(target, Modifiers::NONE, t0 + Duration::from_millis(120));
    assert_eq!(rt.model().edit.draft(), Some("r1c1"));
    assert!(rt.model().drag.is_none());
}

#[test]
fn test_slow_presses_do_not_open_an_edit() {
    let mut rt = test_runtime(test_model(5, 5), MemoryClipboard::new());
    let t0 = Instant::now();
    let target = HitTarget::Cell(pos(1, 1));

    rt.pointer_down(target, Modifiers::NONE, t0);
    rt.pointer_down(target, Modifiers::NONE, t0 + Duration::from_millis(800));
    assert!(rt.model().edit.is_idle());
}

#[test]
fn test_drag_flush_timer_round_trip() {
    let mut rt = test_runtime(test_model(10, 5), MemoryClipboard::new());
    let t0 = Instant::now();
    let enter = |row, col, ms| {
        GridMsg::Pointer(PointerMsg::Enter {
            target: HitTarget::Cell(pos(row, col)),
            primary_held: true,
            at: t0 + Duration::from_millis(ms),
        })
    };

    rt.pointer_down(HitTarget::Cell(pos(0, 0)), Modifiers::NONE, t0);
    rt.dispatch(enter(1, 1, 10));
    assert_eq!(rt.model().selection.len(), 4);

    rt.host_mut().take_events();
    rt.dispatch(enter(2, 2, 20));
    assert_eq!(rt.model().selection.len(), 4);
    assert_eq!(
        rt.host().pending_timers(),
        vec![(TimerId::DragFlush, Duration::from_millis(40))]
    );

    rt.dispatch(GridMsg::Timer {
        id: TimerId::DragFlush,
        at: t0 + Duration::from_millis(60),
    });
    assert_eq!(rt.model().selection.len(), 9);
}

#[test]
fn test_find_next_selects_and_reveals_match() {
    let mut rt = test_runtime(test_model(100, 3), MemoryClipboard::new());
    rt.dispatch(GridMsg::Search(SearchMsg::FindNext {
        query: "R60C1".to_string(),
        case_sensitive: false,
    }));
    assert_eq!(rt.model().selection.anchor(), Some(pos(60, 1)));
    assert!(rt
        .host()
        .events
        .iter()
        .any(|e| matches!(e, HostEvent::ScrollTo(_, true))));

    rt.dispatch(GridMsg::Search(SearchMsg::FindNext {
        query: "R60C1".to_string(),
        case_sensitive: true,
    }));
    assert!(rt
        .host()
        .events
        .contains(&HostEvent::Notice(Notice::NoMatches)));
}

#[test]
fn test_replace_all_emits_one_snapshot() {
    let mut rt = test_runtime(test_model(3, 3), MemoryClipboard::new());
    rt.dispatch(GridMsg::Search(SearchMsg::ReplaceAll {
        query: "c2".to_string(),
        replacement: "-last".to_string(),
        case_sensitive: true,
    }));
    assert_eq!(rt.model().data.display(1, 2), "r1-last");
    let saves = rt
        .host()
        .events
        .iter()
        .filter(|e| matches!(e, HostEvent::DataChange { .. }))
        .count();
    assert_eq!(saves, 1);
}
