//! Find and replace

use super::data::adopt_and_emit;
use super::selection::selection_changed;
use crate::commands::{Cmd, Notice};
use crate::messages::SearchMsg;
use crate::model::GridModel;
use crate::search::{find_next, replace_all};

pub fn update_search(model: &mut GridModel, msg: SearchMsg) -> Option<Cmd> {
    match msg {
        SearchMsg::FindNext {
            query,
            case_sensitive,
        } => {
            let after = model.selection.anchor();
            let Some(hit) = find_next(&model.data, after, &query, case_sensitive) else {
                return Some(Cmd::Notice(Notice::NoMatches));
            };
            let before = model.selection.revision();
            if let Err(e) = model.selection.select_single(hit, model.data.bounds()) {
                tracing::warn!("Ignoring search hit: {}", e);
                return None;
            }
            let changed = selection_changed(model, before);
            let scrolled = model.scroll_to_cell(hit.row, hit.col, true);
            Some(Cmd::batch(vec![
                changed.into(),
                scrolled.into(),
                Cmd::redraw_body(),
            ]))
        }
        SearchMsg::ReplaceAll {
            query,
            replacement,
            case_sensitive,
        } => match replace_all(&model.data, &query, &replacement, case_sensitive) {
            Some((next, count)) => {
                tracing::debug!(count, "replaced occurrences");
                Some(Cmd::batch(vec![adopt_and_emit(model, next), Cmd::redraw_body()]))
            }
            None => Some(Cmd::Notice(Notice::NoMatches)),
        },
    }
}
