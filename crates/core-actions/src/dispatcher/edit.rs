//! Text edit action handling (insert/backspace/delete/newline).

use super::DispatchResult;
use super::motion::handle_motion;
use crate::{EditKind, MotionKind};
use core_model::View;
use core_state::EditorState;

pub(crate) fn handle_edit(
    kind: EditKind,
    state: &mut EditorState,
    view: &mut View,
) -> DispatchResult {
    let before = view.cursor;
    let dirty_before = state.document.dirty();
    match kind {
        EditKind::InsertByte(c) => state.document.insert_char(&mut view.cursor, c),
        EditKind::InsertNewline => state.document.insert_newline(&mut view.cursor),
        EditKind::DeleteBackward => state.document.delete_char(&mut view.cursor),
        EditKind::DeleteForward => {
            handle_motion(MotionKind::Right, state, view);
            state.document.delete_char(&mut view.cursor);
        }
    }
    tracing::trace!(
        target: "actions.dispatch",
        op = ?kind,
        cx = before.cx,
        cy = before.cy,
        to_cx = view.cursor.cx,
        to_cy = view.cursor.cy,
        "edit"
    );
    if state.document.dirty() != dirty_before || view.cursor != before {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}
