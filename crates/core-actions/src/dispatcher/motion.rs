//! Motion sub-dispatch (cursor movement).
//!
//! Horizontal moves wrap across line boundaries: Left at column 0 goes to
//! the end of the previous row, Right at end of row goes to the start of the
//! next. Vertical moves keep `cx` and clamp it to the destination row. Page
//! moves first snap to the top/bottom screen row, then repeat a single-row
//! move `screenrows` times.

use super::DispatchResult;
use crate::MotionKind;
use core_model::View;
use core_state::EditorState;

pub(crate) fn handle_motion(
    kind: MotionKind,
    state: &mut EditorState,
    view: &mut View,
) -> DispatchResult {
    let before = view.cursor;
    match kind {
        MotionKind::Left | MotionKind::Right | MotionKind::Up | MotionKind::Down => {
            step(kind, state, view);
        }
        MotionKind::LineStart => view.cursor.cx = 0,
        MotionKind::LineEnd => {
            if view.cursor.cy < state.document.row_count() {
                view.cursor.cx = state.document.row_len(view.cursor.cy);
            }
        }
        MotionKind::PageUp => {
            view.cursor.cy = view.viewport.rowoff;
            for _ in 0..view.viewport.screenrows {
                step(MotionKind::Up, state, view);
            }
        }
        MotionKind::PageDown => {
            let bottom = (view.viewport.rowoff + view.viewport.screenrows).saturating_sub(1);
            view.cursor.cy = bottom.min(state.document.row_count());
            for _ in 0..view.viewport.screenrows {
                step(MotionKind::Down, state, view);
            }
        }
    }
    view.clamp_cx(state);
    tracing::trace!(
        target: "actions.dispatch",
        ?kind,
        cx = view.cursor.cx,
        cy = view.cursor.cy,
        "motion"
    );
    if view.cursor != before {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}

/// One single-cell / single-row move, followed by the `cx` clamp.
fn step(kind: MotionKind, state: &EditorState, view: &mut View) {
    let doc = &state.document;
    let numrows = doc.row_count();
    let cursor = &mut view.cursor;
    match kind {
        MotionKind::Left => {
            if cursor.cx > 0 {
                cursor.cx -= 1;
            } else if cursor.cy > 0 {
                cursor.cy -= 1;
                cursor.cx = doc.row_len(cursor.cy);
            }
        }
        MotionKind::Right => {
            if cursor.cy < numrows {
                if cursor.cx < doc.row_len(cursor.cy) {
                    cursor.cx += 1;
                } else {
                    cursor.cy += 1;
                    cursor.cx = 0;
                }
            }
        }
        MotionKind::Up => {
            cursor.cy = cursor.cy.saturating_sub(1);
        }
        MotionKind::Down => {
            if cursor.cy < numrows {
                cursor.cy += 1;
            }
        }
        _ => {}
    }
    view.clamp_cx(state);
}
