//! High-level editor model: document state plus the single view onto it.
//!
//! A `View` owns presentation state (cursor, render column, scroll offsets,
//! screen geometry) so that `EditorState` stays purely about the document.
//! `EditorModel` pairs the two and hands out disjoint mutable borrows.
//!
//! Invariants (after every `scroll` call):
//! * `cursor.cy <= row_count` and `cursor.cx <= row_len(cursor.cy)`.
//! * `rowoff <= cy < rowoff + screenrows` and `coloff <= rx < coloff + screencols`
//!   (for non-zero geometry).
//!
//! Only `scroll` adjusts `rowoff` / `coloff`, with one exception: a search
//! match parks `rowoff` past the end so the following `scroll` puts the match
//! row at the top of the screen.

use core_state::EditorState;
use core_text::Cursor;

/// Rows reserved at the bottom of the terminal for the status and message bars.
pub const CHROME_ROWS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub rowoff: usize,
    pub coloff: usize,
    pub screenrows: usize,
    pub screencols: usize,
}

impl Viewport {
    /// Geometry from a raw terminal size, reserving the chrome rows.
    pub fn from_terminal(rows: u16, cols: u16) -> Self {
        Self {
            rowoff: 0,
            coloff: 0,
            screenrows: (rows as usize).saturating_sub(CHROME_ROWS),
            screencols: cols as usize,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct View {
    pub cursor: Cursor,
    /// Cursor column in render space; recomputed by `scroll` every frame.
    pub rx: usize,
    pub viewport: Viewport,
}

/// Cursor and offsets captured before a modal operation so it can be undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSnapshot {
    pub cursor: Cursor,
    pub rowoff: usize,
    pub coloff: usize,
}

impl View {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            cursor: Cursor::origin(),
            rx: 0,
            viewport,
        }
    }

    /// Recompute `rx` and move the offsets just enough to keep the cursor on
    /// screen. Returns true when an offset changed.
    pub fn scroll(&mut self, state: &EditorState) -> bool {
        let doc = &state.document;
        self.rx = doc
            .row(self.cursor.cy)
            .map_or(0, |row| row.cx_to_rx(self.cursor.cx));

        let before = (self.viewport.rowoff, self.viewport.coloff);
        let vp = &mut self.viewport;
        if self.cursor.cy < vp.rowoff {
            vp.rowoff = self.cursor.cy;
        }
        if vp.screenrows > 0 && self.cursor.cy >= vp.rowoff + vp.screenrows {
            vp.rowoff = self.cursor.cy + 1 - vp.screenrows;
        }
        if self.rx < vp.coloff {
            vp.coloff = self.rx;
        }
        if vp.screencols > 0 && self.rx >= vp.coloff + vp.screencols {
            vp.coloff = self.rx + 1 - vp.screencols;
        }
        let changed = before != (vp.rowoff, vp.coloff);
        if changed {
            tracing::trace!(
                target: "model.scroll",
                rowoff = vp.rowoff,
                coloff = vp.coloff,
                cy = self.cursor.cy,
                rx = self.rx,
                "viewport_moved"
            );
        }
        changed
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            cursor: self.cursor,
            rowoff: self.viewport.rowoff,
            coloff: self.viewport.coloff,
        }
    }

    pub fn restore(&mut self, snap: ViewSnapshot) {
        self.cursor = snap.cursor;
        self.viewport.rowoff = snap.rowoff;
        self.viewport.coloff = snap.coloff;
    }

    /// Clamp `cx` to the current row's length (0 on the virtual line).
    pub fn clamp_cx(&mut self, state: &EditorState) {
        let len = state.document.row_len(self.cursor.cy);
        if self.cursor.cx > len {
            self.cursor.cx = len;
        }
    }
}

#[derive(Debug)]
pub struct EditorModel {
    state: EditorState,
    view: View,
}

impl EditorModel {
    pub fn new(state: EditorState, viewport: Viewport) -> Self {
        Self {
            state,
            view: View::new(viewport),
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    /// Disjoint mutable borrows of the state and the view.
    pub fn split_state_and_view(&mut self) -> (&mut EditorState, &mut View) {
        (&mut self.state, &mut self.view)
    }

    /// Frame-start viewport recompute.
    pub fn scroll(&mut self) -> bool {
        self.view.scroll(&self.state)
    }
}
