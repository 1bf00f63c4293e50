//! Line-oriented text storage: rows with a derived render form, the document
//! that owns them, and the point-cursor edits applied to it.
//!
//! Every `Row` keeps two byte buffers:
//! * `content` – the literal bytes of the line (no newline).
//! * `render` – the display form, regenerated from `content` after every
//!   mutation. Tabs expand to the next multiple of the document tab stop; no
//!   other transformation is applied.
//!
//! Callers never observe a stale `render`: the only way to change `content`
//! is through `Row` / `Document` methods which regenerate before returning.
//!
//! Coordinates:
//! * `cx` – byte offset into `content` (`0..=len`, `len` is the append slot).
//! * `cy` – row index (`0..=row_count`, `row_count` is the virtual line past
//!   the end of the document).
//! * `rx` – column in render space, derived from `cx` (see [`row::cx_to_rx`]).

pub mod document;
pub mod row;

pub use document::{Document, split_lines};
pub use row::Row;

/// Default tab stop used when no configuration overrides it.
pub const DEFAULT_TAB_STOP: usize = 8;

/// Logical cursor position inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub cx: usize,
    pub cy: usize,
}

impl Cursor {
    pub fn new(cx: usize, cy: usize) -> Self {
        Self { cx, cy }
    }

    pub fn origin() -> Self {
        Self { cx: 0, cy: 0 }
    }
}
