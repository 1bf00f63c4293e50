//! Window size discovery.
//!
//! Queried once at startup; the editor does not follow resizes.

use anyhow::{Result, bail};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub rows: u16,
    pub cols: u16,
}

impl WindowSize {
    /// Validate a raw `(cols, rows)` pair as reported by the terminal.
    pub fn from_raw(cols: u16, rows: u16) -> Result<Self> {
        if cols == 0 || rows == 0 {
            bail!("terminal reported an empty window ({cols}x{rows})");
        }
        Ok(Self { rows, cols })
    }

    pub fn query() -> Result<Self> {
        let (cols, rows) = crossterm::terminal::size()?;
        let size = Self::from_raw(cols, rows)?;
        tracing::info!(target: "runtime", rows = size.rows, cols = size.cols, "window_size");
        Ok(size)
    }
}
