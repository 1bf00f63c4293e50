//! Screen compositor: turns the editor model into one terminal frame.
//!
//! A frame is, in order: hide cursor, home, one line per text row (visible
//! render slice, `~` filler, or the welcome banner on an empty document),
//! the reverse-video status bar, the message bar, the cursor position and
//! show cursor. Every line clears to its end so stale text from the previous
//! frame never survives.
//!
//! Frames are assembled into a byte buffer by [`writer::Writer`] and handed
//! to the output in a single `write_all`, so a partially drawn frame is never
//! observable.
//!
//! Exposed components:
//! - `render_engine`: `RenderEngine`, frame assembly and emission.
//! - `status`: status bar segments and their width-aware formatting.
//! - `writer`: ordered terminal commands flushed as one write.

pub mod render_engine;
pub mod status;
pub mod writer;

pub use render_engine::RenderEngine;

/// Glyph drawn on text rows past the end of the document.
pub const FILLER: &str = "~";
