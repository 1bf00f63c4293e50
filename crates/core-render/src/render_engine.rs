//! `RenderEngine`: assembles a full frame from the model and emits it.
//!
//! Every refresh repaints the whole screen. The viewport is recomputed first
//! (`EditorModel::scroll`) so the frame always contains the cursor.

use crate::FILLER;
use crate::status::{StatusContext, build_status_line};
use crate::writer::Writer;
use anyhow::Result;
use core_model::{EditorModel, View};
use core_state::EditorState;
use std::io::Write;
use std::time::Instant;

/// Public facade used by the runtime to produce a frame and flush it.
#[derive(Debug)]
pub struct RenderEngine {
    banner: String,
    frames: u64,
    last_frame_bytes: usize,
}

impl Default for RenderEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderEngine {
    pub fn new() -> Self {
        Self::with_banner(format!(
            "rowed editor -- version {}",
            env!("CARGO_PKG_VERSION")
        ))
    }

    /// Engine with a custom welcome banner for empty documents.
    pub fn with_banner(banner: impl Into<String>) -> Self {
        Self {
            banner: banner.into(),
            frames: 0,
            last_frame_bytes: 0,
        }
    }

    pub fn banner(&self) -> &str {
        &self.banner
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_frame_bytes(&self) -> usize {
        self.last_frame_bytes
    }

    /// Scroll, compose and write one frame to `out` in a single write.
    pub fn refresh<W: Write + ?Sized>(
        &mut self,
        model: &mut EditorModel,
        now: Instant,
        out: &mut W,
    ) -> Result<()> {
        model.scroll();
        let writer = self.compose(model.state(), model.view(), now);
        let bytes = writer.flush_to(out)?;
        self.frames += 1;
        self.last_frame_bytes = bytes;
        tracing::trace!(target: "render", frame = self.frames, bytes, "frame_flushed");
        Ok(())
    }

    /// Frame bytes for the current model without touching any output.
    pub fn frame_bytes(&self, model: &mut EditorModel, now: Instant) -> Result<Vec<u8>> {
        model.scroll();
        self.compose(model.state(), model.view(), now).into_bytes()
    }

    /// Build the command list for one frame. Assumes `view` was scrolled
    /// against `state`.
    pub fn compose(&self, state: &EditorState, view: &View, now: Instant) -> Writer {
        let mut w = Writer::new();
        w.hide_cursor();
        w.move_to(0, 0);
        self.draw_rows(&mut w, state, view);
        draw_status_bar(&mut w, state, view);
        draw_message_bar(&mut w, state, view, now);
        let vp = &view.viewport;
        let x = view.rx.saturating_sub(vp.coloff);
        let y = view.cursor.cy.saturating_sub(vp.rowoff);
        w.move_to(to_u16(x), to_u16(y));
        w.show_cursor();
        w
    }

    fn draw_rows(&self, w: &mut Writer, state: &EditorState, view: &View) {
        let doc = &state.document;
        let vp = &view.viewport;
        for y in 0..vp.screenrows {
            let filerow = y + vp.rowoff;
            match doc.row(filerow) {
                Some(row) => {
                    let render = row.render();
                    let start = vp.coloff.min(render.len());
                    let end = vp.coloff.saturating_add(vp.screencols).min(render.len());
                    w.print(&render[start..end]);
                }
                None if doc.is_empty() && y == vp.screenrows / 3 => {
                    self.draw_banner(w, vp.screencols);
                }
                None => w.print(FILLER),
            }
            w.clear_to_eol();
            w.newline();
        }
    }

    fn draw_banner(&self, w: &mut Writer, screencols: usize) {
        let banner: String = self.banner.chars().take(screencols).collect();
        let mut padding = (screencols - banner.chars().count()) / 2;
        let mut line = String::with_capacity(screencols);
        if padding > 0 {
            line.push_str(FILLER);
            padding -= 1;
        }
        line.extend(std::iter::repeat_n(' ', padding));
        line.push_str(&banner);
        w.print(line);
    }
}

fn draw_status_bar(w: &mut Writer, state: &EditorState, view: &View) {
    let ctx = StatusContext {
        file_name: state.display_name(),
        numrows: state.document.row_count(),
        dirty: state.is_dirty(),
        cy: view.cursor.cy,
    };
    w.reverse();
    w.print(build_status_line(&ctx, view.viewport.screencols));
    w.reset_attributes();
    w.newline();
}

fn draw_message_bar(w: &mut Writer, state: &EditorState, view: &View, now: Instant) {
    w.clear_to_eol();
    if let Some(msg) = state.visible_message(now) {
        let shown: String = msg.chars().take(view.viewport.screencols).collect();
        w.print(shown);
    }
}

fn to_u16(v: usize) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}
