//! Status bar composition.
//!
//! Format: `<name> - <n> lines[ (modified)]` on the left and `<line>/<lines>`
//! right-justified. `<name>` is the file name as given, cut to
//! [`FILE_NAME_DISPLAY_LEN`] characters, or `[No Name]`.
//!
//! Two stages, as with any bar that may grow more indicators:
//! 1. `compose_status` produces ordered `StatusSegment`s.
//! 2. `format_status` lays them out for a given width. The left part is
//!    truncated to the width; the right part is only drawn when it fits
//!    exactly after the left part, otherwise the bar is padded with spaces.

use std::borrow::Cow;

/// Maximum number of file name characters shown.
pub const FILE_NAME_DISPLAY_LEN: usize = 20;

pub const NO_NAME: &str = "[No Name]";

pub struct StatusContext<'a> {
    pub file_name: Option<Cow<'a, str>>,
    pub numrows: usize,
    pub dirty: bool,
    /// 0-based cursor row.
    pub cy: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment<'a> {
    FileName(Cow<'a, str>),
    LineCount(usize),
    Modified,
    /// Right-aligned `line_1/numrows`.
    Position { line_1: usize, numrows: usize },
}

pub fn compose_status<'a>(ctx: &StatusContext<'a>) -> Vec<StatusSegment<'a>> {
    let name: Cow<'a, str> = match ctx.file_name.clone() {
        Some(full) => {
            if full.chars().count() > FILE_NAME_DISPLAY_LEN {
                full.chars().take(FILE_NAME_DISPLAY_LEN).collect::<String>().into()
            } else {
                full
            }
        }
        None => NO_NAME.into(),
    };
    let mut out = Vec::with_capacity(4);
    out.push(StatusSegment::FileName(name));
    out.push(StatusSegment::LineCount(ctx.numrows));
    if ctx.dirty {
        out.push(StatusSegment::Modified);
    }
    out.push(StatusSegment::Position {
        line_1: ctx.cy + 1,
        numrows: ctx.numrows,
    });
    out
}

/// Lay out segments into exactly `width` characters.
pub fn format_status(segments: &[StatusSegment<'_>], width: usize) -> String {
    let mut left = String::with_capacity(48);
    let mut right = String::new();
    for seg in segments {
        match seg {
            StatusSegment::FileName(name) => left.push_str(name),
            StatusSegment::LineCount(n) => {
                left.push_str(" - ");
                left.push_str(&n.to_string());
                left.push_str(" lines");
            }
            StatusSegment::Modified => left.push_str(" (modified)"),
            StatusSegment::Position { line_1, numrows } => {
                right = format!("{line_1}/{numrows}");
            }
        }
    }

    let mut out: String = left.chars().take(width).collect();
    let mut len = out.chars().count();
    let rlen = right.chars().count();
    while len < width {
        if width - len == rlen {
            out.push_str(&right);
            break;
        }
        out.push(' ');
        len += 1;
    }
    out
}

pub fn build_status_line(ctx: &StatusContext<'_>, width: usize) -> String {
    format_status(&compose_status(ctx), width)
}
