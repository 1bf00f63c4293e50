//! Frame writer: an ordered list of terminal commands rendered into one
//! buffer and emitted with a single write.
//!
//! Design invariants:
//! * Commands preserve ordering; nothing reaches the output before `flush_to`.
//! * All positions are absolute with a (0,0) origin; the caller keeps them in
//!   bounds.
//! * Text is raw bytes. Document rows are not guaranteed to be UTF-8 and are
//!   emitted untouched.

use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, SetAttribute},
    terminal::{Clear, ClearType},
};
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    HideCursor,
    ShowCursor,
    MoveTo(u16, u16),
    /// Erase from the cursor to the end of the current line.
    ClearToEol,
    Print(Vec<u8>),
    ReverseVideo,
    ResetAttributes,
    NewLine,
}

#[derive(Debug, Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }

    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    pub fn hide_cursor(&mut self) {
        self.cmds.push(Command::HideCursor);
    }

    pub fn show_cursor(&mut self) {
        self.cmds.push(Command::ShowCursor);
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }

    pub fn clear_to_eol(&mut self) {
        self.cmds.push(Command::ClearToEol);
    }

    pub fn print(&mut self, bytes: impl Into<Vec<u8>>) {
        let bytes = bytes.into();
        if !bytes.is_empty() {
            self.cmds.push(Command::Print(bytes));
        }
    }

    pub fn reverse(&mut self) {
        self.cmds.push(Command::ReverseVideo);
    }

    pub fn reset_attributes(&mut self) {
        self.cmds.push(Command::ResetAttributes);
    }

    pub fn newline(&mut self) {
        self.cmds.push(Command::NewLine);
    }

    /// Encode every command into one contiguous buffer.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        let mut buf: Vec<u8> = Vec::with_capacity(self.cmds.len() * 8);
        for c in self.cmds {
            match c {
                Command::HideCursor => queue!(buf, Hide)?,
                Command::ShowCursor => queue!(buf, Show)?,
                Command::MoveTo(x, y) => queue!(buf, MoveTo(x, y))?,
                Command::ClearToEol => queue!(buf, Clear(ClearType::UntilNewLine))?,
                Command::Print(bytes) => buf.extend_from_slice(&bytes),
                Command::ReverseVideo => queue!(buf, SetAttribute(Attribute::Reverse))?,
                Command::ResetAttributes => queue!(buf, SetAttribute(Attribute::Reset))?,
                Command::NewLine => buf.extend_from_slice(b"\r\n"),
            }
        }
        Ok(buf)
    }

    /// Emit the whole frame with one `write_all`, then flush. Returns the
    /// number of bytes written.
    pub fn flush_to<W: Write + ?Sized>(self, out: &mut W) -> Result<usize> {
        let buf = self.into_bytes()?;
        out.write_all(&buf)?;
        out.flush()?;
        Ok(buf.len())
    }
}
