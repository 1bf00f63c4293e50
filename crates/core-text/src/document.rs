//! Ordered row storage plus the point-cursor editing operations.
//!
//! The document exclusively owns its rows. Structural and content changes go
//! through the methods here, each of which bumps the `dirty` counter and
//! leaves every touched row with a regenerated render buffer.
//!
//! Edits take the cursor by `&mut Cursor` and move it exactly as the edit
//! semantics require, mirroring how a caller would expect a point cursor to
//! follow the text.

use crate::{Cursor, DEFAULT_TAB_STOP, Row};

/// Split raw file bytes into lines, stripping `\n` terminators and any `\r`
/// immediately before them. A trailing terminator does not produce an extra
/// empty line.
pub fn split_lines(bytes: &[u8]) -> Vec<Vec<u8>> {
    if bytes.is_empty() {
        return Vec::new();
    }
    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    body.split(|&b| b == b'\n')
        .map(|line| {
            let mut end = line.len();
            while end > 0 && matches!(line[end - 1], b'\r' | b'\n') {
                end -= 1;
            }
            line[..end].to_vec()
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct Document {
    rows: Vec<Row>,
    dirty: usize,
    tab_stop: usize,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DEFAULT_TAB_STOP)
    }
}

impl Document {
    pub fn new(tab_stop: usize) -> Self {
        Self {
            rows: Vec::new(),
            dirty: 0,
            tab_stop: tab_stop.max(1),
        }
    }

    /// Build a clean document from already-split lines.
    pub fn from_lines<I, L>(lines: I, tab_stop: usize) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Vec<u8>>,
    {
        let mut doc = Self::new(tab_stop);
        doc.load_lines(lines);
        doc
    }

    /// Replace all rows with `lines` and reset the dirty counter.
    pub fn load_lines<I, L>(&mut self, lines: I)
    where
        I: IntoIterator<Item = L>,
        L: Into<Vec<u8>>,
    {
        let tab_stop = self.tab_stop;
        self.rows = lines
            .into_iter()
            .map(|line| Row::new(line, tab_stop))
            .collect();
        self.dirty = 0;
        tracing::debug!(target: "text", rows = self.rows.len(), "document_loaded");
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, idx: usize) -> Option<&Row> {
        self.rows.get(idx)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    /// Byte length of row `idx`, 0 for the virtual line past the end.
    pub fn row_len(&self, idx: usize) -> usize {
        self.rows.get(idx).map_or(0, Row::len)
    }

    pub fn dirty(&self) -> usize {
        self.dirty
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty > 0
    }

    /// Called after a successful save.
    pub fn mark_clean(&mut self) {
        self.dirty = 0;
    }

    /// Insert a row at `at` (`at == row_count` appends). Out-of-range is a no-op.
    pub fn insert_row(&mut self, at: usize, content: impl Into<Vec<u8>>) {
        if at > self.rows.len() {
            return;
        }
        self.rows.insert(at, Row::new(content, self.tab_stop));
        self.dirty += 1;
    }

    /// Remove row `at`. Out-of-range is a no-op.
    pub fn delete_row(&mut self, at: usize) -> Option<Row> {
        if at >= self.rows.len() {
            return None;
        }
        self.dirty += 1;
        Some(self.rows.remove(at))
    }

    /// Insert byte `c` at the cursor, appending a row first when the cursor
    /// sits on the virtual line past the end.
    pub fn insert_char(&mut self, cursor: &mut Cursor, c: u8) {
        if cursor.cy == self.rows.len() {
            self.insert_row(self.rows.len(), Vec::new());
        }
        let Some(row) = self.rows.get_mut(cursor.cy) else {
            return;
        };
        let at = cursor.cx.min(row.len());
        row.insert_byte(at, c);
        cursor.cx = at + 1;
        self.dirty += 1;
    }

    /// Split the current row at the cursor (or open an empty row above when
    /// the cursor is at column 0) and move to the start of the next row.
    pub fn insert_newline(&mut self, cursor: &mut Cursor) {
        if cursor.cx == 0 {
            self.insert_row(cursor.cy, Vec::new());
        } else {
            let Some(row) = self.rows.get_mut(cursor.cy) else {
                return;
            };
            let tail = row.split_off(cursor.cx);
            self.rows.insert(cursor.cy + 1, tail);
            self.dirty += 1;
        }
        cursor.cy += 1;
        cursor.cx = 0;
    }

    /// Delete the byte before the cursor, merging with the previous row when
    /// the cursor is at column 0. No-op at document start and on the virtual
    /// line past the end.
    pub fn delete_char(&mut self, cursor: &mut Cursor) {
        if cursor.cy >= self.rows.len() {
            return;
        }
        if cursor.cx == 0 && cursor.cy == 0 {
            return;
        }
        if cursor.cx > 0 {
            let row = &mut self.rows[cursor.cy];
            let at = cursor.cx.min(row.len());
            if at == 0 {
                cursor.cx = 0;
                return;
            }
            row.remove_byte(at - 1);
            cursor.cx = at - 1;
            self.dirty += 1;
        } else if let Some(current) = self.delete_row(cursor.cy) {
            let prev = &mut self.rows[cursor.cy - 1];
            let prev_len = prev.len();
            prev.append_bytes(current.content());
            cursor.cy -= 1;
            cursor.cx = prev_len;
        }
    }

    /// Serialize every row followed by a single `\n`, including the last.
    pub fn rows_to_text(&self) -> Vec<u8> {
        let total: usize = self.rows.iter().map(|r| r.len() + 1).sum();
        let mut out = Vec::with_capacity(total);
        for row in &self.rows {
            out.extend_from_slice(row.content());
            out.push(b'\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(lines: &[&str]) -> Document {
        Document::from_lines(lines.iter().map(|l| l.as_bytes().to_vec()), 8)
    }

    fn contents(d: &Document) -> Vec<String> {
        d.rows()
            .iter()
            .map(|r| String::from_utf8_lossy(r.content()).into_owned())
            .collect()
    }

    #[test]
    fn split_lines_strips_terminators() {
        assert_eq!(
            split_lines(b"a\r\nb\nc"),
            vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]
        );
        assert_eq!(split_lines(b"a\n"), vec![b"a".to_vec()]);
        assert_eq!(split_lines(b"a\n\n"), vec![b"a".to_vec(), Vec::new()]);
        assert!(split_lines(b"").is_empty());
    }

    #[test]
    fn load_resets_dirty() {
        let mut d = doc(&["x"]);
        let mut c = Cursor::origin();
        d.insert_char(&mut c, b'y');
        assert!(d.is_dirty());
        d.load_lines(vec![b"z".to_vec()]);
        assert!(!d.is_dirty());
        assert_eq!(contents(&d), vec!["z"]);
    }

    #[test]
    fn insert_char_on_virtual_line_appends_row() {
        let mut d = Document::default();
        let mut c = Cursor::origin();
        d.insert_char(&mut c, b'a');
        assert_eq!(contents(&d), vec!["a"]);
        assert_eq!(c, Cursor::new(1, 0));
        assert!(d.dirty() >= 2, "row append and insert both count");
    }

    #[test]
    fn insert_then_delete_is_identity() {
        let mut d = doc(&["hello"]);
        let mut c = Cursor::new(2, 0);
        d.insert_char(&mut c, b'Z');
        assert_eq!(contents(&d), vec!["heZllo"]);
        d.delete_char(&mut c);
        assert_eq!(contents(&d), vec!["hello"]);
        assert_eq!(c, Cursor::new(2, 0));
    }

    #[test]
    fn split_then_merge_restores_row() {
        let mut d = doc(&["abc\tdef"]);
        let mut c = Cursor::new(3, 0);
        d.insert_newline(&mut c);
        assert_eq!(contents(&d), vec!["abc", "\tdef"]);
        assert_eq!(d.row(1).unwrap().render(), b"        def");
        assert_eq!(c, Cursor::new(0, 1));
        d.delete_char(&mut c);
        assert_eq!(contents(&d), vec!["abc\tdef"]);
        assert_eq!(c, Cursor::new(3, 0));
        assert_eq!(d.row(0).unwrap().render(), b"abc     def");
    }

    #[test]
    fn newline_at_column_zero_opens_row_above() {
        let mut d = doc(&["abc"]);
        let mut c = Cursor::new(0, 0);
        d.insert_newline(&mut c);
        assert_eq!(contents(&d), vec!["", "abc"]);
        assert_eq!(c, Cursor::new(0, 1));
    }

    #[test]
    fn delete_at_document_start_is_noop() {
        let mut d = doc(&["abc"]);
        let mut c = Cursor::origin();
        d.delete_char(&mut c);
        assert_eq!(contents(&d), vec!["abc"]);
        assert!(!d.is_dirty());
    }

    #[test]
    fn delete_on_virtual_line_is_noop() {
        let mut d = doc(&["abc"]);
        let mut c = Cursor::new(0, 1);
        d.delete_char(&mut c);
        assert_eq!(contents(&d), vec!["abc"]);
        assert_eq!(c, Cursor::new(0, 1));
    }

    #[test]
    fn rows_to_text_terminates_every_row() {
        let d = doc(&["one", "", "two"]);
        assert_eq!(d.rows_to_text(), b"one\n\ntwo\n");
        assert!(Document::default().rows_to_text().is_empty());
    }

    #[test]
    fn out_of_range_row_ops_are_noops() {
        let mut d = doc(&["a"]);
        d.insert_row(5, b"x".to_vec());
        assert!(d.delete_row(3).is_none());
        assert_eq!(d.row_count(), 1);
        assert!(!d.is_dirty());
    }
}
