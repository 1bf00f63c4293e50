//! File IO helpers kept out of the dispatcher.
//!
//! Synchronous and whole-file: load reads every byte and splits into lines,
//! save truncates and rewrites the target in place (not an atomic replace).

use core_state::EditorState;
use core_text::split_lines;
use std::io;
use std::path::Path;

/// Result of attempting to open a file.
#[derive(Debug)]
pub enum OpenFileResult {
    Loaded { lines: Vec<Vec<u8>>, bytes: usize },
    /// No such file yet; the caller starts an empty document bound to the path.
    NotFound,
    Error(io::Error),
}

pub fn open_file(path: &Path) -> OpenFileResult {
    match std::fs::read(path) {
        Ok(bytes) => {
            let lines = split_lines(&bytes);
            tracing::debug!(
                target: "io",
                file = %path.display(),
                size_bytes = bytes.len(),
                line_count = lines.len(),
                "file_read_ok"
            );
            OpenFileResult::Loaded {
                lines,
                bytes: bytes.len(),
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!(target: "io", file = %path.display(), "file_not_found_new_buffer");
            OpenFileResult::NotFound
        }
        Err(e) => {
            tracing::error!(target: "io", ?e, "file_open_error");
            OpenFileResult::Error(e)
        }
    }
}

/// Load `path` into the state's document, binding the file name. Returns a
/// user-facing message when the open failed for a reason other than absence.
pub fn load_into(state: &mut EditorState, path: &Path) -> Option<String> {
    match open_file(path) {
        OpenFileResult::Loaded { lines, .. } => {
            state.document.load_lines(lines);
            state.file_name = Some(path.to_path_buf());
            None
        }
        OpenFileResult::NotFound => {
            state.document.load_lines(Vec::<Vec<u8>>::new());
            state.file_name = Some(path.to_path_buf());
            None
        }
        OpenFileResult::Error(e) => Some(format!("Can't open {}: {e}", path.display())),
    }
}

/// Result of a write attempt.
#[derive(Debug)]
pub enum WriteFileResult {
    Success { bytes: usize },
    NoFilename,
    Error(io::Error),
}

/// Serialize the document to its bound file name. Clears the dirty counter
/// only on success.
pub fn write_file(state: &mut EditorState) -> WriteFileResult {
    let Some(path) = state.file_name.clone() else {
        return WriteFileResult::NoFilename;
    };
    let content = state.document.rows_to_text();
    match std::fs::write(&path, &content) {
        Ok(()) => {
            state.document.mark_clean();
            tracing::info!(target: "io", file = %path.display(), bytes = content.len(), "file_write_ok");
            WriteFileResult::Success {
                bytes: content.len(),
            }
        }
        Err(e) => {
            tracing::error!(target: "io", ?e, "file_write_error");
            WriteFileResult::Error(e)
        }
    }
}
