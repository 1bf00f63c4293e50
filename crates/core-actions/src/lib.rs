//! Editor actions: key translation, the dispatcher that applies actions to
//! the model, the modal line prompt and incremental search built on it.
//!
//! Flow per keystroke: `Key` -> [`translate_key`] -> [`Action`] ->
//! [`dispatcher::dispatch`]. Actions that need further input (save-as, find)
//! run a nested prompt loop through a [`PromptHost`], which the runtime
//! implements on top of the key decoder and the screen compositor.

pub mod dispatcher;
pub mod io_ops;
mod key_translator;
pub mod prompt;
pub mod search;

pub use dispatcher::{DispatchResult, dispatch};
pub use key_translator::translate_key;
pub use prompt::{LinePrompt, NoopPromptHooks, PromptHooks, PromptHost, PromptStep, run_prompt};
pub use search::{Direction, SearchSession};

pub const HELP_MESSAGE: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    PageUp,
    PageDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    InsertByte(u8),
    InsertNewline,
    /// Backspace: delete the byte before the cursor (merging rows at column 0).
    DeleteBackward,
    /// Delete key: step right, then delete backward.
    DeleteForward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Motion(MotionKind),
    Edit(EditKind),
    Save,
    Find,
    Quit,
    /// Repaint only (Ctrl-L, bare Escape).
    Refresh,
}
