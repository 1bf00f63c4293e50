//! Incremental search driven by the line prompt.
//!
//! The session remembers the last matching row and a direction. Arrow keys
//! pick the direction (Right/Down forward, Left/Up backward) and continue
//! from the last match; any other key restarts from the top going forward.
//! Enter and Escape end the session. Matching is literal, case-sensitive and
//! runs over render text, wrapping around the document at most once.

use crate::prompt::{PromptHooks, PromptHost, run_prompt};
use anyhow::Result;
use core_events::{Key, NamedKey};
use core_model::EditorModel;

pub const SEARCH_PROMPT: &str = "Search: {} (Use ESC/Arrows/Enter)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    fn step(self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchSession {
    last_match: Option<usize>,
    direction: Direction,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_match(&self) -> Option<usize> {
        self.last_match
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    fn reset(&mut self) {
        self.last_match = None;
        self.direction = Direction::Forward;
    }

    /// React to one prompt keystroke with the current query.
    pub fn on_key(&mut self, model: &mut EditorModel, query: &str, key: Key) {
        match key {
            k if k.is_enter() || k.is_escape() => {
                self.reset();
                return;
            }
            Key::Named(NamedKey::ArrowRight | NamedKey::ArrowDown) => {
                self.direction = Direction::Forward;
            }
            Key::Named(NamedKey::ArrowLeft | NamedKey::ArrowUp) => {
                self.direction = Direction::Backward;
            }
            _ => self.reset(),
        }
        if self.last_match.is_none() {
            self.direction = Direction::Forward;
        }
        if query.is_empty() {
            return;
        }
        self.advance(model, query.as_bytes());
    }

    /// Find the next row containing `needle`, starting after the last match.
    /// Leaves everything untouched when nothing matches.
    fn advance(&mut self, model: &mut EditorModel, needle: &[u8]) -> Option<usize> {
        let (state, view) = model.split_state_and_view();
        let doc = &state.document;
        let numrows = doc.row_count();
        let mut current = self.last_match.map_or(-1, |m| m as isize);
        for _ in 0..numrows {
            current += self.direction.step();
            if current < 0 {
                current = numrows as isize - 1;
            } else if current as usize >= numrows {
                current = 0;
            }
            let idx = current as usize;
            let Some(row) = doc.row(idx) else {
                continue;
            };
            if let Some(offset) = row.find_in_render(needle) {
                self.last_match = Some(idx);
                view.cursor.cy = idx;
                view.cursor.cx = row.rx_to_cx(offset);
                // Park past the end so the next scroll puts the match on the top row.
                view.viewport.rowoff = numrows;
                tracing::debug!(
                    target: "actions.search",
                    row = idx,
                    cx = view.cursor.cx,
                    direction = ?self.direction,
                    "match"
                );
                return Some(idx);
            }
        }
        tracing::debug!(target: "actions.search", rows = numrows, "no_match");
        None
    }
}

impl PromptHooks for SearchSession {
    fn on_key(&mut self, model: &mut EditorModel, input: &str, key: Key) {
        SearchSession::on_key(self, model, input, key);
    }
}

/// Run an interactive search. Cancelling restores the cursor and offsets
/// captured before the prompt opened.
pub fn find<H: PromptHost + ?Sized>(model: &mut EditorModel, host: &mut H) -> Result<()> {
    let saved = model.view().snapshot();
    let mut session = SearchSession::new();
    let query = run_prompt(model, host, SEARCH_PROMPT, &mut session)?;
    if query.is_none() {
        model.view_mut().restore(saved);
    }
    Ok(())
}
