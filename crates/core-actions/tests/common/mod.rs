#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use anyhow::Result;
use core_actions::{PromptHost, dispatch, translate_key};
use core_events::Key;
use core_model::{EditorModel, Viewport};
use core_state::EditorState;
use core_text::Document;
use std::collections::VecDeque;

/// Prompt host fed from a fixed key script; records the message bar text at
/// every repaint.
pub struct ScriptedHost {
    keys: VecDeque<Key>,
    pub refreshes: Vec<Option<String>>,
}

impl ScriptedHost {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            refreshes: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl PromptHost for ScriptedHost {
    fn refresh(&mut self, model: &mut EditorModel) -> Result<()> {
        model.scroll();
        self.refreshes.push(
            model
                .state()
                .ephemeral_status
                .as_ref()
                .map(|m| m.text.clone()),
        );
        Ok(())
    }

    fn read_key(&mut self) -> Result<Key> {
        self.keys
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("key script exhausted"))
    }
}

pub fn model(lines: &[&str]) -> EditorModel {
    let doc = Document::from_lines(lines.iter().map(|l| l.as_bytes().to_vec()), 8);
    EditorModel::new(
        EditorState::new(doc),
        Viewport {
            screenrows: 20,
            screencols: 80,
            ..Viewport::default()
        },
    )
}

pub fn keys(s: &str) -> Vec<Key> {
    s.bytes().map(Key::Byte).collect()
}

/// Drive the top-level loop the way the runtime does: read a key from the
/// host, translate, dispatch. Stops when the script runs out or on quit.
pub fn run_script(model: &mut EditorModel, host: &mut ScriptedHost) -> Result<bool> {
    while host.remaining() > 0 {
        host.refresh(model)?;
        let key = host.read_key()?;
        let result = dispatch(translate_key(key), model, host)?;
        if result.quit {
            return Ok(true);
        }
    }
    Ok(false)
}
