//! Modal single-line input shown in the message bar.
//!
//! The prompt owns only its input buffer; repainting and key reads go through
//! a [`PromptHost`] so the same loop drives the real terminal and scripted
//! tests. After every keystroke, including the confirming or cancelling one,
//! the [`PromptHooks`] receive the current input and the key. Incremental
//! search is the one non-trivial hook.

use anyhow::Result;
use core_events::{Key, NamedKey, ctrl};
use core_model::EditorModel;

/// Substitution point for the in-progress input inside a prompt template.
pub const INPUT_SLOT: &str = "{}";

/// Terminal-facing side of a modal prompt.
pub trait PromptHost {
    /// Compose and emit one frame for the current model.
    fn refresh(&mut self, model: &mut EditorModel) -> Result<()>;
    /// Block until the next decoded key.
    fn read_key(&mut self) -> Result<Key>;
}

/// Per-keystroke observer. The default implementation does nothing.
pub trait PromptHooks {
    fn on_key(&mut self, _model: &mut EditorModel, _input: &str, _key: Key) {}
}

/// Prompt without a per-keystroke callback (save-as).
pub struct NoopPromptHooks;

impl PromptHooks for NoopPromptHooks {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptStep {
    Pending,
    Confirmed(String),
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct LinePrompt {
    template: String,
    input: String,
}

impl LinePrompt {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            input: String::new(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Template with the input substituted at the first `{}`.
    pub fn display(&self) -> String {
        self.template.replacen(INPUT_SLOT, &self.input, 1)
    }

    /// Apply one keystroke. Enter on an empty input keeps the prompt open.
    pub fn feed(&mut self, key: Key) -> PromptStep {
        match key {
            Key::Named(NamedKey::Escape) => PromptStep::Cancelled,
            Key::Named(NamedKey::Backspace | NamedKey::Delete) => {
                self.input.pop();
                PromptStep::Pending
            }
            Key::Byte(b) if b == ctrl(b'h') => {
                self.input.pop();
                PromptStep::Pending
            }
            k if k.is_enter() => {
                if self.input.is_empty() {
                    PromptStep::Pending
                } else {
                    PromptStep::Confirmed(self.input.clone())
                }
            }
            k => {
                if let Some(b) = k.printable() {
                    self.input.push(b as char);
                }
                PromptStep::Pending
            }
        }
    }
}

/// Run a prompt to completion. Returns `None` when the user cancelled.
pub fn run_prompt<H, C>(
    model: &mut EditorModel,
    host: &mut H,
    template: &str,
    hooks: &mut C,
) -> Result<Option<String>>
where
    H: PromptHost + ?Sized,
    C: PromptHooks + ?Sized,
{
    let mut prompt = LinePrompt::new(template);
    tracing::debug!(target: "actions.prompt", template, "prompt_open");
    loop {
        model.state_mut().set_ephemeral(prompt.display());
        host.refresh(model)?;
        let key = host.read_key()?;
        let step = prompt.feed(key);
        if step != PromptStep::Pending {
            model.state_mut().clear_ephemeral();
        }
        hooks.on_key(model, prompt.input(), key);
        match step {
            PromptStep::Pending => continue,
            PromptStep::Confirmed(value) => {
                tracing::debug!(target: "actions.prompt", len = value.len(), "prompt_confirmed");
                return Ok(Some(value));
            }
            PromptStep::Cancelled => {
                tracing::debug!(target: "actions.prompt", "prompt_cancelled");
                return Ok(None);
            }
        }
    }
}
