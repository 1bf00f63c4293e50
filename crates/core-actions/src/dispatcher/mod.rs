//! Dispatcher applying `Action` to the editor model.
//!
//! Sub-modules:
//! * `motion`  - cursor movement
//! * `edit`    - text mutation (insert/delete/newline)
//! * `command` - save, find and quit
//!
//! Every action other than `Quit` re-arms the quit guard, so the unsaved
//! changes warning only counts consecutive quit requests.

use crate::Action;
use crate::prompt::PromptHost;
use anyhow::Result;
use core_model::EditorModel;

mod command;
mod edit;
mod motion;

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// The action changed document or view state.
    pub dirty: bool,
    pub quit: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: false,
            quit: true,
        }
    }
}

/// Apply an action. Only failures of the prompt host (terminal IO) are
/// returned as errors; editing edge cases are absorbed as no-ops.
pub fn dispatch<H: PromptHost + ?Sized>(
    action: Action,
    model: &mut EditorModel,
    host: &mut H,
) -> Result<DispatchResult> {
    tracing::trace!(target: "actions.dispatch", ?action, "dispatch");
    if action != Action::Quit {
        model.state_mut().quit_guard.reset();
    }
    let result = match action {
        Action::Motion(kind) => {
            let (state, view) = model.split_state_and_view();
            motion::handle_motion(kind, state, view)
        }
        Action::Edit(kind) => {
            let (state, view) = model.split_state_and_view();
            edit::handle_edit(kind, state, view)
        }
        Action::Save => command::handle_save(model, host)?,
        Action::Find => command::handle_find(model, host)?,
        Action::Quit => command::handle_quit(model),
        Action::Refresh => DispatchResult::clean(),
    };
    Ok(result)
}
