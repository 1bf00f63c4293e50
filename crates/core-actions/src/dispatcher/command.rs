//! Save, find and quit.

use super::DispatchResult;
use crate::io_ops::{WriteFileResult, write_file};
use crate::prompt::{NoopPromptHooks, PromptHost, run_prompt};
use crate::search;
use anyhow::Result;
use core_model::EditorModel;
use core_state::QuitDecision;
use std::path::PathBuf;

const SAVE_AS_PROMPT: &str = "Save as: {} (ESC to cancel)";

pub(crate) fn handle_save<H: PromptHost + ?Sized>(
    model: &mut EditorModel,
    host: &mut H,
) -> Result<DispatchResult> {
    if model.state().file_name.is_none() {
        match run_prompt(model, host, SAVE_AS_PROMPT, &mut NoopPromptHooks)? {
            Some(name) => model.state_mut().file_name = Some(PathBuf::from(name)),
            None => {
                model.state_mut().set_ephemeral("Save aborted");
                return Ok(DispatchResult::clean());
            }
        }
    }
    let state = model.state_mut();
    match write_file(state) {
        WriteFileResult::Success { bytes } => {
            state.set_ephemeral(format!("{bytes} bytes written to disk"));
        }
        WriteFileResult::NoFilename => state.set_ephemeral("Save aborted"),
        WriteFileResult::Error(e) => {
            state.set_ephemeral(format!("Can't save! I/O error: {e}"));
        }
    }
    Ok(DispatchResult::dirty())
}

pub(crate) fn handle_find<H: PromptHost + ?Sized>(
    model: &mut EditorModel,
    host: &mut H,
) -> Result<DispatchResult> {
    search::find(model, host)?;
    Ok(DispatchResult::dirty())
}

pub(crate) fn handle_quit(model: &mut EditorModel) -> DispatchResult {
    let state = model.state_mut();
    let dirty = state.is_dirty();
    match state.quit_guard.request(dirty) {
        QuitDecision::Proceed => {
            tracing::info!(target: "actions.dispatch", dirty, "quit");
            DispatchResult::quit()
        }
        QuitDecision::Confirm { remaining } => {
            state.set_ephemeral(format!(
                "WARNING!!! File has unsaved changes. Press Ctrl-Q {remaining} more times to quit."
            ));
            DispatchResult::dirty()
        }
    }
}
