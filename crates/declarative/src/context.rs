//! Progress and confirmation callbacks
//!
//! These traits allow the declarative crate to be used without
//! depending on a specific terminal UI.

use crate::planner::Action;
use crate::state::Address;
use crate::types::{ApplyResult, Diagnostic};
use anyhow::Result;

/// Progress callback for execution operations
///
/// Implement this trait to receive progress updates during execution.
pub trait ProgressCallback: Send {
    /// Called when starting to apply a single change
    fn on_start(&mut self, address: &Address, action: Action);

    /// Called for every diagnostic an operation reports
    fn on_diagnostic(&mut self, address: &Address, diagnostic: &Diagnostic);

    /// Called when a change completes
    fn on_complete(&mut self, address: &Address, result: &ApplyResult);
}

/// Confirmation callback for user interaction
pub trait ConfirmCallback: Send {
    /// Ask the user to confirm an action
    ///
    /// # Returns
    /// `true` if the user confirmed, `false` otherwise
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// No-op progress callback
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_start(&mut self, _address: &Address, _action: Action) {}
    fn on_diagnostic(&mut self, _address: &Address, _diagnostic: &Diagnostic) {}
    fn on_complete(&mut self, _address: &Address, _result: &ApplyResult) {}
}

/// Auto-confirm callback (always returns true)
pub struct AutoConfirm;

impl ConfirmCallback for AutoConfirm {
    fn confirm(&mut self, _prompt: &str) -> Result<bool> {
        Ok(true)
    }
}

/// Auto-decline callback (always returns false)
pub struct AutoDecline;

impl ConfirmCallback for AutoDecline {
    fn confirm(&mut self, _prompt: &str) -> Result<bool> {
        Ok(false)
    }
}
