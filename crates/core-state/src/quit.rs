//! Quit confirmation: a saturating countdown armed while the document has
//! unsaved edits.

/// Number of consecutive quit requests required on a dirty document.
pub const DEFAULT_QUIT_TIMES: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuitDecision {
    /// Quit now.
    Proceed,
    /// Refused; `remaining` more consecutive requests will quit.
    Confirm { remaining: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuitGuard {
    threshold: u32,
    remaining: u32,
}

impl Default for QuitGuard {
    fn default() -> Self {
        Self::new(DEFAULT_QUIT_TIMES)
    }
}

impl QuitGuard {
    pub fn new(threshold: u32) -> Self {
        let threshold = threshold.max(1);
        Self {
            threshold,
            remaining: threshold,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Register a quit request. A clean document quits immediately; a dirty
    /// one quits on the request that brings the counter to zero.
    pub fn request(&mut self, dirty: bool) -> QuitDecision {
        if !dirty {
            return QuitDecision::Proceed;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            QuitDecision::Proceed
        } else {
            QuitDecision::Confirm {
                remaining: self.remaining,
            }
        }
    }

    /// Any non-quit action re-arms the guard.
    pub fn reset(&mut self) {
        self.remaining = self.threshold;
    }
}
