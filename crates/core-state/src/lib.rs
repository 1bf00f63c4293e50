//! Editor state: the document, its file binding, the transient status
//! message and the quit confirmation guard.
//!
//! Cursor and viewport live in `core-model::View`; this crate stays
//! document-centric so edits can be tested without any presentation state.
//!
//! Status messages are ephemeral: each carries an expiry instant and the
//! compositor simply stops drawing it once `now >= expires_at`. Nothing
//! clears them eagerly.

use core_text::Document;
use std::borrow::Cow;
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub mod quit;
pub use quit::{DEFAULT_QUIT_TIMES, QuitDecision, QuitGuard};

/// Default lifetime of a status message.
pub const DEFAULT_MESSAGE_TTL: Duration = Duration::from_secs(5);

/// Stand-in lifetime when `now + ttl` is not representable.
const FALLBACK_FAR_FUTURE: Duration = Duration::from_secs(60 * 60 * 24 * 365);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EphemeralMessage {
    pub text: String,
    pub expires_at: Instant,
}

impl EphemeralMessage {
    pub fn is_visible(&self, now: Instant) -> bool {
        !self.text.is_empty() && now < self.expires_at
    }
}

#[derive(Debug)]
pub struct EditorState {
    pub document: Document,
    pub file_name: Option<PathBuf>,
    pub ephemeral_status: Option<EphemeralMessage>,
    pub quit_guard: QuitGuard,
    message_ttl: Duration,
}

impl EditorState {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            file_name: None,
            ephemeral_status: None,
            quit_guard: QuitGuard::default(),
            message_ttl: DEFAULT_MESSAGE_TTL,
        }
    }

    pub fn with_message_ttl(mut self, ttl: Duration) -> Self {
        self.message_ttl = ttl;
        self
    }

    pub fn with_quit_guard(mut self, guard: QuitGuard) -> Self {
        self.quit_guard = guard;
        self
    }

    pub fn message_ttl(&self) -> Duration {
        self.message_ttl
    }

    /// Set the status message, timestamped now.
    pub fn set_ephemeral<S: Into<String>>(&mut self, msg: S) {
        self.set_ephemeral_at(msg, Instant::now());
    }

    pub fn set_ephemeral_at<S: Into<String>>(&mut self, msg: S, now: Instant) {
        let text = msg.into();
        tracing::debug!(target: "state", len = text.len(), "status_message");
        let expires_at = now
            .checked_add(self.message_ttl)
            .or_else(|| now.checked_add(FALLBACK_FAR_FUTURE))
            .unwrap_or(now);
        self.ephemeral_status = Some(EphemeralMessage { text, expires_at });
    }

    pub fn clear_ephemeral(&mut self) {
        self.ephemeral_status = None;
    }

    /// Message text if it is still within its lifetime at `now`.
    pub fn visible_message(&self, now: Instant) -> Option<&str> {
        self.ephemeral_status
            .as_ref()
            .filter(|m| m.is_visible(now))
            .map(|m| m.text.as_str())
    }

    pub fn is_dirty(&self) -> bool {
        self.document.is_dirty()
    }

    /// File name used for display, or `None` for an unnamed buffer.
    pub fn display_name(&self) -> Option<Cow<'_, str>> {
        self.file_name.as_ref().map(|p| p.to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ephemeral_lifecycle() {
        let mut st = EditorState::new(Document::default());
        let t0 = Instant::now();
        st.set_ephemeral_at("Message", t0);
        assert_eq!(st.visible_message(t0), Some("Message"));
        assert_eq!(st.visible_message(t0 + Duration::from_secs(4)), Some("Message"));
        assert_eq!(st.visible_message(t0 + Duration::from_secs(5)), None);
    }

    #[test]
    fn custom_ttl_applies() {
        let mut st = EditorState::new(Document::default()).with_message_ttl(Duration::from_secs(1));
        let t0 = Instant::now();
        st.set_ephemeral_at("x", t0);
        assert!(st.visible_message(t0 + Duration::from_secs(2)).is_none());
    }

    #[test]
    fn huge_ttl_does_not_overflow() {
        let mut st = EditorState::new(Document::default()).with_message_ttl(Duration::MAX);
        let t0 = Instant::now();
        st.set_ephemeral_at("pinned", t0);
        assert_eq!(st.visible_message(t0 + Duration::from_secs(3600)), Some("pinned"));
    }

    #[test]
    fn display_name_is_lossy_path() {
        let mut st = EditorState::new(Document::default());
        assert!(st.display_name().is_none());
        st.file_name = Some(PathBuf::from("dir/notes.txt"));
        assert_eq!(st.display_name().as_deref(), Some("dir/notes.txt"));
    }

    #[test]
    fn empty_message_is_never_visible() {
        let mut st = EditorState::new(Document::default());
        let t0 = Instant::now();
        st.set_ephemeral_at("", t0);
        assert!(st.visible_message(t0).is_none());
    }

    #[test]
    fn dirty_tracks_document() {
        let mut st = EditorState::new(Document::default());
        assert!(!st.is_dirty());
        st.document.insert_row(0, b"a".to_vec());
        assert!(st.is_dirty());
    }
}
