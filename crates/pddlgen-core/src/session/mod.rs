//! Session state machine for the generate action.
//!
//! Owns the loading/content/error triple the viewer renders from. Every
//! generation attempt gets a monotonically increasing token at `begin`;
//! `settle` applies a result only if it carries the latest issued token.
//! Overlapping attempts therefore resolve deterministically as
//! last-invoked-wins, with stale results discarded instead of clobbering
//! newer state.

use tracing::{debug, error};

use crate::generate::GenerationError;
use crate::project::GeneratedProject;

/// Token identifying one generation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationToken(u64);

/// Exactly one of these describes the session at any time, in this
/// priority order.
#[derive(Debug, PartialEq)]
pub enum SessionView<'a> {
    Idle,
    Loading,
    Error(&'a str),
    Populated(&'a GeneratedProject),
}

/// Ephemeral, process-local UI session state. Nothing here persists.
#[derive(Debug, Default)]
pub struct Session {
    loading: bool,
    content: Option<GeneratedProject>,
    error: Option<String>,
    issued: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a generation attempt: synchronously enter the loading state,
    /// discarding any prior content or error, and issue the attempt token.
    pub fn begin(&mut self) -> GenerationToken {
        self.issued += 1;
        self.loading = true;
        self.content = None;
        self.error = None;
        GenerationToken(self.issued)
    }

    /// Settle a generation attempt.
    ///
    /// Applied only if `token` is the latest issued one; a stale settlement
    /// is dropped and the session left untouched. Returns whether the
    /// outcome was applied. On failure the raw cause goes to the diagnostic
    /// log and only the fixed user-safe message is stored.
    pub fn settle(
        &mut self,
        token: GenerationToken,
        outcome: Result<GeneratedProject, GenerationError>,
    ) -> bool {
        if token.0 != self.issued {
            debug!(
                settled = token.0,
                latest = self.issued,
                "discarding stale generation result"
            );
            return false;
        }

        self.loading = false;
        match outcome {
            Ok(project) => {
                self.content = Some(project);
                self.error = None;
            }
            Err(e) => {
                error!(cause = ?e, "generation failed");
                self.content = None;
                self.error = Some(e.user_message().to_string());
            }
        }
        true
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn content(&self) -> Option<&GeneratedProject> {
        self.content.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Project the single visible state.
    pub fn view(&self) -> SessionView<'_> {
        if self.loading {
            SessionView::Loading
        } else if let Some(msg) = &self.error {
            SessionView::Error(msg)
        } else if let Some(project) = &self.content {
            SessionView::Populated(project)
        } else {
            SessionView::Idle
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
