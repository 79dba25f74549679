//! Clipboard access behind a narrow trait.
//!
//! The studio swallows copy failures (log only, no user-visible error), but
//! the outcome is still an explicit `Result` here so that behavior stays
//! observable in tests.

use anyhow::Result;

/// Sink for copy-to-clipboard.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard via arboard. The handle is created lazily on the first
/// copy; creation failure (e.g. no display server) surfaces as the copy
/// failing, not as a startup error.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.inner.is_none() {
            self.inner = Some(arboard::Clipboard::new()?);
        }
        if let Some(clipboard) = self.inner.as_mut() {
            clipboard.set_text(text.to_string())?;
        }
        Ok(())
    }
}
