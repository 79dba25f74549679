//! Studio application state and key actions.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::warn;

use pddlgen_core::{
    Artifact, GeneratedProject, GenerationError, GenerationToken, ProjectGenerator, Session, prompt,
};

use super::clipboard::ClipboardSink;

/// How long the copy acknowledgement stays visible.
pub const COPY_ACK_TTL: Duration = Duration::from_millis(2000);

type Outcome = Result<GeneratedProject, GenerationError>;

/// A settled generation attempt, delivered from the spawned task back to
/// the event loop.
pub struct Settled {
    token: GenerationToken,
    outcome: Outcome,
}

/// Application state for the studio.
pub struct App {
    pub session: Session,
    generator: Arc<dyn ProjectGenerator>,
    settled_tx: mpsc::UnboundedSender<Settled>,
    settled_rx: mpsc::UnboundedReceiver<Settled>,
    /// Active tab. Deliberately persists across regeneration.
    pub active: Artifact,
    pub scroll: u16,
    /// Whether the pane showing the outgoing prompt is open.
    pub show_prompt: bool,
    pub prompt_scroll: u16,
    copied_at: Option<Instant>,
    pub status_message: Option<String>,
    pub out_dir: PathBuf,
    pub should_quit: bool,
}

impl App {
    pub fn new(generator: Arc<dyn ProjectGenerator>, out_dir: PathBuf) -> Self {
        let (settled_tx, settled_rx) = mpsc::unbounded_channel();
        Self {
            session: Session::new(),
            generator,
            settled_tx,
            settled_rx,
            active: Artifact::Report,
            scroll: 0,
            show_prompt: false,
            prompt_scroll: 0,
            copied_at: None,
            status_message: None,
            out_dir,
            should_quit: false,
        }
    }

    /// Kick off a generation attempt. The session enters the loading state
    /// synchronously; the outcome arrives later through the channel. An
    /// already-outstanding attempt is not cancelled -- its result will come
    /// back carrying a stale token and be discarded by the session.
    pub fn start_generation(&mut self) {
        let token = self.session.begin();
        let generator = Arc::clone(&self.generator);
        let tx = self.settled_tx.clone();
        tokio::spawn(async move {
            let outcome = generator.generate(prompt::PROJECT_BRIEF).await;
            let _ = tx.send(Settled { token, outcome });
        });
    }

    /// Drain any settled attempts into the session.
    pub fn drain_settled(&mut self) {
        while let Ok(settled) = self.settled_rx.try_recv() {
            self.apply(settled);
        }
    }

    fn apply(&mut self, settled: Settled) {
        if self.session.settle(settled.token, settled.outcome) {
            self.scroll = 0;
        }
    }

    // -- Tabs and scrolling --

    pub fn next_tab(&mut self) {
        self.active = self.active.next();
        self.scroll = 0;
    }

    pub fn prev_tab(&mut self) {
        self.active = self.active.prev();
        self.scroll = 0;
    }

    pub fn scroll_down(&mut self) {
        if self.show_prompt {
            self.prompt_scroll = self.prompt_scroll.saturating_add(1);
        } else {
            self.scroll = self.scroll.saturating_add(1);
        }
    }

    pub fn scroll_up(&mut self) {
        if self.show_prompt {
            self.prompt_scroll = self.prompt_scroll.saturating_sub(1);
        } else {
            self.scroll = self.scroll.saturating_sub(1);
        }
    }

    /// Show or hide the pane with the prompt sent to the model.
    pub fn toggle_prompt(&mut self) {
        self.show_prompt = !self.show_prompt;
        self.prompt_scroll = 0;
    }

    // -- Copy --

    /// Copy the active artifact to the clipboard.
    ///
    /// Success shows a transient acknowledgement; failure is logged and
    /// otherwise swallowed -- the acknowledgement simply never appears.
    pub fn copy_active(&mut self, sink: &mut dyn ClipboardSink, now: Instant) {
        let result = match self.session.content() {
            Some(project) => sink.write_text(self.active.text(project)),
            None => return,
        };
        match result {
            Ok(()) => self.copied_at = Some(now),
            Err(e) => warn!(cause = ?e, "clipboard copy failed"),
        }
    }

    /// Whether the copy acknowledgement is currently visible.
    pub fn copy_acknowledged(&self, now: Instant) -> bool {
        self.copied_at
            .is_some_and(|at| now.duration_since(at) < COPY_ACK_TTL)
    }

    /// Tick housekeeping: expire the copy acknowledgement.
    pub fn tick(&mut self, now: Instant) {
        if let Some(at) = self.copied_at {
            if now.duration_since(at) >= COPY_ACK_TTL {
                self.copied_at = None;
            }
        }
    }

    // -- Save --

    /// Save the active artifact under its fixed filename.
    pub fn save_active(&mut self) {
        let result = match self.session.content() {
            Some(project) => project.save_artifact(self.active, &self.out_dir),
            None => return,
        };
        match result {
            Ok(path) => self.status_message = Some(format!("Saved {}", path.display())),
            Err(e) => {
                warn!(cause = ?e, "save failed");
                self.status_message = Some(format!("Save failed: {e}"));
            }
        }
    }

    /// Save all four artifacts.
    pub fn save_all(&mut self) {
        let result = match self.session.content() {
            Some(project) => project.save_all(&self.out_dir),
            None => return,
        };
        match result {
            Ok(paths) => {
                self.status_message = Some(format!(
                    "Saved {} files to {}",
                    paths.len(),
                    self.out_dir.display()
                ));
            }
            Err(e) => {
                warn!(cause = ?e, "save failed");
                self.status_message = Some(format!("Save failed: {e}"));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
