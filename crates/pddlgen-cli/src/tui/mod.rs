//! Interactive studio: tabbed viewer over the generated artifacts.

pub mod app;
mod clipboard;
mod ui;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use pddlgen_core::ProjectGenerator;

use app::App;
use clipboard::{ClipboardSink, SystemClipboard};

/// How long to block on terminal events before running a housekeeping tick
/// (drain settled generations, expire the copy acknowledgement, redraw).
const TICK_RATE: Duration = Duration::from_millis(250);

/// Launch the studio.
pub async fn run_studio(generator: Arc<dyn ProjectGenerator>, out_dir: PathBuf) -> Result<()> {
    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(generator, out_dir);
    let mut clipboard = SystemClipboard::new();

    let result = run_event_loop(&mut terminal, &mut app, &mut clipboard).await;

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    clipboard: &mut dyn ClipboardSink,
) -> Result<()> {
    loop {
        let now = Instant::now();
        app.drain_settled();
        app.tick(now);

        terminal.draw(|f| ui::render(f, app, now))?;

        // Poll for events with a timeout matching the tick rate.
        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Clear status message on any keypress.
                app.status_message = None;

                match key.code {
                    KeyCode::Esc if app.show_prompt => {
                        app.toggle_prompt();
                    }
                    KeyCode::Char('q') | KeyCode::Esc => {
                        app.should_quit = true;
                    }
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.should_quit = true;
                    }
                    KeyCode::Char('g') => {
                        app.start_generation();
                    }
                    KeyCode::Char('p') => {
                        app.toggle_prompt();
                    }
                    KeyCode::Tab | KeyCode::Right => {
                        app.next_tab();
                    }
                    KeyCode::BackTab | KeyCode::Left => {
                        app.prev_tab();
                    }
                    KeyCode::Char('j') | KeyCode::Down => {
                        app.scroll_down();
                    }
                    KeyCode::Char('k') | KeyCode::Up => {
                        app.scroll_up();
                    }
                    KeyCode::Char('c') => {
                        app.copy_active(clipboard, Instant::now());
                    }
                    KeyCode::Char('s') => {
                        app.save_active();
                    }
                    KeyCode::Char('S') => {
                        app.save_all();
                    }
                    _ => {}
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
