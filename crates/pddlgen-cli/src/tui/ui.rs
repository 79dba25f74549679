//! Studio rendering using ratatui.

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};

use pddlgen_core::{Artifact, GeneratedProject, SessionView};

use super::app::App;

/// Render the whole studio frame.
pub fn render(f: &mut Frame, app: &App, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(3),    // main content
            Constraint::Length(1), // status bar
        ])
        .split(f.area());

    render_header(f, chunks[0]);

    if app.show_prompt {
        render_prompt(f, app, chunks[1]);
    } else {
        match app.session.view() {
            SessionView::Loading => render_loading(f, chunks[1]),
            SessionView::Error(message) => render_error(f, message, chunks[1]),
            SessionView::Populated(project) => render_project(f, app, project, chunks[1], now),
            SessionView::Idle => render_idle(f, chunks[1]),
        }
    }

    render_status_bar(f, app, chunks[2]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "pddlgen",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  classical planning project generator"),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn render_idle(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Project Output",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Press g to have the model create the PDDL files and report."),
    ];
    let placeholder = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(placeholder, area);
}

fn render_loading(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Generating project...",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("The model is crafting your files. This may take a moment."),
    ];
    let progress = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(progress, area);
}

fn render_error(f: &mut Frame, message: &str, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "An Error Occurred",
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(message.to_string()),
    ];
    let error = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Error "),
        );
    f.render_widget(error, area);
}

fn render_project(f: &mut Frame, app: &App, project: &GeneratedProject, area: Rect, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    // Tab selector.
    let titles: Vec<Line> = Artifact::ALL.iter().map(|a| Line::from(a.label())).collect();
    let tabs = Tabs::new(titles)
        .select(app.active.index())
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(tabs, chunks[0]);

    // Active artifact as a scrollable monospaced block.
    let title = if app.copy_acknowledged(now) {
        format!(" {} (copied!) ", app.active.filename())
    } else {
        format!(" {} ", app.active.filename())
    };
    let body = Paragraph::new(app.active.text(project))
        .scroll((app.scroll, 0))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(body, chunks[1]);
}

fn render_prompt(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let body = Paragraph::new(pddlgen_core::prompt::PROJECT_BRIEF.trim())
        .scroll((app.prompt_scroll, 0))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" AI Studio Prompt "),
        );
    f.render_widget(body, chunks[0]);

    let note = Paragraph::new(Span::styled(
        "This exact text is sent to the model. Press p or Esc to close.",
        Style::default().fg(Color::DarkGray),
    ));
    f.render_widget(note, chunks[1]);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status_msg = app.status_message.as_deref().unwrap_or("");

    let bar = Line::from(vec![
        Span::styled(
            " studio ",
            Style::default().bg(Color::Blue).fg(Color::White),
        ),
        Span::raw("  "),
        Span::styled(status_msg, Style::default().fg(Color::Green)),
        Span::raw(
            "  g:generate  Tab:next tab  p:prompt  c:copy  s:save  S:save all  j/k:scroll  q:quit",
        ),
    ]);

    f.render_widget(Paragraph::new(bar), area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;
    use std::sync::Arc;

    use async_trait::async_trait;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use pddlgen_core::{GeneratedProject, GenerationError, ProjectGenerator};

    struct NeverGenerator;

    #[async_trait]
    impl ProjectGenerator for NeverGenerator {
        async fn generate(&self, _brief: &str) -> Result<GeneratedProject, GenerationError> {
            Err(GenerationError::EmptyResponse)
        }
    }

    fn test_app() -> App {
        App::new(Arc::new(NeverGenerator), PathBuf::from("unused-out"))
    }

    fn draw_to_string(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, app, Instant::now())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    #[test]
    fn idle_view_shows_the_placeholder() {
        let app = test_app();
        let screen = draw_to_string(&app);
        assert!(screen.contains("Project Output"));
        assert!(screen.contains("Press g"));
    }

    #[test]
    fn populated_view_shows_the_tabs_and_active_artifact() {
        let mut app = test_app();
        let token = app.session.begin();
        app.session.settle(
            token,
            Ok(GeneratedProject {
                project_report: "the report body".to_string(),
                domain_pddl: "(define (domain test))".to_string(),
                problem_pddl: "p".to_string(),
                planner_output: "o".to_string(),
            }),
        );

        let screen = draw_to_string(&app);
        assert!(screen.contains("Report"));
        assert!(screen.contains("domain.pddl"));
        assert!(screen.contains("Planner Output"));
        assert!(screen.contains("the report body"));
    }

    #[test]
    fn error_view_shows_the_stored_message_verbatim() {
        let mut app = test_app();
        let token = app.session.begin();
        app.session
            .settle(token, Err(GenerationError::EmptyResponse));

        let screen = draw_to_string(&app);
        assert!(screen.contains("An Error Occurred"));
        assert!(screen.contains("Failed to generate project."));
    }

    #[test]
    fn prompt_pane_shows_the_trimmed_brief_over_any_view() {
        let mut app = test_app();
        app.session.begin();
        app.toggle_prompt();

        let screen = draw_to_string(&app);
        assert!(screen.contains("AI Studio Prompt"));
        assert!(screen.contains("This exact text is sent to the model."));
        let first_line = pddlgen_core::prompt::PROJECT_BRIEF
            .trim()
            .lines()
            .next()
            .unwrap();
        assert!(screen.contains(first_line.trim_end()));
        assert!(!screen.contains("Generating project..."));
    }

    #[test]
    fn loading_view_shows_the_progress_text() {
        let mut app = test_app();
        app.session.begin();

        let screen = draw_to_string(&app);
        assert!(screen.contains("Generating project..."));
    }
}
