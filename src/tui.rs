use anyhow::Result;
use chrono::NaiveDate;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use std::io::stdout;

use crate::api::CareerApi;
use crate::models::{Application, ApplicationId, ApplicationStatus};
use crate::render;
use crate::tracker::{ApplicationCard, Tracker};

/// Requests the board can issue. Each one runs with the busy marker shown.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Refresh,
    SetStatus(ApplicationId, ApplicationStatus),
    Delete(ApplicationId),
    Email(ApplicationId),
    Reminders,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Mode {
    #[default]
    Browse,
    ConfirmDelete(ApplicationId),
    Popup {
        title: String,
        body: String,
    },
}

#[derive(Debug, Default)]
pub struct Board {
    selected: usize,
    scroll_offset: u16,
    mode: Mode,
    busy: bool,
    message: Option<String>,
    quit: bool,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    fn current<'a>(&self, tracker: &'a Tracker) -> Option<&'a Application> {
        tracker.applications().get(self.selected)
    }

    fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    fn next(&mut self, len: usize) {
        if len > 0 && self.selected < len - 1 {
            self.selected += 1;
            self.scroll_offset = 0;
        }
    }

    fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.scroll_offset = 0;
        }
    }

    /// Maps a key press to a request, if any. Navigation and confirmation are handled in place.
    pub fn handle_key(&mut self, tracker: &Tracker, code: KeyCode) -> Option<Action> {
        match std::mem::take(&mut self.mode) {
            Mode::ConfirmDelete(id) => {
                if code == KeyCode::Char('y') {
                    return Some(Action::Delete(id));
                }
                self.message = Some("Delete cancelled".to_string());
                return None;
            }
            Mode::Popup { .. } => return None,
            Mode::Browse => {}
        }

        let len = tracker.applications().len();
        let current = self.current(tracker).map(|app| app.id.clone());
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.next(len),
            KeyCode::Up | KeyCode::Char('k') => self.prev(),
            KeyCode::Char('J') | KeyCode::PageDown => {
                self.scroll_offset = self.scroll_offset.saturating_add(3)
            }
            KeyCode::Char('K') | KeyCode::PageUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(3)
            }
            KeyCode::Char('r') => return Some(Action::Refresh),
            KeyCode::Char('m') => return Some(Action::Reminders),
            KeyCode::Char('e') => return current.map(Action::Email),
            KeyCode::Char('d') => {
                if let Some(id) = current {
                    self.message = Some(format!("Delete {}? y to confirm, any other key cancels", id));
                    self.mode = Mode::ConfirmDelete(id);
                }
            }
            KeyCode::Char(c @ '1'..='6') => {
                let index = c as usize - '1' as usize;
                let status = ApplicationStatus::ALL[index];
                return current.map(|id| Action::SetStatus(id, status));
            }
            _ => {}
        }
        None
    }

    pub fn begin(&mut self) {
        self.busy = true;
        self.message = None;
    }

    /// Runs one request. The busy marker is cleared whatever the outcome; failures go to the status line.
    pub fn perform(&mut self, api: &dyn CareerApi, tracker: &mut Tracker, action: Action) {
        self.busy = true;
        let result = match action {
            Action::Refresh => {
                let report = tracker.refresh(api);
                if report.all_ok() {
                    Ok(None)
                } else {
                    Ok(Some("Some views could not be refreshed".to_string()))
                }
            }
            Action::SetStatus(id, status) => tracker
                .change_status(api, &id, status)
                .map(|_| Some(format!("Status updated to {}", status)))
                .map_err(|err| err.to_string()),
            Action::Delete(id) => tracker
                .delete(api, &id, true)
                .map(|_| Some("Application deleted".to_string()))
                .map_err(|err| err.to_string()),
            Action::Email(id) => tracker
                .follow_up_email(api, &id)
                .map(|body| {
                    self.mode = Mode::Popup {
                        title: " Follow-up email ".to_string(),
                        body,
                    };
                    None
                })
                .map_err(|err| err.to_string()),
            Action::Reminders => tracker
                .show_reminders(api)
                .map(|digest| {
                    self.mode = Mode::Popup {
                        title: format!(" Reminders ({}) ", digest.count),
                        body: render::reminders(&digest),
                    };
                    None
                })
                .map_err(|err| err.to_string()),
        };
        self.busy = false;
        self.message = match result {
            Ok(message) => message,
            Err(message) => Some(message),
        };
        self.clamp(tracker.applications().len());
    }
}

pub fn run_board(api: &dyn CareerApi, tracker: &mut Tracker, today: NaiveDate) -> Result<()> {
    tracker.refresh(api);

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_loop(&mut terminal, api, tracker, today);

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    api: &dyn CareerApi,
    tracker: &mut Tracker,
    today: NaiveDate,
) -> Result<()> {
    let mut board = Board::new();
    let mut list_state = ListState::default();

    while !board.should_quit() {
        list_state.select(Some(board.selected).filter(|_| !tracker.applications().is_empty()));
        terminal.draw(|frame| draw(frame, &board, tracker, today, &mut list_state))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(action) = board.handle_key(tracker, key.code) {
                board.begin();
                terminal.draw(|frame| draw(frame, &board, tracker, today, &mut list_state))?;
                board.perform(api, tracker, action);
            }
        }
    }
    Ok(())
}

fn status_style(status: ApplicationStatus) -> Style {
    match status {
        ApplicationStatus::Applied => Style::default().fg(Color::Cyan),
        ApplicationStatus::Viewed => Style::default().fg(Color::Blue),
        ApplicationStatus::InterviewScheduled => Style::default().fg(Color::Yellow),
        ApplicationStatus::Interviewed => Style::default().fg(Color::Magenta),
        ApplicationStatus::Rejected => Style::default().fg(Color::Red),
        ApplicationStatus::Offer => Style::default().fg(Color::Green),
    }
}

fn draw(
    frame: &mut Frame,
    board: &Board,
    tracker: &Tracker,
    today: NaiveDate,
    list_state: &mut ListState,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    frame.render_widget(Paragraph::new(header_line(tracker, board)), rows[0]);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    let cards = tracker.cards(today);

    // Left panel: application list
    let items: Vec<ListItem> = cards
        .iter()
        .map(|card| {
            let app = card.application;
            let marker = if card.needs_follow_up { "!" } else { " " };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Red)),
                Span::raw(format!(
                    " {} | {} ",
                    render::truncate(&app.company, 18),
                    render::truncate(&app.position, 22)
                )),
                Span::styled(app.status.label(), status_style(app.status)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Applications ({}) ", cards.len())),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, chunks[0], list_state);

    // Right panel: application detail
    let detail = Paragraph::new(build_detail(cards.get(board.selected)))
        .block(Block::default().borders(Borders::ALL).title(" Detail "))
        .wrap(Wrap { trim: false })
        .scroll((board.scroll_offset, 0));
    frame.render_widget(detail, chunks[1]);

    let status_line = match (board.is_busy(), board.message()) {
        (true, _) => Span::styled(" Working...", Style::default().fg(Color::Yellow)),
        (false, Some(message)) => Span::styled(format!(" {}", message), Style::default().fg(Color::Red)),
        (false, None) => Span::raw(""),
    };
    frame.render_widget(Paragraph::new(Line::from(status_line)), rows[2]);

    let help = Paragraph::new(
        " j/k:navigate  J/K:scroll  1-6:status  d:delete  e:email  m:reminders  r:refresh  q:quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, rows[3]);

    if let Mode::Popup { title, body } = board.mode() {
        let area = centered(frame.area(), 70, 70);
        frame.render_widget(Clear, area);
        let popup = Paragraph::new(body.as_str())
            .block(Block::default().borders(Borders::ALL).title(title.as_str()))
            .wrap(Wrap { trim: false });
        frame.render_widget(popup, area);
    }
}

fn header_line(tracker: &Tracker, board: &Board) -> Line<'static> {
    let mut spans = Vec::new();
    if let Some(stats) = tracker.statistics() {
        spans.push(Span::raw(format!(
            " Total {}  Response {}%  Interviews {}  Offers {}",
            stats.total_applications, stats.response_rate, stats.interviews, stats.offers
        )));
    }
    let count = tracker.reminder_count();
    if count > 0 {
        spans.push(Span::styled(
            format!("  [{} follow-up{}]", count, if count == 1 { "" } else { "s" }),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }
    if board.is_busy() {
        spans.push(Span::styled("  *", Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
}

fn build_detail<'a>(card: Option<&ApplicationCard<'a>>) -> Text<'a> {
    let Some(card) = card else {
        return Text::raw("No application selected");
    };
    let app = card.application;

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        app.company.as_str(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(app.position.as_str()));
    lines.push(Line::from(Span::styled(
        format!("Status: {}", app.status),
        status_style(app.status),
    )));
    if card.needs_follow_up {
        lines.push(Line::from(Span::styled(
            "Follow-up needed!",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(""));

    let applied = match card.days_since_applied {
        Some(days) => format!("Applied: {} ({} days ago)", app.date_applied, days),
        None => format!("Applied: {}", app.date_applied),
    };
    lines.push(Line::from(applied));
    lines.push(Line::from(format!(
        "Follow-up: {}",
        app.follow_up_date.as_deref().unwrap_or("N/A")
    )));
    lines.push(Line::from(format!(
        "Job posting: {}",
        app.job_url.as_deref().unwrap_or("N/A")
    )));
    lines.push(Line::from(Span::styled(
        format!("ID: {}", app.id),
        Style::default().fg(Color::DarkGray),
    )));

    if let Some(notes) = &app.notes {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Notes",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for line in textwrap::fill(notes, 60).lines() {
            lines.push(Line::from(format!("  {}", line)));
        }
    }

    Text::from(lines)
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
