//! Interactive highlight viewer
//!
//! All behavior lives in [`ViewerState`], which owns the [`Session`] and maps
//! key presses to session commands. It never touches the terminal, so it can
//! be driven directly in tests. [`ViewerApp`] pairs it with an [`App`] and
//! renders it with [`render`].

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap,
    },
    Frame,
};
use tracing::debug;

use super::app::status_footer::{render_footer, render_status_line, StatusKind};
use super::app::{App, TuiApp};
use super::ui::{build_layout, centered_rect, modal_rect};
use crate::query::SearchOutcome;
use crate::session::{Command, Output, Picked, Session};
use crate::store::{Context, Entry};
use crate::summary::{TitleSummary, SUMMARY_HEADER};
use crate::theme::{current_theme, Theme};

/// Rows moved by PageUp/PageDown.
const PAGE: u16 = 10;

/// UI mode for the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// The current random highlight
    #[default]
    Highlight,
    /// Current highlight with its neighbors in the same title
    Context,
    /// Title list with a live keyword filter
    Titles,
    /// Every highlight of the selected title
    TitleHighlights,
    /// Typing a search term
    SearchInput,
    /// Highlights matching the last search
    SearchResults,
    /// Title/author/year table
    Summary,
    /// Keyboard shortcuts overlay
    Help,
}

/// Viewer state and key handling.
pub struct ViewerState {
    session: Session,
    export_dir: PathBuf,
    mode: Mode,
    /// Mode restored when help closes
    previous_mode: Mode,
    status: Option<(String, StatusKind)>,
    picked: Option<Picked>,
    context: Option<Context>,
    title_filter: String,
    titles: Vec<String>,
    title_idx: usize,
    /// Highlight and title counts of the loaded store
    totals: Option<(usize, usize)>,
    shown_title: Option<(String, Vec<Entry>)>,
    search_input: String,
    search_results: Vec<Entry>,
    summary: Vec<TitleSummary>,
    summary_idx: usize,
    scroll: u16,
    quit: bool,
}

impl ViewerState {
    /// Wraps a loaded session and shows a first random highlight.
    pub fn new(session: Session, export_dir: PathBuf) -> Self {
        let mut state = Self {
            session,
            export_dir,
            mode: Mode::Highlight,
            previous_mode: Mode::Highlight,
            status: None,
            picked: None,
            context: None,
            title_filter: String::new(),
            titles: Vec::new(),
            title_idx: 0,
            totals: None,
            shown_title: None,
            search_input: String::new(),
            search_results: Vec::new(),
            summary: Vec::new(),
            summary_idx: 0,
            scroll: 0,
            quit: false,
        };
        if let Ok(Output::Titles(titles)) = state.session.handle(Command::FindTitles(String::new()))
        {
            let highlights = titles.iter().map(|t| t.highlights).sum();
            state.totals = Some((highlights, titles.len()));
        }
        state.pick();
        state
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn picked(&self) -> Option<&Picked> {
        self.picked.as_ref()
    }

    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn selected_title(&self) -> Option<&str> {
        self.titles.get(self.title_idx).map(String::as_str)
    }

    pub fn search_results(&self) -> &[Entry] {
        &self.search_results
    }

    pub fn summary(&self) -> &[TitleSummary] {
        &self.summary
    }

    /// Status line text: the last message, or a mode-specific summary.
    pub fn status_line(&self) -> (String, StatusKind) {
        if let Some((msg, kind)) = &self.status {
            return (msg.clone(), *kind);
        }
        let text = match self.mode {
            Mode::Highlight | Mode::Context => match self.totals {
                Some((highlights, titles)) => {
                    format!("{} highlights | {} titles", highlights, titles)
                }
                None => "No clippings loaded".to_string(),
            },
            Mode::Titles => format!("{} title(s)", self.titles.len()),
            Mode::TitleHighlights => match &self.shown_title {
                Some((_, entries)) => format!("{} highlight(s)", entries.len()),
                None => String::new(),
            },
            Mode::SearchInput => format!("Search: {}_", self.search_input),
            Mode::SearchResults => format!(
                "{} match(es) for \"{}\"",
                self.search_results.len(),
                self.search_input.trim()
            ),
            Mode::Summary => format!("{} book(s)", self.summary.len()),
            Mode::Help => String::new(),
        };
        (text, StatusKind::Info)
    }

    /// Handle one key press. Failures become status messages; the session
    /// keeps its previous state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit = true;
            return;
        }
        self.status = None;

        match self.mode {
            Mode::Help => self.mode = self.previous_mode,
            Mode::Highlight | Mode::Context => self.handle_browse_key(key),
            Mode::Titles => self.handle_titles_key(key),
            Mode::TitleHighlights => self.handle_title_highlights_key(key),
            Mode::SearchInput => self.handle_search_input_key(key),
            Mode::SearchResults => self.handle_search_results_key(key),
            Mode::Summary => self.handle_summary_key(key),
        }
    }

    /// Keys shared by every non-typing mode. Returns whether `key` was used.
    fn handle_global_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('?') => {
                self.previous_mode = self.mode;
                self.mode = Mode::Help;
            }
            KeyCode::Char('/') => self.mode = Mode::SearchInput,
            KeyCode::Char('t') => self.open_titles(),
            KeyCode::Char('s') => self.open_summary(),
            _ => return false,
        }
        true
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        if self.handle_global_key(key) {
            return;
        }
        match key.code {
            KeyCode::Char('r') | KeyCode::Char(' ') => self.pick(),
            KeyCode::Char('c') => {
                if self.mode == Mode::Context {
                    self.mode = Mode::Highlight;
                } else {
                    self.show_context();
                }
            }
            KeyCode::Esc => self.mode = Mode::Highlight,
            _ => {}
        }
    }

    fn handle_titles_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Highlight,
            KeyCode::Up => self.title_idx = self.title_idx.saturating_sub(1),
            KeyCode::Down => {
                if self.title_idx + 1 < self.titles.len() {
                    self.title_idx += 1;
                }
            }
            KeyCode::Enter => self.show_selected_title(),
            KeyCode::Backspace => {
                self.title_filter.pop();
                self.refresh_titles();
            }
            KeyCode::Char(c) => {
                self.title_filter.push(c);
                self.refresh_titles();
            }
            _ => {}
        }
    }

    fn handle_title_highlights_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Titles,
            KeyCode::Char('e') => {
                if let Some((title, _)) = &self.shown_title {
                    let command = Command::ExportTitle(title.clone());
                    self.export(command);
                }
            }
            _ if self.handle_scroll_key(key) => {}
            _ => {
                self.handle_global_key(key);
            }
        }
    }

    fn handle_search_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Highlight,
            KeyCode::Enter => self.run_search(),
            KeyCode::Backspace => {
                self.search_input.pop();
            }
            KeyCode::Char(c) => self.search_input.push(c),
            _ => {}
        }
    }

    fn handle_search_results_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Highlight,
            _ if self.handle_scroll_key(key) => {}
            _ => {
                self.handle_global_key(key);
            }
        }
    }

    fn handle_summary_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Highlight,
            KeyCode::Up => self.summary_idx = self.summary_idx.saturating_sub(1),
            KeyCode::Down => {
                if self.summary_idx + 1 < self.summary.len() {
                    self.summary_idx += 1;
                }
            }
            KeyCode::Char('e') => self.export(Command::ExportSummary),
            _ => {
                self.handle_global_key(key);
            }
        }
    }

    fn handle_scroll_key(&mut self, key: KeyEvent) -> bool {
        let max = self.max_scroll();
        self.scroll = match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll.saturating_add(1).min(max),
            KeyCode::PageUp => self.scroll.saturating_sub(PAGE),
            KeyCode::PageDown => self.scroll.saturating_add(PAGE).min(max),
            KeyCode::Home => 0,
            _ => return false,
        };
        true
    }

    /// Rough upper bound for scrolling: three rendered lines per entry.
    fn max_scroll(&self) -> u16 {
        let entries = match self.mode {
            Mode::TitleHighlights => self.shown_title.as_ref().map_or(0, |(_, e)| e.len()),
            Mode::SearchResults => self.search_results.len(),
            _ => 0,
        };
        u16::try_from(entries.saturating_mul(3)).unwrap_or(u16::MAX)
    }

    /// Runs a session command, turning failures into an error status.
    fn run(&mut self, command: Command) -> Option<Output> {
        let name = command.name();
        match self.session.handle(command) {
            Ok(output) => Some(output),
            Err(e) => {
                debug!(command = name, error = %e, "command failed");
                self.status = Some((error_chain(e), StatusKind::Error));
                None
            }
        }
    }

    fn pick(&mut self) {
        if let Some(Output::Picked(picked)) = self.run(Command::PickRandom) {
            self.picked = Some(picked);
            self.context = None;
            self.mode = Mode::Highlight;
        }
    }

    fn show_context(&mut self) {
        if let Some(Output::Context(context)) = self.run(Command::Context { index: None }) {
            self.context = Some(context);
            self.mode = Mode::Context;
        }
    }

    fn open_titles(&mut self) {
        self.title_filter.clear();
        self.refresh_titles();
        if self.status.is_none() {
            self.mode = Mode::Titles;
        }
    }

    fn refresh_titles(&mut self) {
        if let Some(Output::Titles(titles)) = self.run(Command::FindTitles(self.title_filter.clone()))
        {
            self.titles = titles.into_iter().map(|t| t.title).collect();
            self.title_idx = 0;
        }
    }

    fn show_selected_title(&mut self) {
        let Some(title) = self.selected_title().map(str::to_string) else {
            return;
        };
        if let Some(Output::TitleHighlights { title, entries }) = self.run(Command::ShowTitle(title))
        {
            self.shown_title = Some((title, entries));
            self.scroll = 0;
            self.mode = Mode::TitleHighlights;
        }
    }

    fn run_search(&mut self) {
        match self.run(Command::Search(self.search_input.clone())) {
            Some(Output::Search(SearchOutcome::Matches(found))) => {
                self.search_results = found;
                self.scroll = 0;
                self.mode = Mode::SearchResults;
            }
            Some(Output::Search(SearchOutcome::NotPerformed)) => {
                self.status = Some(("Type a term to search for".to_string(), StatusKind::Info));
            }
            _ => {}
        }
    }

    fn open_summary(&mut self) {
        if let Some(Output::Summary(rows)) = self.run(Command::Summary) {
            self.summary = rows;
            self.summary_idx = 0;
            self.mode = Mode::Summary;
        }
    }

    fn export(&mut self, command: Command) {
        let Some(Output::Export(payload)) = self.run(command) else {
            return;
        };
        self.status = Some(match payload.write_to(&self.export_dir) {
            Ok(path) => (
                format!("Exported to {}", path.display()),
                StatusKind::Success,
            ),
            Err(e) => (error_chain(e), StatusKind::Error),
        });
    }
}

/// Message with its causes, `outer: inner` style.
fn error_chain(e: impl std::error::Error + Send + Sync + 'static) -> String {
    format!("{:#}", anyhow::Error::new(e))
}

/// Viewer bound to a real terminal.
pub struct ViewerApp {
    app: App,
    state: ViewerState,
}

impl ViewerApp {
    /// Takes over the terminal.
    pub fn new(session: Session, export_dir: PathBuf) -> Result<Self> {
        let app = App::new(Duration::from_millis(250))?;
        Ok(Self {
            app,
            state: ViewerState::new(session, export_dir),
        })
    }
}

impl TuiApp for ViewerApp {
    fn app(&mut self) -> &mut App {
        &mut self.app
    }

    fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        self.state.handle_key(key);
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let state = &self.state;
        self.app.draw(|frame| render(frame, state))
    }
}

// --- Rendering ---

/// Draw the whole viewer for `state`.
pub fn render(frame: &mut Frame, state: &ViewerState) {
    let theme = current_theme();
    let area = frame.area();
    let [main, status, footer] = build_layout(area);

    let body_mode = match state.mode {
        Mode::Help => state.previous_mode,
        Mode::SearchInput if !state.search_results.is_empty() => Mode::SearchResults,
        Mode::SearchInput => Mode::Highlight,
        mode => mode,
    };
    match body_mode {
        Mode::Context => render_context(frame, main, state, &theme),
        Mode::Titles => render_titles(frame, main, state, &theme),
        Mode::TitleHighlights => render_title_highlights(frame, main, state, &theme),
        Mode::SearchResults => render_search_results(frame, main, state, &theme),
        Mode::Summary => render_summary(frame, main, state, &theme),
        _ => render_highlight(frame, main, state, &theme),
    }

    match state.mode {
        Mode::Help => render_help_modal(frame, area, &theme),
        Mode::SearchInput => render_search_modal(frame, area, &state.search_input, &theme),
        _ => {}
    }

    let (text, kind) = state.status_line();
    render_status_line(frame, status, &text, kind);
    render_footer(frame, footer, footer_keys(state.mode));
}

fn bordered<'a>(title: String, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.text_secondary_style())
        .title(Span::styled(title, theme.accent_bold_style()))
}

fn render_highlight(frame: &mut Frame, area: Rect, state: &ViewerState, theme: &Theme) {
    let Some(picked) = &state.picked else {
        let hint = Paragraph::new("Press r for a random highlight")
            .style(theme.text_secondary_style())
            .alignment(Alignment::Center);
        frame.render_widget(hint, centered_rect(60, 20, area));
        return;
    };

    let record = &picked.entry.record;
    let mut lines = vec![Line::from(Span::styled(
        record.title.clone(),
        theme.accent_bold_style(),
    ))];
    if !record.location.is_empty() || !record.added_on.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Location {} | Added on {}", record.location, record.added_on),
            theme.text_secondary_style(),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        picked.display_text.clone(),
        theme.text_style(),
    )));

    let block = bordered(format!(" Highlight #{} ", picked.entry.index), theme);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_context(frame: &mut Frame, area: Rect, state: &ViewerState, theme: &Theme) {
    let Some(context) = &state.context else {
        return render_highlight(frame, area, state, theme);
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Ratio(1, 4),
            Constraint::Ratio(2, 4),
            Constraint::Ratio(1, 4),
        ])
        .split(area);

    let current_title = context.title.clone().unwrap_or_default();
    let panes = [
        (" Above ".to_string(), &context.above, theme.text_secondary_style()),
        (format!(" {} ", current_title), &context.current, theme.text_style()),
        (" Below ".to_string(), &context.below, theme.text_secondary_style()),
    ];
    for ((title, text, style), chunk) in panes.into_iter().zip(chunks.iter()) {
        let body = match text {
            Some(text) => Paragraph::new(text.clone()).style(style),
            None => Paragraph::new("(none)").style(theme.text_secondary_style()),
        };
        frame.render_widget(
            body.block(bordered(title, theme)).wrap(Wrap { trim: false }),
            *chunk,
        );
    }
}

fn render_titles(frame: &mut Frame, area: Rect, state: &ViewerState, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let input = Paragraph::new(format!("{}_", state.title_filter))
        .style(theme.text_style())
        .block(bordered(" Filter ".to_string(), theme));
    frame.render_widget(input, chunks[0]);

    if state.titles.is_empty() {
        let empty = Paragraph::new("No titles match")
            .style(theme.text_secondary_style())
            .block(bordered(" Titles ".to_string(), theme));
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = state
        .titles
        .iter()
        .map(|t| ListItem::new(t.as_str()).style(theme.text_style()))
        .collect();
    let list = List::new(items)
        .block(bordered(" Titles ".to_string(), theme))
        .highlight_style(theme.highlight_style())
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(state.title_idx));
    frame.render_stateful_widget(list, chunks[1], &mut list_state);
}

/// One block of lines per entry: index and location, then the text.
fn entry_lines(entries: &[Entry], with_title: bool, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(entries.len() * 3);
    for entry in entries {
        let mut header = vec![Span::styled(
            format!("[{}] ", entry.index),
            theme.text_secondary_style(),
        )];
        if with_title {
            header.push(Span::styled(
                entry.record.title.clone(),
                theme.accent_style(),
            ));
            header.push(Span::raw(" "));
        }
        if !entry.record.location.is_empty() {
            header.push(Span::styled(
                format!("Location {}", entry.record.location),
                theme.text_secondary_style(),
            ));
        }
        lines.push(Line::from(header));
        lines.push(Line::from(Span::styled(
            entry.record.highlight.clone(),
            theme.text_style(),
        )));
        lines.push(Line::from(""));
    }
    lines
}

fn render_title_highlights(frame: &mut Frame, area: Rect, state: &ViewerState, theme: &Theme) {
    let Some((title, entries)) = &state.shown_title else {
        return;
    };
    let body = Paragraph::new(entry_lines(entries, false, theme))
        .block(bordered(format!(" {} ", title), theme))
        .wrap(Wrap { trim: false })
        .scroll((state.scroll, 0));
    frame.render_widget(body, area);
}

fn render_search_results(frame: &mut Frame, area: Rect, state: &ViewerState, theme: &Theme) {
    let block = bordered(" Search results ".to_string(), theme);
    if state.search_results.is_empty() {
        let empty = Paragraph::new("No highlights match")
            .style(theme.text_secondary_style())
            .block(block);
        frame.render_widget(empty, area);
        return;
    }
    let body = Paragraph::new(entry_lines(&state.search_results, true, theme))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.scroll, 0));
    frame.render_widget(body, area);
}

fn render_summary(frame: &mut Frame, area: Rect, state: &ViewerState, theme: &Theme) {
    let header = Row::new(SUMMARY_HEADER).style(theme.accent_bold_style());
    let rows: Vec<Row> = state
        .summary
        .iter()
        .map(|r| {
            Row::new([r.title.clone(), r.author.clone(), r.year_read.clone()])
                .style(theme.text_style())
        })
        .collect();
    let widths = [
        Constraint::Percentage(55),
        Constraint::Percentage(33),
        Constraint::Length(9),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(bordered(" Summary ".to_string(), theme))
        .row_highlight_style(theme.highlight_style());
    let mut table_state = TableState::default().with_selected(Some(state.summary_idx));
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn render_search_modal(frame: &mut Frame, area: Rect, input: &str, theme: &Theme) {
    let modal_area = modal_rect(60, 3, area);
    frame.render_widget(Clear, modal_area);
    let field = Paragraph::new(format!("{}_", input))
        .style(theme.text_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.accent_style())
                .title(" Search "),
        );
    frame.render_widget(field, modal_area);
}

fn render_help_modal(frame: &mut Frame, area: Rect, theme: &Theme) {
    let modal_area = modal_rect(56, 22, area);
    frame.render_widget(Clear, modal_area);
    let help = Paragraph::new(build_help_text(theme))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.accent_style())
                .title(" Help "),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(help, modal_area);
}

fn build_help_text(theme: &Theme) -> Vec<Line<'static>> {
    let section = |name: &'static str| Line::from(Span::styled(name, theme.accent_bold_style()));
    let key = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", k), theme.accent_style()),
            Span::styled(desc, theme.text_style()),
        ])
    };
    vec![
        section("Highlights"),
        key("r, Space", "Random highlight"),
        key("c", "Toggle context (before/after)"),
        Line::from(""),
        section("Browse"),
        key("t", "Titles (type to filter, Enter to open)"),
        key("/", "Search highlight text"),
        key("s", "Summary table"),
        key("\u{2191}\u{2193} j k", "Move / scroll"),
        key("PgUp PgDn", "Scroll a page"),
        Line::from(""),
        section("Export"),
        key("e", "Export open title or summary"),
        Line::from(""),
        section("General"),
        key("Esc", "Back"),
        key("?", "This help"),
        key("q", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            theme.text_secondary_style(),
        )),
    ]
}

fn footer_keys(mode: Mode) -> &'static [(&'static str, &'static str)] {
    match mode {
        Mode::Highlight => &[
            ("r", "random"),
            ("c", "context"),
            ("t", "titles"),
            ("/", "search"),
            ("s", "summary"),
            ("?", "help"),
            ("q", "quit"),
        ],
        Mode::Context => &[("c", "hide context"), ("r", "random"), ("Esc", "back"), ("q", "quit")],
        Mode::Titles => &[
            ("type", "filter"),
            ("\u{2191}\u{2193}", "select"),
            ("Enter", "open"),
            ("Esc", "back"),
        ],
        Mode::TitleHighlights => &[
            ("\u{2191}\u{2193}", "scroll"),
            ("e", "export"),
            ("Esc", "titles"),
            ("q", "quit"),
        ],
        Mode::SearchInput => &[("Enter", "search"), ("Esc", "cancel")],
        Mode::SearchResults => &[
            ("\u{2191}\u{2193}", "scroll"),
            ("/", "new search"),
            ("Esc", "back"),
            ("q", "quit"),
        ],
        Mode::Summary => &[
            ("\u{2191}\u{2193}", "select"),
            ("e", "export csv"),
            ("Esc", "back"),
            ("q", "quit"),
        ],
        Mode::Help => &[("any key", "close help")],
    }
}
