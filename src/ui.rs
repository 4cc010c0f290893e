use anyhow::Result;
use cat_adoption::{Cat, CatDetail, CatStore, CatsState, Resource};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;
use tokio::sync::watch;

const PAGE_SIZE: usize = 10;
const TICK: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    CatList,
    CatDetail,
}

impl Page {
    pub fn title(&self) -> &str {
        match self {
            Page::CatList => "Cats",
            Page::CatDetail => "Cat Details",
        }
    }
}

pub struct App {
    pub store: CatStore,
    pub view: watch::Receiver<CatsState>,
    pub state: TableState,
    pub detail: Option<CatDetail>,
    pub notice: Option<String>,
}

impl App {
    pub fn new(store: CatStore) -> Self {
        let view = store.subscribe();

        Self {
            store,
            view,
            state: TableState::default(),
            detail: None,
            notice: None,
        }
    }

    pub fn current_page(&self) -> Page {
        if self.detail.is_some() {
            Page::CatDetail
        } else {
            Page::CatList
        }
    }

    /// Snapshot of what the store last published
    pub fn snapshot(&self) -> CatsState {
        self.view.borrow().clone()
    }

    /// Kick off the background load; its outcome arrives through `view`
    pub fn start_load(&mut self) {
        // the load publishes on its own, the handle is not needed
        drop(self.store.request_load());
    }

    /// Pick up a state published since the last tick
    pub fn sync_view(&mut self) {
        if !self.view.has_changed().unwrap_or(false) {
            return;
        }

        let len = self
            .view
            .borrow_and_update()
            .data()
            .map(|cats| cats.len())
            .unwrap_or(0);

        match self.state.selected() {
            _ if len == 0 => self.state.select(None),
            Some(i) if i < len => {}
            _ => self.state.select(Some(0)),
        }
    }

    fn len(&self) -> usize {
        self.view.borrow().data().map(|cats| cats.len()).unwrap_or(0)
    }

    pub fn next(&mut self) {
        let len = self.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        let len = self.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => (i + PAGE_SIZE).min(len - 1),
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        if self.len() == 0 {
            return;
        }
        let i = self
            .state
            .selected()
            .map(|i| i.saturating_sub(PAGE_SIZE))
            .unwrap_or(0);
        self.state.select(Some(i));
    }

    pub fn open_detail(&mut self) {
        let Some(position) = self.state.selected() else {
            return;
        };

        match CatDetail::open(position, &self.store.cats()) {
            Ok(detail) => {
                self.notice = None;
                self.detail = Some(detail);
            }
            Err(e) => {
                log::warn!("cannot open detail: {}", e);
                self.notice = Some("There must be something wrong.".to_string());
            }
        }
    }

    /// Leave the detail page and hand its exit signal back to the list
    pub fn close_detail(&mut self) {
        if let Some(detail) = self.detail.take() {
            let outcome = detail.exit();
            if let Err(e) = self.store.apply_detail_exit(outcome) {
                log::error!("could not reconcile detail exit {:?}: {}", outcome, e);
                self.notice = Some(e.to_string());
            }
            self.state.select(Some(outcome.position));
        }
    }

    /// Handle a key press; returns true when the app should quit
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match self.detail.as_ref().map(|d| d.is_confirm_open()) {
            Some(true) => {
                if let Some(detail) = self.detail.as_mut() {
                    match code {
                        KeyCode::Char('y') | KeyCode::Enter => detail.confirm(),
                        KeyCode::Char('n') | KeyCode::Esc => detail.dismiss(),
                        _ => {}
                    }
                }
            }
            Some(false) => match code {
                KeyCode::Char('a') | KeyCode::Enter => {
                    if let Some(detail) = self.detail.as_mut() {
                        detail.request_adopt();
                    }
                }
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Left => self.close_detail(),
                KeyCode::Char('q') => {
                    self.close_detail();
                    return true;
                }
                _ => {}
            },
            None => match code {
                KeyCode::Char('q') | KeyCode::Esc => return true,
                KeyCode::Enter => self.open_detail(),
                KeyCode::Char('r') if self.snapshot().is_error() => self.start_load(),
                KeyCode::Down | KeyCode::Char('j') => self.next(),
                KeyCode::Up | KeyCode::Char('k') => self.previous(),
                KeyCode::PageDown => self.page_down(),
                KeyCode::PageUp => self.page_up(),
                KeyCode::Home => {
                    if self.len() > 0 {
                        self.state.select(Some(0));
                    }
                }
                KeyCode::End => {
                    if self.len() > 0 {
                        self.state.select(Some(self.len() - 1));
                    }
                }
                _ => {}
            },
        }
        false
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.start_load();
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        app.sync_view();
        terminal.draw(|f| ui(f, app))?;

        if !event::poll(TICK)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && app.handle_key(key.code) {
                return Ok(());
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    let snapshot = app.snapshot();

    render_header(f, chunks[0], app, &snapshot);

    match &snapshot {
        Resource::Loading => render_loading(f, chunks[1]),
        Resource::Error(message) => render_error(f, chunks[1], message),
        Resource::Success(cats) => match &app.detail {
            Some(detail) => {
                render_detail(f, chunks[1], detail);
                if detail.is_confirm_open() {
                    render_confirm_dialog(f, chunks[1]);
                }
            }
            None => render_list(f, chunks[1], cats, &mut app.state),
        },
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App, snapshot: &CatsState) {
    let mut spans = vec![Span::styled(
        format!(" {} ", app.current_page().title()),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    )];

    if let Some(cats) = snapshot.data() {
        let adopted = cats.iter().filter(|c| c.adopted).count();
        spans.push(Span::raw("  |  "));
        spans.push(Span::styled(
            format!("Total: {}", cats.len()),
            Style::default().fg(Color::White),
        ));
        spans.push(Span::raw("  |  "));
        spans.push(Span::styled(
            format!("Available: {}", cats.len() - adopted),
            Style::default().fg(Color::Green),
        ));
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("Adopted: {}", adopted),
            Style::default().fg(Color::Magenta),
        ));
    }

    let header = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Cat Adoption "),
    );

    f.render_widget(header, area);
}

fn render_loading(f: &mut Frame, area: Rect) {
    let loading = Paragraph::new("Loading cats...")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(loading, area);
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Could not load the cats",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("  {}", message)),
        Line::from(""),
        Line::from(Span::styled(
            "  Press r to try again",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
    ];

    let error = Paragraph::new(content).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    f.render_widget(error, area);
}

fn render_list(f: &mut Frame, area: Rect, cats: &[Cat], state: &mut TableState) {
    let header_cells = ["#", "Name", "Status", "Introduction"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = cats.iter().enumerate().map(|(i, cat)| {
        let (status, color) = if cat.adopted {
            ("Adopted", Color::Magenta)
        } else {
            ("Available", Color::Green)
        };

        Row::new(vec![
            Cell::from(format!("{}", i + 1)),
            Cell::from(truncate(&cat.name, 20)),
            Cell::from(status).style(Style::default().fg(color)),
            Cell::from(truncate(&cat.introduction, 60)),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Length(22),
            Constraint::Length(11),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Cats looking for a home "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, state);
}

fn render_detail(f: &mut Frame, area: Rect, detail: &CatDetail) {
    let cat = detail.cat();
    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

    let button = if cat.adopted {
        Span::styled(
            format!("[ {} ]", cat.adopt_label()),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::styled(
            format!("[ {} ]", cat.adopt_label()),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    };

    let content = vec![
        Line::from(""),
        Line::from(vec![Span::styled("  Name: ", label), Span::raw(&cat.name)]),
        Line::from(""),
        Line::from(vec![Span::styled("  Avatar: ", label), Span::raw(&cat.avatar)]),
        Line::from(""),
        Line::from(vec![Span::raw("  "), button]),
        Line::from(""),
        Line::from("  ─────────────────────────────────────"),
        Line::from(""),
        Line::from(Span::raw(format!("  {}", cat.introduction))),
    ];

    let panel = Paragraph::new(content).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(format!(" {} ", cat.name)),
    );

    f.render_widget(panel, area);
}

fn render_confirm_dialog(f: &mut Frame, area: Rect) {
    let popup = centered_rect(50, 7, area);

    let content = vec![
        Line::from(""),
        Line::from("Do you want to adopt this lovely cat?"),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(Color::Yellow)),
            Span::raw(" Yes    "),
            Span::styled("n", Style::default().fg(Color::Yellow)),
            Span::raw(" No"),
        ]),
    ];

    let dialog = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" Adopt "),
    );

    f.render_widget(Clear, popup);
    f.render_widget(dialog, popup);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let key = Style::default().fg(Color::Yellow);
    let mut status_spans = vec![];

    if let Some(notice) = &app.notice {
        status_spans.push(Span::styled(
            format!(" {} ", notice),
            Style::default().fg(Color::Red),
        ));
        status_spans.push(Span::raw(" | "));
    }

    match app.current_page() {
        Page::CatList => {
            let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);
            status_spans.push(Span::styled(
                format!(" Row: {}/{} ", selected, app.len()),
                Style::default().fg(Color::Cyan),
            ));
            status_spans.push(Span::raw(" | "));
            status_spans.push(Span::styled("Enter", key));
            status_spans.push(Span::raw(" Details | "));
            status_spans.push(Span::styled("↑/↓", key));
            status_spans.push(Span::raw(" Nav | "));
            status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
            status_spans.push(Span::raw(" Quit"));
        }
        Page::CatDetail => {
            status_spans.push(Span::styled(" a", key));
            status_spans.push(Span::raw(" Adopt | "));
            status_spans.push(Span::styled("Esc", key));
            status_spans.push(Span::raw(" Back | "));
            status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
            status_spans.push(Span::raw(" Quit"));
        }
    }

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
