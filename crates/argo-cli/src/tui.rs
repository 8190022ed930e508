//! Interactive dashboard for Argo
//!
//! Ratatui-based terminal interface. Left pane is the tab sidebar with the
//! assistant's state, right pane is the active panel. The relay call runs
//! in a spawned task so the screen keeps redrawing while a reply is pending.

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
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Terminal,
};
use serde_json::Value;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use argo_core::panels::{
    self, IntegrationStatus, MemoryFilter, MemoryTimeline, Sensitivity, Sentinel, ServiceStatus,
    ToolRegistry,
};
use argo_core::{
    ArgoConfig, ChatSession, HttpRelayClient, Notice, PendingRequest, RelayError, RelayTransport,
};

/// How long a notice stays in the status line
const NOTICE_TTL: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// State icons, 5 lines each, rendered with Alignment::Center
// ---------------------------------------------------------------------------

const ARGO_READY: &str = "\
\n\
◉\n\
◉ ◉ ◉\n\
◉\n\
\n\
READY";

const ARGO_THINKING: &str = "\
\n\
◎\n\
◎ ◎ ◎\n\
◎\n\
\n\
THINKING...";

// ---------------------------------------------------------------------------
// Tabs and application state
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Home,
    Memory,
    Tools,
    Sentinel,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Home, Tab::Memory, Tab::Tools, Tab::Sentinel];

    fn title(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Memory => "Memory",
            Tab::Tools => "Tools",
            Tab::Sentinel => "Sentinel",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

type Outcome = Result<Value, RelayError>;

struct App {
    session: ChatSession,
    client: Arc<HttpRelayClient>,
    inflight: Option<PendingRequest>,
    outcome_tx: mpsc::UnboundedSender<Outcome>,
    outcome_rx: mpsc::UnboundedReceiver<Outcome>,
    input: String,
    scroll: u16,
    tab: Tab,
    memory: MemoryTimeline,
    memory_filter: MemoryFilter,
    memory_cursor: usize,
    tools: ToolRegistry,
    tool_cursor: usize,
    sentinel: Sentinel,
    notice: Option<(Notice, Instant)>,
}

impl App {
    fn new(config: &ArgoConfig) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            session: ChatSession::new(config.user_id.clone()).with_greeting(),
            client: Arc::new(HttpRelayClient::new(config.relay_url.clone())),
            inflight: None,
            outcome_tx,
            outcome_rx,
            input: String::new(),
            scroll: 0,
            tab: Tab::Home,
            memory: MemoryTimeline::sample(),
            memory_filter: MemoryFilter::All,
            memory_cursor: 0,
            tools: ToolRegistry::sample(),
            tool_cursor: 0,
            sentinel: Sentinel::sample(),
            notice: None,
        }
    }

    /// Start a send; the reply arrives later through `outcome_rx`
    fn send_message(&mut self) {
        let Some(pending) = self.session.begin(&self.input) else {
            return;
        };
        self.input.clear();

        let client = Arc::clone(&self.client);
        let request = pending.request().clone();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = client.send(&request).await;
            // Receiver only goes away when the dashboard is closing
            let _ = tx.send(outcome);
        });

        self.inflight = Some(pending);
    }

    /// Settle the in-flight request if its outcome has arrived
    fn poll_outcome(&mut self) {
        if let Ok(outcome) = self.outcome_rx.try_recv() {
            if let Some(pending) = self.inflight.take() {
                self.session.settle(pending, outcome);
            }
        }
        if let Some(notice) = self.session.take_notices().pop() {
            self.notice = Some((notice, Instant::now()));
        }
        if matches!(&self.notice, Some((_, shown)) if shown.elapsed() > NOTICE_TTL) {
            self.notice = None;
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        match self.tab {
            Tab::Home => match code {
                KeyCode::Enter => self.send_message(),
                KeyCode::Char(c) => self.input.push(c),
                KeyCode::Backspace => {
                    self.input.pop();
                }
                KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
                KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
                _ => {}
            },
            Tab::Memory => {
                let visible = self.memory.list(self.memory_filter).len();
                match code {
                    KeyCode::Left => {
                        self.memory_filter = self.memory_filter.prev();
                        self.memory_cursor = 0;
                    }
                    KeyCode::Right => {
                        self.memory_filter = self.memory_filter.next();
                        self.memory_cursor = 0;
                    }
                    KeyCode::Up => self.memory_cursor = self.memory_cursor.saturating_sub(1),
                    KeyCode::Down if self.memory_cursor + 1 < visible => self.memory_cursor += 1,
                    KeyCode::Delete | KeyCode::Char('d') => {
                        let id = self
                            .memory
                            .list(self.memory_filter)
                            .get(self.memory_cursor)
                            .map(|m| m.id.clone());
                        if let Some(id) = id {
                            self.memory.remove(&id);
                            self.memory_cursor = self.memory_cursor.saturating_sub(1);
                        }
                    }
                    _ => {}
                }
            }
            Tab::Tools => match code {
                KeyCode::Up => self.tool_cursor = self.tool_cursor.saturating_sub(1),
                KeyCode::Down if self.tool_cursor + 1 < self.tools.all().len() => {
                    self.tool_cursor += 1
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    if let Some(id) = self.tools.all().get(self.tool_cursor).map(|t| t.id.clone()) {
                        self.tools.toggle(&id);
                    }
                }
                _ => {}
            },
            Tab::Sentinel => match code {
                KeyCode::Char('s') => {
                    self.sentinel.toggle_smoke_shield();
                }
                KeyCode::Char('+') | KeyCode::Right => {
                    self.sentinel.adjust_protection(5);
                }
                KeyCode::Char('-') | KeyCode::Left => {
                    self.sentinel.adjust_protection(-5);
                }
                _ => {}
            },
        }
    }
}

// ---------------------------------------------------------------------------
// TUI entrypoint
// ---------------------------------------------------------------------------

pub async fn run_tui(config: &ArgoConfig) -> anyhow::Result<()> {
    let mut app = App::new(config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, &mut app).await;

    // Always restore terminal, even on error
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    loop {
        app.poll_outcome();
        terminal.draw(|f| draw_ui(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Esc => break,
                    KeyCode::Tab => app.tab = app.tab.next(),
                    KeyCode::BackTab => app.tab = app.tab.prev(),
                    code => app.handle_key(code),
                }
            }
        } else {
            // Let the relay task make progress between polls
            tokio::task::yield_now().await;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw_ui(f: &mut ratatui::Frame, app: &App) {
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(18), // sidebar
            Constraint::Min(40),    // active panel
        ])
        .split(f.size());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(10),   // panel body
            Constraint::Length(1), // status bar
        ])
        .split(main_chunks[1]);

    draw_sidebar(f, app, main_chunks[0]);
    draw_header(f, app, rows[0]);
    match app.tab {
        Tab::Home => draw_chat(f, app, rows[1]),
        Tab::Memory => draw_memory(f, app, rows[1]),
        Tab::Tools => draw_tools(f, app, rows[1]),
        Tab::Sentinel => draw_sentinel(f, app, rows[1]),
    }
    draw_status(f, app, rows[2]);
}

fn panel_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(title, Style::default().fg(Color::Cyan)))
}

fn draw_sidebar(f: &mut ratatui::Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(Tab::ALL.len() as u16 + 2), Constraint::Min(8)])
        .split(area);

    let tabs: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| {
            if *tab == app.tab {
                Line::from(Span::styled(
                    format!("▶ {}", tab.title()),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(
                    format!("  {}", tab.title()),
                    Style::default().fg(Color::Gray),
                ))
            }
        })
        .collect();
    f.render_widget(Paragraph::new(tabs).block(panel_block(" Argo ")), chunks[0]);

    let (icon, color, title) = if app.session.is_pending() {
        (ARGO_THINKING, Color::Yellow, " Thinking ")
    } else {
        (ARGO_READY, Color::Cyan, " Ready ")
    };
    let widget = Paragraph::new(icon)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Span::styled(title, Style::default().fg(color))),
        );
    f.render_widget(widget, chunks[1]);
}

fn draw_header(f: &mut ratatui::Frame, app: &App, area: Rect) {
    let (accent, rest) = match app.tab {
        Tab::Home => ("Argo", " Assistant"),
        Tab::Memory => ("Memory", " Timeline"),
        Tab::Tools => ("Tools", " & Integrations"),
        Tab::Sentinel => ("Sentinel", " Control"),
    };

    let mut spans = vec![
        Span::styled(accent, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled(rest, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
    ];
    if app.tab == Tab::Home {
        for (name, value) in panels::header_badges() {
            spans.push(Span::styled("  ", Style::default()));
            spans.push(Span::styled(
                format!(" {}: {} ", name, value),
                Style::default().fg(Color::Black).bg(Color::Cyan),
            ));
        }
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(header, area);
}

fn draw_chat(f: &mut ratatui::Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(3)])
        .split(area);

    let mut chat_lines: Vec<Line> = vec![];
    for msg in app.session.messages() {
        let (color, prefix) = if msg.is_user() {
            (Color::Green, "► ")
        } else {
            (Color::Cyan, "◉ ")
        };
        chat_lines.push(Line::from(vec![
            Span::styled(prefix, Style::default().fg(color)),
            Span::styled(
                msg.sender.label(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", msg.clock()), Style::default().fg(Color::DarkGray)),
        ]));
        let text_style = if ChatSession::is_placeholder(msg) {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC)
        } else if msg.is_user() {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::Gray)
        };
        for line in msg.text.lines() {
            chat_lines.push(Line::from(Span::styled(format!("  {}", line), text_style)));
        }
        chat_lines.push(Line::from(""));
    }

    let chat = Paragraph::new(chat_lines)
        .block(panel_block(" Messages "))
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));
    f.render_widget(chat, chunks[0]);

    let is_busy = app.session.is_pending();
    let (input_border, input_title) = if is_busy {
        (Color::DarkGray, " Waiting for Argo... ")
    } else {
        (Color::Cyan, " What would you like me to do? ")
    };
    let input = Paragraph::new(app.input.as_str())
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(input_border))
                .title(Span::styled(
                    input_title,
                    Style::default().fg(if is_busy { Color::Yellow } else { Color::Cyan }),
                )),
        );
    f.render_widget(input, chunks[1]);
}

fn draw_memory(f: &mut ratatui::Frame, app: &App, area: Rect) {
    let mut filter_spans = vec![];
    for filter in MemoryFilter::ALL {
        let style = if filter == app.memory_filter {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        filter_spans.push(Span::styled(format!(" {} ", filter.label()), style));
        filter_spans.push(Span::raw(" "));
    }

    let mut lines = vec![Line::from(filter_spans), Line::from("")];
    for (i, item) in app.memory.list(app.memory_filter).into_iter().enumerate() {
        let selected = i == app.memory_cursor;
        let marker = if selected { "▶ " } else { "  " };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Cyan)),
            Span::styled(
                item.title.as_str(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  [{}] {}", item.kind.label(), item.timestamp.format("%b %e, %H:%M")),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    {}", item.snippet),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(""));
    }
    if app.memory.list(app.memory_filter).is_empty() {
        lines.push(Line::from(Span::styled(
            "  No memories here yet.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let widget = Paragraph::new(lines)
        .block(panel_block(" Interaction history "))
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn draw_tools(f: &mut ratatui::Frame, app: &App, area: Rect) {
    let mut lines = vec![];
    for (i, tool) in app.tools.all().iter().enumerate() {
        let marker = if i == app.tool_cursor { "▶ " } else { "  " };
        let switch = if tool.enabled {
            Span::styled("[ON] ", Style::default().fg(Color::Green))
        } else {
            Span::styled("[OFF]", Style::default().fg(Color::DarkGray))
        };
        let badge_color = match tool.status {
            IntegrationStatus::Active => Color::Green,
            IntegrationStatus::Warning => Color::Yellow,
            IntegrationStatus::Error => Color::Red,
        };

        let mut spans = vec![
            Span::styled(marker, Style::default().fg(Color::Cyan)),
            switch,
            Span::raw(" "),
            Span::styled(
                tool.name.as_str(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ];
        if let Some(badge) = tool.badge() {
            spans.push(Span::styled(format!("  {}", badge), Style::default().fg(badge_color)));
        }
        lines.push(Line::from(spans));

        let last_used = tool
            .last_used
            .map(|t| format!("  · last used {}", t.format("%b %e")))
            .unwrap_or_default();
        lines.push(Line::from(Span::styled(
            format!("        {}{}", tool.description, last_used),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(""));
    }

    let title = format!(" Integrations ({} enabled) ", app.tools.enabled_count());
    let widget = Paragraph::new(lines)
        .block(panel_block(&title))
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn draw_sentinel(f: &mut ratatui::Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // protection gauge
            Constraint::Length(7),  // privacy controls
            Constraint::Min(6),     // data + services
        ])
        .split(area);

    let privacy = &app.sentinel.privacy;
    let gauge = Gauge::default()
        .block(panel_block(" Data Protection Level "))
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(privacy.protection_level as u16);
    f.render_widget(gauge, chunks[0]);

    let on_off = |on: bool| {
        if on {
            Span::styled("Active", Style::default().fg(Color::Green))
        } else {
            Span::styled("Off", Style::default().fg(Color::DarkGray))
        }
    };
    let controls = vec![
        Line::from(vec![
            Span::raw("  Memory Retention       "),
            Span::styled(
                format!("{} Days", privacy.memory_retention_days),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![Span::raw("  Smoke Shield Mode      "), on_off(privacy.smoke_shield)]),
        Line::from(vec![
            Span::raw("  End-to-End Encryption  "),
            on_off(privacy.end_to_end_encryption),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  Smoke Shield scrambles memory and data connections until turned off.",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(
        Paragraph::new(controls)
            .block(panel_block(" Privacy Shield Status "))
            .wrap(Wrap { trim: false }),
        chunks[1],
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);

    let categories: Vec<Line> = app
        .sentinel
        .categories
        .iter()
        .map(|c| {
            let color = match c.sensitivity {
                Sensitivity::High => Color::Red,
                Sensitivity::Medium => Color::Yellow,
                Sensitivity::Low => Color::Green,
            };
            Line::from(vec![
                Span::styled(format!("  {:<22}", c.name), Style::default().fg(Color::White)),
                Span::styled(format!("{:>4} entries  ", c.count), Style::default().fg(Color::Gray)),
                Span::styled(c.sensitivity.label(), Style::default().fg(color)),
            ])
        })
        .collect();
    f.render_widget(
        Paragraph::new(categories).block(panel_block(" Data Management ")),
        columns[0],
    );

    let services: Vec<Line> = app
        .sentinel
        .services
        .iter()
        .map(|s| {
            let (label, color) = match s.status {
                ServiceStatus::Connected => ("connected", Color::Green),
                ServiceStatus::Degraded => ("degraded", Color::Yellow),
            };
            Line::from(vec![
                Span::styled(format!("  {:<12}", s.name), Style::default().fg(Color::White)),
                Span::styled(format!("{:<11}", label), Style::default().fg(color)),
                Span::styled(
                    format!("synced {}", s.last_sync),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();
    f.render_widget(
        Paragraph::new(services).block(panel_block(" Connected Services ")),
        columns[1],
    );
}

fn draw_status(f: &mut ratatui::Frame, app: &App, area: Rect) {
    if let Some((notice, _)) = &app.notice {
        let status = Paragraph::new(Line::from(vec![
            Span::styled(
                format!(" ⚠ {} ", notice.title),
                Style::default().fg(Color::Black).bg(Color::Red),
            ),
            Span::styled(format!(" {}", notice.description), Style::default().fg(Color::Red)),
        ]));
        f.render_widget(status, area);
        return;
    }

    let hints: &[(&str, &str)] = match app.tab {
        Tab::Home => &[("ENTER", "send"), ("↑↓", "scroll")],
        Tab::Memory => &[("←→", "filter"), ("↑↓", "select"), ("d", "delete")],
        Tab::Tools => &[("↑↓", "select"), ("SPACE", "toggle")],
        Tab::Sentinel => &[("s", "smoke shield"), ("+/-", "protection")],
    };

    let mut spans = vec![
        Span::styled(" ESC", Style::default().fg(Color::Yellow)),
        Span::styled(" quit ", Style::default().fg(Color::DarkGray)),
        Span::styled("TAB", Style::default().fg(Color::Yellow)),
        Span::styled(" switch ", Style::default().fg(Color::DarkGray)),
    ];
    for (key, action) in hints {
        spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        spans.push(Span::styled(format!(" {} ", action), Style::default().fg(Color::DarkGray)));
    }
    spans.push(Span::styled("| ", Style::default().fg(Color::DarkGray)));
    spans.push(Span::styled(
        app.session.user_id(),
        Style::default().fg(Color::Magenta),
    ));
    spans.push(Span::styled(" → ", Style::default().fg(Color::DarkGray)));
    spans.push(Span::styled(app.client.endpoint(), Style::default().fg(Color::Blue)));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn app() -> App {
        App::new(&ArgoConfig::default())
    }

    #[test]
    fn test_tab_cycle() {
        assert_eq!(Tab::Home.next().title(), "Memory");
        assert_eq!(Tab::Sentinel.next().title(), "Home");
        assert_eq!(Tab::Home.prev().title(), "Sentinel");
    }

    #[tokio::test]
    async fn test_outcome_settles_inflight_request() {
        let mut app = app();
        app.input = "hello".to_string();
        app.send_message();
        assert!(app.session.is_pending());
        assert!(app.input.is_empty());

        // Typing and Enter while pending change nothing in the log
        let before = app.session.messages().len();
        app.handle_key(KeyCode::Char('x'));
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.session.messages().len(), before);
        assert_eq!(app.input, "x");

        // Stand in for the relay task's answer. The spawned task has not run
        // yet on this single-threaded runtime, so this is first in the queue.
        app.outcome_tx
            .send(Ok(json!({ "reply_message": "hi there" })))
            .unwrap();
        app.poll_outcome();

        assert!(!app.session.is_pending());
        assert!(app.inflight.is_none());
        assert!(!app.session.messages().iter().any(ChatSession::is_placeholder));
        assert_eq!(app.session.messages().last().unwrap().text, "hi there");
    }

    #[test]
    fn test_tools_toggle_from_keys() {
        let mut app = app();
        app.tab = Tab::Tools;
        let first = app.tools.all()[0].enabled;
        app.handle_key(KeyCode::Char(' '));
        assert_eq!(app.tools.all()[0].enabled, !first);
    }

    #[test]
    fn test_memory_delete_from_keys() {
        let mut app = app();
        app.tab = Tab::Memory;
        app.handle_key(KeyCode::Right); // Queries
        app.handle_key(KeyCode::Char('d'));
        assert_eq!(app.memory.len(), 4);
        assert_eq!(app.memory.list(MemoryFilter::Queries).len(), 1);
    }
}
