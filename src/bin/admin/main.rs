mod app;

use std::io;
use std::time::Duration;

use app::{format_open, jodi, normalize_base_url, truncate, AppState, ConnectionStatus};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> io::Result<()> {
    let _ = dotenvy::dotenv();
    let base_url = std::env::var("API_BASE_URL")
        .or_else(|_| std::env::var("VITE_API_BASE_URL"))
        .map(|u| normalize_base_url(&u))
        .unwrap_or_else(|_| "http://localhost:5000".to_string());

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .map_err(io::Error::other)?;

    let mut app = AppState::new(base_url);
    let mut market_table_state = TableState::default();
    market_table_state.select(None);

    // Initial fetch before rendering
    app.refresh(&client, None).await;

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app, &client, &mut market_table_state).await;

    // Restore terminal regardless of result
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    client: &reqwest::Client,
    market_state: &mut TableState,
) -> io::Result<()> {
    let refresh_interval = Duration::from_secs(5);
    let mut last_tick = std::time::Instant::now();

    loop {
        terminal.draw(|f| render(f, app, market_state))?;

        let timeout = refresh_interval
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                        KeyCode::Char('r') | KeyCode::Char('R') => {
                            app.refresh(client, market_state.selected()).await;
                            last_tick = std::time::Instant::now();
                        }
                        KeyCode::Char('x') | KeyCode::Char('X') => {
                            app.reset_all(client).await;
                            app.refresh(client, market_state.selected()).await;
                            last_tick = std::time::Instant::now();
                        }
                        KeyCode::Down | KeyCode::Char('j') => {
                            let max = app.markets.len().saturating_sub(1);
                            let next = market_state.selected().map_or(0, |i| (i + 1).min(max));
                            market_state.select(Some(next));
                            app.refresh(client, Some(next)).await;
                            last_tick = std::time::Instant::now();
                        }
                        KeyCode::Up | KeyCode::Char('k') => {
                            let prev = market_state
                                .selected()
                                .map_or(0, |i| i.saturating_sub(1));
                            market_state.select(Some(prev));
                            app.refresh(client, Some(prev)).await;
                            last_tick = std::time::Instant::now();
                        }
                        _ => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= refresh_interval {
            app.refresh(client, market_state.selected()).await;
            last_tick = std::time::Instant::now();
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render(f: &mut Frame, app: &AppState, market_state: &mut TableState) {
    let area = f.area();

    // Outer vertical split: header | body | footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(0),    // body
            Constraint::Length(1), // footer
        ])
        .split(area);

    render_header(f, app, chunks[0]);
    render_body(f, app, market_state, chunks[1]);
    render_footer(f, app, chunks[2]);
}

fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    let (status_text, status_color) = match &app.status {
        ConnectionStatus::Connected => ("● connected".to_string(), Color::Green),
        ConnectionStatus::Connecting => ("◌ connecting".to_string(), Color::Yellow),
        ConnectionStatus::Error(e) => (format!("✗ {}", truncate(e, 40)), Color::Red),
    };

    let (golden, motor) = app
        .lucky
        .as_ref()
        .map_or(("-", "-"), |l| (l.golden_ank.as_str(), l.motor_patti.as_str()));

    let title_spans = vec![
        Span::styled(
            " Matka Admin  ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(status_text, Style::default().fg(status_color)),
        Span::raw("  │  "),
        Span::styled(
            format!("{} markets", app.markets.len()),
            Style::default().fg(Color::White),
        ),
        Span::raw("  │  "),
        Span::styled(
            format!("golden ank {golden}"),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("  │  "),
        Span::styled(
            format!("motor patti {motor}"),
            Style::default().fg(Color::Yellow),
        ),
    ];

    let paragraph = Paragraph::new(Line::from(title_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    f.render_widget(paragraph, area);
}

fn render_body(f: &mut Frame, app: &AppState, market_state: &mut TableState, area: Rect) {
    // Horizontal split: markets + live (45%) | weekly chart (55%)
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(8)])
        .split(halves[0]);

    render_markets_table(f, app, market_state, left[0]);
    render_live_table(f, app, left[1]);
    render_chart_table(f, app, halves[1]);
}

fn title(text: String) -> Span<'static> {
    Span::styled(
        text,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )
}

fn header_row(labels: &[&'static str]) -> Row<'static> {
    let cells = labels
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
    Row::new(cells).height(1)
}

fn render_markets_table(f: &mut Frame, app: &AppState, state: &mut TableState, area: Rect) {
    let rows: Vec<Row> = app
        .markets
        .iter()
        .map(|m| {
            let status_color = match m.is_open {
                Some(true) => Color::Green,
                Some(false) => Color::Red,
                None => Color::DarkGray,
            };
            let hours = if m.opening_time.is_empty() {
                "—".to_string()
            } else {
                format!("{}-{}", m.opening_time, m.closing_time)
            };
            Row::new(vec![
                Cell::from(truncate(&m.name, 18)),
                Cell::from(m.display_result.clone()).style(Style::default().fg(Color::White)),
                Cell::from(format_open(m.is_open)).style(Style::default().fg(status_color)),
                Cell::from(hours).style(Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(10),
            Constraint::Length(12),
            Constraint::Length(6),
            Constraint::Length(19),
        ],
    )
    .header(header_row(&["Market", "Result", "Now", "Hours"]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title(" MARKETS ".to_string())),
    )
    .row_highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );

    f.render_stateful_widget(table, area, state);
}

fn render_live_table(f: &mut Frame, app: &AppState, area: Rect) {
    let rows: Vec<Row> = app
        .live_results
        .iter()
        .map(|l| {
            Row::new(vec![
                Cell::from(truncate(&l.name, 18)),
                Cell::from(l.result.clone()).style(Style::default().fg(Color::Green)),
                Cell::from(l.time_range.clone()).style(Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [Constraint::Min(10), Constraint::Length(12), Constraint::Length(22)],
    )
    .header(header_row(&["Live", "Result", "Time"]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title(" LIVE RESULTS ".to_string())),
    );

    f.render_widget(table, area);
}

fn render_chart_table(f: &mut Frame, app: &AppState, area: Rect) {
    let rows: Vec<Row> = app
        .weeks
        .iter()
        .map(|w| {
            let mut cells = vec![Cell::from(w.week.clone()).style(Style::default().fg(Color::DarkGray))];
            cells.extend(w.days().into_iter().map(|d| {
                let text = jodi(d);
                let color = if d.is_some() { Color::White } else { Color::DarkGray };
                Cell::from(text).style(Style::default().fg(color))
            }));
            Row::new(cells)
        })
        .collect();

    let mut widths = vec![Constraint::Length(22)];
    widths.extend([Constraint::Length(4); 7]);

    let label = app
        .chart_market
        .as_deref()
        .map_or(" CHART ".to_string(), |m| format!(" CHART · {m} "));

    let table = Table::new(rows, widths)
        .header(header_row(&["Week", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(title(label)),
        );

    f.render_widget(table, area);
}

fn render_footer(f: &mut Frame, app: &AppState, area: Rect) {
    let mut spans = vec![
        Span::styled(" [q] ", Style::default().fg(Color::Yellow)),
        Span::raw("quit  "),
        Span::styled("[r] ", Style::default().fg(Color::Yellow)),
        Span::raw("refresh  "),
        Span::styled("[↑↓ / j k] ", Style::default().fg(Color::Yellow)),
        Span::raw("select market  "),
        Span::styled("[x] ", Style::default().fg(Color::Yellow)),
        Span::raw("reset all  "),
        Span::styled("auto-refresh: 5s", Style::default().fg(Color::DarkGray)),
    ];
    if let Some(notice) = &app.notice {
        spans.push(Span::raw("  │  "));
        spans.push(Span::styled(notice.clone(), Style::default().fg(Color::Cyan)));
    }
    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::White));
    f.render_widget(paragraph, area);
}
