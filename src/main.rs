use std::io;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Style};
use ratatui::symbols;
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph,
};

use transfer_scout::config::RunConfig;
use transfer_scout::matcher::MatcherConfig;
use transfer_scout::report::{RunReport, save_report};
use transfer_scout::roster::{load_seasons, load_transfers};
use transfer_scout::state::{AppState, Screen};
use transfer_scout::{extract, pipeline, workbook};

struct App {
    state: AppState,
    config: RunConfig,
    should_quit: bool,
}

impl App {
    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.state.screen = Screen::Overview,
            KeyCode::Char('2') => self.state.screen = Screen::Teams,
            KeyCode::Char('3') => self.state.screen = Screen::Scatter,
            KeyCode::Char('b') | KeyCode::Esc => self.state.screen = Screen::Overview,
            KeyCode::Char('j') | KeyCode::Down => self.state.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => self.state.scroll_up(),
            KeyCode::Char('e') | KeyCode::Char('E') => self.export_workbook(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }

    fn export_workbook(&mut self) {
        let path = &self.config.workbook_xlsx;
        match workbook::export_workbook(
            path,
            &self.state.result.records,
            &self.state.teams,
            &self.state.match_rows,
            &self.state.metrics,
        ) {
            Ok(()) => self
                .state
                .push_log(format!("[INFO] Workbook saved to {}", path.display())),
            Err(err) => self
                .state
                .push_log(format!("[WARN] Workbook export failed: {err}")),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = RunConfig::from_env();

    // One-shot batch: load, reconcile, write outputs, then browse the result.
    // A load or save failure aborts before the terminal is touched.
    let transfers = load_transfers(&config.transfers_csv)?;
    let seasons = load_seasons(&config.seasons_csv)?;
    let result = pipeline::reconcile(
        &transfers,
        &seasons,
        MatcherConfig {
            min_score: config.min_score,
        },
    );

    let mut state = AppState::new(result);
    let rows = extract::write_extract(&config.extract_csv, &state.result.records)?;
    state.push_log(format!(
        "[INFO] Extract saved: {} rows -> {}",
        rows,
        config.extract_csv.display()
    ));
    let report = RunReport::from_reconciliation(&state.result);
    save_report(&config.report_json, &report)?;
    state.push_log(format!(
        "[INFO] Run report saved to {}",
        config.report_json.display()
    ));
    state.push_log(format!(
        "[INFO] Matched {} of {} transfers (threshold {:.2})",
        state.result.matched_count(),
        state.result.records.len(),
        state.result.min_score
    ));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App {
        state,
        config,
        should_quit: false,
    };
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);

    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(&app.state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Overview => render_overview(frame, chunks[1], &app.state),
        Screen::Teams => render_teams(frame, chunks[1], &app.state),
        Screen::Scatter => render_scatter(frame, chunks[1], &app.state),
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(&app.state));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let screen = match state.screen {
        Screen::Overview => "OVERVIEW",
        Screen::Teams => "TEAMS",
        Screen::Scatter => "SCATTER",
    };
    format!(
        "TRANSFER SCOUT | {screen}\n{} lower-division transfers | {} with prior stats | threshold {:.2}",
        state.result.records.len(),
        state.result.matched_count(),
        state.result.min_score
    )
}

fn footer_text(state: &AppState) -> String {
    match state.screen {
        Screen::Teams => {
            "1 Overview | 2 Teams | 3 Scatter | j/k/↑/↓ Scroll | e Export | ? Help | q Quit"
                .to_string()
        }
        _ => "1 Overview | 2 Teams | 3 Scatter | e Export | ? Help | q Quit".to_string(),
    }
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(2)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_overview(frame: &mut Frame, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(36), Constraint::Min(40)])
        .split(area);

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(4)])
        .split(columns[0]);

    let levels = Paragraph::new(level_counts_text(state)).block(
        Block::default()
            .title("Transfers by level")
            .borders(Borders::ALL),
    );
    frame.render_widget(levels, left_chunks[0]);

    let rate = Paragraph::new(match_rate_text(state))
        .block(Block::default().title("Match rate").borders(Borders::ALL));
    frame.render_widget(rate, left_chunks[1]);

    let stats = Paragraph::new(metric_table_text(state)).block(
        Block::default()
            .title("Last tracked season (matched players)")
            .borders(Borders::ALL),
    );
    frame.render_widget(stats, columns[1]);
}

fn level_counts_text(state: &AppState) -> String {
    if state.levels.is_empty() {
        return "No transfers loaded".to_string();
    }
    state
        .levels
        .iter()
        .map(|row| format!("{:<6} {:>5}", row.level.code(), row.n))
        .collect::<Vec<_>>()
        .join("\n")
}

fn match_rate_text(state: &AppState) -> String {
    if state.match_rows.is_empty() {
        return "No transfers loaded".to_string();
    }
    state
        .match_rows
        .iter()
        .map(|row| {
            format!(
                "{:<6} {:<9} {:>5}",
                row.level.code(),
                if row.matched { "matched" } else { "unmatched" },
                row.n
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn metric_table_text(state: &AppState) -> String {
    if state.metrics.is_empty() {
        return "No matched players".to_string();
    }
    let mut lines = vec![format!(
        "{:<18} {:>5} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}",
        "metric", "count", "mean", "std", "min", "p25", "median", "p75", "max"
    )];
    for m in &state.metrics {
        lines.push(format!(
            "{:<18} {:>5} {:>8.3} {:>8.3} {:>8.3} {:>8.3} {:>8.3} {:>8.3} {:>8.3}",
            m.metric, m.count, m.mean, m.std, m.min, m.p25, m.median, m.p75, m.max
        ));
    }
    lines.join("\n")
}

fn render_teams(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title("Incoming transfers by destination team")
        .borders(Borders::ALL);
    if state.teams.is_empty() {
        let empty = Paragraph::new("No transfers loaded")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(40)])
        .split(area);

    let inner_height = columns[0].height.saturating_sub(2) as usize;
    let visible = (inner_height / 2).max(1);
    let start = state.team_scroll.min(state.teams.len().saturating_sub(1));
    let end = (start + visible).min(state.teams.len());

    let max = state.teams.iter().map(|t| t.n as u64).max().unwrap_or(1);
    let bars: Vec<Bar> = state.teams[start..end]
        .iter()
        .map(|team| {
            Bar::default()
                .value(team.n as u64)
                .label(Line::from(team.team.as_str()))
                .text_value(team.n.to_string())
                .style(Style::default().fg(Color::Cyan))
        })
        .collect();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(1)
        .max(max)
        .block(block);
    frame.render_widget(chart, columns[0]);

    let breakdown = Paragraph::new(team_level_text(state, columns[1].height))
        .block(Block::default().title("By level").borders(Borders::ALL));
    frame.render_widget(breakdown, columns[1]);
}

fn team_level_text(state: &AppState, height: u16) -> String {
    let visible = (height.saturating_sub(2) as usize).max(1);
    state
        .team_levels
        .iter()
        .skip(state.team_scroll)
        .take(visible)
        .map(|row| format!("{:<26} {:<5} {:>3}", row.team, row.level.code(), row.n))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_scatter(frame: &mut Frame, area: Rect, state: &AppState) {
    if state.points.is_empty() {
        let empty = Paragraph::new("No matched players to plot")
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .title("Plate appearances vs OPS")
                    .borders(Borders::ALL),
            );
        frame.render_widget(empty, area);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(34)])
        .split(area);

    let points: Vec<(f64, f64)> = state
        .points
        .iter()
        .map(|p| (p.plate_appearances, p.ops))
        .collect();
    let (x_min, x_max) = padded_bounds(points.iter().map(|p| p.0), 10.0);
    let (y_min, y_max) = padded_bounds(points.iter().map(|p| p.1), 0.05);

    let datasets = vec![
        Dataset::default()
            .name("matched players")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Cyan))
            .data(&points),
    ];
    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title("Plate appearances vs OPS (last tracked season)")
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("PA")
                .style(Style::default().fg(Color::DarkGray))
                .bounds([x_min, x_max])
                .labels(vec![
                    Span::raw(format!("{x_min:.0}")),
                    Span::raw(format!("{:.0}", (x_min + x_max) / 2.0)),
                    Span::raw(format!("{x_max:.0}")),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("OPS")
                .style(Style::default().fg(Color::DarkGray))
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::raw(format!("{y_min:.3}")),
                    Span::raw(format!("{:.3}", (y_min + y_max) / 2.0)),
                    Span::raw(format!("{y_max:.3}")),
                ]),
        );
    frame.render_widget(chart, columns[0]);

    let labels = Paragraph::new(point_labels_text(state, columns[1].height))
        .block(Block::default().title("Players").borders(Borders::ALL));
    frame.render_widget(labels, columns[1]);
}

fn padded_bounds(values: impl Iterator<Item = f64>, min_pad: f64) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    let pad = ((hi - lo) * 0.1).max(min_pad);
    (lo - pad, hi + pad)
}

fn point_labels_text(state: &AppState, height: u16) -> String {
    let visible = height.saturating_sub(2) as usize;
    state
        .points
        .iter()
        .take(visible.max(1))
        .map(|p| format!("{} ({:.0} PA, {:.3})", p.player, p.plate_appearances, p.ops))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Transfer Scout - Help",
        "",
        "Global:",
        "  1            Overview",
        "  2            Teams bar chart",
        "  3            Scatter plot",
        "  b / Esc      Back to overview",
        "  e            Export workbook",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Teams:",
        "  j/k or ↑/↓   Scroll",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
