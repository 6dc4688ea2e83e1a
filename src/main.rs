use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use ipl_terminal::export;
use ipl_terminal::insights::{
    FEATURE_IMPORTANCE_RUNS, FEATURE_IMPORTANCE_WICKETS, FeatureImportance, ModelMetrics,
    PLATFORM_STATS, RUNS_MODEL_METRICS, WICKETS_MODEL_METRICS,
};
use ipl_terminal::prediction::DetailedPrediction;
use ipl_terminal::rankings::compute_rankings;
use ipl_terminal::roster::{self, PLAYERS, Player};
use ipl_terminal::state::{AppState, ScenarioFocus, Screen, SortMode};

struct App {
    state: AppState,
    should_quit: bool,
    export_dir: PathBuf,
}

impl App {
    fn new() -> Self {
        let export_dir = std::env::var("EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));
        Self {
            state: AppState::new(),
            should_quit: false,
            export_dir,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.search_active {
            self.on_search_key(key);
            return;
        }
        if self.state.detail_overlay {
            match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('b') => {
                    self.state.detail_overlay = false;
                }
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            }
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.state.screen = Screen::Roster,
            KeyCode::Char('2') => self.state.screen = Screen::Prediction,
            KeyCode::Char('3') => self.state.screen = Screen::Insights,
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Enter | KeyCode::Char('d') => {
                if selected_for_detail(&self.state).is_some() {
                    self.state.detail_overlay = true;
                }
            }
            _ => match self.state.screen {
                Screen::Roster => self.on_roster_key(key),
                Screen::Prediction => self.on_prediction_key(key),
                Screen::Insights => {}
            },
        }
    }

    fn on_roster_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('/') => {
                self.state.search_active = true;
                self.state.search_query.clear();
                self.state.selected = 0;
            }
            KeyCode::Char('t') => self.state.cycle_team_filter(),
            _ => {}
        }
    }

    fn on_prediction_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => self.state.toggle_scenario_focus(),
            KeyCode::Char('h') | KeyCode::Left => self.state.cycle_scenario(-1),
            KeyCode::Char('l') | KeyCode::Right => self.state.cycle_scenario(1),
            KeyCode::Char('g') => self.state.generate_round(),
            KeyCode::Char('s') => self.state.cycle_sort(),
            KeyCode::Char('e') => self.export_round(),
            _ => {}
        }
    }

    fn on_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.state.search_active = false,
            KeyCode::Backspace => {
                self.state.search_query.pop();
                self.state.selected = 0;
            }
            KeyCode::Char(c) => {
                self.state.search_query.push(c);
                self.state.selected = 0;
            }
            _ => {}
        }
    }

    fn export_round(&mut self) {
        if self.state.predictions.is_empty() {
            self.state
                .push_log("[INFO] Nothing to export, generate a round first");
            return;
        }
        let scenario = self.state.scenario();
        let json = std::env::var("EXPORT_FORMAT")
            .map(|fmt| fmt.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let ext = if json { "json" } else { "xlsx" };
        let path = self.export_dir.join(format!("predictions_{stamp}.{ext}"));

        let result = if json {
            export::export_round_json(&path, &scenario, &self.state.predictions)
        } else {
            export::export_round(&path, &PLAYERS, &scenario, &self.state.predictions)
                .map(|report| report.predictions)
        };
        match result {
            Ok(count) => self.state.push_log(format!(
                "[INFO] Exported {count} predictions to {}",
                path.display()
            )),
            Err(err) => self.state.push_log(format!("[WARN] Export failed: {err}")),
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new();
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
    let tick_rate = Duration::from_millis(
        std::env::var("TICK_MS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(250)
            .max(50),
    );
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
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
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(&app.state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Roster => render_roster(frame, chunks[1], &app.state),
        Screen::Prediction => render_prediction(frame, chunks[1], &app.state),
        Screen::Insights => render_insights(frame, chunks[1]),
    }

    let footer =
        Paragraph::new(footer_text(&app.state)).block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[2]);

    if app.state.detail_overlay {
        if let Some(player) = selected_for_detail(&app.state) {
            render_detail_overlay(frame, frame.size(), &app.state, player);
        }
    }
    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let screen = match state.screen {
        Screen::Roster => "ROSTER",
        Screen::Prediction => "PREDICTION",
        Screen::Insights => "INSIGHTS",
    };
    let scenario = state.scenario();
    let opponent = roster::team_by_id(&scenario.opponent_id)
        .map(|t| t.short_name.as_str())
        .unwrap_or("?");
    let venue = roster::venue_by_id(&scenario.venue_id)
        .map(|v| v.name.as_str())
        .unwrap_or("?");
    format!(
        "IPL TERMINAL | {screen} | vs {opponent} @ {venue} | Sort: {}",
        sort_label(state.sort)
    )
}

fn footer_text(state: &AppState) -> String {
    let status = state.logs.back().cloned().unwrap_or_default();
    let keys = match state.screen {
        Screen::Roster => {
            "1/2/3 Screens | j/k Move | / Search | t Team | Enter Detail | ? Help | q Quit"
        }
        Screen::Prediction => {
            "Tab Opp/Venue | h/l Change | g Generate | s Sort | e Export | Enter Detail | q Quit"
        }
        Screen::Insights => "1/2/3 Screens | ? Help | q Quit",
    };
    format!("{keys}\n{status}")
}

fn render_roster(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(area);

    let filter = state
        .team_filter
        .as_deref()
        .and_then(roster::team_by_id)
        .map(|t| t.short_name.clone())
        .unwrap_or_else(|| "ALL".to_string());
    let search = if state.search_active {
        format!("/{}_", state.search_query)
    } else if state.search_query.is_empty() {
        "-".to_string()
    } else {
        format!("/{}", state.search_query)
    };
    let controls = Paragraph::new(format!("Team: {filter} | Search: {search}"))
        .style(Style::default().fg(Color::Cyan));
    frame.render_widget(controls, sections[0]);

    let players = state.filtered_players();
    if players.is_empty() {
        let empty =
            Paragraph::new("No players match").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, sections[1]);
        return;
    }

    let mut lines = vec![Line::from(Span::styled(
        format!(
            "{:<20} {:<5} {:<20} {:>8} {:>8} {:>8} {:>6} {:>8}",
            "PLAYER", "TEAM", "ROLE", "AVG", "SR", "WKTS", "ECON", "LAST3"
        ),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for (idx, player) in players.iter().enumerate() {
        let team = roster::team_by_id(&player.team)
            .map(|t| t.short_name.as_str())
            .unwrap_or("?");
        let text = format!(
            "{:<20} {:<5} {:<20} {:>8.2} {:>8.1} {:>8.0} {:>6.2} {:>8.1}",
            player.name,
            team,
            player.role.label(),
            player.stats.batting_average,
            player.stats.batting_strike_rate,
            player.stats.wickets_taken,
            player.stats.bowling_economy,
            player.recent_form.last3_runs,
        );
        let style = if idx == state.selected {
            Style::default().bg(Color::DarkGray).fg(Color::White)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(text, style)));
    }
    frame.render_widget(Paragraph::new(lines), sections[1]);
}

fn render_prediction(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let scenario = state.scenario();
    let opponent = roster::team_by_id(&scenario.opponent_id)
        .map(|t| t.name.as_str())
        .unwrap_or("?");
    let venue = roster::venue_by_id(&scenario.venue_id)
        .map(|v| v.name.as_str())
        .unwrap_or("?");
    let (opp_marker, venue_marker) = match state.scenario_focus {
        ScenarioFocus::Opponent => (">", " "),
        ScenarioFocus::Venue => (" ", ">"),
    };
    let picker = Paragraph::new(format!(
        "{opp_marker} Opponent: {opponent}\n{venue_marker} Venue:    {venue}"
    ))
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(picker, sections[0]);

    if state.predictions.is_empty() {
        let hint = Paragraph::new("No round generated. Press g to run the scenario.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hint, sections[1]);
        return;
    }

    let rankings = compute_rankings(&PLAYERS, &state.predictions, state.sort);
    let mut lines = vec![Line::from(Span::styled(
        format!(
            "{:<4} {:<20} {:<5} {:>9} {:>9} {:>8} {:>7}",
            "#", "PLAYER", "TEAM", "RUNS", "WKTS", "IMPACT", "TOP%"
        ),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for (idx, entry) in rankings.iter().enumerate() {
        let text = format!(
            "{:<4} {:<20} {:<5} {:>9.1} {:>9.1} {:>8.2} {:>6.0}%",
            idx + 1,
            entry.player_name,
            entry.team,
            entry.predicted_runs,
            entry.predicted_wickets,
            entry.overall_impact,
            entry.top_performer_probability * 100.0,
        );
        let style = if idx == state.selected {
            Style::default().bg(Color::DarkGray).fg(Color::White)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(text, style)));
    }
    frame.render_widget(Paragraph::new(lines), sections[1]);
}

fn render_insights(frame: &mut Frame, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let runs = importance_lines("RUNS MODEL", &FEATURE_IMPORTANCE_RUNS, RUNS_MODEL_METRICS);
    frame.render_widget(
        Paragraph::new(runs).block(Block::default().borders(Borders::RIGHT)),
        columns[0],
    );

    let mut wickets = importance_lines(
        "WICKETS MODEL",
        &FEATURE_IMPORTANCE_WICKETS,
        WICKETS_MODEL_METRICS,
    );
    wickets.push(Line::from(""));
    wickets.push(Line::from(Span::styled(
        "PLATFORM",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    wickets.push(Line::from(format!(
        "{} players | {} matches | {} balls | {:.1}% accuracy",
        PLATFORM_STATS.players_analyzed,
        PLATFORM_STATS.matches_processed,
        PLATFORM_STATS.balls_analyzed,
        PLATFORM_STATS.prediction_accuracy,
    )));
    frame.render_widget(Paragraph::new(wickets), columns[1]);
}

fn importance_lines(
    title: &str,
    table: &[FeatureImportance],
    metrics: ModelMetrics,
) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "MAE {:.2} | MSE {:.2} | R2 {:.4} | train {} / test {}",
            metrics.mae, metrics.mse, metrics.r2, metrics.train_size, metrics.test_size
        )),
        Line::from(""),
    ];
    for entry in table {
        let bar_len = (entry.importance * 60.0).round() as usize;
        lines.push(Line::from(format!(
            "{:<28} {:>5.3} {}",
            entry.feature,
            entry.importance,
            "#".repeat(bar_len)
        )));
    }
    lines
}

fn render_detail_overlay(frame: &mut Frame, area: Rect, state: &AppState, player: &Player) {
    let popup_area = centered_rect(70, 70, area);
    frame.render_widget(Clear, popup_area);

    let team = roster::team_by_id(&player.team)
        .map(|t| t.name.as_str())
        .unwrap_or("?");
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} ({})", player.name, team),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "{} | {} | {} | age {}",
            player.role.label(),
            player.batting_style,
            player.bowling_style,
            player.age
        )),
        Line::from(""),
        Line::from(format!(
            "Career: {:.0} runs @ {:.2} (SR {:.1}), {:.0} wickets @ econ {:.2}",
            player.stats.total_runs,
            player.stats.batting_average,
            player.stats.batting_strike_rate,
            player.stats.wickets_taken,
            player.stats.bowling_economy,
        )),
        Line::from(format!(
            "Form: {:.1} runs, {:.1} wickets over last 3",
            player.recent_form.last3_runs, player.recent_form.last3_wickets
        )),
    ];

    match state.predictions.get(&player.id) {
        Some(p) => lines.extend(prediction_lines(p)),
        None => {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "No prediction for the current scenario (press g on the Prediction screen).",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let detail = Paragraph::new(lines)
        .block(Block::default().title("Player Detail").borders(Borders::ALL));
    frame.render_widget(detail, popup_area);
}

fn prediction_lines(p: &DetailedPrediction) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(
            "FORECAST",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "Batting:  {:.1} runs | SR {:.1} | boundary {:.0}% | confidence {:.0}%",
            p.batting.predicted_runs,
            p.batting.predicted_strike_rate,
            p.batting.boundary_probability * 100.0,
            p.batting.confidence * 100.0,
        )),
        Line::from(format!(
            "Bowling:  {:.1} wickets | econ {:.2} | dot balls {:.0}% | confidence {:.0}%",
            p.bowling.predicted_wickets,
            p.bowling.predicted_economy,
            p.bowling.dot_ball_percentage * 100.0,
            p.bowling.confidence * 100.0,
        )),
        Line::from(format!(
            "Fielding: catch {:.0}% | run out {:.0}% | confidence {:.0}%",
            p.fielding.catch_probability * 100.0,
            p.fielding.run_out_probability * 100.0,
            p.fielding.confidence * 100.0,
        )),
        Line::from(""),
        Line::from(format!(
            "Overall impact {:.2} | top performer {:.0}%",
            p.overall_impact,
            p.top_performer_probability * 100.0
        )),
    ]
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "IPL Terminal - Help",
        "",
        "Global:",
        "  1            Roster",
        "  2            Prediction",
        "  3            Insights",
        "  j/k or ↑/↓   Move",
        "  Enter / d    Player detail",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Roster:",
        "  /            Search by name",
        "  t            Cycle team filter",
        "",
        "Prediction:",
        "  Tab          Switch opponent/venue",
        "  h/l or ←/→   Change selection",
        "  g            Generate round",
        "  s            Cycle sort mode",
        "  e            Export round to .xlsx",
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

/// On the Prediction screen the cursor walks the sorted leaderboard, not the
/// roster order, so the detail overlay has to resolve through the rankings.
fn selected_for_detail(state: &AppState) -> Option<&'static Player> {
    match state.screen {
        Screen::Prediction if !state.predictions.is_empty() => {
            let rankings = compute_rankings(&PLAYERS, &state.predictions, state.sort);
            rankings
                .get(state.selected)
                .and_then(|entry| roster::player_by_id(&entry.player_id))
        }
        _ => state.selected_player(),
    }
}

fn sort_label(sort: SortMode) -> &'static str {
    match sort {
        SortMode::Impact => "IMPACT",
        SortMode::Runs => "RUNS",
        SortMode::Wickets => "WKTS",
        SortMode::TopPerformer => "TOP",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_centered_within_area() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 60, area);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 30);
        assert_eq!(popup.x, 20);
        assert_eq!(popup.y, 10);
    }
}
