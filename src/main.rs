use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use chrono::{Datelike, Local};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap};

use predict_terminal::config::Config;
use predict_terminal::form::{FormField, FormState, TriggerState};
use predict_terminal::predict_client::{HttpBackend, Venue};
use predict_terminal::selection::SelectControl;
use predict_terminal::slideshow::visible_layer;
use predict_terminal::state::{self, AppState, ProviderCommand, apply_delta};
use predict_terminal::submit::{begin_submission, spawn_prediction_worker};

const FORM_HEIGHT: u16 = 11;
const RESULT_HEIGHT: u16 = 7;

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: mpsc::Sender<ProviderCommand>,
    /// Set by the result view's scroll request; keeps the result panel on screen
    /// when the terminal is too short for form and result together.
    result_in_view: bool,
}

impl App {
    fn new(state: AppState, cmd_tx: mpsc::Sender<ProviderCommand>) -> Self {
        Self {
            state,
            should_quit: false,
            cmd_tx,
            result_in_view: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        // Alerts block everything until dismissed.
        if self.state.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.state.dismiss_alert();
            }
            return;
        }

        if self.state.help_overlay {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.state.help_overlay = false;
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = true,
            KeyCode::Tab | KeyCode::Down => {
                self.state.form.focus_next();
                self.result_in_view = false;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.state.form.focus_prev();
                self.result_in_view = false;
            }
            KeyCode::Left | KeyCode::Char('h') => self.state.form.cycle_focused(false),
            KeyCode::Right | KeyCode::Char('l') => self.state.form.cycle_focused(true),
            KeyCode::Char(ch) if ch.is_ascii_digit() || ch == '-' => {
                self.state.form.type_char(ch)
            }
            KeyCode::Backspace => self.state.form.backspace(),
            KeyCode::Enter => {
                begin_submission(&mut self.state, &self.cmd_tx);
            }
            _ => {}
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = Config::from_env();
    let backend = match HttpBackend::new(&config.base_url, config.timeout) {
        Ok(backend) => backend,
        Err(err) => {
            eprintln!("error: {err:#}");
            return Ok(());
        }
    };

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let backend_url = backend.url().to_string();
    spawn_prediction_worker(backend, tx, cmd_rx);

    let mut state = AppState::new(&config, Local::now().weekday());
    state.push_log(format!("[INFO] Backend: {backend_url}"));
    let mut app = App::new(state, cmd_tx);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let term_backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(term_backend)?;

    let res = run_app(&mut terminal, &mut app, rx);

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

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<state::Delta>,
) -> io::Result<()> {
    // Short tick so the 10ms/100ms result callbacks and the fill easing look smooth.
    let tick_rate = Duration::from_millis(50);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        app.state.result.tick(Instant::now());
        if app.state.result.take_scroll_request().is_some() {
            app.result_in_view = true;
        }

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
    let now = Instant::now();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state, now))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    render_body(frame, chunks[1], app, now);

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(
        "Tab/↑/↓ Field | ←/→ Change | 0-9 Time | Enter Predict | ? Help | q Quit",
    );
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
    if let Some(alert) = &app.state.alert {
        render_alert(frame, frame.size(), alert);
    }
}

fn header_text(state: &AppState, now: Instant) -> String {
    let backdrop = visible_layer(&state.layers, now.duration_since(state.started_at))
        .and_then(|idx| state.layers.get(idx))
        .map(|layer| layer.caption().to_string())
        .unwrap_or_default();
    let line1 = "  .-.  MATCH PREDICTOR".to_string();
    let line2 = format!(" /___\\  backdrop: {backdrop}");
    let line3 = "  |_|".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn render_body(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
    let show_result = app.state.result.is_visible();
    if !show_result {
        render_form(frame, area, &app.state.form);
        return;
    }

    if area.height < FORM_HEIGHT + RESULT_HEIGHT {
        // Not enough room for both; the scroll request decides which one wins.
        if app.result_in_view {
            render_result(frame, area, &app.state, now);
        } else {
            render_form(frame, area, &app.state.form);
        }
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(FORM_HEIGHT), Constraint::Min(RESULT_HEIGHT)])
        .split(area);
    render_form(frame, rows[0], &app.state.form);
    render_result(frame, rows[1], &app.state, now);
}

fn render_form(frame: &mut Frame, area: Rect, form: &FormState) {
    let lines = vec![
        field_line(form, FormField::Team, picker_text(&form.team)),
        field_line(form, FormField::Opponent, picker_text(&form.opponent)),
        field_line(form, FormField::Venue, venue_text(form)),
        field_line(form, FormField::Hours, time_text(&form.hours.raw)),
        field_line(form, FormField::Minutes, time_text(&form.minutes.raw)),
        field_line(form, FormField::Day, picker_text(&form.day)),
        Line::from(""),
        trigger_line(form),
    ];
    let paragraph =
        Paragraph::new(lines).block(Block::default().title("Match").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn field_line(form: &FormState, field: FormField, value: String) -> Line<'static> {
    let focused = form.focus == field;
    let prefix = if focused { "> " } else { "  " };
    let style = if focused {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::raw(prefix),
        Span::styled(
            format!("{:<9}", field.label()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(value, style),
    ])
}

fn picker_text(control: &SelectControl) -> String {
    let value = control.value().unwrap_or("-");
    let disabled = control.options.iter().filter(|o| o.disabled).count();
    if control.selection_is_stale() {
        format!("< {value} > (taken)")
    } else if disabled > 0 {
        format!("< {value} >  {disabled} unavailable")
    } else {
        format!("< {value} >")
    }
}

fn venue_text(form: &FormState) -> String {
    let mark = |v: Venue| if form.venue == v { "(x)" } else { "( )" };
    format!("{} Home  {} Away", mark(Venue::Home), mark(Venue::Away))
}

fn time_text(raw: &str) -> String {
    if raw.is_empty() {
        "__".to_string()
    } else {
        raw.to_string()
    }
}

fn trigger_line(form: &FormState) -> Line<'static> {
    let focused = form.focus == FormField::Submit;
    let label = format!("[ {} ]", form.trigger.label());
    let mut style = match form.trigger {
        TriggerState::Idle => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        TriggerState::Busy => Style::default().fg(Color::DarkGray),
    };
    if focused {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Line::from(vec![Span::raw("  "), Span::styled(label, style)])
}

fn render_result(frame: &mut Frame, area: Rect, state: &AppState, now: Instant) {
    let view = &state.result;
    // Terminals have no alpha; dim until the fade is mostly done.
    let faded = view.opacity_at(now) < 0.5;
    let text_style = if faded {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    let block = Block::default()
        .title("Prediction")
        .borders(Borders::ALL)
        .border_style(text_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);

    let percent = view.fill_percent(now);
    let color = view
        .fill_rgb()
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::Gray);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color))
        .ratio((percent / 100.0).clamp(0.0, 1.0))
        .label(format!("{percent:.0}%"));
    frame.render_widget(gauge, rows[0]);

    let probability = Paragraph::new(format!("Win probability: {}%", view.probability_text))
        .style(text_style.add_modifier(Modifier::BOLD));
    frame.render_widget(probability, rows[2]);

    let message = Paragraph::new(view.message.clone())
        .style(text_style)
        .wrap(Wrap { trim: true });
    frame.render_widget(message, rows[3]);
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No alerts yet".to_string();
    }
    let start = state.logs.len().saturating_sub(3);
    state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_alert(frame: &mut Frame, area: Rect, alert: &str) {
    let popup_area = centered_rect(50, 30, area);
    frame.render_widget(Clear, popup_area);
    let text = format!("{alert}\n\nEnter/Esc to dismiss");
    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .title("Alert")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup_area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Match Predictor - Help",
        "",
        "Form:",
        "  Tab / ↓      Next field",
        "  Shift-Tab / ↑ Previous field",
        "  ← / →        Change team, opponent, venue or day",
        "  0-9, Bksp    Edit hours / minutes",
        "  Enter        Predict",
        "",
        "Global:",
        "  ?            Toggle help",
        "  q / Esc      Quit",
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
