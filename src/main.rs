//! Timeline TUI - terminal client for the Exchange Timeline service
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async API calls

use std::io;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use timeline_tui::app::state::BackendStatus;
use timeline_tui::config::Config;
use timeline_tui::constants::{APP_NAME, APP_VERSION, LOG_FILE_NAME};
use timeline_tui::messages::ui_events::{
    key_to_ui_event, AuthField, ComposerField, InputMode, Screen, View,
};
use timeline_tui::models::AuthMode;
use timeline_tui::ui::{self, backend_badge, centered_rect, cursor_x, field_style, mask};
use timeline_tui::{
    ApiClient, AppActor, AppState, NetworkActor, NetworkCommand, NetworkResponse, RenderState,
    SessionStore, UiEvent,
};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;

    // The terminal belongs to the TUI, so logs go to a file
    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("creating log dir {}", config.log_dir.display()))?;
    let file_appender = tracing_appender::rolling::never(&config.log_dir, LOG_FILE_NAME);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    tracing::info!(api_base = %config.api_base, session = %config.session_file.display(), "starting");

    let session = SessionStore::open(&config.session_file);
    let session_rx = session.subscribe();
    let client = ApiClient::new(config.api_base.clone());

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(client, session_rx, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(AppState::new(session), net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("exiting");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.screen,
                    current_state.view,
                    current_state.input_mode,
                    current_state.show_help,
                    current_state.alert.is_some(),
                ) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    match state.screen {
        Screen::Auth => draw_auth_screen(f, state, area),
        Screen::Main => draw_main_screen(f, state, area),
    }

    if state.show_help {
        draw_help_popup(f, area);
    }

    if let Some(message) = &state.alert {
        draw_alert_popup(f, message, area);
    }
}

fn draw_auth_screen(f: &mut Frame, state: &RenderState, area: Rect) {
    let panel = centered_rect(50, 60, area);
    let form = &state.auth;

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} v{} ", APP_NAME, APP_VERSION))
        .title_style(Style::default().bold());
    let inner = outer.inner(panel);
    f.render_widget(Clear, panel);
    f.render_widget(outer, panel);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Mode tabs
            Constraint::Length(1),
            Constraint::Length(3), // Username
            Constraint::Length(3), // Password
            Constraint::Min(2),    // Error
            Constraint::Length(1), // Hints
        ])
        .split(inner);

    let selected = match form.mode {
        AuthMode::Login => 0,
        AuthMode::Register => 1,
    };
    f.render_widget(ui::render_tabs(&["Login", "Register"], selected), chunks[0]);

    let user_focused = form.field == AuthField::Username;
    let username = ui::render_input(
        &form.username,
        " Username ",
        field_style(user_focused, true),
    );
    f.render_widget(username, chunks[2]);

    let masked = mask(&form.password);
    let password = ui::render_input(&masked, " Password ", field_style(!user_focused, true));
    f.render_widget(password, chunks[3]);

    if form.loading {
        let waiting = Paragraph::new(format!("{}...", form.mode.as_str()))
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(waiting, chunks[4]);
    } else if let Some(error) = &form.error {
        let error = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: false });
        f.render_widget(error, chunks[4]);
    }

    let hints = Paragraph::new(format!(
        " Enter:{} | Tab:field | F2/Ctrl+T:{} | Esc:quit ",
        form.mode.as_str().to_lowercase(),
        form.mode.toggle().as_str().to_lowercase()
    ))
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(hints, chunks[5]);

    // Cursor
    let (field_area, text) = if user_focused {
        (chunks[2], form.username.as_str())
    } else {
        (chunks[3], form.password.as_str())
    };
    f.set_cursor_position(Position::new(
        cursor_x(field_area, text, state.cursor_position),
        field_area.y + 1,
    ));
}

fn draw_main_screen(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Navigation
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_nav_bar(f, state, chunks[0]);

    match state.view {
        View::Feed => draw_feed_view(f, state, chunks[1]),
        View::Rates => draw_rates_view(f, state, chunks[1]),
    }

    draw_status_bar(f, state, chunks[2]);
}

fn draw_nav_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let tab = |label: &'static str, active: bool| {
        Span::styled(
            label,
            if active {
                Style::default().fg(Color::Black).bg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::Gray)
            },
        )
    };

    let line = Line::from(vec![
        Span::styled(format!(" {} ", APP_NAME), Style::default().fg(Color::Cyan).bold()),
        Span::raw(" "),
        tab(" 1:Home ", state.view == View::Feed),
        Span::raw(" "),
        tab(" 2:Rates ", state.view == View::Rates),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_feed_view(f: &mut Frame, state: &RenderState, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(30)])
        .split(area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Composer
            Constraint::Min(3),    // Timeline
        ])
        .split(columns[0]);

    draw_composer(f, state, rows[0]);
    draw_timeline(f, state, rows[1]);
    draw_rates_summary(f, state, columns[1]);
}

fn draw_composer(f: &mut Frame, state: &RenderState, area: Rect) {
    let composer = &state.composer;
    let editing = state.input_mode == InputMode::Editing;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    let fields = [
        (ComposerField::Title, " What's happening? ", &composer.title, chunks[0]),
        (ComposerField::Content, " Tell us more... ", &composer.content, chunks[1]),
        (ComposerField::Author, " Signed as (author) ", &composer.author, chunks[2]),
    ];

    for (field, title, text, rect) in fields {
        let focused = editing && composer.field == field;
        let title = if field == ComposerField::Author && composer.posting {
            " Posting... "
        } else {
            title
        };
        f.render_widget(ui::render_input(text, title, field_style(focused, editing)), rect);

        if focused {
            f.set_cursor_position(Position::new(
                cursor_x(rect, text, state.cursor_position),
                rect.y + 1,
            ));
        }
    }
}

fn draw_timeline(f: &mut Frame, state: &RenderState, area: Rect) {
    let title = if state.feed_loading {
        " Home [loading timeline...] "
    } else {
        " Home "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_bottom(Line::from(" l:like | r:reload ").right_aligned());

    if let Some(error) = &state.feed_error {
        let error = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: false })
            .block(block);
        f.render_widget(error, area);
        return;
    }

    if state.articles.is_empty() {
        let text = if state.feed_loading {
            ""
        } else {
            "Nothing here yet. Press 'n' to post something!"
        };
        let empty = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = state
        .articles
        .iter()
        .zip(&state.like_labels)
        .map(|(article, likes)| {
            let header = Line::from(vec![
                Span::styled(article.display_author().to_string(), Style::default().bold()),
                Span::styled(format!("  #{}", article.id), Style::default().fg(Color::DarkGray)),
            ]);
            let title = Line::from(Span::styled(
                article.title.clone(),
                Style::default().fg(Color::White).bold(),
            ));
            let mut lines = vec![header, title];
            lines.extend(article.content.lines().map(|l| Line::from(l.to_string())));
            lines.push(Line::from(Span::styled(
                format!("♥ {}", likes),
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(""));
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Rgb(20, 30, 45)))
        .highlight_symbol("▌");

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected_article));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_rates_summary(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Rates at a glance ");

    let mut lines: Vec<Line> = state
        .rates
        .iter()
        .map(|rate| {
            Line::from(vec![
                Span::styled(format!("{:<10}", rate.pair()), Style::default().fg(Color::Gray)),
                Span::styled(format!("{:>14}", rate.rate), Style::default().fg(Color::Cyan).bold()),
            ])
        })
        .collect();

    if lines.is_empty() && !state.rates_loading {
        lines.push(Line::from(Span::styled("No data", Style::default().fg(Color::DarkGray))));
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_rates_view(f: &mut Frame, state: &RenderState, area: Rect) {
    let title = if state.rates_loading {
        " Exchange rates [loading...] "
    } else {
        " Exchange rates "
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    if let Some(error) = &state.rates_error {
        let error = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: false })
            .block(block);
        f.render_widget(error, area);
        return;
    }

    if state.rates.is_empty() {
        let text = if state.rates_loading { "" } else { "No exchange rate data." };
        let empty = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = state
        .rates
        .iter()
        .map(|rate| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        format!("{} → {}", rate.base_currency, rate.target_currency),
                        Style::default().bold(),
                    ),
                    Span::raw("   "),
                    Span::styled(rate.rate.to_string(), Style::default().fg(Color::Cyan).bold()),
                ]),
                Line::from(Span::styled(rate.local_date(), Style::default().fg(Color::DarkGray))),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Rgb(20, 30, 45)));

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected_rate));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let hints = if state.input_mode == InputMode::Editing {
        " ESC:stop | Tab:next field | Enter:next / post "
    } else {
        " 1/2:view | n:compose | l:like | r:reload | o:logout | ?:help | q:quit "
    };

    let mut spans = vec![Span::styled(hints, Style::default().fg(Color::DarkGray))];
    spans.push(backend_badge(&state.backend));
    if let BackendStatus::Offline(reason) = &state.backend {
        spans.push(Span::styled(reason.clone(), Style::default().fg(Color::DarkGray)));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 TIMELINE - Keyboard Shortcuts

 SIGN IN
   Tab / ↑ / ↓        Switch username / password
   F2 / Ctrl+T        Toggle login / register
   Enter              Submit

 NAVIGATION
   1 / 2 / Tab        Home / Rates
   ↑ / ↓ (k / j)      Select article or rate

 TIMELINE
   n / e              Compose a post
   Enter              Next field (posts from the last one)
   l / Enter          Like selected article
   r                  Reload timeline and rates
   o                  Log out

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn draw_alert_popup(f: &mut Frame, message: &str, area: Rect) {
    let popup_area = centered_rect(50, 25, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Error (Enter to dismiss) ")
        .style(Style::default().bg(Color::Black));

    let alert = Paragraph::new(message)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(alert, popup_area);
}
