use super::app::{App, ButtonStyle, KEYPAD, KEY_INPUT};
use anyhow::Result;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::time::Duration;
use tracing::debug;
use super::helpers::{highlight_expression, tail_to_width};
use crate::render_help::render_help;

const MIN_TERMINAL_WIDTH: u16 = 28;
const MIN_TERMINAL_HEIGHT: u16 = 20;

const PANEL: Color = Color::Rgb(0x11, 0x18, 0x27);
const BUTTON: Color = Color::Rgb(0x1f, 0x29, 0x37);
const BUTTON_OP: Color = Color::Rgb(0x33, 0x41, 0x55);
const BUTTON_EQ: Color = Color::Rgb(0x25, 0x63, 0xeb);
const BUTTON_DANGER: Color = Color::Rgb(0xef, 0x44, 0x44);
const FOREGROUND: Color = Color::Rgb(0xe5, 0xe7, 0xeb);
const MUTED: Color = Color::Rgb(0x9c, 0xa3, 0xaf);

pub fn run_ui_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            if app.show_help {
                render_help(f, app);
            } else {
                ui(f, app);
            }
        })?;

        if app.should_quit {
            break;
        }

        if crossterm::event::poll(Duration::from_millis(50))? {
            match crossterm::event::read()? {
                Event::Key(KeyEvent { code, modifiers, kind, .. }) if kind == KeyEventKind::Press => {
                    handle_key_event(app, code, modifiers);
                }
                Event::Mouse(event) => {
                    handle_mouse_event(app, event);
                }
                _ => {}
            }
        }
    }
    Ok(())
}

fn handle_key_event(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    if modifiers.contains(KeyModifiers::CONTROL) {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
            KeyCode::Char('c') | KeyCode::Char('C') => match app.copy_result() {
                Ok(()) => app.status = Some(format!("Copied {}", app.result)),
                Err(e) => {
                    debug!("clipboard error: {:#}", e);
                    app.status = Some(format!("{}", e));
                }
            },
            KeyCode::Char('u') | KeyCode::Char('U') => app.clear(),
            _ => {}
        }
        return;
    }

    if app.show_help {
        match code {
            KeyCode::Down => app.help_scroll = app.help_scroll.saturating_add(1),
            KeyCode::Up => app.help_scroll = app.help_scroll.saturating_sub(1),
            KeyCode::PageDown => app.help_scroll = app.help_scroll.saturating_add(10),
            KeyCode::PageUp => app.help_scroll = app.help_scroll.saturating_sub(10),
            KeyCode::Esc | KeyCode::F(1) => {
                app.show_help = false;
                app.help_scroll = 0;
            }
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Char('=') | KeyCode::Enter => app.calculate(),
        KeyCode::Char(c) if KEY_INPUT.contains(c) => {
            let mut buf = [0u8; 4];
            app.press(c.encode_utf8(&mut buf));
        }
        KeyCode::Backspace => app.backspace(),
        KeyCode::Esc => app.clear(),
        KeyCode::F(1) => {
            app.show_help = true;
            app.help_scroll = 0;
        }
        _ => {}
    }
}

fn handle_mouse_event(app: &mut App, event: MouseEvent) {
    if app.show_help {
        match event.kind {
            MouseEventKind::ScrollDown => app.help_scroll = app.help_scroll.saturating_add(3),
            MouseEventKind::ScrollUp => app.help_scroll = app.help_scroll.saturating_sub(3),
            _ => {}
        }
    } else if event.kind == MouseEventKind::Down(MouseButton::Left) {
        app.click(event.column, event.row);
    }
}

fn ui(frame: &mut Frame, app: &mut App) {
    let terminal_size = frame.size();

    app.terminal_too_small = terminal_size.width < MIN_TERMINAL_WIDTH ||
                             terminal_size.height < MIN_TERMINAL_HEIGHT;

    if app.terminal_too_small {
        app.button_areas.clear();
        render_resize_message(frame, terminal_size);
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Min(10),
        ])
        .split(terminal_size);

    render_display(frame, app, layout[0]);
    render_status(frame, app, layout[1]);
    render_keypad(frame, app, layout[2]);
}

fn render_resize_message(frame: &mut Frame, area: Rect) {
    let message = format!(
        "Terminal too small! Min size: {}x{}. Current: {}x{}",
        MIN_TERMINAL_WIDTH,
        MIN_TERMINAL_HEIGHT,
        area.width,
        area.height
    );

    let text = vec![
        Line::from(Span::styled(
            message,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Please resize your terminal window",
            Style::default().fg(Color::Yellow)
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Resize Required ")
        .title_alignment(Alignment::Center);

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn render_display(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .style(Style::default().bg(PANEL))
        .title(" SafeCalc ")
        .title_alignment(Alignment::Center);

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let visible_width = inner_area.width.saturating_sub(1) as usize;
    let expression = tail_to_width(&app.input, visible_width);
    let base_style = Style::default().fg(FOREGROUND);

    let result_style = if app.last_error.is_some() {
        Style::default().fg(BUTTON_DANGER).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    };

    let lines = vec![
        Line::from(highlight_expression(&expression, base_style)),
        Line::from(Span::styled(tail_to_width(&app.result, visible_width), result_style)),
    ];

    let paragraph = Paragraph::new(lines).alignment(Alignment::Right);
    frame.render_widget(paragraph, inner_area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(err) = &app.last_error {
        let line = Line::from(Span::styled(format!(" {}", err), Style::default().fg(BUTTON_DANGER)));
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    if let Some(status) = &app.status {
        let line = Line::from(Span::styled(format!(" {}", status), Style::default().fg(MUTED)));
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let keys = [
        ("Enter", "Calculate"),
        ("Esc", "Clear"),
        ("^C", "Copy"),
        ("F1", "Help"),
        ("^Q", "Quit"),
    ];

    let spans: Vec<Span> = keys
        .iter()
        .flat_map(|(key, desc)| {
            vec![
                Span::styled(
                    *key,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" {} ", desc),
                    Style::default().fg(Color::DarkGray),
                ),
            ]
        })
        .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_keypad(frame: &mut Frame, app: &mut App, area: Rect) {
    app.button_areas.clear();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, KEYPAD.len() as u32); KEYPAD.len()])
        .split(area);

    for (row, buttons) in rows.iter().zip(KEYPAD.iter()) {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, buttons.len() as u32); buttons.len()])
            .split(*row);

        for (cell, button) in cells.iter().zip(buttons.iter()) {
            let (bg, fg) = match button.style {
                ButtonStyle::Base => (BUTTON, FOREGROUND),
                ButtonStyle::Operator => (BUTTON_OP, FOREGROUND),
                ButtonStyle::Equals => (BUTTON_EQ, Color::White),
                ButtonStyle::Danger => (BUTTON_DANGER, Color::White),
            };

            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Black))
                .style(Style::default().bg(bg));

            let inner = block.inner(*cell);
            frame.render_widget(block, *cell);

            // Centre the label vertically.
            let label_area = Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1.min(inner.height));
            let label = Paragraph::new(Span::styled(
                button.label,
                Style::default().fg(fg).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center);
            frame.render_widget(label, label_area);

            app.button_areas.push((*cell, button.action));
        }
    }
}
