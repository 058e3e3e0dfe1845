use crate::tui_mode::app::App;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED)))
}

pub fn render_help(frame: &mut Frame, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" SafeCalc Help ")
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black));

    let help_text = vec![
        Line::from(Span::styled("SafeCalc - Arithmetic Only", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))),
        Line::from(""),
        heading("Operations:"),
        Line::from("  +  : Addition        (e.g., 5 + 3 = 8)"),
        Line::from("  -  : Subtraction     (e.g., 10 - 4 = 6)"),
        Line::from("  *  : Multiplication  (e.g., 6 * 7 = 42)"),
        Line::from("  /  : Division        (e.g., 15 / 4 = 3.75)"),
        Line::from("  // : Floor division  (e.g., -7 // 2 = -4)"),
        Line::from("  %  : Modulo          (e.g., -7 % 3 = 2)"),
        Line::from("  ** : Power           (e.g., 2 ** 3 ** 2 = 512)"),
        Line::from("  ( ) : Grouping       (e.g., (2 + 3) * 4 = 20)"),
        Line::from(""),
        heading("Precedence (lowest first):"),
        Line::from("  + -  then  * / // %  then  unary + -  then  **"),
        Line::from("  -2 ** 2 = -4,   2 ** -1 = 0.5"),
        Line::from(""),
        heading("Not allowed:"),
        Line::from("  names, function calls, strings, comparisons,"),
        Line::from("  scientific notation (1e5)"),
        Line::from(""),
        heading("Keys:"),
        Line::from("  0-9 . + - * / % ( ) : Type expression"),
        Line::from("  Enter or =  : Calculate"),
        Line::from("  Backspace   : Delete last character"),
        Line::from("  Esc         : Clear"),
        Line::from("  Ctrl+C      : Copy result"),
        Line::from("  Ctrl+Q      : Quit"),
        Line::from("  Mouse click : Press keypad buttons"),
        Line::from("  F1 / Esc    : Close this help"),
        Line::from(""),
        heading("Results:"),
        Line::from("  Shown with up to 10 significant digits."),
        Line::from("  On error the expression is kept so it can be fixed."),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true })
        .scroll((app.help_scroll as u16, 0));

    frame.render_widget(Clear, frame.size());
    frame.render_widget(paragraph, frame.size());
}
