use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Keeps the end of `text`, which is where typing happens, within `width`
/// columns. A cut is marked with a leading `…`.
pub fn tail_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut kept = Vec::new();
    let mut used = 1;
    for c in text.chars().rev() {
        let char_width = UnicodeWidthChar::width(c).unwrap_or(1);
        if used + char_width > width {
            break;
        }
        kept.push(c);
        used += char_width;
    }

    std::iter::once('…').chain(kept.into_iter().rev()).collect()
}

pub fn highlight_expression(expr: &str, base_style: Style) -> Vec<Span<'static>> {
    let operator_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let number_style = Style::default()
        .fg(Color::LightGreen);

    let mut spans = Vec::new();
    let mut current = String::new();

    for c in expr.chars() {
        if c.is_ascii_digit() || c == '.' {
            current.push(c);
            continue;
        }

        if !current.is_empty() {
            spans.push(Span::styled(current.clone(), number_style));
            current.clear();
        }

        match c {
            '+' | '-' | '*' | '/' | '%' => {
                spans.push(Span::styled(c.to_string(), operator_style));
            }
            _ => {
                spans.push(Span::styled(c.to_string(), base_style));
            }
        }
    }

    if !current.is_empty() {
        spans.push(Span::styled(current, number_style));
    }

    spans
}
