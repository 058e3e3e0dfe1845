use anyhow::{Context, Result};
use safecalc::calculate;
use std::io::{stdin, stdout, Write};
use termion::{
    clear::CurrentLine as ClearLine,
    cursor::{DetectCursorPos, Goto},
    event::Key,
    input::TermRead,
    raw::IntoRawMode,
};
use tracing::debug;

// Позиция символа -> байтовая позиция
fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or_else(|| s.len())
}

fn remove_char_at(s: &mut String, char_index: usize) {
    let byte_idx = char_index_to_byte_index(s, char_index);
    if let Some(c) = s[byte_idx..].chars().next() {
        s.drain(byte_idx..byte_idx + c.len_utf8());
    }
}

enum Command<'a> {
    Quit,
    Help,
    Evaluate(&'a str),
}

fn parse_command(input: &str) -> Command<'_> {
    match input.to_lowercase().as_str() {
        "quit" | "exit" | "q" => Command::Quit,
        "help" => Command::Help,
        _ => Command::Evaluate(input),
    }
}

pub fn run_line() -> Result<()> {
    println!("SafeCalc");
    println!("Supports: + - * / // % ** and parentheses");
    println!("Navigation: ←/→, Backspace/Delete, Home/End");
    println!("Commands: 'help', 'quit' to exit\n");

    let mut stdout = stdout()
        .into_raw_mode()
        .context("Failed to switch the terminal to raw mode")?;
    let stdin = stdin();
    let mut keys = stdin.keys();

    loop {
        write!(stdout, "\r{}> ", ClearLine)?;
        stdout.flush()?;

        let mut expression = String::new();
        let mut cursor_pos = 0; // в символах
        let (_, initial_y) = stdout.cursor_pos()?;

        loop {
            write!(stdout, "{}{}> {}", Goto(1, initial_y), ClearLine, expression)?;
            let byte_pos = char_index_to_byte_index(&expression, cursor_pos);
            let cursor_x = 3 + expression[..byte_pos].chars().count() as u16;
            write!(stdout, "{}", Goto(cursor_x, initial_y))?;
            stdout.flush()?;

            let Some(key) = keys.next() else {
                // stdin closed
                write!(stdout, "\r\n")?;
                return Ok(());
            };

            match key? {
                Key::Char('\n') => break,
                Key::Ctrl('c') | Key::Ctrl('d') => {
                    write!(stdout, "\r\n")?;
                    return Ok(());
                }
                Key::Char(c) => {
                    let byte_idx = char_index_to_byte_index(&expression, cursor_pos);
                    expression.insert(byte_idx, c);
                    cursor_pos += 1;
                }
                Key::Backspace if cursor_pos > 0 => {
                    cursor_pos -= 1;
                    remove_char_at(&mut expression, cursor_pos);
                }
                Key::Delete if cursor_pos < expression.chars().count() => {
                    remove_char_at(&mut expression, cursor_pos);
                }
                Key::Left if cursor_pos > 0 => cursor_pos -= 1,
                Key::Right if cursor_pos < expression.chars().count() => cursor_pos += 1,
                Key::Home => cursor_pos = 0,
                Key::End => cursor_pos = expression.chars().count(),
                _ => {}
            }
        }

        let input = expression.trim();
        if input.is_empty() {
            write!(stdout, "\r\n")?;
            continue;
        }

        match parse_command(input) {
            Command::Quit => {
                write!(stdout, "\r\nGoodbye!\r\n")?;
                return Ok(());
            }
            Command::Help => {
                write!(
                    stdout,
                    "\r\n  Precedence: + -  <  * / // %  <  unary + -  <  **\r\n  \
                     Power is right-associative; % and // follow the divisor's sign.\r\n\n"
                )?;
            }
            Command::Evaluate(expr) => {
                debug!(expr, "evaluating line");
                match calculate(expr) {
                    Ok(result) => write!(stdout, "\r\n  {} = {}\r\n\n", expr, result)?,
                    Err(e) => write!(stdout, "\r\n  {} = Error: {}\r\n\n", expr, e)?,
                }
            }
        }
    }
}
