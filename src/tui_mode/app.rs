use anyhow::{Context, Result};
use ratatui::layout::Rect;
use safecalc::{evaluate, format_result, EvalError};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Insert(&'static str),
    Clear,
    Backspace,
    Calculate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Base,
    Operator,
    Equals,
    Danger,
}

#[derive(Debug, Clone, Copy)]
pub struct Button {
    pub label: &'static str,
    pub action: Action,
    pub style: ButtonStyle,
}

const fn button(label: &'static str, action: Action, style: ButtonStyle) -> Button {
    Button { label, action, style }
}

const fn digit(label: &'static str) -> Button {
    button(label, Action::Insert(label), ButtonStyle::Base)
}

const fn operator(label: &'static str) -> Button {
    button(label, Action::Insert(label), ButtonStyle::Operator)
}

pub const KEYPAD: [[Button; 4]; 5] = [
    [
        button("C", Action::Clear, ButtonStyle::Danger),
        button("⌫", Action::Backspace, ButtonStyle::Operator),
        operator("%"),
        operator("/"),
    ],
    [digit("7"), digit("8"), digit("9"), operator("*")],
    [digit("4"), digit("5"), digit("6"), operator("-")],
    [digit("1"), digit("2"), digit("3"), operator("+")],
    [
        digit("0"),
        digit("."),
        operator("//"),
        button("=", Action::Calculate, ButtonStyle::Equals),
    ],
];

/// Characters accepted from the keyboard.
pub const KEY_INPUT: &str = "0123456789.+-*/%()";

fn is_operator(c: char) -> bool {
    "+-*/%.".contains(c)
}

pub struct App {
    pub input: String,
    pub result: String,
    pub last_error: Option<EvalError>,
    pub status: Option<String>,
    pub should_quit: bool,
    pub show_help: bool,
    pub help_scroll: usize,
    pub button_areas: Vec<(Rect, Action)>,
    pub terminal_too_small: bool,
}

impl App {
    pub fn new() -> Self {
        App {
            input: String::new(),
            result: "0".to_string(),
            last_error: None,
            status: None,
            should_quit: false,
            show_help: false,
            help_scroll: 0,
            button_areas: Vec::new(),
            terminal_too_small: false,
        }
    }

    /// Appends a token, ignoring operators that cannot follow the current
    /// text. Purely cosmetic: the parser decides what is valid.
    pub fn press(&mut self, token: &str) {
        let mut chars = token.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if is_operator(c) {
                match self.input.chars().last() {
                    None if c != '-' => return,
                    Some(last) if is_operator(last) && !self.accepts_after_operator(c) => return,
                    _ => {}
                }
            }
        }
        self.input.push_str(token);
        self.status = None;
    }

    /// `**`, `//`, and a sign after `*`, `/` or `%`.
    fn accepts_after_operator(&self, c: char) -> bool {
        let doubled = format!("{c}{c}");
        match c {
            '*' | '/' => self.input.ends_with(c) && !self.input.ends_with(&doubled),
            '-' => self.input.ends_with(&['*', '/', '%'][..]),
            _ => false,
        }
    }

    pub fn backspace(&mut self) {
        self.input.pop();
        self.status = None;
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.result = "0".to_string();
        self.last_error = None;
        self.status = None;
    }

    /// Evaluates the current input. On success the input is replaced by the
    /// full-precision value; on failure it is left exactly as typed.
    pub fn calculate(&mut self) {
        let expr = self.input.trim();
        if expr.is_empty() {
            return;
        }

        match evaluate(expr) {
            Ok(value) => {
                debug!(expr, value, "calculated");
                self.result = format_result(value);
                self.input = value.to_string();
                self.last_error = None;
            }
            Err(err) => {
                warn!(expr, %err, "evaluation failed");
                self.result = "Error".to_string();
                self.last_error = Some(err);
            }
        }
        self.status = None;
    }

    pub fn trigger(&mut self, action: Action) {
        match action {
            Action::Insert(token) => self.press(token),
            Action::Clear => self.clear(),
            Action::Backspace => self.backspace(),
            Action::Calculate => self.calculate(),
        }
    }

    /// Runs the keypad button under the given terminal cell, if any.
    pub fn click(&mut self, column: u16, row: u16) {
        let hit = self.button_areas.iter().find(|(area, _)| {
            column >= area.x
                && column < area.x + area.width
                && row >= area.y
                && row < area.y + area.height
        });
        if let Some(&(_, action)) = hit {
            self.trigger(action);
        }
    }

    pub fn copy_result(&mut self) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().context("Failed to access clipboard")?;
        clipboard
            .set_text(self.result.clone())
            .context("Failed to copy to clipboard")?;
        Ok(())
    }
}
