use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use safecalc::calculate;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Log level for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Interactive shell to start when no expression is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Tui,
    Line,
}

impl Default for Mode {
    fn default() -> Self {
        if cfg!(feature = "tui") {
            Mode::Tui
        } else {
            Mode::Line
        }
    }
}

/// SafeCalc - evaluate arithmetic without executing anything
#[derive(Parser, Debug)]
#[command(name = "safecalc")]
#[command(about = "Evaluate arithmetic expressions: + - * / // % ** and parentheses")]
#[command(version)]
pub struct CliArgs {
    /// Expression to evaluate once; starts the interactive shell when omitted
    #[arg(allow_hyphen_values = true, trailing_var_arg = true)]
    pub expression: Vec<String>,

    /// Interactive shell
    #[arg(short, long, value_enum)]
    pub mode: Option<Mode>,

    /// Log level (default: warn; RUST_LOG takes precedence)
    #[arg(short, long, value_enum)]
    pub log_level: Option<LogLevel>,
}

/// Install the stderr subscriber. `RUST_LOG` wins over `level`.
pub fn init_logging(level: LogLevel) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {}", e))
}

/// Run the main application logic
pub fn run() -> Result<()> {
    let args = CliArgs::parse();

    if !args.expression.is_empty() {
        init_logging(args.log_level.unwrap_or(LogLevel::Warn))?;
        let input = args.expression.join(" ");
        let result =
            calculate(&input).with_context(|| format!("cannot evaluate '{}'", input.trim()))?;
        println!("{}", result);
        return Ok(());
    }

    let mode = args.mode.unwrap_or_default();
    info!(?mode, "starting interactive shell");
    match mode {
        Mode::Tui => start_tui(args.log_level),
        Mode::Line => {
            init_logging(args.log_level.unwrap_or(LogLevel::Warn))?;
            start_line()
        }
    }
}

#[cfg(feature = "tui")]
fn start_tui(log_level: Option<LogLevel>) -> Result<()> {
    // Log lines would be drawn over the alternate screen, so stay quiet
    // unless asked.
    if let Some(level) = log_level {
        init_logging(level)?;
    }
    crate::tui_mode::run_tui()
}

#[cfg(not(feature = "tui"))]
fn start_tui(_log_level: Option<LogLevel>) -> Result<()> {
    Err(anyhow!("safecalc was built without the `tui` feature; try --mode line"))
}

#[cfg(feature = "line")]
fn start_line() -> Result<()> {
    crate::line_mode::run_line()
}

#[cfg(not(feature = "line"))]
fn start_line() -> Result<()> {
    Err(anyhow!("safecalc was built without the `line` feature; try --mode tui"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_expression_words_are_collected() {
        let args = CliArgs::try_parse_from(["safecalc", "2", "+", "2"]);
        assert!(args.is_ok());
        if let Ok(args) = args {
            assert_eq!(args.expression.join(" "), "2 + 2");
            assert_eq!(args.mode, None);
        }
    }

    #[test]
    fn test_leading_minus_is_an_expression() {
        let args = CliArgs::try_parse_from(["safecalc", "-7 % 3"]);
        assert!(args.is_ok());
        if let Ok(args) = args {
            assert_eq!(args.expression, vec!["-7 % 3".to_string()]);
        }
    }

    #[test]
    fn test_mode_and_log_level() {
        let args = CliArgs::try_parse_from(["safecalc", "--mode", "line", "-l", "debug"]);
        assert!(args.is_ok());
        if let Ok(args) = args {
            assert!(args.expression.is_empty());
            assert_eq!(args.mode, Some(Mode::Line));
            assert_eq!(args.log_level, Some(LogLevel::Debug));
        }
    }
}
