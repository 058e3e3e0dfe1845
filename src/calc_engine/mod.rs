//! Restricted arithmetic evaluator.
//!
//! Text is tokenized, parsed into an [`Expr`] that can only hold numeric
//! literals and the arithmetic operators, and then reduced to a number.
//! Every call is independent: nothing is cached or shared between calls.

mod ast;
mod errors;
mod eval;
mod format;
mod lexer;
mod parser;

pub use ast::{BinaryOp, Expr, UnaryOp};
pub use errors::{Construct, ErrorKind, EvalError};
pub use format::{format_general, format_result, normalize_zero, SIGNIFICANT_DIGITS};
pub use parser::{MAX_HEIGHT, MAX_NESTING};

use tracing::debug;

/// Parses `input` into an expression tree without evaluating it.
///
/// # Errors
///
/// `EmptyInput` for blank text, `DisallowedConstruct` for anything that is
/// not arithmetic (names, calls, strings, comparisons...), `Syntax` otherwise.
pub fn parse(input: &str) -> Result<Expr, EvalError> {
    if input.trim().is_empty() {
        return Err(EvalError::EmptyInput);
    }
    let tokens = lexer::tokenize(input);
    parser::Parser::new(tokens, input.chars().count()).parse()
}

/// Evaluates an arithmetic expression. A zero result is always `+0.0`.
///
/// # Examples
///
/// ```
/// use safecalc::{evaluate, ErrorKind};
///
/// assert_eq!(evaluate("2**3**2"), Ok(512.0));
/// assert_eq!(evaluate("-7 % 3"), Ok(2.0));
/// assert_eq!(evaluate("10/0").unwrap_err().kind(), ErrorKind::DivisionByZero);
/// ```
pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    debug!(input, "parsing");
    let tree = parse(input).inspect_err(|err| debug!(%err, "parse failed"))?;

    debug!(%tree, "evaluating");
    let value = tree
        .evaluate()
        .map(normalize_zero)
        .inspect_err(|err| debug!(%err, "evaluation failed"))?;

    debug!(value, "done");
    Ok(value)
}

/// [`evaluate`] followed by [`format_result`].
pub fn calculate(input: &str) -> Result<String, EvalError> {
    evaluate(input).map(format_result)
}

#[cfg(test)]
mod tests;
