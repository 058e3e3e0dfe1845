use std::fmt;

use thiserror::Error;

/// Non-arithmetic constructs the lexer recognises only so it can refuse them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    Identifier,
    FunctionCall,
    AttributeAccess,
    StringLiteral,
    BooleanLiteral,
    NoneLiteral,
    Collection,
    Comparison,
    BooleanOperator,
    BitwiseOperator,
    Assignment,
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Construct::Identifier => "identifier",
            Construct::FunctionCall => "function call",
            Construct::AttributeAccess => "attribute access",
            Construct::StringLiteral => "string literal",
            Construct::BooleanLiteral => "boolean literal",
            Construct::NoneLiteral => "None literal",
            Construct::Collection => "collection",
            Construct::Comparison => "comparison",
            Construct::BooleanOperator => "boolean operator",
            Construct::BitwiseOperator => "bitwise operator",
            Construct::Assignment => "assignment",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Empty expression")]
    EmptyInput,
    #[error("Syntax error at position {position}: {message}")]
    Syntax { message: String, position: usize },
    #[error("{construct} is not allowed (position {position})")]
    DisallowedConstruct { construct: Construct, position: usize },
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Result is not a number")]
    NotANumber,
    #[error("Result is too large")]
    Overflow,
}

/// Category of an [`EvalError`], without the details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyInput,
    Syntax,
    DisallowedConstruct,
    DivisionByZero,
    NotANumber,
    Overflow,
}

impl EvalError {
    pub(crate) fn syntax(message: impl Into<String>, position: usize) -> Self {
        EvalError::Syntax {
            message: message.into(),
            position,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::EmptyInput => ErrorKind::EmptyInput,
            EvalError::Syntax { .. } => ErrorKind::Syntax,
            EvalError::DisallowedConstruct { .. } => ErrorKind::DisallowedConstruct,
            EvalError::DivisionByZero => ErrorKind::DivisionByZero,
            EvalError::NotANumber => ErrorKind::NotANumber,
            EvalError::Overflow => ErrorKind::Overflow,
        }
    }
}
