use tracing::trace;

use super::ast::{BinaryOp, Expr, UnaryOp};
use super::errors::EvalError;
use super::lexer::{Spanned, Token};

/// Recursion limit for parentheses, unary signs and power exponents.
pub const MAX_NESTING: usize = 200;
/// Tree height limit; bounds the evaluator's recursion as well.
pub const MAX_HEIGHT: usize = 1000;

struct Subtree {
    expr: Expr,
    height: usize,
}

impl Subtree {
    fn leaf(value: f64) -> Self {
        Subtree {
            expr: Expr::Number(value),
            height: 1,
        }
    }
}

/// Recursive-descent parser over the arithmetic grammar:
///
/// ```text
/// expr    := term (('+' | '-') term)*
/// term    := unary (('*' | '/' | '//' | '%') unary)*
/// unary   := ('+' | '-') unary | power
/// power   := primary ('**' unary)?
/// primary := NUMBER | '(' expr ')'
/// ```
pub struct Parser {
    tokens: Vec<Spanned>,
    current: usize,
    nesting: usize,
    input_len: usize,
}

impl Parser {
    /// `input_len` is the length of the source in characters, used to
    /// position "unexpected end" errors.
    pub fn new(tokens: Vec<Spanned>, input_len: usize) -> Self {
        Parser {
            tokens,
            current: 0,
            nesting: 0,
            input_len,
        }
    }

    pub fn parse(&mut self) -> Result<Expr, EvalError> {
        let tree = self.expr()?;
        if let Some(spanned) = self.tokens.get(self.current) {
            return Err(unexpected(spanned));
        }
        trace!(height = tree.height, "parsed expression tree");
        Ok(tree.expr)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current).map(|s| &s.token)
    }

    fn position(&self) -> usize {
        self.tokens
            .get(self.current)
            .map_or(self.input_len, |s| s.position)
    }

    fn expr(&mut self) -> Result<Subtree, EvalError> {
        let mut left = self.term()?;

        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Subtract,
                _ => break,
            };
            self.current += 1;
            let right = self.term()?;
            left = self.join(op, left, right)?;
        }
        Ok(left)
    }

    fn term(&mut self) -> Result<Subtree, EvalError> {
        let mut left = self.unary()?;

        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Multiply,
                Some(Token::Slash) => BinaryOp::Divide,
                Some(Token::DoubleSlash) => BinaryOp::FloorDivide,
                Some(Token::Percent) => BinaryOp::Modulo,
                _ => break,
            };
            self.current += 1;
            let right = self.unary()?;
            left = self.join(op, left, right)?;
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Subtree, EvalError> {
        let op = match self.peek() {
            Some(Token::Plus) => UnaryOp::Identity,
            Some(Token::Minus) => UnaryOp::Negate,
            _ => return self.power(),
        };
        self.current += 1;

        let operand = self.nested(Self::unary)?;
        let height = self.checked_height(operand.height + 1)?;
        Ok(Subtree {
            expr: Expr::unary(op, operand.expr),
            height,
        })
    }

    fn power(&mut self) -> Result<Subtree, EvalError> {
        let base = self.primary()?;

        if self.peek() == Some(&Token::DoubleStar) {
            self.current += 1;
            // Right-associative: the exponent is itself a signed power.
            let exponent = self.nested(Self::unary)?;
            return self.join(BinaryOp::Power, base, exponent);
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Subtree, EvalError> {
        let Some(spanned) = self.tokens.get(self.current) else {
            return Err(EvalError::syntax(
                "unexpected end of expression",
                self.input_len,
            ));
        };

        match spanned.token {
            Token::Number(value) => {
                self.current += 1;
                Ok(Subtree::leaf(value))
            }
            Token::LParen => {
                let open = spanned.position;
                self.current += 1;
                let inner = self.nested(Self::expr)?;
                match self.peek() {
                    Some(Token::RParen) => {
                        self.current += 1;
                        Ok(inner)
                    }
                    None => Err(EvalError::syntax(
                        format!("'(' at position {} was never closed", open),
                        self.input_len,
                    )),
                    Some(_) => Err(unexpected(&self.tokens[self.current])),
                }
            }
            _ => Err(unexpected(spanned)),
        }
    }

    fn nested(
        &mut self,
        rule: fn(&mut Self) -> Result<Subtree, EvalError>,
    ) -> Result<Subtree, EvalError> {
        if self.nesting >= MAX_NESTING {
            return Err(EvalError::syntax(
                "expression is too deeply nested",
                self.position(),
            ));
        }
        self.nesting += 1;
        let result = rule(self);
        self.nesting -= 1;
        result
    }

    fn join(&self, op: BinaryOp, left: Subtree, right: Subtree) -> Result<Subtree, EvalError> {
        let height = self.checked_height(left.height.max(right.height) + 1)?;
        Ok(Subtree {
            expr: Expr::binary(op, left.expr, right.expr),
            height,
        })
    }

    fn checked_height(&self, height: usize) -> Result<usize, EvalError> {
        if height > MAX_HEIGHT {
            return Err(EvalError::syntax(
                "expression is too deeply nested",
                self.position(),
            ));
        }
        Ok(height)
    }
}

/// Error for a token the grammar cannot accept at this point.
fn unexpected(spanned: &Spanned) -> EvalError {
    let position = spanned.position;
    match &spanned.token {
        Token::Foreign(construct) => EvalError::DisallowedConstruct {
            construct: *construct,
            position,
        },
        Token::Invalid(message) => EvalError::syntax(message.clone(), position),
        Token::RParen => EvalError::syntax("unmatched ')'", position),
        token => EvalError::syntax(format!("unexpected {}", token), position),
    }
}
