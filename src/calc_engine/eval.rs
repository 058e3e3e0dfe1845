use tracing::trace;

use super::ast::{BinaryOp, Expr, UnaryOp};
use super::errors::EvalError;

impl Expr {
    /// Reduces the tree post-order: both children first, then the operator.
    ///
    /// # Errors
    ///
    /// - `DivisionByZero` for `/`, `//` or `%` by zero, and for `0 ** negative`
    /// - `NotANumber` when an operation has no real result, e.g. `(-8) ** (1/3)`
    /// - `Overflow` when a literal or an intermediate result is infinite
    pub fn evaluate(&self) -> Result<f64, EvalError> {
        match self {
            Expr::Number(value) => checked(*value),
            Expr::Unary { op, operand } => {
                let value = operand.evaluate()?;
                Ok(op.apply(value))
            }
            Expr::Binary { op, left, right } => {
                let a = left.evaluate()?;
                let b = right.evaluate()?;
                let result = op.apply(a, b);
                trace!("{} {} {} = {:?}", a, op.symbol(), b, result);
                result
            }
        }
    }
}

impl UnaryOp {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            UnaryOp::Negate => -value,
            UnaryOp::Identity => value,
        }
    }
}

impl BinaryOp {
    pub fn apply(self, a: f64, b: f64) -> Result<f64, EvalError> {
        let value = match self {
            BinaryOp::Add => a + b,
            BinaryOp::Subtract => a - b,
            BinaryOp::Multiply => a * b,
            BinaryOp::Divide => {
                if b == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                a / b
            }
            BinaryOp::FloorDivide => {
                if b == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                floor_div(a, b)
            }
            BinaryOp::Modulo => {
                if b == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                floor_mod(a, b)
            }
            BinaryOp::Power => {
                if a == 0.0 && b < 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                a.powf(b)
            }
        };
        checked(value)
    }
}

fn checked(value: f64) -> Result<f64, EvalError> {
    if value.is_nan() {
        Err(EvalError::NotANumber)
    } else if value.is_infinite() {
        Err(EvalError::Overflow)
    } else {
        Ok(value)
    }
}

/// Remainder whose sign follows the divisor: `-7 % 3 == 2`, `7 % -3 == -2`.
fn floor_mod(a: f64, b: f64) -> f64 {
    let rem = a % b;
    if rem != 0.0 && (rem < 0.0) != (b < 0.0) {
        rem + b
    } else {
        rem
    }
}

/// `floor(a / b)`, computed from the truncated remainder so that results
/// such as `7.5 // 2.5` are not thrown off by rounding in the division.
fn floor_div(a: f64, b: f64) -> f64 {
    let rem = a % b;
    let mut div = (a - rem) / b;
    if rem != 0.0 && (b < 0.0) != (rem < 0.0) {
        div -= 1.0;
    }
    if div == 0.0 {
        return 0.0_f64.copysign(a / b);
    }
    let floor = div.floor();
    if div - floor > 0.5 {
        floor + 1.0
    } else {
        floor
    }
}
