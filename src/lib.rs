//! SafeCalc - an arithmetic calculator that never executes its input
//!
//! The evaluator accepts numbers, `+ - * / // % **` and parentheses, and
//! nothing else. Input is parsed into a tree that cannot represent any other
//! construct, so names, calls and the like are rejected before evaluation.

pub mod calc_engine;

pub use calc_engine::{
    calculate, evaluate, format_result, parse, BinaryOp, Construct, ErrorKind, EvalError, Expr,
    UnaryOp,
};
