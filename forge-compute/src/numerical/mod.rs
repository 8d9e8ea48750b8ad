//! Numerical evaluation of expressions.
//!
//! Any [`Expr`](crate::symbolic::Expr) can be evaluated to a floating-point number with
//! [`Expr::eval`](crate::symbolic::Expr::eval), given a value for every symbol it contains.
//! Evaluation never silently produces `NaN`: operations outside of their real domain fail with a
//! [`DomainError`](error::DomainError).

pub mod error;
mod eval;
