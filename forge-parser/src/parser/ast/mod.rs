//! Syntax tree nodes produced by the [`Parser`](super::Parser).
//!
//! Every node records the span of the source text it was parsed from.

pub mod binary;
pub mod call;
pub mod expr;
pub mod literal;
pub mod paren;
pub mod unary;

pub use binary::{BinOp, BinOpKind, Binary};
pub use call::{Call, Func};
pub use expr::Expr;
pub use literal::{LitNum, LitSym, Literal};
pub use paren::Paren;
pub use unary::Unary;
