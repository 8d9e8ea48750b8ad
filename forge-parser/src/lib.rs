//! Lexer and recursive-descent parser for algebraic expressions such as `3*x^2 + sin(x) / 2`.
//!
//! Parsing produces an abstract syntax tree ([`parser::ast::Expr`]) that keeps the span of every
//! node, so errors in later stages can still point at the source text.
//!
//! ```
//! use forge_parser::parser::{ast::Expr, Parser};
//!
//! let mut parser = Parser::new("x^2 + 3*x").unwrap();
//! let expr = parser.try_parse_full::<Expr>().unwrap();
//! assert_eq!(expr.to_string(), "x ^ 2 + 3 * x");
//! ```

pub mod parser;
pub mod tokenizer;
