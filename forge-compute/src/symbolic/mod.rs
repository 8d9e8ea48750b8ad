//! Algebraic manipulation of expressions.
//!
//! # Expression representation
//!
//! Algebraic expressions in this module are represented as a tree of [`Expr`] nodes. It's similar
//! to the [`forge_parser::parser::ast::Expr`] nodes produced by [`forge_parser`], with the main
//! differences being that [`Expr`] has no span information, and that subtraction and division are
//! lowered to addition and multiplication.
//!
//! Conversion from the AST does **not** flatten the tree: `x + (y + z)` becomes an [`Expr::Add`]
//! with two children, `x` and `y + z`. Flattening is one of the jobs of the simplifier.
//!
//! ```
//! use forge_compute::symbolic::Expr;
//! use forge_parser::parser::{ast::Expr as AstExpr, Parser};
//!
//! let mut parser = Parser::new("x + (y + z)").unwrap();
//! let ast_expr = parser.try_parse_full::<AstExpr>().unwrap();
//!
//! let expr = Expr::from(ast_expr);
//! assert_eq!(expr, Expr::Add(vec![
//!     Expr::symbol("x"),
//!     Expr::Add(vec![Expr::symbol("y"), Expr::symbol("z")]),
//! ]));
//! ```
//!
//! # Operations
//!
//! - [`simplify()`] reduces an expression to a canonical form, optionally recording the steps
//!   taken.
//! - [`differentiate`] and [`integrate`] implement symbolic calculus.
//! - [`solve`] finds the roots of linear and quadratic equations.
//! - [`rewrite()`] applies a [`RuleTable`] of pattern-based rules.
//! - [`render`] produces LaTeX.
//!
//! All operations take their input by reference and return a new tree.

pub mod derivative;
pub mod expr;
pub mod integral;
pub mod latex;
pub mod rewrite;
pub mod simplify;
pub mod solve;
pub mod step_collector;

pub use derivative::differentiate;
pub use expr::{Expr, Func};
pub use integral::integrate;
pub use latex::{render, Latex};
pub use rewrite::{rewrite, Rule, RuleTable};
pub use simplify::{simplify, simplify_with_steps, step::Step};
pub use solve::solve;
