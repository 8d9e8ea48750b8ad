//! Symbolic computation on algebraic expressions: simplification, differentiation, integration,
//! equation solving, rule-based rewriting, LaTeX rendering, and numerical evaluation.
//!
//! ```
//! use forge_compute::{differentiate, parse, render, simplify};
//!
//! let expr = parse("x^2 + 3*x + 1").unwrap();
//! let derivative = simplify(&differentiate(&expr, "x"));
//! assert_eq!(render(&derivative), "2 \\cdot x + 3");
//! ```

pub mod approx;
pub mod numerical;
pub mod symbolic;

use forge_parser::parser::{ast::Expr as AstExpr, Parser};

pub use forge_error::Error;
pub use symbolic::{
    differentiate,
    integrate,
    render,
    rewrite,
    simplify,
    simplify_with_steps,
    solve,
    Expr,
    Func,
    Rule,
    RuleTable,
    Step,
};

/// Parses the source text into an [`Expr`].
///
/// Fails if the text contains a character that cannot start a token, is not a syntactically valid
/// expression, or calls a function that does not exist.
pub fn parse(source: &str) -> Result<Expr, Error> {
    let expr = Parser::new(source)?.try_parse_full::<AstExpr>()?;
    Ok(Expr::from(expr))
}
