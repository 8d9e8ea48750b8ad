//! Simplification of expressions into a canonical form.
//!
//! Simplification is bottom-up: the children of a node are simplified first, then the rules in
//! [`rules`] are applied to the node until none of them match. In the resulting normal form:
//!
//! - sums are flat, have at most one numeric term (placed last, never zero), and contain no two
//!   terms that differ only by their numeric coefficient;
//! - products are flat, have at most one numeric factor (placed first, never zero or one), and
//!   contain no two factors with the same base;
//! - powers never have an exponent of 0 or 1, a base of 1, or a base that is itself a power;
//! - sums and products with a single operand are replaced by that operand.
//!
//! Function identities such as `sin(x)^2 + cos(x)^2 = 1` are not applied here; see
//! [`rewrite`](crate::symbolic::rewrite).
//!
//! ```
//! use forge_compute::{parse, simplify, symbolic::Expr};
//!
//! let expr = parse("x + 2*x + x").unwrap();
//! assert_eq!(simplify(&expr), Expr::Mul(vec![Expr::Number(4.0), Expr::symbol("x")]));
//! ```

pub mod rules;
pub mod step;

use step::Step;
use super::{expr::Expr, step_collector::StepCollector};
use tracing::trace;

/// Simplifies the given expression.
pub fn simplify(expr: &Expr) -> Expr {
    simplify_with(expr, &mut ())
}

/// Simplifies the given expression, returning the list of rules that were applied, in order.
pub fn simplify_with_steps(expr: &Expr) -> (Expr, Vec<Step>) {
    let mut steps = Vec::new();
    let simplified = simplify_with(expr, &mut steps);
    (simplified, steps)
}

/// Simplifies the given expression, reporting every applied rule to the step collector.
pub fn simplify_with(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    let mut current = match expr {
        Expr::Number(_) | Expr::Symbol(_) => return expr.clone(),
        Expr::Add(terms) => Expr::Add(
            terms.iter().map(|term| simplify_with(term, step_collector)).collect(),
        ),
        Expr::Mul(factors) => Expr::Mul(
            factors.iter().map(|factor| simplify_with(factor, step_collector)).collect(),
        ),
        Expr::Exp(base, exp) => Expr::pow(
            simplify_with(base, step_collector),
            simplify_with(exp, step_collector),
        ),
        Expr::Call(func, arg) => Expr::call(*func, simplify_with(arg, step_collector)),
    };

    while let Some(next) = rules::all(&current, step_collector) {
        trace!(from = %current, to = %next, "applied simplification rule");
        current = next;
    }

    current
}

#[cfg(test)]
mod tests {
    use crate::{parse, symbolic::expr::Func};
    use pretty_assertions::assert_eq;
    use super::*;

    fn simplified(input: &str) -> Expr {
        simplify(&parse(input).unwrap())
    }

    fn x() -> Expr {
        Expr::symbol("x")
    }

    #[test]
    fn merge_like_terms() {
        assert_eq!(simplified("x + 2*x + x"), simplified("4*x"));
        assert_eq!(simplified("x + 2*x + x"), Expr::Mul(vec![Expr::Number(4.0), x()]));
    }

    #[test]
    fn fold_constants() {
        assert_eq!(simplified("1 + 2 * 3 - 4"), Expr::Number(3.0));
        assert_eq!(simplified("2 + x + 3"), Expr::Add(vec![x(), Expr::Number(5.0)]));
    }

    #[test]
    fn cancel_terms() {
        assert_eq!(simplified("x - x"), Expr::Number(0.0));
        assert_eq!(simplified("3*y - 3*y + 2"), Expr::Number(2.0));
    }

    #[test]
    fn multiply_zero_and_one() {
        assert_eq!(simplified("0 * sin(x)"), Expr::Number(0.0));
        assert_eq!(simplified("1 * x * 1"), x());
    }

    #[test]
    fn power_laws() {
        assert_eq!(simplified("x^0"), Expr::Number(1.0));
        assert_eq!(simplified("x^1"), x());
        assert_eq!(simplified("0^3"), Expr::Number(0.0));
        assert_eq!(simplified("1^y"), Expr::Number(1.0));
        assert_eq!(simplified("(x^2)^3"), Expr::pow(x(), Expr::Number(6.0)));
        assert_eq!(simplified("2^10"), Expr::Number(1024.0));
    }

    #[test]
    fn combine_factors() {
        assert_eq!(simplified("x * x"), Expr::pow(x(), Expr::Number(2.0)));
        assert_eq!(simplified("x / x"), Expr::Number(1.0));
        assert_eq!(simplified("2 * x * 3 * x^2"), Expr::Mul(vec![
            Expr::Number(6.0),
            Expr::pow(x(), Expr::Number(3.0)),
        ]));
    }

    #[test]
    fn nested_sums_flatten() {
        assert_eq!(simplified("(a + b) + (c + a)"), Expr::Add(vec![
            Expr::Mul(vec![Expr::Number(2.0), Expr::symbol("a")]),
            Expr::symbol("b"),
            Expr::symbol("c"),
        ]));
    }

    #[test]
    fn function_arguments() {
        assert_eq!(
            simplified("sin(x + x)"),
            Expr::call(Func::Sin, Expr::Mul(vec![Expr::Number(2.0), x()])),
        );
        // identities are left to the rewrite engine
        let pythagorean = simplified("sin(x)^2 + cos(x)^2");
        assert!(matches!(pythagorean, Expr::Add(ref terms) if terms.len() == 2));
    }

    #[test]
    fn idempotent() {
        for input in [
            "x^2 + 3*x + 1 - x",
            "2*(x + 1)*(x + 1)^2 / y",
            "sin(x)^2 * cos(x) * sin(x)^-2",
            "(x^2)^0.5 + 0*y - 4/2",
            "exp(2*x) * exp(2*x) + log(x)",
        ] {
            let once = simplified(input);
            assert_eq!(simplify(&once), once, "{}", input);
        }
    }

    #[test]
    fn records_steps() {
        let (expr, steps) = simplify_with_steps(&parse("x + x + 0").unwrap());
        assert_eq!(expr, Expr::Mul(vec![Expr::Number(2.0), x()]));
        assert_eq!(steps, vec![Step::CombineLikeTerms, Step::FoldTerms]);
    }
}
