//! Pattern-based symbolic integration.
//!
//! Only a small set of shapes is recognized: expressions free of the variable, powers of the
//! variable, sums of integrable terms, constant multiples of integrable expressions, and `sin`,
//! `cos` and `exp` applied directly to the variable. Any other expression is returned simplified
//! but **not** integrated, and there is no way to tell the two outcomes apart from the result.

use crate::approx::is_zero;
use super::{expr::{Expr, Func}, simplify::simplify};

/// Returns an antiderivative of the expression with respect to the variable with the given name.
/// No constant of integration is added.
///
/// ```
/// use forge_compute::{integrate, parse, simplify};
///
/// let expr = parse("2 * x").unwrap();
/// assert_eq!(integrate(&expr, "x"), simplify(&parse("x^2").unwrap()));
/// ```
pub fn integrate(expr: &Expr, var: &str) -> Expr {
    simplify(&antiderivative(&simplify(expr), var))
}

/// Integrates an already simplified expression.
fn antiderivative(expr: &Expr, var: &str) -> Expr {
    let x = || Expr::symbol(var);

    if !expr.contains_symbol(var) {
        return Expr::Mul(vec![expr.clone(), x()]);
    }

    match expr {
        Expr::Symbol(_) => Expr::Mul(vec![Expr::Number(0.5), Expr::pow(x(), Expr::Number(2.0))]),
        Expr::Add(terms) => Expr::Add(terms.iter().map(|term| antiderivative(term, var)).collect()),
        Expr::Mul(factors) if factors.iter().any(Expr::is_number) => {
            let scalar = factors.iter().filter_map(Expr::as_number).product::<f64>();
            let rest = factors.iter()
                .filter(|factor| !factor.is_number())
                .cloned()
                .collect::<Vec<_>>();
            Expr::Mul(vec![
                Expr::Number(scalar),
                antiderivative(&Expr::Mul(rest).downgrade(), var),
            ])
        },
        Expr::Exp(base, exp) if base.is_symbol(var) => match exp.as_number() {
            Some(n) if is_zero(n + 1.0) => Expr::call(Func::Ln, x()),
            Some(n) => Expr::Mul(vec![
                Expr::pow(x(), Expr::Number(n + 1.0)),
                Expr::pow(Expr::Number(n + 1.0), Expr::Number(-1.0)),
            ]),
            None => expr.clone(),
        },
        Expr::Call(func, arg) if arg.is_symbol(var) => match func {
            Func::Sin => Expr::Mul(vec![Expr::Number(-1.0), Expr::call(Func::Cos, x())]),
            Func::Cos => Expr::call(Func::Sin, x()),
            Func::Exp => Expr::call(Func::Exp, x()),
            _ => expr.clone(),
        },
        // unsupported shape
        _ => expr.clone(),
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn integral_of(input: &str) -> Expr {
        integrate(&parse(input).unwrap(), "x")
    }

    fn x() -> Expr {
        Expr::symbol("x")
    }

    #[test]
    fn constants() {
        assert_eq!(integral_of("5"), Expr::Mul(vec![Expr::Number(5.0), x()]));
        assert_eq!(integral_of("y"), Expr::Mul(vec![Expr::symbol("y"), x()]));
        assert_eq!(integral_of("sin(y)"), Expr::Mul(vec![Expr::call(Func::Sin, Expr::symbol("y")), x()]));
    }

    #[test]
    fn powers() {
        assert_eq!(integral_of("x"), Expr::Mul(vec![
            Expr::Number(0.5),
            Expr::pow(x(), Expr::Number(2.0)),
        ]));
        assert_eq!(integral_of("x^3"), Expr::Mul(vec![
            Expr::Number(0.25),
            Expr::pow(x(), Expr::Number(4.0)),
        ]));
        assert_eq!(integral_of("1 / x"), Expr::call(Func::Ln, x()));
    }

    #[test]
    fn sums_and_scalars() {
        assert_eq!(integral_of("2*x + 3"), Expr::Add(vec![
            Expr::pow(x(), Expr::Number(2.0)),
            Expr::Mul(vec![Expr::Number(3.0), x()]),
        ]));
        assert_eq!(integral_of("3 * cos(x)"), Expr::Mul(vec![
            Expr::Number(3.0),
            Expr::call(Func::Sin, x()),
        ]));
    }

    #[test]
    fn functions() {
        assert_eq!(integral_of("sin(x)"), Expr::Mul(vec![
            Expr::Number(-1.0),
            Expr::call(Func::Cos, x()),
        ]));
        assert_eq!(integral_of("exp(x)"), Expr::call(Func::Exp, x()));
    }

    #[test]
    fn unsupported_shapes_are_returned_simplified() {
        assert_eq!(integral_of("x * sin(x)"), Expr::Mul(vec![x(), Expr::call(Func::Sin, x())]));
        assert_eq!(
            integral_of("sin(x + x)"),
            Expr::call(Func::Sin, Expr::Mul(vec![Expr::Number(2.0), x()])),
        );
    }
}
