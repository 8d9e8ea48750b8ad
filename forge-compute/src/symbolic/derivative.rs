//! Symbolic differentiation.
//!
//! The derivative is built by structural recursion and is **not** simplified; pass the result
//! through [`simplify`](crate::symbolic::simplify()) to get a readable expression.

use crate::approx::{is_one, is_zero};
use super::expr::{Expr, Func};

/// `(f+g+h)' = f'+g'+h'`
fn sum_rule(terms: &[Expr], var: &str) -> Expr {
    Expr::Add(terms.iter().map(|term| differentiate(term, var)).collect())
}

/// Produces a derivative according to the generalized product rule:
/// `(fgh)' = f'gh + fg'h + fgh'`
fn product_rule(factors: &[Expr], var: &str) -> Expr {
    let terms = (0..factors.len())
        .map(|derivative_index| {
            let product = factors.iter()
                .enumerate()
                .map(|(index, factor)| if index == derivative_index {
                    differentiate(factor, var)
                } else {
                    factor.clone()
                })
                .collect();
            Expr::Mul(product)
        })
        .collect();
    Expr::Add(terms)
}

/// Derivative of `base^exp` for a numeric exponent.
fn power_rule(base: &Expr, exp: f64, var: &str) -> Expr {
    if base.is_symbol(var) {
        if is_one(exp) {
            return Expr::Number(1.0);
        }
        return Expr::Mul(vec![
            Expr::Number(exp),
            Expr::pow(base.clone(), Expr::Number(exp - 1.0)),
        ]);
    }

    let inner = differentiate(base, var);
    if is_zero(exp - 1.0) {
        Expr::Mul(vec![Expr::Number(exp), inner])
    } else {
        Expr::Mul(vec![
            Expr::Number(exp),
            Expr::pow(base.clone(), Expr::Number(exp - 1.0)),
            inner,
        ])
    }
}

/// `(f^g)' = f^g * (g' ln(f) + g f' / f)`
fn exponential_rule(base: &Expr, exp: &Expr, var: &str) -> Expr {
    Expr::Mul(vec![
        Expr::pow(base.clone(), exp.clone()),
        Expr::Add(vec![
            Expr::Mul(vec![differentiate(exp, var), Expr::call(Func::Ln, base.clone())]),
            Expr::Mul(vec![
                exp.clone(),
                differentiate(base, var),
                Expr::pow(base.clone(), Expr::Number(-1.0)),
            ]),
        ]),
    ])
}

/// Derivative of a function call, applying the chain rule.
fn call_rule(func: Func, arg: &Expr, var: &str) -> Expr {
    let inner = differentiate(arg, var);
    let outer = match func {
        Func::Sin => Expr::call(Func::Cos, arg.clone()),
        Func::Cos => Expr::Mul(vec![Expr::Number(-1.0), Expr::call(Func::Sin, arg.clone())]),
        Func::Tan => Expr::Add(vec![
            Expr::Number(1.0),
            Expr::pow(Expr::call(Func::Tan, arg.clone()), Expr::Number(2.0)),
        ]),
        Func::Exp => Expr::call(Func::Exp, arg.clone()),
        Func::Ln => Expr::pow(arg.clone(), Expr::Number(-1.0)),
        Func::Sqrt => Expr::pow(
            Expr::Mul(vec![Expr::Number(2.0), Expr::call(Func::Sqrt, arg.clone())]),
            Expr::Number(-1.0),
        ),
    };

    match func {
        // written as `arg' / ...` rather than `1 / ... * arg'`
        Func::Ln | Func::Sqrt => Expr::Mul(vec![inner, outer]),
        _ => Expr::Mul(vec![outer, inner]),
    }
}

/// Returns the derivative of the expression with respect to the variable with the given name.
pub fn differentiate(expr: &Expr, var: &str) -> Expr {
    match expr {
        Expr::Number(_) => Expr::Number(0.0),
        Expr::Symbol(name) => Expr::Number(if name == var { 1.0 } else { 0.0 }),
        Expr::Add(terms) => sum_rule(terms, var),
        Expr::Mul(factors) => product_rule(factors, var),
        Expr::Exp(base, exp) => match exp.as_number() {
            Some(exp) => power_rule(base, exp, var),
            None => exponential_rule(base, exp, var),
        },
        Expr::Call(func, arg) => call_rule(*func, arg, var),
    }
}

#[cfg(test)]
mod tests {
    use crate::{parse, simplify};
    use pretty_assertions::assert_eq;
    use super::*;

    fn derivative_of(input: &str) -> Expr {
        simplify(&differentiate(&parse(input).unwrap(), "x"))
    }

    fn x() -> Expr {
        Expr::symbol("x")
    }

    #[test]
    fn constants_and_symbols() {
        assert_eq!(derivative_of("5"), Expr::Number(0.0));
        assert_eq!(derivative_of("y"), Expr::Number(0.0));
        assert_eq!(derivative_of("x"), Expr::Number(1.0));
    }

    #[test]
    fn polynomial() {
        assert_eq!(derivative_of("x^2 + 3*x + 1"), simplify(&parse("2*x + 3").unwrap()));
        assert_eq!(derivative_of("x^3"), Expr::Mul(vec![
            Expr::Number(3.0),
            Expr::pow(x(), Expr::Number(2.0)),
        ]));
    }

    #[test]
    fn not_simplified() {
        let raw = differentiate(&parse("x^2").unwrap(), "x");
        assert_eq!(raw, Expr::Mul(vec![
            Expr::Number(2.0),
            Expr::pow(x(), Expr::Number(1.0)),
        ]));
    }

    #[test]
    fn product() {
        assert_eq!(derivative_of("x * sin(x)"), Expr::Add(vec![
            Expr::call(Func::Sin, x()),
            Expr::Mul(vec![x(), Expr::call(Func::Cos, x())]),
        ]));
    }

    #[test]
    fn chain_rule() {
        assert_eq!(derivative_of("sin(2*x)"), Expr::Mul(vec![
            Expr::Number(2.0),
            Expr::call(Func::Cos, Expr::Mul(vec![Expr::Number(2.0), x()])),
        ]));
        assert_eq!(derivative_of("(x^2 + 1)^3"), Expr::Mul(vec![
            Expr::Number(6.0),
            Expr::pow(
                Expr::Add(vec![Expr::pow(x(), Expr::Number(2.0)), Expr::Number(1.0)]),
                Expr::Number(2.0),
            ),
            x(),
        ]));
    }

    #[test]
    fn functions() {
        assert_eq!(derivative_of("cos(x)"), Expr::Mul(vec![
            Expr::Number(-1.0),
            Expr::call(Func::Sin, x()),
        ]));
        assert_eq!(derivative_of("exp(x)"), Expr::call(Func::Exp, x()));
        assert_eq!(derivative_of("log(x)"), Expr::pow(x(), Expr::Number(-1.0)));
        assert_eq!(derivative_of("tan(x)"), Expr::Add(vec![
            Expr::Number(1.0),
            Expr::pow(Expr::call(Func::Tan, x()), Expr::Number(2.0)),
        ]));
        assert_eq!(derivative_of("sqrt(x)"), Expr::pow(
            Expr::Mul(vec![Expr::Number(2.0), Expr::call(Func::Sqrt, x())]),
            Expr::Number(-1.0),
        ));
    }

    #[test]
    fn general_exponent() {
        // d/dx 2^x = 2^x * ln(2)
        assert_eq!(derivative_of("2^x"), Expr::Mul(vec![
            Expr::pow(Expr::Number(2.0), x()),
            Expr::call(Func::Ln, Expr::Number(2.0)),
        ]));
    }
}
