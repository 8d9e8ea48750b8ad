//! Solving equations of the form `expr = 0` for a single variable.
//!
//! The equation is simplified first, then a sequence of strategies is tried in order: linear,
//! quadratic, and a polynomial fallback. Each strategy returns [`None`] to decline, in which case
//! the next strategy is tried. The first strategy that does not decline determines the result.
//!
//! Coefficients are only extracted from terms that are the variable, a numeric power of the
//! variable, or a product of such a power with numbers. Any other term containing the variable
//! makes a strategy decline.

use crate::approx::{approx_eq, is_zero};
use super::{expr::Expr, simplify::simplify};
use tracing::debug;

/// Returns the solutions of the equation `expr = 0` for the variable with the given name.
///
/// An empty list means that no solution was found, either because none exist in the reals, or
/// because the equation has a shape that no strategy understands. If every value of the variable
/// is a solution, the list contains the variable itself.
///
/// ```
/// use forge_compute::{parse, solve, symbolic::Expr};
///
/// let solutions = solve(&parse("2*x - 6").unwrap(), "x");
/// assert_eq!(solutions, vec![Expr::Number(3.0)]);
/// ```
pub fn solve(expr: &Expr, var: &str) -> Vec<Expr> {
    let equation = simplify(expr);

    let strategies: [(&str, fn(&Expr, &str) -> Option<Vec<Expr>>); 3] = [
        ("linear", solve_linear),
        ("quadratic", solve_quadratic),
        ("polynomial", solve_polynomial),
    ];
    for (name, strategy) in strategies {
        debug!(strategy = name, %equation, var, "trying solver strategy");
        if let Some(solutions) = strategy(&equation, var) {
            debug!(strategy = name, count = solutions.len(), "solver strategy succeeded");
            return solutions;
        }
    }

    Vec::new()
}

/// Returns the terms of the equation, treating a non-sum as a sum of one term.
fn terms(equation: &Expr) -> &[Expr] {
    match equation {
        Expr::Add(terms) => terms,
        term => std::slice::from_ref(term),
    }
}

/// If the term is `c * var^power` for a numeric `c`, returns `c`.
///
/// Powers of `1` may be written as the bare variable.
fn power_coefficient(term: &Expr, var: &str, power: f64) -> Option<f64> {
    let is_power = |factor: &Expr| match factor {
        Expr::Symbol(name) => name == var && approx_eq(power, 1.0),
        Expr::Exp(base, exp) => base.is_symbol(var) && exp.is_number_near(power),
        _ => false,
    };

    match term {
        Expr::Mul(factors) => {
            let mut coefficient = 1.0;
            let mut found = false;
            for factor in factors {
                if let Some(n) = factor.as_number() {
                    coefficient *= n;
                } else if is_power(factor) && !found {
                    found = true;
                } else {
                    return None;
                }
            }
            found.then_some(coefficient)
        },
        term => is_power(term).then_some(1.0),
    }
}

/// Solves `a*x + b = 0`. The constant `b` may be symbolic.
fn solve_linear(equation: &Expr, var: &str) -> Option<Vec<Expr>> {
    let mut a = 0.0;
    let mut constants = Vec::new();
    for term in terms(equation) {
        if !term.contains_symbol(var) {
            constants.push(term.clone());
        } else {
            a += power_coefficient(term, var, 1.0)?;
        }
    }
    let b = simplify(&Expr::Add(constants).downgrade());

    if is_zero(a) {
        return Some(if b.is_number_near(0.0) {
            vec![Expr::symbol(var)]
        } else {
            Vec::new()
        });
    }

    Some(vec![simplify(&Expr::Mul(vec![Expr::Number(-1.0 / a), b]))])
}

/// Solves `a*x^2 + b*x + c = 0` with numeric coefficients, using the quadratic formula.
fn solve_quadratic(equation: &Expr, var: &str) -> Option<Vec<Expr>> {
    let (mut a, mut b, mut c) = (0.0, 0.0, 0.0);
    for term in terms(equation) {
        if let Some(n) = term.as_number() {
            c += n;
        } else if let Some(coefficient) = power_coefficient(term, var, 2.0) {
            a += coefficient;
        } else {
            b += power_coefficient(term, var, 1.0)?;
        }
    }

    if is_zero(a) {
        return None;
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return Some(Vec::new());
    }

    let sqrt_discriminant = discriminant.sqrt();
    let first = (-b + sqrt_discriminant) / (2.0 * a);
    let second = (-b - sqrt_discriminant) / (2.0 * a);
    if approx_eq(first, second) {
        Some(vec![Expr::Number(first)])
    } else {
        Some(vec![Expr::Number(first), Expr::Number(second)])
    }
}

/// Fallback for equations that are neither linear nor quadratic, such as higher degree polynomials
/// or equations involving function calls of the variable.
///
/// No general method is attempted; the fallback never declines and always reports that no solution
/// was found.
fn solve_polynomial(_: &Expr, _: &str) -> Option<Vec<Expr>> {
    Some(Vec::new())
}
