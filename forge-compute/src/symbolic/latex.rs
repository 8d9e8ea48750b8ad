//! LaTeX output for expressions, suitable for MathJax.

use crate::approx::{approx_eq, is_one};
use std::fmt::{Display, Formatter, Result};
use super::expr::{fmt_number, Expr, Func};

/// A trait for types that can be formatted as LaTeX.
pub trait Latex {
    /// Format the value as LaTeX.
    fn fmt_latex(&self, f: &mut Formatter) -> Result;

    /// Wraps the value in a [`LatexFormatter`], which implements [`Display`].
    fn as_display(&self) -> LatexFormatter<'_, Self> {
        LatexFormatter(self)
    }
}

/// A wrapper type that implements [`Display`] for any type that implements [`Latex`].
pub struct LatexFormatter<'a, T: ?Sized>(&'a T);

impl<T: ?Sized> Display for LatexFormatter<'_, T>
where
    T: Latex,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.0.fmt_latex(f)
    }
}

/// Renders the expression as a LaTeX string.
///
/// ```
/// use forge_compute::{parse, render, simplify};
///
/// let expr = simplify(&parse("x^2 / y").unwrap());
/// assert_eq!(render(&expr), "\\frac{x^{2}}{y}");
/// ```
pub fn render(expr: &Expr) -> String {
    expr.as_display().to_string()
}

/// Writes the expression wrapped in `\left(` and `\right)`.
fn fmt_paren(f: &mut Formatter, expr: &Expr) -> Result {
    write!(f, "\\left(")?;
    expr.fmt_latex(f)?;
    write!(f, "\\right)")
}

/// If the factor is a power with a negative numeric exponent, returns the factor's reciprocal.
fn reciprocal(factor: &Expr) -> Option<Expr> {
    let Expr::Exp(base, exp) = factor else {
        return None;
    };
    let exp = exp.as_number().filter(|n| *n < 0.0)?;
    if is_one(-exp) {
        Some((**base).clone())
    } else {
        Some(Expr::pow((**base).clone(), Expr::Number(-exp)))
    }
}

/// Writes the factors separated by `\cdot`.
fn fmt_factors(f: &mut Formatter, factors: &[Expr]) -> Result {
    if factors.is_empty() {
        return write!(f, "1");
    }

    for (i, factor) in factors.iter().enumerate() {
        if i > 0 {
            write!(f, " \\cdot ")?;
        }
        let negative_number = factor.as_number().map_or(false, |n| n < 0.0);
        if matches!(factor, Expr::Add(_)) || i > 0 && negative_number {
            fmt_paren(f, factor)?;
        } else {
            factor.fmt_latex(f)?;
        }
    }
    Ok(())
}

/// Returns true if the base of a power needs parentheses.
fn is_compound_base(base: &Expr) -> bool {
    match base {
        Expr::Add(_) | Expr::Mul(_) | Expr::Exp(..) | Expr::Call(Func::Exp, _) => true,
        Expr::Number(n) => *n < 0.0,
        _ => false,
    }
}

impl Latex for Expr {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        match self {
            Self::Number(value) => fmt_number(f, *value),
            Self::Symbol(name) => write!(f, "{}", name),
            Self::Add(terms) => {
                let mut iter = terms.iter();
                match iter.next() {
                    Some(term) => term.fmt_latex(f)?,
                    None => return write!(f, "0"),
                }
                for term in iter {
                    match term.negated_term() {
                        Some(positive) => {
                            write!(f, " - ")?;
                            if matches!(positive, Expr::Add(_)) {
                                fmt_paren(f, &positive)?;
                            } else {
                                positive.fmt_latex(f)?;
                            }
                        },
                        None => {
                            write!(f, " + ")?;
                            term.fmt_latex(f)?;
                        },
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => {
                let factors = match factors.as_slice() {
                    [Self::Number(n), rest @ ..] if approx_eq(*n, -1.0) && !rest.is_empty() => {
                        write!(f, "-")?;
                        rest
                    },
                    factors => factors,
                };

                let mut numerator = Vec::new();
                let mut denominator = Vec::new();
                for factor in factors {
                    match reciprocal(factor) {
                        Some(factor) => denominator.push(factor),
                        None => numerator.push(factor.clone()),
                    }
                }

                if denominator.is_empty() {
                    fmt_factors(f, &numerator)
                } else {
                    write!(f, "\\frac{{")?;
                    fmt_factors(f, &numerator)?;
                    write!(f, "}}{{")?;
                    fmt_factors(f, &denominator)?;
                    write!(f, "}}")
                }
            },
            Self::Exp(base, exp) => {
                if exp.is_number_near(0.5) {
                    write!(f, "\\sqrt{{")?;
                    base.fmt_latex(f)?;
                    return write!(f, "}}");
                }
                if let Some(denominator) = reciprocal(self) {
                    write!(f, "\\frac{{1}}{{")?;
                    denominator.fmt_latex(f)?;
                    return write!(f, "}}");
                }

                if is_compound_base(base) {
                    fmt_paren(f, base)?;
                } else {
                    base.fmt_latex(f)?;
                }
                write!(f, "^{{")?;
                exp.fmt_latex(f)?;
                write!(f, "}}")
            },
            Self::Call(func, arg) => match func {
                Func::Exp => {
                    write!(f, "e^{{")?;
                    arg.fmt_latex(f)?;
                    write!(f, "}}")
                },
                Func::Sqrt => {
                    write!(f, "\\sqrt{{")?;
                    arg.fmt_latex(f)?;
                    write!(f, "}}")
                },
                Func::Sin | Func::Cos | Func::Tan | Func::Ln => {
                    let command = match func {
                        Func::Sin => "\\sin",
                        Func::Cos => "\\cos",
                        Func::Tan => "\\tan",
                        _ => "\\ln",
                    };
                    write!(f, "{}", command)?;
                    fmt_paren(f, arg)
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{parse, simplify};
    use pretty_assertions::assert_eq;
    use super::*;

    fn latex(input: &str) -> String {
        render(&simplify(&parse(input).unwrap()))
    }

    fn x() -> Expr {
        Expr::symbol("x")
    }

    #[test]
    fn sums() {
        assert_eq!(latex("x^2 + 3*x - 1"), "x^{2} + 3 \\cdot x - 1");
        assert_eq!(latex("2.5 - x"), "-x + 2.5");
        assert_eq!(latex("x - (x + 1)"), "x - \\left(x + 1\\right)");
        assert_eq!(latex("y - 2 * (x + 1)"), "y - 2 \\cdot \\left(x + 1\\right)");
    }

    #[test]
    fn products() {
        assert_eq!(latex("2 * (x + 1)"), "2 \\cdot \\left(x + 1\\right)");
        assert_eq!(render(&Expr::Mul(vec![Expr::Number(-1.0), x()])), "-x");
        assert_eq!(render(&Expr::Mul(vec![x(), Expr::Number(-2.0)])), "x \\cdot \\left(-2\\right)");
    }

    #[test]
    fn fractions() {
        assert_eq!(latex("x / y"), "\\frac{x}{y}");
        assert_eq!(latex("3 / x^2"), "\\frac{3}{x^{2}}");
        assert_eq!(render(&Expr::pow(x(), Expr::Number(-2.0))), "\\frac{1}{x^{2}}");
        assert_eq!(render(&Expr::pow(x(), Expr::Number(-1.0))), "\\frac{1}{x}");
    }

    #[test]
    fn roots() {
        assert_eq!(render(&Expr::pow(x(), Expr::Number(0.5))), "\\sqrt{x}");
        assert_eq!(render(&Expr::pow(x(), Expr::Number(-0.5))), "\\frac{1}{\\sqrt{x}}");
        assert_eq!(latex("sqrt(x + 1)"), "\\sqrt{x + 1}");
    }

    #[test]
    fn powers() {
        assert_eq!(latex("(x + 1)^2"), "\\left(x + 1\\right)^{2}");
        assert_eq!(latex("2^x"), "2^{x}");
        assert_eq!(latex("exp(x)^y"), "\\left(e^{x}\\right)^{y}");
    }

    #[test]
    fn functions() {
        assert_eq!(latex("sin(x)"), "\\sin\\left(x\\right)");
        assert_eq!(latex("log(x)"), "\\ln\\left(x\\right)");
        assert_eq!(latex("cos(x)^2"), "\\cos\\left(x\\right)^{2}");
        assert_eq!(latex("exp(2 * x)"), "e^{2 \\cdot x}");
    }
}
