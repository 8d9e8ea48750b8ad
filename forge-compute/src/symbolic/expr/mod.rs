//! A representation of mathematical expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](forge_parser::parser::ast::expr::Expr) type from `forge_parser` keeps the exact
//! shape of the source text, including parentheses and spans. It's convenient for parsing and
//! error reporting, but not so much for algebraic manipulation.
//!
//! This module defines a separate [`Expr`] with a closed set of variants: numbers, symbols, sums,
//! products, powers, and function calls. Subtraction is lowered to addition of a product with
//! `-1`, and division is lowered to multiplication by a power of `-1`, so every transformation only
//! needs to handle these six shapes.
//!
//! # Strict equality
//!
//! The [`PartialEq`] implementation for [`Expr`] implements **strict equality**, not semantic
//! equality. Two expressions are strictly equal if:
//!
//! - Both are [`Expr::Number`] and the values differ by less than [`EPSILON`](crate::approx::EPSILON).
//! - Both are [`Expr::Symbol`] with the same name.
//! - Both are [`Expr::Add`] or both are [`Expr::Mul`], and their immediate children are equal as
//!   multisets (in any order).
//! - Both are [`Expr::Exp`] with equal base and equal exponent, in that order.
//! - Both are [`Expr::Call`] to the same function with equal arguments.
//!
//! Children are not flattened before comparison. `(a + b) + c` is **not** strictly equal to
//! `a + b + c`; only the simplifier merges nested sums.
//!
//! There is no [`Eq`] or [`Hash`] implementation, as approximate number comparison is not
//! transitive.

mod iter;

use crate::approx::{approx_eq, is_zero};
use forge_parser::parser::{
    ast::{binary::BinOpKind, expr::Expr as AstExpr, literal::Literal},
    Precedence,
};
use iter::ExprIter;
use std::{cmp::Ordering, collections::HashMap, fmt, ops::{Add, Mul, Neg}};

pub use forge_parser::parser::ast::call::Func;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A mathematical expression.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(tag = "type", content = "args"))]
pub enum Expr {
    /// A floating-point constant, such as `2` or `0.5`.
    Number(f64),

    /// A variable, such as `x` or `y`.
    Symbol(String),

    /// Multiple terms added together.
    Add(Vec<Expr>),

    /// Multiple factors multiplied together.
    Mul(Vec<Expr>),

    /// An expression raised to a power.
    Exp(Box<Expr>, Box<Expr>),

    /// A function applied to a single argument, such as `sin(x)`.
    Call(Func, Box<Expr>),
}

/// Writes a number, printing negative zero as `0`.
pub(crate) fn fmt_number(f: &mut fmt::Formatter, value: f64) -> fmt::Result {
    if value == 0.0 {
        write!(f, "0")
    } else {
        write!(f, "{}", value)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => fmt_number(f, *value),
            Self::Symbol(name) => write!(f, "{}", name),
            Self::Add(terms) => {
                let mut iter = terms.iter();
                match iter.next() {
                    Some(term) => write!(f, "{}", term)?,
                    None => return write!(f, "0"),
                }
                for term in iter {
                    match term.negated_term() {
                        Some(positive @ Self::Add(_)) => write!(f, " - ({})", positive)?,
                        Some(positive) => write!(f, " - {}", positive)?,
                        None => write!(f, " + {}", term)?,
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => {
                let factors = match factors.as_slice() {
                    [] => return write!(f, "1"),
                    [Self::Number(n), rest @ ..] if approx_eq(*n, -1.0) && !rest.is_empty() => {
                        write!(f, "-")?;
                        rest
                    },
                    factors => factors,
                };

                let mut iter = factors.iter();
                if let Some(first) = iter.next() {
                    // `-x^2` would read back as `(-x)^2`
                    if first.cmp_precedence(self) == Ordering::Less || matches!(first, Self::Exp(..)) && factors.len() < self.len() {
                        write!(f, "({})", first)?;
                    } else {
                        write!(f, "{}", first)?;
                    }
                }
                for factor in iter {
                    if factor.cmp_precedence(self) == Ordering::Less || factor.is_negative_number() {
                        write!(f, " * ({})", factor)?;
                    } else {
                        write!(f, " * {}", factor)?;
                    }
                }
                Ok(())
            },
            Self::Exp(base, exp) => {
                if base.cmp_precedence(self) != Ordering::Greater || base.is_negative_number() {
                    write!(f, "({})", base)?;
                } else {
                    write!(f, "{}", base)?;
                }
                write!(f, "^")?;
                if exp.cmp_precedence(self) == Ordering::Less || exp.is_negative_number() {
                    write!(f, "({})", exp)
                } else {
                    write!(f, "{}", exp)
                }
            },
            Self::Call(func, arg) => write!(f, "{}({})", func, arg),
        }
    }
}

impl Expr {
    /// Builds `base ^ exp`.
    pub fn pow(base: Expr, exp: Expr) -> Self {
        Self::Exp(Box::new(base), Box::new(exp))
    }

    /// Builds a call to the given function.
    pub fn call(func: Func, arg: Expr) -> Self {
        Self::Call(func, Box::new(arg))
    }

    /// Builds a symbol with the given name.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    /// Returns the precedence of the expression.
    fn precedence(&self) -> Precedence {
        match self {
            Self::Number(_) | Self::Symbol(_) | Self::Call(..) => Precedence::Primary,
            Self::Add(_) => BinOpKind::Add.precedence(),
            Self::Mul(_) => BinOpKind::Mul.precedence(),
            Self::Exp(..) => BinOpKind::Exp.precedence(),
        }
    }

    /// Compares the precedence of this expression with the other expression.
    ///
    /// This is used to determine if parentheses are needed around the given expression when
    /// printing.
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        self.precedence().cmp(&other.precedence())
    }

    /// Returns the number of immediate children of an [`Expr::Add`] or [`Expr::Mul`], or 1 for
    /// any other expression.
    fn len(&self) -> usize {
        match self {
            Self::Add(items) | Self::Mul(items) => items.len(),
            _ => 1,
        }
    }

    /// If the expression is an [`Expr::Number`], returns the contained value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns true if the expression is an [`Expr::Number`].
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Returns true if the expression is an [`Expr::Number`] within tolerance of the given value.
    pub fn is_number_near(&self, value: f64) -> bool {
        self.as_number().map_or(false, |n| approx_eq(n, value))
    }

    /// Returns true if the expression is a negative [`Expr::Number`].
    fn is_negative_number(&self) -> bool {
        self.as_number().map_or(false, |n| n < 0.0 && !is_zero(n))
    }

    /// If the expression is an [`Expr::Symbol`], returns the name of the symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// Returns true if the expression is the symbol with the given name.
    pub fn is_symbol(&self, name: &str) -> bool {
        self.as_symbol() == Some(name)
    }

    /// If this term has a negative leading coefficient, returns the term with the sign flipped.
    /// Used to print `a - b` instead of `a + -1 * b`.
    pub(crate) fn negated_term(&self) -> Option<Expr> {
        match self {
            Self::Number(n) if *n < 0.0 && !is_zero(*n) => Some(Self::Number(-n)),
            Self::Mul(factors) => match factors.split_first() {
                Some((Self::Number(n), rest)) if *n < 0.0 && !is_zero(*n) && !rest.is_empty() => {
                    if approx_eq(*n, -1.0) {
                        Some(Self::Mul(rest.to_vec()).downgrade())
                    } else {
                        let mut factors = factors.clone();
                        factors[0] = Self::Number(-n);
                        Some(Self::Mul(factors))
                    }
                },
                _ => None,
            },
            _ => None,
        }
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`Expr::Add`] with zero / one term, or an [`Expr::Mul`]
    /// with zero / one factor. This function checks for these cases and simplifies the expression
    /// into the single term / factor, or the number 0 or 1.
    pub fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => match terms.len() {
                0 => Self::Number(0.0),
                1 => terms.remove(0),
                _ => Self::Add(terms),
            },
            Self::Mul(mut factors) => match factors.len() {
                0 => Self::Number(1.0),
                1 => factors.remove(0),
                _ => Self::Mul(factors),
            },
            _ => self,
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns true if the symbol with the given name appears anywhere in the expression.
    pub fn contains_symbol(&self, name: &str) -> bool {
        self.post_order_iter().any(|expr| expr.is_symbol(name))
    }

    /// Returns a new expression with every symbol that is a key of the mapping replaced by the
    /// corresponding expression. All other nodes are copied unchanged.
    pub fn substitute(&self, mapping: &HashMap<String, Expr>) -> Expr {
        match self {
            Self::Number(_) => self.clone(),
            Self::Symbol(name) => mapping.get(name).cloned().unwrap_or_else(|| self.clone()),
            Self::Add(terms) => Self::Add(terms.iter().map(|t| t.substitute(mapping)).collect()),
            Self::Mul(factors) => Self::Mul(factors.iter().map(|f| f.substitute(mapping)).collect()),
            Self::Exp(base, exp) => Self::pow(base.substitute(mapping), exp.substitute(mapping)),
            Self::Call(func, arg) => Self::call(*func, arg.substitute(mapping)),
        }
    }
}

/// Compares two lists of expressions as multisets, using strict equality for the elements.
fn multiset_eq(lhs: &[Expr], rhs: &[Expr]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }

    let mut used = vec![false; rhs.len()];
    lhs.iter().all(|lhs| {
        let found = rhs.iter()
            .enumerate()
            .position(|(i, rhs)| !used[i] && lhs == rhs);
        match found {
            Some(i) => {
                used[i] = true;
                true
            },
            None => false,
        }
    })
}

/// Checks if two expressions are **strictly** equal.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(lhs), Self::Number(rhs)) => approx_eq(*lhs, *rhs),
            (Self::Symbol(lhs), Self::Symbol(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => multiset_eq(lhs, rhs),
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            (Self::Call(lhs_func, lhs_arg), Self::Call(rhs_func, rhs_arg)) => {
                lhs_func == rhs_func && lhs_arg == rhs_arg
            },
            _ => false,
        }
    }
}

/// Lowers the syntax tree to an expression. The conversion does not flatten nested operations:
/// `a + b + c` becomes `Add[Add[a, b], c]`. Negating a number literal produces a negative number.
impl From<AstExpr> for Expr {
    fn from(expr: AstExpr) -> Self {
        match expr {
            AstExpr::Literal(Literal::Number(num)) => Self::Number(num.value),
            AstExpr::Literal(Literal::Symbol(sym)) => Self::Symbol(sym.name),
            AstExpr::Paren(paren) => Self::from(paren.into_innermost()),
            AstExpr::Call(call) => Self::call(call.func, Self::from(*call.arg)),
            AstExpr::Unary(unary) => match Self::from(*unary.operand) {
                Self::Number(value) => Self::Number(-value),
                operand => Self::Mul(vec![Self::Number(-1.0), operand]),
            },
            AstExpr::Binary(binary) => {
                let lhs = Self::from(*binary.lhs);
                let rhs = Self::from(*binary.rhs);
                match binary.op.kind {
                    BinOpKind::Add => Self::Add(vec![lhs, rhs]),
                    BinOpKind::Sub => Self::Add(vec![lhs, Self::Mul(vec![Self::Number(-1.0), rhs])]),
                    BinOpKind::Mul => Self::Mul(vec![lhs, rhs]),
                    BinOpKind::Div => Self::Mul(vec![lhs, Self::pow(rhs, Self::Number(-1.0))]),
                    BinOpKind::Exp => Self::pow(lhs, rhs),
                }
            },
        }
    }
}

/// Adds two [`Expr`]s together. No simplification is done, except that operands which are already
/// [`Expr::Add`] are combined in one list of terms (flattening).
impl Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Add(mut terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
                Self::Add(terms)
            },
            (Self::Add(mut terms), other) => {
                terms.push(other);
                Self::Add(terms)
            },
            (other, Self::Add(mut terms)) => {
                terms.insert(0, other);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

/// Multiplies two [`Expr`]s together. No simplification is done, except that operands which are
/// already [`Expr::Mul`] are combined in one list of factors (flattening).
impl Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Mul(mut factors), Self::Mul(other)) => {
                factors.extend(other);
                Self::Mul(factors)
            },
            (Self::Mul(mut factors), other) => {
                factors.push(other);
                Self::Mul(factors)
            },
            (other, Self::Mul(mut factors)) => {
                factors.insert(0, other);
                Self::Mul(factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

/// Multiplies this expression by -1. No simplification is done, except for the case where the
/// expression is a number, in which case the number is negated.
impl Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Number(value) => Self::Number(-value),
            expr => Self::Number(-1.0) * expr,
        }
    }
}
