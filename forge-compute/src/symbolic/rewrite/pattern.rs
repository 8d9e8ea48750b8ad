//! Structural pattern matching with wildcards.
//!
//! Every symbol in a pattern is a wildcard that matches any expression. A wildcard that appears
//! more than once must match strictly equal expressions at each occurrence. Operands of sums and
//! products are matched in any order.

use crate::symbolic::expr::Expr;
use std::collections::HashMap;

/// Maps wildcard names to the expressions they matched.
pub type Bindings = HashMap<String, Expr>;

/// Tries to match the pattern against the expression, extending the given bindings. Returns the
/// extended bindings on success. The input bindings are left untouched either way.
pub fn match_expr(pattern: &Expr, expr: &Expr, bindings: &Bindings) -> Option<Bindings> {
    match (pattern, expr) {
        (Expr::Symbol(name), _) => match bindings.get(name) {
            // contradiction with a previous binding?
            Some(bound) => (bound == expr).then(|| bindings.clone()),
            None => {
                let mut bindings = bindings.clone();
                bindings.insert(name.clone(), expr.clone());
                Some(bindings)
            },
        },
        (Expr::Number(_), Expr::Number(_)) => (pattern == expr).then(|| bindings.clone()),
        (Expr::Add(patterns), Expr::Add(exprs)) | (Expr::Mul(patterns), Expr::Mul(exprs)) => {
            if patterns.len() != exprs.len() {
                return None;
            }
            let mut used = vec![false; exprs.len()];
            match_unordered(patterns, exprs, &mut used, bindings)
        },
        (Expr::Exp(pattern_base, pattern_exp), Expr::Exp(base, exp)) => {
            let bindings = match_expr(pattern_base, base, bindings)?;
            match_expr(pattern_exp, exp, &bindings)
        },
        (Expr::Call(pattern_func, pattern_arg), Expr::Call(func, arg)) if pattern_func == func => {
            match_expr(pattern_arg, arg, bindings)
        },
        _ => None,
    }
}

/// Matches every pattern against a distinct, unused expression, backtracking over the possible
/// assignments. On success, `used` marks the expressions that were matched.
///
/// Expressions left unused are not an error; callers that need a full match compare lengths first.
pub fn match_unordered(
    patterns: &[Expr],
    exprs: &[Expr],
    used: &mut [bool],
    bindings: &Bindings,
) -> Option<Bindings> {
    let Some((first, rest)) = patterns.split_first() else {
        return Some(bindings.clone());
    };

    for (i, expr) in exprs.iter().enumerate() {
        if used[i] {
            continue;
        }
        if let Some(next) = match_expr(first, expr, bindings) {
            used[i] = true;
            if let Some(found) = match_unordered(rest, exprs, used, &next) {
                return Some(found);
            }
            used[i] = false;
        }
    }

    None
}
