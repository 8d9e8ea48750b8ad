//! Rule-based rewriting of expressions.
//!
//! Where the [simplifier](crate::symbolic::simplify) applies a fixed set of algebraic rules, the
//! rewrite engine applies an explicit [`RuleTable`] chosen by the caller. This is where function
//! identities like `sin(x)^2 + cos(x)^2 = 1` live.
//!
//! Rewriting proceeds in iterations. Each iteration scans the rules in order and applies the first
//! one that matches anywhere in the tree, trying each node before its children. Rewriting stops
//! when no rule changes the tree, or after [`MAX_ITERATIONS`] iterations.
//!
//! The result is not simplified.
//!
//! ```
//! use forge_compute::{parse, rewrite, simplify, symbolic::Expr, RuleTable};
//!
//! let expr = simplify(&parse("sin(x)^2 + cos(x)^2").unwrap());
//! assert_eq!(rewrite(&expr, &RuleTable::standard()), Expr::Number(1.0));
//! ```

pub mod pattern;
pub mod rule;

use crate::symbolic::expr::Expr;
use tracing::debug;

pub use rule::Rule;

/// The maximum number of rule applications performed by [`rewrite`].
pub const MAX_ITERATIONS: usize = 100;

/// An ordered, immutable set of rewrite rules.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Creates an empty rule table.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Returns the table with the given rule added after the existing rules.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// The built-in rules: currently only the [pythagorean identity](Rule::pythagorean).
    pub fn standard() -> Self {
        Self::new().with_rule(Rule::pythagorean())
    }

    /// Returns the rules in the order they are tried.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Applies the rule at the first node where it matches and changes the expression, trying each
/// node before its children.
fn apply_anywhere(expr: &Expr, rule: &Rule) -> Option<Expr> {
    if let Some(next) = rule.apply(expr) {
        if &next != expr {
            return Some(next);
        }
    }

    // replaces the first child that the rule changes
    let apply_first = |children: &[Expr]| {
        children.iter()
            .enumerate()
            .find_map(|(i, child)| Some((i, apply_anywhere(child, rule)?)))
            .map(|(i, new_child)| {
                let mut children = children.to_vec();
                children[i] = new_child;
                children
            })
    };

    match expr {
        Expr::Number(_) | Expr::Symbol(_) => None,
        Expr::Add(terms) => apply_first(terms).map(Expr::Add),
        Expr::Mul(factors) => apply_first(factors).map(Expr::Mul),
        Expr::Exp(base, exp) => {
            if let Some(base) = apply_anywhere(base, rule) {
                Some(Expr::pow(base, (**exp).clone()))
            } else {
                apply_anywhere(exp, rule).map(|exp| Expr::pow((**base).clone(), exp))
            }
        },
        Expr::Call(func, arg) => apply_anywhere(arg, rule).map(|arg| Expr::call(*func, arg)),
    }
}

/// Rewrites the expression with the rules of the given table until no rule applies.
pub fn rewrite(expr: &Expr, table: &RuleTable) -> Expr {
    let mut current = expr.clone();

    for _ in 0..MAX_ITERATIONS {
        let next = table.rules.iter().find_map(|rule| {
            let next = apply_anywhere(&current, rule)?;
            debug!(rule = %rule.name, from = %current, to = %next, "applied rewrite rule");
            Some(next)
        });

        match next {
            Some(next) => current = next,
            None => return current,
        }
    }

    debug!(iterations = MAX_ITERATIONS, "rewrite stopped at the iteration limit");
    current
}

#[cfg(test)]
mod tests {
    use crate::{parse, simplify, symbolic::expr::Func};
    use pretty_assertions::assert_eq;
    use super::*;

    fn rewritten(input: &str) -> Expr {
        rewrite(&simplify(&parse(input).unwrap()), &RuleTable::standard())
    }

    fn x() -> Expr {
        Expr::symbol("x")
    }

    #[test]
    fn pythagorean_identity() {
        assert_eq!(rewritten("sin(x)^2 + cos(x)^2"), Expr::Number(1.0));
        assert_eq!(rewritten("cos(x)^2 + 2 + sin(x)^2"), Expr::Number(1.0));
        assert_eq!(rewritten("sin(x)^2 + cos(x)^2 + 3"), Expr::Number(1.0));
    }

    #[test]
    fn rewrites_nested_nodes() {
        assert_eq!(rewritten("exp(sin(x)^2 + cos(x)^2)"), Expr::call(Func::Exp, Expr::Number(1.0)));
        assert_eq!(rewritten("y * (sin(x)^2 + cos(x)^2)"), Expr::Mul(vec![
            Expr::symbol("y"),
            Expr::Number(1.0),
        ]));
    }

    #[test]
    fn no_match_is_unchanged() {
        let expr = simplify(&parse("sin(x)^2 + cos(y)^2").unwrap());
        assert_eq!(rewrite(&expr, &RuleTable::standard()), expr);
        assert_eq!(rewrite(&expr, &RuleTable::new()), expr);
    }

    #[test]
    fn rules_apply_in_order() {
        let table = RuleTable::new()
            .with_rule(Rule::parse("first", "2 * a", "sin(a)").unwrap())
            .with_rule(Rule::parse("second", "2 * a", "cos(a)").unwrap());
        assert_eq!(table.rules().len(), 2);

        let expr = Expr::Mul(vec![Expr::Number(2.0), x()]);
        assert_eq!(rewrite(&expr, &table), Expr::call(Func::Sin, x()));
    }

    #[test]
    fn stops_at_iteration_limit() {
        // `a` matches every node, and the replacement always grows
        let grow = Rule::new("grow", Expr::symbol("a"), Expr::call(Func::Sin, Expr::symbol("a")));
        let table = RuleTable::new().with_rule(grow);
        let result = rewrite(&x(), &table);
        let depth = result.post_order_iter().filter(|expr| matches!(expr, Expr::Call(..))).count();
        assert_eq!(depth, MAX_ITERATIONS);
    }
}
