use crate::symbolic::{expr::{Expr, Func}, simplify::simplify};
use forge_error::Error;
use std::fmt;
use super::pattern::{match_expr, match_unordered, Bindings};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rewrite rule, replacing expressions that match [`Rule::pattern`] with
/// [`Rule::replacement`].
///
/// Symbols in the pattern are wildcards. Wildcards that also appear in the replacement are
/// substituted with the expressions they matched.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rule {
    /// The name of the rule, used when logging applications of the rule.
    pub name: String,

    /// The pattern to look for.
    pub pattern: Expr,

    /// The expression that replaces a match.
    pub replacement: Expr,

    /// If true, a sum pattern matching some of the terms of a larger sum replaces the entire sum,
    /// instead of only the matched terms.
    pub replaces_whole_sum: bool,
}

impl Rule {
    /// Creates a rule from an already built pattern and replacement.
    pub fn new(name: impl Into<String>, pattern: Expr, replacement: Expr) -> Self {
        Self { name: name.into(), pattern, replacement, replaces_whole_sum: false }
    }

    /// Returns the rule changed so that a partial match of a sum replaces the entire sum.
    pub fn replacing_whole_sum(mut self) -> Self {
        self.replaces_whole_sum = true;
        self
    }

    /// Creates a rule by parsing the pattern and replacement from source text. Both are simplified
    /// so that the pattern has the same shape as the simplified expressions it will be matched
    /// against.
    ///
    /// ```
    /// use forge_compute::{parse, rewrite, simplify, Rule, RuleTable};
    ///
    /// let double_angle = Rule::parse("double angle", "2 * sin(a) * cos(a)", "sin(2 * a)").unwrap();
    /// let table = RuleTable::new().with_rule(double_angle);
    /// let expr = simplify(&parse("2 * sin(y) * cos(y)").unwrap());
    /// assert_eq!(rewrite(&expr, &table), parse("sin(2 * y)").unwrap());
    /// ```
    pub fn parse(name: impl Into<String>, pattern: &str, replacement: &str) -> Result<Self, Error> {
        let pattern = simplify(&crate::parse(pattern)?);
        let replacement = simplify(&crate::parse(replacement)?);
        Ok(Self::new(name, pattern, replacement))
    }

    /// `sin(a)^2 + cos(a)^2 = 1`
    ///
    /// The two squares may appear among other terms of a sum, in which case the whole sum is
    /// replaced with `1`.
    pub fn pythagorean() -> Self {
        let a = || Expr::symbol("a");
        let square = |func| Expr::pow(Expr::call(func, a()), Expr::Number(2.0));
        Self::new(
            "pythagorean",
            Expr::Add(vec![square(Func::Sin), square(Func::Cos)]),
            Expr::Number(1.0),
        )
        .replacing_whole_sum()
    }

    /// Tries to apply the rule to the given node only, without looking at its children.
    ///
    /// A sum pattern also matches a subset of the terms of a larger sum. The terms that were not
    /// matched are kept alongside the replacement, unless [`Rule::replaces_whole_sum`] is set.
    pub fn apply(&self, expr: &Expr) -> Option<Expr> {
        match (&self.pattern, expr) {
            (Expr::Add(patterns), Expr::Add(terms)) if patterns.len() < terms.len() => {
                let mut used = vec![false; terms.len()];
                let bindings = match_unordered(patterns, terms, &mut used, &Bindings::new())?;
                if self.replaces_whole_sum {
                    return Some(self.replacement.substitute(&bindings));
                }

                let mut new_terms = terms.iter()
                    .zip(used)
                    .filter(|(_, used)| !used)
                    .map(|(term, _)| term.clone())
                    .collect::<Vec<_>>();
                new_terms.push(self.replacement.substitute(&bindings));
                Some(Expr::Add(new_terms))
            },
            _ => {
                let bindings = match_expr(&self.pattern, expr, &Bindings::new())?;
                Some(self.replacement.substitute(&bindings))
            },
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {} => {}", self.name, self.pattern, self.replacement)
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn pythagorean_exact() {
        let expr = simplify(&parse("cos(2*x)^2 + sin(2*x)^2").unwrap());
        assert_eq!(Rule::pythagorean().apply(&expr), Some(Expr::Number(1.0)));
    }

    #[test]
    fn pythagorean_replaces_whole_sum() {
        let expr = simplify(&parse("sin(x)^2 + cos(x)^2 + 3").unwrap());
        assert_eq!(Rule::pythagorean().apply(&expr), Some(Expr::Number(1.0)));

        let expr = simplify(&parse("sin(x)^2 + y + cos(x)^2").unwrap());
        assert_eq!(Rule::pythagorean().apply(&expr), Some(Expr::Number(1.0)));
    }

    #[test]
    fn parsed_sum_keeps_other_terms() {
        let rule = Rule::parse("squares", "sin(a)^2 + cos(a)^2", "1").unwrap();
        assert!(!rule.replaces_whole_sum);

        let expr = simplify(&parse("sin(x)^2 + y + cos(x)^2").unwrap());
        assert_eq!(
            rule.apply(&expr),
            Some(Expr::Add(vec![Expr::symbol("y"), Expr::Number(1.0)])),
        );
        assert_eq!(
            rule.replacing_whole_sum().apply(&expr),
            Some(Expr::Number(1.0)),
        );
    }

    #[test]
    fn pythagorean_needs_same_argument() {
        let expr = simplify(&parse("sin(x)^2 + cos(y)^2").unwrap());
        assert_eq!(Rule::pythagorean().apply(&expr), None);
    }

    #[test]
    fn parse_substitutes_wildcards() {
        let rule = Rule::parse("log of exp", "log(exp(a))", "a").unwrap();
        let expr = parse("log(exp(x + 1))").unwrap();
        assert_eq!(rule.apply(&expr), Some(parse("x + 1").unwrap()));
    }

    #[test]
    fn parse_reports_errors() {
        assert!(Rule::parse("broken", "sin(a", "a").is_err());
        assert!(Rule::parse("broken", "a", "a $ 2").is_err());
    }

    #[test]
    fn display() {
        assert_eq!(Rule::pythagorean().to_string(), "pythagorean: sin(a)^2 + cos(a)^2 => 1");
    }
}
