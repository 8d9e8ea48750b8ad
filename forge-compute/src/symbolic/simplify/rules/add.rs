//! Simplification rules for expressions involving addition, including combining like terms.

use crate::approx::{is_one, is_zero};
use crate::symbolic::{
    expr::Expr,
    simplify::{rules::do_add, step::Step},
    step_collector::StepCollector,
};

/// `(a+b)+c = a+b+c`
pub fn flatten(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |terms| {
        if !terms.iter().any(|term| matches!(term, Expr::Add(_))) {
            return None;
        }

        let mut new_terms = Vec::with_capacity(terms.len());
        for term in terms {
            match term {
                Expr::Add(inner) => new_terms.extend(inner.iter().cloned()),
                term => new_terms.push(term.clone()),
            }
        }
        Some(Expr::Add(new_terms).downgrade())
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::FlattenAdd);
    Some(opt)
}

/// Folds every numeric term into one constant, placed last. A constant of zero is dropped.
///
/// `2+x+3 = x+5`
/// `x+0 = x`
pub fn fold_terms(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |terms| {
        let numbers = terms.iter().filter_map(Expr::as_number).collect::<Vec<_>>();
        let already_folded = match numbers.as_slice() {
            [] => true,
            [n] => !is_zero(*n) && terms.last().map_or(false, Expr::is_number),
            _ => false,
        };
        if already_folded {
            return None;
        }

        let constant = numbers.iter().sum::<f64>();
        let mut new_terms = terms.iter()
            .filter(|term| !term.is_number())
            .cloned()
            .collect::<Vec<_>>();
        if !is_zero(constant) {
            new_terms.push(Expr::Number(constant));
        }
        Some(Expr::Add(new_terms).downgrade())
    })?;

    step_collector.push(Step::FoldTerms);
    Some(opt)
}

/// Splits a term into its leading numeric coefficient and the remaining "base" of the term.
///
/// - `3*a` -> `(3, a)`
/// - `-a*b` -> `(-1, a*b)`
/// - `a` -> `(1, a)`
pub(crate) fn split_coefficient(term: &Expr) -> (f64, Expr) {
    match term {
        Expr::Mul(factors) => match factors.split_first() {
            Some((Expr::Number(coeff), rest)) => (*coeff, Expr::Mul(rest.to_vec()).downgrade()),
            _ => (1.0, term.clone()),
        },
        _ => (1.0, term.clone()),
    }
}

/// Builds the term `coeff * base`, keeping the product flat.
pub(crate) fn with_coefficient(coeff: f64, base: Expr) -> Expr {
    if is_one(coeff) {
        return base;
    }

    match base {
        Expr::Mul(mut factors) => {
            factors.insert(0, Expr::Number(coeff));
            Expr::Mul(factors)
        },
        base => Expr::Mul(vec![Expr::Number(coeff), base]),
    }
}

/// Combines like terms. Terms are alike when they are strictly equal after removing their numeric
/// coefficients. The combined terms keep the position of their first occurrence.
///
/// `a+a = 2a`
/// `2a+3a = 5a`
/// `a-a = 0`
pub fn combine_like_terms(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |terms| {
        let mut groups: Vec<(f64, Expr)> = Vec::new();
        let mut constants = Vec::new();
        let mut merged = false;

        for term in terms {
            if term.is_number() {
                constants.push(term.clone());
                continue;
            }

            let (coeff, base) = split_coefficient(term);
            match groups.iter_mut().find(|(_, existing)| existing == &base) {
                Some((existing_coeff, _)) => {
                    *existing_coeff += coeff;
                    merged = true;
                },
                None => groups.push((coeff, base)),
            }
        }

        if !merged {
            return None;
        }

        let mut new_terms = groups.into_iter()
            .filter(|(coeff, _)| !is_zero(*coeff))
            .map(|(coeff, base)| with_coefficient(coeff, base))
            .collect::<Vec<_>>();
        new_terms.extend(constants);
        Some(Expr::Add(new_terms).downgrade())
    })?;

    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// Applies all addition rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    flatten(expr, step_collector)
        .or_else(|| fold_terms(expr, step_collector))
        .or_else(|| combine_like_terms(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::symbol("x")
    }

    #[test]
    fn fold_constant_last() {
        let expr = Expr::Add(vec![Expr::Number(2.0), x(), Expr::Number(3.0)]);
        assert_eq!(
            fold_terms(&expr, &mut ()),
            Some(Expr::Add(vec![x(), Expr::Number(5.0)])),
        );
    }

    #[test]
    fn fold_drops_zero() {
        let expr = Expr::Add(vec![x(), Expr::Number(0.0)]);
        assert_eq!(fold_terms(&expr, &mut ()), Some(x()));

        let folded = Expr::Add(vec![x(), Expr::Number(1.0)]);
        assert_eq!(fold_terms(&folded, &mut ()), None);
    }

    #[test]
    fn combine_with_coefficients() {
        let expr = Expr::Add(vec![
            Expr::Mul(vec![Expr::Number(2.0), x()]),
            Expr::symbol("y"),
            x(),
        ]);
        let mut steps: Vec<Step> = Vec::new();
        assert_eq!(
            combine_like_terms(&expr, &mut steps),
            Some(Expr::Add(vec![Expr::Mul(vec![Expr::Number(3.0), x()]), Expr::symbol("y")])),
        );
        assert_eq!(steps, vec![Step::CombineLikeTerms]);
    }

    #[test]
    fn combine_cancels() {
        let expr = Expr::Add(vec![x(), Expr::Mul(vec![Expr::Number(-1.0), x()])]);
        assert_eq!(combine_like_terms(&expr, &mut ()), Some(Expr::Number(0.0)));
    }

    #[test]
    fn split_products() {
        let term = Expr::Mul(vec![Expr::Number(-4.0), x(), Expr::symbol("y")]);
        assert_eq!(
            split_coefficient(&term),
            (-4.0, Expr::Mul(vec![x(), Expr::symbol("y")])),
        );
        assert_eq!(with_coefficient(-4.0, Expr::Mul(vec![x(), Expr::symbol("y")])), term);
    }
}
