//! Simplification rules for expressions involving multiplication, including combining like
//! factors.

use crate::approx::{is_one, is_zero};
use crate::symbolic::{
    expr::Expr,
    simplify::{rules::do_multiply, simplify_with, step::Step},
    step_collector::StepCollector,
};

/// `(ab)c = abc`
pub fn flatten(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        if !factors.iter().any(|factor| matches!(factor, Expr::Mul(_))) {
            return None;
        }

        let mut new_factors = Vec::with_capacity(factors.len());
        for factor in factors {
            match factor {
                Expr::Mul(inner) => new_factors.extend(inner.iter().cloned()),
                factor => new_factors.push(factor.clone()),
            }
        }
        Some(Expr::Mul(new_factors).downgrade())
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::FlattenMul);
    Some(opt)
}

/// `0*a = 0`
/// `a*0 = 0`
pub fn multiply_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        if factors.iter().any(|factor| factor.as_number().map_or(false, is_zero)) {
            Some(Expr::Number(0.0))
        } else {
            None
        }
    })?;

    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// Folds every numeric factor into one constant, placed first. A constant of one is dropped, and
/// a constant that rounds to zero zeroes the whole product.
///
/// `2*x*3 = 6x`
/// `1*x = x`
pub fn fold_factors(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        let numbers = factors.iter().filter_map(Expr::as_number).collect::<Vec<_>>();
        let already_folded = match numbers.as_slice() {
            [] => true,
            [n] => !is_one(*n) && factors.first().map_or(false, Expr::is_number),
            _ => false,
        };
        if already_folded {
            return None;
        }

        let constant = numbers.iter().product::<f64>();
        if is_zero(constant) {
            return Some(Expr::Number(0.0));
        }

        let mut new_factors = Vec::with_capacity(factors.len());
        if !is_one(constant) {
            new_factors.push(Expr::Number(constant));
        }
        new_factors.extend(factors.iter().filter(|factor| !factor.is_number()).cloned());
        Some(Expr::Mul(new_factors).downgrade())
    })?;

    step_collector.push(Step::FoldFactors);
    Some(opt)
}

/// Splits a factor into its base and exponent. Factors that are not powers have an exponent of 1.
fn split_power(factor: &Expr) -> (Expr, Expr) {
    match factor {
        Expr::Exp(base, exp) => ((**base).clone(), (**exp).clone()),
        factor => (factor.clone(), Expr::Number(1.0)),
    }
}

/// Combines like factors by adding the exponents of factors with strictly equal bases. The
/// combined power is simplified again.
///
/// `a*a = a^2`
/// `a^2*a^3 = a^5`
/// `a*a^-1 = 1`
pub fn combine_like_factors(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let Expr::Mul(factors) = expr else {
        return None;
    };

    // (base, exponents, original factor)
    let mut groups: Vec<(Expr, Vec<Expr>, &Expr)> = Vec::new();
    let mut new_factors = Vec::new();
    let mut merged = false;

    for factor in factors {
        if factor.is_number() {
            new_factors.push(factor.clone());
            continue;
        }

        let (base, exp) = split_power(factor);
        match groups.iter_mut().find(|(existing, _, _)| existing == &base) {
            Some((_, exps, _)) => {
                exps.push(exp);
                merged = true;
            },
            None => groups.push((base, vec![exp], factor)),
        }
    }

    if !merged {
        return None;
    }

    step_collector.push(Step::CombineLikeFactors);
    for (base, exps, original) in groups {
        if exps.len() == 1 {
            new_factors.push(original.clone());
        } else {
            new_factors.push(simplify_with(&Expr::pow(base, Expr::Add(exps)), step_collector));
        }
    }
    Some(Expr::Mul(new_factors).downgrade())
}

/// Applies all multiplication rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    flatten(expr, step_collector)
        .or_else(|| multiply_zero(expr, step_collector))
        .or_else(|| fold_factors(expr, step_collector))
        .or_else(|| combine_like_factors(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::symbol("x")
    }

    #[test]
    fn fold_constant_first() {
        let expr = Expr::Mul(vec![x(), Expr::Number(2.0), Expr::Number(3.0)]);
        assert_eq!(
            fold_factors(&expr, &mut ()),
            Some(Expr::Mul(vec![Expr::Number(6.0), x()])),
        );
    }

    #[test]
    fn fold_drops_one() {
        let expr = Expr::Mul(vec![Expr::Number(0.5), x(), Expr::Number(2.0)]);
        assert_eq!(fold_factors(&expr, &mut ()), Some(x()));
    }

    #[test]
    fn zero_short_circuits() {
        let expr = Expr::Mul(vec![x(), Expr::Number(0.0), Expr::symbol("y")]);
        assert_eq!(multiply_zero(&expr, &mut ()), Some(Expr::Number(0.0)));
    }

    #[test]
    fn combine_powers() {
        let expr = Expr::Mul(vec![
            Expr::Number(2.0),
            x(),
            Expr::symbol("y"),
            Expr::pow(x(), Expr::Number(2.0)),
        ]);
        assert_eq!(
            combine_like_factors(&expr, &mut ()),
            Some(Expr::Mul(vec![
                Expr::Number(2.0),
                Expr::pow(x(), Expr::Number(3.0)),
                Expr::symbol("y"),
            ])),
        );
    }

    #[test]
    fn combine_reciprocal() {
        let expr = Expr::Mul(vec![x(), Expr::pow(x(), Expr::Number(-1.0))]);
        assert_eq!(combine_like_factors(&expr, &mut ()), Some(Expr::Number(1.0)));
    }
}
