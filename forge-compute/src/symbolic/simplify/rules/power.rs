//! Simplification rules for powers.

use crate::approx::{is_one, is_zero};
use crate::symbolic::{
    expr::Expr,
    simplify::{rules::do_power, simplify_with, step::Step},
    step_collector::StepCollector,
};

/// `a^0 = 1`
pub fn power_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |_, exp| {
        exp.as_number()
            .filter(|n| is_zero(*n))
            .map(|_| Expr::Number(1.0))
    })?;

    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// `a^1 = a`
pub fn power_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |base, exp| {
        exp.as_number()
            .filter(|n| is_one(*n))
            .map(|_| base.clone())
    })?;

    step_collector.push(Step::PowerOne);
    Some(opt)
}

/// `0^a = 0`, if `a` is a positive number
pub fn zero_base(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |base, exp| {
        let base_is_zero = base.as_number().map_or(false, is_zero);
        let exp_is_positive = exp.as_number().map_or(false, |n| n > 0.0);
        (base_is_zero && exp_is_positive).then(|| Expr::Number(0.0))
    })?;

    step_collector.push(Step::ZeroBase);
    Some(opt)
}

/// `1^a = 1`
pub fn one_base(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |base, _| {
        base.as_number()
            .filter(|n| is_one(*n))
            .map(|_| Expr::Number(1.0))
    })?;

    step_collector.push(Step::OneBase);
    Some(opt)
}

/// `(a^b)^c = a^(bc)`
///
/// The new exponent is simplified along with the resulting power.
pub fn power_of_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let Expr::Exp(base, exp) = expr else {
        return None;
    };
    let Expr::Exp(inner_base, inner_exp) = &**base else {
        return None;
    };

    step_collector.push(Step::PowerOfPower);
    let combined = Expr::pow(
        (**inner_base).clone(),
        Expr::Mul(vec![(**inner_exp).clone(), (**exp).clone()]),
    );
    Some(simplify_with(&combined, step_collector))
}

/// Evaluates a power of two numbers, if the result is a finite number.
///
/// `2^3 = 8`
pub fn fold_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |base, exp| {
        let value = base.as_number()?.powf(exp.as_number()?);
        value.is_finite().then(|| Expr::Number(value))
    })?;

    step_collector.push(Step::FoldPower);
    Some(opt)
}

/// Applies all power rules, in order.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    power_zero(expr, step_collector)
        .or_else(|| power_one(expr, step_collector))
        .or_else(|| zero_base(expr, step_collector))
        .or_else(|| one_base(expr, step_collector))
        .or_else(|| power_of_power(expr, step_collector))
        .or_else(|| fold_power(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::symbol("x")
    }

    #[test]
    fn identities() {
        assert_eq!(power_zero(&Expr::pow(x(), Expr::Number(0.0)), &mut ()), Some(Expr::Number(1.0)));
        assert_eq!(power_one(&Expr::pow(x(), Expr::Number(1.0)), &mut ()), Some(x()));
        assert_eq!(zero_base(&Expr::pow(Expr::Number(0.0), Expr::Number(3.0)), &mut ()), Some(Expr::Number(0.0)));
        assert_eq!(zero_base(&Expr::pow(Expr::Number(0.0), Expr::Number(-1.0)), &mut ()), None);
        assert_eq!(one_base(&Expr::pow(Expr::Number(1.0), x()), &mut ()), Some(Expr::Number(1.0)));
    }

    #[test]
    fn nested_power() {
        let expr = Expr::pow(Expr::pow(x(), Expr::Number(2.0)), Expr::Number(3.0));
        let mut steps: Vec<Step> = Vec::new();
        assert_eq!(
            power_of_power(&expr, &mut steps),
            Some(Expr::pow(x(), Expr::Number(6.0))),
        );
        assert_eq!(steps, vec![Step::PowerOfPower, Step::FoldFactors]);
    }

    #[test]
    fn numeric_power() {
        assert_eq!(fold_power(&Expr::pow(Expr::Number(2.0), Expr::Number(3.0)), &mut ()), Some(Expr::Number(8.0)));
        assert_eq!(fold_power(&Expr::pow(Expr::Number(0.0), Expr::Number(-1.0)), &mut ()), None);
        assert_eq!(fold_power(&Expr::pow(Expr::Number(-8.0), Expr::Number(0.5)), &mut ()), None);
    }
}
