use crate::symbolic::expr::{Expr, Func};
use forge_error::Error;
use std::collections::HashMap;
use super::error::{DomainError, UnboundVariable};

/// Returns a [`DomainError`] for the function and argument.
fn domain_error(function: &'static str, argument: f64) -> Error {
    Error::spanless(DomainError { function, argument })
}

/// Returns the value if it is finite, or a [`DomainError`] for the operation otherwise.
fn finite(value: f64, function: &'static str, argument: f64) -> Result<f64, Error> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(domain_error(function, argument))
    }
}

/// Applies a builtin function to a number.
fn eval_call(func: Func, arg: f64) -> Result<f64, Error> {
    let value = match func {
        Func::Sin => arg.sin(),
        Func::Cos => arg.cos(),
        Func::Tan => arg.tan(),
        Func::Exp => arg.exp(),
        Func::Ln if arg <= 0.0 => return Err(domain_error("log", arg)),
        Func::Ln => arg.ln(),
        Func::Sqrt if arg < 0.0 => return Err(domain_error("sqrt", arg)),
        Func::Sqrt => arg.sqrt(),
    };
    finite(value, func.name(), arg)
}

impl Expr {
    /// Evaluates the expression, using the given values for its symbols.
    ///
    /// ```
    /// use forge_compute::parse;
    /// use std::collections::HashMap;
    ///
    /// let expr = parse("x^2 + 2*x + 1").unwrap();
    /// let values = HashMap::from([("x".to_string(), 3.0)]);
    /// assert_eq!(expr.eval(&values).unwrap(), 16.0);
    /// ```
    pub fn eval(&self, values: &HashMap<String, f64>) -> Result<f64, Error> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Symbol(name) => values.get(name)
                .copied()
                .ok_or_else(|| Error::spanless(UnboundVariable { name: name.clone() })),
            Self::Add(terms) => {
                let value = terms.iter().map(|term| term.eval(values)).sum::<Result<f64, _>>()?;
                finite(value, "add", value)
            },
            Self::Mul(factors) => {
                let value = factors.iter().map(|factor| factor.eval(values)).product::<Result<f64, _>>()?;
                finite(value, "mul", value)
            },
            Self::Exp(base, exp) => {
                let base = base.eval(values)?;
                finite(base.powf(exp.eval(values)?), "pow", base)
            },
            Self::Call(func, arg) => eval_call(*func, arg.eval(values)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_absolute_error_msg,
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn eval_with(input: &str, values: &[(&str, f64)]) -> Result<f64, Error> {
        let values = values.iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect();
        parse(input).unwrap().eval(&values)
    }

    #[test]
    fn polynomial() {
        assert_eq!(eval_with("x^2 + 2*x + 1", &[("x", 3.0)]).unwrap(), 16.0);
        assert_eq!(eval_with("(x - y) / 2", &[("x", 5.0), ("y", 1.0)]).unwrap(), 2.0);
        assert_eq!(eval_with("-2^2", &[]).unwrap(), 4.0);
    }

    #[test]
    fn functions() {
        assert_float_absolute_eq!(eval_with("sin(x)^2 + cos(x)^2", &[("x", 0.7)]).unwrap(), 1.0);
        assert_float_absolute_eq!(eval_with("log(exp(2))", &[]).unwrap(), 2.0);
        assert_float_absolute_eq!(eval_with("sqrt(16) + tan(0)", &[]).unwrap(), 4.0);
    }

    #[test]
    fn unbound_variable() {
        let err = eval_with("x + y", &[("x", 1.0)]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<UnboundVariable>(),
            Some(&UnboundVariable { name: "y".to_string() }),
        );
        assert!(err.spans.is_empty());
    }

    #[test]
    fn domain_errors() {
        let err = eval_with("log(x)", &[("x", 0.0)]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DomainError>(),
            Some(&DomainError { function: "log", argument: 0.0 }),
        );

        let err = eval_with("sqrt(-4)", &[]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DomainError>(),
            Some(&DomainError { function: "sqrt", argument: -4.0 }),
        );

        assert!(eval_with("0^-1", &[]).unwrap_err().is::<DomainError>());
        assert!(eval_with("(-8)^0.5", &[]).unwrap_err().is::<DomainError>());
    }

    #[test]
    fn non_finite_results() {
        let err = eval_with("sin(exp(1000))", &[]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DomainError>(),
            Some(&DomainError { function: "exp", argument: 1000.0 }),
        );
        assert!(eval_with("exp(1000) - exp(1000)", &[]).unwrap_err().is::<DomainError>());

        let err = eval_with("10^308 + 10^308", &[]).unwrap_err();
        assert_eq!(err.downcast_ref::<DomainError>().map(|err| err.function), Some("add"));

        let err = eval_with("x * 10^200", &[("x", 1e200)]).unwrap_err();
        assert_eq!(err.downcast_ref::<DomainError>().map(|err| err.function), Some("mul"));
    }
}
