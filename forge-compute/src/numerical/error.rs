//! Error kinds that can occur during evaluation.
//!
//! Evaluation works on expressions without source spans, so these errors are always spanless.

use ariadne::Fmt;
use forge_attrs::ErrorKind;
use forge_error::{ErrorKind, EXPR};

/// A symbol has no value in the evaluation environment.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("no value was given for the variable `{}`", self.name),
    help = format!("provide a value for it, for example: {}", format!("{}=1", self.name).fg(EXPR)),
)]
pub struct UnboundVariable {
    /// The name of the variable.
    pub name: String,
}

/// A function was applied to an argument outside of its real domain, or an operation has no finite
/// real value.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is undefined for the argument {}", self.function, self.argument),
    help = match self.function {
        "log" => "the argument of `log` must be positive",
        "sqrt" => "the argument of `sqrt` must not be negative",
        "pow" => "the base and exponent must give a finite real result",
        "add" | "mul" => "the operands are too large to give a finite result",
        _ => "the result of the function is not a finite real number",
    },
)]
pub struct DomainError {
    /// The name of the function, or `pow`, `add` or `mul` for operators.
    pub function: &'static str,

    /// The offending argument. For powers this is the base, and for sums and products it is the
    /// non-finite result.
    pub argument: f64,
}
