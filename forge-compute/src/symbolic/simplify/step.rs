use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single rule applied by the simplifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Step {
    /// `(a+b)+c = a+b+c`
    FlattenAdd,

    /// `2+x+3 = x+5`
    /// `x+0 = x`
    FoldTerms,

    /// `2x+3x = 5x`
    /// `x-x = 0`
    CombineLikeTerms,

    /// `(ab)c = abc`
    FlattenMul,

    /// `2*x*3 = 6x`
    /// `1*x = x`
    FoldFactors,

    /// `0*x = 0`
    MultiplyZero,

    /// `x*x^2 = x^3`
    CombineLikeFactors,

    /// `a^0 = 1`
    PowerZero,

    /// `a^1 = a`
    PowerOne,

    /// `0^a = 0`, for positive `a`
    ZeroBase,

    /// `1^a = 1`
    OneBase,

    /// `(a^b)^c = a^(bc)`
    PowerOfPower,

    /// `2^3 = 8`
    FoldPower,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let description = match self {
            Step::FlattenAdd => "flatten nested sums",
            Step::FoldTerms => "fold constant terms",
            Step::CombineLikeTerms => "combine like terms",
            Step::FlattenMul => "flatten nested products",
            Step::FoldFactors => "fold constant factors",
            Step::MultiplyZero => "multiply by zero",
            Step::CombineLikeFactors => "combine like factors",
            Step::PowerZero => "raise to the zeroth power",
            Step::PowerOne => "raise to the first power",
            Step::ZeroBase => "raise zero to a positive power",
            Step::OneBase => "raise one to a power",
            Step::PowerOfPower => "multiply exponents of a power of a power",
            Step::FoldPower => "evaluate a numeric power",
        };
        write!(f, "{}", description)
    }
}
