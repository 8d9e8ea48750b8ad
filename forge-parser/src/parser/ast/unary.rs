use crate::{
    parser::{ast::expr::{parse_operand, Expr}, error::UnexpectedToken, Parse, Parser},
    tokenizer::TokenKind,
};
use forge_error::Error;
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A negated operand, such as `-x`.
///
/// Negation applies to a single operand, so it binds tighter than every binary operator:
/// `-x^2` is parsed as `(-x)^2`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    /// The operand being negated.
    pub operand: Box<Expr>,

    /// The span of the `-` sign.
    pub op_span: Range<usize>,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Parse for Unary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let op = input.next_token()?;
        if op.kind != TokenKind::Sub {
            return Err(Error::new(vec![op.span], UnexpectedToken {
                expected: &[TokenKind::Sub],
                found: op.kind,
            }));
        }

        let operand = parse_operand(input)?;
        let span = op.span.start..operand.span().end;
        Ok(Self {
            operand: Box::new(operand),
            op_span: op.span,
            span,
        })
    }
}

impl fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "-{}", self.operand)
    }
}
