use crate::{
    parser::{ast::expr::Expr, error::{UnclosedParenthesis, UnexpectedToken}, Parse, Parser},
    tokenizer::TokenKind,
};
use forge_error::Error;
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parenthesized expression. A [`Paren`] can only contain a single expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this [`Paren`] was parsed from.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the innermost expression in the parenthesized expression.
    pub fn innermost(&self) -> &Expr {
        let mut inner = &self.expr;
        while let Expr::Paren(paren) = inner.as_ref() {
            inner = &paren.expr;
        }
        inner
    }

    /// Returns the innermost expression in the parenthesized expression, consuming the [`Paren`].
    pub fn into_innermost(self) -> Expr {
        let mut inner = self.expr;
        while let Expr::Paren(paren) = *inner {
            inner = paren.expr;
        }
        *inner
    }
}

/// Parses the closing parenthesis that matches the opening parenthesis at `open_span`, returning
/// the span of the closing parenthesis.
///
/// Reaching the end of the input reports [`UnclosedParenthesis`] at the opening parenthesis;
/// any other token is reported as unexpected.
pub(crate) fn close_paren(input: &mut Parser, open_span: &Range<usize>) -> Result<Range<usize>, Error> {
    if let Some(token) = input.next_if(TokenKind::CloseParen) {
        return Ok(token.span);
    }

    match input.current_token() {
        Some(token) => Err(Error::new(vec![token.span.clone()], UnexpectedToken {
            expected: &[TokenKind::CloseParen],
            found: token.kind,
        })),
        None => Err(Error::new(vec![open_span.clone()], UnclosedParenthesis)),
    }
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open_paren = input.next_token()?;
        if open_paren.kind != TokenKind::OpenParen {
            return Err(Error::new(vec![open_paren.span], UnexpectedToken {
                expected: &[TokenKind::OpenParen],
                found: open_paren.kind,
            }));
        }

        let expr = input.try_parse::<Expr>()?;
        let close_span = close_paren(input, &open_paren.span)?;
        Ok(Self {
            expr: Box::new(expr),
            span: open_paren.span.start..close_span.end,
        })
    }
}

impl fmt::Display for Paren {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})", self.expr)
    }
}
