use crate::{
    parser::{
        ast::{
            binary::{BinOp, BinOpKind, Binary},
            call::Call,
            literal::Literal,
            paren::Paren,
            unary::Unary,
        },
        error::{UnexpectedEof, UnexpectedToken},
        Associativity,
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use forge_error::Error;
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents any kind of expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A function call, such as `sin(x)`.
    Call(Call),

    /// A negated operand, such as `-x`.
    Unary(Unary),

    /// A binary expression, such as `1 + 2`.
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span.clone(),
            Expr::Call(call) => call.span.clone(),
            Expr::Unary(unary) => unary.span.clone(),
            Expr::Binary(binary) => binary.span.clone(),
        }
    }

    /// If this expression is an [`Expr::Paren`], returns the innermost expression in the
    /// parenthesized expression. Otherwise, returns `self`.
    pub fn innermost(&self) -> &Expr {
        let mut inner = self;
        while let Expr::Paren(paren) = inner {
            inner = &paren.expr;
        }
        inner
    }
}

/// Parses a single operand: a literal, a function call, a parenthesized expression, or a negated
/// operand.
pub(crate) fn parse_operand(input: &mut Parser) -> Result<Expr, Error> {
    match input.peek_kind() {
        Some(TokenKind::Name) if input.peek_kind_at(1) == Some(TokenKind::OpenParen) => {
            input.try_parse().map(Expr::Call)
        },
        Some(TokenKind::Name | TokenKind::Number) => input.try_parse().map(Expr::Literal),
        Some(TokenKind::OpenParen) => input.try_parse().map(Expr::Paren),
        Some(TokenKind::Sub) => input.try_parse().map(Expr::Unary),
        Some(found) => Err(input.error(UnexpectedToken {
            expected: &[TokenKind::Number, TokenKind::Name, TokenKind::OpenParen, TokenKind::Sub],
            found,
        })),
        None => Err(input.error(UnexpectedEof)),
    }
}

/// Parses an expression whose binary operators all have at least the given precedence, using
/// precedence climbing.
fn parse_expr(input: &mut Parser, min_precedence: Precedence) -> Result<Expr, Error> {
    let mut lhs = parse_operand(input)?;

    while let Some(kind) = input.peek_kind().and_then(BinOpKind::from_token) {
        let precedence = kind.precedence();
        if precedence < min_precedence {
            break;
        }

        let op = input.next_token()?;
        let next_precedence = match kind.associativity() {
            Associativity::Left => precedence.next(),
            Associativity::Right => precedence,
        };
        let rhs = parse_expr(input, next_precedence)?;
        let span = lhs.span().start..rhs.span().end;
        lhs = Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op: BinOp { kind, span: op.span },
            rhs: Box::new(rhs),
            span,
        });
    }

    Ok(lhs)
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        parse_expr(input, Precedence::Any)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt(f),
            Expr::Paren(paren) => paren.fmt(f),
            Expr::Call(call) => call.fmt(f),
            Expr::Unary(unary) => unary.fmt(f),
            Expr::Binary(binary) => binary.fmt(f),
        }
    }
}
