pub mod ast;
pub mod error;

use error::{ExpectedEof, UnexpectedEof};
use forge_error::{Error, ErrorKind};
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// A high-level parser for algebraic expressions. This is the type to use to parse an arbitrary
/// piece of text into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing. Whitespace is already removed.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    ///
    /// Tokenization happens eagerly, so this fails if the source contains a character that does
    /// not begin any token.
    pub fn new(source: &'source str) -> Result<Self, Error> {
        Ok(Self {
            tokens: tokenize_complete(source)?,
            cursor: 0,
        })
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the current token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the end of the stream.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Returns the kind of the current token without moving the cursor.
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.current_token().map(|token| token.kind)
    }

    /// Returns the kind of the token `offset` positions after the current one, without moving the
    /// cursor.
    pub fn peek_kind_at(&self, offset: usize) -> Option<TokenKind> {
        self.tokens.get(self.cursor + offset).map(|token| token.kind)
    }

    /// Returns the next token to be parsed, then advances the cursor.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        match self.tokens.get(self.cursor) {
            Some(token) => {
                self.cursor += 1;
                // cloning is cheap: only Range<_> is cloned
                Ok(token.clone())
            },
            None => Err(self.error(UnexpectedEof)),
        }
    }

    /// Advances the cursor past the current token if it has the given kind, returning it.
    pub fn next_if(&mut self, kind: TokenKind) -> Option<Token<'source>> {
        let token = self.current_token().filter(|token| token.kind == kind)?.clone();
        self.cursor += 1;
        Some(token)
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Speculatively parses a value from the given stream of tokens.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        match self.current_token() {
            None => Ok(value),
            Some(token) => {
                let span = token.span.start..self.eof_span().end;
                Err(Error::new(vec![span], ExpectedEof { found: token.kind }))
            },
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The associativity of a binary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// `a op b op c` is evaluated as `a op (b op c)`.
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// The precedence of addition and subtraction.
    Term,

    /// The precedence of multiplication and division.
    Factor,

    /// The precedence of exponentiation.
    Exp,

    /// The precedence of unary negation. It binds tighter than exponentiation, so `-x^2` is
    /// `(-x)^2`.
    Neg,

    /// The precedence of literals, calls, and parenthesized expressions.
    Primary,
}

impl Precedence {
    /// Returns the next higher precedence level.
    pub fn next(self) -> Self {
        match self {
            Self::Any => Self::Term,
            Self::Term => Self::Factor,
            Self::Factor => Self::Exp,
            Self::Exp => Self::Neg,
            Self::Neg | Self::Primary => Self::Primary,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use super::ast::{
        binary::{BinOp, BinOpKind, Binary},
        call::{Call, Func},
        expr::Expr,
        literal::{LitNum, LitSym, Literal},
        paren::Paren,
        unary::Unary,
    };
    use super::error::{UnclosedParenthesis, UnexpectedToken, UnknownFunction};

    fn parse(input: &str) -> Result<Expr, Error> {
        Parser::new(input)?.try_parse_full::<Expr>()
    }

    fn num(value: f64, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Number(LitNum { value, span }))
    }

    fn sym(name: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Symbol(LitSym { name: name.to_string(), span }))
    }

    fn binary(lhs: Expr, kind: BinOpKind, op_span: Range<usize>, rhs: Expr) -> Expr {
        let span = lhs.span().start..rhs.span().end;
        Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op: BinOp { kind, span: op_span },
            rhs: Box::new(rhs),
            span,
        })
    }

    #[test]
    fn literal_number() {
        assert_eq!(parse("16.5").unwrap(), num(16.5, 0..4));
    }

    #[test]
    fn precedence() {
        let expr = parse("1 + 2 * x").unwrap();
        assert_eq!(expr, binary(
            num(1.0, 0..1),
            BinOpKind::Add,
            2..3,
            binary(num(2.0, 4..5), BinOpKind::Mul, 6..7, sym("x", 8..9)),
        ));
    }

    #[test]
    fn left_associative() {
        let expr = parse("a - b - c").unwrap();
        assert_eq!(expr, binary(
            binary(sym("a", 0..1), BinOpKind::Sub, 2..3, sym("b", 4..5)),
            BinOpKind::Sub,
            6..7,
            sym("c", 8..9),
        ));
    }

    #[test]
    fn right_associative_power() {
        let expr = parse("x^y^z").unwrap();
        assert_eq!(expr, binary(
            sym("x", 0..1),
            BinOpKind::Exp,
            1..2,
            binary(sym("y", 2..3), BinOpKind::Exp, 3..4, sym("z", 4..5)),
        ));
    }

    #[test]
    fn unary_binds_tighter_than_power() {
        let expr = parse("-x^2").unwrap();
        let neg = Expr::Unary(Unary {
            operand: Box::new(sym("x", 1..2)),
            op_span: 0..1,
            span: 0..2,
        });
        assert_eq!(expr, binary(neg, BinOpKind::Exp, 2..3, num(2.0, 3..4)));
    }

    #[test]
    fn function_call() {
        let expr = parse("sqrt(x)").unwrap();
        assert_eq!(expr, Expr::Call(Call {
            func: Func::Sqrt,
            arg: Box::new(sym("x", 5..6)),
            span: 0..7,
            paren_span: 4..7,
        }));
    }

    #[test]
    fn parenthesized() {
        let expr = parse("(x)").unwrap();
        assert_eq!(expr, Expr::Paren(Paren {
            expr: Box::new(sym("x", 1..2)),
            span: 0..3,
        }));
        assert_eq!(expr.innermost(), &sym("x", 1..2));
    }

    #[test]
    fn missing_right_paren() {
        let err = parse("x+(2").unwrap_err();
        assert!(err.is::<UnclosedParenthesis>());
        assert_eq!(err.spans, vec![2..3]);
    }

    #[test]
    fn unknown_function() {
        let err = parse("sinn(x)").unwrap_err();
        let kind = err.downcast_ref::<UnknownFunction>().unwrap();
        assert_eq!(kind.name, "sinn");
        assert_eq!(kind.suggestions, vec!["sin"]);
        assert_eq!(err.spans, vec![0..4]);
    }

    #[test]
    fn trailing_tokens() {
        let err = parse("2 x").unwrap_err();
        assert_eq!(
            err.downcast_ref::<ExpectedEof>(),
            Some(&ExpectedEof { found: TokenKind::Name }),
        );
        assert_eq!(err.spans, vec![2..3]);
    }

    #[test]
    fn unexpected_token() {
        let err = parse("x + * 2").unwrap_err();
        assert_eq!(err.downcast_ref::<UnexpectedToken>().map(|k| k.found), Some(TokenKind::Mul));
    }

    #[test]
    fn unexpected_eof() {
        let err = parse("x ^").unwrap_err();
        assert!(err.is::<UnexpectedEof>());
        assert_eq!(err.spans, vec![3..3]);
    }
}
