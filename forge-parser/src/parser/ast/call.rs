use crate::{
    parser::{
        ast::{expr::Expr, paren::close_paren},
        error::{UnexpectedToken, UnknownFunction},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use forge_error::Error;
use levenshtein::levenshtein;
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The functions that can be called in an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Exp,
    Ln,
    Sqrt,
}

impl Func {
    /// Every callable function, in the order they are listed to the user.
    pub const ALL: [Func; 6] = [Func::Sin, Func::Cos, Func::Tan, Func::Exp, Func::Ln, Func::Sqrt];

    /// Returns the name used to call the function in source code.
    pub fn name(self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Exp => "exp",
            Func::Ln => "log",
            Func::Sqrt => "sqrt",
        }
    }

    /// Resolves a function from its name in source code.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|func| func.name() == name)
    }

    /// Returns the names of known functions that are spelled similarly to the given name.
    pub fn suggestions(name: &str) -> Vec<&'static str> {
        Self::ALL
            .into_iter()
            .map(Func::name)
            .filter(|candidate| levenshtein(candidate, name) <= 2)
            .collect()
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A function call, such as `sin(x)`. Every function takes exactly one argument.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The function being called.
    pub func: Func,

    /// The argument to the function.
    pub arg: Box<Expr>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,

    /// The span of the parentheses that surround the argument.
    pub paren_span: Range<usize>,
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.next_token()?;
        if name.kind != TokenKind::Name {
            return Err(Error::new(vec![name.span], UnexpectedToken {
                expected: &[TokenKind::Name],
                found: name.kind,
            }));
        }

        let open_paren = input.next_if(TokenKind::OpenParen)
            .ok_or_else(|| input.error(UnexpectedToken {
                expected: &[TokenKind::OpenParen],
                found: input.peek_kind().unwrap_or(TokenKind::Name),
            }))?;

        let func = Func::from_name(name.lexeme)
            .ok_or_else(|| Error::new(vec![name.span.clone()], UnknownFunction {
                name: name.lexeme.to_owned(),
                suggestions: Func::suggestions(name.lexeme),
            }))?;

        let arg = input.try_parse::<Expr>()?;
        let close_span = close_paren(input, &open_paren.span)?;
        Ok(Self {
            func,
            arg: Box::new(arg),
            span: name.span.start..close_span.end,
            paren_span: open_paren.span.start..close_span.end,
        })
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({})", self.func, self.arg)
    }
}
