//! Error kinds that can occur while tokenizing or parsing.

use ariadne::Fmt;
use forge_attrs::ErrorKind;
use forge_error::{ErrorKind, EXPR};
use crate::tokenizer::TokenKind;

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of input",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected trailing {:?} token", self.found),
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
    help = "an operator such as `*` might be missing",
)]
pub struct ExpectedEof {
    /// The first token after the complete expression.
    pub found: TokenKind,
}

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected {:?} token", self.found),
    labels = [format!("expected one of: {}", self.expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// A parenthesis was opened but never closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing right parenthesis",
    labels = ["this parenthesis is never closed"],
    help = format!("add a closing parenthesis `{}` at the end", ")".fg(EXPR)),
)]
pub struct UnclosedParenthesis;

/// A name in call position is not one of the known functions.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown function `{}`", self.name),
    labels = ["this function does not exist"],
    help = if self.suggestions.is_empty() {
        "the known functions are `sin`, `cos`, `tan`, `exp`, `log`, and `sqrt`".to_string()
    } else {
        let list = self.suggestions
            .iter()
            .map(|s| format!("`{}`", s.fg(EXPR)))
            .collect::<Vec<_>>()
            .join(", ");
        format!("did you mean: {}", list)
    },
)]
pub struct UnknownFunction {
    /// The name that was called.
    pub name: String,

    /// Known function names that are spelled similarly.
    pub suggestions: Vec<&'static str>,
}

/// No token pattern matches the character at this position.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unrecognized character `{}`", self.character),
    labels = ["I do not know what to do with this"],
)]
pub struct UnrecognizedCharacter {
    /// The offending character.
    pub character: char,
}

/// A numeric literal could not be converted to a floating-point value.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid number `{}`", self.lexeme),
    labels = ["this is not a valid number"],
)]
pub struct InvalidNumber {
    /// The raw text of the literal.
    pub lexeme: String,
}
