use ariadne::{Fmt, Source};
use forge_attrs::ErrorKind;
use forge_error::{Error, ErrorKind, EXPR};

/// The first word of the line is not a command.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown command `{}`", self.name),
    help = format!("type {} to see the list of commands", "help".fg(EXPR)),
)]
pub struct UnknownCommand {
    /// The unrecognized command name.
    pub name: String,
}

/// A command that operates on an expression was given none.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the `{}` command needs an expression", self.command),
    help = format!("for example: {}", format!("{} x^2 + 1", self.command).fg(EXPR)),
)]
pub struct MissingExpression {
    /// The name of the command.
    pub command: &'static str,
}

/// A variable assignment given to `eval` is malformed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot read `{}` as a variable assignment", self.text),
    help = format!("assignments look like: {}", "x=2".fg(EXPR)),
)]
pub struct InvalidAssignment {
    /// The text of the assignment.
    pub text: String,
}

/// A command-line flag is not recognized.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown flag `{}`", self.flag),
    help = "the supported flags are `--var <name>` and `--no-latex`",
)]
pub struct UnknownFlag {
    /// The flag as written.
    pub flag: String,
}

/// A command-line flag that takes a value was given none.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = format!("the `{}` flag needs a value", self.flag))]
pub struct MissingFlagValue {
    /// The flag as written.
    pub flag: &'static str,
}

/// Report the error to stderr, pointing into the given input.
///
/// The `ariadne` crate's [`Report`](ariadne::Report) type does not have a `Display`
/// implementation, so we can only use its `eprint` method to print to stderr.
pub fn report_to_stderr(err: &Error, input: &str) {
    let report = err.build_report("input");
    if report.eprint(("input", Source::from(input))).is_err() {
        // stderr is gone; the plain message is the best we can do
        eprintln!("error: {}", err);
    }
}
