use forge_error::Error;
use super::error::{MissingExpression, UnknownCommand};

/// A single line of input, parsed into a command and its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Command<'a> {
    /// `simplify <expr>`
    Simplify(&'a str),

    /// `latex <expr>`
    Latex(&'a str),

    /// `diff <expr>[, var]`
    Diff { expr: &'a str, var: Option<&'a str> },

    /// `integrate <expr>[, var]`
    Integrate { expr: &'a str, var: Option<&'a str> },

    /// `solve <expr>[, var]`
    Solve { expr: &'a str, var: Option<&'a str> },

    /// `eval <expr>[, name=value]*`
    Eval { expr: &'a str, assignments: Vec<&'a str> },

    /// `rewrite <expr>`
    Rewrite(&'a str),

    /// `steps <expr>`
    Steps(&'a str),

    /// `help`
    Help,

    /// `exit` or `quit`
    Exit,
}

/// Splits `expr, var` into its parts. An empty variable counts as no variable.
fn split_var(text: &str) -> (&str, Option<&str>) {
    match text.rsplit_once(',') {
        Some((expr, var)) => {
            let var = var.trim();
            (expr.trim(), (!var.is_empty()).then_some(var))
        },
        None => (text, None),
    }
}

impl<'a> Command<'a> {
    /// Parses a line of input.
    pub fn parse(line: &'a str) -> Result<Self, Error> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let expr = |command: &'static str| {
            if rest.is_empty() {
                Err(Error::spanless(MissingExpression { command }))
            } else {
                Ok(rest)
            }
        };

        match name {
            "simplify" => Ok(Self::Simplify(expr("simplify")?)),
            "latex" => Ok(Self::Latex(expr("latex")?)),
            "diff" => {
                let (expr, var) = split_var(expr("diff")?);
                Ok(Self::Diff { expr, var })
            },
            "integrate" => {
                let (expr, var) = split_var(expr("integrate")?);
                Ok(Self::Integrate { expr, var })
            },
            "solve" => {
                let (expr, var) = split_var(expr("solve")?);
                Ok(Self::Solve { expr, var })
            },
            "eval" => {
                let text = expr("eval")?;
                let (expr, assignments) = match text.split_once(',') {
                    Some((expr, rest)) => (expr.trim(), rest.split(',').map(str::trim).collect()),
                    None => (text, Vec::new()),
                };
                Ok(Self::Eval { expr, assignments })
            },
            "rewrite" => Ok(Self::Rewrite(expr("rewrite")?)),
            "steps" => Ok(Self::Steps(expr("steps")?)),
            "help" => Ok(Self::Help),
            "exit" | "quit" => Ok(Self::Exit),
            _ => Err(Error::spanless(UnknownCommand { name: name.to_string() })),
        }
    }

    /// Returns the expression text the command operates on, if any.
    pub fn source(&self) -> Option<&'a str> {
        match self {
            Self::Simplify(expr)
            | Self::Latex(expr)
            | Self::Rewrite(expr)
            | Self::Steps(expr)
            | Self::Diff { expr, .. }
            | Self::Integrate { expr, .. }
            | Self::Solve { expr, .. }
            | Self::Eval { expr, .. } => Some(expr),
            Self::Help | Self::Exit => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn expression_commands() {
        assert_eq!(Command::parse("simplify x + x").unwrap(), Command::Simplify("x + x"));
        assert_eq!(Command::parse("  steps   2*x  ").unwrap(), Command::Steps("2*x"));
        assert_eq!(Command::parse("quit").unwrap(), Command::Exit);
    }

    #[test]
    fn optional_variable() {
        assert_eq!(
            Command::parse("diff t^2 + y, t").unwrap(),
            Command::Diff { expr: "t^2 + y", var: Some("t") },
        );
        assert_eq!(
            Command::parse("solve x^2 - 4").unwrap(),
            Command::Solve { expr: "x^2 - 4", var: None },
        );
        assert_eq!(
            Command::parse("integrate x,").unwrap(),
            Command::Integrate { expr: "x", var: None },
        );
    }

    #[test]
    fn eval_assignments() {
        assert_eq!(
            Command::parse("eval x + y, x=1, y = 2").unwrap(),
            Command::Eval { expr: "x + y", assignments: vec!["x=1", "y = 2"] },
        );
        assert_eq!(
            Command::parse("eval 2^10").unwrap(),
            Command::Eval { expr: "2^10", assignments: vec![] },
        );
    }

    #[test]
    fn errors() {
        assert!(Command::parse("simplify").unwrap_err().is::<MissingExpression>());
        assert!(Command::parse("factor x^2").unwrap_err().is::<UnknownCommand>());
    }
}
