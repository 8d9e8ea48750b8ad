use forge_compute::{
    differentiate,
    integrate,
    parse,
    render,
    rewrite,
    simplify,
    simplify_with_steps,
    solve,
    Error,
    Expr,
    RuleTable,
};
use std::collections::HashMap;
use super::{command::Command, config::Config, error::InvalidAssignment};

const HELP: &str = "\
commands:
  simplify <expr>              simplify the expression
  latex <expr>                 render the simplified expression as LaTeX
  diff <expr>[, var]           differentiate, then simplify
  integrate <expr>[, var]      integrate, then simplify
  solve <expr>[, var]          solve <expr> = 0
  eval <expr>[, name=value]*   evaluate numerically
  rewrite <expr>               apply the standard rewrite rules, then simplify
  steps <expr>                 simplify, listing every rule applied
  help                         show this message
  exit, quit                   leave

examples:
  simplify x^2 + 2*x + x
  diff sin(t) * t, t
  solve x^2 - 4
  eval x^2 + 1, x=2";

/// Parses a `name=value` assignment.
fn parse_assignment(text: &str) -> Result<(String, f64), Error> {
    let invalid = || Error::spanless(InvalidAssignment { text: text.to_string() });
    let (name, value) = text.split_once('=').ok_or_else(invalid)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid());
    }
    let value = value.trim().parse::<f64>().map_err(|_| invalid())?;
    Ok((name.to_string(), value))
}

/// Runs commands according to a [`Config`].
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: Config,
}

impl Session {
    /// Creates a session with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Formats an expression result, followed by its LaTeX form if enabled.
    fn result(&self, expr: &Expr) -> Vec<String> {
        let mut lines = vec![format!("result: {}", expr)];
        if self.config.latex {
            lines.push(format!("latex: {}", render(expr)));
        }
        lines
    }

    /// Runs the command, returning the lines of output.
    pub fn run(&self, command: &Command) -> Result<Vec<String>, Error> {
        let var = |var: &Option<&str>| var.unwrap_or(&self.config.var).to_string();

        match command {
            Command::Simplify(expr) => Ok(self.result(&simplify(&parse(expr)?))),
            Command::Latex(expr) => Ok(vec![format!("latex: {}", render(&simplify(&parse(expr)?)))]),
            Command::Diff { expr, var: name } => {
                let derivative = differentiate(&parse(expr)?, &var(name));
                Ok(self.result(&simplify(&derivative)))
            },
            Command::Integrate { expr, var: name } => {
                Ok(self.result(&integrate(&parse(expr)?, &var(name))))
            },
            Command::Solve { expr, var: name } => {
                let solutions = solve(&parse(expr)?, &var(name));
                if solutions.is_empty() {
                    return Ok(vec!["result: no solution found".to_string()]);
                }

                let join = |f: fn(&Expr) -> String| {
                    solutions.iter().map(f).collect::<Vec<_>>().join(", ")
                };
                let mut lines = vec![format!("result: {}", join(|s| s.to_string()))];
                if self.config.latex {
                    lines.push(format!("latex: {}", join(render)));
                }
                Ok(lines)
            },
            Command::Eval { expr, assignments } => {
                let values = assignments.iter()
                    .map(|text| parse_assignment(text))
                    .collect::<Result<HashMap<_, _>, _>>()?;
                let value = parse(expr)?.eval(&values)?;
                Ok(vec![format!("result: {}", value)])
            },
            Command::Rewrite(expr) => {
                let rewritten = rewrite(&simplify(&parse(expr)?), &RuleTable::standard());
                Ok(self.result(&simplify(&rewritten)))
            },
            Command::Steps(expr) => {
                let (simplified, steps) = simplify_with_steps(&parse(expr)?);
                let mut lines = self.result(&simplified);
                if steps.is_empty() {
                    lines.push("already simplified".to_string());
                } else {
                    lines.push("steps:".to_string());
                    lines.extend(steps.iter()
                        .enumerate()
                        .map(|(i, step)| format!("  {}. {}", i + 1, step)));
                }
                Ok(lines)
            },
            Command::Help => Ok(HELP.lines().map(str::to_string).collect()),
            Command::Exit => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use forge_compute::numerical::error::UnboundVariable;
    use pretty_assertions::assert_eq;
    use super::*;

    fn output(line: &str) -> Vec<String> {
        Session::default().run(&Command::parse(line).unwrap()).unwrap()
    }

    #[test]
    fn simplify_with_latex() {
        assert_eq!(output("simplify x + 2*x + x"), vec!["result: 4 * x", "latex: 4 \\cdot x"]);
    }

    #[test]
    fn no_latex() {
        let session = Session::new(Config { latex: false, ..Config::default() });
        let lines = session.run(&Command::parse("diff x^2 + 3*x + 1").unwrap()).unwrap();
        assert_eq!(lines, vec!["result: 2 * x + 3"]);
    }

    #[test]
    fn default_variable() {
        let session = Session::new(Config { var: "t".to_string(), latex: false, file: None });
        let lines = session.run(&Command::parse("solve 2*t - 6").unwrap()).unwrap();
        assert_eq!(lines, vec!["result: 3"]);
    }

    #[test]
    fn solve_lists_solutions() {
        assert_eq!(output("solve x^2 - 4"), vec!["result: 2, -2", "latex: 2, -2"]);
        assert_eq!(output("solve x^2 + 1"), vec!["result: no solution found"]);
    }

    #[test]
    fn eval_values() {
        assert_eq!(output("eval x^2 + 2*x + 1, x=3"), vec!["result: 16"]);

        let err = Session::default()
            .run(&Command::parse("eval x + y, x=1").unwrap())
            .unwrap_err();
        assert!(err.is::<UnboundVariable>());

        let err = Session::default()
            .run(&Command::parse("eval x, x:1").unwrap())
            .unwrap_err();
        assert!(err.is::<InvalidAssignment>());
    }

    #[test]
    fn rewrite_identity() {
        assert_eq!(output("rewrite 2 * (sin(x)^2 + cos(x)^2)"), vec!["result: 2", "latex: 2"]);
    }

    #[test]
    fn steps_are_listed() {
        assert_eq!(output("steps x + x + 0"), vec![
            "result: 2 * x",
            "latex: 2 \\cdot x",
            "steps:",
            "  1. combine like terms",
            "  2. fold constant terms",
        ]);
        assert_eq!(output("steps x"), vec!["result: x", "latex: x", "already simplified"]);
    }

    #[test]
    fn parse_errors_propagate() {
        let err = Session::default().run(&Command::parse("simplify x + (2").unwrap()).unwrap_err();
        assert_eq!(err.spans, vec![4..5]);
    }
}
