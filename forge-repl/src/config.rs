use forge_error::Error;
use std::path::PathBuf;
use super::error::{MissingFlagValue, UnknownFlag};

/// Options read from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// The variable used by `diff`, `integrate`, and `solve` when none is given.
    pub var: String,

    /// Whether results are echoed as LaTeX.
    pub latex: bool,

    /// A file of commands to run instead of reading from stdin.
    pub file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            var: "x".to_string(),
            latex: true,
            file: None,
        }
    }
}

impl Config {
    /// Builds the configuration from the command-line arguments, excluding the program name.
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Result<Self, Error> {
        let mut config = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--var" => {
                    config.var = args.next()
                        .ok_or_else(|| Error::spanless(MissingFlagValue { flag: "--var" }))?;
                },
                "--no-latex" => config.latex = false,
                flag if flag.starts_with("--") => {
                    return Err(Error::spanless(UnknownFlag { flag: flag.to_string() }));
                },
                _ => config.file = Some(PathBuf::from(arg)),
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn defaults() {
        assert_eq!(Config::from_args(args(&[])).unwrap(), Config::default());
    }

    #[test]
    fn flags_and_file() {
        let config = Config::from_args(args(&["--var", "t", "session.txt", "--no-latex"])).unwrap();
        assert_eq!(config, Config {
            var: "t".to_string(),
            latex: false,
            file: Some(PathBuf::from("session.txt")),
        });
    }

    #[test]
    fn bad_flags() {
        assert!(Config::from_args(args(&["--var"])).unwrap_err().is::<MissingFlagValue>());
        assert!(Config::from_args(args(&["--verbose"])).unwrap_err().is::<UnknownFlag>());
    }
}
