mod command;
mod config;
mod error;
mod session;

use command::Command;
use config::Config;
use error::report_to_stderr;
use rustyline::{error::ReadlineError, DefaultEditor};
use session::Session;
use std::{
    error::Error,
    fs::File,
    io::{self, BufRead, BufReader, IsTerminal},
    ops::ControlFlow,
    process::ExitCode,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Installs a subscriber that logs to stderr, filtered by the `FORGE_LOG` environment variable.
fn init_logging() {
    let filter = EnvFilter::try_from_env("FORGE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Parses and runs a single line, printing the output or reporting the failure.
fn execute(session: &Session, line: &str) -> ControlFlow<()> {
    if line.trim().is_empty() {
        return ControlFlow::Continue(());
    }

    let command = match Command::parse(line) {
        Ok(command) => command,
        Err(err) => {
            report_to_stderr(&err, line);
            return ControlFlow::Continue(());
        },
    };
    debug!(?command, "running command");

    if matches!(command, Command::Exit) {
        return ControlFlow::Break(());
    }

    match session.run(&command) {
        Ok(lines) => lines.iter().for_each(|line| println!("{}", line)),
        Err(err) => report_to_stderr(&err, command.source().unwrap_or(line)),
    }
    ControlFlow::Continue(())
}

/// Runs every line from the reader, stopping early at `exit`.
fn execute_lines(session: &Session, reader: impl BufRead) -> io::Result<()> {
    for line in reader.lines() {
        if execute(session, &line?).is_break() {
            break;
        }
    }
    Ok(())
}

/// Runs the interactive prompt until end of input or `exit`.
fn repl(session: &Session) -> Result<(), ReadlineError> {
    let mut rl = DefaultEditor::new()?;

    loop {
        let input = match rl.readline("forge> ") {
            Ok(input) => input,
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => return Ok(()),
            Err(err) => return Err(err),
        };
        if input.trim().is_empty() {
            continue;
        }

        rl.add_history_entry(&input)?;
        if execute(session, &input).is_break() {
            return Ok(());
        }
    }
}

fn main() -> ExitCode {
    init_logging();

    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        },
    };
    debug!(?config, "starting");
    let session = Session::new(config.clone());

    let result: Result<(), Box<dyn Error>> = if let Some(path) = &config.file {
        // run commands from a file
        File::open(path)
            .and_then(|file| execute_lines(&session, BufReader::new(file)))
            .map_err(Into::into)
    } else if !io::stdin().is_terminal() {
        // run commands piped into stdin
        execute_lines(&session, io::stdin().lock()).map_err(Into::into)
    } else {
        // run the repl / interactive mode
        repl(&session).map_err(Into::into)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        },
    }
}
