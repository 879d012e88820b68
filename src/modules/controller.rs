use std::io::Write;

use log::debug;

use super::args::{usage, ParsedArguments};
use super::error::PowerSourceError;
use super::exit_code::{ExitCode, PowerSourceTypeCode};
use super::power_source::{current_power_source_type, PowerSource};

/// Query, map, and report. Nothing reaches `stdout` until the code is known.
pub fn execute<S, O, E>(
    args: &ParsedArguments,
    source: &S,
    stdout: &mut O,
    stderr: &mut E,
) -> Result<ExitCode, PowerSourceError>
where
    S: PowerSource + ?Sized,
    O: Write,
    E: Write,
{
    if !args.additional_args.is_empty() {
        debug!("ignoring positional arguments {:?}", args.additional_args);
    }

    let label = current_power_source_type(source, args.debug, stderr)?;
    let power_source = PowerSourceTypeCode::from_label(&label)?;
    let code = power_source.exit_code();

    if args.verbose {
        writeln!(stdout, "{}", power_source.verbose_message())?;
        stdout.flush()?;
    }
    // Announced only once nothing else can fail.
    if args.debug {
        writeln!(stderr, "Exiting with status: {}", code)?;
    }

    Ok(code)
}

/// The one place a failure becomes a message and an exit code.
pub fn report_failure<E: Write>(error: &PowerSourceError, stderr: &mut E) -> ExitCode {
    if let PowerSourceError::Unexpected(detail) = error {
        debug!("unexpected failure: {}", detail);
    }

    let _ = writeln!(stderr, "{}", error);
    if let PowerSourceError::UnknownOption(_) = error {
        let _ = writeln!(stderr, "{}", usage());
    }
    let _ = stderr.flush();

    error.exit_code()
}
