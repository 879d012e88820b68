use std::io::{self, Write};
use std::process;

use super::error::PowerSourceError;
use super::exit_code::ExitCode;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArguments {
    pub verbose: bool,
    pub debug: bool,
    /// Positional arguments. Accepted and otherwise unused.
    pub additional_args: Vec<String>,
}

pub fn usage() -> String {
    let exit_codes = ExitCode::SUMMARY
        .iter()
        .map(|(code, desc)| format!(" {:2}: {}", code.code(), desc))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Usage: powerstatus [options]

Check the current power source type (Battery or AC/UPS).

Options:
  -v, --verbose      Enable verbose output
  --debug            Enable debug output
  -h, --help         Show this help message

Exit Codes:
{}",
        exit_codes
    )
}

pub fn print_usage() {
    let _ = writeln!(io::stderr(), "{}", usage());
}

/// Parses the arguments that follow the program name.
///
/// `-h`/`--help` prints the usage to stderr and exits with 65 on the spot.
pub fn parse_arguments<I>(args: I) -> Result<ParsedArguments, PowerSourceError>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = ParsedArguments::default();
    let mut parsing_options = true;

    for arg in args {
        if !parsing_options {
            parsed.additional_args.push(arg);
            continue;
        }

        match arg.as_str() {
            "--" => parsing_options = false,
            "-v" | "--verbose" => parsed.verbose = true,
            "--debug" => parsed.debug = true,
            "-h" | "--help" => {
                print_usage();
                process::exit(ExitCode::USAGE.code());
            }
            _ if arg.starts_with('-') => return Err(PowerSourceError::UnknownOption(arg)),
            _ => {
                parsing_options = false;
                parsed.additional_args.push(arg);
            }
        }
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<ParsedArguments, PowerSourceError> {
        parse_arguments(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn no_arguments() {
        assert_eq!(parse(&[]), Ok(ParsedArguments::default()));
    }

    #[test]
    fn short_and_long_flags() {
        let parsed = parse(&["-v", "--debug"]).unwrap();
        assert!(parsed.verbose);
        assert!(parsed.debug);
        assert!(parsed.additional_args.is_empty());

        let parsed = parse(&["--verbose"]).unwrap();
        assert!(parsed.verbose);
        assert!(!parsed.debug);
    }

    #[test]
    fn unknown_option_is_reported_verbatim() {
        assert_eq!(
            parse(&["--unknown"]),
            Err(PowerSourceError::UnknownOption("--unknown".into()))
        );
        assert_eq!(parse(&["-d"]), Err(PowerSourceError::UnknownOption("-d".into())));
        assert_eq!(parse(&["-"]), Err(PowerSourceError::UnknownOption("-".into())));
        // Short flags are not bundled.
        assert_eq!(parse(&["-vh"]), Err(PowerSourceError::UnknownOption("-vh".into())));
    }

    #[test]
    fn first_error_wins() {
        assert_eq!(
            parse(&["-v", "--bogus", "--other"]),
            Err(PowerSourceError::UnknownOption("--bogus".into()))
        );
    }

    #[test]
    fn double_dash_ends_options() {
        let parsed = parse(&["--", "--ignored", "-h"]).unwrap();
        assert!(!parsed.verbose);
        assert_eq!(parsed.additional_args, vec!["--ignored", "-h"]);
    }

    #[test]
    fn double_dash_is_consumed_once() {
        let parsed = parse(&["--debug", "--", "--"]).unwrap();
        assert!(parsed.debug);
        assert_eq!(parsed.additional_args, vec!["--"]);
    }

    #[test]
    fn positional_argument_ends_options() {
        let parsed = parse(&["-v", "extra", "--debug", "--help"]).unwrap();
        assert!(parsed.verbose);
        assert!(!parsed.debug);
        assert_eq!(parsed.additional_args, vec!["extra", "--debug", "--help"]);
    }

    #[test]
    fn usage_layout() {
        let text = usage();
        assert!(text.lines().any(|l| l == "Usage: powerstatus [options]"));
        assert!(text.contains("\n  0: Device is running on battery.\n"));
        assert!(text.contains("\n 64: Unknown option provided.\n"));
        assert!(text.ends_with("\n 99: Unexpected error."));
    }
}
