mod modules;

use modules::{
    args::parse_arguments,
    controller::{execute, report_failure},
    error::PowerSourceError,
    exit_code::ExitCode,
    power_source::system_power_source,
};
use std::{env, io, process};

/// Only this crate's records, and only with `--debug`.
fn logger(debug: bool) -> env_logger::Builder {
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Off
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(log::LevelFilter::Off)
        .filter_module(env!("CARGO_CRATE_NAME"), level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .target(env_logger::Target::Stderr);
    builder
}

fn init_logging(debug: bool) {
    let _ = logger(debug).try_init();
}

fn real_main() -> Result<ExitCode, PowerSourceError> {
    let args = parse_arguments(
        env::args_os()
            .skip(1)
            .map(|arg| arg.to_string_lossy().into_owned()),
    )?;
    init_logging(args.debug);

    let source = system_power_source();
    execute(&args, &source, &mut io::stdout().lock(), &mut io::stderr().lock())
}

fn main() {
    let code = match real_main() {
        Ok(code) => code,
        Err(e) => report_failure(&e, &mut io::stderr().lock()),
    };
    process::exit(code.code());
}
