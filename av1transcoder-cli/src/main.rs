// av1transcoder-cli/src/main.rs
//
// Entry point of the av1transcoder command-line tool.
//
// Responsibilities include:
// - Expanding @file tokens in the raw argument list.
// - Parsing the arguments against the clap option schema.
// - Deriving the immutable transcoding configuration.
// - Setting up console logging according to --verbose.
// - Handing the configuration to the pipeline (reported as a plan).
// - Managing process exit codes based on success or failure.
//
// Nothing touches the file system or spawns a process before a valid
// configuration exists.

use std::io::Write;
use std::process;

use clap::Parser;
use log::{debug, info};
use owo_colors::OwoColorize;

use av1transcoder_cli::{Cli, expand_argument_files, logging, report_plan};
use av1transcoder_core::{CoreError, PROGRAM_NAME};

fn main() {
    let args = match expand_argument_files(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => exit_with_error(&e),
    };

    // Usage errors, --help and --version exit inside clap.
    let config = Cli::parse_from(args).into_config();

    logging::init(config.verbose());
    info!("{} {} starting", PROGRAM_NAME, env!("CARGO_PKG_VERSION"));
    debug!("Parsed {} input file(s)", config.input_files().len());

    report_plan(&config);
}

fn exit_with_error(error: &CoreError) -> ! {
    let mut stderr = std::io::stderr().lock();
    let message = format!("Error: {error}");
    if supports_color::on_cached(supports_color::Stream::Stderr).is_some() {
        writeln!(stderr, "{}", message.red().bold()).ok();
    } else {
        writeln!(stderr, "{message}").ok();
    }
    process::exit(1);
}
