#![allow(special_module_name)]

mod file_input_util;
mod file_output_util;
mod lib;
mod parse_main;

use clap::CommandFactory;
use clap::FromArgMatches;
use tracing::{event, span, Level};
use tracing_subscriber::prelude::*;

use parse_main::parse_main;
use parse_main::Fail;
use parse_main::ParseCli;

fn init_tracing() -> Result<(), Fail> {
    // RUST_LOG selects which events are printed; stdout is reserved for the XML.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("warn"))
        .map_err(|e| Fail::Internal(anyhow::anyhow!("failed to initialise tracing filter: {}", e)))?;

    tracing_subscriber::registry().with(filter_layer).with(fmt_layer).init();
    Ok(())
}

fn real_main() -> i32 {
    let matches = match ParseCli::command().try_get_matches() {
        Ok(m) => m,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() { Fail::ARGS } else { 0 };
        }
    };
    let cli = match ParseCli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return Fail::ARGS;
        }
    };

    if let Err(fail) = init_tracing() {
        eprintln!("Error: {}", fail);
        return fail.exit_code();
    }

    let span = span!(Level::ERROR, "parse", input = ?cli.input);
    let _enter = span.enter();
    match parse_main(cli, &matches) {
        Ok(()) => {
            event!(Level::INFO, "parse succeeded");
            0
        }
        Err(fail) => {
            event!(Level::ERROR, "parse failed: {}", fail);
            fail.report();
            fail.exit_code()
        }
    }
}

fn main() {
    std::process::exit(real_main());
}
