//! scriptgif - script(1) recordings to animated GIFs

use std::process::ExitCode;

use clap::Parser;
use log::{debug, error};
use scriptgif::{CliArgs, Config};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // "warn" by default, "debug" with -v; RUST_LOG still wins
    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = match Config::load_with_args(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    debug!("Config: {:?}", config);

    match scriptgif::run(&args, &config) {
        Ok(summary) => {
            debug!("Done: {:?}", summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
