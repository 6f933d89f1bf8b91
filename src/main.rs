use clap::{CommandFactory, ErrorKind, Parser};
use log::{debug, LevelFilter};

mod args;
mod irv;

use crate::args::Args;

fn main() {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }
    debug!("args: {:?}", args);

    if args.vote_file.is_none() && args.config.is_none() {
        Args::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "A vote file (or a configuration file with --config) is required",
            )
            .exit();
    }

    if let Err(e) = irv::run_election(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
