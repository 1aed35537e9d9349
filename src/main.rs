mod args;
mod compile;
mod console_driver;
mod input;
mod report;


use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use args::Arguments;

fn main() -> anyhow::Result<ExitCode> {
    let args = Arguments::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if compile::compile(&args)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
