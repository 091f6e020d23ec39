use clap::Parser;
use grin::config::{Args, Config};
use std::{error::Error, io, process};

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = Config::new(args).unwrap_or_else(|err| {
        eprintln!("Problem parsing arguments: {}", err);
        process::exit(1);
    });

    let stdout = io::stdout();
    if let Err(e) = grin::startup::run(&config, &mut stdout.lock()) {
        eprintln!("Application error: {}", e);
        if let Some(source) = e.source() {
            eprintln!("  caused by: {}", source);
        }
        process::exit(1);
    }
}
