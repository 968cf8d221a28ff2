use std::env;
use std::process;

use clap::Parser;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format;

use self::args::{Args, Command};
use self::replay::run_replay;
use self::shell::run_shell;

mod args;
mod engine;
mod game;
mod replay;
mod shell;

fn main() {
    let args = Args::parse();

    set_default_logging();

    let event_format = format().with_target(false).without_time();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .event_format(event_format)
        .init();

    let succeeded = match args.command {
        Command::Replay(config) => run_replay(config),
        Command::Shell(config) => run_shell(config),
    };

    if !succeeded {
        process::exit(1);
    }
}

fn set_default_logging() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "warn");
    }
}
