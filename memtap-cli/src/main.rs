mod app;
mod commands;
mod output;

use clap::Parser;

use crate::app::{Cli, Command};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Show memtap info+ on stderr unless --json; --verbose enables debug; RUST_LOG overrides
    if !cli.global.json {
        let level = if cli.global.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        env_logger::Builder::new()
            .filter_module("memtap", level)
            .parse_default_env()
            .target(env_logger::Target::Stderr)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false)
            .init();
    }

    match &cli.command {
        Command::Sample {
            path,
            length,
            algorithm,
            seed,
            stride,
            base,
            population,
        } => commands::sample::run(
            path,
            *length,
            algorithm,
            seed.as_deref(),
            *stride,
            *base,
            *population,
            &cli.global,
        ),
        Command::Symbols {
            path,
            stride,
            base,
            limit,
        } => commands::symbols::run(path, *stride, *base, *limit, &cli.global),
    }
}
