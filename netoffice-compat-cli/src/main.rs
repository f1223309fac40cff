mod app;
mod commands;
mod listing;
mod output;

use clap::Parser;

use crate::app::{Cli, Command};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Show netoffice_compat info+ on stderr unless --json; --verbose enables debug; RUST_LOG overrides
    if !cli.global.json {
        let level = if cli.global.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        env_logger::Builder::new()
            .filter_module("netoffice_compat", level)
            .parse_default_env()
            .target(env_logger::Target::Stderr)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false)
            .init();
    }

    match &cli.command {
        Command::Member { name } => commands::query::member(name, &cli.global),
        Command::Type { name } => commands::query::type_ref(name, &cli.global),
        Command::Enum { name, value } => commands::query::enum_value(name, *value, &cli.global),
        Command::Libraries => commands::libraries::run(&cli.global),
        Command::Types { library, filter } => {
            commands::types::run(library, filter.as_deref(), &cli.global)
        }
        Command::Dump { library } => commands::dump::run(library, &cli.global),
        Command::Pack { listing, output } => commands::pack::run(listing, output, &cli.global),
    }
}
