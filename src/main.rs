mod cli;
mod commands;
mod config;
mod engine;
mod manifest;
mod paths;
mod reconcile;
mod resource;
mod schema;
mod state;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use std::io;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    match &cli.command {
        Command::Plan(args) => commands::plan::plan(&ctx, &cli.provider, &cli.files, args),
        Command::Apply(args) => commands::plan::apply(&ctx, &cli.provider, &cli.files, args),
        Command::Destroy(args) => commands::plan::destroy(&ctx, &cli.provider, &cli.files, args),
        Command::Refresh(args) => commands::refresh::run(&ctx, &cli.provider, &cli.files, args),
        Command::Show(args) => commands::show::run(&ctx, &cli.files, args),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(*shell, &mut cmd, "gfwctl", &mut io::stdout());
            Ok(())
        }
    }
}
