//! Command-line interface definition and dispatch.

use clap::{CommandFactory, Parser, Subcommand};

use crate::{
    commands::{add_delay, round_trip, shift_matches},
    configuration::Configuration,
    import_schedule,
};

#[derive(Debug, Parser)]
#[command(name = "srcomp")]
#[command(about = "srcomp command-line interface", long_about = None)]
pub struct Cli {
    /// Print progress details and debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,
    /// Write logs to a timestamped file in the current directory
    #[arg(long, global = true)]
    pub log: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Lists the available commands; useful for adding auto-completion of command names
    ListCommands,
    /// Add a delay to the competition state
    AddDelay(add_delay::Args),
    /// Import a league.yaml file from a schedule file
    ImportSchedule(import_schedule::Args),
    /// Round-trip a yaml file using compstate loading
    RoundTrip(round_trip::Args),
    /// Shift the matches to start at the current time
    ShiftMatches(shift_matches::Args),
}

impl Cli {
    /// Environment configuration with command-line flags applied on top.
    pub fn configuration(&self) -> Configuration {
        let env = Configuration::from_env();
        env.with_verbose(env.verbose || self.verbose)
            .with_log(env.log || self.log)
    }
}

/// Names of every subcommand, in declaration order.
pub fn command_names() -> Vec<String> {
    Cli::command()
        .get_subcommands()
        .map(|cmd| cmd.get_name().to_string())
        .filter(|name| name != "help")
        .collect()
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.configuration();

    match cli.command {
        Commands::ListCommands => {
            println!("{}", command_names().join(" "));
            Ok(())
        }
        Commands::AddDelay(args) => add_delay::run(args, config),
        Commands::ImportSchedule(args) => import_schedule::run(args, config),
        Commands::RoundTrip(args) => round_trip::run(args, config),
        Commands::ShiftMatches(args) => shift_matches::run(args, config),
    }
}
