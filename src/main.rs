use clap::Parser;

use srcomp_cli::{cli::Cli, logger};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init(&cli.configuration())?;
    srcomp_cli::cli::run(cli)
}
