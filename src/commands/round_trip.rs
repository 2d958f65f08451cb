//! Round-trip a YAML file using compstate loading.

use std::path::PathBuf;

use tracing::instrument;

use crate::{configuration::Configuration, yaml_round_trip::YamlStore};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Target file to round trip
    pub file_path: PathBuf,
}

#[instrument(skip(config))]
pub fn run(args: Args, config: Configuration) -> anyhow::Result<()> {
    YamlStore::new().round_trip(&args.file_path)?;
    if config.verbose {
        println!("Rewrote {}", args.file_path.display());
    }
    Ok(())
}
