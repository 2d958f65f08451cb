//! Import a `league.yaml` from a seed schedule file.
//!
//! A seed schedule lists one match per line. A match is a number of unique
//! identifiers separated by pipe characters:
//!
//! ```text
//! # comments run to the end of the line
//! 0|1|2|3|4|5|6|7
//! 8|9|10|11|0|1|2|3
//! ```
//!
//! The total number of identifiers in the file should be equal to or greater
//! than the number of teams in the compstate. The number of identifiers in a
//! given match must be a multiple of the number of teams per game, up to the
//! number of arenas in the compstate.
//!
//! Whitespace (other than newlines) is ignored, as is anything to the right of
//! a hash character.
//!
//! Teams which have dropped out before the first match being scheduled are
//! not considered for inclusion in the schedule.

use std::{
    convert::Infallible,
    path::{Path, PathBuf},
};

use anyhow::Context;
use tracing::{error, info, instrument, warn};

use crate::configuration::Configuration;

pub mod loading;
pub mod matching;
pub mod teams_mapping;
pub mod types;

use teams_mapping::Strategy;
use types::{Id, MatchNumber, Matches, ScheduleConfig};

/// Number for the first imported match, following any existing ones.
pub fn get_first_match_number<'a>(
    existing_match_numbers: impl IntoIterator<Item = &'a MatchNumber>,
) -> MatchNumber {
    existing_match_numbers
        .into_iter()
        .max()
        .map_or(0, |last| last + 1)
}

/// Loads teams and arenas from the compstate and orders the teams.
#[instrument]
pub fn get_configuration(
    compstate_path: &Path,
    team_order_strategy: Strategy,
    first_match_number: MatchNumber,
) -> anyhow::Result<ScheduleConfig> {
    let (team_ids, arena_ids, teams_per_game) =
        loading::load_teams_arenas(compstate_path, first_match_number)
            .inspect_err(|e| error!("failed to load existing state: {e:#}"))
            .context(
                "Failed to load existing state. Make it valid (consider removing the \
                 league.yaml and layout.yaml) and try again",
            )?;

    let team_ids = teams_mapping::order_teams(compstate_path, team_ids, team_order_strategy)?;

    Ok(ScheduleConfig::new(
        arena_ids,
        team_ids,
        teams_per_game,
        first_match_number,
    ))
}

fn parse_ignore_ids(value: &str) -> Result<Vec<Id>, Infallible> {
    Ok(loading::parse_ids(value, ',')
        .into_iter()
        .filter(|id| !id.is_empty())
        .collect())
}

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Comma separated list of ids (as present in the schedule file) to ignore
    #[arg(
        short,
        long,
        value_parser = parse_ignore_ids,
        default_value = "",
        hide_default_value = true
    )]
    // full path so clap parses the whole list from a single value
    pub ignore_ids: std::vec::Vec<Id>,
    /// Extend the existing league with the matches in the schedule file,
    /// rather than replacing it
    #[arg(long)]
    pub extend: bool,
    /// How to map schedule ids to teams
    #[arg(long, value_enum, default_value_t = Strategy::Auto)]
    pub team_order_strategy: Strategy,
    /// Competition state repository
    pub compstate: PathBuf,
    /// Schedule to import
    pub schedule: PathBuf,
}

#[instrument(skip(config))]
pub fn run(args: Args, config: Configuration) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&args.schedule)
        .with_context(|| format!("could not read '{}'", args.schedule.display()))?;
    let schedule_lines = loading::tidy(content.lines());

    let league_yaml = loading::league_yaml_path(&args.compstate);
    let mut existing_matches = Matches::new();
    if args.extend {
        existing_matches = loading::load_league_yaml(&league_yaml)?;
    }
    let first_match_number = get_first_match_number(existing_matches.keys());

    let schedule_config =
        get_configuration(&args.compstate, args.team_order_strategy, first_match_number)?;
    if config.verbose {
        println!(
            "Scheduling {} teams across {} arena(s), starting at match {first_match_number}",
            schedule_config.num_teams(),
            schedule_config.num_arenas(),
        );
    }

    let (matches, bad_matches) =
        matching::build_schedule(&schedule_config, &schedule_lines, &args.ignore_ids)?;

    for bad_match in &bad_matches {
        warn!(%bad_match);
        println!("Warning: {bad_match}");
    }

    info!(
        new = matches.len(),
        existing = existing_matches.len(),
        "writing league"
    );
    existing_matches.extend(matches);
    loading::dump_league_yaml(&existing_matches, &league_yaml)
}
