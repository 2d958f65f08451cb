use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::types::{ArenaName, Id, ImportError, MatchNumber, Matches, Tla};
use crate::compstate::{load_arenas, load_corners, load_teams};

pub fn parse_ids(ids: &str, sep: char) -> Vec<Id> {
    ids.split(sep).map(|id| id.trim().to_string()).collect()
}

/// Strips comments and surrounding whitespace, dropping lines left empty.
pub fn tidy<S: AsRef<str>>(lines: impl IntoIterator<Item = S>) -> Vec<String> {
    lines
        .into_iter()
        .filter_map(|line| {
            let line = line.as_ref();
            let line = match line.find('#') {
                Some(idx) => &line[..idx],
                None => line,
            };
            let line = line.trim();
            (!line.is_empty()).then(|| line.to_string())
        })
        .collect()
}

pub fn league_yaml_path(compstate_path: &Path) -> PathBuf {
    compstate_path.join("league.yaml")
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LeagueFile {
    #[serde(default)]
    matches: Matches,
}

pub fn dump_league_yaml(matches: &Matches, file_path: &Path) -> anyhow::Result<()> {
    let league = LeagueFile {
        matches: matches.clone(),
    };
    let yaml = serde_yaml::to_string(&league)?;
    std::fs::write(file_path, yaml)
        .with_context(|| format!("could not write '{}'", file_path.display()))
}

pub fn load_league_yaml(league_yaml: &Path) -> anyhow::Result<Matches> {
    let content = std::fs::read_to_string(league_yaml)
        .with_context(|| format!("could not read '{}'", league_yaml.display()))?;
    let league: LeagueFile = serde_yaml::from_str(&content)
        .with_context(|| format!("invalid league file '{}'", league_yaml.display()))?;
    Ok(league.matches)
}

/// Teams still competing at `first_match_number`, the arenas and the number
/// of corners per arena. Teams and arenas are sorted.
#[instrument]
pub fn load_teams_arenas(
    compstate_path: &Path,
    first_match_number: MatchNumber,
) -> anyhow::Result<(Vec<Tla>, Vec<ArenaName>, usize)> {
    let mut team_ids: Vec<Tla> = load_teams(&compstate_path.join("teams.yaml"))?
        .into_iter()
        .filter(|(_, team)| team.is_still_around(first_match_number))
        .map(|(tla, _)| tla)
        .collect();
    team_ids.sort();

    let arenas_yaml = compstate_path.join("arenas.yaml");
    let mut arena_ids: Vec<ArenaName> = load_arenas(&arenas_yaml)?.into_keys().collect();
    arena_ids.sort();
    let num_corners = load_corners(&arenas_yaml)?.len();

    debug!(teams = team_ids.len(), ?arena_ids, num_corners);
    Ok((team_ids, arena_ids, num_corners))
}

/// Converts pipe-separated lines into `(ids, schedule)`.
///
/// `ids` lists every distinct id in the order it first appears, `schedule`
/// holds the ids of each line.
pub fn load_ids_schedule<S: AsRef<str>>(
    schedule_lines: &[S],
    num_arenas: usize,
    teams_per_game: usize,
) -> Result<(Vec<Id>, Vec<Vec<Id>>), ImportError> {
    if teams_per_game == 0 {
        return Err(ImportError::InvalidTeamsPerGame);
    }
    let max_teams_per_slot = teams_per_game * num_arenas;

    let mut ids: Vec<Id> = vec![];
    let mut seen: HashSet<Id> = HashSet::new();
    let mut schedule: Vec<Vec<Id>> = vec![];

    for (match_num, line) in schedule_lines.iter().enumerate() {
        let match_ids = parse_ids(line.as_ref(), '|');

        let uniq_match_ids: HashSet<&Id> = match_ids.iter().collect();
        if uniq_match_ids.len() != match_ids.len() {
            return Err(ImportError::DuplicateId {
                match_num,
                ids: match_ids,
            });
        }

        if match_ids.len() > max_teams_per_slot {
            return Err(ImportError::TooManyIds {
                match_num,
                got: match_ids.len(),
                max: max_teams_per_slot,
            });
        }

        if match_ids.len() % teams_per_game != 0 {
            return Err(ImportError::IncompatibleIdCount {
                match_num,
                got: match_ids.len(),
                teams_per_game,
            });
        }

        for id in &match_ids {
            if seen.insert(id.clone()) {
                ids.push(id.clone());
            }
        }
        schedule.push(match_ids);
    }

    Ok((ids, schedule))
}
