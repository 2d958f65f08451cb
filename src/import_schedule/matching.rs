//! Best-fit matching of seed schedule ids onto the real teams.
//!
//! When a seed schedule has more ids than there are teams, some ids have to be
//! left empty. Which ones are dropped decides how many games end up short of
//! teams, so every way of dropping the surplus ids is tried and the least bad
//! result is kept.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, instrument, trace};

use super::loading;
use super::types::{
    ArenaName, BadMatch, Id, ImportError, MatchNumber, Matches, RawMatch, ScheduleConfig, Tla,
};

/// Most surplus ids we are prepared to search over.
pub const MAX_SURPLUS_IDS: usize = 3;

/// Splits `list` into consecutive chunks of exactly `size` items.
pub fn chunks_of_size<T: Clone>(list: &[T], size: usize) -> Result<Vec<Vec<T>>, ImportError> {
    if size == 0 {
        return Err(ImportError::InvalidTeamsPerGame);
    }
    if list.len() % size != 0 {
        return Err(ImportError::UnevenChunks {
            len: list.len(),
            size,
        });
    }
    Ok(list.chunks(size).map(<[T]>::to_vec).collect())
}

/// Removes each of `ids_to_remove` from `ids`.
pub fn ignore_ids(ids: &mut Vec<Id>, ids_to_remove: &[Id]) -> Result<(), ImportError> {
    for id in ids_to_remove {
        let Some(pos) = ids.iter().position(|x| x == id) else {
            return Err(ImportError::UnknownIgnoredId(id.clone()));
        };
        ids.remove(pos);
    }
    Ok(())
}

/// Ascending index combinations of a fixed size, in lexicographic order.
struct Combinations {
    n: usize,
    indices: Vec<usize>,
    done: bool,
}

impl Combinations {
    fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            done: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = self.indices.clone();

        let k = self.indices.len();
        let mut i = k;
        loop {
            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
            if self.indices[i] < self.n - k + i {
                self.indices[i] += 1;
                for j in (i + 1)..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }
        }

        Some(current)
    }
}

/// Every subset of `ids` of size `limit`, obtained by leaving out the surplus.
///
/// Subsets keep the order of `ids`. They come out in lexicographic order of
/// the omitted indices, so the search which consumes them is reproducible.
///
/// # Errors
/// [`ImportError::TooManyEmptySlots`] when more than [`MAX_SURPLUS_IDS`] ids
/// would need dropping, [`ImportError::NotEnoughIds`] when `limit` exceeds the
/// number of ids.
pub fn get_id_subsets<T>(
    ids: &[T],
    limit: usize,
) -> Result<impl Iterator<Item = Vec<&T>> + '_, ImportError> {
    let Some(extra) = ids.len().checked_sub(limit) else {
        return Err(ImportError::NotEnoughIds {
            need: limit,
            got: ids.len(),
        });
    };
    if extra > MAX_SURPLUS_IDS {
        return Err(ImportError::TooManyEmptySlots(extra));
    }

    Ok(Combinations::new(ids.len(), extra).map(move |omitted| {
        ids.iter()
            .enumerate()
            .filter(|(idx, _)| !omitted.contains(idx))
            .map(|(_, id)| id)
            .collect()
    }))
}

/// Candidate mappings of ids onto teams, one per subset of ids.
///
/// The same subset is never mapped to the teams in more than one order, since
/// that would not change which games have empty places.
pub fn build_id_team_maps<'a>(
    ids: &'a [Id],
    team_ids: &'a [Tla],
) -> Result<impl Iterator<Item = HashMap<&'a str, &'a str>> + 'a, ImportError> {
    Ok(get_id_subsets(ids, team_ids.len())?.map(move |subset| {
        subset
            .into_iter()
            .map(String::as_str)
            .zip(team_ids.iter().map(String::as_str))
            .collect()
    }))
}

/// Builds the match table for one candidate mapping, noting under-filled games.
pub fn build_matches(
    id_team_map: &HashMap<&str, &str>,
    schedule: &[Vec<Id>],
    arena_ids: &[ArenaName],
    teams_per_game: usize,
    first_match_number: MatchNumber,
) -> Result<(Matches, Vec<BadMatch>), ImportError> {
    let mut matches = Matches::new();
    let mut bad_matches = vec![];

    for (match_num, match_ids) in (first_match_number..).zip(schedule) {
        let match_teams: Vec<Option<Tla>> = match_ids
            .iter()
            .map(|id| id_team_map.get(id.as_str()).map(|tla| tla.to_string()))
            .collect();
        let games = chunks_of_size(&match_teams, teams_per_game)?;

        let raw_match: RawMatch = arena_ids.iter().cloned().zip(games).collect();

        for (arena, teams) in &raw_match {
            let num_teams = teams.iter().flatten().collect::<HashSet<_>>().len();
            if num_teams * 2 <= teams_per_game {
                bad_matches.push(BadMatch {
                    arena: arena.clone(),
                    num: match_num,
                    num_teams,
                });
            }
        }

        matches.insert(match_num, raw_match);
    }

    Ok((matches, bad_matches))
}

/// Number of games with each count of empty places, indexed by that count.
fn empty_places_histogram(bad_matches: &[BadMatch], teams_per_game: usize) -> Vec<usize> {
    let mut histogram = vec![0; teams_per_game + 1];
    for bad_match in bad_matches {
        let num_empty = teams_per_game.saturating_sub(bad_match.num_teams);
        histogram[num_empty] += 1;
    }
    histogram
}

/// Whether `new` is strictly better than `best`.
///
/// Even single games with lots of empty places are bad, so the counts are
/// compared from the emptiest games down; the first difference decides.
pub fn are_better_matches(best: &[BadMatch], new: &[BadMatch], teams_per_game: usize) -> bool {
    let best = empty_places_histogram(best, teams_per_game);
    let new = empty_places_histogram(new, teams_per_game);
    new.iter().rev().lt(best.iter().rev())
}

/// Searches the candidate mappings for the one producing the fewest bad games.
///
/// The first candidate without any bad games wins outright. Otherwise a
/// candidate only replaces the best so far when it is strictly better.
#[instrument(skip_all, fields(ids = ids.len(), teams = config.num_teams()))]
pub fn get_best_fit(
    config: &ScheduleConfig,
    ids: &[Id],
    schedule: &[Vec<Id>],
) -> Result<(Matches, Vec<BadMatch>), ImportError> {
    let mut best: Option<(Matches, Vec<BadMatch>)> = None;

    for (candidate, id_team_map) in build_id_team_maps(ids, &config.team_ids)?.enumerate() {
        let (matches, bad_matches) = build_matches(
            &id_team_map,
            schedule,
            &config.arena_ids,
            config.teams_per_game,
            config.first_match_number,
        )?;

        if bad_matches.is_empty() {
            info!(candidate, "found a mapping without bad matches");
            return Ok((matches, bad_matches));
        }

        debug!(candidate, count = bad_matches.len(), ?bad_matches);

        let is_better = match &best {
            None => true,
            Some((_, best_bad)) => {
                are_better_matches(best_bad, &bad_matches, config.teams_per_game)
            }
        };
        if is_better {
            trace!(candidate, "new best mapping");
            best = Some((matches, bad_matches));
        }
    }

    best.ok_or(ImportError::NoCandidate)
}

/// Turns tidied seed schedule lines into a match table for the configured teams.
///
/// Ids listed in `ids_to_ignore` are never assigned a team.
pub fn build_schedule(
    config: &ScheduleConfig,
    schedule_lines: &[String],
    ids_to_ignore: &[Id],
) -> Result<(Matches, Vec<BadMatch>), ImportError> {
    if config.teams_per_game == 0 {
        return Err(ImportError::InvalidTeamsPerGame);
    }

    let (mut ids, schedule) =
        loading::load_ids_schedule(schedule_lines, config.num_arenas(), config.teams_per_game)?;

    if !ids_to_ignore.is_empty() {
        ignore_ids(&mut ids, ids_to_ignore)?;
    }

    if ids.len() < config.num_teams() {
        return Err(ImportError::NotEnoughIds {
            need: config.num_teams(),
            got: ids.len(),
        });
    }

    get_best_fit(config, &ids, &schedule)
}
