//! Data model shared by the schedule import stages.

use std::{collections::BTreeMap, fmt};

use thiserror::Error;

/// Provisional identifier of a slot in a seed schedule.
pub type Id = String;
/// Short code of a competing team.
pub type Tla = String;
/// Name of a physical arena.
pub type ArenaName = String;
/// Sequential number of a match in the league.
pub type MatchNumber = u32;

/// The teams in each arena for one match. Empty slots are `None`.
pub type RawMatch = BTreeMap<ArenaName, Vec<Option<Tla>>>;

/// A full match table, keyed by match number.
pub type Matches = BTreeMap<MatchNumber, RawMatch>;

/// A game which ended up with too few real teams in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadMatch {
    /// Arena the game is played in.
    pub arena: ArenaName,
    /// Match number of the game.
    pub num: MatchNumber,
    /// How many real teams were placed in the game.
    pub num_teams: usize,
}

impl fmt::Display for BadMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "match {}:{} only has {} teams.",
            self.arena, self.num, self.num_teams
        )
    }
}

/// Everything the import needs to know about the competition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Arenas, in the order games are assigned to them.
    pub arena_ids: Vec<ArenaName>,
    /// Teams, in the order they are assigned to ids.
    pub team_ids: Vec<Tla>,
    /// Number of corners in an arena.
    pub teams_per_game: usize,
    /// Number given to the first imported match.
    pub first_match_number: MatchNumber,
}

impl ScheduleConfig {
    pub fn new(
        arena_ids: Vec<ArenaName>,
        team_ids: Vec<Tla>,
        teams_per_game: usize,
        first_match_number: MatchNumber,
    ) -> Self {
        Self {
            arena_ids,
            team_ids,
            teams_per_game,
            first_match_number,
        }
    }

    pub fn num_arenas(&self) -> usize {
        self.arena_ids.len()
    }

    pub fn num_teams(&self) -> usize {
        self.team_ids.len()
    }
}

/// Reasons a seed schedule cannot be turned into matches.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("Match {match_num} contains the same id more than once. (got ids {ids:?})")]
    DuplicateId { match_num: usize, ids: Vec<Id> },

    #[error("Match {match_num} has too many ids. (got {got}, can cope with {max})")]
    TooManyIds {
        match_num: usize,
        got: usize,
        max: usize,
    },

    #[error(
        "Match {match_num} has incompatible number of ids: {got} is not a multiple of {teams_per_game}."
    )]
    IncompatibleIdCount {
        match_num: usize,
        got: usize,
        teams_per_game: usize,
    },

    #[error("Not enough places in the schedule (need {need}, got {got}).")]
    NotEnoughIds { need: usize, got: usize },

    #[error("Too many empty slots to compensate for ({0}).")]
    TooManyEmptySlots(usize),

    #[error("Unable to chunk list of {len} whose size is not evenly divisible by given size {size}.")]
    UnevenChunks { len: usize, size: usize },

    #[error("Cannot ignore id '{0}': it does not appear in the schedule.")]
    UnknownIgnoredId(Id),

    #[error("Teams per game must be at least 1.")]
    InvalidTeamsPerGame,

    #[error("No candidate team mapping was evaluated.")]
    NoCandidate,
}
