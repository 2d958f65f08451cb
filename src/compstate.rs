//! Read-only views of the competition state documents the commands need.
//!
//! Only the fields used by this crate are modelled; anything else in the
//! files is ignored.

use std::{collections::BTreeMap, path::Path};

use anyhow::Context;
use serde::{de::DeserializeOwned, Deserialize};

use crate::import_schedule::types::{ArenaName, MatchNumber, Tla};

/// A team entry of `teams.yaml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Team {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rookie: bool,
    /// Last match the team takes part in, when it has withdrawn.
    #[serde(default)]
    pub dropped_out_after: Option<MatchNumber>,
}

impl Team {
    pub fn is_still_around(&self, match_number: MatchNumber) -> bool {
        match self.dropped_out_after {
            None => true,
            Some(last) => match_number <= last,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TeamsFile {
    teams: BTreeMap<Tla, Team>,
}

/// An arena entry of `arenas.yaml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Arena {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub colour: Option<String>,
}

/// A corner entry of `arenas.yaml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Corner {
    #[serde(default)]
    pub colour: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArenasFile {
    arenas: BTreeMap<ArenaName, Option<Arena>>,
    corners: BTreeMap<u32, Option<Corner>>,
}

/// A group of neighbouring teams in `layout.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutGroup {
    #[serde(default)]
    pub name: Option<String>,
    pub teams: Vec<Tla>,
}

#[derive(Debug, Deserialize)]
struct LayoutFile {
    teams: Vec<LayoutGroup>,
}

fn read_yaml<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("could not read '{}'", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("invalid '{}'", path.display()))
}

pub fn load_teams(teams_yaml: &Path) -> anyhow::Result<BTreeMap<Tla, Team>> {
    Ok(read_yaml::<TeamsFile>(teams_yaml)?.teams)
}

pub fn load_arenas(arenas_yaml: &Path) -> anyhow::Result<BTreeMap<ArenaName, Arena>> {
    let file: ArenasFile = read_yaml(arenas_yaml)?;
    Ok(file
        .arenas
        .into_iter()
        .map(|(name, arena)| (name, arena.unwrap_or_default()))
        .collect())
}

pub fn load_corners(arenas_yaml: &Path) -> anyhow::Result<BTreeMap<u32, Corner>> {
    let file: ArenasFile = read_yaml(arenas_yaml)?;
    Ok(file
        .corners
        .into_iter()
        .map(|(num, corner)| (num, corner.unwrap_or_default()))
        .collect())
}

pub fn load_layout(layout_yaml: &Path) -> anyhow::Result<Vec<LayoutGroup>> {
    Ok(read_yaml::<LayoutFile>(layout_yaml)?.teams)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropped_out_teams() {
        let team = Team {
            name: "Team".to_string(),
            rookie: false,
            dropped_out_after: Some(5),
        };
        assert!(team.is_still_around(5));
        assert!(!team.is_still_around(6));

        let team = Team {
            dropped_out_after: None,
            ..team
        };
        assert!(team.is_still_around(1000));
    }

    #[test]
    fn reads_arenas_and_corners() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arenas.yaml");
        std::fs::write(
            &path,
            "arenas:\n  A:\n    display_name: Arena A\n  B:\ncorners:\n  0:\n    colour: '#00ff00'\n  1:\n    colour: '#ff6600'\n",
        )
        .unwrap();

        let arenas = load_arenas(&path).unwrap();
        assert_eq!(arenas.keys().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(arenas["A"].display_name.as_deref(), Some("Arena A"));
        assert_eq!(load_corners(&path).unwrap().len(), 2);
    }
}
