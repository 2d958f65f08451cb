use std::{
    collections::{BTreeSet, HashMap},
    path::Path,
};

use anyhow::bail;
use clap::ValueEnum;
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use super::types::Tla;
use crate::compstate::load_layout;

/// How teams are lined up against the ids of a seed schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Use the layout if there is one, otherwise shuffle.
    #[default]
    Auto,
    /// Order by location in `layout.yaml`.
    Layout,
    /// Stable shuffle seeded from the team codes.
    Random,
}

fn join_and<S: AsRef<str>>(items: impl IntoIterator<Item = S>) -> String {
    let items: Vec<String> = items.into_iter().map(|s| s.as_ref().to_string()).collect();
    match items.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {last}", rest.join(", ")),
    }
}

fn seed_from(team_ids: &[Tla]) -> [u8; 32] {
    let mut seed = [0u8; 32];
    for (i, byte) in team_ids.concat().bytes().enumerate() {
        seed[i % 32] = seed[i % 32].wrapping_mul(31).wrapping_add(byte);
    }
    seed
}

/// Shuffles the teams, always the same way for the same set of teams.
pub fn shuffle_teams(mut team_ids: Vec<Tla>) -> Vec<Tla> {
    let mut rng = ChaCha8Rng::from_seed(seed_from(&team_ids));
    team_ids.shuffle(&mut rng);
    team_ids
}

/// Orders teams as they appear in the layout, dropping layout-only teams.
pub fn layout_order(compstate_path: &Path, team_ids: &[Tla]) -> anyhow::Result<Vec<Tla>> {
    let layout = load_layout(&compstate_path.join("layout.yaml"))?;
    let mut ordered_teams: Vec<Tla> = layout.into_iter().flat_map(|group| group.teams).collect();

    let mut counts: HashMap<&Tla, usize> = HashMap::new();
    for tla in &ordered_teams {
        *counts.entry(tla).or_default() += 1;
    }
    let duplicates: BTreeSet<&Tla> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(tla, _)| tla)
        .collect();
    if !duplicates.is_empty() {
        bail!(
            "Some teams appear twice in the layout! {}",
            join_and(duplicates)
        );
    }

    let layout_teams: BTreeSet<&Tla> = ordered_teams.iter().collect();
    let all_teams: BTreeSet<&Tla> = team_ids.iter().collect();

    let missing: Vec<&&Tla> = all_teams.difference(&layout_teams).collect();
    if !missing.is_empty() {
        bail!("Some teams not in layout: {}.", join_and(missing.iter().map(|t| t.as_str())));
    }

    let extra: BTreeSet<Tla> = layout_teams
        .difference(&all_teams)
        .map(|tla| tla.to_string())
        .collect();
    if !extra.is_empty() {
        warn!("Extra teams in layout will be ignored: {}.", join_and(&extra));
        println!(
            "WARNING: Extra teams in layout will be ignored: {}.",
            join_and(&extra)
        );
        ordered_teams.retain(|tla| !extra.contains(tla));
    }

    Ok(ordered_teams)
}

/// Puts the teams in the order they will be assigned to schedule ids.
pub fn order_teams(
    compstate_path: &Path,
    team_ids: Vec<Tla>,
    strategy: Strategy,
) -> anyhow::Result<Vec<Tla>> {
    let has_layout = compstate_path.join("layout.yaml").exists();
    let strategy = match strategy {
        Strategy::Auto if has_layout => Strategy::Layout,
        Strategy::Auto => Strategy::Random,
        other => other,
    };
    info!(?strategy, "ordering teams");

    match strategy {
        Strategy::Layout => layout_order(compstate_path, &team_ids),
        _ => Ok(shuffle_teams(team_ids)),
    }
}
