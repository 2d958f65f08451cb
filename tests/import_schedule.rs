use std::path::Path;

use srcomp_cli::import_schedule::{self, loading, teams_mapping::Strategy, types::ImportError};
use srcomp_cli::prelude::*;
use tempfile::TempDir;

const TEAMS: &str = "\
teams:
  ABC:
    name: Alpha
    rookie: false
  DEF:
    name: Delta
  GHI:
    name: Gamma
  XYZ:
    name: Zulu
    dropped_out_after: 0
";

const ARENAS: &str = "\
arenas:
  A:
    display_name: Arena A
corners:
  0: {colour: '#00ff00'}
  1: {colour: '#ff6600'}
  2: {colour: '#ff00ff'}
  3: {colour: '#ffff00'}
";

const LAYOUT: &str = "\
teams:
  - name: Front
    teams: [ABC, DEF]
  - name: Back
    teams: [GHI, XYZ]
";

fn compstate() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("teams.yaml"), TEAMS).unwrap();
    std::fs::write(dir.path().join("arenas.yaml"), ARENAS).unwrap();
    std::fs::write(dir.path().join("layout.yaml"), LAYOUT).unwrap();
    dir
}

fn import(compstate: &Path, schedule: &str, extend: bool) -> anyhow::Result<()> {
    let schedule_path = compstate.join("schedule.txt");
    std::fs::write(&schedule_path, schedule).unwrap();
    let args = import_schedule::Args {
        ignore_ids: vec![],
        extend,
        team_order_strategy: Strategy::Layout,
        compstate: compstate.to_path_buf(),
        schedule: schedule_path,
    };
    import_schedule::run(args, Configuration::new())
}

fn slots(raw: &[Option<&str>]) -> Vec<Option<String>> {
    raw.iter().map(|s| s.map(String::from)).collect()
}

#[test]
fn writes_league_yaml() {
    let dir = compstate();
    // XYZ dropped out after match 0, so is still around for match 0
    import(dir.path(), "# seed\n0|1|2|3\n1|2|3|4 # second\n\n", false).unwrap();

    let league = loading::load_league_yaml(&loading::league_yaml_path(dir.path())).unwrap();
    assert_eq!(league.len(), 2);
    assert_eq!(
        league[&0]["A"],
        slots(&[None, Some("ABC"), Some("DEF"), Some("GHI")])
    );
    assert_eq!(
        league[&1]["A"],
        slots(&[Some("ABC"), Some("DEF"), Some("GHI"), Some("XYZ")])
    );
}

#[test]
fn extends_existing_league() {
    let dir = compstate();
    std::fs::write(
        dir.path().join("league.yaml"),
        "matches:\n  0:\n    A: [ABC, DEF, GHI, XYZ]\n",
    )
    .unwrap();

    import(dir.path(), "0|1|2|3\n1|2|3|4\n", true).unwrap();

    let league = loading::load_league_yaml(&loading::league_yaml_path(dir.path())).unwrap();
    assert_eq!(league.keys().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
    assert_eq!(
        league[&0]["A"],
        slots(&[Some("ABC"), Some("DEF"), Some("GHI"), Some("XYZ")])
    );
    // XYZ is gone from match 1 onwards
    assert_eq!(
        league[&1]["A"],
        slots(&[None, Some("ABC"), Some("DEF"), Some("GHI")])
    );
    assert_eq!(
        league[&2]["A"],
        slots(&[Some("ABC"), Some("DEF"), Some("GHI"), None])
    );
}

#[test]
fn invalid_schedule_writes_nothing() {
    let dir = compstate();
    let err = import(dir.path(), "0|0|1|2\n", false).unwrap_err();

    assert_eq!(
        err.downcast_ref::<ImportError>(),
        Some(&ImportError::DuplicateId {
            match_num: 0,
            ids: vec!["0".into(), "0".into(), "1".into(), "2".into()],
        })
    );
    assert!(!loading::league_yaml_path(dir.path()).exists());
}

#[test]
fn broken_compstate_is_reported() {
    let dir = compstate();
    std::fs::remove_file(dir.path().join("arenas.yaml")).unwrap();

    let err = import(dir.path(), "0|1|2|3\n", false).unwrap_err();
    assert!(err.to_string().starts_with("Failed to load existing state"));
}

#[test]
fn library_build_schedule_matches_scenarios() {
    let config = ScheduleConfig::new(
        vec!["A".to_string()],
        vec!["ABC".to_string(), "DEF".to_string(), "GHI".to_string()],
        4,
        0,
    );
    let lines = vec!["0|1|2|3".to_string(), "1|2|3|4".to_string()];
    let (matches, bad) = build_schedule(&config, &lines, &[]).unwrap();
    assert!(bad.is_empty());
    assert_eq!(
        matches[&1]["A"],
        slots(&[Some("ABC"), Some("DEF"), Some("GHI"), None])
    );
}
