//! # srcomp-cli
//!
//! Command line tools for reading and editing the state of a robotics competition.
//!
//! A competition state ("compstate") is a directory of YAML files describing the teams,
//! arenas, schedule and scores of a competition. The `srcomp` binary exposes one subcommand
//! per task:
//!
//! - `import-schedule`: turn a seed schedule into the league's `league.yaml`
//! - `add-delay`: record a delay in `schedule.yaml`
//! - `shift-matches`: move all match periods to start shortly after now
//! - `round-trip`: rewrite a YAML file with consistent formatting
//! - `list-commands`: print the available subcommand names
//!
//! # Documentation Overview
//!
//! - The schedule matching itself lives in [`import_schedule::matching`], and works on plain
//!   data so it can be used without a compstate on disk.
//! - For the behaviors shared by every command (verbosity, file logging), see
//!   [`Configuration`](crate::configuration::Configuration).
//!
//! # Usage Example
//!
//! ```
//! use srcomp_cli::import_schedule::{matching::build_schedule, types::ScheduleConfig};
//!
//! let config = ScheduleConfig::new(
//!     vec!["A".to_string()],
//!     vec!["ABC".to_string(), "DEF".to_string(), "GHI".to_string()],
//!     4,
//!     0,
//! );
//! let lines = vec!["0|1|2|3".to_string(), "1|2|3|4".to_string()];
//!
//! let (matches, bad_matches) = build_schedule(&config, &lines, &[])?;
//! assert_eq!(matches.len(), 2);
//! assert!(bad_matches.is_empty());
//! # Ok::<(), srcomp_cli::import_schedule::types::ImportError>(())
//! ```

pub mod cli;
pub mod commands;
pub mod compstate;
pub mod configuration;
pub mod import_schedule;
pub mod logger;
mod timestamp;
pub mod yaml_round_trip;

/// Commonly used types for driving the schedule import.
pub mod prelude {
    pub use crate::configuration::Configuration;
    pub use crate::import_schedule::matching::build_schedule;
    pub use crate::import_schedule::teams_mapping::Strategy;
    pub use crate::import_schedule::types::{BadMatch, ImportError, Matches, ScheduleConfig};
    pub use crate::yaml_round_trip::YamlStore;
}
