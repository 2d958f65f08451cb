//! Subcommands which edit compstate files directly.

pub mod add_delay;
pub mod round_trip;
pub mod shift_matches;
