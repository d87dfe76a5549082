//! Subcommands of the `triki` binary

pub mod menu;
pub mod play;
pub mod stats;
pub mod train;
