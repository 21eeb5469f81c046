//! CLI subcommands

pub mod rate;
pub mod scenarios;
