//! CLI subcommands

pub mod list;
pub mod serve;
pub mod show;
