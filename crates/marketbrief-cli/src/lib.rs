// NOTE: Command Organization
//
// Each subcommand is one independent, single-shot flow: read
// credentials, issue the HTTP call(s), reshape, write one artifact.
// Flows share the presentation layer and nothing else; there is no
// state carried across runs and no background work.

mod args;
mod commands;
mod handlers;
pub mod presentation;

pub use args::{Cli, Commands};
pub use commands::run;
