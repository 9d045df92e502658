//! CLI domain: parse, route, output, and presentation only.
//! No hashing logic; a single route table dispatches to the engine and comparator.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands, ExclusionArgs, OutputFormat};
pub use presentation::{format_size, PathKind};
pub use route::RunContext;
