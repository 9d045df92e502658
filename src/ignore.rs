//! Exclusion rules for hashing.
//!
//! Patterns use a gitignore-like syntax and come from three places: a custom
//! ignore file named by the user, command-line `--exclude` values, and
//! `.mtcignore` / `.gitignore` files found by walking up from the working
//! directory. The merged list compiles into a [`Matcher`] that the engine
//! consults for every entry it visits.

mod glob;
mod matcher;
mod sources;

pub use glob::glob_match;
pub use matcher::{Matcher, NoopMatcher, Pattern, PatternMatcher, Segment};
pub use sources::{
    discover_ignore_files, load_custom_ignore_file, load_ignore_file, parse_patterns,
    IgnoreSources, GIT_IGNORE_FILE, IGNORE_FILE_NAMES, MTC_IGNORE_FILE,
};
