//! Content loaders for reading arena data from files.
//!
//! Each loader turns one RON or TOML file into core types. The
//! [`ContentFactory`] knows the directory layout and wires them together.

pub mod conditions;
pub mod config;
pub mod factory;
pub mod roster;
pub mod skills;

pub use conditions::{ConditionLoader, PipTableSpec};
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use roster::RosterLoader;
pub use skills::SkillLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
