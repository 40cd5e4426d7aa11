//! Content factory for building catalogs from data files.

use std::path::{Path, PathBuf};

use arena_core::{Character, CombatConfig, CombatRules, EffectCatalog, PipTable, SkillCatalog};

use crate::RosterSpec;
use crate::loaders::{ConditionLoader, ConfigLoader, LoadResult, RosterLoader, SkillLoader};

/// Content factory that loads all arena content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── pips.ron
/// ├── effects.ron
/// ├── skills.ron
/// └── roster.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data files shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
    }

    /// Load combat configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the pip table from `pips.ron`.
    pub fn load_pips(&self) -> LoadResult<PipTable> {
        ConditionLoader::load_pips(&self.data_dir.join("pips.ron"))
    }

    /// Load composable effects from `effects.ron`.
    pub fn load_effects(&self) -> LoadResult<EffectCatalog> {
        ConditionLoader::load_effects(&self.data_dir.join("effects.ron"))
    }

    /// Load the skill catalog from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<SkillCatalog> {
        SkillLoader::load_catalog(&self.data_dir.join("skills.ron"))
    }

    /// Load the match roster from `roster.ron`.
    pub fn load_roster(&self) -> LoadResult<RosterSpec> {
        RosterLoader::load(&self.data_dir.join("roster.ron"))
    }

    /// Config and pip table together.
    pub fn load_rules(&self) -> LoadResult<CombatRules> {
        Ok(CombatRules::new(self.load_config()?, self.load_pips()?))
    }

    /// Roster characters with their skill bars resolved.
    pub fn load_characters(&self, skills: &SkillCatalog) -> LoadResult<Vec<Character>> {
        RosterLoader::build(&self.load_roster()?, skills)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
