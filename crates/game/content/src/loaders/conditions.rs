//! Pip table and composable effect loaders.

use std::path::Path;

use arena_core::{Chill, Cozy, EffectCatalog, EffectDefinition, PipTable};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Per-stack pip values for RON files. Unlisted tags contribute nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipTableSpec {
    #[serde(default)]
    pub chills: Vec<(Chill, i8)>,
    #[serde(default)]
    pub cozies: Vec<(Cozy, i8)>,
}

impl PipTableSpec {
    pub fn build(&self) -> PipTable {
        PipTable::from_pairs(&self.chills, &self.cozies)
    }
}

/// Effect catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectCatalogSpec {
    pub effects: Vec<EffectDefinition>,
}

/// Loader for condition data from RON files.
pub struct ConditionLoader;

impl ConditionLoader {
    /// Load the pip table from a RON file.
    pub fn load_pips(path: &Path) -> LoadResult<PipTable> {
        let content = read_file(path)?;
        Self::parse_pips(&content)
    }

    pub fn parse_pips(content: &str) -> LoadResult<PipTable> {
        let spec: PipTableSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse pip table RON: {}", e))?;
        Ok(spec.build())
    }

    /// Load composable effect definitions from a RON file.
    pub fn load_effects(path: &Path) -> LoadResult<EffectCatalog> {
        let content = read_file(path)?;
        Self::parse_effects(&content)
    }

    pub fn parse_effects(content: &str) -> LoadResult<EffectCatalog> {
        let spec: EffectCatalogSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse effect catalog RON: {}", e))?;
        EffectCatalog::new(spec.effects)
            .map_err(|e| anyhow::anyhow!("Invalid effect catalog: {}", e))
    }
}
