//! Skill catalog loader.

use std::path::Path;

use arena_core::{Skill, SkillCatalog};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Skill catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalogSpec {
    pub skills: Vec<Skill>,
}

/// Loader for skill catalogs from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load skill definitions from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<Skill>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<Skill>> {
        let catalog: SkillCatalogSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;
        Ok(catalog.skills)
    }

    /// Load and index a skill catalog, rejecting duplicate ids.
    pub fn load_catalog(path: &Path) -> LoadResult<SkillCatalog> {
        let skills = Self::load(path)?;
        SkillCatalog::new(skills)
            .map_err(|e| anyhow::anyhow!("Invalid skill catalog {}: {}", path.display(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::{SkillId, SkillType, TargetKind};

    #[test]
    fn parses_skill_with_defaults() {
        let skills = SkillLoader::parse(
            r#"(
                skills: [
                    (
                        id: SkillId(4),
                        name: "Snowball",
                        skill_type: Throw,
                        target: Enemy,
                        activation: 1.0,
                        range: 12.0,
                        costs: (energy: 5),
                    ),
                    (id: SkillId(5), name: "Hunker Down", target: SelfOnly),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(skills.len(), 2);
        assert_eq!(skills[0].id, SkillId(4));
        assert_eq!(skills[0].costs.energy, 5);
        assert_eq!(skills[0].costs.grit, 0);
        assert_eq!(skills[1].skill_type, SkillType::Throw);
        assert_eq!(skills[1].target, TargetKind::SelfOnly);
        assert!(skills[1].is_instant());
    }
}
