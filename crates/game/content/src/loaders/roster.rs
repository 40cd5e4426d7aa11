//! Match roster loader.

use std::path::Path;

use arena_core::{Character, SkillOracle};

use crate::RosterSpec;
use crate::loaders::{LoadResult, read_file};

/// Loader for match rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    pub fn load(path: &Path) -> LoadResult<RosterSpec> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<RosterSpec> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))
    }

    /// Builds every character of a roster against a skill catalog.
    pub fn build(
        roster: &RosterSpec,
        skills: &(impl SkillOracle + ?Sized),
    ) -> LoadResult<Vec<Character>> {
        roster
            .characters
            .iter()
            .map(|spec| {
                spec.build(skills)
                    .map_err(|e| anyhow::anyhow!("Roster entry {}: {}", spec.name, e))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::School;

    #[test]
    fn roster_defaults_resources() {
        let roster = RosterLoader::parse(
            r#"(characters: [(id: 1, name: "Sam", team: 0, school: Homeschool)])"#,
        )
        .unwrap();
        let spec = &roster.characters[0];
        assert_eq!(spec.school, School::Homeschool);
        assert_eq!(spec.max_warmth, arena_core::CombatConfig::DEFAULT_MAX_WARMTH);
        assert!(spec.skills.is_empty());
    }
}
