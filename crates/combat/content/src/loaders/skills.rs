//! Skill catalog loader.

use std::collections::HashMap;
use std::path::Path;

use combat_core::{Skill, SkillId};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Skill catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<Skill>,
}

/// Loader for the skill catalog from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load the skill catalog, keyed by skill id.
    pub fn load(path: &Path) -> LoadResult<HashMap<SkillId, Skill>> {
        let content = read_file(path)?;
        let catalog: SkillCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;

        let mut skills = HashMap::with_capacity(catalog.skills.len());
        for skill in catalog.skills {
            let id = skill.id.clone();
            if skills.insert(id.clone(), skill).is_some() {
                anyhow::bail!("duplicate skill id '{}' in {}", id, path.display());
            }
        }
        Ok(skills)
    }
}
