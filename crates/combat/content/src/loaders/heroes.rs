//! Hero roster loader.

use std::collections::HashMap;
use std::path::Path;

use combat_core::{Attributes, Combatant, CombatantId, CombatConfig, Skill, SkillId};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Hero catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroCatalog {
    pub heroes: Vec<HeroSpec>,
}

/// One hero entry; skills reference the skill catalog by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroSpec {
    pub id: u32,
    pub name: String,
    #[serde(default = "default_max_hp")]
    pub max_hp: i32,
    #[serde(default)]
    pub attributes: AttributeSpec,
    #[serde(default)]
    pub skills: Vec<String>,
}

fn default_max_hp() -> i32 {
    100
}

/// Attribute block with per-field defaults so data files only list the
/// values that differ from the baseline of 10.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeSpec {
    pub strength: i32,
    pub toughness: i32,
    pub intellect: i32,
    pub awareness: i32,
    pub talent: i32,
    pub agility: i32,
}

impl Default for AttributeSpec {
    fn default() -> Self {
        Self {
            strength: 10,
            toughness: 10,
            intellect: 10,
            awareness: 10,
            talent: 10,
            agility: 10,
        }
    }
}

impl From<AttributeSpec> for Attributes {
    fn from(spec: AttributeSpec) -> Self {
        Attributes {
            strength: spec.strength,
            toughness: spec.toughness,
            intellect: spec.intellect,
            awareness: spec.awareness,
            talent: spec.talent,
            agility: spec.agility,
        }
    }
}

impl HeroSpec {
    /// Build the hero, resolving its skill loadout against the catalog.
    pub fn build(&self, skills: &HashMap<SkillId, Skill>) -> LoadResult<Combatant> {
        if self.skills.len() > CombatConfig::MAX_SKILL_SLOTS {
            anyhow::bail!(
                "hero '{}' lists {} skills (max {})",
                self.name,
                self.skills.len(),
                CombatConfig::MAX_SKILL_SLOTS
            );
        }

        let mut builder = Combatant::builder(CombatantId(self.id), self.name.clone())
            .max_hp(self.max_hp)
            .attributes(self.attributes.into());
        for skill_id in &self.skills {
            let skill = skills
                .get(&SkillId::new(skill_id.clone()))
                .ok_or_else(|| {
                    anyhow::anyhow!("hero '{}' references unknown skill '{}'", self.name, skill_id)
                })?;
            builder = builder.skill(skill.clone());
        }
        Ok(builder.build())
    }
}

/// Loader for the hero roster from RON files.
pub struct HeroLoader;

impl HeroLoader {
    /// Load the hero roster, resolving skills against the catalog.
    pub fn load(path: &Path, skills: &HashMap<SkillId, Skill>) -> LoadResult<Vec<Combatant>> {
        let content = read_file(path)?;
        let catalog: HeroCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse hero catalog RON: {}", e))?;

        catalog.heroes.iter().map(|spec| spec.build(skills)).collect()
    }
}
