//! Enemy template loader.

use std::collections::HashMap;
use std::path::Path;

use combat_core::{EnemySpawn, StatOverrides};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Enemy catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyCatalog {
    pub enemies: Vec<EnemySpec>,
}

/// One spawn template; `template` is the lookup key the exploration
/// layer uses when it triggers an encounter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemySpec {
    pub template: String,
    pub name: String,
    pub level: u32,
    #[serde(default = "default_difficulty")]
    pub difficulty: f64,
    #[serde(default)]
    pub is_boss: bool,
    #[serde(default)]
    pub overrides: OverrideSpec,
}

fn default_difficulty() -> f64 {
    0.5
}

/// Per-attribute replacements, all optional.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OverrideSpec {
    pub strength: Option<i32>,
    pub toughness: Option<i32>,
    pub intellect: Option<i32>,
    pub awareness: Option<i32>,
    pub talent: Option<i32>,
    pub agility: Option<i32>,
}

impl From<OverrideSpec> for StatOverrides {
    fn from(spec: OverrideSpec) -> Self {
        StatOverrides {
            strength: spec.strength,
            toughness: spec.toughness,
            intellect: spec.intellect,
            awareness: spec.awareness,
            talent: spec.talent,
            agility: spec.agility,
        }
    }
}

impl From<EnemySpec> for EnemySpawn {
    fn from(spec: EnemySpec) -> Self {
        EnemySpawn {
            name: spec.name,
            level: spec.level,
            difficulty: spec.difficulty,
            is_boss: spec.is_boss,
            overrides: spec.overrides.into(),
        }
    }
}

/// Loader for enemy spawn templates from RON files.
pub struct EnemyLoader;

impl EnemyLoader {
    /// Load the templates, keyed by template name.
    pub fn load(path: &Path) -> LoadResult<HashMap<String, EnemySpawn>> {
        let content = read_file(path)?;
        let catalog: EnemyCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy catalog RON: {}", e))?;

        let mut spawns = HashMap::with_capacity(catalog.enemies.len());
        for spec in catalog.enemies {
            let key = spec.template.clone();
            if spawns.insert(key.clone(), EnemySpawn::from(spec)).is_some() {
                anyhow::bail!("duplicate enemy template '{}' in {}", key, path.display());
            }
        }
        Ok(spawns)
    }
}
