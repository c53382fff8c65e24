//! Item catalog loader.

use std::path::Path;

use combat_core::{Item, ItemId, Rarity, StatBonuses};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemSpec>,
}

/// One item entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSpec {
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
    /// Equip slot index: 0 = weapon/armor, 1 = accessory.
    pub slot: usize,
    #[serde(default)]
    pub bonus: BonusSpec,
    #[serde(default)]
    pub desc: String,
}

/// Flat bonus block with zero defaults so data files only list the
/// attributes an item actually raises.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusSpec {
    pub strength: i32,
    pub toughness: i32,
    pub intellect: i32,
    pub awareness: i32,
    pub talent: i32,
    pub agility: i32,
}

impl From<BonusSpec> for StatBonuses {
    fn from(spec: BonusSpec) -> Self {
        StatBonuses {
            strength: spec.strength,
            toughness: spec.toughness,
            intellect: spec.intellect,
            awareness: spec.awareness,
            talent: spec.talent,
            agility: spec.agility,
        }
    }
}

impl From<ItemSpec> for Item {
    fn from(spec: ItemSpec) -> Self {
        Item {
            id: ItemId::new(spec.id),
            name: spec.name,
            rarity: spec.rarity,
            slot: spec.slot,
            bonus: spec.bonus.into(),
            desc: spec.desc,
        }
    }
}

/// Loader for the item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load the item catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<Item>> {
        let content = read_file(path)?;
        let catalog: ItemCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        Ok(catalog.items.into_iter().map(Item::from).collect())
    }
}
