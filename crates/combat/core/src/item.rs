//! Equipment and loot definitions.
//!
//! Items carry flat attribute bonuses; equipping one re-derives the
//! owner's attack/defense/speed. Loot rarity weights live with the
//! content catalogs; the core only knows the tiers.

use crate::stats::Attributes;

/// Identifier of an item definition (e.g. `"giant_sword"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Loot rarity tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
}

/// Flat attribute bonuses granted by an item.
///
/// Stored as a full attribute block with zero defaults so equipment
/// math is a single component-wise add.
pub type StatBonuses = Attributes;

/// An equippable item.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub rarity: Rarity,
    /// Equip slot index: 0 = weapon/armor, 1 = accessory.
    pub slot: usize,
    #[cfg_attr(feature = "serde", serde(default = "StatBonuses::zero"))]
    pub bonus: StatBonuses,
    #[cfg_attr(feature = "serde", serde(default))]
    pub desc: String,
}
