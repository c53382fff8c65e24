//! Data-driven combat content and loaders.
//!
//! This crate houses the static definitions the engine is fed with and
//! provides loaders for RON data files:
//! - hero roster (attributes + skill loadouts),
//! - skill catalog,
//! - item catalog plus the weighted loot roll,
//! - enemy spawn templates with boss overrides.
//!
//! Content is consumed by the host runtime and never appears in combat
//! state; all loaders deserialize straight into `combat-core` types via
//! serde.

pub mod loot;
pub mod roster;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use loot::{ChestTier, rarity_weight, roll_chest, roll_loot};
pub use roster::{ContentRoster, RosterOracle};

#[cfg(feature = "loaders")]
pub use loaders::{
    ContentFactory, EnemyLoader, HeroLoader, ItemLoader, SkillLoader,
};
