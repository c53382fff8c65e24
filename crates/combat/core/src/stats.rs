//! Base attributes and derived combat stats.
//!
//! The six base attributes are the single source of truth; attack,
//! defense and speed are derived from them (plus flat equipment
//! bonuses) and refreshed whenever the base values or equipment change.
//! Stat access goes through the enumerated [`StatKey`] with an
//! exhaustive match, so a skill can never reference a stat that does
//! not exist.

use strum::EnumIter;

/// The six base attributes that define a combatant.
///
/// - **Strength**: physical power, melee damage
/// - **Toughness**: physical defense, staying power
/// - **Intellect**: magic damage, skill potency
/// - **Awareness**: initiative, scouting, control resistance
/// - **Talent**: special skills, auras, support
/// - **Agility**: speed, evasion, crit tendency
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    pub strength: i32,
    pub toughness: i32,
    pub intellect: i32,
    pub awareness: i32,
    pub talent: i32,
    pub agility: i32,
}

/// Enumerated key for attribute access.
///
/// Skills and items reference stats through this key instead of a
/// runtime string lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatKey {
    Strength,
    Toughness,
    Intellect,
    Awareness,
    Talent,
    Agility,
}

impl Attributes {
    /// All-zero attribute block, the identity for bonus stacking.
    pub fn zero() -> Self {
        Self::uniform(0)
    }

    /// All attributes at the given value.
    pub fn uniform(value: i32) -> Self {
        Self {
            strength: value,
            toughness: value,
            intellect: value,
            awareness: value,
            talent: value,
            agility: value,
        }
    }

    /// Read an attribute by key.
    pub fn get(&self, key: StatKey) -> i32 {
        match key {
            StatKey::Strength => self.strength,
            StatKey::Toughness => self.toughness,
            StatKey::Intellect => self.intellect,
            StatKey::Awareness => self.awareness,
            StatKey::Talent => self.talent,
            StatKey::Agility => self.agility,
        }
    }

    /// Mutable access to an attribute by key.
    pub fn get_mut(&mut self, key: StatKey) -> &mut i32 {
        match key {
            StatKey::Strength => &mut self.strength,
            StatKey::Toughness => &mut self.toughness,
            StatKey::Intellect => &mut self.intellect,
            StatKey::Awareness => &mut self.awareness,
            StatKey::Talent => &mut self.talent,
            StatKey::Agility => &mut self.agility,
        }
    }

    /// Add another attribute block component-wise (equipment bonuses).
    pub fn add(&mut self, other: &Attributes) {
        self.strength += other.strength;
        self.toughness += other.toughness;
        self.intellect += other.intellect;
        self.awareness += other.awareness;
        self.talent += other.talent;
        self.agility += other.agility;
    }
}

impl Default for Attributes {
    /// Default attributes: all 10 (an average adventurer).
    fn default() -> Self {
        Self::uniform(10)
    }
}

/// Stats derived from the base attributes.
///
/// # Formulas
///
/// ```text
/// attack  = strength  + flat bonuses
/// defense = toughness + flat bonuses
/// speed   = round(agility / 2) + flat bonuses
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedStats {
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
}

impl DerivedStats {
    /// Compute derived stats from effective attributes.
    pub fn from_attributes(attrs: &Attributes) -> Self {
        Self {
            attack: attrs.strength,
            defense: attrs.toughness,
            // Round-half-up matches the original agility/2 mapping.
            speed: (attrs.agility + 1) / 2,
        }
    }
}
