//! Combatant state and construction.
//!
//! Heroes are persistent records owned by the host and handed to each
//! session; enemies are spawned fresh per encounter from an
//! [`EnemySpawn`] descriptor and discarded afterwards. Both share one
//! state shape so the resolver never branches on the unit class.

use crate::config::CombatConfig;
use crate::error::SkillSlotError;
use crate::item::Item;
use crate::skill::{Skill, SkillId};
use crate::stats::{Attributes, DerivedStats};

/// Stable identifier of a combatant within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

/// Which side of the battlefield a unit fights on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Enemy,
}

/// A unit participating in combat.
#[derive(Clone, Debug, PartialEq)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub attributes: Attributes,
    pub derived: DerivedStats,
    pub side: Side,
    pub level: u32,
    /// Turns this unit will skip before acting again.
    pub frozen_turns: u32,
    /// Skill loadout; empty slots stay selectable-free.
    pub skills: [Option<Skill>; CombatConfig::MAX_SKILL_SLOTS],
    /// Equipment: slot 0 = weapon/armor, slot 1 = accessory.
    pub equipment: [Option<Item>; CombatConfig::MAX_EQUIP_SLOTS],
    /// Unequipped items carried by the unit.
    pub inventory: Vec<Item>,
}

impl Combatant {
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Re-derive attack/defense/speed from base attributes plus the
    /// flat bonuses of everything currently equipped.
    pub fn refresh_derived(&mut self) {
        let mut effective = self.attributes;
        for item in self.equipment.iter().flatten() {
            effective.add(&item.bonus);
        }
        self.derived = DerivedStats::from_attributes(&effective);
    }

    // ── Skill slots ─────────────────────────────────────────────────

    /// Put a skill into a slot; returns the replaced skill, if any.
    pub fn equip_skill(
        &mut self,
        skill: Skill,
        slot: usize,
    ) -> Result<Option<Skill>, SkillSlotError> {
        let max = CombatConfig::MAX_SKILL_SLOTS;
        if slot >= max {
            return Err(SkillSlotError::OutOfRange { index: slot, max });
        }
        Ok(self.skills[slot].replace(skill))
    }

    /// Clear a slot; returns the removed skill, if any.
    pub fn unequip_skill(&mut self, slot: usize) -> Result<Option<Skill>, SkillSlotError> {
        let max = CombatConfig::MAX_SKILL_SLOTS;
        if slot >= max {
            return Err(SkillSlotError::OutOfRange { index: slot, max });
        }
        Ok(self.skills[slot].take())
    }

    /// All equipped (non-empty) skills in slot order.
    pub fn equipped_skills(&self) -> impl Iterator<Item = &Skill> {
        self.skills.iter().flatten()
    }

    /// Look up an equipped skill by id.
    pub fn skill(&self, id: &SkillId) -> Option<&Skill> {
        self.equipped_skills().find(|s| &s.id == id)
    }

    // ── Equipment slots ─────────────────────────────────────────────

    /// Equip an item; any previous occupant goes back to the inventory.
    pub fn equip(&mut self, item: Item, slot: usize) {
        let slot = slot.min(CombatConfig::MAX_EQUIP_SLOTS - 1);
        if let Some(previous) = self.equipment[slot].replace(item) {
            self.inventory.push(previous);
        }
        self.refresh_derived();
    }

    /// Unequip a slot into the inventory; returns whether it held an item.
    pub fn unequip(&mut self, slot: usize) -> bool {
        let slot = slot.min(CombatConfig::MAX_EQUIP_SLOTS - 1);
        match self.equipment[slot].take() {
            Some(item) => {
                self.inventory.push(item);
                self.refresh_derived();
                true
            }
            None => false,
        }
    }

    /// Builder for hero construction.
    pub fn builder(id: CombatantId, name: impl Into<String>) -> CombatantBuilder {
        CombatantBuilder {
            id,
            name: name.into(),
            max_hp: 100,
            attributes: Attributes::default(),
            side: Side::Player,
            level: 1,
            skills: Vec::new(),
        }
    }

    /// Spawn an ephemeral enemy from an encounter descriptor.
    ///
    /// # Scaling (level 1 baseline, per additional level)
    ///
    /// ```text
    /// hp        = 30 + 20 × level
    /// strength  12 (+4)    toughness  8 (+3)   intellect 6 (+2)
    /// awareness  8 (+2)    talent     5 (+1)   agility   8 (+2)
    /// ```
    ///
    /// Overrides replace individual base attributes for bosses/elites.
    pub fn enemy(id: CombatantId, spawn: &EnemySpawn) -> Self {
        let level = spawn.level.max(1) as i32;
        let hp = 30 + level * 20;
        let step = level - 1;

        let o = &spawn.overrides;
        let attributes = Attributes {
            strength: o.strength.unwrap_or(12 + step * 4),
            toughness: o.toughness.unwrap_or(8 + step * 3),
            intellect: o.intellect.unwrap_or(6 + step * 2),
            awareness: o.awareness.unwrap_or(8 + step * 2),
            talent: o.talent.unwrap_or(5 + step),
            agility: o.agility.unwrap_or(8 + step * 2),
        };

        let mut unit = Self {
            id,
            name: spawn.name.clone(),
            hp,
            max_hp: hp,
            attributes,
            derived: DerivedStats::default(),
            side: Side::Enemy,
            level: spawn.level.max(1),
            frozen_turns: 0,
            skills: Default::default(),
            equipment: Default::default(),
            inventory: Vec::new(),
        };
        unit.refresh_derived();
        unit
    }
}

/// Encounter descriptor supplied by the exploration collaborator.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemySpawn {
    pub name: String,
    pub level: u32,
    /// Encounter difficulty knob, carried through to roll penalties.
    pub difficulty: f64,
    pub is_boss: bool,
    /// Per-stat replacements for bosses/elites.
    #[cfg_attr(feature = "serde", serde(default))]
    pub overrides: StatOverrides,
}

/// Optional per-attribute replacements applied at enemy spawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatOverrides {
    pub strength: Option<i32>,
    pub toughness: Option<i32>,
    pub intellect: Option<i32>,
    pub awareness: Option<i32>,
    pub talent: Option<i32>,
    pub agility: Option<i32>,
}

/// Builder for hero combatants.
pub struct CombatantBuilder {
    id: CombatantId,
    name: String,
    max_hp: i32,
    attributes: Attributes,
    side: Side,
    level: u32,
    skills: Vec<Skill>,
}

impl CombatantBuilder {
    pub fn max_hp(mut self, max_hp: i32) -> Self {
        self.max_hp = max_hp;
        self
    }

    pub fn attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    /// Append a skill into the next free slot (ignored past slot 4).
    pub fn skill(mut self, skill: Skill) -> Self {
        self.skills.push(skill);
        self
    }

    pub fn build(self) -> Combatant {
        let mut skills: [Option<Skill>; CombatConfig::MAX_SKILL_SLOTS] = Default::default();
        for (slot, skill) in self.skills.into_iter().take(CombatConfig::MAX_SKILL_SLOTS).enumerate()
        {
            skills[slot] = Some(skill);
        }

        let mut unit = Combatant {
            id: self.id,
            name: self.name,
            hp: self.max_hp,
            max_hp: self.max_hp,
            attributes: self.attributes,
            derived: DerivedStats::default(),
            side: self.side,
            level: self.level,
            frozen_turns: 0,
            skills,
            equipment: Default::default(),
            inventory: Vec::new(),
        };
        unit.refresh_derived();
        unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Item, ItemId, Rarity};
    use crate::stats::Attributes;

    fn sword() -> Item {
        Item {
            id: ItemId::new("giant_sword"),
            name: "Giant Sword".to_string(),
            rarity: Rarity::Epic,
            slot: 0,
            bonus: Attributes {
                strength: 12,
                ..Attributes::zero()
            },
            desc: String::new(),
        }
    }

    #[test]
    fn enemy_scaling_matches_baseline() {
        let spawn = EnemySpawn {
            name: "Wolf".to_string(),
            level: 1,
            difficulty: 0.5,
            is_boss: false,
            overrides: StatOverrides::default(),
        };
        let enemy = Combatant::enemy(CombatantId(10), &spawn);
        assert_eq!(enemy.max_hp, 50);
        assert_eq!(enemy.attributes.strength, 12);
        assert_eq!(enemy.attributes.talent, 5);
        assert_eq!(enemy.derived.attack, 12);
        assert_eq!(enemy.derived.speed, 4);
    }

    #[test]
    fn enemy_scaling_steps_per_level() {
        let spawn = EnemySpawn {
            name: "Dire Wolf".to_string(),
            level: 3,
            difficulty: 0.5,
            is_boss: false,
            overrides: StatOverrides::default(),
        };
        let enemy = Combatant::enemy(CombatantId(10), &spawn);
        assert_eq!(enemy.max_hp, 90);
        assert_eq!(enemy.attributes.strength, 20);
        assert_eq!(enemy.attributes.toughness, 14);
        assert_eq!(enemy.attributes.talent, 7);
    }

    #[test]
    fn overrides_replace_scaled_stats() {
        let spawn = EnemySpawn {
            name: "Elite Chief".to_string(),
            level: 2,
            difficulty: 0.75,
            is_boss: true,
            overrides: StatOverrides {
                strength: Some(32),
                toughness: Some(26),
                ..StatOverrides::default()
            },
        };
        let enemy = Combatant::enemy(CombatantId(11), &spawn);
        assert_eq!(enemy.attributes.strength, 32);
        assert_eq!(enemy.attributes.toughness, 26);
        // Untouched stats still scale.
        assert_eq!(enemy.attributes.agility, 10);
    }

    #[test]
    fn equipping_refreshes_derived_and_banks_the_previous_item() {
        let mut hero = Combatant::builder(CombatantId(0), "Knight").build();
        assert_eq!(hero.derived.attack, 10);

        hero.equip(sword(), 0);
        assert_eq!(hero.derived.attack, 22);
        assert!(hero.inventory.is_empty());

        let mut second = sword();
        second.id = ItemId::new("second_sword");
        hero.equip(second, 0);
        assert_eq!(hero.inventory.len(), 1);
        assert_eq!(hero.inventory[0].id.as_str(), "giant_sword");

        assert!(hero.unequip(0));
        assert_eq!(hero.derived.attack, 10);
        assert_eq!(hero.inventory.len(), 2);
    }

    #[test]
    fn skill_slots_replace_and_report() {
        let mut hero = Combatant::builder(CombatantId(0), "Mage").build();
        let fireball = Skill {
            id: SkillId::new("fireball"),
            name: "Fireball".to_string(),
            kind: crate::skill::SkillKind::Normal,
            power: 120,
            combo: false,
            freeze: false,
            desc: String::new(),
        };

        assert!(hero.equip_skill(fireball.clone(), 1).unwrap().is_none());
        assert!(hero.skill(&SkillId::new("fireball")).is_some());
        assert_eq!(hero.equipped_skills().count(), 1);

        assert!(hero.equip_skill(Skill::basic_attack(), 1).unwrap().is_some());
        assert!(hero.equip_skill(fireball, 9).is_err());
    }
}
