//! Roster oracle: the catalog-backed lookup surface the host runtime
//! consumes when it assembles encounters.

use std::collections::HashMap;

use combat_core::{Combatant, CombatantId, EnemySpawn, Item, ItemId, Skill, SkillId};

/// Lookup interface over the loaded content catalogs.
///
/// The runtime builds sessions through this seam so tests can feed a
/// hand-rolled roster instead of files on disk.
pub trait RosterOracle: Send + Sync {
    /// The persistent hero party, in roster order.
    fn heroes(&self) -> &[Combatant];

    /// A fresh copy of one hero.
    fn hero(&self, id: CombatantId) -> Option<Combatant>;

    fn skill(&self, id: &SkillId) -> Option<&Skill>;

    fn items(&self) -> &[Item];

    fn item(&self, id: &ItemId) -> Option<&Item>;

    /// Spawn an enemy from a template under the given session id.
    fn spawn(&self, template: &str, id: CombatantId) -> Option<Combatant>;
}

/// Roster backed by the loaded RON catalogs.
pub struct ContentRoster {
    heroes: Vec<Combatant>,
    skills: HashMap<SkillId, Skill>,
    items: Vec<Item>,
    spawns: HashMap<String, EnemySpawn>,
}

impl ContentRoster {
    pub fn new(
        heroes: Vec<Combatant>,
        skills: HashMap<SkillId, Skill>,
        items: Vec<Item>,
        spawns: HashMap<String, EnemySpawn>,
    ) -> Self {
        Self {
            heroes,
            skills,
            items,
            spawns,
        }
    }

    /// The raw spawn template, for encounter tuning.
    pub fn spawn_template(&self, template: &str) -> Option<&EnemySpawn> {
        self.spawns.get(template)
    }
}

impl RosterOracle for ContentRoster {
    fn heroes(&self) -> &[Combatant] {
        &self.heroes
    }

    fn hero(&self, id: CombatantId) -> Option<Combatant> {
        self.heroes.iter().find(|h| h.id == id).cloned()
    }

    fn skill(&self, id: &SkillId) -> Option<&Skill> {
        self.skills.get(id)
    }

    fn items(&self) -> &[Item] {
        &self.items
    }

    fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|i| &i.id == id)
    }

    fn spawn(&self, template: &str, id: CombatantId) -> Option<Combatant> {
        self.spawns
            .get(template)
            .map(|spawn| Combatant::enemy(id, spawn))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{EnemySpawn, StatOverrides};

    fn roster() -> ContentRoster {
        let hero = Combatant::builder(CombatantId(1), "Kael").build();
        let spawn = EnemySpawn {
            name: "Wolf".to_string(),
            level: 2,
            difficulty: 0.5,
            is_boss: false,
            overrides: StatOverrides::default(),
        };
        ContentRoster::new(
            vec![hero],
            HashMap::new(),
            Vec::new(),
            HashMap::from([("wolf".to_string(), spawn)]),
        )
    }

    #[test]
    fn hero_lookup_returns_a_copy() {
        let roster = roster();
        let mut hero = roster.hero(CombatantId(1)).unwrap();
        hero.hp = 1;
        // The roster's own record is untouched.
        assert_eq!(roster.heroes()[0].hp, roster.heroes()[0].max_hp);
    }

    #[test]
    fn spawn_builds_a_scaled_enemy_under_the_given_id() {
        let roster = roster();
        let wolf = roster.spawn("wolf", CombatantId(100)).unwrap();
        assert_eq!(wolf.id, CombatantId(100));
        assert_eq!(wolf.max_hp, 70); // 30 + 20 x 2
        assert!(roster.spawn("dragon", CombatantId(101)).is_none());
    }
}
