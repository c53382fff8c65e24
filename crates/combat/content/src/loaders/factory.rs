//! Content factory for assembling the roster from a data directory.

use std::path::{Path, PathBuf};

use std::collections::HashMap;

use combat_core::{Combatant, EnemySpawn, Item, Skill, SkillId};

use crate::loaders::{EnemyLoader, HeroLoader, ItemLoader, LoadResult, SkillLoader};
use crate::roster::ContentRoster;

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── skills.ron
/// ├── heroes.ron
/// ├── items.ron
/// └── enemies.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load the skill catalog from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<HashMap<SkillId, Skill>> {
        SkillLoader::load(&self.data_dir.join("skills.ron"))
    }

    /// Load the hero roster from `heroes.ron`, resolving skill ids
    /// against an already-loaded catalog.
    pub fn load_heroes(&self, skills: &HashMap<SkillId, Skill>) -> LoadResult<Vec<Combatant>> {
        HeroLoader::load(&self.data_dir.join("heroes.ron"), skills)
    }

    /// Load the item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<Vec<Item>> {
        ItemLoader::load(&self.data_dir.join("items.ron"))
    }

    /// Load enemy spawn templates from `enemies.ron`.
    pub fn load_enemies(&self) -> LoadResult<HashMap<String, EnemySpawn>> {
        EnemyLoader::load(&self.data_dir.join("enemies.ron"))
    }

    /// Load everything and assemble the roster oracle.
    pub fn load_roster(&self) -> LoadResult<ContentRoster> {
        let skills = self.load_skills()?;
        let heroes = self.load_heroes(&skills)?;
        let items = self.load_items()?;
        let spawns = self.load_enemies()?;
        Ok(ContentRoster::new(heroes, skills, items, spawns))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::RosterOracle;
    use combat_core::{CombatantId, Rarity, SkillKind};

    fn shipped_data() -> ContentFactory {
        ContentFactory::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    #[test]
    fn shipped_skill_catalog_parses() {
        let skills = shipped_data().load_skills().unwrap();
        let slash = &skills[&SkillId::new("slash")];
        assert_eq!(slash.kind, SkillKind::Normal);
        assert!(slash.combo);

        let nova = &skills[&SkillId::new("frost_nova")];
        assert_eq!(nova.kind, SkillKind::Aoe);
        assert!(nova.freeze);
    }

    #[test]
    fn shipped_hero_roster_parses_and_resolves_skills() {
        let factory = shipped_data();
        let skills = factory.load_skills().unwrap();
        let heroes = factory.load_heroes(&skills).unwrap();
        assert_eq!(heroes.len(), 3);

        let kael = &heroes[0];
        assert_eq!(kael.id, CombatantId(1));
        assert_eq!(kael.max_hp, 120);
        assert_eq!(kael.derived.attack, 16);
        // Unlisted attributes fall back to the baseline of 10.
        assert_eq!(kael.attributes.agility, 10);
        assert!(kael.skill(&SkillId::new("slash")).is_some());
    }

    #[test]
    fn shipped_item_catalog_parses_with_default_bonuses() {
        let items = shipped_data().load_items().unwrap();
        assert_eq!(items.len(), 5);

        let sword = items.iter().find(|i| i.id.as_str() == "giant_sword").unwrap();
        assert_eq!(sword.rarity, Rarity::Epic);
        assert_eq!(sword.bonus.strength, 12);
        assert_eq!(sword.bonus.agility, 0);

        let water = items.iter().find(|i| i.id.as_str() == "holy_water").unwrap();
        assert_eq!(water.bonus.strength, 0);
    }

    #[test]
    fn shipped_enemy_templates_parse_with_boss_overrides() {
        let spawns = shipped_data().load_enemies().unwrap();
        let chief = &spawns["goblin_chief"];
        assert!(chief.is_boss);
        assert_eq!(chief.overrides.strength, Some(24));
        assert_eq!(chief.overrides.agility, None);

        let wolf = &spawns["wolf"];
        assert_eq!(wolf.level, 1);
        assert_eq!(wolf.difficulty, 0.5);
    }

    #[test]
    fn full_roster_assembles() {
        let roster = shipped_data().load_roster().unwrap();
        assert_eq!(roster.heroes().len(), 3);
        assert!(roster.spawn("dire_wolf", CombatantId(100)).is_some());
    }

    #[test]
    fn missing_file_reports_its_path() {
        let factory = ContentFactory::new("/nonexistent/data");
        let err = factory.load_skills().unwrap_err();
        assert!(err.to_string().contains("skills.ron"));
    }
}
