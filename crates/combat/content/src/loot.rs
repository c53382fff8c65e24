//! Weighted loot rolls and tiered chests.
//!
//! Rarity weights: common 5, rare 3, epic 1. A chest's tier constrains
//! the outcome by re-rolling: a rare chest never yields common, an epic
//! chest always yields epic. The draw goes through the engine's
//! [`DiceRng`] seam so loot is as replayable as combat.

use combat_core::{DiceRng, Item, Rarity};

/// Chest quality found on the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChestTier {
    /// Plain chest: unconstrained weighted roll.
    Plain,
    /// Rare chest: never yields a common item.
    Rare,
    /// Epic chest: always yields an epic item.
    Epic,
}

impl ChestTier {
    fn allows(self, rarity: Rarity) -> bool {
        match self {
            ChestTier::Plain => true,
            ChestTier::Rare => rarity != Rarity::Common,
            ChestTier::Epic => rarity == Rarity::Epic,
        }
    }
}

/// Draw weight of a rarity tier.
pub fn rarity_weight(rarity: Rarity) -> u32 {
    match rarity {
        Rarity::Common => 5,
        Rarity::Rare => 3,
        Rarity::Epic => 1,
    }
}

/// One weighted roll over the catalog. `None` only for an empty catalog.
pub fn roll_loot(rng: &mut dyn DiceRng, items: &[Item]) -> Option<Item> {
    if items.is_empty() {
        return None;
    }

    let total: u32 = items.iter().map(|i| rarity_weight(i.rarity)).sum();
    let mut roll = rng.next_f64() * f64::from(total);
    for item in items {
        roll -= f64::from(rarity_weight(item.rarity));
        if roll <= 0.0 {
            return Some(item.clone());
        }
    }
    // Numeric edge: the draw landed exactly on the total.
    items.last().cloned()
}

/// Roll a chest, re-rolling until the tier constraint is met.
///
/// `None` when no item in the catalog can satisfy the tier, so a
/// miss-configured catalog cannot spin forever.
pub fn roll_chest(rng: &mut dyn DiceRng, items: &[Item], tier: ChestTier) -> Option<Item> {
    if !items.iter().any(|i| tier.allows(i.rarity)) {
        return None;
    }

    loop {
        let item = roll_loot(rng, items)?;
        if tier.allows(item.rarity) {
            return Some(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{ItemId, Pcg32, ScriptedRng, StatBonuses};

    fn item(id: &str, rarity: Rarity) -> Item {
        Item {
            id: ItemId::new(id),
            name: id.to_string(),
            rarity,
            slot: 0,
            bonus: StatBonuses::zero(),
            desc: String::new(),
        }
    }

    fn catalog() -> Vec<Item> {
        vec![
            item("rusty_blade", Rarity::Common),
            item("knight_shield", Rarity::Rare),
            item("giant_sword", Rarity::Epic),
        ]
    }

    #[test]
    fn weighted_roll_respects_segment_boundaries() {
        // Weights 5/3/1 over a total of 9: draws below 5 land on the
        // common item, 5..8 on the rare one, 8..9 on the epic one.
        let items = catalog();
        for (draw, expected) in [(0.0, "rusty_blade"), (0.55, "rusty_blade"), (0.6, "knight_shield"), (0.95, "giant_sword")] {
            let mut rng = ScriptedRng::new([draw]);
            let rolled = roll_loot(&mut rng, &items).unwrap();
            assert_eq!(rolled.id.as_str(), expected, "draw={draw}");
        }
    }

    #[test]
    fn commons_dominate_over_many_rolls() {
        let items = catalog();
        let mut rng = Pcg32::new(7);
        let mut commons = 0;
        let mut epics = 0;
        for _ in 0..900 {
            match roll_loot(&mut rng, &items).unwrap().rarity {
                Rarity::Common => commons += 1,
                Rarity::Epic => epics += 1,
                Rarity::Rare => {}
            }
        }
        assert!(commons > epics * 2, "commons={commons} epics={epics}");
    }

    #[test]
    fn epic_chest_rerolls_until_epic() {
        let items = catalog();
        // First two draws land on lesser items, the third on the epic.
        let mut rng = ScriptedRng::new([0.0, 0.6, 0.95]);
        let rolled = roll_chest(&mut rng, &items, ChestTier::Epic).unwrap();
        assert_eq!(rolled.rarity, Rarity::Epic);
    }

    #[test]
    fn rare_chest_never_yields_common() {
        let items = catalog();
        let mut rng = Pcg32::new(3);
        for _ in 0..200 {
            let rolled = roll_chest(&mut rng, &items, ChestTier::Rare).unwrap();
            assert_ne!(rolled.rarity, Rarity::Common);
        }
    }

    #[test]
    fn unsatisfiable_tier_bails_instead_of_spinning() {
        let items = vec![item("rusty_blade", Rarity::Common)];
        let mut rng = Pcg32::new(1);
        assert!(roll_chest(&mut rng, &items, ChestTier::Epic).is_none());
        assert!(roll_loot(&mut rng, &[]).is_none());
    }
}
