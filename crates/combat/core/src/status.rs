//! Freeze status bookkeeping.
//!
//! Freeze is the only combat status: a per-unit counter of upcoming
//! turns the unit will skip. The scheduler consumes one charge each
//! time a frozen unit's turn arrives.
//!
//! Area freeze *overwrites* the counter to [`CombatConfig::FREEZE_TURNS`]
//! on every currently-living target, regardless of any remaining
//! charges. Observed product behavior, kept as-is (it neither stacks
//! nor takes the max; pending product confirmation).

use crate::combatant::Combatant;
use crate::config::CombatConfig;

/// Consume one freeze charge. Returns `true` if the unit was frozen
/// and must skip this turn.
pub fn consume_freeze(unit: &mut Combatant) -> bool {
    if unit.frozen_turns == 0 {
        return false;
    }
    unit.frozen_turns -= 1;
    true
}

/// Overwrite the freeze counter on every living unit in the slice.
pub fn freeze_all_living(units: &mut [Combatant]) {
    for unit in units.iter_mut().filter(|u| u.is_alive()) {
        unit.frozen_turns = CombatConfig::FREEZE_TURNS;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::{CombatantId, EnemySpawn, StatOverrides};

    fn enemy(id: u32, hp: i32) -> Combatant {
        let mut unit = Combatant::enemy(
            CombatantId(id),
            &EnemySpawn {
                name: format!("enemy-{id}"),
                level: 1,
                difficulty: 0.5,
                is_boss: false,
                overrides: StatOverrides::default(),
            },
        );
        unit.hp = hp;
        unit
    }

    #[test]
    fn consume_counts_down_to_zero() {
        let mut unit = enemy(1, 10);
        unit.frozen_turns = 2;
        assert!(consume_freeze(&mut unit));
        assert!(consume_freeze(&mut unit));
        assert!(!consume_freeze(&mut unit));
        assert_eq!(unit.frozen_turns, 0);
    }

    #[test]
    fn area_freeze_overwrites_regardless_of_prior_value() {
        let mut units = vec![enemy(1, 10), enemy(2, 10), enemy(3, 10)];
        units[0].frozen_turns = 5;
        units[1].frozen_turns = 1;

        freeze_all_living(&mut units);
        for unit in &units {
            assert_eq!(unit.frozen_turns, 2);
        }
    }

    #[test]
    fn area_freeze_skips_the_dead() {
        let mut units = vec![enemy(1, 10), enemy(2, 0)];
        freeze_all_living(&mut units);
        assert_eq!(units[0].frozen_turns, 2);
        assert_eq!(units[1].frozen_turns, 0);
    }
}
