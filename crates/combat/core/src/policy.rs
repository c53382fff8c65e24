//! Enemy decision policy.
//!
//! Pure functions over the hero roster and the RNG seam, so the policy
//! is as replayable as the rest of the engine. The host runtime owns
//! the think-delay pacing; these functions return instantly.

use crate::combatant::{Combatant, CombatantId};
use crate::config::CombatConfig;
use crate::rng::DiceRng;
use crate::roll::attack_die;

/// A resolved enemy attack, before defense mitigation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStrike {
    /// Die face in `[1, 6]`.
    pub die: u8,
    /// Whether the die reached the enemy crit threshold (5+).
    pub crit: bool,
    /// Uniform damage variance drawn from `[0.9, 1.3)`.
    pub multiplier: f64,
    /// Damage before the target's defense applies.
    pub damage: i32,
}

/// Pick a hero to strike.
///
/// With probability `focus_chance` the policy focuses fire on the most
/// wounded hero (lowest `hp / max_hp`; first in roster order on a tie),
/// otherwise it picks uniformly among the living. Returns `None` only
/// when no hero is alive.
pub fn choose_target(
    rng: &mut dyn DiceRng,
    heroes: &[Combatant],
    focus_chance: f64,
) -> Option<CombatantId> {
    let living: Vec<&Combatant> = heroes.iter().filter(|h| h.is_alive()).collect();
    if living.is_empty() {
        return None;
    }

    if rng.next_f64() < focus_chance {
        let mut best = living[0];
        let mut best_ratio = hp_ratio(best);
        for hero in &living[1..] {
            let ratio = hp_ratio(hero);
            if ratio < best_ratio {
                best = hero;
                best_ratio = ratio;
            }
        }
        return Some(best.id);
    }

    let index = ((rng.next_f64() * living.len() as f64) as usize).min(living.len() - 1);
    Some(living[index].id)
}

fn hp_ratio(unit: &Combatant) -> f64 {
    f64::from(unit.hp) / f64::from(unit.max_hp.max(1))
}

/// Resolve the strength of an enemy attack.
///
/// The base is the attack stat scaled by a uniform variance in
/// `[0.9, 1.3)`; the damage die then decides the crit: a face of 5 or 6
/// multiplies the base by 1.5.
pub fn compute_strike(rng: &mut dyn DiceRng, attack: i32) -> EnemyStrike {
    let multiplier = 0.9 + rng.next_f64() * 0.4;
    let base = (f64::from(attack) * multiplier).floor() as i32;

    let die = attack_die(rng, attack).die;
    let crit = die >= CombatConfig::ENEMY_CRIT_DIE;
    let damage = if crit {
        (f64::from(base) * 1.5).floor() as i32
    } else {
        base
    };

    EnemyStrike {
        die,
        crit,
        multiplier,
        damage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::{Combatant, CombatantId};
    use crate::rng::ScriptedRng;

    fn hero(id: u32, hp: i32, max_hp: i32) -> Combatant {
        let mut unit = Combatant::builder(CombatantId(id), format!("hero-{id}"))
            .max_hp(max_hp)
            .build();
        unit.hp = hp;
        unit
    }

    #[test]
    fn focus_fire_picks_the_most_wounded() {
        let heroes = vec![hero(1, 50, 100), hero(2, 20, 100), hero(3, 80, 100)];
        // Focus roll 0.1 < 0.7.
        let mut rng = ScriptedRng::new([0.1]);
        assert_eq!(
            choose_target(&mut rng, &heroes, 0.7),
            Some(CombatantId(2))
        );
    }

    #[test]
    fn focus_fire_tie_keeps_roster_order() {
        let heroes = vec![hero(1, 50, 100), hero(2, 50, 100)];
        let mut rng = ScriptedRng::new([0.0]);
        assert_eq!(
            choose_target(&mut rng, &heroes, 0.7),
            Some(CombatantId(1))
        );
    }

    #[test]
    fn spread_branch_picks_uniformly_among_the_living() {
        let heroes = vec![hero(1, 90, 100), hero(2, 90, 100), hero(3, 90, 100)];
        // Focus roll 0.9 >= 0.7, index draw 0.5 -> floor(1.5) = slot 1.
        let mut rng = ScriptedRng::new([0.9, 0.5]);
        assert_eq!(
            choose_target(&mut rng, &heroes, 0.7),
            Some(CombatantId(2))
        );
    }

    #[test]
    fn dead_heroes_are_never_targeted() {
        // The most wounded hero is dead; focus falls to the living one.
        let heroes = vec![hero(1, 0, 100), hero(2, 70, 100)];
        for script in [vec![0.0], vec![0.9, 0.0], vec![0.9, 0.99]] {
            let mut rng = ScriptedRng::new(script);
            assert_eq!(
                choose_target(&mut rng, &heroes, 0.7),
                Some(CombatantId(2))
            );
        }
    }

    #[test]
    fn no_living_heroes_yields_none() {
        let heroes = vec![hero(1, 0, 100)];
        let mut rng = ScriptedRng::new([0.0]);
        assert_eq!(choose_target(&mut rng, &heroes, 0.7), None);
    }

    #[test]
    fn strike_scales_attack_by_the_variance_draw() {
        // Variance draw 0.25 -> 0.9 + 0.1 = 1.0; u = 1 zeroes the die
        // gaussian, landing a mid die (no crit).
        let mut rng = ScriptedRng::new([0.25, 1.0, 0.0]);
        let strike = compute_strike(&mut rng, 20);
        assert_eq!(strike.multiplier, 1.0);
        assert!(!strike.crit);
        assert_eq!(strike.damage, 20);
    }

    #[test]
    fn strike_crits_on_a_high_die() {
        // u -> 0 saturates the attack roll to the top face.
        let mut rng = ScriptedRng::new([0.25, 1e-9, 0.0]);
        let strike = compute_strike(&mut rng, 20);
        assert_eq!(strike.die, 6);
        assert!(strike.crit);
        // floor(20 * 1.0) = 20, crit -> floor(30).
        assert_eq!(strike.damage, 30);
    }

    #[test]
    fn strike_variance_stays_in_band() {
        let mut rng = crate::rng::Pcg32::new(5);
        for _ in 0..200 {
            let strike = compute_strike(&mut rng, 15);
            assert!((0.9..1.3).contains(&strike.multiplier));
            assert!(strike.damage >= (15.0 * 0.9) as i32 / 2);
        }
    }
}
