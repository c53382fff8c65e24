//! Damage and healing math.
//!
//! Pure functions shared by the action resolver and the enemy policy.
//! All hp mutation funnels through [`apply_hp_loss`] / [`apply_heal`],
//! which uphold the `0 <= hp <= max_hp` invariant.

use crate::config::CombatConfig;

/// Base damage of a skill use before mitigation.
///
/// # Formula
///
/// ```text
/// base = floor(attack * power/100 * multiplier)
/// ```
pub fn skill_base(attack: i32, power: u32, multiplier: f64) -> i32 {
    (f64::from(attack) * f64::from(power) / 100.0 * multiplier).floor() as i32
}

/// Defense mitigation with the minimum-damage floor.
///
/// `final = max(1, base - defense)`: a landed hit always costs at
/// least one hp.
pub fn mitigate(base: i32, defense: i32) -> i32 {
    (base - defense).max(CombatConfig::MIN_DAMAGE)
}

/// Subtract damage from hp, flooring at zero. Returns the new hp.
pub fn apply_hp_loss(hp: i32, damage: i32) -> i32 {
    (hp - damage).max(0)
}

/// Add healing to hp, clamped to `max_hp`. Returns the new hp.
pub fn apply_heal(hp: i32, amount: i32, max_hp: i32) -> i32 {
    (hp + amount).min(max_hp)
}
