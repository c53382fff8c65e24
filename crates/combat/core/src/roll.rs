//! Probabilistic roll resolution ("dice").
//!
//! A roll maps a stat and a difficulty onto a normal distribution over
//! `[0, max_points]`, draws one sample, and buckets it into five equal
//! outcome segments:
//!
//! ```text
//! stat_bonus = stat_value / stat_scale
//! net_offset = (stat_bonus - difficulty) + bias        (roughly [-1, 1])
//! mu         = max_points/2 + net_offset * max_points/2
//! sigma      = max_points / sigma_divisor
//! sample     = clamp(mu + gaussian() * sigma, 0, max_points)
//! grade      = segment index, min(4, floor(sample / (max_points/5)))
//! ```
//!
//! With `net_offset = 0` the distribution is centered and the five
//! grades come out roughly 2% / 24% / 48% / 24% / 2%; shifting the mean
//! by half the range pushes nearly all mass into the top or bottom two
//! segments. The functions here are pure aside from RNG consumption.

use std::fmt;

use crate::config::CombatConfig;
use crate::rng::DiceRng;

/// Number of outcome segments a roll range is divided into.
pub const GRADE_SEGMENTS: u32 = 5;

/// Floor applied to the first Box–Muller uniform so `ln(0)` cannot occur.
const UNIFORM_FLOOR: f64 = 1e-10;

/// One of five discrete outcome tiers bucketing a continuous roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Grade {
    CriticalFail,
    Fail,
    Normal,
    Success,
    CriticalSuccess,
}

impl Grade {
    /// Grade for a segment index in `[0, 4]`.
    pub fn from_index(index: u32) -> Self {
        match index {
            0 => Grade::CriticalFail,
            1 => Grade::Fail,
            2 => Grade::Normal,
            3 => Grade::Success,
            _ => Grade::CriticalSuccess,
        }
    }

    /// Segment index in `[0, 4]`.
    pub fn index(self) -> u32 {
        match self {
            Grade::CriticalFail => 0,
            Grade::Fail => 1,
            Grade::Normal => 2,
            Grade::Success => 3,
            Grade::CriticalSuccess => 4,
        }
    }
}

/// Tunable parameters of a roll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RollParams {
    /// Difficulty penalty subtracted from the stat bonus. 0.0 is
    /// trivial, 0.5 normal, 1.0 extreme; values outside `[0, 1]` are
    /// allowed and simply push the mean further.
    pub difficulty: f64,
    /// Normalization base for the stat value.
    pub stat_scale: f64,
    /// `sigma = max_points / sigma_divisor`. Smaller divisor means a
    /// wider spread, so luck weighs more.
    pub sigma_divisor: f64,
    /// Extra mean offset from buffs/debuffs.
    pub bias: f64,
}

impl Default for RollParams {
    fn default() -> Self {
        Self {
            difficulty: 0.5,
            stat_scale: 100.0,
            sigma_divisor: 5.0,
            bias: 0.0,
        }
    }
}

/// Outcome of a graded roll.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollResult {
    /// Sample clamped to `[0, max_points]`.
    pub sample_roll: f64,
    /// Upper bound of the roll range.
    pub max_points: f64,
    /// Outcome tier.
    pub grade: Grade,
    /// Mean of the sampled distribution.
    pub mu: f64,
    /// Standard deviation of the sampled distribution.
    pub sigma: f64,
    /// Net mean offset: `(stat_bonus - difficulty) + bias`.
    pub net_offset: f64,
    /// Normalized stat contribution.
    pub stat_bonus: f64,
}

impl fmt::Display for RollResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {:.1}/{:.0} | mu={:.1} sigma={:.1} | offset={:+.2}",
            self.grade, self.sample_roll, self.max_points, self.mu, self.sigma, self.net_offset
        )
    }
}

/// One standard-normal sample via the Box–Muller transform.
///
/// Consumes two independent uniforms; the first is floored away from
/// zero so the logarithm is always finite.
fn gaussian(rng: &mut dyn DiceRng) -> f64 {
    let u = rng.next_f64().max(UNIFORM_FLOOR);
    let v = rng.next_f64();
    (-2.0 * u.ln()).sqrt() * (std::f64::consts::TAU * v).cos()
}

/// Graded roll of `stat_value` over `[0, max_points]`.
///
/// Pure aside from RNG consumption; never panics for `max_points > 0`.
pub fn roll(rng: &mut dyn DiceRng, stat_value: f64, max_points: f64, params: RollParams) -> RollResult {
    let stat_bonus = stat_value / params.stat_scale;
    let net_offset = (stat_bonus - params.difficulty) + params.bias;

    let mid = max_points / 2.0;
    let mu = mid + net_offset * mid;
    let sigma = max_points / params.sigma_divisor;

    let raw = mu + gaussian(rng) * sigma;
    let sample_roll = raw.clamp(0.0, max_points);

    let seg_size = max_points / f64::from(GRADE_SEGMENTS);
    let seg_index = ((sample_roll / seg_size).floor() as u32).min(GRADE_SEGMENTS - 1);

    RollResult {
        sample_roll,
        max_points,
        grade: Grade::from_index(seg_index),
        mu,
        sigma,
        net_offset,
        stat_bonus,
    }
}

// ============================================================================
// Calibration wrappers
// ============================================================================
// Each stat category has a fixed normalization base so the same engine
// covers attack (0..50), defense (0..50) and speed (0..10) checks.

/// Attack check: `stat_scale = 50` fits attack values in `0..50`.
pub fn roll_attack(rng: &mut dyn DiceRng, attack: i32, difficulty: f64, max_points: f64) -> RollResult {
    roll(
        rng,
        f64::from(attack),
        max_points,
        RollParams {
            difficulty,
            stat_scale: CombatConfig::ATTACK_STAT_SCALE,
            ..RollParams::default()
        },
    )
}

/// Defense check.
pub fn roll_defense(rng: &mut dyn DiceRng, defense: i32, difficulty: f64, max_points: f64) -> RollResult {
    roll(
        rng,
        f64::from(defense),
        max_points,
        RollParams {
            difficulty,
            stat_scale: 50.0,
            ..RollParams::default()
        },
    )
}

/// Speed / initiative check: `stat_scale = 10` fits speed in `0..10`.
pub fn roll_speed(rng: &mut dyn DiceRng, speed: i32, difficulty: f64, max_points: f64) -> RollResult {
    roll(
        rng,
        f64::from(speed),
        max_points,
        RollParams {
            difficulty,
            stat_scale: 10.0,
            ..RollParams::default()
        },
    )
}

/// General check with a buff/debuff mean offset.
pub fn roll_with_bias(rng: &mut dyn DiceRng, stat_value: f64, max_points: f64, bias: f64) -> RollResult {
    roll(
        rng,
        stat_value,
        max_points,
        RollParams {
            bias,
            ..RollParams::default()
        },
    )
}

// ============================================================================
// Die derivation
// ============================================================================

/// Damage multiplier tier derived from the die value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum DamageTier {
    Weak,
    Normal,
    Crit,
    Perfect,
}

impl DamageTier {
    /// Tier for a die value in `[1, 6]`.
    ///
    /// 1–2 → Weak, 3–4 → Normal, 5 → Crit, 6 → Perfect.
    pub fn from_die(die: u8) -> Self {
        match die {
            1 | 2 => DamageTier::Weak,
            3 | 4 => DamageTier::Normal,
            5 => DamageTier::Crit,
            _ => DamageTier::Perfect,
        }
    }

    /// Damage multiplier for this tier.
    pub fn multiplier(self) -> f64 {
        match self {
            DamageTier::Weak => 0.5,
            DamageTier::Normal => 1.0,
            DamageTier::Crit => 1.2,
            DamageTier::Perfect => 1.5,
        }
    }
}

/// An integer die `1..=6` derived from an attack roll.
#[derive(Clone, Debug, PartialEq)]
pub struct DieRoll {
    /// Die value in `[1, 6]`.
    pub die: u8,
    /// Tier from the die table.
    pub tier: DamageTier,
    /// The graded roll behind the die, `None` when the fallback uniform
    /// draw was used.
    pub roll: Option<RollResult>,
}

/// Roll the attacker's attack stat and derive a damage die.
///
/// The clamped sample over `[0, 20]` is scaled to six faces and
/// rounded; a degenerate (non-finite) sample falls back to a uniform
/// die so resolution never aborts.
pub fn attack_die(rng: &mut dyn DiceRng, attack: i32) -> DieRoll {
    let result = roll_attack(rng, attack, 0.5, CombatConfig::ATTACK_MAX_POINTS);

    if !result.sample_roll.is_finite() {
        let die = rng.roll_die(u32::from(CombatConfig::DIE_SIDES)) as u8;
        return DieRoll {
            die,
            tier: DamageTier::from_die(die),
            roll: None,
        };
    }

    let scaled =
        result.sample_roll / CombatConfig::ATTACK_MAX_POINTS * f64::from(CombatConfig::DIE_SIDES);
    let die = (scaled.round() as i64).clamp(1, i64::from(CombatConfig::DIE_SIDES)) as u8;

    DieRoll {
        die,
        tier: DamageTier::from_die(die),
        roll: Some(result),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{Pcg32, ScriptedRng};

    #[test]
    fn samples_and_grades_stay_in_range() {
        let mut rng = Pcg32::new(2024);
        for stat in (0..=100).step_by(5) {
            for max_points in [20.0, 100.0] {
                let result = roll(&mut rng, f64::from(stat), max_points, RollParams::default());
                assert!(result.sample_roll >= 0.0 && result.sample_roll <= max_points);
                assert!(result.grade.index() <= 4);
            }
        }
    }

    #[test]
    fn mean_is_centered_when_stat_matches_difficulty() {
        // stat_bonus = 50/100 = 0.5 = difficulty, bias 0 → mu exactly mid.
        let mut rng = ScriptedRng::new([0.5, 0.5]);
        let result = roll(&mut rng, 50.0, 20.0, RollParams::default());
        assert_eq!(result.net_offset, 0.0);
        assert_eq!(result.mu, 10.0);
    }

    #[test]
    fn net_offset_is_monotone_in_stat() {
        let mut previous = f64::NEG_INFINITY;
        for stat in 0..=100 {
            let mut rng = ScriptedRng::new([0.5, 0.5]);
            let result = roll(&mut rng, f64::from(stat), 20.0, RollParams::default());
            assert!(result.net_offset >= previous);
            previous = result.net_offset;
        }
    }

    #[test]
    fn grade_segments_partition_the_range() {
        // Zero-variance scripting: u = 1.0 makes the gaussian term 0, so
        // sample == clamp(mu). With stat_scale 10 and difficulty 1.0 the
        // mean lands exactly on the stat value: mu = 10 + (s/10 - 1)·10 = s.
        let params = RollParams {
            difficulty: 1.0,
            stat_scale: 10.0,
            ..RollParams::default()
        };
        for (stat, expected) in [
            (2.0, Grade::CriticalFail),
            (6.0, Grade::Fail),
            (10.0, Grade::Normal),
            (14.0, Grade::Success),
            (18.0, Grade::CriticalSuccess),
            (20.0, Grade::CriticalSuccess), // top edge folds into segment 4
        ] {
            let mut rng = ScriptedRng::new([1.0, 0.25]);
            let result = roll(&mut rng, stat, 20.0, params);
            assert_eq!(result.sample_roll, stat);
            assert_eq!(result.grade, expected, "stat={stat}");
        }
    }

    #[test]
    fn die_table_matches_spec() {
        let expectations = [
            (1, DamageTier::Weak, 0.5),
            (2, DamageTier::Weak, 0.5),
            (3, DamageTier::Normal, 1.0),
            (4, DamageTier::Normal, 1.0),
            (5, DamageTier::Crit, 1.2),
            (6, DamageTier::Perfect, 1.5),
        ];
        for (die, tier, multiplier) in expectations {
            assert_eq!(DamageTier::from_die(die), tier);
            assert_eq!(DamageTier::from_die(die).multiplier(), multiplier);
        }
    }

    #[test]
    fn attack_die_stays_on_the_faces() {
        let mut rng = Pcg32::new(11);
        for _ in 0..500 {
            let die = attack_die(&mut rng, 20);
            assert!((1..=6).contains(&die.die));
            assert!(die.roll.is_some());
        }
    }

    #[test]
    fn attack_die_midline_sample_maps_to_three() {
        // u = 1.0 → gaussian 0 → sample = mu = 10 of 20 → die round(3) = 3.
        let mut rng = ScriptedRng::new([1.0, 0.0]);
        let die = attack_die(&mut rng, 25); // 25/50 = 0.5 = difficulty
        assert_eq!(die.die, 3);
        assert_eq!(die.tier, DamageTier::Normal);
    }
}
