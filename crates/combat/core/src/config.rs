/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatConfig {
    /// Wall-clock pause before an AI-controlled unit acts, in milliseconds.
    /// The engine never sleeps itself; the host runtime owns this timer.
    pub think_delay_ms: u64,

    /// Probability that the enemy AI focuses the most wounded hero.
    pub focus_fire_chance: f64,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Skill slots per hero.
    pub const MAX_SKILL_SLOTS: usize = 4;
    /// Equipment slots per hero.
    pub const MAX_EQUIP_SLOTS: usize = 2;

    // ===== combat resolution constants =====
    /// Bounded combat log length (newest entry first).
    pub const LOG_CAPACITY: usize = 10;
    /// Sides of the derived damage die.
    pub const DIE_SIDES: u8 = 6;
    /// A combo-flagged skill doubles its base damage at or above this die.
    pub const COMBO_DIE_THRESHOLD: u8 = 4;
    /// Enemy strikes crit at or above this die.
    pub const ENEMY_CRIT_DIE: u8 = 5;
    /// Turns of inaction applied by an area freeze (overwrite, not additive).
    pub const FREEZE_TURNS: u32 = 2;
    /// Minimum damage after defense mitigation.
    pub const MIN_DAMAGE: i32 = 1;

    // ===== attack roll calibration =====
    /// Roll range upper bound for attack checks.
    pub const ATTACK_MAX_POINTS: f64 = 20.0;
    /// Normalization base for the attack stat (attack values live in 0..50).
    pub const ATTACK_STAT_SCALE: f64 = 50.0;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_THINK_DELAY_MS: u64 = 1500;
    pub const DEFAULT_FOCUS_FIRE_CHANCE: f64 = 0.7;

    pub fn new() -> Self {
        Self {
            think_delay_ms: Self::DEFAULT_THINK_DELAY_MS,
            focus_fire_chance: Self::DEFAULT_FOCUS_FIRE_CHANCE,
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
