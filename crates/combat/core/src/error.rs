//! Error types surfaced by the combat core.
//!
//! Phase-guard violations are deliberately *not* errors: calling a
//! protocol method outside its valid phase is a silent no-op so a laggy
//! or duplicated presentation callback can never poison a session.

use crate::combatant::CombatantId;

/// Errors raised while constructing a combat session.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("a combat session requires at least one hero")]
    NoHeroes,

    #[error("a combat session requires at least one enemy")]
    NoEnemies,

    #[error("duplicate combatant id {0:?} in session roster")]
    DuplicateCombatant(CombatantId),
}

/// Errors raised by skill/equipment slot operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SkillSlotError {
    #[error("skill slot {index} out of range (max {max})")]
    OutOfRange { index: usize, max: usize },
}
