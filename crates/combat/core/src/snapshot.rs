//! Read-only session snapshots for observers.
//!
//! A snapshot is assembled after every state-changing step and handed
//! to each registered observer. It is detached from the session, so a
//! renderer can keep it across frames without borrowing the engine.

use crate::combatant::{Combatant, CombatantId, Side};
use crate::resolver::DiceInfo;
use crate::session::CombatPhase;

/// Lightweight view of one combatant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantView {
    pub id: CombatantId,
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub side: Side,
    pub level: u32,
    pub frozen_turns: u32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
}

impl CombatantView {
    pub fn of(unit: &Combatant) -> Self {
        Self {
            id: unit.id,
            name: unit.name.clone(),
            hp: unit.hp,
            max_hp: unit.max_hp,
            side: unit.side,
            level: unit.level,
            frozen_turns: unit.frozen_turns,
            attack: unit.derived.attack,
            defense: unit.derived.defense,
            speed: unit.derived.speed,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

/// Full session view delivered to observers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionSnapshot {
    pub heroes: Vec<CombatantView>,
    pub enemies: Vec<CombatantView>,
    pub phase: CombatPhase,
    pub active_unit: Option<CombatantId>,
    /// Rotation order, upcoming unit first.
    pub turn_order: Vec<CombatantId>,
    /// Log lines, newest first, capped at ten.
    pub logs: Vec<String>,
    /// Last dice resolution, for the roll/impact animations.
    pub dice_info: Option<DiceInfo>,
}
