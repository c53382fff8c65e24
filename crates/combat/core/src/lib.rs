//! Deterministic turn-based combat engine for the hex-exploration RPG.
//!
//! `combat-core` defines the canonical combat rules (rolls, turn order,
//! the multi-step action protocol, enemy policy) and exposes pure APIs
//! driven by a host loop. All state mutation flows through
//! [`session::CombatSession`]; presentation layers attach through the
//! [`session::SessionObserver`] registry and pace the engine by calling
//! the continuation methods when their animations finish.
pub mod combatant;
pub mod config;
pub mod damage;
pub mod error;
pub mod item;
pub mod log;
pub mod phase;
pub mod policy;
pub mod resolver;
pub mod rng;
pub mod roll;
pub mod scheduler;
pub mod session;
pub mod skill;
pub mod snapshot;
pub mod stats;
pub mod status;

pub use combatant::{Combatant, CombatantBuilder, CombatantId, EnemySpawn, Side, StatOverrides};
pub use config::CombatConfig;
pub use error::{SessionError, SkillSlotError};
pub use item::{Item, ItemId, Rarity, StatBonuses};
pub use phase::PhaseMachine;
pub use policy::{EnemyStrike, choose_target, compute_strike};
pub use resolver::{DiceInfo, PendingAction, TargetRef};
pub use rng::{DiceRng, Pcg32, ScriptedRng};
pub use roll::{DamageTier, DieRoll, Grade, RollParams, RollResult, attack_die, roll};
pub use session::{CombatPhase, CombatResult, CombatSession, SessionObserver};
pub use skill::{Skill, SkillId, SkillKind};
pub use snapshot::{CombatantView, SessionSnapshot};
pub use stats::{Attributes, DerivedStats, StatKey};
