//! Combat session orchestration.
//!
//! [`CombatSession`] is the authoritative owner of all combat state:
//! combatants, the rotation queue, the current phase, the pending
//! action and the bounded log. The host drives it strictly from one
//! call stack (there is no interior threading) and presentation
//! layers attach through the observer registry. The engine performs no
//! timing of its own: the `Rolling → apply_damage` and
//! `Executing → evaluate_turn` continuations are invoked by an observer
//! whenever its animation finishes, however long that takes.

use std::collections::VecDeque;

use crate::combatant::{Combatant, CombatantId, Side};
use crate::config::CombatConfig;
use crate::error::SessionError;
use crate::log::CombatLog;
use crate::resolver::{DiceInfo, PendingAction};
use crate::rng::DiceRng;
use crate::snapshot::{CombatantView, SessionSnapshot};

/// Phase of the combat protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatPhase {
    /// Session built, battle not yet started.
    Start,
    /// Waiting for the active hero's skill pick.
    PlayerTurn,
    /// Waiting for the target pick of a single-target skill.
    AwaitTarget,
    /// Die resolved; waiting for the dice animation to finish.
    Rolling,
    /// Waiting for the AI-controlled unit's action.
    EnemyTurn,
    /// Effect applied; waiting for the impact animation to finish.
    Executing,
    Win,
    Lose,
}

impl CombatPhase {
    /// Whether the session has reached a terminal phase.
    pub fn is_terminal(self) -> bool {
        matches!(self, CombatPhase::Win | CombatPhase::Lose)
    }
}

/// Terminal outcome of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatResult {
    Win,
    Lose,
}

/// Observer of session state changes.
///
/// `notify` fires after every state-changing step with a detached
/// snapshot; no acknowledgment is expected. `on_combat_result` fires at
/// most once per session, after the host calls
/// [`CombatSession::finish`].
pub trait SessionObserver: Send {
    fn notify(&mut self, snapshot: &SessionSnapshot);

    fn on_combat_result(&mut self, _result: CombatResult) {}
}

/// A single turn-based combat encounter.
pub struct CombatSession {
    pub(crate) config: CombatConfig,
    pub(crate) rng: Box<dyn DiceRng>,
    pub(crate) heroes: Vec<Combatant>,
    pub(crate) enemies: Vec<Combatant>,
    /// Rotation queue; dead units stay in it and are skipped on pop.
    pub(crate) queue: VecDeque<CombatantId>,
    pub(crate) active: Option<CombatantId>,
    pub(crate) phase: CombatPhase,
    pub(crate) pending: Option<PendingAction>,
    pub(crate) dice_info: Option<DiceInfo>,
    pub(crate) log: CombatLog,
    observers: Vec<Box<dyn SessionObserver>>,
    result_emitted: bool,
}

impl std::fmt::Debug for CombatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombatSession")
            .field("config", &self.config)
            .field("heroes", &self.heroes)
            .field("enemies", &self.enemies)
            .field("queue", &self.queue)
            .field("active", &self.active)
            .field("phase", &self.phase)
            .field("pending", &self.pending)
            .field("dice_info", &self.dice_info)
            .field("result_emitted", &self.result_emitted)
            .finish_non_exhaustive()
    }
}

impl CombatSession {
    /// Build a session from the persistent hero roster and the
    /// per-encounter enemy group.
    pub fn new(
        heroes: Vec<Combatant>,
        enemies: Vec<Combatant>,
        rng: Box<dyn DiceRng>,
        config: CombatConfig,
    ) -> Result<Self, SessionError> {
        if heroes.is_empty() {
            return Err(SessionError::NoHeroes);
        }
        if enemies.is_empty() {
            return Err(SessionError::NoEnemies);
        }

        let mut seen = std::collections::HashSet::new();
        for unit in heroes.iter().chain(enemies.iter()) {
            if !seen.insert(unit.id) {
                return Err(SessionError::DuplicateCombatant(unit.id));
            }
        }

        Ok(Self {
            config,
            rng,
            heroes,
            enemies,
            queue: VecDeque::new(),
            active: None,
            phase: CombatPhase::Start,
            pending: None,
            dice_info: None,
            log: CombatLog::new(),
            observers: Vec::new(),
            result_emitted: false,
        })
    }

    /// Attach an observer. Any number may attach; each receives every
    /// snapshot independently.
    pub fn add_observer(&mut self, observer: Box<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    /// Start the battle: seed the rotation and hand out the first turn.
    /// No-op outside the `Start` phase.
    pub fn start(&mut self) {
        if self.phase != CombatPhase::Start {
            return;
        }
        self.seed_turn_order();
        self.log.push("Battle begins");
        self.next_turn();
    }

    /// Emit the combat result, exactly once. Only valid after the
    /// session reached a terminal phase; the decoupling lets the
    /// presentation layer show its result screen first.
    pub fn finish(&mut self) {
        if !self.phase.is_terminal() || self.result_emitted {
            return;
        }
        self.result_emitted = true;

        let result = match self.phase {
            CombatPhase::Win => CombatResult::Win,
            _ => CombatResult::Lose,
        };
        for observer in &mut self.observers {
            observer.on_combat_result(result);
        }
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn active_unit(&self) -> Option<CombatantId> {
        self.active
    }

    pub fn heroes(&self) -> &[Combatant] {
        &self.heroes
    }

    pub fn enemies(&self) -> &[Combatant] {
        &self.enemies
    }

    /// Look up a combatant on either side.
    pub fn unit(&self, id: CombatantId) -> Option<&Combatant> {
        self.heroes
            .iter()
            .chain(self.enemies.iter())
            .find(|u| u.id == id)
    }

    pub(crate) fn unit_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.heroes
            .iter_mut()
            .chain(self.enemies.iter_mut())
            .find(|u| u.id == id)
    }

    pub(crate) fn side_of(&self, id: CombatantId) -> Option<Side> {
        self.unit(id).map(|u| u.side)
    }

    pub fn any_enemy_alive(&self) -> bool {
        self.enemies.iter().any(Combatant::is_alive)
    }

    pub fn any_hero_alive(&self) -> bool {
        self.heroes.iter().any(Combatant::is_alive)
    }

    /// Reclaim the heroes after the encounter; their hp and inventory
    /// persist across sessions.
    pub fn into_heroes(self) -> Vec<Combatant> {
        self.heroes
    }

    // ── Observer plumbing ───────────────────────────────────────────

    /// Assemble a detached snapshot of the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            heroes: self.heroes.iter().map(CombatantView::of).collect(),
            enemies: self.enemies.iter().map(CombatantView::of).collect(),
            phase: self.phase,
            active_unit: self.active,
            turn_order: self.queue.iter().copied().collect(),
            logs: self.log.to_vec(),
            dice_info: self.dice_info.clone(),
        }
    }

    pub(crate) fn notify_observers(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for observer in &mut self.observers {
            observer.notify(&snapshot);
        }
    }
}
