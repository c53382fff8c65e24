//! Top-level game flow and encounter assembly.
//!
//! The flow machine wires character-select → map-generation →
//! exploration ⇄ combat on the core [`PhaseMachine`]. Exploration is a
//! collaborator, not part of this crate: it hands over an
//! [`EncounterSpec`] when the party walks into a fight, and
//! [`build_encounter`] turns that plus the content roster into a ready
//! [`CombatSession`].

use combat_core::{CombatConfig, CombatSession, CombatantId, Pcg32, PhaseMachine};
use combat_content::RosterOracle;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Result, RuntimeError};

/// Enemy ids start here so they can never collide with hero ids.
const ENEMY_ID_BASE: u32 = 100;

/// Top-level game states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowState {
    CharacterSelect,
    MapGeneration,
    Exploration,
    Combat,
}

/// Encounter descriptor supplied by the exploration layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncounterSpec {
    /// Enemy template key in the content catalog.
    pub template: String,
    /// Group size; a pack spawns `count` copies of the template.
    #[serde(default = "default_count")]
    pub count: usize,
    /// Fixed RNG seed for replays; a random seed is drawn when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_count() -> usize {
    1
}

impl EncounterSpec {
    /// A single enemy of the given template, randomly seeded.
    pub fn single(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            count: 1,
            seed: None,
        }
    }
}

/// The top-level game state machine.
///
/// Transitions are guarded: a request from the wrong state is refused
/// (returning `false`) instead of corrupting the flow.
pub struct GameFlow {
    machine: PhaseMachine<FlowState, Option<EncounterSpec>>,
    encounter: Option<EncounterSpec>,
}

impl GameFlow {
    pub fn new() -> Self {
        let mut machine = PhaseMachine::new(FlowState::CharacterSelect);
        machine
            .on_enter(FlowState::MapGeneration, |_| {
                info!("generating the overworld map");
                None
            })
            .on_enter(FlowState::Exploration, |_| {
                info!("party enters exploration");
                None
            })
            .on_enter(FlowState::Combat, |spec: &Option<EncounterSpec>| {
                if let Some(spec) = spec {
                    info!(template = %spec.template, count = spec.count, "combat begins");
                }
                None
            })
            .on_exit(FlowState::Combat, || {
                info!("combat over, back to the map");
            });

        Self {
            machine,
            encounter: None,
        }
    }

    pub fn state(&self) -> FlowState {
        *self.machine.current()
    }

    /// The encounter currently being fought, if any.
    pub fn encounter(&self) -> Option<&EncounterSpec> {
        self.encounter.as_ref()
    }

    /// Party confirmed on the character-select screen.
    pub fn confirm_party(&mut self) -> bool {
        self.step(FlowState::CharacterSelect, FlowState::MapGeneration)
    }

    /// Map generation finished.
    pub fn map_ready(&mut self) -> bool {
        self.step(FlowState::MapGeneration, FlowState::Exploration)
    }

    /// Exploration triggered a fight.
    pub fn enter_combat(&mut self, spec: EncounterSpec) -> bool {
        if self.state() != FlowState::Exploration {
            warn!(state = ?self.state(), "combat requested outside exploration");
            return false;
        }
        self.encounter = Some(spec.clone());
        self.machine.transition(FlowState::Combat, Some(spec));
        true
    }

    /// The fight ended; back to the map.
    pub fn leave_combat(&mut self) -> bool {
        if self.state() != FlowState::Combat {
            return false;
        }
        self.encounter = None;
        self.machine.transition(FlowState::Exploration, None);
        true
    }

    fn step(&mut self, from: FlowState, to: FlowState) -> bool {
        if self.state() != from {
            warn!(state = ?self.state(), requested = ?to, "flow transition refused");
            return false;
        }
        self.machine.transition(to, None);
        true
    }
}

impl Default for GameFlow {
    fn default() -> Self {
        Self::new()
    }
}

/// Assemble a combat session from the content roster and an encounter.
///
/// Heroes join with their persistent state; enemies spawn fresh from
/// the template under ids `100, 101, ...`. The session RNG uses the
/// encounter's fixed seed when present, or a random one for organic
/// play.
pub fn build_encounter(
    roster: &dyn RosterOracle,
    spec: &EncounterSpec,
    config: CombatConfig,
) -> Result<CombatSession> {
    let heroes = roster.heroes().to_vec();

    let count = spec.count.max(1);
    let mut enemies = Vec::with_capacity(count);
    for slot in 0..count {
        let id = CombatantId(ENEMY_ID_BASE + slot as u32);
        let enemy = roster
            .spawn(&spec.template, id)
            .ok_or_else(|| RuntimeError::UnknownTemplate(spec.template.clone()))?;
        enemies.push(enemy);
    }

    let seed = spec.seed.unwrap_or_else(rand::random);
    debug!(seed, template = %spec.template, "building encounter");

    let session = CombatSession::new(heroes, enemies, Box::new(Pcg32::new(seed)), config)?;
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{Combatant, EnemySpawn, StatOverrides};
    use combat_content::ContentRoster;
    use std::collections::HashMap;

    fn roster() -> ContentRoster {
        let hero = Combatant::builder(CombatantId(1), "Kael").build();
        let wolf = EnemySpawn {
            name: "Wolf".to_string(),
            level: 1,
            difficulty: 0.5,
            is_boss: false,
            overrides: StatOverrides::default(),
        };
        ContentRoster::new(
            vec![hero],
            HashMap::new(),
            Vec::new(),
            HashMap::from([("wolf".to_string(), wolf)]),
        )
    }

    #[test]
    fn flow_walks_the_happy_path() {
        let mut flow = GameFlow::new();
        assert_eq!(flow.state(), FlowState::CharacterSelect);

        assert!(flow.confirm_party());
        assert!(flow.map_ready());
        assert_eq!(flow.state(), FlowState::Exploration);

        assert!(flow.enter_combat(EncounterSpec::single("wolf")));
        assert_eq!(flow.state(), FlowState::Combat);
        assert_eq!(flow.encounter().unwrap().template, "wolf");

        assert!(flow.leave_combat());
        assert_eq!(flow.state(), FlowState::Exploration);
        assert!(flow.encounter().is_none());
    }

    #[test]
    fn out_of_order_transitions_are_refused() {
        let mut flow = GameFlow::new();
        assert!(!flow.map_ready());
        assert!(!flow.enter_combat(EncounterSpec::single("wolf")));
        assert!(!flow.leave_combat());
        assert_eq!(flow.state(), FlowState::CharacterSelect);
    }

    #[test]
    fn encounter_spawns_a_pack_with_distinct_ids() {
        let spec = EncounterSpec {
            template: "wolf".to_string(),
            count: 3,
            seed: Some(9),
        };
        let session = build_encounter(&roster(), &spec, CombatConfig::default()).unwrap();
        let ids: Vec<u32> = session.enemies().iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![100, 101, 102]);
        assert_eq!(session.heroes().len(), 1);
    }

    #[test]
    fn unknown_template_is_an_error() {
        let spec = EncounterSpec::single("dragon");
        let err = build_encounter(&roster(), &spec, CombatConfig::default()).unwrap_err();
        assert!(matches!(err, RuntimeError::UnknownTemplate(t) if t == "dragon"));
    }
}
