//! Turn scheduling: the rotating combatant queue.
//!
//! The queue is seeded once at session start, sorted descending by
//! speed (stable, so ties keep insertion order: heroes before enemies).
//! Dead combatants are never pruned: they stay in the rotation and are
//! skipped when their slot comes up. Acceptable for bounded encounters;
//! a prune would also change the turn-order view observers see.

use crate::combatant::Side;
use crate::session::{CombatPhase, CombatSession};
use crate::status;

/// Outcome of visiting one queue slot.
enum Visit {
    /// Unit is dead; move on without effect.
    Dead,
    /// Unit consumed a freeze charge and skips this turn.
    Frozen { name: String, remaining: u32 },
    /// Unit acts this turn.
    Ready(Side),
}

impl CombatSession {
    /// Seed the rotation from all combatants, fastest first.
    pub(crate) fn seed_turn_order(&mut self) {
        let mut order: Vec<_> = self
            .heroes
            .iter()
            .chain(self.enemies.iter())
            .map(|u| (u.id, u.derived.speed))
            .collect();
        // Stable sort: equal speeds keep roster order.
        order.sort_by_key(|(_, speed)| std::cmp::Reverse(*speed));

        self.queue = order.into_iter().map(|(id, _)| id).collect();
    }

    /// Advance the rotation to the next unit that can act.
    ///
    /// Dead units are skipped outright; frozen units consume one charge,
    /// log a skip and are passed over. The surviving unit becomes active
    /// and the phase flips to `PlayerTurn` or `EnemyTurn`. No-op on an
    /// empty queue or when nothing in it is alive; `evaluate_turn`
    /// normally ends the session before either can occur.
    pub fn next_turn(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        let any_living = self
            .queue
            .iter()
            .any(|&id| self.unit(id).is_some_and(|u| u.is_alive()));
        if !any_living {
            return;
        }

        loop {
            let Some(id) = self.queue.pop_front() else {
                return;
            };
            self.queue.push_back(id);

            let visit = match self.unit_mut(id) {
                Some(unit) if !unit.is_alive() => Visit::Dead,
                Some(unit) => {
                    if status::consume_freeze(unit) {
                        Visit::Frozen {
                            name: unit.name.clone(),
                            remaining: unit.frozen_turns,
                        }
                    } else {
                        Visit::Ready(unit.side)
                    }
                }
                None => Visit::Dead,
            };

            match visit {
                Visit::Dead => continue,
                Visit::Frozen { name, remaining } => {
                    self.log
                        .push(format!("{name} is frozen and skips the turn ({remaining} left)"));
                    self.notify_observers();
                    continue;
                }
                Visit::Ready(side) => {
                    self.active = Some(id);
                    self.phase = match side {
                        Side::Player => CombatPhase::PlayerTurn,
                        Side::Enemy => CombatPhase::EnemyTurn,
                    };
                    break;
                }
            }
        }

        self.notify_observers();
    }
}
