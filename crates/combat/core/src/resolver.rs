//! The multi-step action protocol.
//!
//! A player action walks `PlayerTurn → (AwaitTarget) → Rolling →
//! Executing`; the continuations out of `Rolling` and `Executing` are
//! paced by the presentation layer (dice animation, impact animation).
//! Every entry point is phase-guarded: called out of phase it does
//! nothing, so duplicated or stale UI callbacks cannot corrupt the
//! session.

use crate::combatant::{CombatantId, Side};
use crate::config::CombatConfig;
use crate::damage::{apply_heal, apply_hp_loss, mitigate, skill_base};
use crate::policy;
use crate::roll::{DamageTier, DieRoll, attack_die};
use crate::session::{CombatPhase, CombatSession};
use crate::skill::{Skill, SkillId, SkillKind};
use crate::status;

/// Resolution target of a pending action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetRef {
    /// A single combatant.
    Unit(CombatantId),
    /// Sentinel: every living enemy.
    AllEnemies,
    /// Sentinel: the caster.
    SelfCast,
}

/// The action being assembled across protocol steps.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingAction {
    pub skill: Skill,
    pub attacker: CombatantId,
    /// Attacker's attack stat, captured at selection time.
    pub attack: i32,
    /// Set on selection for implicit targets, on `select_target` otherwise.
    pub target: Option<TargetRef>,
    /// Set once the die has been rolled.
    pub roll: Option<DieRoll>,
    pub is_heal: bool,
}

/// Snapshot of the last dice resolution, consumed by the presentation
/// layer for the roll and impact animations.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiceInfo {
    /// Final die face in `[1, 6]`.
    pub die: u8,
    pub tier: DamageTier,
    pub multiplier: f64,
    pub is_heal: bool,
    pub target: TargetRef,
    /// Damage dealt or hp restored; filled when the effect applies.
    pub damage: Option<i32>,
    /// Human-readable roll description for the dice overlay.
    pub desc: String,
}

impl CombatSession {
    /// Step 1: the active hero picks a skill, `None` cancels back to
    /// `PlayerTurn`.
    ///
    /// Self-resolving kinds (heal/buff/self/aoe) skip targeting and
    /// roll immediately; single-target skills wait in `AwaitTarget`.
    pub fn select_skill(&mut self, skill: Option<SkillId>) {
        if !matches!(
            self.phase,
            CombatPhase::PlayerTurn | CombatPhase::AwaitTarget
        ) {
            return;
        }

        let Some(skill_id) = skill else {
            // Cancel: drop whatever was staged and return to the skill pick.
            self.pending = None;
            self.phase = CombatPhase::PlayerTurn;
            self.notify_observers();
            return;
        };

        if self.phase != CombatPhase::PlayerTurn {
            return;
        }
        let Some(attacker) = self.active else {
            return;
        };
        let Some(unit) = self.unit(attacker).filter(|u| u.is_alive()) else {
            return;
        };
        let Some(skill) = unit.skill(&skill_id).cloned() else {
            return;
        };
        let attack = unit.derived.attack;

        let is_heal = skill.kind == SkillKind::Heal;
        let implicit_target = match skill.kind {
            SkillKind::Normal => None,
            SkillKind::Aoe => Some(TargetRef::AllEnemies),
            SkillKind::Heal | SkillKind::Buff | SkillKind::SelfTarget => {
                Some(TargetRef::SelfCast)
            }
        };

        self.pending = Some(PendingAction {
            skill,
            attacker,
            attack,
            target: implicit_target,
            roll: None,
            is_heal,
        });

        if implicit_target.is_some() {
            self.roll_pending();
        } else {
            self.phase = CombatPhase::AwaitTarget;
            self.notify_observers();
        }
    }

    /// Step 2: resolve the concrete target of a single-target skill.
    /// Only living enemies are valid picks.
    pub fn select_target(&mut self, target: CombatantId) {
        if self.phase != CombatPhase::AwaitTarget {
            return;
        }
        if self.pending.is_none() {
            return;
        }
        let valid = self
            .unit(target)
            .is_some_and(|u| u.side == Side::Enemy && u.is_alive());
        if !valid {
            return;
        }

        if let Some(pending) = self.pending.as_mut() {
            pending.target = Some(TargetRef::Unit(target));
        }
        self.roll_pending();
    }

    /// Roll the damage die for the staged action and move to `Rolling`.
    fn roll_pending(&mut self) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        let Some(target) = pending.target else {
            return;
        };

        let die = attack_die(self.rng.as_mut(), pending.attack);
        let desc = format!("{:.1}x ({})", die.tier.multiplier(), die.tier);

        self.dice_info = Some(DiceInfo {
            die: die.die,
            tier: die.tier,
            multiplier: die.tier.multiplier(),
            is_heal: pending.is_heal,
            target,
            damage: None,
            desc,
        });
        pending.roll = Some(die);

        self.phase = CombatPhase::Rolling;
        self.notify_observers();
    }

    /// Step 3: apply the staged effect. Invoked by the observer once
    /// its dice animation has finished.
    pub fn apply_damage(&mut self) {
        if self.phase != CombatPhase::Rolling {
            return;
        }
        let Some(pending) = self.pending.take() else {
            return;
        };
        let (Some(target), Some(roll)) = (pending.target, pending.roll) else {
            return;
        };

        let attacker_name = self
            .unit(pending.attacker)
            .map(|u| u.name.clone())
            .unwrap_or_default();
        let skill = &pending.skill;
        let multiplier = roll.tier.multiplier();

        match (skill.kind, target) {
            (SkillKind::Heal, _) => {
                let amount = skill_base(pending.attack, skill.power, multiplier);
                if let Some(unit) = self.unit_mut(pending.attacker) {
                    unit.hp = apply_heal(unit.hp, amount, unit.max_hp);
                }
                self.set_dice_damage(amount, roll.tier);
                self.log
                    .push(format!("{attacker_name} uses {} and recovers {amount} hp", skill.name));
            }
            (SkillKind::Buff | SkillKind::SelfTarget, _) => {
                self.set_dice_damage(0, roll.tier);
                self.log.push(format!("{attacker_name} uses {}", skill.name));
            }
            (SkillKind::Aoe, _) => {
                let base = skill_base(pending.attack, skill.power, multiplier);

                // Freeze and damage hit the same set: everyone alive as
                // the skill resolves.
                if skill.freeze {
                    status::freeze_all_living(&mut self.enemies);
                }

                let mut total = 0;
                for enemy in self.enemies.iter_mut().filter(|e| e.is_alive()) {
                    let dealt = mitigate(base, enemy.derived.defense);
                    enemy.hp = apply_hp_loss(enemy.hp, dealt);
                    total += dealt;
                }

                self.set_dice_damage(total, roll.tier);
                let frozen = if skill.freeze { ", freezing them" } else { "" };
                self.log.push(format!(
                    "{attacker_name} unleashes {} on all enemies for {total}{frozen}",
                    skill.name
                ));
            }
            (SkillKind::Normal, TargetRef::Unit(target_id)) => {
                let mut base = skill_base(pending.attack, skill.power, multiplier);
                let mut tier = roll.tier;

                // Combo rule: layered on top of the die table.
                if skill.combo && roll.die >= CombatConfig::COMBO_DIE_THRESHOLD {
                    base *= 2;
                    tier = DamageTier::Crit;
                }

                let mut dealt = 0;
                let mut target_name = String::new();
                if let Some(unit) = self.unit_mut(target_id) {
                    dealt = mitigate(base, unit.derived.defense);
                    unit.hp = apply_hp_loss(unit.hp, dealt);
                    target_name = unit.name.clone();
                }

                self.set_dice_damage(dealt, tier);
                self.log.push(format!(
                    "{attacker_name} hits {target_name} with {} for {dealt} ({tier})",
                    skill.name
                ));
            }
            // A normal skill with a sentinel target cannot be staged.
            (SkillKind::Normal, _) => {}
        }

        self.phase = CombatPhase::Executing;
        self.notify_observers();
    }

    /// Step 4: close the turn. Invoked by the observer once its impact
    /// animation has finished.
    ///
    /// Checks the win/lose condition *before* scheduling: the instant
    /// one side is wiped the phase turns terminal and the rotation
    /// stops.
    pub fn evaluate_turn(&mut self) {
        if self.phase != CombatPhase::Executing {
            return;
        }

        if !self.any_enemy_alive() {
            self.phase = CombatPhase::Win;
            self.log.push("Victory!");
            self.notify_observers();
            return;
        }
        if !self.any_hero_alive() {
            self.phase = CombatPhase::Lose;
            self.log.push("The party has fallen...");
            self.notify_observers();
            return;
        }

        self.next_turn();
    }

    /// Resolve the active enemy's action. The host invokes this after
    /// the think-delay has elapsed.
    pub fn enemy_act(&mut self) {
        if self.phase != CombatPhase::EnemyTurn {
            return;
        }
        let Some(attacker) = self.active else {
            return;
        };
        let Some((attack, attacker_name)) = self
            .unit(attacker)
            .filter(|u| u.is_alive() && u.side == Side::Enemy)
            .map(|u| (u.derived.attack, u.name.clone()))
        else {
            self.force_enemy_skip();
            return;
        };

        let focus_chance = self.config.focus_fire_chance;
        let Some(target_id) = policy::choose_target(self.rng.as_mut(), &self.heroes, focus_chance)
        else {
            self.force_enemy_skip();
            return;
        };
        let strike = policy::compute_strike(self.rng.as_mut(), attack);

        let mut dealt = 0;
        let mut target_name = String::new();
        if let Some(unit) = self.unit_mut(target_id) {
            dealt = mitigate(strike.damage, unit.derived.defense);
            unit.hp = apply_hp_loss(unit.hp, dealt);
            target_name = unit.name.clone();
        }

        let tier = if strike.crit {
            DamageTier::Crit
        } else {
            DamageTier::from_die(strike.die)
        };
        let crit_note = if strike.crit { " (crit!)" } else { "" };
        self.log
            .push(format!("{attacker_name} strikes {target_name} for {dealt}{crit_note}"));

        self.pending = None;
        self.dice_info = Some(DiceInfo {
            die: strike.die,
            tier,
            multiplier: strike.multiplier,
            is_heal: false,
            target: TargetRef::Unit(target_id),
            damage: Some(dealt),
            desc: format!("enemy die {}{crit_note}", strike.die),
        });

        self.phase = CombatPhase::Executing;
        self.notify_observers();
    }

    /// Zero-effect fallback for a failed AI decision: the turn advances
    /// to `Executing` so the session can never stall on an enemy turn.
    pub fn force_enemy_skip(&mut self) {
        if self.phase != CombatPhase::EnemyTurn {
            return;
        }
        let name = self
            .active
            .and_then(|id| self.unit(id))
            .map(|u| u.name.clone())
            .unwrap_or_else(|| "The enemy".to_string());
        self.log.push(format!("{name} hesitates and does nothing"));

        self.pending = None;
        self.dice_info = None;
        self.phase = CombatPhase::Executing;
        self.notify_observers();
    }

    fn set_dice_damage(&mut self, amount: i32, tier: DamageTier) {
        if let Some(info) = self.dice_info.as_mut() {
            info.damage = Some(amount);
            info.tier = tier;
        }
    }
}
