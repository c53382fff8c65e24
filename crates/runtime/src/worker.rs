//! Background task that owns the authoritative [`CombatSession`].
//!
//! Receives commands from [`crate::handle::SessionHandle`], applies them
//! to the session, and manages the enemy think-delay: whenever the phase
//! lands on `EnemyTurn` a timer task is spawned whose `JoinHandle` the
//! worker keeps, so the pending enemy action is aborted the moment the
//! session ends or the worker shuts down. No timer ever outlives the
//! worker.

use std::time::Duration;

use combat_core::{CombatPhase, CombatSession, CombatantId, SessionSnapshot, SkillId};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Commands the handle can send to the worker.
pub(crate) enum Command {
    Start {
        reply: oneshot::Sender<()>,
    },
    SelectSkill {
        skill: Option<SkillId>,
        reply: oneshot::Sender<()>,
    },
    SelectTarget {
        target: CombatantId,
        reply: oneshot::Sender<()>,
    },
    /// The presentation layer finished its dice animation.
    RollComplete {
        reply: oneshot::Sender<()>,
    },
    /// The presentation layer finished its impact animation.
    ExecuteComplete {
        reply: oneshot::Sender<()>,
    },
    Finish {
        reply: oneshot::Sender<()>,
    },
    Snapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
}

pub(crate) struct SessionWorker {
    session: CombatSession,
    command_rx: mpsc::Receiver<Command>,
    /// Internal channel the think-delay timer reports back on.
    ai_tx: mpsc::Sender<()>,
    ai_rx: mpsc::Receiver<()>,
    think: Option<JoinHandle<()>>,
    think_delay: Duration,
}

impl SessionWorker {
    pub(crate) fn new(session: CombatSession, command_rx: mpsc::Receiver<Command>) -> Self {
        let (ai_tx, ai_rx) = mpsc::channel(4);
        let think_delay = Duration::from_millis(session.config().think_delay_ms);
        Self {
            session,
            command_rx,
            ai_tx,
            ai_rx,
            think: None,
            think_delay,
        }
    }

    /// Main worker loop. Ends when every handle has been dropped.
    pub(crate) async fn run(mut self) {
        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    let Some(cmd) = cmd else { break };
                    self.handle_command(cmd);
                }
                Some(()) = self.ai_rx.recv() => {
                    self.enemy_act();
                }
            }
            self.sync_think_timer();
        }

        if let Some(timer) = self.think.take() {
            timer.abort();
        }
        debug!("session worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Start { reply } => {
                self.session.start();
                let _ = reply.send(());
            }
            Command::SelectSkill { skill, reply } => {
                self.session.select_skill(skill);
                let _ = reply.send(());
            }
            Command::SelectTarget { target, reply } => {
                self.session.select_target(target);
                let _ = reply.send(());
            }
            Command::RollComplete { reply } => {
                self.session.apply_damage();
                let _ = reply.send(());
            }
            Command::ExecuteComplete { reply } => {
                self.session.evaluate_turn();
                let _ = reply.send(());
            }
            Command::Finish { reply } => {
                self.session.finish();
                let _ = reply.send(());
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.session.snapshot());
            }
        }
    }

    /// Run the enemy decision. A panic inside the policy is contained
    /// here: the turn force-advances with zero effect instead of
    /// stalling the session.
    fn enemy_act(&mut self) {
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            self.session.enemy_act();
        }));
        if outcome.is_err() {
            error!("enemy decision panicked; skipping the turn");
            self.session.force_enemy_skip();
        }
    }

    /// Keep the think-delay timer in sync with the phase: spawn one when
    /// an enemy turn begins, abort it the moment the phase moves on.
    fn sync_think_timer(&mut self) {
        if self.session.phase() == CombatPhase::EnemyTurn {
            if self.think.as_ref().is_none_or(JoinHandle::is_finished) {
                debug!(delay_ms = self.think_delay.as_millis() as u64, "scheduling enemy action");
                let tx = self.ai_tx.clone();
                let delay = self.think_delay;
                self.think = Some(tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(()).await;
                }));
            }
        } else if let Some(timer) = self.think.take() {
            timer.abort();
        }
    }
}
