//! Cloneable façade for driving a running session.
//!
//! [`SessionHandle`] hides the channel plumbing and offers async
//! helpers for each protocol step. Every call resolves once the worker
//! has applied the command, so callers observe the protocol in order.

use combat_core::{CombatantId, SessionSnapshot, SkillId};
use tokio::sync::{broadcast, mpsc, oneshot};

use crate::error::{Result, RuntimeError};
use crate::events::SessionEvent;
use crate::worker::Command;

/// Client-facing handle to a running combat session.
#[derive(Clone)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl SessionHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_tx: broadcast::Sender<SessionEvent>,
    ) -> Self {
        Self {
            command_tx,
            event_tx,
        }
    }

    /// Start the battle: seed turn order and hand out the first turn.
    pub async fn start(&self) -> Result<()> {
        self.send(|reply| Command::Start { reply }).await
    }

    /// Pick a skill for the active hero; `None` cancels back to the
    /// skill menu.
    pub async fn select_skill(&self, skill: Option<SkillId>) -> Result<()> {
        self.send(|reply| Command::SelectSkill { skill, reply }).await
    }

    /// Pick the target of a single-target skill.
    pub async fn select_target(&self, target: CombatantId) -> Result<()> {
        self.send(|reply| Command::SelectTarget { target, reply }).await
    }

    /// Signal that the dice animation finished; applies the effect.
    pub async fn roll_complete(&self) -> Result<()> {
        self.send(|reply| Command::RollComplete { reply }).await
    }

    /// Signal that the impact animation finished; closes the turn.
    pub async fn execute_complete(&self) -> Result<()> {
        self.send(|reply| Command::ExecuteComplete { reply }).await
    }

    /// Emit the terminal result (once) after a Win/Lose phase.
    pub async fn finish(&self) -> Result<()> {
        self.send(|reply| Command::Finish { reply }).await
    }

    /// Read-only snapshot of the current session state.
    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(Command::Snapshot { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to session events. Each receiver gets every snapshot
    /// and the terminal result independently.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    async fn send(&self, make: impl FnOnce(oneshot::Sender<()>) -> Command) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(make(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }
}
