//! Broadcast fan-out of session events.
//!
//! The core observer seam is synchronous and single-consumer-agnostic;
//! the runtime bridges it onto a `tokio::sync::broadcast` channel so any
//! number of subscribers (UI, logging, replays) can follow the session
//! independently.

use combat_core::{CombatResult, SessionObserver, SessionSnapshot};
use tokio::sync::broadcast;

/// Events fanned out to subscribers of a running session.
#[derive(Clone, Debug)]
pub enum SessionEvent {
    /// State changed; carries a detached snapshot.
    Snapshot(SessionSnapshot),
    /// Terminal result, emitted once after `finish`.
    Finished(CombatResult),
}

/// Observer that forwards every notification into the broadcast channel.
pub(crate) struct ChannelObserver {
    tx: broadcast::Sender<SessionEvent>,
}

impl ChannelObserver {
    pub(crate) fn new(tx: broadcast::Sender<SessionEvent>) -> Self {
        Self { tx }
    }
}

impl SessionObserver for ChannelObserver {
    fn notify(&mut self, snapshot: &SessionSnapshot) {
        // No subscribers is normal, not an error.
        if self.tx.send(SessionEvent::Snapshot(snapshot.clone())).is_err() {
            tracing::trace!("no subscribers for session snapshot");
        }
    }

    fn on_combat_result(&mut self, result: CombatResult) {
        let _ = self.tx.send(SessionEvent::Finished(result));
    }
}
