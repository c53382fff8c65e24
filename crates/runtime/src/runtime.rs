//! Runtime orchestrator: spawns the session worker and hands out the
//! client façade.

use combat_core::CombatSession;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::info;

use crate::error::{Result, RuntimeError};
use crate::events::ChannelObserver;
use crate::handle::SessionHandle;
use crate::worker::SessionWorker;

const COMMAND_CAPACITY: usize = 32;
const EVENT_CAPACITY: usize = 128;

/// A combat session running on the tokio runtime.
///
/// Owns the worker task; the worker (and with it any pending enemy
/// think-delay) stops once every [`SessionHandle`] clone is dropped.
pub struct CombatRuntime {
    handle: SessionHandle,
    worker: JoinHandle<()>,
}

impl CombatRuntime {
    /// Spawn the worker for a freshly built session.
    pub fn spawn(mut session: CombatSession) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);
        session.add_observer(Box::new(ChannelObserver::new(event_tx.clone())));

        let (command_tx, command_rx) = mpsc::channel(COMMAND_CAPACITY);
        let worker = tokio::spawn(SessionWorker::new(session, command_rx).run());
        info!("combat session spawned");

        Self {
            handle: SessionHandle::new(command_tx, event_tx),
            worker,
        }
    }

    /// A new handle onto the running session.
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Drop this runtime's handle and wait for the worker to stop.
    ///
    /// The worker exits once every other handle clone is gone too; any
    /// pending think-delay timer is aborted on the way out.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker.await.map_err(RuntimeError::WorkerJoin)
    }

    /// Abort the worker outright.
    pub fn abort(&self) {
        self.worker.abort();
    }
}
