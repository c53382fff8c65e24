//! Unified error types surfaced by the runtime API.

use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The worker is gone; the session has ended or was aborted.
    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("unknown enemy template '{0}'")]
    UnknownTemplate(String),

    #[error(transparent)]
    Session(#[from] combat_core::SessionError),
}
