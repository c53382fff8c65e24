//! Host-side orchestration for the combat engine.
//!
//! The engine in `combat-core` is synchronous and single-threaded; this
//! crate owns everything that needs a clock or a thread:
//! - [`CombatRuntime`] spawns a worker task that owns the
//!   [`combat_core::CombatSession`] behind a command channel,
//! - [`SessionHandle`] is the cloneable async façade clients drive the
//!   protocol through,
//! - the enemy think-delay runs as a cancellable tokio task tied to the
//!   worker's lifetime,
//! - session snapshots and the terminal result fan out over a
//!   `tokio::sync::broadcast` channel,
//! - [`GameFlow`] is the top-level game state machine built on the core
//!   [`combat_core::PhaseMachine`].

pub mod error;
pub mod events;
pub mod flow;
pub mod handle;
pub mod runtime;

mod worker;

pub use error::{Result, RuntimeError};
pub use events::SessionEvent;
pub use flow::{EncounterSpec, FlowState, GameFlow, build_encounter};
pub use handle::SessionHandle;
pub use runtime::CombatRuntime;
