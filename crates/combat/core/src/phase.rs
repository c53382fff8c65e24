//! Generic named-state machine with enter/exit hooks.
//!
//! One primitive drives both the top-level game flow
//! (character-select → map-generation → exploration ⇄ combat) and,
//! conceptually, the combat phase sequence. There is no transition
//! queue: `transition` runs exit → switch → enter synchronously, and an
//! enter hook may redirect into a follow-up state by returning it,
//! which the machine applies immediately in the same call.

use std::collections::HashMap;
use std::hash::Hash;

/// Enter hook: receives the transition payload, may redirect.
type EnterHook<K, D> = Box<dyn FnMut(&D) -> Option<(K, D)> + Send>;
/// Exit hook.
type ExitHook = Box<dyn FnMut() + Send>;

struct StateHooks<K, D> {
    enter: Option<EnterHook<K, D>>,
    exit: Option<ExitHook>,
}

/// A finite-state machine keyed by `K` carrying payloads of type `D`.
pub struct PhaseMachine<K, D = ()> {
    current: K,
    states: HashMap<K, StateHooks<K, D>>,
}

impl<K, D> PhaseMachine<K, D>
where
    K: Clone + Eq + Hash,
{
    pub fn new(initial: K) -> Self {
        Self {
            current: initial,
            states: HashMap::new(),
        }
    }

    /// Current state key.
    pub fn current(&self) -> &K {
        &self.current
    }

    /// Register an enter hook for a state. Returning `Some((next, data))`
    /// redirects the machine immediately after entering.
    pub fn on_enter(
        &mut self,
        state: K,
        hook: impl FnMut(&D) -> Option<(K, D)> + Send + 'static,
    ) -> &mut Self {
        self.states.entry(state).or_default().enter = Some(Box::new(hook));
        self
    }

    /// Register an exit hook for a state.
    pub fn on_exit(&mut self, state: K, hook: impl FnMut() + Send + 'static) -> &mut Self {
        self.states.entry(state).or_default().exit = Some(Box::new(hook));
        self
    }

    /// Transition to `next`, carrying `data` into its enter hook.
    ///
    /// Calls the current state's exit hook (if registered), switches,
    /// then calls the next state's enter hook (if registered). Enter
    /// redirects are followed until a state settles.
    pub fn transition(&mut self, next: K, data: D) {
        let mut next = next;
        let mut data = data;

        loop {
            if let Some(hooks) = self.states.get_mut(&self.current)
                && let Some(exit) = hooks.exit.as_mut()
            {
                exit();
            }

            self.current = next.clone();

            let redirect = self
                .states
                .get_mut(&self.current)
                .and_then(|hooks| hooks.enter.as_mut())
                .and_then(|enter| enter(&data));

            match redirect {
                Some((redirect_next, redirect_data)) => {
                    next = redirect_next;
                    data = redirect_data;
                }
                None => break,
            }
        }
    }
}

impl<K, D> Default for StateHooks<K, D> {
    fn default() -> Self {
        Self {
            enter: None,
            exit: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Flow {
        Idle,
        Loading,
        Ready,
    }

    #[test]
    fn exit_then_enter_ordering() {
        let trace = Arc::new(AtomicU32::new(0));
        let mut machine: PhaseMachine<Flow, u32> = PhaseMachine::new(Flow::Idle);

        let on_exit = Arc::clone(&trace);
        machine.on_exit(Flow::Idle, move || {
            // Exit must fire before enter: the counter is still zero.
            assert_eq!(on_exit.load(Ordering::SeqCst), 0);
            on_exit.fetch_add(1, Ordering::SeqCst);
        });

        let on_enter = Arc::clone(&trace);
        machine.on_enter(Flow::Loading, move |payload| {
            assert_eq!(*payload, 42);
            on_enter.fetch_add(10, Ordering::SeqCst);
            None
        });

        machine.transition(Flow::Loading, 42);
        assert_eq!(*machine.current(), Flow::Loading);
        assert_eq!(trace.load(Ordering::SeqCst), 11);
    }

    #[test]
    fn enter_hook_may_redirect_synchronously() {
        let mut machine: PhaseMachine<Flow, ()> = PhaseMachine::new(Flow::Idle);
        machine.on_enter(Flow::Loading, |_| Some((Flow::Ready, ())));

        machine.transition(Flow::Loading, ());
        assert_eq!(*machine.current(), Flow::Ready);
    }

    #[test]
    fn states_without_hooks_transition_silently() {
        let mut machine: PhaseMachine<Flow, ()> = PhaseMachine::new(Flow::Idle);
        machine.transition(Flow::Ready, ());
        assert_eq!(*machine.current(), Flow::Ready);
    }
}
