//! State transitions
//!
//! Scroll components describe their interaction states as plain enums that
//! map `(state, event)` pairs to a successor state. Guards live with the
//! component that owns the state: it decides whether to deliver an event at
//! all, the enum only encodes which transitions exist.
//!
//! [`StateCell`] owns the current state and records a bounded transition
//! history for debugging.

use std::fmt::Debug;
use std::hash::Hash;

use smallvec::SmallVec;

use crate::events::EventType;

/// Maximum number of transitions kept in a [`StateCell`] history
pub const HISTORY_LIMIT: usize = 32;

/// Trait for enum-based state machines
///
/// # Example
///
/// ```rust
/// use flick_core::events::event_types::*;
/// use flick_core::fsm::StateTransitions;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// enum Press {
///     #[default]
///     Up,
///     Down,
/// }
///
/// impl StateTransitions for Press {
///     fn on_event(&self, event: u32) -> Option<Self> {
///         match (self, event) {
///             (Press::Up, HOLD) => Some(Press::Down),
///             (Press::Down, DRAG_FINISH) => Some(Press::Up),
///             _ => None,
///         }
///     }
/// }
///
/// assert_eq!(Press::Up.on_event(HOLD), Some(Press::Down));
/// assert_eq!(Press::Up.on_event(DRAG), None);
/// ```
pub trait StateTransitions: Clone + Copy + PartialEq + Eq + Hash + Debug + 'static {
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;
}

/// Current state plus transition history
#[derive(Debug, Clone)]
pub struct StateCell<S: StateTransitions> {
    current: S,
    history: SmallVec<[(S, EventType, S); 8]>,
}

impl<S: StateTransitions + Default> Default for StateCell<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: StateTransitions> StateCell<S> {
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            history: SmallVec::new(),
        }
    }

    /// Get the current state
    pub fn get(&self) -> S {
        self.current
    }

    /// Check if we're in a specific state
    pub fn is(&self, state: S) -> bool {
        self.current == state
    }

    /// Check if an event would trigger a transition from the current state
    pub fn can_send(&self, event: EventType) -> bool {
        self.current.on_event(event).is_some()
    }

    /// Send an event, returning the new state if a transition happened
    pub fn send(&mut self, event: EventType) -> Option<S> {
        let next = self.current.on_event(event)?;
        self.record(event, next);
        Some(next)
    }

    /// Force a state, bypassing the transition table
    ///
    /// Used when an owner resets itself (for example after reconfiguration).
    /// Recorded in history under the given event.
    pub fn force(&mut self, event: EventType, state: S) {
        if self.current != state {
            self.record(event, state);
        }
    }

    /// Get transition history, oldest first
    pub fn history(&self) -> &[(S, EventType, S)] {
        &self.history
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn record(&mut self, event: EventType, next: S) {
        let previous = self.current;
        tracing::trace!(?previous, ?next, event, "state transition");
        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push((previous, event, next));
        self.current = next;
    }
}
