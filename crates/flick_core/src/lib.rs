//! Flick Core
//!
//! This crate provides the foundational primitives shared by the Flick crates:
//!
//! - **Gesture Events**: Drag, flick, hold and wheel input delivered to scrollers
//! - **State Transitions**: Enum-driven state machines with transition history
//! - **Geometry**: `f64` points and sizes in surface units
//!
//! # Example
//!
//! ```rust
//! use flick_core::events::{event_types, GestureEvent};
//!
//! let event = GestureEvent::Drag { dx: f64::NAN, dy: -12.0 }.sanitized();
//! assert_eq!(event, GestureEvent::Drag { dx: 0.0, dy: -12.0 });
//! assert_eq!(event.event_type(), event_types::DRAG);
//! ```

pub mod events;
pub mod fsm;
pub mod geometry;

pub use events::{Axis, EventResult, EventType, GestureEvent};
pub use fsm::{StateCell, StateTransitions};
pub use geometry::{Point, Size};
