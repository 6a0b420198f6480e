//! Flick Touch Scrolling
//!
//! Gesture-driven kinetic scrolling for a single scrollable surface.
//!
//! # Features
//!
//! - **Gesture State Machine**: Drag, flick, hold and wheel input arbitrated
//!   per axis, with explicit claim/pass-through results
//! - **Orientation Policy**: `scroll` / `auto` / `hidden` / `default` per axis
//! - **Kinetic Simulation**: Momentum deceleration and rubber-band edges
//!   behind a pluggable [`ScrollSimulator`] port
//! - **Overscroll Rendering**: Transforms for the part of the motion the
//!   native scroll position cannot show
//!
//! # Example
//!
//! ```rust
//! use flick_core::{GestureEvent, Size};
//! use flick_scroll::{HeadlessSurface, ScrollConfig, TouchScroller};
//!
//! let surface = HeadlessSurface::new(Size::new(300.0, 200.0), Size::new(300.0, 500.0));
//! let mut scroller = TouchScroller::new(surface, ScrollConfig::default());
//!
//! assert!(scroller.handle(GestureEvent::DragStart { x: 0.0, y: -6.0 }).is_claimed());
//! scroller.handle(GestureEvent::Drag { dx: 0.0, dy: -50.0 });
//! scroller.handle(GestureEvent::DragFinish);
//!
//! while scroller.on_frame(1.0 / 60.0) {}
//! assert!(scroller.state().is_idle());
//! ```

pub mod boundary;
pub mod config;
pub mod events;
pub mod headless;
pub mod host;
pub mod kinetic;
pub mod orientation;
pub mod overscroll;
pub mod scroller;
pub mod simulator;

pub use boundary::Boundaries;
pub use config::{ConfigError, ScrollConfig};
pub use events::{ScrollEvent, ScrollListener};
pub use headless::HeadlessSurface;
pub use host::{OverscrollSink, ScrollBounds, ScrollHost, ScrollMeasure};
pub use kinetic::{KineticConfig, KineticPhase, KineticScroll};
pub use orientation::{AxisMode, ResolvedAxes};
pub use overscroll::{OverscrollOffset, OverscrollRenderer};
pub use scroller::{GesturePhase, ScrollState, TouchScroller};
pub use simulator::ScrollSimulator;
