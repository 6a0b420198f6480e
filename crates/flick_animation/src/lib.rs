//! Flick Animation System
//!
//! Spring physics and frame scheduling for kinetic scrolling.
//!
//! # Features
//!
//! - **Spring Physics**: Sub-stepped damped springs with stiffness, damping, mass
//! - **Interruptible**: Springs can be started with an inherited velocity
//! - **Frame Requests**: Components request animation frames while moving and
//!   cancel them once at rest

pub mod scheduler;
pub mod spring;

pub use scheduler::{AnimationScheduler, FrameRequestId, MAX_FRAME_DELTA};
pub use spring::{Spring, SpringConfig};
