//! Simulated controller inputs and the events that drive them.
//!
//! # Invariants
//! - `Axis1d::pressed()` equals `value() >= threshold()` after every call.
//! - `Axis2d` click implies touch; releasing touch returns the value to the
//!   origin.
//! - Every queued event carries a unique serial; a key combination reports a
//!   click at most once per serial.
//! - Randomness is injected through [`RandomSource`] so every transition can
//!   be replayed.

pub mod action;
pub mod axis1d;
pub mod axis2d;
pub mod button;
pub mod combo;
pub mod controller;
pub mod event;
pub mod pad;
pub mod random;
#[cfg(feature = "winit")]
pub mod winit_adapter;

pub use action::Action;
pub use axis1d::Axis1d;
pub use axis2d::{Axis2d, Direction};
pub use button::DigitalButton;
pub use combo::KeyCombination;
pub use controller::{Controller, DeviceState};
pub use event::{EventQueue, InputEvent, InputEventKind, Key, Modifiers, ParseKeyError};
pub use pad::{PadLayout, PadResponse, Rect};
pub use random::{RandomSource, SeededRandom, SequenceRandom, ThreadRandom};

pub fn crate_info() -> &'static str {
    "xrsim-input v0.1.0"
}
