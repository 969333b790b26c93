//! Simulated tracking rig: torso, head and hand anchors moved by intents.
//!
//! # Invariants
//! - A tick on an incomplete rig changes nothing.
//! - Within one tick, translation uses the heading from before the turn.
//! - Head pitch stays within ±89 degrees.
//! - An anchor at or beyond the tracking radius is inactive until it returns.

pub mod intents;
pub mod rig;

pub use intents::{Intent, Intents};
pub use rig::{Anchor, MAX_PITCH, Rig, RigEvent, RigParams, wrap_degrees};

pub fn crate_info() -> &'static str {
    "xrsim-rig v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert_eq!(crate_info(), "xrsim-rig v0.1.0");
    }
}
