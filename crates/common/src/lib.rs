//! Shared vocabulary for the simulated XR rig: poses, hands, anchors, and the
//! configuration surface every other crate reads from.
//!
//! # Invariants
//! - Types here are plain data; no type in this crate owns behaviour that
//!   depends on frame timing.
//! - Configuration values are validated once at load time, never per tick.

pub mod config;
pub mod types;

pub use config::{ConfigError, ControllerConfig, ReleaseMatch, SimConfig, TrackingCenter};
pub use types::{AnchorKind, Hand, Transform};

pub fn crate_info() -> &'static str {
    "xrsim-common v0.1.0"
}
