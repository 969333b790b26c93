//! Developer Tooling: rig inspector and device-state formatting.
//!
//! # Invariants
//! - Inspectors are read-only.

pub mod inspector;

pub use inspector::{AnchorInfo, DeviceLine, RigInspector, RigSummary};

pub fn crate_info() -> &'static str {
    "xrsim-tools v0.1.0"
}
