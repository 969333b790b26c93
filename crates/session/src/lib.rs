//! Frame driver: queued events in, device states out.
//!
//! # Invariants
//! - Events are applied in arrival order, before the rig advances.
//! - Key events update intents from held latches; controller actions fire
//!   on release.
//! - A sample taken after a tick reflects every event queued before it.

pub mod script;
pub mod session;
pub mod shortcuts;

pub use script::{ScriptError, ScriptStep, parse_script};
pub use session::Session;
pub use shortcuts::{ActionBinding, IntentBinding, ShortcutMap};

pub fn crate_info() -> &'static str {
    "xrsim-session v0.1.0"
}
