use serde::{Deserialize, Serialize};
use std::str::FromStr;
use xrsim_common::ReleaseMatch;

use crate::event::{InputEvent, InputEventKind, Key, Modifiers, ParseKeyError};

/// A (modifiers, key) shortcut with edge tracking.
///
/// `is_held` is a latch driven by the events it is shown: it must see every
/// key event, once, to stay accurate. `was_clicked` reports each matching
/// release exactly once.
///
/// With [`ReleaseMatch::Strict`], a combination pressed as `Ctrl+K` and
/// released after `Ctrl` was let go stays held until a `Ctrl+K` release
/// arrives. [`ReleaseMatch::KeyOnly`] clears on any release of `K`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyCombination {
    pub modifiers: Modifiers,
    pub key: Key,
    #[serde(skip)]
    held: bool,
    #[serde(skip)]
    last_click: Option<u64>,
}

impl KeyCombination {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self {
            modifiers,
            key,
            held: false,
            last_click: None,
        }
    }

    /// Bare key, no modifiers.
    pub fn key(key: Key) -> Self {
        Self::new(key, Modifiers::empty())
    }

    /// `Ctrl` + key.
    pub fn ctrl(key: Key) -> Self {
        Self::new(key, Modifiers::CONTROL)
    }

    /// Feed `event` to the latch and report whether the combination is held.
    pub fn is_held(&mut self, event: &InputEvent, release: ReleaseMatch) -> bool {
        match event.kind {
            InputEventKind::KeyDown { key, modifiers } => {
                if key == self.key && modifiers == self.modifiers {
                    self.held = true;
                }
            }
            InputEventKind::KeyUp { key, modifiers } => {
                let matches = match release {
                    ReleaseMatch::KeyOnly => key == self.key,
                    ReleaseMatch::Strict => key == self.key && modifiers == self.modifiers,
                };
                if matches {
                    self.held = false;
                }
            }
            _ => {}
        }
        self.held
    }

    /// True once for a key-up matching both key and modifiers exactly.
    /// Also clears the held latch.
    pub fn was_clicked(&mut self, event: &InputEvent) -> bool {
        let InputEventKind::KeyUp { key, modifiers } = event.kind else {
            return false;
        };
        if key != self.key || modifiers != self.modifiers {
            return false;
        }
        self.held = false;
        if self.last_click == Some(event.serial) {
            return false;
        }
        self.last_click = Some(event.serial);
        true
    }

    /// Current latch value without feeding an event.
    pub fn held(&self) -> bool {
        self.held
    }

    /// Drop edge-tracking state, as when focus is lost.
    pub fn clear(&mut self) {
        self.held = false;
    }
}

impl std::fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const NAMES: [(Modifiers, &str); 4] = [
            (Modifiers::CONTROL, "ctrl"),
            (Modifiers::SHIFT, "shift"),
            (Modifiers::ALT, "alt"),
            (Modifiers::COMMAND, "cmd"),
        ];
        for (flag, name) in NAMES {
            if self.modifiers.contains(flag) {
                write!(f, "{name}+")?;
            }
        }
        write!(f, "{:?}", self.key)
    }
}

impl FromStr for KeyCombination {
    type Err = ParseKeyError;

    /// `W`, `ctrl+U`, `ctrl+shift+comma`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let key = match parts.pop() {
            Some(k) if !k.is_empty() => k.parse::<Key>()?,
            _ => return Err(ParseKeyError::Empty),
        };
        let mut modifiers = Modifiers::empty();
        for part in parts {
            modifiers |= Modifiers::parse_one(part)?;
        }
        Ok(Self::new(key, modifiers))
    }
}
