//! Discrete input events and the queue a host fills each frame.
//!
//! The host adapter (window system, editor, test script) translates its own
//! events into [`InputEventKind`] and pushes them; the session drains the
//! queue once per tick. Every event receives a monotonically increasing
//! serial so evaluators can tell a repeated query from a new event.

use bitflags::bitflags;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::str::FromStr;

bitflags! {
    /// Modifier keys held while a key event fired.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Modifiers: u8 {
        const SHIFT = 1;
        const CONTROL = 1 << 1;
        const ALT = 1 << 2;
        const COMMAND = 1 << 3;
    }
}

/// Keys the simulator can bind.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,
    Comma,
    Period,
    Slash,
    Semicolon,
    Space,
    Enter,
    Tab,
    Escape,
    Backspace,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

#[rustfmt::skip]
const LETTERS: [Key; 26] = [
    Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
    Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
    Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
];

#[rustfmt::skip]
const DIGITS: [Key; 10] = [
    Key::Digit0, Key::Digit1, Key::Digit2, Key::Digit3, Key::Digit4,
    Key::Digit5, Key::Digit6, Key::Digit7, Key::Digit8, Key::Digit9,
];

/// Errors from parsing textual key names and combinations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseKeyError {
    #[error("unknown key `{0}`")]
    UnknownKey(String),
    #[error("unknown modifier `{0}`")]
    UnknownModifier(String),
    #[error("empty key combination")]
    Empty,
}

impl FromStr for Key {
    type Err = ParseKeyError;

    /// Case-insensitive: `w`, `W`, `7`, `comma`, `,`, `arrowup`, `up`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let mut chars = lower.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_lowercase() {
                return Ok(LETTERS[(c as u8 - b'a') as usize]);
            }
            if c.is_ascii_digit() {
                return Ok(DIGITS[(c as u8 - b'0') as usize]);
            }
        }
        let key = match lower.as_str() {
            "," | "comma" => Key::Comma,
            "." | "period" => Key::Period,
            "/" | "slash" => Key::Slash,
            ";" | "semicolon" => Key::Semicolon,
            "space" => Key::Space,
            "enter" | "return" => Key::Enter,
            "tab" => Key::Tab,
            "esc" | "escape" => Key::Escape,
            "backspace" => Key::Backspace,
            "up" | "arrowup" => Key::ArrowUp,
            "down" | "arrowdown" => Key::ArrowDown,
            "left" | "arrowleft" => Key::ArrowLeft,
            "right" | "arrowright" => Key::ArrowRight,
            _ => return Err(ParseKeyError::UnknownKey(s.to_string())),
        };
        Ok(key)
    }
}

impl Modifiers {
    /// Parse one modifier name: `shift`, `ctrl`/`control`, `alt`, `cmd`/`command`.
    pub fn parse_one(s: &str) -> Result<Self, ParseKeyError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shift" => Ok(Modifiers::SHIFT),
            "ctrl" | "control" => Ok(Modifiers::CONTROL),
            "alt" | "option" => Ok(Modifiers::ALT),
            "cmd" | "command" | "super" => Ok(Modifiers::COMMAND),
            _ => Err(ParseKeyError::UnknownModifier(s.to_string())),
        }
    }
}

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEventKind {
    KeyDown { key: Key, modifiers: Modifiers },
    KeyUp { key: Key, modifiers: Modifiers },
    /// Pointer pressed at a position in host screen space (y grows downward).
    PointerDown { position: Vec2 },
    /// Pointer moved while pressed.
    PointerDrag { position: Vec2 },
}

impl InputEventKind {
    pub fn is_key(&self) -> bool {
        matches!(self, Self::KeyDown { .. } | Self::KeyUp { .. })
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self, Self::PointerDown { .. } | Self::PointerDrag { .. })
    }
}

/// A queued event with its serial number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputEvent {
    pub serial: u64,
    pub kind: InputEventKind,
}

/// FIFO of pending events, owned by whoever drives the simulation.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    pending: VecDeque<InputEvent>,
    next_serial: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue an event. Returns its serial.
    pub fn push(&mut self, kind: InputEventKind) -> u64 {
        let serial = self.next_serial;
        self.next_serial += 1;
        self.pending.push_back(InputEvent { serial, kind });
        serial
    }

    pub fn key_down(&mut self, key: Key, modifiers: Modifiers) -> u64 {
        self.push(InputEventKind::KeyDown { key, modifiers })
    }

    pub fn key_up(&mut self, key: Key, modifiers: Modifiers) -> u64 {
        self.push(InputEventKind::KeyUp { key, modifiers })
    }

    /// Key down immediately followed by key up.
    pub fn key_tap(&mut self, key: Key, modifiers: Modifiers) {
        self.key_down(key, modifiers);
        self.key_up(key, modifiers);
    }

    pub fn pointer_down(&mut self, position: Vec2) -> u64 {
        self.push(InputEventKind::PointerDown { position })
    }

    pub fn pointer_drag(&mut self, position: Vec2) -> u64 {
        self.push(InputEventKind::PointerDrag { position })
    }

    pub fn pop(&mut self) -> Option<InputEvent> {
        self.pending.pop_front()
    }

    /// Take every pending event in arrival order.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        self.pending.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
