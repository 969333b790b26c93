//! Translation from winit keyboard and mouse events.

use glam::Vec2;
use winit::event::ElementState;
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

use crate::event::{InputEventKind, Key, Modifiers};

pub fn key_from_winit(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyK => Key::K,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,
        KeyCode::Digit0 => Key::Digit0,
        KeyCode::Digit1 => Key::Digit1,
        KeyCode::Digit2 => Key::Digit2,
        KeyCode::Digit3 => Key::Digit3,
        KeyCode::Digit4 => Key::Digit4,
        KeyCode::Digit5 => Key::Digit5,
        KeyCode::Digit6 => Key::Digit6,
        KeyCode::Digit7 => Key::Digit7,
        KeyCode::Digit8 => Key::Digit8,
        KeyCode::Digit9 => Key::Digit9,
        KeyCode::Comma => Key::Comma,
        KeyCode::Period => Key::Period,
        KeyCode::Slash => Key::Slash,
        KeyCode::Semicolon => Key::Semicolon,
        KeyCode::Space => Key::Space,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Escape => Key::Escape,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,
        _ => return None,
    };
    Some(key)
}

pub fn modifiers_from_winit(state: ModifiersState) -> Modifiers {
    let mut m = Modifiers::empty();
    m.set(Modifiers::SHIFT, state.shift_key());
    m.set(Modifiers::CONTROL, state.control_key());
    m.set(Modifiers::ALT, state.alt_key());
    m.set(Modifiers::COMMAND, state.super_key());
    m
}

/// Keyboard input as seen in `WindowEvent::KeyboardInput`. Unmapped keys
/// yield `None`.
pub fn key_event(
    physical_key: PhysicalKey,
    state: ElementState,
    modifiers: ModifiersState,
) -> Option<InputEventKind> {
    let PhysicalKey::Code(code) = physical_key else {
        return None;
    };
    let key = key_from_winit(code)?;
    let modifiers = modifiers_from_winit(modifiers);
    Some(match state {
        ElementState::Pressed => InputEventKind::KeyDown { key, modifiers },
        ElementState::Released => InputEventKind::KeyUp { key, modifiers },
    })
}

/// Primary button press or cursor motion while the button is held.
pub fn pointer_event(position: (f64, f64), pressed_now: bool) -> InputEventKind {
    let position = Vec2::new(position.0 as f32, position.1 as f32);
    if pressed_now {
        InputEventKind::PointerDown { position }
    } else {
        InputEventKind::PointerDrag { position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_letters_and_punctuation() {
        assert_eq!(key_from_winit(KeyCode::KeyW), Some(Key::W));
        assert_eq!(key_from_winit(KeyCode::Comma), Some(Key::Comma));
        assert_eq!(key_from_winit(KeyCode::F12), None);
    }

    #[test]
    fn maps_modifiers() {
        let m = modifiers_from_winit(ModifiersState::CONTROL | ModifiersState::SHIFT);
        assert_eq!(m, Modifiers::CONTROL | Modifiers::SHIFT);
        assert_eq!(modifiers_from_winit(ModifiersState::empty()), Modifiers::empty());
    }

    #[test]
    fn key_event_direction_follows_state() {
        let down = key_event(
            PhysicalKey::Code(KeyCode::KeyI),
            ElementState::Pressed,
            ModifiersState::CONTROL,
        );
        assert_eq!(
            down,
            Some(InputEventKind::KeyDown {
                key: Key::I,
                modifiers: Modifiers::CONTROL
            })
        );
        let up = key_event(
            PhysicalKey::Code(KeyCode::KeyI),
            ElementState::Released,
            ModifiersState::empty(),
        );
        assert!(matches!(up, Some(InputEventKind::KeyUp { key: Key::I, .. })));
    }
}
