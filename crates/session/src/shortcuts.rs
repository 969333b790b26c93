use serde::{Deserialize, Serialize};
use xrsim_common::{Hand, ReleaseMatch};
use xrsim_input::{Action, Direction, InputEvent, Key, KeyCombination};
use xrsim_rig::{Intent, Intents};

/// A key combination held down to drive a motion intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentBinding {
    pub combo: KeyCombination,
    pub intent: Intent,
}

/// A key combination released to fire a controller action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionBinding {
    pub combo: KeyCombination,
    pub hand: Hand,
    pub action: Action,
}

/// Keyboard bindings for the rig and both controllers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortcutMap {
    pub intents: Vec<IntentBinding>,
    pub actions: Vec<ActionBinding>,
}

impl Default for ShortcutMap {
    fn default() -> Self {
        let intents = [
            (Key::W, Intent::MoveForward),
            (Key::S, Intent::MoveBackward),
            (Key::A, Intent::MoveLeft),
            (Key::D, Intent::MoveRight),
            (Key::Q, Intent::RotateLeft),
            (Key::E, Intent::RotateRight),
            (Key::X, Intent::LookUp),
            (Key::C, Intent::LookDown),
        ]
        .into_iter()
        .map(|(key, intent)| IntentBinding {
            combo: KeyCombination::key(key),
            intent,
        })
        .collect();

        let hand_keys = [
            (Key::I, Action::TouchDirection(Direction::Up)),
            (Key::K, Action::TouchDirection(Direction::Down)),
            (Key::J, Action::TouchDirection(Direction::Left)),
            (Key::L, Action::TouchDirection(Direction::Right)),
            (Key::O, Action::ToggleAxisTouch),
            (Key::U, Action::ToggleAxisClick),
            (Key::M, Action::ToggleTrigger),
            (Key::Comma, Action::ToggleGrip),
            (Key::Period, Action::TogglePrimary),
        ];
        let mut actions = Vec::with_capacity(hand_keys.len() * 2);
        for (key, action) in hand_keys {
            actions.push(ActionBinding {
                combo: KeyCombination::key(key),
                hand: Hand::Right,
                action,
            });
            actions.push(ActionBinding {
                combo: KeyCombination::ctrl(key),
                hand: Hand::Left,
                action,
            });
        }

        Self { intents, actions }
    }
}

impl ShortcutMap {
    /// No bindings at all.
    pub fn empty() -> Self {
        Self {
            intents: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Feed one event to every binding.
    ///
    /// Key events recompute `intents` from the held latches and return the
    /// controller actions whose combinations were released. Pointer events
    /// are ignored.
    pub fn dispatch(
        &mut self,
        event: &InputEvent,
        release: ReleaseMatch,
        intents: &mut Intents,
    ) -> Vec<(Hand, Action)> {
        if !event.kind.is_key() {
            return Vec::new();
        }

        let mut held = Intents::default();
        for binding in &mut self.intents {
            if binding.combo.is_held(event, release) {
                held.set(binding.intent, true);
            }
        }
        *intents = held;

        let mut fired = Vec::new();
        for binding in &mut self.actions {
            if binding.combo.was_clicked(event) {
                tracing::debug!(combo = %binding.combo, hand = %binding.hand, "shortcut");
                fired.push((binding.hand, binding.action));
            }
        }
        fired
    }

    /// Drop every held latch, as when the host window loses focus.
    pub fn clear(&mut self) {
        for binding in &mut self.intents {
            binding.combo.clear();
        }
        for binding in &mut self.actions {
            binding.combo.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xrsim_input::{EventQueue, Modifiers};

    fn run(map: &mut ShortcutMap, build: impl FnOnce(&mut EventQueue)) -> (Intents, Vec<(Hand, Action)>) {
        let mut q = EventQueue::new();
        build(&mut q);
        let mut intents = Intents::default();
        let mut fired = Vec::new();
        for ev in q.drain() {
            fired.extend(map.dispatch(&ev, ReleaseMatch::KeyOnly, &mut intents));
        }
        (intents, fired)
    }

    #[test]
    fn defaults_cover_rig_and_both_hands() {
        let map = ShortcutMap::default();
        assert_eq!(map.intents.len(), 8);
        assert_eq!(map.actions.len(), 18);
    }

    #[test]
    fn held_movement_keys_set_intents() {
        let mut map = ShortcutMap::default();
        let (intents, fired) = run(&mut map, |q| {
            q.key_down(Key::W, Modifiers::empty());
            q.key_down(Key::E, Modifiers::empty());
        });
        assert!(intents.move_forward && intents.rotate_right);
        assert!(!intents.move_backward);
        assert!(fired.is_empty());
    }

    #[test]
    fn releasing_clears_intent() {
        let mut map = ShortcutMap::default();
        let (intents, _) = run(&mut map, |q| {
            q.key_down(Key::X, Modifiers::empty());
            q.key_down(Key::A, Modifiers::empty());
            q.key_up(Key::X, Modifiers::empty());
        });
        assert!(!intents.look_up);
        assert!(intents.move_left);
    }

    #[test]
    fn bare_key_release_fires_right_hand() {
        let mut map = ShortcutMap::default();
        let (_, fired) = run(&mut map, |q| q.key_tap(Key::M, Modifiers::empty()));
        assert_eq!(fired, vec![(Hand::Right, Action::ToggleTrigger)]);
    }

    #[test]
    fn ctrl_release_fires_left_hand() {
        let mut map = ShortcutMap::default();
        let (_, fired) = run(&mut map, |q| q.key_tap(Key::Comma, Modifiers::CONTROL));
        assert_eq!(fired, vec![(Hand::Left, Action::ToggleGrip)]);
    }

    #[test]
    fn directional_keys_map_to_directions() {
        let mut map = ShortcutMap::default();
        let (_, fired) = run(&mut map, |q| {
            q.key_tap(Key::I, Modifiers::empty());
            q.key_tap(Key::J, Modifiers::CONTROL);
        });
        assert_eq!(
            fired,
            vec![
                (Hand::Right, Action::TouchDirection(Direction::Up)),
                (Hand::Left, Action::TouchDirection(Direction::Left)),
            ]
        );
    }

    #[test]
    fn pointer_events_leave_intents_alone() {
        let mut map = ShortcutMap::default();
        let mut q = EventQueue::new();
        q.key_down(Key::W, Modifiers::empty());
        q.pointer_down(glam::Vec2::ZERO);
        let mut intents = Intents::default();
        for ev in q.drain() {
            map.dispatch(&ev, ReleaseMatch::KeyOnly, &mut intents);
        }
        assert!(intents.move_forward);
    }

    #[test]
    fn clear_drops_held_intents() {
        let mut map = ShortcutMap::default();
        run(&mut map, |q| {
            q.key_down(Key::W, Modifiers::empty());
        });
        map.clear();
        assert!(map.intents.iter().all(|b| !b.combo.held()));
    }

    #[test]
    fn map_serializes() {
        let map = ShortcutMap::default();
        let json = serde_json::to_string(&map).unwrap();
        let back: ShortcutMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
