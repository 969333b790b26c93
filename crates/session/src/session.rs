use std::collections::BTreeMap;
use xrsim_common::{AnchorKind, Hand, SimConfig, Transform};
use xrsim_input::{
    Controller, DeviceState, EventQueue, InputEvent, InputEventKind, PadLayout, RandomSource,
    SeededRandom,
};
use xrsim_rig::{Rig, RigEvent, RigParams};

use crate::script::ScriptStep;
use crate::shortcuts::ShortcutMap;

/// One simulated user: rig, two controllers, keyboard shortcuts and the
/// event queue that feeds them.
///
/// Hosts push events at any time and call [`Session::tick`] once per frame.
/// Samples read afterwards reflect every event queued before the tick.
pub struct Session {
    config: SimConfig,
    rig: Rig,
    controllers: [Controller; 2],
    shortcuts: ShortcutMap,
    pads: BTreeMap<Hand, PadLayout>,
    queue: EventQueue,
    rng: Box<dyn RandomSource>,
    frame: u64,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("frame", &self.frame)
            .field("pending", &self.queue.len())
            .field("rig", &self.rig)
            .finish_non_exhaustive()
    }
}

fn slot(hand: Hand) -> usize {
    match hand {
        Hand::Left => 0,
        Hand::Right => 1,
    }
}

impl Session {
    pub fn new(config: SimConfig, rng: Box<dyn RandomSource>) -> Self {
        let rig = Rig::with_default_anchors(RigParams::from(&config));
        let controllers = Hand::BOTH.map(|hand| Controller::new(hand, &config.controller));
        Self {
            config,
            rig,
            controllers,
            shortcuts: ShortcutMap::default(),
            pads: BTreeMap::new(),
            queue: EventQueue::new(),
            rng,
            frame: 0,
        }
    }

    /// Reproducible session for replays and tests.
    pub fn seeded(config: SimConfig, seed: u64) -> Self {
        Self::new(config, Box::new(SeededRandom::new(seed)))
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Replace the configuration and reset.
    pub fn set_config(&mut self, config: SimConfig) {
        self.config = config;
        self.reset();
    }

    pub fn rig(&self) -> &Rig {
        &self.rig
    }

    pub fn rig_mut(&mut self) -> &mut Rig {
        &mut self.rig
    }

    pub fn controller(&self, hand: Hand) -> &Controller {
        &self.controllers[slot(hand)]
    }

    pub fn controller_mut(&mut self, hand: Hand) -> &mut Controller {
        &mut self.controllers[slot(hand)]
    }

    pub fn shortcuts(&self) -> &ShortcutMap {
        &self.shortcuts
    }

    pub fn set_shortcuts(&mut self, shortcuts: ShortcutMap) {
        self.shortcuts = shortcuts;
    }

    /// Route pointer events in `layout` to this hand's primary 2D axis.
    pub fn set_pad_layout(&mut self, hand: Hand, layout: PadLayout) {
        self.pads.insert(hand, layout);
    }

    pub fn clear_pad_layout(&mut self, hand: Hand) {
        self.pads.remove(&hand);
    }

    /// Frames ticked since creation.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Enqueue an event for the next tick. Returns its serial.
    pub fn push_event(&mut self, kind: InputEventKind) -> u64 {
        self.queue.push(kind)
    }

    pub fn queue_mut(&mut self) -> &mut EventQueue {
        &mut self.queue
    }

    /// Rig pose and intents back to defaults, controllers rebuilt from the
    /// current configuration, shortcut latches dropped.
    pub fn reset(&mut self) {
        self.rig.set_params(RigParams::from(&self.config));
        self.rig.reset();
        for controller in &mut self.controllers {
            controller.reset(&self.config.controller);
        }
        self.shortcuts.clear();
        tracing::debug!(frame = self.frame, "session reset");
    }

    /// Apply every queued event, then advance the rig by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        for event in self.queue.drain() {
            self.handle(&event);
        }
        self.rig.tick(dt);
        self.frame += 1;
    }

    fn handle(&mut self, event: &InputEvent) {
        match event.kind {
            InputEventKind::KeyDown { .. } | InputEventKind::KeyUp { .. } => {
                let fired =
                    self.shortcuts
                        .dispatch(event, self.config.release_match, &mut self.rig.intents);
                for (hand, action) in fired {
                    self.controllers[slot(hand)].apply(action, self.rng.as_mut());
                }
            }
            InputEventKind::PointerDown { .. } | InputEventKind::PointerDrag { .. } => {
                for (hand, layout) in &self.pads {
                    let axis = &mut self.controllers[slot(*hand)].primary_2d_axis;
                    layout.apply(axis, &event.kind, self.rng.as_mut());
                }
            }
        }
    }

    /// Apply scripted steps: events are queued, taps queue a press and a
    /// release, ticks advance the frame.
    pub fn run_script(&mut self, steps: &[ScriptStep]) {
        for step in steps {
            match step {
                ScriptStep::Event(kind) => {
                    self.push_event(*kind);
                }
                ScriptStep::Tap(combo) => {
                    self.queue.key_tap(combo.key, combo.modifiers);
                }
                ScriptStep::Tick(dt) => self.tick(*dt),
            }
        }
    }

    /// Device state for one hand with pose and tracking taken from the rig.
    pub fn sample(&self, hand: Hand) -> DeviceState {
        let mut state = self.controller(hand).sample();
        let kind = hand.anchor();
        state.is_valid = self.rig.anchor(kind).is_some();
        state.is_tracked = self.rig.anchor(kind).is_some_and(|a| a.active());
        if let Some(pose) = self.rig.world_transform(kind) {
            state.device_position = pose.position;
            state.device_rotation = pose.rotation;
        }
        state
    }

    /// World pose of the simulated headset.
    pub fn head_pose(&self) -> Option<Transform> {
        self.rig.world_transform(AnchorKind::Head)
    }

    pub fn drain_rig_events(&mut self) -> Vec<RigEvent> {
        self.rig.drain_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};
    use xrsim_common::{ReleaseMatch, TrackingCenter};
    use xrsim_input::{Key, Modifiers, Rect, SequenceRandom};

    fn session() -> Session {
        Session::new(SimConfig::default(), Box::new(SequenceRandom::midpoint()))
    }

    #[test]
    fn fresh_session_samples_tracked_hands() {
        let s = session();
        for hand in Hand::BOTH {
            let state = s.sample(hand);
            assert!(state.is_valid);
            assert!(state.is_tracked);
            assert!(!state.trigger_button);
        }
        let right = s.sample(Hand::Right).device_position;
        assert!(right.x > 0.0 && (right.y - 0.85).abs() < 1e-5);
    }

    #[test]
    fn held_key_walks_until_released() {
        let mut s = session();
        s.queue_mut().key_down(Key::W, Modifiers::empty());
        s.tick(1.0);
        s.tick(0.5);
        let torso = s.rig().world_transform(AnchorKind::Torso).unwrap();
        assert!((torso.position - Vec3::new(0.0, 0.0, -1.45 * 1.5)).length() < 1e-4);

        s.queue_mut().key_up(Key::W, Modifiers::empty());
        s.tick(1.0);
        let after = s.rig().world_transform(AnchorKind::Torso).unwrap();
        assert_eq!(after.position, torso.position);
    }

    #[test]
    fn key_taps_toggle_controller_inputs() {
        let mut s = session();
        s.queue_mut().key_tap(Key::M, Modifiers::empty());
        s.queue_mut().key_tap(Key::Period, Modifiers::CONTROL);
        s.tick(0.0);
        assert!(s.sample(Hand::Right).trigger_button);
        assert!(!s.sample(Hand::Left).trigger_button);
        assert!(s.sample(Hand::Left).primary_button);

        s.queue_mut().key_tap(Key::M, Modifiers::empty());
        s.tick(0.0);
        assert!(!s.sample(Hand::Right).trigger_button);
    }

    #[test]
    fn hands_leave_tracking_after_walking_out() {
        let mut s = session();
        s.queue_mut().key_down(Key::W, Modifiers::empty());
        s.tick(3.0);
        assert!(!s.sample(Hand::Left).is_tracked);
        assert!(!s.sample(Hand::Right).is_tracked);
        assert_eq!(s.drain_rig_events().len(), 3);
    }

    #[test]
    fn torso_centred_volume_keeps_hands_tracked() {
        let config = SimConfig {
            tracking_center: TrackingCenter::Torso,
            ..SimConfig::default()
        };
        let mut s = Session::new(config, Box::new(SequenceRandom::midpoint()));
        s.queue_mut().key_down(Key::W, Modifiers::empty());
        s.tick(3.0);
        assert!(s.sample(Hand::Right).is_tracked);
    }

    #[test]
    fn strict_release_keeps_intent_after_modifier_first() {
        let config = SimConfig {
            release_match: ReleaseMatch::Strict,
            ..SimConfig::default()
        };
        let mut s = Session::new(config, Box::new(SequenceRandom::midpoint()));
        let mut map = ShortcutMap::empty();
        map.intents.push(crate::shortcuts::IntentBinding {
            combo: xrsim_input::KeyCombination::ctrl(Key::W),
            intent: xrsim_rig::Intent::MoveForward,
        });
        s.set_shortcuts(map);
        s.queue_mut().key_down(Key::W, Modifiers::CONTROL);
        s.queue_mut().key_up(Key::W, Modifiers::empty());
        s.tick(0.0);
        assert!(s.rig().intents.move_forward);
    }

    #[test]
    fn pointer_events_drive_configured_pad() {
        let mut s = session();
        s.set_pad_layout(
            Hand::Left,
            PadLayout::new(
                Rect::new(Vec2::ZERO, Vec2::new(300.0, 100.0)),
                Rect::new(Vec2::new(200.0, 0.0), Vec2::new(300.0, 100.0)),
            ),
        );
        s.push_event(InputEventKind::PointerDown {
            position: Vec2::new(275.0, 25.0),
        });
        s.tick(0.0);
        let left = s.sample(Hand::Left);
        assert!(left.primary_2d_axis_touch);
        assert_eq!(left.primary_2d_axis, Vec2::new(0.5, 0.5));
        assert!(!s.sample(Hand::Right).primary_2d_axis_touch);
    }

    #[test]
    fn pointer_without_layout_is_ignored() {
        let mut s = session();
        s.push_event(InputEventKind::PointerDown {
            position: Vec2::new(275.0, 25.0),
        });
        s.tick(0.0);
        assert!(!s.sample(Hand::Left).primary_2d_axis_touch);
    }

    #[test]
    fn reset_rebuilds_from_config() {
        let mut s = session();
        s.queue_mut().key_tap(Key::Comma, Modifiers::empty());
        s.queue_mut().key_down(Key::D, Modifiers::empty());
        s.tick(1.0);
        assert!(s.sample(Hand::Right).grip_button);

        let config = SimConfig {
            user_height: 2.0,
            ..SimConfig::default()
        };
        s.set_config(config);
        assert!(!s.sample(Hand::Right).grip_button);
        assert!(!s.rig().intents.any());
        let head = s.head_pose().unwrap();
        assert!((head.position - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn script_runs_through_session() {
        let mut s = session();
        let steps = crate::script::parse_script("down:W tick:1 up:W tap:ctrl+M tick").unwrap();
        s.run_script(&steps);
        assert_eq!(s.frame(), 2);
        assert!(s.sample(Hand::Left).trigger_button);
        let torso = s.rig().world_transform(AnchorKind::Torso).unwrap();
        assert!((torso.position.z + 1.45).abs() < 1e-4);
    }

    #[test]
    fn seeded_sessions_agree() {
        let run = |seed| {
            let mut s = Session::seeded(SimConfig::default(), seed);
            s.queue_mut().key_tap(Key::O, Modifiers::empty());
            s.queue_mut().key_tap(Key::M, Modifiers::CONTROL);
            s.tick(0.0);
            (s.sample(Hand::Right), s.sample(Hand::Left))
        };
        assert_eq!(run(7), run(7));
    }
}
