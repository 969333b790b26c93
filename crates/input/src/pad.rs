//! Pointer drag tracking for a 2D axis pad.
//!
//! A visualizer draws the pad as a square with a handle marking the current
//! value; this module owns only the transition rules that pointer events
//! apply to the underlying [`Axis2d`]. Positions are in host screen space
//! with y growing downward, so the pad's upper edge maps to `y = +1`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::axis2d::Axis2d;
use crate::event::InputEventKind;
use crate::random::RandomSource;

/// Axis-aligned rectangle, inclusive on all edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_center_half_size(center: Vec2, half: Vec2) -> Self {
        Self::new(center - half, center + half)
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn half_size(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

/// What a pointer event did to the pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadResponse {
    /// The event was outside this control.
    Ignored,
    /// The pad is being touched (and possibly clicked) at the pointer.
    Tracking,
    /// A press landed in the control but outside the pad.
    Released,
}

/// Screen geometry of one pad control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PadLayout {
    /// The whole control row, labels and value fields included.
    pub control: Rect,
    /// The square the value is drawn in. Nested inside `control`.
    pub pad: Rect,
    /// Half-size of the handle while touched.
    pub touch_handle: f32,
    /// Half-size of the handle while clicked.
    pub click_handle: f32,
}

impl PadLayout {
    /// Handles are sized from the pad's shorter side.
    pub fn new(control: Rect, pad: Rect) -> Self {
        let size = (pad.max - pad.min).min_element();
        Self {
            control,
            pad,
            touch_handle: size * 0.05,
            click_handle: size * 0.1,
        }
    }

    /// Screen position of an axis value.
    pub fn to_screen(&self, value: Vec2) -> Vec2 {
        let c = self.pad.center();
        let half = self.pad.half_size();
        Vec2::new(c.x + value.x * half.x, c.y - value.y * half.y)
    }

    /// Axis value under a screen position. Not clamped.
    pub fn to_value(&self, position: Vec2) -> Vec2 {
        let c = self.pad.center();
        let half = self.pad.half_size();
        if half.x <= 0.0 || half.y <= 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new((position.x - c.x) / half.x, (c.y - position.y) / half.y)
    }

    /// Hit region of the value handle, or `None` while the pad is at rest.
    pub fn handle(&self, axis: &Axis2d) -> Option<Rect> {
        let half = if axis.clicked() {
            self.click_handle
        } else if axis.touching() {
            self.touch_handle
        } else {
            return None;
        };
        Some(Rect::from_center_half_size(
            self.to_screen(axis.value()),
            Vec2::splat(half),
        ))
    }

    /// Apply one pointer event.
    ///
    /// A press inside the pad drops any click, then touches; while touching,
    /// the pointer position becomes the value. A press that also lands on the
    /// handle (as drawn before this event) clicks. A press inside the control
    /// but outside the pad releases touch. Drags outside the pad do nothing.
    pub fn apply(
        &self,
        axis: &mut Axis2d,
        event: &InputEventKind,
        rng: &mut dyn RandomSource,
    ) -> PadResponse {
        let (position, down) = match *event {
            InputEventKind::PointerDown { position } => (position, true),
            InputEventKind::PointerDrag { position } => (position, false),
            _ => return PadResponse::Ignored,
        };

        if self.pad.contains(position) {
            let handle = self.handle(axis);
            if down {
                axis.click(false, Vec2::ZERO, rng);
                axis.touch(true, Vec2::ZERO, rng);
            }
            if axis.touching() {
                let value = self.to_value(position);
                axis.touch(true, value, rng);
                if down && handle.is_some_and(|h| h.contains(position)) {
                    axis.click(true, value, rng);
                }
            }
            tracing::trace!(
                pad = axis.name(),
                x = axis.value().x,
                y = axis.value().y,
                clicked = axis.clicked(),
                "pad tracking"
            );
            PadResponse::Tracking
        } else if down && self.control.contains(position) {
            axis.touch(false, Vec2::ZERO, rng);
            PadResponse::Released
        } else {
            PadResponse::Ignored
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceRandom;

    // Control row 0..300 x 0..100, pad 200..300 x 0..100 (center 250, 50).
    fn layout() -> PadLayout {
        PadLayout::new(
            Rect::new(Vec2::ZERO, Vec2::new(300.0, 100.0)),
            Rect::new(Vec2::new(200.0, 0.0), Vec2::new(300.0, 100.0)),
        )
    }

    fn pad() -> Axis2d {
        Axis2d::new("Primary 2D Axis").with_touch(true).with_click(true)
    }

    fn down(x: f32, y: f32) -> InputEventKind {
        InputEventKind::PointerDown {
            position: Vec2::new(x, y),
        }
    }

    fn drag(x: f32, y: f32) -> InputEventKind {
        InputEventKind::PointerDrag {
            position: Vec2::new(x, y),
        }
    }

    #[test]
    fn screen_value_mapping_is_inverse() {
        let l = layout();
        assert_eq!(l.to_value(Vec2::new(250.0, 50.0)), Vec2::ZERO);
        assert_eq!(l.to_value(Vec2::new(300.0, 0.0)), Vec2::new(1.0, 1.0));
        assert_eq!(l.to_screen(Vec2::new(-1.0, -1.0)), Vec2::new(200.0, 100.0));
    }

    #[test]
    fn press_in_pad_touches_at_pointer() {
        let mut rng = SequenceRandom::midpoint();
        let mut a = pad();
        let r = layout().apply(&mut a, &down(275.0, 25.0), &mut rng);
        assert_eq!(r, PadResponse::Tracking);
        assert!(a.touching());
        assert!(!a.clicked());
        assert_eq!(a.value(), Vec2::new(0.5, 0.5));
    }

    #[test]
    fn drag_follows_pointer_while_touching() {
        let mut rng = SequenceRandom::midpoint();
        let l = layout();
        let mut a = pad();
        l.apply(&mut a, &down(275.0, 25.0), &mut rng);
        l.apply(&mut a, &drag(225.0, 75.0), &mut rng);
        assert_eq!(a.value(), Vec2::new(-0.5, -0.5));
        assert!(a.touching());
    }

    #[test]
    fn drag_without_touch_is_ignored_by_state() {
        let mut rng = SequenceRandom::midpoint();
        let mut a = pad();
        let r = layout().apply(&mut a, &drag(275.0, 25.0), &mut rng);
        assert_eq!(r, PadResponse::Tracking);
        assert!(!a.touching());
        assert_eq!(a.value(), Vec2::ZERO);
    }

    #[test]
    fn press_on_handle_clicks() {
        let mut rng = SequenceRandom::midpoint();
        let l = layout();
        let mut a = pad();
        l.apply(&mut a, &down(275.0, 25.0), &mut rng);
        // Second press right on the drawn handle.
        l.apply(&mut a, &down(276.0, 26.0), &mut rng);
        assert!(a.clicked());
        assert!(a.touching());
        assert_eq!(a.value(), Vec2::new(0.52, 0.48));
    }

    #[test]
    fn press_off_handle_drops_click() {
        let mut rng = SequenceRandom::midpoint();
        let l = layout();
        let mut a = pad();
        a.click(true, Vec2::new(0.5, 0.5), &mut rng);
        l.apply(&mut a, &down(210.0, 90.0), &mut rng);
        assert!(!a.clicked());
        assert!(a.touching());
        assert_eq!(a.value(), Vec2::new(-0.8, -0.8));
    }

    #[test]
    fn press_in_control_outside_pad_releases() {
        let mut rng = SequenceRandom::midpoint();
        let l = layout();
        let mut a = pad();
        l.apply(&mut a, &down(275.0, 25.0), &mut rng);
        let r = l.apply(&mut a, &down(50.0, 50.0), &mut rng);
        assert_eq!(r, PadResponse::Released);
        assert!(!a.touching());
        assert_eq!(a.value(), Vec2::ZERO);
    }

    #[test]
    fn drag_outside_pad_keeps_state() {
        let mut rng = SequenceRandom::midpoint();
        let l = layout();
        let mut a = pad();
        l.apply(&mut a, &down(275.0, 25.0), &mut rng);
        let r = l.apply(&mut a, &drag(50.0, 50.0), &mut rng);
        assert_eq!(r, PadResponse::Ignored);
        assert!(a.touching());
    }

    #[test]
    fn press_outside_control_ignored() {
        let mut rng = SequenceRandom::midpoint();
        let l = layout();
        let mut a = pad();
        l.apply(&mut a, &down(275.0, 25.0), &mut rng);
        let r = l.apply(&mut a, &down(500.0, 500.0), &mut rng);
        assert_eq!(r, PadResponse::Ignored);
        assert!(a.touching());
    }

    #[test]
    fn key_events_ignored() {
        let mut rng = SequenceRandom::midpoint();
        let mut a = pad();
        let ev = InputEventKind::KeyDown {
            key: crate::event::Key::W,
            modifiers: crate::event::Modifiers::empty(),
        };
        assert_eq!(layout().apply(&mut a, &ev, &mut rng), PadResponse::Ignored);
    }

    #[test]
    fn handle_absent_at_rest() {
        let l = layout();
        assert!(l.handle(&pad()).is_none());
    }
}
