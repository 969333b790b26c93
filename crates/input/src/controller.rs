use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use xrsim_common::{ControllerConfig, Hand};

use crate::action::Action;
use crate::axis1d::Axis1d;
use crate::axis2d::Axis2d;
use crate::button::DigitalButton;
use crate::random::RandomSource;

/// Per-frame record handed to the consuming interaction framework.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceState {
    pub is_valid: bool,
    /// Whether the hand anchor is inside the tracking volume.
    pub is_tracked: bool,
    pub device_position: Vec3,
    pub device_rotation: Quat,
    pub primary_2d_axis: Vec2,
    pub primary_2d_axis_touch: bool,
    pub primary_2d_axis_click: bool,
    pub trigger: f32,
    pub trigger_button: bool,
    pub grip: f32,
    pub grip_button: bool,
    pub primary_button: bool,
    pub primary_touch: bool,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self {
            is_valid: false,
            is_tracked: false,
            device_position: Vec3::ZERO,
            device_rotation: Quat::IDENTITY,
            primary_2d_axis: Vec2::ZERO,
            primary_2d_axis_touch: false,
            primary_2d_axis_click: false,
            trigger: 0.0,
            trigger_button: false,
            grip: 0.0,
            grip_button: false,
            primary_button: false,
            primary_touch: false,
        }
    }
}

/// One simulated hand controller: a primary 2D axis, trigger, grip and
/// primary button.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Controller {
    pub hand: Hand,
    pub primary_2d_axis: Axis2d,
    pub trigger: Axis1d,
    pub grip: Axis1d,
    pub primary_button: DigitalButton,
}

impl Controller {
    pub fn new(hand: Hand, config: &ControllerConfig) -> Self {
        Self {
            hand,
            primary_2d_axis: Axis2d::new("Primary 2D Axis")
                .with_touch(config.touch_included)
                .with_click(config.click_included),
            trigger: Axis1d::new("Trigger")
                .with_threshold(config.axis_threshold)
                .with_button(config.button_included),
            grip: Axis1d::new("Grip")
                .with_threshold(config.axis_threshold)
                .with_button(config.button_included),
            primary_button: DigitalButton::new("Primary")
                .with_touch(config.primary_touch_included),
        }
    }

    /// Return every input to rest with freshly applied configuration.
    pub fn reset(&mut self, config: &ControllerConfig) {
        *self = Self::new(self.hand, config);
    }

    pub fn apply(&mut self, action: Action, rng: &mut dyn RandomSource) {
        match action {
            Action::TouchDirection(direction) => {
                self.primary_2d_axis.touch_directional(direction, true, rng)
            }
            Action::ToggleAxisTouch => self.primary_2d_axis.toggle_touching(rng),
            Action::ToggleAxisClick => self.primary_2d_axis.toggle_clicked(rng),
            Action::ToggleTrigger => self.trigger.toggle_pressed(rng),
            Action::ToggleGrip => self.grip.toggle_pressed(rng),
            Action::TogglePrimary => self.primary_button.toggle_pressed(),
        }
        tracing::debug!(hand = %self.hand, ?action, "controller action");
    }

    /// Snapshot of the inputs. Pose fields are left at identity and
    /// `is_tracked` false; the session fills them from the rig.
    pub fn sample(&self) -> DeviceState {
        DeviceState {
            is_valid: true,
            primary_2d_axis: self.primary_2d_axis.value(),
            primary_2d_axis_touch: self.primary_2d_axis.touching(),
            primary_2d_axis_click: self.primary_2d_axis.clicked(),
            trigger: self.trigger.value(),
            trigger_button: self.trigger.pressed(),
            grip: self.grip.value(),
            grip_button: self.grip.pressed(),
            primary_button: self.primary_button.pressed(),
            primary_touch: self.primary_button.touching(),
            ..DeviceState::default()
        }
    }
}
