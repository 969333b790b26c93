use serde::Serialize;

use crate::random::RandomSource;

/// Upper bound of the random step used when a nudge has no explicit delta.
pub const MAX_NUDGE: f32 = 0.25;

/// Default press threshold for triggers and grips.
pub const DEFAULT_THRESHOLD: f32 = 0.1;

/// A spring-loaded analog input (trigger, grip) with a derived digital press.
///
/// `pressed == (value >= threshold)` holds after every operation. Writing the
/// value recomputes the press; forcing the press moves the value into the
/// matching half of the range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis1d {
    name: String,
    threshold: f32,
    value: f32,
    pressed: bool,
    /// Whether the consumer exposes the digital press. Metadata only.
    pub button_included: bool,
}

impl Axis1d {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            threshold: DEFAULT_THRESHOLD,
            value: 0.0,
            pressed: false,
            button_included: false,
        }
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.set_threshold(threshold);
        self
    }

    pub fn with_button(mut self, included: bool) -> Self {
        self.button_included = included;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Clamped into `(0, 1]` so both halves of the range stay non-empty.
    pub fn set_threshold(&mut self, threshold: f32) {
        self.threshold = if threshold.is_nan() {
            DEFAULT_THRESHOLD
        } else {
            threshold.clamp(f32::EPSILON, 1.0)
        };
        self.pressed = self.value >= self.threshold;
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn pressed(&self) -> bool {
        self.pressed
    }

    /// Saturate into `[0, 1]` and recompute the press.
    pub fn set_value(&mut self, value: f32) {
        self.value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        self.pressed = self.value >= self.threshold;
    }

    /// Force the press state, resampling the value when it sits on the wrong
    /// side of the threshold.
    pub fn set_pressed(&mut self, pressed: bool, rng: &mut dyn RandomSource) {
        if pressed && self.value < self.threshold {
            self.value = self.sample_above(rng);
        } else if !pressed && self.value >= self.threshold {
            self.value = self.sample_below(rng);
        }
        self.pressed = pressed;
    }

    /// Combined update: a change of press state wins over the axis value.
    pub fn press_with_axis(&mut self, pressed: bool, axis: f32, rng: &mut dyn RandomSource) {
        if pressed != self.pressed {
            self.set_pressed(pressed, rng);
        } else {
            self.set_value(axis);
        }
    }

    pub fn toggle_pressed(&mut self, rng: &mut dyn RandomSource) {
        self.set_pressed(!self.pressed, rng);
    }

    /// Raise the value by `delta`, or by a random step below [`MAX_NUDGE`].
    pub fn nudge_up(&mut self, delta: Option<f32>, rng: &mut dyn RandomSource) {
        let delta = delta.unwrap_or_else(|| rng.range(0.0, MAX_NUDGE));
        self.set_value(self.value + delta);
    }

    /// Lower the value by `delta`, or by a random step below [`MAX_NUDGE`].
    pub fn nudge_down(&mut self, delta: Option<f32>, rng: &mut dyn RandomSource) {
        let delta = delta.unwrap_or_else(|| rng.range(0.0, MAX_NUDGE));
        self.set_value(self.value - delta);
    }

    // Strictly above the threshold; saturates to 1.0 when nothing fits.
    fn sample_above(&self, rng: &mut dyn RandomSource) -> f32 {
        let low = self.threshold + f32::EPSILON;
        if low >= 1.0 {
            return 1.0;
        }
        let v = rng.range(low, 1.0);
        if v > self.threshold { v.min(1.0) } else { 1.0 }
    }

    // In [0, threshold).
    fn sample_below(&self, rng: &mut dyn RandomSource) -> f32 {
        let v = rng.range(0.0, self.threshold);
        if (0.0..self.threshold).contains(&v) { v } else { 0.0 }
    }
}
