use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::random::RandomSource;

/// Half-width of the box a touch from rest is resampled into.
const REST_RESAMPLE: f32 = 0.5;

/// Used when the resample itself lands on the origin.
const REST_FALLBACK: Vec2 = Vec2::new(0.0, 0.25);

/// Direction bias for [`Axis2d::touch_directional`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Random vector leaning toward this direction: the major component lies
    /// in `[0.5, 1.0]` of its sign, the minor one in `[-0.25, 0.25]`.
    pub fn sample(self, rng: &mut dyn RandomSource) -> Vec2 {
        let minor = rng.range(-0.25, 0.25);
        let major = rng.range(0.5, 1.0);
        match self {
            Direction::Up => Vec2::new(minor, major),
            Direction::Down => Vec2::new(minor, -major),
            Direction::Left => Vec2::new(-major, minor),
            Direction::Right => Vec2::new(major, minor),
        }
    }
}

/// A thumbstick or trackpad with touch and click sub-states.
///
/// Invariants:
/// - `clicked` implies `touching`.
/// - Losing touch resets the value to the origin and drops the click.
/// - Losing the click also drops touch (and resets the value) unless
///   `touch_included` is set.
/// - Gaining touch or click while at the origin resamples a non-origin value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis2d {
    name: String,
    value: Vec2,
    touching: bool,
    clicked: bool,
    /// Touch is tracked independently of click.
    pub touch_included: bool,
    /// Click is exposed to the consumer. Metadata only.
    pub click_included: bool,
}

impl Axis2d {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Vec2::ZERO,
            touching: false,
            clicked: false,
            touch_included: false,
            click_included: false,
        }
    }

    pub fn with_touch(mut self, included: bool) -> Self {
        self.touch_included = included;
        self
    }

    pub fn with_click(mut self, included: bool) -> Self {
        self.click_included = included;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn value(&self) -> Vec2 {
        self.value
    }

    pub fn touching(&self) -> bool {
        self.touching
    }

    pub fn clicked(&self) -> bool {
        self.clicked
    }

    /// Saturate each component into `[-1, 1]` independently.
    pub fn set_value(&mut self, value: Vec2) {
        self.value = Vec2::new(saturate(value.x), saturate(value.y));
    }

    pub fn set_touching(&mut self, touching: bool, rng: &mut dyn RandomSource) {
        if touching {
            self.touching = true;
            self.leave_rest(rng);
        } else {
            self.touching = false;
            self.value = Vec2::ZERO;
            self.clicked = false;
        }
    }

    pub fn set_clicked(&mut self, clicked: bool, rng: &mut dyn RandomSource) {
        if clicked {
            self.clicked = true;
            self.touching = true;
            self.leave_rest(rng);
        } else {
            self.clicked = false;
            if !self.touch_included {
                self.touching = false;
                self.value = Vec2::ZERO;
            }
        }
    }

    /// Commit `value` first, then the touch state. A non-origin value
    /// therefore suppresses the resample.
    pub fn touch(&mut self, touching: bool, value: Vec2, rng: &mut dyn RandomSource) {
        self.set_value(value);
        self.set_touching(touching, rng);
    }

    /// Touch at a random point biased toward `direction`.
    pub fn touch_directional(
        &mut self,
        direction: Direction,
        touching: bool,
        rng: &mut dyn RandomSource,
    ) {
        let value = direction.sample(rng);
        self.touch(touching, value, rng);
    }

    /// Commit `value` first, then the click state.
    pub fn click(&mut self, clicked: bool, value: Vec2, rng: &mut dyn RandomSource) {
        self.set_value(value);
        self.set_clicked(clicked, rng);
    }

    pub fn toggle_touching(&mut self, rng: &mut dyn RandomSource) {
        self.set_touching(!self.touching, rng);
    }

    pub fn toggle_clicked(&mut self, rng: &mut dyn RandomSource) {
        self.set_clicked(!self.clicked, rng);
    }

    fn leave_rest(&mut self, rng: &mut dyn RandomSource) {
        if self.value == Vec2::ZERO {
            let x = rng.range(-REST_RESAMPLE, REST_RESAMPLE);
            let y = rng.range(-REST_RESAMPLE, REST_RESAMPLE);
            let sample = Vec2::new(x, y);
            self.value = if sample == Vec2::ZERO { REST_FALLBACK } else { sample };
        }
    }
}

fn saturate(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(-1.0, 1.0) }
}
