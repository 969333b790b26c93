use serde::Serialize;

/// A digital button with an optional touch sub-state.
///
/// `pressed` always implies `touching`. Without `touch_included` the two are
/// fully coupled; with it, releasing the press leaves touch alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigitalButton {
    name: String,
    pressed: bool,
    touching: bool,
    pub touch_included: bool,
}

impl DigitalButton {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pressed: false,
            touching: false,
            touch_included: false,
        }
    }

    pub fn with_touch(mut self, included: bool) -> Self {
        self.touch_included = included;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn pressed(&self) -> bool {
        self.pressed
    }

    pub fn touching(&self) -> bool {
        self.touching
    }

    pub fn set_pressed(&mut self, pressed: bool) {
        if pressed || !self.touch_included {
            self.touching = pressed;
        }
        self.pressed = pressed;
    }

    pub fn set_touching(&mut self, touching: bool) {
        if !touching {
            self.pressed = false;
        }
        self.touching = touching;
    }

    pub fn toggle_pressed(&mut self) {
        self.set_pressed(!self.pressed);
    }

    pub fn toggle_touching(&mut self) {
        self.set_touching(!self.touching);
    }
}
