use serde::{Deserialize, Serialize};

/// One of the eight motion requests a binding can hold down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    RotateLeft,
    RotateRight,
    LookUp,
    LookDown,
}

impl Intent {
    pub const ALL: [Intent; 8] = [
        Intent::MoveForward,
        Intent::MoveBackward,
        Intent::MoveLeft,
        Intent::MoveRight,
        Intent::RotateLeft,
        Intent::RotateRight,
        Intent::LookUp,
        Intent::LookDown,
    ];
}

/// Motion intents for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Intents {
    pub move_forward: bool,
    pub move_backward: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub look_up: bool,
    pub look_down: bool,
}

impl Intents {
    pub fn get(&self, intent: Intent) -> bool {
        match intent {
            Intent::MoveForward => self.move_forward,
            Intent::MoveBackward => self.move_backward,
            Intent::MoveLeft => self.move_left,
            Intent::MoveRight => self.move_right,
            Intent::RotateLeft => self.rotate_left,
            Intent::RotateRight => self.rotate_right,
            Intent::LookUp => self.look_up,
            Intent::LookDown => self.look_down,
        }
    }

    pub fn set(&mut self, intent: Intent, active: bool) {
        let slot = match intent {
            Intent::MoveForward => &mut self.move_forward,
            Intent::MoveBackward => &mut self.move_backward,
            Intent::MoveLeft => &mut self.move_left,
            Intent::MoveRight => &mut self.move_right,
            Intent::RotateLeft => &mut self.rotate_left,
            Intent::RotateRight => &mut self.rotate_right,
            Intent::LookUp => &mut self.look_up,
            Intent::LookDown => &mut self.look_down,
        };
        *slot = active;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn any(&self) -> bool {
        Intent::ALL.iter().any(|i| self.get(*i))
    }

    /// Iterator over the intents currently set.
    pub fn active(&self) -> impl Iterator<Item = Intent> + '_ {
        Intent::ALL.into_iter().filter(|i| self.get(*i))
    }
}
