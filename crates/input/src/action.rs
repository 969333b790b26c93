use serde::{Deserialize, Serialize};

use crate::axis2d::Direction;

/// A discrete controller operation a shortcut can trigger.
///
/// Bindings never touch inputs directly; they produce actions, and the
/// controller applies them. This keeps keyboard shortcuts, scripted input,
/// and any future binding source on the same path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Touch the primary 2D axis at a point biased toward a direction.
    TouchDirection(Direction),
    /// Flip primary 2D axis touch.
    ToggleAxisTouch,
    /// Flip primary 2D axis click.
    ToggleAxisClick,
    /// Flip the trigger's digital press.
    ToggleTrigger,
    /// Flip the grip's digital press.
    ToggleGrip,
    /// Flip the primary button's press.
    TogglePrimary,
}

impl Action {
    pub const ALL: [Action; 9] = [
        Action::TouchDirection(Direction::Up),
        Action::TouchDirection(Direction::Down),
        Action::TouchDirection(Direction::Left),
        Action::TouchDirection(Direction::Right),
        Action::ToggleAxisTouch,
        Action::ToggleAxisClick,
        Action::ToggleTrigger,
        Action::ToggleGrip,
        Action::TogglePrimary,
    ];
}
