use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Rigid pose: position and rotation, no scale.
///
/// Conventions follow a right-handed frame: +Y is up, -Z is forward, +X is
/// right. Every anchor in the rig is expressed relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Unit forward axis of this pose.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Map a point from this pose's local space into its parent space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }

    /// Compose `self` (parent) with `child`, yielding the child's pose in the
    /// parent's parent space.
    pub fn mul_transform(&self, child: &Transform) -> Transform {
        Transform {
            position: self.transform_point(child.position),
            rotation: (self.rotation * child.rotation).normalize(),
        }
    }

    /// Move along this pose's own axes.
    pub fn translate_local(&mut self, local_offset: Vec3) {
        self.position += self.rotation * local_offset;
    }

    /// Rotate about this pose's own up axis. Positive angles turn right.
    pub fn yaw_local(&mut self, degrees: f32) {
        let turn = Quat::from_rotation_y(-degrees.to_radians());
        self.rotation = (self.rotation * turn).normalize();
    }
}

/// Which hand a controller belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    pub const BOTH: [Hand; 2] = [Hand::Left, Hand::Right];

    /// -1 for the left hand, +1 for the right hand.
    pub fn lateral_sign(self) -> f32 {
        match self {
            Hand::Left => -1.0,
            Hand::Right => 1.0,
        }
    }

    pub fn anchor(self) -> AnchorKind {
        match self {
            Hand::Left => AnchorKind::LeftHand,
            Hand::Right => AnchorKind::RightHand,
        }
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Hand::Left => f.write_str("left"),
            Hand::Right => f.write_str("right"),
        }
    }
}

/// Tracked points of the simulated rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorKind {
    Torso,
    Head,
    LeftHand,
    RightHand,
}

impl AnchorKind {
    pub const ALL: [AnchorKind; 4] = [
        AnchorKind::Torso,
        AnchorKind::Head,
        AnchorKind::LeftHand,
        AnchorKind::RightHand,
    ];

    /// Anchors subject to tracking-volume enforcement.
    pub const TRACKED: [AnchorKind; 3] = [
        AnchorKind::Head,
        AnchorKind::LeftHand,
        AnchorKind::RightHand,
    ];
}

impl std::fmt::Display for AnchorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AnchorKind::Torso => "torso",
            AnchorKind::Head => "head",
            AnchorKind::LeftHand => "left_hand",
            AnchorKind::RightHand => "right_hand",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Quat::IDENTITY);
    }

    #[test]
    fn identity_axes() {
        let t = Transform::IDENTITY;
        assert!(approx(t.forward(), Vec3::NEG_Z));
        assert!(approx(t.right(), Vec3::X));
        assert!(approx(t.up(), Vec3::Y));
    }

    #[test]
    fn yaw_right_turns_forward_towards_right() {
        let mut t = Transform::IDENTITY;
        t.yaw_local(90.0);
        assert!(approx(t.forward(), Vec3::X));
    }

    #[test]
    fn translate_local_follows_heading() {
        let mut t = Transform::IDENTITY;
        t.yaw_local(90.0);
        t.translate_local(Vec3::NEG_Z * 2.0);
        assert!(approx(t.position, Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn compose_parent_child() {
        let mut parent = Transform::from_position(Vec3::new(1.0, 0.0, 0.0));
        parent.yaw_local(90.0);
        let child = Transform::from_position(Vec3::new(0.0, 1.0, -1.0));
        let world = parent.mul_transform(&child);
        assert!(approx(world.position, Vec3::new(2.0, 1.0, 0.0)));
    }

    #[test]
    fn hand_anchor_mapping() {
        assert_eq!(Hand::Left.anchor(), AnchorKind::LeftHand);
        assert_eq!(Hand::Right.anchor(), AnchorKind::RightHand);
        assert_eq!(Hand::Left.lateral_sign(), -1.0);
    }

    #[test]
    fn tracked_anchors_exclude_torso() {
        assert!(!AnchorKind::TRACKED.contains(&AnchorKind::Torso));
    }
}
