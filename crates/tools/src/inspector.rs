use glam::EulerRot;
use serde::Serialize;
use xrsim_common::AnchorKind;
use xrsim_input::DeviceState;
use xrsim_rig::Rig;

/// Rig inspector for developer tooling.
///
/// Read-only queries against a rig for debugging and headless runs.
pub struct RigInspector;

impl RigInspector {
    /// Produce a summary of the rig state.
    pub fn summary(rig: &Rig) -> RigSummary {
        let torso = rig.world_transform(AnchorKind::Torso);
        let (yaw, _, _) = torso
            .map(|t| t.rotation.to_euler(EulerRot::YXZ))
            .unwrap_or_default();
        RigSummary {
            ticks: rig.ticks(),
            valid: rig.is_valid(),
            torso_position: torso.map(|t| t.position.to_array()),
            // Positive yaw turns right.
            torso_yaw: -yaw.to_degrees(),
            head_pitch: rig.head_pitch(),
            tracked: AnchorKind::TRACKED
                .iter()
                .filter(|k| rig.anchor(**k).is_some_and(|a| a.active()))
                .count(),
            pending_events: rig.events().len(),
        }
    }

    /// World pose and tracking state of one anchor.
    pub fn inspect_anchor(rig: &Rig, kind: AnchorKind) -> Option<AnchorInfo> {
        let anchor = rig.anchor(kind)?;
        let world = rig.world_transform(kind)?;
        let r = world.rotation;
        Some(AnchorInfo {
            kind,
            position: world.position.to_array(),
            rotation: [r.x, r.y, r.z, r.w],
            active: anchor.active(),
        })
    }

    /// Every bound anchor, torso first.
    pub fn list_anchors(rig: &Rig) -> Vec<AnchorInfo> {
        AnchorKind::ALL
            .into_iter()
            .filter_map(|kind| Self::inspect_anchor(rig, kind))
            .collect()
    }
}

/// Summary of rig state for the inspector.
#[derive(Debug, Clone, Serialize)]
pub struct RigSummary {
    pub ticks: u64,
    pub valid: bool,
    pub torso_position: Option<[f32; 3]>,
    pub torso_yaw: f32,
    pub head_pitch: Option<f32>,
    pub tracked: usize,
    pub pending_events: usize,
}

impl std::fmt::Display for RigSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rig: ticks={} valid={}", self.ticks, self.valid)?;
        if let Some([x, y, z]) = self.torso_position {
            write!(f, " torso=({x:.2}, {y:.2}, {z:.2}) yaw={:.1}", self.torso_yaw)?;
        }
        if let Some(pitch) = self.head_pitch {
            write!(f, " pitch={pitch:.1}")?;
        }
        write!(
            f,
            " tracked={}/3 pending_events={}",
            self.tracked, self.pending_events
        )
    }
}

/// Detailed info about a single anchor.
#[derive(Debug, Clone, Serialize)]
pub struct AnchorInfo {
    pub kind: AnchorKind,
    pub position: [f32; 3],
    pub rotation: [f32; 4],
    pub active: bool,
}

impl std::fmt::Display for AnchorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<10} pos=({:.2}, {:.2}, {:.2}) {}",
            self.kind.to_string(),
            self.position[0],
            self.position[1],
            self.position[2],
            if self.active { "tracked" } else { "lost" },
        )
    }
}

/// One-line rendering of a device state.
pub struct DeviceLine<'a>(pub &'a DeviceState);

impl std::fmt::Display for DeviceLine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self.0;
        let flag = |on: bool| if on { '+' } else { '-' };
        write!(
            f,
            "axis=({:.2}, {:.2}) touch{} click{} trigger={:.2}{} grip={:.2}{} primary{} ptouch{} {}",
            s.primary_2d_axis.x,
            s.primary_2d_axis.y,
            flag(s.primary_2d_axis_touch),
            flag(s.primary_2d_axis_click),
            s.trigger,
            flag(s.trigger_button),
            s.grip,
            flag(s.grip_button),
            flag(s.primary_button),
            flag(s.primary_touch),
            if s.is_tracked { "tracked" } else { "lost" },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xrsim_rig::RigParams;

    #[test]
    fn summary_fresh_rig() {
        let rig = Rig::with_default_anchors(RigParams::default());
        let summary = RigInspector::summary(&rig);
        assert_eq!(summary.ticks, 0);
        assert!(summary.valid);
        assert_eq!(summary.tracked, 3);
        assert_eq!(summary.torso_position, Some([0.0, 0.0, 0.0]));
    }

    #[test]
    fn summary_after_turning() {
        let mut rig = Rig::with_default_anchors(RigParams::default());
        rig.intents.rotate_right = true;
        rig.tick(1.0);
        let summary = RigInspector::summary(&rig);
        assert_eq!(summary.ticks, 1);
        assert!((summary.torso_yaw - 30.0).abs() < 1e-3);
    }

    #[test]
    fn summary_incomplete_rig() {
        let rig = Rig::new(RigParams::default());
        let summary = RigInspector::summary(&rig);
        assert!(!summary.valid);
        assert_eq!(summary.torso_position, None);
        assert_eq!(summary.tracked, 0);
        assert!(summary.to_string().contains("valid=false"));
    }

    #[test]
    fn inspect_anchor_found() {
        let rig = Rig::with_default_anchors(RigParams::default());
        let head = RigInspector::inspect_anchor(&rig, AnchorKind::Head).unwrap();
        assert_eq!(head.position, [0.0, 1.7, 0.0]);
        assert!(head.active);
        assert!(head.to_string().starts_with("head"));
    }

    #[test]
    fn inspect_anchor_not_found() {
        let mut rig = Rig::with_default_anchors(RigParams::default());
        rig.unbind(AnchorKind::LeftHand);
        assert!(RigInspector::inspect_anchor(&rig, AnchorKind::LeftHand).is_none());
        assert_eq!(RigInspector::list_anchors(&rig).len(), 3);
    }

    #[test]
    fn summary_display() {
        let rig = Rig::with_default_anchors(RigParams::default());
        let s = RigInspector::summary(&rig).to_string();
        assert!(s.contains("ticks=0"));
        assert!(s.contains("tracked=3/3"));
    }

    #[test]
    fn device_line_flags() {
        let state = DeviceState {
            trigger: 0.5,
            trigger_button: true,
            ..DeviceState::default()
        };
        let line = DeviceLine(&state).to_string();
        assert!(line.contains("trigger=0.50+"));
        assert!(line.contains("grip=0.00-"));
        assert!(line.ends_with("lost"));
    }

    #[test]
    fn summary_serializes() {
        let rig = Rig::with_default_anchors(RigParams::default());
        let json = serde_json::to_string(&RigInspector::summary(&rig)).unwrap();
        assert!(json.contains("\"valid\":true"));
    }
}
