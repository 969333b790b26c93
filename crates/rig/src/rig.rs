use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use xrsim_common::{AnchorKind, Hand, SimConfig, TrackingCenter, Transform};

use crate::intents::Intents;

/// Head pitch limit in degrees, either side of level.
pub const MAX_PITCH: f32 = 89.0;

/// A record of every observable change the rig makes on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RigEvent {
    /// An anchor crossed the tracking-volume boundary.
    ActivityChanged {
        anchor: AnchorKind,
        active: bool,
        distance: f32,
    },
    /// Poses and intents were returned to their defaults.
    Reset,
}

/// One tracked point of the rig, posed relative to its parent.
///
/// The torso's parent is the rig origin; head and hands hang off the torso.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub local: Transform,
    active: bool,
    /// When set, an external tracker owns the pose. Only meaningful for the
    /// head; cleared on reset so the simulator can drive it.
    pub pose_tracking: bool,
}

impl Anchor {
    pub fn new(local: Transform) -> Self {
        Self {
            local,
            active: true,
            pose_tracking: true,
        }
    }

    /// Inside the tracking volume as of the last tick.
    pub fn active(&self) -> bool {
        self.active
    }
}

/// Physical parameters of the simulated user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigParams {
    pub user_height: f32,
    pub move_speed: f32,
    pub rotate_speed: f32,
    pub tracking_radius: f32,
    pub tracking_center: TrackingCenter,
}

impl Default for RigParams {
    fn default() -> Self {
        Self::from(&SimConfig::default())
    }
}

impl From<&SimConfig> for RigParams {
    fn from(config: &SimConfig) -> Self {
        Self {
            user_height: config.user_height,
            move_speed: config.move_speed,
            rotate_speed: config.rotate_speed,
            tracking_radius: config.tracking_radius,
            tracking_center: config.tracking_center,
        }
    }
}

/// The simulated user: rig origin, torso, head and two hands.
///
/// All motion flows through [`Rig::tick`], driven by [`Intents`]. A rig with
/// any anchor unbound is incomplete; ticking it does nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rig {
    /// Tracking-space origin in world space.
    pub origin: Transform,
    anchors: BTreeMap<AnchorKind, Anchor>,
    pub intents: Intents,
    params: RigParams,
    ticks: u64,
    #[serde(skip)]
    event_log: Vec<RigEvent>,
}

impl Rig {
    /// An incomplete rig with no anchors bound.
    pub fn new(params: RigParams) -> Self {
        Self {
            origin: Transform::IDENTITY,
            anchors: BTreeMap::new(),
            intents: Intents::default(),
            params,
            ticks: 0,
            event_log: Vec::new(),
        }
    }

    /// A complete rig in its reset pose.
    pub fn with_default_anchors(params: RigParams) -> Self {
        let mut rig = Self::new(params);
        rig.bind_default_anchors();
        rig.reset();
        rig.event_log.clear();
        rig
    }

    pub fn params(&self) -> &RigParams {
        &self.params
    }

    /// Takes effect from the next tick or reset.
    pub fn set_params(&mut self, params: RigParams) {
        self.params = params;
    }

    /// Number of ticks that actually integrated motion.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_valid(&self) -> bool {
        AnchorKind::ALL
            .iter()
            .all(|kind| self.anchors.contains_key(kind))
    }

    /// Bind every missing anchor at identity. Call [`Rig::reset`] to pose them.
    pub fn bind_default_anchors(&mut self) {
        for kind in AnchorKind::ALL {
            self.anchors
                .entry(kind)
                .or_insert_with(|| Anchor::new(Transform::IDENTITY));
        }
    }

    pub fn bind(&mut self, kind: AnchorKind, anchor: Anchor) {
        self.anchors.insert(kind, anchor);
    }

    pub fn unbind(&mut self, kind: AnchorKind) -> Option<Anchor> {
        self.anchors.remove(&kind)
    }

    pub fn anchor(&self, kind: AnchorKind) -> Option<&Anchor> {
        self.anchors.get(&kind)
    }

    pub fn anchor_mut(&mut self, kind: AnchorKind) -> Option<&mut Anchor> {
        self.anchors.get_mut(&kind)
    }

    /// World pose of an anchor, composed through the origin and torso.
    pub fn world_transform(&self, kind: AnchorKind) -> Option<Transform> {
        let torso = self.origin.mul_transform(&self.anchors.get(&AnchorKind::Torso)?.local);
        if kind == AnchorKind::Torso {
            return Some(torso);
        }
        Some(torso.mul_transform(&self.anchors.get(&kind)?.local))
    }

    /// Head pitch in degrees, positive looking up.
    pub fn head_pitch(&self) -> Option<f32> {
        let head = self.anchors.get(&AnchorKind::Head)?;
        let (_, pitch, _) = head.local.rotation.to_euler(EulerRot::YXZ);
        Some(wrap_degrees(pitch.to_degrees()))
    }

    /// The point the tracking volume is centred on, in world space.
    pub fn tracking_center(&self) -> Option<Vec3> {
        let lift = Vec3::Y * self.params.user_height;
        match self.params.tracking_center {
            TrackingCenter::Room => Some(self.origin.transform_point(lift)),
            TrackingCenter::Torso => self
                .world_transform(AnchorKind::Torso)
                .map(|t| t.transform_point(lift)),
        }
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<RigEvent> {
        std::mem::take(&mut self.event_log)
    }

    pub fn events(&self) -> &[RigEvent] {
        &self.event_log
    }

    /// Clear intents and, on a complete rig, return every anchor to its
    /// default pose relative to the user height.
    pub fn reset(&mut self) {
        self.intents.clear();
        if self.is_valid() {
            let h = self.params.user_height;
            if let Some(torso) = self.anchors.get_mut(&AnchorKind::Torso) {
                torso.local = Transform::IDENTITY;
            }
            if let Some(head) = self.anchors.get_mut(&AnchorKind::Head) {
                head.local = Transform::from_position(Vec3::new(0.0, h, 0.0));
                head.pose_tracking = false;
            }
            for hand in Hand::BOTH {
                if let Some(anchor) = self.anchors.get_mut(&hand.anchor()) {
                    anchor.local = Transform::from_position(Vec3::new(
                        hand.lateral_sign() * h / 3.75,
                        h / 2.0,
                        -h / 7.5,
                    ));
                }
            }
            self.update_activity();
        }
        self.event_log.push(RigEvent::Reset);
        tracing::debug!(valid = self.is_valid(), "rig reset");
    }

    /// Advance the rig by `dt` seconds: translate, then turn, then look,
    /// then enforce the tracking volume.
    pub fn tick(&mut self, dt: f32) {
        let _span = tracing::info_span!("rig_tick", tick = self.ticks).entered();
        if !self.is_valid() {
            tracing::trace!("rig incomplete, tick skipped");
            return;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.ticks += 1;
        self.integrate_torso(dt);
        self.integrate_look(dt);
        self.update_activity();
    }

    fn integrate_torso(&mut self, dt: f32) {
        let i = self.intents;
        let step = self.params.move_speed * dt;
        let mut offset = Vec3::ZERO;
        if i.move_forward {
            offset += Vec3::NEG_Z * step;
        }
        if i.move_backward {
            offset += Vec3::Z * step;
        }
        if i.move_right {
            offset += Vec3::X * step;
        }
        if i.move_left {
            offset += Vec3::NEG_X * step;
        }
        let turn = self.params.rotate_speed * dt * signed(i.rotate_right, i.rotate_left);

        let Some(torso) = self.anchors.get_mut(&AnchorKind::Torso) else {
            return;
        };
        if offset != Vec3::ZERO {
            torso.local.translate_local(offset);
        }
        if turn != 0.0 {
            torso.local.yaw_local(turn);
        }
        tracing::trace!(?offset, turn, "torso integrated");
    }

    fn integrate_look(&mut self, dt: f32) {
        let i = self.intents;
        if !(i.look_up || i.look_down) {
            return;
        }
        let delta = self.params.rotate_speed * dt * signed(i.look_up, i.look_down);
        let Some(head) = self.anchors.get_mut(&AnchorKind::Head) else {
            return;
        };
        let (yaw, pitch, roll) = head.local.rotation.to_euler(EulerRot::YXZ);
        let pitch = (wrap_degrees(pitch.to_degrees()) + delta).clamp(-MAX_PITCH, MAX_PITCH);
        head.local.rotation = Quat::from_euler(EulerRot::YXZ, yaw, pitch.to_radians(), roll);
        tracing::trace!(pitch, "head pitch");
    }

    fn update_activity(&mut self) {
        let Some(center) = self.tracking_center() else {
            return;
        };
        let radius = self.params.tracking_radius;
        for kind in AnchorKind::TRACKED {
            let Some(world) = self.world_transform(kind) else {
                continue;
            };
            let distance = world.position.distance(center);
            let active = distance < radius;
            let Some(anchor) = self.anchors.get_mut(&kind) else {
                continue;
            };
            if anchor.active != active {
                anchor.active = active;
                tracing::debug!(anchor = %kind, active, distance, "tracking changed");
                self.event_log.push(RigEvent::ActivityChanged {
                    anchor: kind,
                    active,
                    distance,
                });
            }
        }
    }
}

/// Map an angle in degrees into `(-180, 180]`.
pub fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = (degrees + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 { 180.0 } else { wrapped }
}

fn signed(positive: bool, negative: bool) -> f32 {
    (positive as i8 - negative as i8) as f32
}
