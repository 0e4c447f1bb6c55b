#![forbid(unsafe_op_in_unsafe_fn)]

use glam::{Quat, Vec3};

use crate::pose::Pose;

/// Free camera transform with an explicit parent link.
///
/// The world pose is the source of truth for edits. The parent's world pose
/// (as last observed) and the camera's offset relative to it are kept in sync
/// so a renderer can read either `world()` or `parent_pose()` + `local()`.
///
/// Angles passed to the rotate helpers are degrees with left-handed sign:
/// a positive angle about `WORLD_UP` turns the view to the right, a positive
/// angle about `LOCAL_RIGHT` tilts it down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraRig {
    world: Pose,
    parent: Pose,
    local: Pose,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(Pose::IDENTITY)
    }
}

impl CameraRig {
    /// Creates a rig parented to the scene root.
    #[inline]
    pub fn new(world: Pose) -> Self {
        Self {
            world,
            parent: Pose::IDENTITY,
            local: world,
        }
    }

    #[inline]
    pub fn world(&self) -> Pose {
        self.world
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.world.position
    }

    #[inline]
    pub fn rotation(&self) -> Quat {
        self.world.rotation
    }

    /// Offset relative to the parent.
    #[inline]
    pub fn local(&self) -> Pose {
        self.local
    }

    /// Parent world pose as of the last `follow_parent`/`set_parent`.
    #[inline]
    pub fn parent_pose(&self) -> Pose {
        self.parent
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.world.forward()
    }

    #[inline]
    pub fn right(&self) -> Vec3 {
        self.world.right()
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.world.up()
    }

    /// Carries the camera along with its parent's motion.
    ///
    /// A parent that has not moved leaves the world pose bit-identical.
    pub fn follow_parent(&mut self, parent_world: Pose) {
        if parent_world == self.parent {
            return;
        }
        self.parent = parent_world;
        self.world = parent_world.mul_pose(&self.local);
    }

    /// Re-parents without moving: the world pose is kept, the local offset is recomputed.
    pub fn set_parent(&mut self, parent_world: Pose) {
        self.parent = parent_world;
        self.sync_local();
    }

    pub fn set_world_position(&mut self, position: Vec3) {
        self.world.position = position;
        self.sync_local();
    }

    pub fn set_world_rotation(&mut self, rotation: Quat) {
        self.world.rotation = rotation.normalize();
        self.sync_local();
    }

    /// Rotates about a world-space axis.
    pub fn rotate_world(&mut self, axis: Vec3, degrees: f32) {
        if degrees == 0.0 {
            return;
        }
        self.world.rotation = (angle_axis(axis, degrees) * self.world.rotation).normalize();
        self.sync_local();
    }

    /// Rotates about an axis given in the camera's own space (e.g. `LOCAL_FORWARD`).
    pub fn rotate_local(&mut self, local_axis: Vec3, degrees: f32) {
        if degrees == 0.0 {
            return;
        }
        self.world.rotation = (self.world.rotation * angle_axis(local_axis, degrees)).normalize();
        self.sync_local();
    }

    pub fn translate_world(&mut self, delta: Vec3) {
        if delta == Vec3::ZERO {
            return;
        }
        self.world.position += delta;
        self.sync_local();
    }

    #[inline]
    fn sync_local(&mut self) {
        self.local = self.world.relative_to(&self.parent);
    }
}

#[inline]
fn angle_axis(axis: Vec3, degrees: f32) -> Quat {
    Quat::from_axis_angle(axis.normalize_or_zero(), -degrees.to_radians())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{LOCAL_FORWARD, LOCAL_RIGHT, WORLD_UP};

    fn parent() -> Pose {
        Pose::new(Vec3::new(100.0, 0.0, -50.0), Quat::from_rotation_y(1.2))
    }

    #[test]
    fn set_parent_keeps_world_pose() {
        let mut rig = CameraRig::new(Pose::from_position(Vec3::new(1.0, 2.0, 3.0)));
        let before = rig.world();

        rig.set_parent(parent());

        assert_eq!(rig.world(), before);
        assert!(parent().mul_pose(&rig.local()).abs_diff_eq(&before, 1e-4));
    }

    #[test]
    fn follow_parent_carries_camera() {
        let mut rig = CameraRig::new(Pose::from_position(Vec3::new(1.0, 0.0, 0.0)));
        rig.set_parent(Pose::IDENTITY);

        rig.follow_parent(Pose::from_position(Vec3::new(0.0, 10.0, 0.0)));
        assert!(rig.position().abs_diff_eq(Vec3::new(1.0, 10.0, 0.0), 1e-6));
    }

    #[test]
    fn follow_unmoved_parent_is_exact() {
        let mut rig = CameraRig::new(Pose::from_position(Vec3::new(0.3, 0.7, 0.1)));
        rig.set_parent(parent());
        let before = rig.world();

        rig.follow_parent(parent());
        assert_eq!(rig.world(), before);
    }

    #[test]
    fn positive_yaw_turns_right() {
        let mut rig = CameraRig::default();
        rig.rotate_world(WORLD_UP, 90.0);
        assert!(rig.forward().abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn negative_pitch_looks_up() {
        let mut rig = CameraRig::default();
        rig.rotate_local(LOCAL_RIGHT, -90.0);
        assert!(rig.forward().abs_diff_eq(Vec3::Y, 1e-5));
    }

    #[test]
    fn roll_keeps_forward() {
        let mut rig = CameraRig::default();
        rig.rotate_local(LOCAL_FORWARD, 30.0);
        assert!(rig.forward().abs_diff_eq(Vec3::NEG_Z, 1e-5));
        assert!(!rig.up().abs_diff_eq(Vec3::Y, 1e-3));
    }

    #[test]
    fn edits_keep_local_in_sync() {
        let mut rig = CameraRig::default();
        rig.set_parent(parent());
        rig.translate_world(Vec3::new(0.0, 0.0, 5.0));
        rig.rotate_world(WORLD_UP, 45.0);

        assert!(parent().mul_pose(&rig.local()).abs_diff_eq(&rig.world(), 1e-4));
    }
}
