#![forbid(unsafe_op_in_unsafe_fn)]

use glam::{Quat, Vec3};

/// Camera-local forward. Convention: right-handed, camera looks down -Z.
pub const LOCAL_FORWARD: Vec3 = Vec3::NEG_Z;
pub const LOCAL_RIGHT: Vec3 = Vec3::X;
pub const LOCAL_UP: Vec3 = Vec3::Y;

pub const WORLD_UP: Vec3 = Vec3::Y;

/// Rigid transform (no scale).
///
/// Used both for world poses of scene anchors and for the camera's
/// parent-relative offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    #[inline]
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    #[inline]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation * LOCAL_FORWARD
    }

    #[inline]
    pub fn right(&self) -> Vec3 {
        self.rotation * LOCAL_RIGHT
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.rotation * LOCAL_UP
    }

    /// `self * child`: places a pose expressed in this pose's space into the outer space.
    #[inline]
    pub fn mul_pose(&self, child: &Pose) -> Pose {
        Pose {
            position: self.position + self.rotation * child.position,
            rotation: (self.rotation * child.rotation).normalize(),
        }
    }

    #[inline]
    pub fn inverse(&self) -> Pose {
        let inv = self.rotation.conjugate();
        Pose {
            position: inv * -self.position,
            rotation: inv,
        }
    }

    /// Expresses this (world) pose relative to `parent`.
    #[inline]
    pub fn relative_to(&self, parent: &Pose) -> Pose {
        parent.inverse().mul_pose(self)
    }

    #[inline]
    pub fn abs_diff_eq(&self, other: &Pose, max_abs_diff: f32) -> bool {
        self.position.abs_diff_eq(other.position, max_abs_diff)
            && (self.rotation.abs_diff_eq(other.rotation, max_abs_diff)
                || self.rotation.abs_diff_eq(-other.rotation, max_abs_diff))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Pose {
        Pose::new(
            Vec3::new(10.0, -2.0, 3.5),
            Quat::from_euler(glam::EulerRot::YXZ, 0.7, -0.3, 0.2),
        )
    }

    #[test]
    fn inverse_cancels() {
        let p = sample();
        assert!(p.mul_pose(&p.inverse()).abs_diff_eq(&Pose::IDENTITY, 1e-5));
        assert!(p.inverse().mul_pose(&p).abs_diff_eq(&Pose::IDENTITY, 1e-5));
    }

    #[test]
    fn relative_then_compose_round_trips() {
        let parent = sample();
        let world = Pose::new(Vec3::new(-4.0, 8.0, 1.0), Quat::from_rotation_x(0.4));

        let local = world.relative_to(&parent);
        assert!(parent.mul_pose(&local).abs_diff_eq(&world, 1e-4));
    }

    #[test]
    fn identity_axes_follow_convention() {
        let p = Pose::IDENTITY;
        assert_eq!(p.forward(), Vec3::NEG_Z);
        assert_eq!(p.right(), Vec3::X);
        assert_eq!(p.up(), Vec3::Y);
    }
}
