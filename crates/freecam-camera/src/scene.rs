#![forbid(unsafe_op_in_unsafe_fn)]

use std::collections::HashMap;

use crate::anchors::{Anchor, Body};
use crate::pose::Pose;

/// Looks up the current world pose of an anchor.
///
/// `None` means the anchor is not present in the scene right now.
pub trait AnchorResolver {
    fn resolve(&self, anchor: Anchor) -> Option<Pose>;
}

/// In-memory anchor poses, updated by whoever simulates the world.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    operator: Option<Pose>,
    bodies: HashMap<Body, Pose>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn set_operator(&mut self, pose: Pose) {
        self.operator = Some(pose);
    }

    #[inline]
    pub fn set_body(&mut self, body: Body, pose: Pose) {
        self.bodies.insert(body, pose);
    }

    #[inline]
    pub fn remove_body(&mut self, body: Body) -> Option<Pose> {
        self.bodies.remove(&body)
    }
}

impl AnchorResolver for Scene {
    fn resolve(&self, anchor: Anchor) -> Option<Pose> {
        match anchor {
            Anchor::Operator => self.operator,
            Anchor::Body(body) => self.bodies.get(&body).copied(),
        }
    }
}

impl<R: AnchorResolver + ?Sized> AnchorResolver for &R {
    #[inline]
    fn resolve(&self, anchor: Anchor) -> Option<Pose> {
        (**self).resolve(anchor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn resolves_only_present_anchors() {
        let mut scene = Scene::new();
        assert_eq!(scene.resolve(Anchor::Operator), None);

        let sun = Pose::from_position(Vec3::new(0.0, 0.0, 0.0));
        scene.set_body(Body::Sun, sun);
        scene.set_operator(Pose::from_position(Vec3::X));

        assert_eq!(scene.resolve(Anchor::Body(Body::Sun)), Some(sun));
        assert!(scene.resolve(Anchor::Operator).is_some());
        assert_eq!(scene.resolve(Anchor::Body(Body::Comet)), None);

        scene.remove_body(Body::Sun);
        assert_eq!(scene.resolve(Anchor::Body(Body::Sun)), None);
    }
}
