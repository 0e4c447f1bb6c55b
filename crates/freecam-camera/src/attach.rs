#![forbid(unsafe_op_in_unsafe_fn)]

use crate::anchors::{Anchor, AnchorSet};
use crate::error::FreeCamError;
use crate::input::KeyState;
use crate::rig::CameraRig;
use crate::scene::AnchorResolver;
use crate::settings::Bindings;

/// Current attachment plus this frame's selection-mode sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttachmentState {
    pub anchor: Anchor,
    /// Either selection modifier is held.
    pub selecting: bool,
    /// The warp modifier is held.
    pub warp_requested: bool,
}

/// A completed parent change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reattached {
    pub target: Anchor,
    pub previous: Anchor,
    pub warp: bool,
}

/// Owns which anchor the camera is parented to.
///
/// Anchor selector keys only count while a selection modifier is held. The
/// warp modifier snaps the camera onto the anchor (position always, orientation
/// only for the operator); the other modifier reparents in place.
#[derive(Clone, Debug)]
pub struct AttachmentController {
    anchors: AnchorSet,
    bindings: Bindings,
    state: AttachmentState,
    parent_missing: bool,
}

impl AttachmentController {
    pub fn new(anchors: AnchorSet, bindings: Bindings) -> Self {
        Self {
            anchors,
            bindings,
            state: AttachmentState::default(),
            parent_missing: false,
        }
    }

    #[inline]
    pub fn state(&self) -> AttachmentState {
        self.state
    }

    #[inline]
    pub fn anchors(&self) -> &AnchorSet {
        &self.anchors
    }

    /// Entry into the active feature: back onto the operator with a warp.
    pub fn activate<R: AnchorResolver + ?Sized>(
        &mut self,
        rig: &mut CameraRig,
        resolver: &R,
    ) -> Result<Reattached, FreeCamError> {
        self.reattach(rig, Anchor::Operator, true, resolver)
    }

    /// Carries the camera along with the current anchor's motion.
    pub fn follow<R: AnchorResolver + ?Sized>(&mut self, rig: &mut CameraRig, resolver: &R) {
        match resolver.resolve(self.state.anchor) {
            Some(pose) => {
                if self.parent_missing {
                    log::info!("freecam: anchor {} is back", self.state.anchor);
                    self.parent_missing = false;
                }
                rig.follow_parent(pose);
            }
            None => {
                if !self.parent_missing {
                    log::warn!(
                        "freecam: anchor {} vanished, holding last known parent pose",
                        self.state.anchor
                    );
                    self.parent_missing = true;
                }
            }
        }
    }

    /// Samples the selection modifiers and fires a reattach for every anchor key
    /// that went down this frame. Inactive frames only clear the selection flags.
    ///
    /// Rejected targets are logged and skipped; the previous attachment stays.
    pub fn update<R: AnchorResolver + ?Sized>(
        &mut self,
        rig: &mut CameraRig,
        keys: &KeyState,
        active: bool,
        resolver: &R,
    ) -> Vec<Reattached> {
        if !active {
            self.clear_selection();
            return Vec::new();
        }

        self.state.selecting = keys.any_held(&self.bindings.selection_modifiers());
        self.state.warp_requested = keys.is_held(self.bindings.warp_modifier);
        if !self.state.selecting {
            return Vec::new();
        }

        let warp = self.state.warp_requested;
        let targets: Vec<Anchor> = self.anchors.pressed(keys).collect();

        let mut done = Vec::new();
        for target in targets {
            if let Ok(r) = self.reattach(rig, target, warp, resolver) {
                done.push(r);
            }
        }
        done
    }

    /// Parents the camera to `target`, optionally snapping onto it.
    ///
    /// On `UnresolvedAnchor` nothing changes.
    pub fn reattach<R: AnchorResolver + ?Sized>(
        &mut self,
        rig: &mut CameraRig,
        target: Anchor,
        warp: bool,
        resolver: &R,
    ) -> Result<Reattached, FreeCamError> {
        let Some(pose) = resolver.resolve(target) else {
            log::warn!(
                "freecam: cannot attach to {target}, staying on {}",
                self.state.anchor
            );
            return Err(FreeCamError::UnresolvedAnchor(target));
        };

        rig.set_parent(pose);
        if warp {
            rig.set_world_position(pose.position);
            if target == Anchor::Operator {
                rig.set_world_rotation(pose.rotation);
            }
        }

        let previous = self.state.anchor;
        self.state.anchor = target;
        self.parent_missing = false;

        log::info!(
            "freecam: attached to {target}{}",
            if warp { " (warp)" } else { "" }
        );

        Ok(Reattached {
            target,
            previous,
            warp,
        })
    }

    #[inline]
    pub fn clear_selection(&mut self) {
        self.state.selecting = false;
        self.state.warp_requested = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchors::Body;
    use crate::input::Key;
    use crate::pose::Pose;
    use crate::scene::Scene;
    use glam::{Quat, Vec3};

    fn scene() -> Scene {
        let mut s = Scene::new();
        s.set_operator(Pose::new(
            Vec3::new(10.0, 1.5, -3.0),
            Quat::from_rotation_y(0.8),
        ));
        s.set_body(
            Body::TimberHearth,
            Pose::new(Vec3::new(1234.5, -67.25, 8901.0), Quat::from_rotation_x(0.4)),
        );
        s.set_body(Body::Sun, Pose::IDENTITY);
        s
    }

    fn controller() -> AttachmentController {
        AttachmentController::new(AnchorSet::default(), Bindings::default())
    }

    fn camera() -> CameraRig {
        CameraRig::new(Pose::new(
            Vec3::new(-5.0, 20.0, 7.0),
            Quat::from_rotation_z(0.3),
        ))
    }

    #[test]
    fn warp_lands_exactly_on_body_and_keeps_orientation() {
        let scene = scene();
        let mut c = controller();
        let mut rig = camera();
        let rot_before = rig.rotation();

        let keys = KeyState::default().hold(Key::T).press(Key::Digit5);
        let fired = c.update(&mut rig, &keys, true, &scene);

        assert_eq!(
            fired,
            vec![Reattached {
                target: Anchor::Body(Body::TimberHearth),
                previous: Anchor::Operator,
                warp: true
            }]
        );
        assert_eq!(rig.position(), Vec3::new(1234.5, -67.25, 8901.0));
        assert_eq!(rig.rotation(), rot_before);
        assert_eq!(c.state().anchor, Anchor::Body(Body::TimberHearth));
        assert!(c.state().selecting && c.state().warp_requested);
    }

    #[test]
    fn operator_warp_also_snaps_orientation() {
        let scene = scene();
        let mut c = controller();
        let mut rig = camera();

        c.activate(&mut rig, &scene).unwrap();

        let op = scene.resolve(Anchor::Operator).unwrap();
        assert_eq!(rig.position(), op.position);
        assert!(rig.world().abs_diff_eq(&op, 1e-6));
        assert_eq!(c.state().anchor, Anchor::Operator);
    }

    #[test]
    fn soft_reattach_keeps_world_pose() {
        let scene = scene();
        let mut c = controller();
        let mut rig = camera();
        let before = rig.world();

        let keys = KeyState::default().hold(Key::Y).press(Key::Numpad5);
        let fired = c.update(&mut rig, &keys, true, &scene);

        assert_eq!(fired.len(), 1);
        assert!(!fired[0].warp);
        assert_eq!(rig.world(), before);
        assert_eq!(c.state().anchor, Anchor::Body(Body::TimberHearth));
        assert!(c.state().selecting && !c.state().warp_requested);
    }

    #[test]
    fn reattach_to_current_anchor_is_idempotent() {
        let scene = scene();
        let target = Anchor::Body(Body::TimberHearth);

        for warp in [false, true] {
            let mut c = controller();
            let mut rig = camera();
            c.reattach(&mut rig, target, warp, &scene).unwrap();
            let once = (rig, c.state());

            let r = c.reattach(&mut rig, target, warp, &scene).unwrap();
            assert_eq!(r.previous, target);
            assert_eq!(c.state(), once.1);
            assert!(rig.world().abs_diff_eq(&once.0.world(), 1e-6));
            assert!(rig.local().abs_diff_eq(&once.0.local(), 1e-6));
        }
    }

    #[test]
    fn unresolved_target_is_rejected_without_side_effects() {
        let scene = scene();
        let mut c = controller();
        let mut rig = camera();
        c.reattach(&mut rig, Anchor::Body(Body::Sun), false, &scene).unwrap();
        let (state, pose) = (c.state(), rig);

        let err = c
            .reattach(&mut rig, Anchor::Body(Body::DarkBramble), true, &scene)
            .unwrap_err();
        assert!(matches!(
            err,
            FreeCamError::UnresolvedAnchor(Anchor::Body(Body::DarkBramble))
        ));
        assert_eq!(c.state(), state);
        assert_eq!(rig, pose);

        let keys = KeyState::default().hold(Key::T).press(Key::Digit8);
        assert!(c.update(&mut rig, &keys, true, &scene).is_empty());
        assert_eq!(c.state().anchor, Anchor::Body(Body::Sun));
        assert_eq!(rig, pose);
    }

    #[test]
    fn anchor_keys_need_a_modifier() {
        let scene = scene();
        let mut c = controller();
        let mut rig = camera();
        let before = rig;

        let keys = KeyState::default().press(Key::Digit5).press(Key::Numpad0);
        assert!(c.update(&mut rig, &keys, true, &scene).is_empty());
        assert_eq!(rig, before);
        assert_eq!(c.state(), AttachmentState::default());
    }

    #[test]
    fn held_selector_without_edge_does_nothing() {
        let scene = scene();
        let mut c = controller();
        let mut rig = camera();

        let keys = KeyState::default().hold(Key::T).hold(Key::Digit5);
        assert!(c.update(&mut rig, &keys, true, &scene).is_empty());
        assert_eq!(c.state().anchor, Anchor::Operator);
        assert!(c.state().selecting);
    }

    #[test]
    fn inactive_frames_clear_selection_and_ignore_keys() {
        let scene = scene();
        let mut c = controller();
        let mut rig = camera();

        let keys = KeyState::default().hold(Key::T).press(Key::Digit5);
        c.update(&mut rig, &KeyState::default().hold(Key::T), true, &scene);
        assert!(c.state().selecting);

        let before = rig;
        assert!(c.update(&mut rig, &keys, false, &scene).is_empty());
        assert_eq!(rig, before);
        assert!(!c.state().selecting && !c.state().warp_requested);
        assert_eq!(c.state().anchor, Anchor::Operator);
    }

    #[test]
    fn both_modifiers_mean_warp() {
        let scene = scene();
        let mut c = controller();
        let mut rig = camera();

        let keys = KeyState::default().hold(Key::T).hold(Key::Y).press(Key::Digit1);
        let fired = c.update(&mut rig, &keys, true, &scene);
        assert!(fired[0].warp);
        assert_eq!(rig.position(), Vec3::ZERO);
    }

    #[test]
    fn several_selectors_fire_in_table_order() {
        let scene = scene();
        let mut c = controller();
        let mut rig = camera();

        let keys = KeyState::default()
            .hold(Key::Y)
            .press(Key::Digit5)
            .press(Key::Digit1);
        let fired = c.update(&mut rig, &keys, true, &scene);

        let targets: Vec<_> = fired.iter().map(|r| r.target).collect();
        assert_eq!(
            targets,
            vec![Anchor::Body(Body::Sun), Anchor::Body(Body::TimberHearth)]
        );
        assert_eq!(c.state().anchor, Anchor::Body(Body::TimberHearth));
    }

    #[test]
    fn follow_tracks_moving_anchor() {
        let mut scene = scene();
        let mut c = controller();
        let mut rig = camera();
        c.reattach(&mut rig, Anchor::Body(Body::Sun), false, &scene)
            .unwrap();

        scene.set_body(Body::Sun, Pose::from_position(Vec3::new(0.0, 100.0, 0.0)));
        c.follow(&mut rig, &scene);
        assert!(rig.position().abs_diff_eq(Vec3::new(-5.0, 120.0, 7.0), 1e-4));

        scene.remove_body(Body::Sun);
        let held = rig;
        c.follow(&mut rig, &scene);
        assert_eq!(rig, held);
    }
}
