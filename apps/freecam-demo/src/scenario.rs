use std::f32::consts::TAU;
use std::ops::Range;

use freecam_camera::{Body, FeatureFlags, InputSnapshot, Key, KeySet, KeyState, Pose, Scene};
use freecam_core::{EngineResult, Frame, Module, ModuleCtx};
use glam::{Quat, Vec2, Vec3};

/* =============================================================================================
   Scene: bodies on flat circular orbits around the sun
   ============================================================================================= */

struct Orbit {
    body: Body,
    radius: f32,
    period_sec: f32,
    spin_sec: f32,
}

#[rustfmt::skip]
const ORBITS: &[Orbit] = &[
    Orbit { body: Body::Sun, radius: 0.0, period_sec: 1.0, spin_sec: 600.0 },
    Orbit { body: Body::CaveTwin, radius: 250.0, period_sec: 90.0, spin_sec: 40.0 },
    Orbit { body: Body::TowerTwin, radius: 262.0, period_sec: 90.0, spin_sec: 40.0 },
    Orbit { body: Body::TimberHearth, radius: 850.0, period_sec: 240.0, spin_sec: 60.0 },
    Orbit { body: Body::BrittleHollow, radius: 1150.0, period_sec: 320.0, spin_sec: 45.0 },
    Orbit { body: Body::GiantsDeep, radius: 1650.0, period_sec: 500.0, spin_sec: 80.0 },
    Orbit { body: Body::DarkBramble, radius: 2300.0, period_sec: 800.0, spin_sec: 120.0 },
];

/// Operator stands on Timber Hearth's north pole.
const OPERATOR_OFFSET: Vec3 = Vec3::new(0.0, 25.0, 0.0);

fn orbit_pose(o: &Orbit, t: f32) -> Pose {
    let a = TAU * t / o.period_sec;
    Pose::new(
        Vec3::new(o.radius * a.cos(), 0.0, o.radius * a.sin()),
        Quat::from_rotation_y(TAU * t / o.spin_sec),
    )
}

fn place(scene: &mut Scene, t: f32) {
    for o in ORBITS {
        let pose = orbit_pose(o, t);
        scene.set_body(o.body, pose);
        if o.body == Body::TimberHearth {
            scene.set_operator(pose.mul_pose(&Pose::from_position(OPERATOR_OFFSET)));
        }
    }
}

/// Moves the bodies along with scaled game time.
pub struct OrbitModule;

impl<E: 'static> Module<E> for OrbitModule {
    fn id(&self) -> &'static str {
        "orbits"
    }

    fn init(&mut self, ctx: &mut ModuleCtx<'_, E>) -> EngineResult<()> {
        let mut scene = Scene::new();
        place(&mut scene, 0.0);
        ctx.resources_mut().insert(scene);
        Ok(())
    }

    fn update(&mut self, ctx: &mut ModuleCtx<'_, E>, _frame: &Frame) -> EngineResult<()> {
        let t = ctx.time().elapsed_sec() as f32;
        if let Some(scene) = ctx.resources_mut().get_mut::<Scene>() {
            place(scene, t);
        }
        Ok(())
    }
}

/* =============================================================================================
   Input script: a fixed session played back frame by frame
   ============================================================================================= */

#[derive(Clone, Copy, Debug)]
enum Cue {
    Active,
    Hold(Key),
    Move(Vec2),
    Look(Vec2),
    Scroll(f32),
    Thrust(f32),
    RollMode,
}

const SCRIPT: &[(Range<u64>, Cue)] = &[
    (30..330, Cue::Active),
    // Speed up while flying out.
    (40..100, Cue::Move(Vec2::new(0.0, 1.0))),
    (40..100, Cue::Scroll(0.5)),
    // Warp onto Timber Hearth.
    (100..130, Cue::Hold(Key::T)),
    (115..118, Cue::Hold(Key::Digit5)),
    (130..190, Cue::Look(Vec2::new(0.3, 0.0))),
    (130..190, Cue::Move(Vec2::new(0.0, 1.0))),
    // Freeze the world and keep flying.
    (190..195, Cue::Hold(Key::Comma)),
    (195..240, Cue::Thrust(1.0)),
    (195..240, Cue::RollMode),
    (195..240, Cue::Look(Vec2::new(0.5, 0.0))),
    (240..245, Cue::Hold(Key::Slash)),
    // Soft reparent back to the player.
    (250..270, Cue::Hold(Key::Y)),
    (260..262, Cue::Hold(Key::Digit0)),
    (280..283, Cue::Hold(Key::ArrowDown)),
    (290..310, Cue::Hold(Key::Q)),
];

const SCRIPT_FRAMES: u64 = 360;

/// Publishes `FeatureFlags` and `InputSnapshot` for each frame, then asks the engine to exit.
#[derive(Default)]
pub struct ScriptModule {
    keys: KeyState,
}

impl ScriptModule {
    fn sample(&mut self, frame: u64) -> (FeatureFlags, InputSnapshot) {
        let mut flags = FeatureFlags::default();
        let mut input = InputSnapshot::default();
        let mut held = KeySet::EMPTY;

        for (range, cue) in SCRIPT.iter().filter(|(r, _)| r.contains(&frame)) {
            match *cue {
                Cue::Active => flags.active = true,
                Cue::Hold(key) => held.insert(key),
                Cue::Move(v) => input.move_xz = v,
                Cue::Look(v) => input.look = v,
                Cue::Scroll(v) => input.scroll = v,
                Cue::Thrust(v) => input.thrust_up = v,
                Cue::RollMode => input.roll_mode = true,
            }
            log::trace!("script frame {frame}: {cue:?} ({}..{})", range.start, range.end);
        }

        self.keys.advance(held);
        input.keys = self.keys;
        (flags, input)
    }
}

impl<E: 'static> Module<E> for ScriptModule {
    fn id(&self) -> &'static str {
        "script"
    }

    fn update(&mut self, ctx: &mut ModuleCtx<'_, E>, frame: &Frame) -> EngineResult<()> {
        if frame.frame_index >= SCRIPT_FRAMES {
            ctx.request_exit();
            return Ok(());
        }

        let (flags, input) = self.sample(frame.frame_index);
        let res = ctx.resources_mut();
        res.insert(flags);
        res.insert(input);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_emits_single_press_edges() {
        let mut script = ScriptModule::default();
        let mut presses = 0;
        for frame in 0..SCRIPT_FRAMES {
            let (flags, input) = script.sample(frame);
            if input.keys.was_pressed(Key::Digit5) {
                presses += 1;
                assert_eq!(frame, 115);
                assert!(flags.active && input.keys.is_held(Key::T));
            }
        }
        assert_eq!(presses, 1);
    }

    #[test]
    fn operator_rides_on_timber_hearth() {
        use freecam_camera::{Anchor, AnchorResolver};

        let mut scene = Scene::new();
        place(&mut scene, 12.5);
        let hearth = scene.resolve(Anchor::Body(Body::TimberHearth)).unwrap();
        let op = scene.resolve(Anchor::Operator).unwrap();
        let dist = (op.position - hearth.position).length();
        assert!((dist - OPERATOR_OFFSET.length()).abs() < 1e-3);
    }
}
