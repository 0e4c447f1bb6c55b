#![forbid(unsafe_op_in_unsafe_fn)]

use std::marker::PhantomData;

use freecam_core::{EngineResult, Frame, Module, ModuleCtx};

use crate::anchors::Anchor;
use crate::attach::{AttachmentController, Reattached};
use crate::error::FreeCamError;
use crate::hud::{anchor_prompts, Prompt};
use crate::input::{FeatureFlags, InputSnapshot};
use crate::motion::MotionIntegrator;
use crate::pose::Pose;
use crate::rig::CameraRig;
use crate::scene::AnchorResolver;
use crate::settings::{FreeCamSettings, TimeBindings};

/// Events the free camera sends on the engine bus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FreeCamEvent {
    Activated,
    Reattached(Reattached),
    SpeedReset,
    TimeScaleChanged(f32),
}

/// Pull-only readout, republished into `Resources` every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeCamStatus {
    pub active: bool,
    pub pose: Pose,
    pub anchor: Anchor,
    pub parent_pose: Pose,
    /// Camera pose relative to `parent_pose`.
    pub local: Pose,
    pub speed: f32,
    pub selecting: bool,
    pub warp_requested: bool,
    /// Selector prompts; empty outside selection-mode.
    pub anchor_prompts: Vec<Prompt>,
}

struct Unresolved;

impl AnchorResolver for Unresolved {
    fn resolve(&self, _anchor: Anchor) -> Option<Pose> {
        None
    }
}

/// Engine module driving the free camera.
///
/// Reads `FeatureFlags`, `InputSnapshot` and the scene resolver `R` from
/// resources, writes `FreeCamStatus` back. The resolver is looked up per
/// frame so the world simulation can keep updating it in place.
pub struct FreeCamModule<R> {
    rig: CameraRig,
    motion: MotionIntegrator,
    attach: AttachmentController,
    time_keys: TimeBindings,

    was_active: bool,
    active_frames: u64,
    reattachments: u64,

    _resolver: PhantomData<fn() -> R>,
}

impl<R> FreeCamModule<R> {
    pub fn new(settings: &FreeCamSettings, initial: Pose) -> Result<Self, FreeCamError> {
        settings.validate()?;
        Ok(Self {
            rig: CameraRig::new(initial),
            motion: MotionIntegrator::new(settings.motion, settings.bindings),
            attach: AttachmentController::new(settings.anchor_set()?, settings.bindings),
            time_keys: settings.time,
            was_active: false,
            active_frames: 0,
            reattachments: 0,
            _resolver: PhantomData,
        })
    }

    fn status(&self, active: bool) -> FreeCamStatus {
        let state = self.attach.state();
        FreeCamStatus {
            active,
            pose: self.rig.world(),
            anchor: state.anchor,
            parent_pose: self.rig.parent_pose(),
            local: self.rig.local(),
            speed: self.motion.speed(),
            selecting: state.selecting,
            warp_requested: state.warp_requested,
            anchor_prompts: anchor_prompts(self.attach.anchors(), state.selecting),
        }
    }
}

impl<R, E> Module<E> for FreeCamModule<R>
where
    R: AnchorResolver + 'static,
    E: From<FreeCamEvent> + 'static,
{
    fn id(&self) -> &'static str {
        "freecam"
    }

    fn init(&mut self, ctx: &mut ModuleCtx<'_, E>) -> EngineResult<()> {
        let res = ctx.resources_mut();
        if !res.contains::<FeatureFlags>() {
            res.insert(FeatureFlags::default());
        }
        if !res.contains::<InputSnapshot>() {
            res.insert(InputSnapshot::default());
        }
        Ok(())
    }

    fn start(&mut self, ctx: &mut ModuleCtx<'_, E>) -> EngineResult<()> {
        if !ctx.resources().contains::<R>() {
            log::warn!(
                "freecam: no {} resource yet, anchors will not resolve",
                std::any::type_name::<R>()
            );
        }
        log::info!(
            "freecam: ready, {} anchors, speed {}",
            self.attach.anchors().len(),
            self.motion.speed()
        );
        let status = self.status(false);
        ctx.resources_mut().insert(status);
        Ok(())
    }

    fn update(&mut self, ctx: &mut ModuleCtx<'_, E>, frame: &Frame) -> EngineResult<()> {
        let flags = ctx
            .resources()
            .get::<FeatureFlags>()
            .copied()
            .unwrap_or_default();
        let input = ctx
            .resources()
            .get::<InputSnapshot>()
            .copied()
            .unwrap_or_default();

        if flags.active {
            self.active_frames += 1;

            // A later key in the table wins when several go down together.
            let requested = self
                .time_keys
                .table()
                .into_iter()
                .filter(|(keys, _)| input.keys.any_pressed(keys))
                .map(|(_, scale)| scale)
                .last();
            if let Some(scale) = requested {
                if ctx.time_mut().set_scale(scale) {
                    log::info!("freecam: time scale -> {scale}");
                    ctx.bus().send(E::from(FreeCamEvent::TimeScaleChanged(scale)));
                }
            }
        }

        let mut events = Vec::new();
        {
            let resolver: &dyn AnchorResolver = match ctx.resources().get::<R>() {
                Some(r) => r,
                None => &Unresolved,
            };

            if flags.active && !self.was_active {
                log::info!("freecam: activated");
                events.push(FreeCamEvent::Activated);
                match self.attach.activate(&mut self.rig, resolver) {
                    Ok(r) => events.push(FreeCamEvent::Reattached(r)),
                    Err(e) => log::warn!("freecam: activation without operator pose: {e}"),
                }
            }
            self.was_active = flags.active;

            if flags.active {
                self.attach.follow(&mut self.rig, resolver);
            }

            if let Some(step) = self
                .motion
                .update(&mut self.rig, &input, flags, frame.unscaled_dt)
            {
                if step.speed_reset {
                    log::debug!("freecam: speed reset to {}", step.speed);
                    events.push(FreeCamEvent::SpeedReset);
                }
            }

            for r in self
                .attach
                .update(&mut self.rig, &input.keys, flags.active, resolver)
            {
                events.push(FreeCamEvent::Reattached(r));
            }
        }

        for ev in events {
            if matches!(ev, FreeCamEvent::Reattached(_)) {
                self.reattachments += 1;
            }
            ctx.bus().send(E::from(ev));
        }

        let status = self.status(flags.active);
        ctx.resources_mut().insert(status);
        Ok(())
    }

    fn shutdown(&mut self, _ctx: &mut ModuleCtx<'_, E>) -> EngineResult<()> {
        log::debug!(
            "freecam: session over, {} active frames, {} reattachments, final speed {}",
            self.active_frames,
            self.reattachments,
            self.motion.speed()
        );
        Ok(())
    }
}
