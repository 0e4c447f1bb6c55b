
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::frame::Frame;
use crate::module::{Bus, Module, ModuleCtx, Resources};
use crate::time::Time;

/// Frame-synchronous module host.
///
/// Everything runs on the caller's thread: the platform adapter (or a test)
/// publishes the frame's samples into `resources_mut()`, calls `step`, then
/// drains `bus()`.
pub struct Engine<E: 'static> {
    modules: Vec<Box<dyn Module<E>>>,

    resources: Resources,
    bus: Bus<E>,
    time: Time,

    exit_requested: bool,
    started: bool,
}

impl<E: 'static> Engine<E> {
    pub fn new(config: &EngineConfig, bus: Bus<E>) -> Self {
        Self {
            modules: Vec::new(),
            resources: Resources::default(),
            bus,
            time: Time::new(config.max_dt_sec),
            exit_requested: false,
            started: false,
        }
    }

    pub fn register_module(&mut self, mut module: Box<dyn Module<E>>) -> EngineResult<()> {
        let mut ctx = ModuleCtx::new(
            &mut self.resources,
            &self.bus,
            &mut self.time,
            &mut self.exit_requested,
        );
        module.init(&mut ctx)?;
        log::debug!("module registered: {}", module.id());
        self.modules.push(module);
        Ok(())
    }

    pub fn start(&mut self) -> EngineResult<()> {
        if self.started {
            return Ok(());
        }

        let Self {
            modules,
            resources,
            bus,
            time,
            exit_requested,
            ..
        } = self;

        for m in modules.iter_mut() {
            let mut ctx = ModuleCtx::new(resources, bus, time, exit_requested);
            m.start(&mut ctx)?;
        }

        self.started = true;
        log::info!("engine started with {} module(s)", self.modules.len());
        Ok(())
    }

    /// Advances one frame by `raw_dt` wall-clock seconds.
    pub fn step(&mut self, raw_dt: f32) -> EngineResult<Frame> {
        if self.exit_requested {
            return Err(EngineError::ExitRequested);
        }
        if !self.started {
            return Err(EngineError::Other("step called before start".to_string()));
        }

        let frame = self.time.advance(raw_dt);

        let Self {
            modules,
            resources,
            bus,
            time,
            exit_requested,
            ..
        } = self;

        for m in modules.iter_mut() {
            let mut ctx = ModuleCtx::new(resources, bus, time, exit_requested);
            m.update(&mut ctx, &frame)?;
        }

        log::trace!(
            "frame {} dt={:.4} unscaled_dt={:.4} scale={}",
            frame.frame_index,
            frame.dt,
            frame.unscaled_dt,
            frame.time_scale
        );

        Ok(frame)
    }

    pub fn shutdown(&mut self) -> EngineResult<()> {
        let Self {
            modules,
            resources,
            bus,
            time,
            exit_requested,
            ..
        } = self;

        // Reverse registration order.
        for m in modules.iter_mut().rev() {
            let mut ctx = ModuleCtx::new(resources, bus, time, exit_requested);
            if let Err(e) = m.shutdown(&mut ctx) {
                log::warn!("module {} shutdown failed: {e}", m.id());
            }
        }

        self.started = false;
        log::info!("engine shutdown");
        Ok(())
    }

    #[inline]
    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    #[inline]
    pub fn resources_mut(&mut self) -> &mut Resources {
        &mut self.resources
    }

    #[inline]
    pub fn bus(&self) -> &Bus<E> {
        &self.bus
    }

    #[inline]
    pub fn time(&self) -> &Time {
        &self.time
    }

    #[inline]
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    #[inline]
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}
