use crate::module::{Bus, Resources};
use crate::time::Time;

/// Context passed to modules.
///
/// This prevents modules from taking `&mut Engine`.
pub struct ModuleCtx<'a, E: 'static> {
    resources: &'a mut Resources,
    bus: &'a Bus<E>,
    time: &'a mut Time,
    exit: &'a mut bool,
}

impl<'a, E: 'static> ModuleCtx<'a, E> {
    #[inline]
    pub(crate) fn new(
        resources: &'a mut Resources,
        bus: &'a Bus<E>,
        time: &'a mut Time,
        exit: &'a mut bool,
    ) -> Self {
        Self {
            resources,
            bus,
            time,
            exit,
        }
    }

    #[inline]
    pub fn resources(&self) -> &Resources {
        self.resources
    }

    #[inline]
    pub fn resources_mut(&mut self) -> &mut Resources {
        self.resources
    }

    #[inline]
    pub fn bus(&self) -> &Bus<E> {
        self.bus
    }

    #[inline]
    pub fn time(&self) -> &Time {
        self.time
    }

    /// Time scale changes made here apply from the next frame on.
    #[inline]
    pub fn time_mut(&mut self) -> &mut Time {
        self.time
    }

    #[inline]
    pub fn request_exit(&mut self) {
        *self.exit = true;
    }

    #[inline]
    pub fn is_exit_requested(&self) -> bool {
        *self.exit
    }
}
