use crate::error::EngineResult;
use crate::frame::Frame;

use super::ModuleCtx;

/// Module lifecycle contract.
///
/// Modules are self-contained and talk to the rest of the app only through
/// `Resources` (per-frame samples, shared state) and the `Bus` (events).
pub trait Module<E: 'static> {
    fn id(&self) -> &'static str;

    fn init(&mut self, _ctx: &mut ModuleCtx<'_, E>) -> EngineResult<()> {
        Ok(())
    }

    fn start(&mut self, _ctx: &mut ModuleCtx<'_, E>) -> EngineResult<()> {
        Ok(())
    }

    fn update(&mut self, _ctx: &mut ModuleCtx<'_, E>, _frame: &Frame) -> EngineResult<()> {
        Ok(())
    }

    fn shutdown(&mut self, _ctx: &mut ModuleCtx<'_, E>) -> EngineResult<()> {
        Ok(())
    }
}
