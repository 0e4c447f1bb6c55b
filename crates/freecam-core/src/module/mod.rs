mod bus;
mod ctx;
mod module;
mod resources;

pub use bus::Bus;
pub use ctx::ModuleCtx;
pub use module::Module;
pub use resources::Resources;
