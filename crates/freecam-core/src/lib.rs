#![forbid(unsafe_op_in_unsafe_fn)]

pub mod config;
pub mod engine;
pub mod error;
pub mod frame;
pub mod logging;
pub mod module;
pub mod time;

pub use crate::config::EngineConfig;
pub use crate::engine::Engine;
pub use crate::error::{EngineError, EngineResult};
pub use crate::frame::Frame;
pub use crate::module::{Bus, Module, ModuleCtx, Resources};
pub use crate::time::Time;
