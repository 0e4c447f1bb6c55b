#![forbid(unsafe_op_in_unsafe_fn)]

pub mod anchors;
pub mod attach;
pub mod error;
pub mod hud;
pub mod input;
pub mod module;
pub mod motion;
pub mod pose;
pub mod rig;
pub mod scene;
pub mod settings;

pub use anchors::{Anchor, AnchorBinding, AnchorSet, Body};
pub use attach::{AttachmentController, AttachmentState, Reattached};
pub use error::FreeCamError;
pub use input::{DeviceMode, FeatureFlags, InputSnapshot, Key, KeySet, KeyState};
pub use module::{FreeCamEvent, FreeCamModule, FreeCamStatus};
pub use motion::{MotionIntegrator, MotionStep};
pub use pose::Pose;
pub use rig::CameraRig;
pub use scene::{AnchorResolver, Scene};
pub use settings::{AnchorEntry, Bindings, FreeCamSettings, MotionSettings, TimeBindings};
