use thiserror::Error;

use crate::anchors::Anchor;

#[derive(Debug, Error)]
pub enum FreeCamError {
    #[error("anchor {0} has no pose in the scene")]
    UnresolvedAnchor(Anchor),

    #[error("invalid free camera settings: {0}")]
    InvalidSettings(String),
}
