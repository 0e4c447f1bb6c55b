#![forbid(unsafe_op_in_unsafe_fn)]

use serde::{Deserialize, Serialize};

use crate::anchors::{Anchor, AnchorSet, Body};
use crate::error::FreeCamError;
use crate::input::Key;

/// `[freecam]` table of the app config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeCamSettings {
    #[serde(default)]
    pub motion: MotionSettings,
    #[serde(default)]
    pub bindings: Bindings,
    #[serde(default)]
    pub time: TimeBindings,
    #[serde(default = "default_anchors")]
    pub anchors: Vec<AnchorEntry>,
}

impl Default for FreeCamSettings {
    fn default() -> Self {
        Self {
            motion: MotionSettings::default(),
            bindings: Bindings::default(),
            time: TimeBindings::default(),
            anchors: default_anchors(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionSettings {
    /// Units per second after a speed reset.
    pub default_speed: f32,
    /// Log-space increment per unit of scroll/speed-adjust input.
    pub speed_step: f32,
    /// Degrees per second per unit of look input (pointer + keyboard).
    pub pointer_look_rate: f32,
    /// Degrees per second per unit of look input (gamepad).
    pub gamepad_look_rate: f32,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            default_speed: 5.0,
            speed_step: 0.1,
            pointer_look_rate: 100.0,
            gamepad_look_rate: 60.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bindings {
    pub roll_left: Key,
    pub roll_right: Key,
    pub reset_speed: Key,
    /// Selection modifier that also requests a warp.
    pub warp_modifier: Key,
    /// Selection modifier that reparents without moving.
    pub reparent_modifier: Key,
    pub operator: [Key; 2],
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            roll_left: Key::Q,
            roll_right: Key::E,
            reset_speed: Key::ArrowDown,
            warp_modifier: Key::T,
            reparent_modifier: Key::Y,
            operator: [Key::Digit0, Key::Numpad0],
        }
    }
}

impl Bindings {
    #[inline]
    pub fn selection_modifiers(&self) -> [Key; 2] {
        [self.warp_modifier, self.reparent_modifier]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeBindings {
    pub pause: [Key; 2],
    pub half: [Key; 2],
    pub normal: [Key; 2],
}

impl Default for TimeBindings {
    fn default() -> Self {
        Self {
            pause: [Key::Comma, Key::NumpadDivide],
            half: [Key::Period, Key::NumpadMultiply],
            normal: [Key::Slash, Key::NumpadMinus],
        }
    }
}

impl TimeBindings {
    /// (keys, scale) pairs in the order they are checked; a later hit wins within a frame.
    pub fn table(&self) -> [([Key; 2], f32); 3] {
        [(self.pause, 0.0), (self.half, 0.5), (self.normal, 1.0)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorEntry {
    pub body: Body,
    pub key: Key,
    /// Falls back to `key` when absent.
    #[serde(default)]
    pub alt: Option<Key>,
}

impl AnchorEntry {
    #[inline]
    pub fn keys(&self) -> [Key; 2] {
        [self.key, self.alt.unwrap_or(self.key)]
    }
}

fn default_anchors() -> Vec<AnchorEntry> {
    AnchorSet::default()
        .iter()
        .filter_map(|b| match b.anchor {
            Anchor::Body(body) => Some(AnchorEntry {
                body,
                key: b.key,
                alt: Some(b.alt),
            }),
            Anchor::Operator => None,
        })
        .collect()
}

fn check_positive(name: &str, v: f32) -> Result<(), FreeCamError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(FreeCamError::InvalidSettings(format!(
            "{name} must be finite and > 0 (got {v})"
        )))
    }
}

impl FreeCamSettings {
    pub fn validate(&self) -> Result<(), FreeCamError> {
        let m = &self.motion;
        check_positive("motion.default_speed", m.default_speed)?;
        check_positive("motion.speed_step", m.speed_step)?;
        check_positive("motion.pointer_look_rate", m.pointer_look_rate)?;
        check_positive("motion.gamepad_look_rate", m.gamepad_look_rate)?;

        let modifiers = self.bindings.selection_modifiers();
        let anchor_keys = self.anchors.iter().flat_map(|a| a.keys());
        if let Some(k) = self
            .bindings
            .operator
            .into_iter()
            .chain(anchor_keys)
            .find(|k| modifiers.contains(k))
        {
            return Err(FreeCamError::InvalidSettings(format!(
                "anchor key {k:?} is also a selection modifier"
            )));
        }

        // Builds the table once to catch duplicate bodies and selector keys.
        self.anchor_set().map(|_| ())
    }

    /// Anchor table in config order, operator first.
    pub fn anchor_set(&self) -> Result<AnchorSet, FreeCamError> {
        AnchorSet::new(
            self.bindings.operator,
            self.anchors.iter().map(|a| (a.body, a.keys())),
        )
    }
}
