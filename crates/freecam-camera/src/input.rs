#![forbid(unsafe_op_in_unsafe_fn)]

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Physical keys the free camera binds to.
///
/// The discriminant doubles as the bit index in `KeySet`, so the enum must stay under 128 variants.
#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Tab,
    Backspace,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4,
    Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,
    NumpadDivide,
    NumpadMultiply,
    NumpadMinus,
    NumpadPlus,
    NumpadPeriod,
    NumpadEnter,

    Comma,
    Period,
    Slash,
    Semicolon,
    Quote,
    LeftBracket,
    RightBracket,

    LeftShift,
    RightShift,
    LeftCtrl,
    RightCtrl,
    LeftAlt,
    RightAlt,

    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
}

impl Key {
    #[inline]
    const fn bit(self) -> u128 {
        1u128 << (self as u8)
    }
}

/// Fixed-size set of keys.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct KeySet(u128);

impl KeySet {
    pub const EMPTY: Self = Self(0);

    #[inline]
    pub fn insert(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    #[inline]
    pub fn remove(&mut self, key: Key) {
        self.0 &= !key.bit();
    }

    #[inline]
    pub fn contains(&self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Keys in `self` that are not in `other`.
    #[inline]
    pub fn difference(&self, other: &KeySet) -> KeySet {
        KeySet(self.0 & !other.0)
    }
}

impl std::fmt::Debug for KeySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KeySet({:#x})", self.0)
    }
}

impl FromIterator<Key> for KeySet {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut set = KeySet::EMPTY;
        for key in iter {
            set.insert(key);
        }
        set
    }
}

/// Held keys plus the keys that went down this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyState {
    held: KeySet,
    pressed: KeySet,
}

impl KeyState {
    /// Builder: `key` is held (not newly pressed).
    #[inline]
    pub fn hold(mut self, key: Key) -> Self {
        self.held.insert(key);
        self
    }

    /// Builder: `key` went down this frame.
    #[inline]
    pub fn press(mut self, key: Key) -> Self {
        self.held.insert(key);
        self.pressed.insert(key);
        self
    }

    #[inline]
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(key)
    }

    #[inline]
    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed.contains(key)
    }

    #[inline]
    pub fn any_held(&self, keys: &[Key]) -> bool {
        keys.iter().any(|&k| self.is_held(k))
    }

    #[inline]
    pub fn any_pressed(&self, keys: &[Key]) -> bool {
        keys.iter().any(|&k| self.was_pressed(k))
    }

    /// Moves to the next frame given only the keys held now.
    ///
    /// For adapters that poll held state and have no key-down events.
    pub fn advance(&mut self, held_now: KeySet) {
        self.pressed = held_now.difference(&self.held);
        self.held = held_now;
    }
}

/// Which look rate applies this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceMode {
    #[default]
    PointerKeyboard,
    Gamepad,
}

/// One frame of already-mapped camera input.
///
/// Axis values are whatever the device layer produced; non-finite values are
/// treated as zero by the consumers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    /// Look axes: x = yaw (positive turns right), y = pitch (positive looks up).
    pub look: Vec2,
    /// Planar move: x = strafe right, y = forward.
    pub move_xz: Vec2,
    pub thrust_up: f32,
    pub thrust_down: f32,
    /// Scroll wheel delta, clamped to [-1, 1] by the integrator.
    pub scroll: f32,
    /// Speed-adjust buttons, each clamped to [0, 1] by the integrator.
    pub speed_up: f32,
    pub speed_down: f32,
    pub roll_mode: bool,
    pub device: DeviceMode,
    pub keys: KeyState,
}

/// Application-owned switches, sampled fresh every frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    pub active: bool,
    /// A modal UI currently owns input focus.
    pub ui_captured: bool,
}

impl FeatureFlags {
    #[inline]
    pub fn allows_motion(&self) -> bool {
        self.active && !self.ui_captured
    }
}

#[inline]
pub(crate) fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

#[inline]
pub(crate) fn finite_vec2(v: Vec2) -> Vec2 {
    Vec2::new(finite_or_zero(v.x), finite_or_zero(v.y))
}
