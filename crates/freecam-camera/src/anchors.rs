#![forbid(unsafe_op_in_unsafe_fn)]

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FreeCamError;
use crate::input::{Key, KeyState};

/// Named world bodies the camera can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Comet,
    CaveTwin,
    TowerTwin,
    TimberHearth,
    BrittleHollow,
    GiantsDeep,
    DarkBramble,
    RingWorld,
}

impl Body {
    pub const ALL: [Body; 9] = [
        Body::Sun,
        Body::Comet,
        Body::CaveTwin,
        Body::TowerTwin,
        Body::TimberHearth,
        Body::BrittleHollow,
        Body::GiantsDeep,
        Body::DarkBramble,
        Body::RingWorld,
    ];

    /// Name shown to the user.
    pub fn display_name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Comet => "Interloper",
            Body::CaveTwin => "Ember Twin",
            Body::TowerTwin => "Ash Twin",
            Body::TimberHearth => "Timber Hearth",
            Body::BrittleHollow => "Brittle Hollow",
            Body::GiantsDeep => "Giant's Deep",
            Body::DarkBramble => "Dark Bramble",
            Body::RingWorld => "Stranger",
        }
    }
}

/// Attachment target: the operator's own viewpoint or a named body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Anchor {
    #[default]
    Operator,
    Body(Body),
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::Operator => f.write_str("Player"),
            Anchor::Body(b) => f.write_str(b.display_name()),
        }
    }
}

/// Anchor plus its primary and alternate selector keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorBinding {
    pub anchor: Anchor,
    pub key: Key,
    pub alt: Key,
}

impl AnchorBinding {
    #[inline]
    pub fn keys(&self) -> [Key; 2] {
        [self.key, self.alt]
    }
}

/// Immutable anchor-key table. The operator entry is always first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorSet {
    bindings: Vec<AnchorBinding>,
}

impl AnchorSet {
    /// Builds the table; each anchor and each selector key may appear once.
    /// An entry may use the same key for both slots.
    pub fn new(
        operator_keys: [Key; 2],
        bodies: impl IntoIterator<Item = (Body, [Key; 2])>,
    ) -> Result<Self, FreeCamError> {
        let mut bindings = vec![AnchorBinding {
            anchor: Anchor::Operator,
            key: operator_keys[0],
            alt: operator_keys[1],
        }];

        for (body, [key, alt]) in bodies {
            let anchor = Anchor::Body(body);
            if bindings.iter().any(|b| b.anchor == anchor) {
                return Err(FreeCamError::InvalidSettings(format!(
                    "anchor {anchor} bound twice"
                )));
            }
            if let Some(other) = bindings
                .iter()
                .find(|b| b.keys().iter().any(|k| *k == key || *k == alt))
            {
                return Err(FreeCamError::InvalidSettings(format!(
                    "{anchor} shares a selector key with {}",
                    other.anchor
                )));
            }
            bindings.push(AnchorBinding { anchor, key, alt });
        }

        Ok(Self { bindings })
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &AnchorBinding> {
        self.bindings.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn keys_for(&self, anchor: Anchor) -> Option<[Key; 2]> {
        self.bindings
            .iter()
            .find(|b| b.anchor == anchor)
            .map(AnchorBinding::keys)
    }

    /// Anchors whose primary or alternate key went down this frame, in table order.
    pub fn pressed<'a>(&'a self, keys: &'a KeyState) -> impl Iterator<Item = Anchor> + 'a {
        self.bindings
            .iter()
            .filter(move |b| keys.any_pressed(&b.keys()))
            .map(|b| b.anchor)
    }
}

impl Default for AnchorSet {
    fn default() -> Self {
        #[rustfmt::skip]
        const DIGITS: [Key; 9] = [
            Key::Digit1, Key::Digit2, Key::Digit3, Key::Digit4, Key::Digit5,
            Key::Digit6, Key::Digit7, Key::Digit8, Key::Digit9,
        ];
        #[rustfmt::skip]
        const NUMPAD: [Key; 9] = [
            Key::Numpad1, Key::Numpad2, Key::Numpad3, Key::Numpad4, Key::Numpad5,
            Key::Numpad6, Key::Numpad7, Key::Numpad8, Key::Numpad9,
        ];

        let bindings = std::iter::once(AnchorBinding {
            anchor: Anchor::Operator,
            key: Key::Digit0,
            alt: Key::Numpad0,
        })
        .chain(Body::ALL.iter().enumerate().map(|(i, &body)| AnchorBinding {
            anchor: Anchor::Body(body),
            key: DIGITS[i],
            alt: NUMPAD[i],
        }))
        .collect();

        Self { bindings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_matches_digit_rows() {
        let set = AnchorSet::default();
        assert_eq!(set.len(), 10);
        assert_eq!(set.iter().next().map(|b| b.anchor), Some(Anchor::Operator));
        assert_eq!(set.keys_for(Anchor::Operator), Some([Key::Digit0, Key::Numpad0]));
        assert_eq!(
            set.keys_for(Anchor::Body(Body::TimberHearth)),
            Some([Key::Digit5, Key::Numpad5])
        );
        assert_eq!(
            set.keys_for(Anchor::Body(Body::RingWorld)),
            Some([Key::Digit9, Key::Numpad9])
        );
    }

    #[test]
    fn duplicate_body_is_rejected() {
        let err = AnchorSet::new(
            [Key::Digit0, Key::Numpad0],
            [
                (Body::Sun, [Key::Digit1, Key::Numpad1]),
                (Body::Sun, [Key::Digit2, Key::Numpad2]),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, FreeCamError::InvalidSettings(_)));
    }

    #[test]
    fn shared_selector_key_is_rejected() {
        let err = AnchorSet::new(
            [Key::Digit0, Key::Numpad0],
            [
                (Body::Sun, [Key::Digit1, Key::Numpad1]),
                (Body::Comet, [Key::Digit2, Key::Numpad1]),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, FreeCamError::InvalidSettings(_)));

        assert!(AnchorSet::new(
            [Key::Digit0, Key::Numpad0],
            [(Body::Sun, [Key::Numpad0, Key::Numpad0])],
        )
        .is_err());
    }

    #[test]
    fn one_entry_may_repeat_its_own_key() {
        let set = AnchorSet::new(
            [Key::Digit0, Key::Digit0],
            [(Body::Sun, [Key::S, Key::S])],
        )
        .unwrap();
        assert_eq!(set.keys_for(Anchor::Body(Body::Sun)), Some([Key::S, Key::S]));
    }

    #[test]
    fn pressed_uses_either_key() {
        let set = AnchorSet::default();
        let keys = KeyState::default().press(Key::Numpad2);
        let hits: Vec<_> = set.pressed(&keys).collect();
        assert_eq!(hits, vec![Anchor::Body(Body::Comet)]);

        let held_only = KeyState::default().hold(Key::Digit2);
        assert_eq!(set.pressed(&held_only).count(), 0);
    }

    #[test]
    fn operator_displays_as_player() {
        assert_eq!(Anchor::Operator.to_string(), "Player");
        assert_eq!(Anchor::Body(Body::GiantsDeep).to_string(), "Giant's Deep");
    }
}
