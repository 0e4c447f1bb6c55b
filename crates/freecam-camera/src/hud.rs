//! Text helpers for an on-screen prompt layer. Nothing here draws.

use crate::anchors::AnchorSet;
use crate::input::Key;
use crate::settings::TimeBindings;

/// Speed readout: three decimals, switching to scientific notation outside `[0.01, 100]`.
pub fn format_speed(speed: f32) -> String {
    if !(0.01..=100.0).contains(&speed) {
        format!("{speed:.3e}")
    } else {
        format!("{speed:.3}")
    }
}

pub fn speed_label(speed: f32) -> String {
    format!("Speed: {} m/s", format_speed(speed))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub label: String,
    pub keys: [Key; 2],
}

/// Anchor selector prompts, operator first. Empty unless selection-mode is active.
pub fn anchor_prompts(anchors: &AnchorSet, selecting: bool) -> Vec<Prompt> {
    if !selecting {
        return Vec::new();
    }
    anchors
        .iter()
        .map(|b| Prompt {
            label: b.anchor.to_string(),
            keys: b.keys(),
        })
        .collect()
}

pub fn time_prompts(time: &TimeBindings) -> Vec<Prompt> {
    time.table()
        .into_iter()
        .map(|(keys, scale)| Prompt {
            label: format!("{:.0}% game speed", scale * 100.0),
            keys,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_switches_to_scientific_outside_range() {
        assert_eq!(format_speed(5.0), "5.000");
        assert_eq!(format_speed(5.52585), "5.526");
        assert_eq!(format_speed(0.01), "0.010");
        assert_eq!(format_speed(100.0), "100.000");
        assert_eq!(format_speed(123456.0), "1.235e5");
        assert_eq!(format_speed(0.00123), "1.230e-3");
        assert_eq!(speed_label(5.0), "Speed: 5.000 m/s");
    }

    #[test]
    fn anchor_prompts_follow_selection_mode() {
        let set = AnchorSet::default();
        assert!(anchor_prompts(&set, false).is_empty());

        let prompts = anchor_prompts(&set, true);
        assert_eq!(prompts.len(), 10);
        assert_eq!(prompts[0].label, "Player");
        assert_eq!(prompts[0].keys, [Key::Digit0, Key::Numpad0]);
        assert_eq!(prompts[9].label, "Stranger");
    }

    #[test]
    fn time_prompt_labels() {
        let labels: Vec<_> = time_prompts(&TimeBindings::default())
            .into_iter()
            .map(|p| p.label)
            .collect();
        assert_eq!(labels, ["0% game speed", "50% game speed", "100% game speed"]);
    }
}
