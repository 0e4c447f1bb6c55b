#![forbid(unsafe_op_in_unsafe_fn)]

use glam::Vec3;

use crate::input::{finite_or_zero, finite_vec2, DeviceMode, FeatureFlags, InputSnapshot};
use crate::pose::{LOCAL_FORWARD, LOCAL_RIGHT, WORLD_UP};
use crate::rig::CameraRig;
use crate::settings::{Bindings, MotionSettings};

/// Scale applied to speed before the log for the manual roll keys.
const ROLL_KEY_SPEED_SCALE: f32 = 0.1;

/// What one integration step did, for status and tracing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionStep {
    pub speed: f32,
    pub speed_reset: bool,
    pub yaw_or_roll_deg: f32,
    pub pitch_deg: f32,
    pub translation: Vec3,
}

/// Per-frame free-flight integration: look, move, roll and the adaptive speed scalar.
///
/// The speed lives in log space: every unit of scroll/speed-adjust input
/// multiplies it by `exp(speed_step)`, so the same gesture feels alike at 1 u/s
/// and at 1e6 u/s. It is kept within the positive finite `f32` range.
#[derive(Clone, Debug)]
pub struct MotionIntegrator {
    settings: MotionSettings,
    bindings: Bindings,
    speed: f32,
}

impl MotionIntegrator {
    pub fn new(settings: MotionSettings, bindings: Bindings) -> Self {
        Self {
            speed: sanitize_speed(settings.default_speed),
            settings,
            bindings,
        }
    }

    /// Current speed in units per second.
    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn reset_speed(&mut self) {
        self.speed = sanitize_speed(self.settings.default_speed);
    }

    /// Runs one frame. Returns `None` and leaves everything untouched when motion is gated off.
    pub fn update(
        &mut self,
        rig: &mut CameraRig,
        input: &InputSnapshot,
        flags: FeatureFlags,
        unscaled_dt: f32,
    ) -> Option<MotionStep> {
        if !flags.allows_motion() {
            return None;
        }

        let dt = if unscaled_dt.is_finite() && unscaled_dt > 0.0 {
            unscaled_dt
        } else {
            0.0
        };

        // Speed: log-space step, then the reset edge overrides it.
        let scroll_in_out = finite_or_zero(input.scroll).clamp(-1.0, 1.0)
            + finite_or_zero(input.speed_up).clamp(0.0, 1.0)
            - finite_or_zero(input.speed_down).clamp(0.0, 1.0);
        self.step_speed(scroll_in_out);

        let speed_reset = input.keys.was_pressed(self.bindings.reset_speed);
        if speed_reset {
            self.reset_speed();
        }
        let speed = self.speed;

        // Look.
        let look_rate = match input.device {
            DeviceMode::PointerKeyboard => self.settings.pointer_look_rate,
            DeviceMode::Gamepad => self.settings.gamepad_look_rate,
        };
        let look = finite_vec2(input.look);
        let degrees_x = look.x * look_rate * dt;
        let degrees_y = look.y * look_rate * dt;

        if input.roll_mode {
            rig.rotate_local(LOCAL_FORWARD, -degrees_x);
        } else {
            rig.rotate_world(WORLD_UP, degrees_x);
        }
        rig.rotate_local(LOCAL_RIGHT, -degrees_y);

        // Translation along the post-rotation axes.
        let step = speed * dt;
        let planar = finite_vec2(input.move_xz) * step;
        let vertical = (finite_or_zero(input.thrust_up) - finite_or_zero(input.thrust_down)) * step;

        let translation = rig.forward() * planar.y + rig.right() * planar.x + rig.up() * vertical;
        if translation.is_finite() {
            rig.translate_world(translation);
        }

        // Manual roll keys stack on top of roll-mode and are not dt-scaled.
        let roll_key_deg = (speed * ROLL_KEY_SPEED_SCALE + 1.0).ln();
        if input.keys.is_held(self.bindings.roll_left) {
            rig.rotate_local(LOCAL_FORWARD, roll_key_deg);
        }
        if input.keys.is_held(self.bindings.roll_right) {
            rig.rotate_local(LOCAL_FORWARD, -roll_key_deg);
        }

        log::trace!(
            "freecam motion: speed={speed:.4} yaw/roll={degrees_x:.3} pitch={degrees_y:.3} move={translation}"
        );

        Some(MotionStep {
            speed,
            speed_reset,
            yaw_or_roll_deg: degrees_x,
            pitch_deg: degrees_y,
            translation: if translation.is_finite() {
                translation
            } else {
                Vec3::ZERO
            },
        })
    }

    fn step_speed(&mut self, scroll_in_out: f32) {
        if scroll_in_out == 0.0 {
            return;
        }
        let ln = f64::from(self.speed).ln()
            + f64::from(scroll_in_out) * f64::from(self.settings.speed_step);
        if ln.is_nan() {
            return;
        }
        self.speed = sanitize_speed(ln.exp() as f32);
    }
}

/// Clamps into `[f32::MIN_POSITIVE, f32::MAX]`; NaN falls back to the minimum.
#[inline]
fn sanitize_speed(speed: f32) -> f32 {
    if speed.is_nan() {
        return f32::MIN_POSITIVE;
    }
    speed.clamp(f32::MIN_POSITIVE, f32::MAX)
}
