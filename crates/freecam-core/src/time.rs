use crate::frame::Frame;

/// Engine clock.
///
/// Simulation code reads the scaled dt; tools that must keep working while the
/// world is paused (free cameras, editors) read the unscaled one.
#[derive(Debug, Clone)]
pub struct Time {
    scale: f32,
    max_dt_sec: f32,

    elapsed_sec: f64,
    unscaled_elapsed_sec: f64,
    frame_index: u64,
}

impl Time {
    pub fn new(max_dt_sec: f32) -> Self {
        let max_dt_sec = if max_dt_sec.is_finite() && max_dt_sec > 0.0 {
            max_dt_sec
        } else {
            0.25
        };

        Self {
            scale: 1.0,
            max_dt_sec,
            elapsed_sec: 0.0,
            unscaled_elapsed_sec: 0.0,
            frame_index: 0,
        }
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Sets the global time scale. Negative or non-finite values are ignored.
    ///
    /// Returns `true` when the scale actually changed.
    pub fn set_scale(&mut self, scale: f32) -> bool {
        if !scale.is_finite() || scale < 0.0 || scale == self.scale {
            return false;
        }
        self.scale = scale;
        true
    }

    #[inline]
    pub fn elapsed_sec(&self) -> f64 {
        self.elapsed_sec
    }

    #[inline]
    pub fn unscaled_elapsed_sec(&self) -> f64 {
        self.unscaled_elapsed_sec
    }

    #[inline]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Consumes one frame of raw wall-clock time and produces its snapshot.
    pub fn advance(&mut self, raw_dt: f32) -> Frame {
        let unscaled_dt = if raw_dt.is_finite() {
            raw_dt.clamp(0.0, self.max_dt_sec)
        } else {
            0.0
        };
        let dt = unscaled_dt * self.scale;

        let frame = Frame {
            frame_index: self.frame_index,
            unscaled_dt,
            dt,
            time_scale: self.scale,
        };

        self.elapsed_sec += dt as f64;
        self.unscaled_elapsed_sec += unscaled_dt as f64;
        self.frame_index = self.frame_index.wrapping_add(1);

        frame
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new(0.25)
    }
}
