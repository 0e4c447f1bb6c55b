/// Frame timing snapshot handed to every module update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub frame_index: u64,
    /// Wall-clock seconds since the previous frame (clamped). Ignores the time scale.
    pub unscaled_dt: f32,
    /// `unscaled_dt * time_scale`.
    pub dt: f32,
    pub time_scale: f32,
}
