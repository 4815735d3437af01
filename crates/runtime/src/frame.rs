use foundation::time::Time;

/// Default frame interval for a 60 Hz render loop (seconds).
///
/// Documented tuning value: one recompute pass per rendered frame means the
/// whole pass has to fit inside this interval.
pub const DEFAULT_FRAME_DT_S: f64 = 1.0 / 60.0;

/// Deterministic frame metadata.
///
/// One `Frame` is handed to the engine per animation-frame boundary. It is
/// intentionally small and pure so a trigger/frame sequence can be recorded
/// and replayed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Fixed delta time (seconds).
    pub dt_s: f64,
    /// Engine time at the start of the frame (seconds).
    pub time: Time,
}

impl Frame {
    pub fn new(index: u64, dt_s: f64) -> Self {
        Self {
            index,
            dt_s,
            time: Time(index as f64 * dt_s),
        }
    }

    /// A frame at [`DEFAULT_FRAME_DT_S`].
    pub fn at_default_rate(index: u64) -> Self {
        Self::new(index, DEFAULT_FRAME_DT_S)
    }

    pub fn next(self) -> Self {
        Self::new(self.index + 1, self.dt_s)
    }
}
