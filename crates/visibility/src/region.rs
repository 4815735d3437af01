/// Default hit-radius dampening.
///
/// Documented tuning value: the effective hit-test radius is intentionally
/// smaller than the drawn selector ring, so the selected set reads slightly
/// tighter than the visual circle.
pub const DEFAULT_DAMPENING: f64 = 0.85;

/// The fixed screen-space selector circle.
///
/// The center is always the current canvas-rect center, recomputed per pass
/// (window resizes move the center; the radius stays constant). Configured
/// once at startup.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SelectorRegion {
    /// Drawn radius in pixels.
    pub radius_px: f64,
    /// Hit-radius multiplier; see [`DEFAULT_DAMPENING`].
    pub dampening: f64,
}

impl SelectorRegion {
    pub fn new(radius_px: f64) -> Self {
        Self {
            radius_px,
            dampening: DEFAULT_DAMPENING,
        }
    }

    pub fn with_dampening(radius_px: f64, dampening: f64) -> Self {
        Self {
            radius_px,
            dampening,
        }
    }

    /// Radius actually used by the hit test.
    pub fn effective_radius_px(&self) -> f64 {
        self.radius_px * self.dampening
    }
}

impl Default for SelectorRegion {
    fn default() -> Self {
        Self::new(35.0)
    }
}
