use foundation::math::{Vec2, Vec3};

/// Camera state as supplied by the rendering engine.
///
/// Only the position is needed here: the camera-direction unit vector for
/// back-face rejection is derived from it, and projection itself stays on
/// the renderer's side of the [`RenderBridge`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
}

impl CameraState {
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }

    /// Unit vector from the globe center toward the camera, or `None` for a
    /// degenerate position at the origin.
    pub fn direction(&self) -> Option<Vec3> {
        self.position.normalize()
    }
}

/// Bounding rectangle of the render canvas, in the same coordinate space as
/// [`RenderBridge::screen_coords`] results.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScreenRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left
            && p.x <= self.left + self.width
            && p.y >= self.top
            && p.y <= self.top + self.height
    }
}

/// Capability set the engine consumes from the rendering engine.
///
/// Injected at construction; the engine never reaches into ambient or global
/// renderer state. Every method is allowed to answer `None` while the
/// renderer is not ready, and the engine treats that as "skip, retry later",
/// never as an error.
pub trait RenderBridge {
    /// Current camera, or `None` while the renderer is not initialized.
    fn camera(&self) -> Option<CameraState>;

    /// Screen-space projection of a lat/lon surface point.
    ///
    /// `None` means the point cannot be projected right now (renderer not
    /// ready, or the projection falls outside the canvas per the renderer's
    /// own convention). Callers classify such points as not visible.
    fn screen_coords(&self, lat_deg: f64, lon_deg: f64) -> Option<Vec2>;

    /// Canvas bounding rectangle, used to align coordinate spaces.
    fn canvas_rect(&self) -> Option<ScreenRect>;
}
