//! Deterministic renderer stand-in for headless runs.
//!
//! Projects surface directions onto a plane perpendicular to the camera
//! direction, mapping unit offsets to pixels. Good enough to exercise the
//! engine without a real renderer: the camera sub-point always lands on the
//! canvas center, and angular offsets grow monotonically in pixels.
//!
//! Note: the projection deliberately does not back-face cull. Far-hemisphere
//! points still get screen coordinates (the antipode lands dead center),
//! which is exactly what makes it useful for testing the filter's own
//! rejection.

use foundation::math::{GeoPoint, Vec2, Vec3, unit_vector};

use crate::bridge::{CameraState, RenderBridge, ScreenRect};

/// Default camera distance from the globe center, in globe radii.
pub const DEFAULT_CAMERA_DISTANCE: f64 = 3.0;

/// Default planar projection scale (pixels per unit offset).
pub const DEFAULT_PX_PER_UNIT: f64 = 300.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticBridge {
    camera_geo: GeoPoint,
    distance: f64,
    rect: ScreenRect,
    px_per_unit: f64,
    ready: bool,
}

impl SyntheticBridge {
    /// A ready bridge whose camera sits above `(lat_deg, lon_deg)`.
    pub fn looking_at(lat_deg: f64, lon_deg: f64) -> Self {
        Self {
            camera_geo: GeoPoint::new(lat_deg, lon_deg),
            distance: DEFAULT_CAMERA_DISTANCE,
            rect: ScreenRect::new(0.0, 0.0, 800.0, 600.0),
            px_per_unit: DEFAULT_PX_PER_UNIT,
            ready: true,
        }
    }

    /// A bridge that reports "renderer not initialized" until
    /// [`SyntheticBridge::make_ready`] is called.
    pub fn not_ready() -> Self {
        let mut bridge = Self::looking_at(0.0, 0.0);
        bridge.ready = false;
        bridge
    }

    pub fn make_ready(&mut self) {
        self.ready = true;
    }

    pub fn set_camera(&mut self, lat_deg: f64, lon_deg: f64) {
        self.camera_geo = GeoPoint::new(lat_deg, lon_deg);
    }

    pub fn set_rect(&mut self, rect: ScreenRect) {
        self.rect = rect;
    }

    pub fn camera_geo(&self) -> GeoPoint {
        self.camera_geo
    }

    fn camera_dir(&self) -> Vec3 {
        self.camera_geo.unit_vector()
    }

    /// Orthonormal basis of the projection plane.
    fn plane_basis(&self) -> (Vec3, Vec3) {
        let dir = self.camera_dir();
        let hint = if dir.y.abs() < 0.99 {
            Vec3::new(0.0, 1.0, 0.0)
        } else {
            Vec3::new(0.0, 0.0, 1.0)
        };
        let right = hint
            .cross(dir)
            .normalize()
            .unwrap_or(Vec3::new(1.0, 0.0, 0.0));
        let up = dir.cross(right);
        (right, up)
    }
}

impl RenderBridge for SyntheticBridge {
    fn camera(&self) -> Option<CameraState> {
        if !self.ready {
            return None;
        }
        Some(CameraState::new(self.camera_dir().scale(self.distance)))
    }

    fn screen_coords(&self, lat_deg: f64, lon_deg: f64) -> Option<Vec2> {
        if !self.ready {
            return None;
        }
        let point_dir = unit_vector(lat_deg, lon_deg);
        let (right, up) = self.plane_basis();
        let center = self.rect.center();
        let screen = Vec2::new(
            center.x + point_dir.dot(right) * self.px_per_unit,
            center.y - point_dir.dot(up) * self.px_per_unit,
        );

        // Renderer convention: points projecting outside the canvas are
        // reported as unprojectable.
        if !self.rect.contains(screen) {
            return None;
        }
        Some(screen)
    }

    fn canvas_rect(&self) -> Option<ScreenRect> {
        if !self.ready {
            return None;
        }
        Some(self.rect)
    }
}
