use foundation::math::Vec2;

use crate::bridge::{CameraState, RenderBridge};
use crate::point::{EventId, EventPoint};
use crate::region::SelectorRegion;

/// The points currently inside the selector, derived from one filter pass.
///
/// A `VisibleSet` has no identity of its own: it is fully determined by
/// `(dataset, camera, region)` at the instant of computation and is replaced
/// wholesale on every pass, never patched.
///
/// Ordering contract:
/// - Points appear in dataset-snapshot order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibleSet {
    points: Vec<EventPoint>,
}

impl VisibleSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[EventPoint] {
        &self.points
    }

    pub fn ids(&self) -> impl Iterator<Item = EventId> + '_ {
        self.points.iter().map(|p| p.id)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, id: EventId) -> bool {
        self.points.iter().any(|p| p.id == id)
    }
}

/// Classifies a single point against the camera and selector.
///
/// The test, in order:
/// 1. Back-face rejection: a surface point whose direction opposes the
///    camera direction is occluded by the sphere itself (the globe is
///    convex), so no ray cast is needed.
/// 2. Projection: an unprojectable point is not visible, never an error.
/// 3. Screen distance against the dampened selector radius.
pub fn is_visible<B: RenderBridge>(
    bridge: &B,
    camera: &CameraState,
    region: &SelectorRegion,
    center: Vec2,
    point: &EventPoint,
) -> bool {
    let Some(cam_dir) = camera.direction() else {
        return false;
    };

    if cam_dir.dot(point.direction()) < 0.0 {
        return false;
    }

    let Some(screen) = bridge.screen_coords(point.lat_deg, point.lon_deg) else {
        return false;
    };

    screen.distance(center) <= region.effective_radius_px()
}

/// Applies [`is_visible`] to a full dataset snapshot.
///
/// O(n), no I/O, no input mutation; identical inputs always yield an
/// identical set.
pub fn filter_visible<B: RenderBridge>(
    bridge: &B,
    camera: &CameraState,
    region: &SelectorRegion,
    center: Vec2,
    points: &[EventPoint],
) -> VisibleSet {
    VisibleSet {
        points: points
            .iter()
            .filter(|p| is_visible(bridge, camera, region, center, p))
            .copied()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::{filter_visible, is_visible};
    use crate::bridge::RenderBridge;
    use crate::point::{EventId, EventPoint};
    use crate::region::SelectorRegion;
    use crate::synthetic::SyntheticBridge;

    fn region() -> SelectorRegion {
        SelectorRegion::with_dampening(35.0, 0.85)
    }

    #[test]
    fn sub_point_is_visible_at_region_center() {
        let bridge = SyntheticBridge::looking_at(20.0, -30.0);
        let camera = bridge.camera().unwrap();
        let center = bridge.canvas_rect().unwrap().center();
        let a = EventPoint::new(EventId(1), 20.0, -30.0);
        assert!(is_visible(&bridge, &camera, &region(), center, &a));
    }

    #[test]
    fn antipodal_point_is_never_visible() {
        // The synthetic bridge happily projects back-hemisphere points (the
        // antipode even lands on the region center), so only the dot-product
        // rejection can exclude it.
        let bridge = SyntheticBridge::looking_at(20.0, -30.0);
        let camera = bridge.camera().unwrap();
        let center = bridge.canvas_rect().unwrap().center();
        let b = EventPoint::new(EventId(2), -20.0, 150.0);
        assert!(bridge.screen_coords(-20.0, 150.0).is_some());
        assert!(!is_visible(&bridge, &camera, &region(), center, &b));
    }

    #[test]
    fn front_point_outside_radius_is_rejected() {
        let bridge = SyntheticBridge::looking_at(0.0, 0.0);
        let camera = bridge.camera().unwrap();
        let center = bridge.canvas_rect().unwrap().center();
        // 30 degrees off-center projects ~150 px out at the default scale.
        let far = EventPoint::new(EventId(3), 0.0, 30.0);
        assert!(!is_visible(&bridge, &camera, &region(), center, &far));
    }

    #[test]
    fn end_to_end_scenario_from_fixed_camera() {
        let bridge = SyntheticBridge::looking_at(20.0, -30.0);
        let camera = bridge.camera().unwrap();
        let center = bridge.canvas_rect().unwrap().center();
        let points = vec![
            EventPoint::new(EventId(1), 20.0, -30.0),
            EventPoint::new(EventId(2), -20.0, 150.0),
        ];

        let set = filter_visible(&bridge, &camera, &region(), center, &points);
        assert!(set.contains(EventId(1)));
        assert!(!set.contains(EventId(2)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn filtering_is_deterministic() {
        let bridge = SyntheticBridge::looking_at(10.0, 45.0);
        let camera = bridge.camera().unwrap();
        let center = bridge.canvas_rect().unwrap().center();
        let points: Vec<EventPoint> = (0..50)
            .map(|i| EventPoint::new(EventId(i), (i as f64) * 3.0 - 75.0, (i as f64) * 7.0 - 175.0))
            .collect();

        let a = filter_visible(&bridge, &camera, &region(), center, &points);
        let b = filter_visible(&bridge, &camera, &region(), center, &points);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_dataset_yields_empty_set() {
        let bridge = SyntheticBridge::looking_at(0.0, 0.0);
        let camera = bridge.camera().unwrap();
        let center = bridge.canvas_rect().unwrap().center();
        let set = filter_visible(&bridge, &camera, &region(), center, &[]);
        assert!(set.is_empty());
    }
}
