use foundation::math::{GeoPoint, Vec3};

/// Opaque identity of a geotagged event.
///
/// The engine never inspects event payloads; consumers resolve payloads by
/// id on their side of the boundary.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub u64);

/// A geotagged event as the engine sees it.
///
/// Points are immutable once produced by the data source; the engine only
/// ever holds a snapshot and replaces it wholesale.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EventPoint {
    pub id: EventId,
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl EventPoint {
    pub fn new(id: EventId, lat_deg: f64, lon_deg: f64) -> Self {
        Self {
            id,
            lat_deg,
            lon_deg,
        }
    }

    pub fn geo(&self) -> GeoPoint {
        GeoPoint::new(self.lat_deg, self.lon_deg)
    }

    /// Unit-sphere surface direction of this point.
    pub fn direction(&self) -> Vec3 {
        self.geo().unit_vector()
    }
}
