use super::Vec3;

/// A geographic position in degrees.
///
/// Latitude is expected in `[-90, 90]`, longitude in `[-180, 180]`.
/// Out-of-range inputs are undefined by contract; validation belongs to
/// whatever produced the point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoPoint {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl GeoPoint {
    pub fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }

    pub fn unit_vector(self) -> Vec3 {
        unit_vector(self.lat_deg, self.lon_deg)
    }
}

/// Spherical-to-Cartesian direction for a lat/lon pair on the unit sphere.
///
/// Convention (matches the renderer's own lat/lon placement, so culling and
/// rendering never disagree):
/// - polar angle `phi = 90 deg - lat`
/// - azimuth `theta = lon`
/// - `x = sin(phi) * cos(theta)`, `y = cos(phi)`, `z = sin(phi) * sin(theta)`
///
/// The result has unit norm for all in-range inputs.
pub fn unit_vector(lat_deg: f64, lon_deg: f64) -> Vec3 {
    let phi = (90.0 - lat_deg).to_radians();
    let theta = lon_deg.to_radians();
    let sin_phi = phi.sin();
    Vec3::new(sin_phi * theta.cos(), phi.cos(), sin_phi * theta.sin())
}
