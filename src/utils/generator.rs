//! Generates random locations around an origin.
//!
//! Useful for exercising the selectors against many candidate sets
//! without hand-writing coordinates.

use rand::Rng;

use crate::types::location::GeoPoint;
use crate::utils::haversine::EARTH_RADIUS_MILES;

/// Generates `capacity` random points within `radius_miles` of
/// `origin`.
///
/// Each point is placed at a uniformly random bearing and a uniformly
/// random great-circle distance in `[0, radius_miles]`, then projected
/// with the spherical destination formula. Longitudes are normalized to
/// [-180, 180].
pub fn generate_locations_near(origin: &GeoPoint, radius_miles: f64, capacity: usize) -> Vec<GeoPoint> {
    let mut rng = rand::thread_rng();
    (0..capacity)
        .map(|_| {
            let bearing = rng.gen_range(0.0..std::f64::consts::TAU);
            let miles = rng.gen_range(0.0..=radius_miles.max(0.0));
            destination(origin, bearing, miles)
        })
        .collect()
}

/// Returns the point reached by travelling `miles` from `origin` along
/// the initial `bearing` (radians, clockwise from north).
pub fn destination(origin: &GeoPoint, bearing: f64, miles: f64) -> GeoPoint {
    let angular = miles / EARTH_RADIUS_MILES;
    let lat1 = origin.latitude.to_radians();
    let lon1 = origin.longitude.to_radians();

    let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos())
        .clamp(-1.0, 1.0)
        .asin();
    let lon2 = lon1
        + (bearing.sin() * angular.sin() * lat1.cos()).atan2(angular.cos() - lat1.sin() * lat2.sin());

    let longitude = (lon2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0;
    GeoPoint::new(lat2.to_degrees(), longitude)
}
