//! Great-circle distance on a spherical Earth.
//!
//! See <https://en.wikipedia.org/wiki/Haversine_formula>. Elevation is
//! ignored and the Earth is treated as a perfect sphere, so results are
//! a straight-line approximation of travel distance.

use serde::{Deserialize, Serialize};

use crate::types::location::GeoPoint;

/// Mean radius of the Earth in miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Mean radius of the Earth in kilometers.
///
/// Kilometer distances are derived from the mile result with
/// [`KM_PER_MILE`], not from this radius, so the two units always agree
/// by that ratio.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Number of kilometers in one mile.
pub const KM_PER_MILE: f64 = 1.60934;

/// Unit a distance is reported in.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Miles,
    Kilometers,
}

impl DistanceUnit {
    /// Converts a distance in miles into this unit.
    pub fn from_miles(self, miles: f64) -> f64 {
        match self {
            DistanceUnit::Miles => miles,
            DistanceUnit::Kilometers => miles * KM_PER_MILE,
        }
    }
}

/// Computes the great-circle distance between two points in the given
/// unit.
///
/// Identical points yield exactly `0.0`. NaN coordinates yield NaN.
pub fn distance(a: &GeoPoint, b: &GeoPoint, unit: DistanceUnit) -> f64 {
    unit.from_miles(distance_miles(a, b))
}

/// Computes the great-circle distance between two points in miles.
pub fn distance_miles(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // round-off can push h just outside [0, 1]
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_MILES * c
}
