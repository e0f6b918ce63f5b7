//! Struct definitions and implementations for [`GeoPoint`] and the
//! [`Locatable`] trait.
//!
//! Any record that sits somewhere on the map (a resort, a clinic, a
//! hospital) exposes its coordinates through [`Locatable`], so the
//! distance and selection functions can stay agnostic of the concrete
//! record type.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A [`GeoPoint`] is a latitude/longitude pair in decimal degrees.
///
/// Ranges are not enforced by [`GeoPoint::new`]. Out-of-range degrees
/// produce meaningless distances rather than errors; use
/// [`GeoPoint::try_new`] when the input comes from an untrusted source.
#[derive(Debug, PartialEq, Copy, Clone, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    /// The latitude of the point, expected in [-90, 90].
    #[serde(rename = "lat")]
    pub latitude: f64,

    /// The longitude of the point, expected in [-180, 180].
    #[serde(rename = "lon")]
    pub longitude: f64,
}

/// Rejection reasons for [`GeoPoint::try_new`].
#[derive(Debug, Error, PartialEq)]
pub enum CoordinateError {
    /// Latitude is NaN or outside [-90, 90].
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    /// Longitude is NaN or outside [-180, 180].
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

impl GeoPoint {
    /// Creates a point without validating the ranges.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        GeoPoint {
            latitude,
            longitude,
        }
    }

    /// Creates a point, rejecting latitudes outside [-90, 90] and
    /// longitudes outside [-180, 180]. NaN is rejected as well.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }
        Ok(GeoPoint::new(latitude, longitude))
    }

    /// Returns true if both coordinates are within their valid ranges.
    pub fn is_valid(&self) -> bool {
        GeoPoint::try_new(self.latitude, self.longitude).is_ok()
    }
}

/// Since Rust doesn't allow for inheritance, records that carry a
/// position implement this trait so they can be passed to the
/// selectors as origins or candidates.
pub trait Locatable {
    /// Returns the geographic position of the record.
    fn location(&self) -> GeoPoint;

    /// Returns a stable identifier for the record.
    fn get_uid(&self) -> String;

    /// Returns the name shown to a user.
    fn display_name(&self) -> &str;
}

impl Locatable for GeoPoint {
    fn location(&self) -> GeoPoint {
        *self
    }

    fn get_uid(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }

    fn display_name(&self) -> &str {
        ""
    }
}
