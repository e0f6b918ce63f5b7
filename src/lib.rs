//! Proximity Query Library.
//! Finds medical facilities near ski resorts and ski resorts near
//! medical facilities, by great-circle distance.
//!
//! Two selection policies are provided:
//!
//! * **Guaranteed minimum** ([`find_clinics_near_resort`],
//!   [`find_hospitals_near_resort`]): relaxes the distance cutoff so a
//!   resort is always shown some medical options.
//! * **Strict cutoff** ([`find_resorts_near_clinic`],
//!   [`find_resorts_near_hospital`]): never returns a resort beyond the
//!   cutoff, even if the result is empty.
//!
//! All functions are pure and synchronous. The library logs through the
//! [`log`] facade and never installs a logger itself.

#[macro_use]
extern crate log;

pub mod types {
    pub mod facility;
    pub mod location;
    pub mod query;
    pub mod view_state;
}

pub mod utils {
    pub mod generator;
    pub mod haversine;
}

pub mod algorithms {
    pub mod selector;
}

pub use algorithms::selector::{
    annotate_nearest_resort, facilities_near_any_resort, find_clinics_near_resort,
    find_hospitals_near_resort, find_nearest, find_resorts_near_clinic, find_resorts_near_hospital,
    select, select_guaranteed_minimum, select_within_cutoff, NearestResort, Policy, WithDistance,
};
pub use types::facility::{classify_provider, Clinic, Hospital, PassNetwork, ProviderChain, Region, Resort};
pub use types::location::{CoordinateError, GeoPoint, Locatable};
pub use types::query::{QueryConfig, QueryOverrides, StrictQueryConfig, StrictQueryOverrides};
pub use types::view_state::{ViewAction, ViewMode, ViewState, ViewStateError};
pub use utils::haversine::{distance, distance_miles, DistanceUnit};
