//! Nearest-location selection.
//!
//! Every query runs the same two steps:
//!
//! 1. Annotate each candidate with its distance from the origin and
//!    sort ascending. The sort is stable, so candidates at exactly the
//!    same distance keep their input order.
//! 2. Apply a [`Policy`] to the sorted list to decide how many entries
//!    to keep.
//!
//! Two policies exist. [`Policy::GuaranteedMinimum`] is used to find
//! medical facilities near a resort: it relaxes the distance cutoff so
//! a skier in a remote area is still shown the closest options.
//! [`Policy::StrictCutoff`] is used to find resorts near a facility: a
//! resort beyond the cutoff is never returned, even if that leaves the
//! result empty.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::types::facility::{Clinic, Hospital, Resort};
use crate::types::location::Locatable;
use crate::types::query::{QueryConfig, QueryOverrides, StrictQueryConfig, StrictQueryOverrides};
use crate::utils::haversine;

/// A copy of a candidate record together with its distance in miles
/// from the query origin.
///
/// Serializes as the record's own fields plus a `distance` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithDistance<T> {
    #[serde(flatten)]
    pub entity: T,

    /// Great-circle distance in miles from the origin.
    pub distance: f64,
}

/// Post-sort selection policies.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Policy {
    /// Keep up to `limit` entries within `max_miles`. If fewer than
    /// `min_count` are within range, fall back to the closest entries
    /// regardless of distance.
    GuaranteedMinimum(QueryConfig),

    /// Keep up to `limit` entries within `max_miles`, never more.
    StrictCutoff(StrictQueryConfig),
}

impl Policy {
    /// Number of leading entries to keep from a distance-sorted list.
    ///
    /// `within` is the length of the prefix whose distance is within
    /// the cutoff.
    fn keep_count(&self, within: usize) -> usize {
        match self {
            Policy::GuaranteedMinimum(config) => {
                if within >= config.min_count {
                    within.min(config.limit)
                } else {
                    // max(min_count, min(limit, within)) capped at limit;
                    // within < min_count here, so that reduces to this
                    config.min_count.min(config.limit)
                }
            }
            Policy::StrictCutoff(config) => within.min(config.limit),
        }
    }

    fn max_miles(&self) -> f64 {
        match self {
            Policy::GuaranteedMinimum(config) => config.max_miles,
            Policy::StrictCutoff(config) => config.max_miles,
        }
    }

    /// Trims a distance-sorted list according to the policy.
    pub fn apply<T>(&self, mut sorted: Vec<WithDistance<T>>) -> Vec<WithDistance<T>> {
        let max_miles = self.max_miles();
        let within = sorted
            .iter()
            .take_while(|candidate| candidate.distance <= max_miles)
            .count();
        let keep = self.keep_count(within);
        debug!(
            "policy: {:?}, candidates: {}, within range: {}, keeping: {}",
            self,
            sorted.len(),
            within,
            keep.min(sorted.len())
        );
        sorted.truncate(keep);
        sorted
    }
}

/// Annotates every candidate with its distance in miles from `origin`
/// and sorts ascending by distance.
///
/// Ties keep their input order. NaN distances sort last.
///
/// # Time Complexity
/// *O*(*n* log *n*) in the number of candidates.
pub fn annotate_and_sort<O, C>(origin: &O, candidates: &[C]) -> Vec<WithDistance<C>>
where
    O: Locatable + ?Sized,
    C: Locatable + Clone,
{
    let from = origin.location();
    let mut annotated: Vec<WithDistance<C>> = candidates
        .iter()
        .map(|candidate| WithDistance {
            distance: haversine::distance_miles(&from, &candidate.location()),
            entity: candidate.clone(),
        })
        .collect();
    // sort_by_key is stable
    annotated.sort_by_key(|candidate| OrderedFloat(candidate.distance));
    annotated
}

/// Runs a query from `origin` over `candidates` under `policy`.
pub fn select<O, C>(origin: &O, candidates: &[C], policy: &Policy) -> Vec<WithDistance<C>>
where
    O: Locatable + ?Sized,
    C: Locatable + Clone,
{
    debug!("origin: {}", origin.get_uid());
    policy.apply(annotate_and_sort(origin, candidates))
}

/// Selects candidates near `origin`, relaxing the distance cutoff if
/// fewer than `config.min_count` are in range.
///
/// # Returns
/// Up to `config.limit` candidates sorted ascending by distance.
/// * If at least `min_count` candidates are within `max_miles`, only
///   those are considered.
/// * Otherwise the closest `min(min_count, limit)` candidates are
///   returned regardless of distance.
///
/// An empty candidate list yields an empty result.
pub fn select_guaranteed_minimum<O, C>(
    origin: &O,
    candidates: &[C],
    config: &QueryConfig,
) -> Vec<WithDistance<C>>
where
    O: Locatable + ?Sized,
    C: Locatable + Clone,
{
    select(origin, candidates, &Policy::GuaranteedMinimum(*config))
}

/// Selects up to `config.limit` candidates within `config.max_miles` of
/// `origin`, sorted ascending by distance. The result is empty when
/// nothing is in range.
pub fn select_within_cutoff<O, C>(
    origin: &O,
    candidates: &[C],
    config: &StrictQueryConfig,
) -> Vec<WithDistance<C>>
where
    O: Locatable + ?Sized,
    C: Locatable + Clone,
{
    select(origin, candidates, &Policy::StrictCutoff(*config))
}

/// Finds dialysis clinics near a resort. With a positive `min_count`
/// the result is only empty when `clinics` is.
pub fn find_clinics_near_resort(
    resort: &Resort,
    clinics: &[Clinic],
    overrides: &QueryOverrides,
) -> Vec<WithDistance<Clinic>> {
    info!("Finding clinics near resort {}", resort.get_uid());
    select_guaranteed_minimum(resort, clinics, &overrides.resolve())
}

/// Finds hospitals near a resort, see [`find_clinics_near_resort`].
pub fn find_hospitals_near_resort(
    resort: &Resort,
    hospitals: &[Hospital],
    overrides: &QueryOverrides,
) -> Vec<WithDistance<Hospital>> {
    info!("Finding hospitals near resort {}", resort.get_uid());
    select_guaranteed_minimum(resort, hospitals, &overrides.resolve())
}

/// Finds resorts within range of a clinic.
pub fn find_resorts_near_clinic(
    clinic: &Clinic,
    resorts: &[Resort],
    overrides: &StrictQueryOverrides,
) -> Vec<WithDistance<Resort>> {
    info!("Finding resorts near clinic {}", clinic.get_uid());
    select_within_cutoff(clinic, resorts, &overrides.resolve())
}

/// Finds resorts within range of a hospital.
pub fn find_resorts_near_hospital(
    hospital: &Hospital,
    resorts: &[Resort],
    overrides: &StrictQueryOverrides,
) -> Vec<WithDistance<Resort>> {
    info!("Finding resorts near hospital {}", hospital.get_uid());
    select_within_cutoff(hospital, resorts, &overrides.resolve())
}

/// Returns the candidate closest to `origin`, or [`None`] if there are
/// no candidates. The first one wins on ties.
pub fn find_nearest<'a, O, C>(origin: &O, candidates: &'a [C]) -> Option<WithDistance<&'a C>>
where
    O: Locatable + ?Sized,
    C: Locatable,
{
    let from = origin.location();
    candidates
        .iter()
        .map(|candidate| WithDistance {
            distance: haversine::distance_miles(&from, &candidate.location()),
            entity: candidate,
        })
        .min_by_key(|candidate| OrderedFloat(candidate.distance))
}

/// Records that remember which resort is closest to them.
pub trait NearestResort: Locatable + Clone {
    /// Decimal places the stored distance is rounded to.
    const DISTANCE_DECIMALS: i32;

    /// Usual cutoff in miles for keeping a record of this kind in a
    /// dataset, see [`facilities_near_any_resort`].
    const MAX_RESORT_MILES: f64;

    fn set_nearest_resort(&mut self, name: Option<String>, distance: Option<f64>);
}

impl NearestResort for Clinic {
    const DISTANCE_DECIMALS: i32 = 2;
    const MAX_RESORT_MILES: f64 = 200.0;

    fn set_nearest_resort(&mut self, name: Option<String>, distance: Option<f64>) {
        self.nearest_resort = name;
        self.nearest_resort_dist = distance;
    }
}

impl NearestResort for Hospital {
    const DISTANCE_DECIMALS: i32 = 1;
    const MAX_RESORT_MILES: f64 = 75.0;

    fn set_nearest_resort(&mut self, name: Option<String>, distance: Option<f64>) {
        self.nearest_resort = name;
        self.nearest_resort_dist = distance;
    }
}

/// Copies `record` and stores `nearest` on it, rounding the distance to
/// `T::DISTANCE_DECIMALS`.
fn with_nearest_resort<T: NearestResort>(record: &T, nearest: Option<&WithDistance<&Resort>>) -> T {
    let mut annotated = record.clone();
    match nearest {
        Some(nearest) => {
            let scale = 10f64.powi(T::DISTANCE_DECIMALS);
            annotated.set_nearest_resort(
                Some(nearest.entity.name.clone()),
                Some((nearest.distance * scale).round() / scale),
            );
        }
        None => annotated.set_nearest_resort(None, None),
    }
    annotated
}

/// Returns a copy of `record` with its nearest resort and the rounded
/// distance to it filled in. Both are [`None`] when `resorts` is empty.
pub fn annotate_nearest_resort<T: NearestResort>(record: &T, resorts: &[Resort]) -> T {
    with_nearest_resort(record, find_nearest(record, resorts).as_ref())
}

/// Keeps the records whose nearest resort is within `max_miles`
/// (inclusive, compared before rounding) and returns them annotated
/// with that resort. Input order is preserved.
///
/// Nothing is kept when `resorts` is empty. Records with a NaN distance
/// are dropped.
///
/// # Time Complexity
/// *O*(*n* * *m*) for `n` records and `m` resorts.
pub fn facilities_near_any_resort<T: NearestResort>(
    records: &[T],
    resorts: &[Resort],
    max_miles: f64,
) -> Vec<T> {
    info!(
        "Filtering {} records to within {} miles of {} resorts",
        records.len(),
        max_miles,
        resorts.len()
    );
    let kept: Vec<T> = records
        .iter()
        .filter_map(|record| {
            let nearest = find_nearest(record, resorts)?;
            if nearest.distance <= max_miles {
                Some(with_nearest_resort(record, Some(&nearest)))
            } else {
                None
            }
        })
        .collect();
    debug!("kept {} of {} records", kept.len(), records.len());
    kept
}

#[cfg(test)]
mod selector_tests {
    use super::*;
    use crate::types::facility::{PassNetwork, ProviderChain, Region};
    use crate::types::location::GeoPoint;
    use crate::types::query::DEFAULT_MIN_COUNT;
    use crate::utils::generator::generate_locations_near;

    const VAIL: GeoPoint = GeoPoint::new(39.6433, -106.3781);
    const DENVER: GeoPoint = GeoPoint::new(39.7392, -104.9903);

    fn resort(name: &str, latitude: f64, longitude: f64) -> Resort {
        Resort::new(
            name,
            "CO",
            GeoPoint::new(latitude, longitude),
            PassNetwork::Epic,
            Region::Rockies,
        )
    }

    fn clinic(name: &str, latitude: f64, longitude: f64) -> Clinic {
        Clinic {
            ccn: name.to_string(),
            facility: name.to_string(),
            provider: ProviderChain::Other,
            address: String::new(),
            city: String::new(),
            state: "CO".to_string(),
            zip: String::new(),
            location: GeoPoint::new(latitude, longitude),
            nearest_resort: None,
            nearest_resort_dist: None,
        }
    }

    fn hospital(name: &str, latitude: f64, longitude: f64) -> Hospital {
        Hospital::new(name, "", "CO", GeoPoint::new(latitude, longitude), true)
    }

    fn names<T: Locatable>(results: &[WithDistance<T>]) -> Vec<String> {
        results
            .iter()
            .map(|result| result.entity.display_name().to_string())
            .collect()
    }

    fn names_of<T: Locatable>(records: &[T]) -> Vec<String> {
        records
            .iter()
            .map(|record| record.display_name().to_string())
            .collect()
    }

    fn is_sorted<T>(results: &[WithDistance<T>]) -> bool {
        results.windows(2).all(|pair| pair[0].distance <= pair[1].distance)
    }

    /// Vail with one clinic next door and one in New York.
    #[test]
    fn test_vail_near_clinic_first() {
        let vail = resort("Vail", VAIL.latitude, VAIL.longitude);
        let clinics = vec![clinic("far", 40.7128, -74.006), clinic("near", 39.641, -106.375)];
        let overrides = QueryOverrides {
            max_miles: Some(100.0),
            min_count: Some(1),
            ..Default::default()
        };

        let results = find_clinics_near_resort(&vail, &clinics, &overrides);
        assert_eq!(results[0].entity.facility, "near");
        assert!(results[0].distance < 10.0);
        // one within range satisfies min_count, so the far one is dropped
        assert_eq!(results.len(), 1);
    }

    /// The only hospitals are far away, but the resort still gets some.
    #[test]
    fn test_guaranteed_minimum_relaxes_cutoff() {
        let vail = resort("Vail", VAIL.latitude, VAIL.longitude);
        let hospitals = vec![
            hospital("Burlington", 44.4759, -73.1953),
            hospital("Albany", 42.6525, -73.7739),
            hospital("Allentown", 40.5953, -75.4903),
            hospital("Traverse City", 44.7631, -85.6206),
        ];

        let results = find_hospitals_near_resort(&vail, &hospitals, &QueryOverrides::default());
        assert_eq!(results.len(), DEFAULT_MIN_COUNT);
        assert!(results.iter().all(|result| result.distance > 100.0));
        assert_eq!(results[0].entity.name, "Traverse City");
        assert!(is_sorted(&results));
    }

    /// With one close candidate and min_count 3, the two next-closest
    /// far candidates fill the gap.
    #[test]
    fn test_guaranteed_minimum_tops_up_with_far_candidates() {
        let vail = resort("Vail", VAIL.latitude, VAIL.longitude);
        let clinics = vec![
            clinic("new york", 40.7128, -74.006),
            clinic("near", 39.641, -106.375),
            clinic("salt lake", 40.772, -111.8394),
            clinic("seattle", 47.6183, -122.1817),
        ];

        let results = select_guaranteed_minimum(&vail, &clinics, &QueryConfig::default());
        assert_eq!(names(&results), vec!["near", "salt lake", "seattle"]);
    }

    #[test]
    fn test_guaranteed_minimum_empty_candidates() {
        let vail = resort("Vail", VAIL.latitude, VAIL.longitude);
        let results = find_clinics_near_resort(&vail, &[], &QueryOverrides::default());
        assert!(results.is_empty());
    }

    /// min_count above the candidate count returns everything, sorted.
    #[test]
    fn test_guaranteed_minimum_fewer_candidates_than_min_count() {
        let vail = resort("Vail", VAIL.latitude, VAIL.longitude);
        let clinics = vec![clinic("new york", 40.7128, -74.006), clinic("near", 39.641, -106.375)];
        let config = QueryConfig {
            limit: 5,
            max_miles: 1.0,
            min_count: 10,
        };

        let results = select_guaranteed_minimum(&vail, &clinics, &config);
        assert_eq!(names(&results), vec!["near", "new york"]);
    }

    /// min_count above limit is capped by limit.
    #[test]
    fn test_guaranteed_minimum_never_exceeds_limit() {
        let vail = resort("Vail", VAIL.latitude, VAIL.longitude);
        let clinics: Vec<Clinic> = (0..8)
            .map(|i| clinic(&format!("c{}", i), 45.0 + i as f64, -100.0))
            .collect();
        let config = QueryConfig {
            limit: 2,
            max_miles: 1.0,
            min_count: 4,
        };

        let results = select_guaranteed_minimum(&vail, &clinics, &config);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_limit_two_returns_exactly_two() {
        let vail = resort("Vail", VAIL.latitude, VAIL.longitude);
        let clinics = vec![
            clinic("a", 39.64, -106.37),
            clinic("b", 39.65, -106.38),
            clinic("c", 39.66, -106.39),
        ];
        let results = find_clinics_near_resort(
            &vail,
            &clinics,
            &QueryOverrides {
                limit: Some(2),
                ..Default::default()
            },
        );
        assert_eq!(results.len(), 2);

        let denver_clinic = clinic("denver", DENVER.latitude, DENVER.longitude);
        let resorts = vec![
            resort("Vail", VAIL.latitude, VAIL.longitude),
            resort("Breckenridge", 39.4817, -106.0384),
            resort("Keystone", 39.6045, -105.9498),
        ];
        let results = find_resorts_near_clinic(
            &denver_clinic,
            &resorts,
            &StrictQueryOverrides {
                limit: Some(2),
                ..Default::default()
            },
        );
        assert_eq!(results.len(), 2);
    }

    /// Denver clinic must not see a resort in Vermont.
    #[test]
    fn test_strict_cutoff_excludes_distant_resort() {
        let denver_clinic = clinic("denver", DENVER.latitude, DENVER.longitude);
        let resorts = vec![
            resort("Stowe", 44.5303, -72.7814),
            resort("Vail", VAIL.latitude, VAIL.longitude),
            resort("Killington", 43.6045, -72.8201),
        ];
        let results = find_resorts_near_clinic(
            &denver_clinic,
            &resorts,
            &StrictQueryOverrides {
                max_miles: Some(100.0),
                ..Default::default()
            },
        );
        assert_eq!(names(&results), vec!["Vail"]);
        assert!(results.iter().all(|result| result.distance <= 100.0));
    }

    /// Nothing in range means nothing returned, no relaxation.
    #[test]
    fn test_strict_cutoff_empty_when_nothing_in_range() {
        let vermont_hospital = hospital("Rutland", 43.6106, -72.9726);
        let resorts = vec![
            resort("Vail", VAIL.latitude, VAIL.longitude),
            resort("Aspen", 39.1911, -106.8175),
        ];
        let results =
            find_resorts_near_hospital(&vermont_hospital, &resorts, &StrictQueryOverrides::default());
        assert!(results.is_empty());

        let results = find_resorts_near_hospital(&vermont_hospital, &[], &StrictQueryOverrides::default());
        assert!(results.is_empty());
    }

    /// Four candidates exactly one degree away along the equator and
    /// meridian are equidistant and must keep their input order.
    #[test]
    fn test_ties_keep_input_order() {
        let origin = GeoPoint::new(0.0, 0.0);
        let clinics = vec![
            clinic("east", 0.0, 1.0),
            clinic("north", 1.0, 0.0),
            clinic("west", 0.0, -1.0),
            clinic("south", -1.0, 0.0),
        ];
        let config = QueryConfig {
            limit: 10,
            max_miles: 1000.0,
            min_count: 0,
        };

        let results = select_guaranteed_minimum(&origin, &clinics, &config);
        assert_eq!(names(&results), vec!["east", "north", "west", "south"]);

        let reversed: Vec<Clinic> = clinics.iter().rev().cloned().collect();
        let results = select_guaranteed_minimum(&origin, &reversed, &config);
        assert_eq!(names(&results), vec!["south", "west", "north", "east"]);
    }

    #[test]
    fn test_ties_at_same_coordinates_keep_input_order() {
        let denver_clinic = clinic("denver", DENVER.latitude, DENVER.longitude);
        let resorts = vec![
            resort("second", 39.6045, -105.9498),
            resort("first", VAIL.latitude, VAIL.longitude),
            resort("third", VAIL.latitude, VAIL.longitude),
        ];
        let results = select_within_cutoff(&denver_clinic, &resorts, &StrictQueryConfig::default());
        assert_eq!(names(&results), vec!["second", "first", "third"]);
    }

    /// Results are copies; the input records are left as they were.
    #[test]
    fn test_results_are_copies() {
        let vail = resort("Vail", VAIL.latitude, VAIL.longitude);
        let clinics = vec![clinic("near", 39.641, -106.375)];
        let before = clinics.clone();

        let results = find_clinics_near_resort(&vail, &clinics, &QueryOverrides::default());
        assert_eq!(clinics, before);
        assert_eq!(results[0].entity, clinics[0]);
    }

    #[test]
    fn test_guaranteed_minimum_random_candidate_sets() {
        let config = QueryConfig::default();
        for radius in [5.0, 50.0, 500.0, 5000.0] {
            let points = generate_locations_near(&VAIL, radius, 12);
            let results = select_guaranteed_minimum(&VAIL, &points, &config);
            assert!(results.len() >= config.min_count.min(points.len()));
            assert!(results.len() <= config.limit);
            assert!(is_sorted(&results));
        }
    }

    #[test]
    fn test_strict_cutoff_random_candidate_sets() {
        let config = StrictQueryConfig {
            limit: 50,
            max_miles: 100.0,
        };
        for radius in [5.0, 150.0, 3000.0] {
            let points = generate_locations_near(&DENVER, radius, 40);
            let results = select_within_cutoff(&DENVER, &points, &config);
            assert!(results.iter().all(|result| result.distance <= config.max_miles));
            assert!(is_sorted(&results));

            let expected = points
                .iter()
                .filter(|point| haversine::distance_miles(&DENVER, point) <= config.max_miles)
                .count();
            assert_eq!(results.len(), expected);
        }
    }

    /// Invalid coordinates do not panic; their NaN distance sorts last
    /// and never passes a cutoff.
    #[test]
    fn test_nan_candidates_sort_last() {
        let points = vec![GeoPoint::new(f64::NAN, 0.0), GeoPoint::new(39.641, -106.375)];
        let sorted = annotate_and_sort(&VAIL, &points);
        assert!(sorted[1].distance.is_nan());

        let strict = select_within_cutoff(&VAIL, &points, &StrictQueryConfig::default());
        assert_eq!(strict.len(), 1);
    }

    #[test]
    fn test_find_nearest() {
        let points = vec![
            GeoPoint::new(40.7128, -74.006),
            GeoPoint::new(39.641, -106.375),
            GeoPoint::new(39.641, -106.375),
        ];
        let nearest = find_nearest(&VAIL, &points).unwrap();
        assert!(std::ptr::eq(nearest.entity, &points[1]));
        assert!(find_nearest(&VAIL, &Vec::<GeoPoint>::new()).is_none());
    }

    #[test]
    fn test_annotate_nearest_resort() {
        let resorts = vec![
            resort("Vail", VAIL.latitude, VAIL.longitude),
            resort("Aspen", 39.1911, -106.8175),
        ];

        let annotated = annotate_nearest_resort(&clinic("near", 39.641, -106.375), &resorts);
        assert_eq!(annotated.nearest_resort.as_deref(), Some("Vail"));
        let dist = annotated.nearest_resort_dist.unwrap();
        assert_eq!(dist, (dist * 100.0).round() / 100.0);
        assert!(dist < 1.0);

        let annotated = annotate_nearest_resort(&hospital("Aspen Valley", 39.1911, -106.8175), &resorts);
        assert_eq!(annotated.nearest_resort.as_deref(), Some("Aspen"));
        assert_eq!(annotated.nearest_resort_dist, Some(0.0));

        let annotated = annotate_nearest_resort(&hospital("Nowhere", 0.0, 0.0), &[]);
        assert!(annotated.nearest_resort.is_none());
        assert!(annotated.nearest_resort_dist.is_none());
    }

    #[test]
    fn test_facilities_near_any_resort() {
        let resorts = vec![
            resort("Vail", VAIL.latitude, VAIL.longitude),
            resort("Aspen", 39.1911, -106.8175),
        ];
        let clinics = vec![
            clinic("vail", 39.641, -106.375),
            clinic("new york", 40.7128, -74.006),
            clinic("aspen", 39.19, -106.82),
        ];

        let kept = facilities_near_any_resort(&clinics, &resorts, Clinic::MAX_RESORT_MILES);
        assert_eq!(names_of(&kept), vec!["vail", "aspen"]);
        assert_eq!(kept[0].nearest_resort.as_deref(), Some("Vail"));
        assert_eq!(kept[1].nearest_resort.as_deref(), Some("Aspen"));
        assert!(kept[1].nearest_resort_dist.unwrap() < 1.0);
    }

    /// The cutoff is inclusive and uses the unrounded distance.
    #[test]
    fn test_facilities_near_any_resort_boundary() {
        let resorts = vec![resort("Vail", VAIL.latitude, VAIL.longitude)];
        let hospitals = vec![hospital("Denver Health", DENVER.latitude, DENVER.longitude)];
        let exact = haversine::distance_miles(&DENVER, &VAIL);
        assert!(exact < Hospital::MAX_RESORT_MILES);

        let kept = facilities_near_any_resort(&hospitals, &resorts, exact);
        assert_eq!(kept.len(), 1);
        assert_eq!(
            kept[0].nearest_resort_dist,
            Some((exact * 10.0).round() / 10.0)
        );

        let kept = facilities_near_any_resort(&hospitals, &resorts, exact - 0.001);
        assert!(kept.is_empty());
    }

    #[test]
    fn test_facilities_near_any_resort_without_resorts() {
        let clinics = vec![clinic("vail", 39.641, -106.375)];
        assert!(facilities_near_any_resort(&clinics, &[], f64::MAX).is_empty());
        assert!(facilities_near_any_resort::<Clinic>(&[], &[], 200.0).is_empty());
    }

    /// A candidate at exactly `max_miles` is in range for both policies.
    #[test]
    fn test_cutoff_is_inclusive() {
        let denver_clinic = clinic("denver", DENVER.latitude, DENVER.longitude);
        let resorts = vec![resort("Vail", VAIL.latitude, VAIL.longitude)];
        let exact = haversine::distance_miles(&DENVER, &VAIL);

        let strict = select_within_cutoff(
            &denver_clinic,
            &resorts,
            &StrictQueryConfig {
                limit: 5,
                max_miles: exact,
            },
        );
        assert_eq!(names(&strict), vec!["Vail"]);

        // min_count 0 turns off relaxation, so only the cutoff decides
        let guaranteed = select_guaranteed_minimum(
            &denver_clinic,
            &resorts,
            &QueryConfig {
                limit: 5,
                max_miles: exact,
                min_count: 0,
            },
        );
        assert_eq!(names(&guaranteed), vec!["Vail"]);

        let guaranteed = select_guaranteed_minimum(
            &denver_clinic,
            &resorts,
            &QueryConfig {
                limit: 5,
                max_miles: exact - 0.001,
                min_count: 0,
            },
        );
        assert!(guaranteed.is_empty());
    }

    #[test]
    fn test_result_json_is_record_plus_distance() {
        let vail = resort("Vail", VAIL.latitude, VAIL.longitude);
        let clinics = vec![clinic("near", 39.641, -106.375)];
        let results = find_clinics_near_resort(&vail, &clinics, &QueryOverrides::default());

        let value = serde_json::to_value(&results[0]).unwrap();
        assert_eq!(value["facility"], "near");
        assert_eq!(value["lat"], 39.641);
        assert!(value["distance"].as_f64().unwrap() < 1.0);
    }
}
