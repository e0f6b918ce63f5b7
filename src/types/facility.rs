//! Struct definitions for the records that can be placed on the map.
//!
//! A [`Resort`] is where a skier stays. A [`Clinic`] (dialysis) or a
//! [`Hospital`] is where they may need care. All three implement
//! [`Locatable`] so any of them can play the origin or the candidate in
//! a proximity query.
//!
//! Field names serialize in camelCase to match the JSON data files the
//! loading layer produces.

use serde::{Deserialize, Serialize};

use super::location::{GeoPoint, Locatable};

/// Ski pass network a resort belongs to.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PassNetwork {
    Epic,
    Ikon,
    Both,
    Independent,
}

/// Geographic region used to group resorts.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    Rockies,
    West,
    Northeast,
    Midwest,
    Southeast,
    PacificNorthwest,
    Other,
}

/// State abbreviations per region, checked in order.
const REGION_STATES: &[(Region, &[&str])] = &[
    (Region::Northeast, &["ME", "NH", "VT", "MA", "RI", "CT", "NY", "NJ", "PA"]),
    (Region::Southeast, &["WV", "VA", "NC", "TN", "GA"]),
    (
        Region::Midwest,
        &["OH", "MI", "IN", "IL", "WI", "MN", "IA", "MO", "ND", "SD", "NE", "KS"],
    ),
    (Region::Rockies, &["CO", "UT", "WY", "MT", "ID", "NM"]),
    (Region::West, &["CA", "NV", "AZ", "CA/NV"]),
    (Region::PacificNorthwest, &["WA", "OR"]),
];

impl Region {
    /// Maps a state abbreviation (case-insensitive) to its region.
    /// Unlisted states map to [`Region::Other`].
    pub fn from_state(state: &str) -> Region {
        let state = state.trim().to_uppercase();
        REGION_STATES
            .iter()
            .find(|(_, states)| states.contains(&state.as_str()))
            .map(|(region, _)| *region)
            .unwrap_or(Region::Other)
    }
}

/// Lowercase name fragments of Epic Pass resorts.
const EPIC_NAMES: &[&str] = &[
    "vail", "beaver creek", "breckenridge", "keystone", "crested butte", "park city",
    "heavenly", "northstar", "kirkwood", "stevens pass", "stowe", "okemo", "mount snow",
    "hunter mountain", "attitash", "wildcat", "mount sunapee", "crotched", "liberty mountain",
    "roundtop", "whitetail", "jack frost", "big boulder", "seven springs", "hidden valley",
    "laurel mountain", "wilmot", "afton alps", "mt brighton", "alpine valley", "boston mills",
    "brandywine", "mad river mountain", "snow creek", "paoli peaks", "telluride",
];

/// Lowercase name fragments of Ikon Pass resorts.
const IKON_NAMES: &[&str] = &[
    "aspen", "snowmass", "steamboat", "winter park", "copper mountain", "eldora",
    "jackson hole", "big sky", "alta", "snowbird", "deer valley", "brighton", "solitude",
    "taos", "palisades tahoe", "squaw valley", "alpine meadows", "mammoth", "june mountain",
    "big bear", "snow valley", "crystal mountain", "snoqualmie", "schweitzer", "stratton",
    "sugarbush", "killington", "pico", "sunday river", "sugarloaf", "loon mountain", "windham",
    "boyne highlands", "boyne mountain", "snowshoe",
];

impl PassNetwork {
    /// Classifies a resort by name with a case-insensitive substring
    /// search against the Epic and Ikon name lists. A name matching
    /// both lists is [`PassNetwork::Both`]; no match is
    /// [`PassNetwork::Independent`].
    pub fn classify(resort_name: &str) -> PassNetwork {
        let name = resort_name.to_lowercase();
        let is_epic = EPIC_NAMES.iter().any(|epic| name.contains(epic));
        let is_ikon = IKON_NAMES.iter().any(|ikon| name.contains(ikon));
        match (is_epic, is_ikon) {
            (true, true) => PassNetwork::Both,
            (true, false) => PassNetwork::Epic,
            (false, true) => PassNetwork::Ikon,
            (false, false) => PassNetwork::Independent,
        }
    }
}

/// Dialysis provider chain a clinic is operated by.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderChain {
    Davita,
    Fresenius,
    Independent,
    Other,
}

/// Substrings of a chain organization name, checked in order.
const PROVIDER_PATTERNS: &[(&str, ProviderChain)] = &[
    ("DAVITA", ProviderChain::Davita),
    ("FRESENIUS", ProviderChain::Fresenius),
    // Fresenius Medical Care
    ("FMC", ProviderChain::Fresenius),
    ("DIALYSIS CLINIC", ProviderChain::Independent),
];

/// Classifies a free-form chain organization name into a
/// [`ProviderChain`].
///
/// Matching is a case-insensitive substring search. Empty or unknown
/// names map to [`ProviderChain::Other`].
pub fn classify_provider(chain_name: &str) -> ProviderChain {
    let upper = chain_name.trim().to_uppercase();
    if upper.is_empty() {
        return ProviderChain::Other;
    }
    PROVIDER_PATTERNS
        .iter()
        .find(|(pattern, _)| upper.contains(pattern))
        .map(|(_, chain)| *chain)
        .unwrap_or(ProviderChain::Other)
}

/// A ski resort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resort {
    /// Synthetic id in the form `name|state`.
    pub id: String,
    pub name: String,
    pub state: String,
    #[serde(flatten)]
    pub location: GeoPoint,
    pub pass_network: PassNetwork,
    pub region: Region,
}

impl Resort {
    /// Builds a resort with the synthetic `name|state` id.
    pub fn new(
        name: &str,
        state: &str,
        location: GeoPoint,
        pass_network: PassNetwork,
        region: Region,
    ) -> Self {
        Resort {
            id: format!("{}|{}", name, state),
            name: name.to_string(),
            state: state.to_string(),
            location,
            pass_network,
            region,
        }
    }
}

impl Locatable for Resort {
    fn location(&self) -> GeoPoint {
        self.location
    }

    fn get_uid(&self) -> String {
        self.id.clone()
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

/// A dialysis clinic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clinic {
    /// CMS Certification Number.
    pub ccn: String,
    pub facility: String,
    pub provider: ProviderChain,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub zip: String,
    #[serde(flatten)]
    pub location: GeoPoint,

    /// Name of the closest resort, see
    /// [`annotate_nearest_resort`](crate::algorithms::selector::annotate_nearest_resort).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearest_resort: Option<String>,

    /// Distance in miles to `nearest_resort`, rounded to 2 decimals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearest_resort_dist: Option<f64>,
}

impl Locatable for Clinic {
    fn location(&self) -> GeoPoint {
        self.location
    }

    fn get_uid(&self) -> String {
        self.ccn.clone()
    }

    fn display_name(&self) -> &str {
        &self.facility
    }
}

/// A hospital, usually one with an emergency department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    /// Slug of `name|state`, lowercased with dashes for spaces.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub zip: String,
    #[serde(flatten)]
    pub location: GeoPoint,
    pub has_emergency: bool,
    #[serde(default)]
    pub phone: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearest_resort: Option<String>,

    /// Distance in miles to `nearest_resort`, rounded to 1 decimal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearest_resort_dist: Option<f64>,
}

impl Hospital {
    /// Builds a hospital with the slug id and empty contact fields.
    pub fn new(name: &str, city: &str, state: &str, location: GeoPoint, has_emergency: bool) -> Self {
        Hospital {
            id: format!("{}|{}", name, state).replace(' ', "-").to_lowercase(),
            name: name.to_string(),
            address: String::new(),
            city: city.to_string(),
            state: state.to_string(),
            zip: String::new(),
            location,
            has_emergency,
            phone: String::new(),
            nearest_resort: None,
            nearest_resort_dist: None,
        }
    }
}

impl Locatable for Hospital {
    fn location(&self) -> GeoPoint {
        self.location
    }

    fn get_uid(&self) -> String {
        self.id.clone()
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}
