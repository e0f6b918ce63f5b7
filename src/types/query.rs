//! Query configuration for the proximity selectors.
//!
//! Each query resolves its configuration from the defaults plus the
//! fields the caller overrides. Nothing is remembered between calls: an
//! unset field always falls back to the default, never to the value a
//! previous call used.

use serde::{Deserialize, Serialize};

/// Default maximum number of results.
pub const DEFAULT_LIMIT: usize = 5;
/// Default distance cutoff in miles.
pub const DEFAULT_MAX_MILES: f64 = 100.0;
/// Default number of results a guaranteed-minimum query always returns
/// when that many candidates exist.
pub const DEFAULT_MIN_COUNT: usize = 3;

/// Fully resolved configuration of a guaranteed-minimum query.
#[derive(Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryConfig {
    /// Maximum number of results.
    pub limit: usize,
    /// Distance cutoff in miles.
    pub max_miles: f64,
    /// Minimum number of results, relaxing `max_miles` if needed.
    pub min_count: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        QueryConfig {
            limit: DEFAULT_LIMIT,
            max_miles: DEFAULT_MAX_MILES,
            min_count: DEFAULT_MIN_COUNT,
        }
    }
}

/// Fully resolved configuration of a strict-cutoff query.
///
/// There is no `min_count`: a strict query never relaxes its cutoff.
#[derive(Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrictQueryConfig {
    pub limit: usize,
    pub max_miles: f64,
}

impl Default for StrictQueryConfig {
    fn default() -> Self {
        StrictQueryConfig {
            limit: DEFAULT_LIMIT,
            max_miles: DEFAULT_MAX_MILES,
        }
    }
}

/// Partial overrides for a guaranteed-minimum query, as sent by the
/// filter controls. Unset fields take the defaults.
#[derive(Debug, PartialEq, Copy, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryOverrides {
    pub limit: Option<usize>,
    pub max_miles: Option<f64>,
    pub min_count: Option<usize>,
}

impl QueryOverrides {
    /// Merges the overrides over the defaults, field by field.
    pub fn resolve(&self) -> QueryConfig {
        let defaults = QueryConfig::default();
        QueryConfig {
            limit: self.limit.unwrap_or(defaults.limit),
            max_miles: self.max_miles.unwrap_or(defaults.max_miles),
            min_count: self.min_count.unwrap_or(defaults.min_count),
        }
    }
}

/// Partial overrides for a strict-cutoff query.
#[derive(Debug, PartialEq, Copy, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StrictQueryOverrides {
    pub limit: Option<usize>,
    pub max_miles: Option<f64>,
}

impl StrictQueryOverrides {
    /// Merges the overrides over the defaults, field by field.
    pub fn resolve(&self) -> StrictQueryConfig {
        let defaults = StrictQueryConfig::default();
        StrictQueryConfig {
            limit: self.limit.unwrap_or(defaults.limit),
            max_miles: self.max_miles.unwrap_or(defaults.max_miles),
        }
    }
}

impl From<QueryConfig> for QueryOverrides {
    fn from(config: QueryConfig) -> Self {
        QueryOverrides {
            limit: Some(config.limit),
            max_miles: Some(config.max_miles),
            min_count: Some(config.min_count),
        }
    }
}

impl From<StrictQueryConfig> for StrictQueryOverrides {
    fn from(config: StrictQueryConfig) -> Self {
        StrictQueryOverrides {
            limit: Some(config.limit),
            max_miles: Some(config.max_miles),
        }
    }
}
