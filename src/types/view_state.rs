//! UI state shared by the list and map views.
//!
//! [`ViewState`] is an immutable value. Every transition returns a new
//! state and leaves the old one untouched, so a rendering layer can
//! keep the previous state around or compare the two.
//!
//! Filter sets can never become empty: deactivating the last active
//! filter of a kind is refused with
//! [`ViewStateError::LastActiveFilter`].

use std::collections::BTreeSet;
use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::facility::{Clinic, PassNetwork, ProviderChain, Resort};

/// How results are presented.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    List,
    Map,
}

/// Errors returned by [`ViewState`] transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewStateError {
    /// The toggle would leave a filter set with no active members.
    #[error("cannot deactivate {value}: it is the last active {filter} filter")]
    LastActiveFilter { filter: &'static str, value: String },
}

/// A single state transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum ViewAction {
    SetViewMode(ViewMode),
    /// Selects a record by uid, or clears the selection.
    Select(Option<String>),
    /// Expands a record by uid, or collapses it if it is already
    /// expanded.
    ToggleExpanded(String),
    TogglePassNetwork(PassNetwork),
    ToggleProvider(ProviderChain),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub view_mode: ViewMode,
    pub selected_id: Option<String>,
    pub expanded_id: Option<String>,
    pub pass_networks: BTreeSet<PassNetwork>,
    pub providers: BTreeSet<ProviderChain>,
}

impl Default for ViewState {
    /// List view, nothing selected, every filter active.
    fn default() -> Self {
        ViewState {
            view_mode: ViewMode::default(),
            selected_id: None,
            expanded_id: None,
            pass_networks: [
                PassNetwork::Epic,
                PassNetwork::Ikon,
                PassNetwork::Both,
                PassNetwork::Independent,
            ]
            .into_iter()
            .collect(),
            providers: [
                ProviderChain::Davita,
                ProviderChain::Fresenius,
                ProviderChain::Independent,
                ProviderChain::Other,
            ]
            .into_iter()
            .collect(),
        }
    }
}

impl ViewState {
    /// Applies `action` and returns the resulting state.
    pub fn reduce(&self, action: ViewAction) -> Result<ViewState, ViewStateError> {
        debug!("action: {:?}", action);
        match action {
            ViewAction::SetViewMode(mode) => Ok(self.with_view_mode(mode)),
            ViewAction::Select(id) => Ok(self.select(id)),
            ViewAction::ToggleExpanded(id) => Ok(self.toggle_expanded(&id)),
            ViewAction::TogglePassNetwork(network) => self.toggle_pass_network(network),
            ViewAction::ToggleProvider(provider) => self.toggle_provider(provider),
        }
    }

    pub fn with_view_mode(&self, view_mode: ViewMode) -> ViewState {
        ViewState {
            view_mode,
            ..self.clone()
        }
    }

    pub fn select(&self, id: Option<String>) -> ViewState {
        ViewState {
            selected_id: id,
            ..self.clone()
        }
    }

    pub fn toggle_expanded(&self, id: &str) -> ViewState {
        let expanded_id = match &self.expanded_id {
            Some(current) if current == id => None,
            _ => Some(id.to_string()),
        };
        ViewState {
            expanded_id,
            ..self.clone()
        }
    }

    pub fn toggle_pass_network(&self, network: PassNetwork) -> Result<ViewState, ViewStateError> {
        Ok(ViewState {
            pass_networks: toggle_member(&self.pass_networks, network, "pass network")?,
            ..self.clone()
        })
    }

    pub fn toggle_provider(&self, provider: ProviderChain) -> Result<ViewState, ViewStateError> {
        Ok(ViewState {
            providers: toggle_member(&self.providers, provider, "provider")?,
            ..self.clone()
        })
    }

    /// Returns true if the resort passes the active pass-network filters.
    pub fn shows_resort(&self, resort: &Resort) -> bool {
        self.pass_networks.contains(&resort.pass_network)
    }

    /// Returns true if the clinic passes the active provider filters.
    pub fn shows_clinic(&self, clinic: &Clinic) -> bool {
        self.providers.contains(&clinic.provider)
    }
}

/// Adds `value` to a copy of `set`, or removes it if present. Removing
/// the only member is refused.
fn toggle_member<T: Ord + Copy + Debug>(
    set: &BTreeSet<T>,
    value: T,
    filter: &'static str,
) -> Result<BTreeSet<T>, ViewStateError> {
    let mut next = set.clone();
    if next.contains(&value) {
        if next.len() == 1 {
            warn!("refusing to deactivate the last {} filter", filter);
            return Err(ViewStateError::LastActiveFilter {
                filter,
                value: format!("{:?}", value),
            });
        }
        next.remove(&value);
    } else {
        next.insert(value);
    }
    Ok(next)
}
