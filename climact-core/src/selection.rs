//! Selection state: the chosen time period, scenario and variable.
//!
//! `Selection` is an immutable value updated through [`Selection::reduce`].
//! [`SelectionStore`] owns the current value plus a storage backend and
//! writes each changed sub-state back to storage after every dispatch.

use crate::catalog::{
    Domain, DomainKind, PeriodEntry, ScenarioEntry, VariableId, DEFAULT_PERIOD, DEFAULT_SCENARIO,
    DEFAULT_TEMPORAL_MEAN, DEFAULT_VARIABLE,
};
use crate::persist::KeyValueStore;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Storage key of the persisted time period.
pub const TIME_PERIOD_KEY: &str = "selectedTimePeriod";
/// Storage key of the persisted future scenario.
pub const SCENARIO_KEY: &str = "selectedFutureScenario";
/// Storage key of the persisted variable.
pub const VARIABLE_KEY: &str = "selectedVariable";

/// Widest viewport, in CSS pixels, that still counts as compact.
pub const COMPACT_MAX_WIDTH: u32 = 768;

pub fn is_compact_width(width: u32) -> bool {
    width <= COMPACT_MAX_WIDTH
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimePeriod {
    pub domain_kind: DomainKind,
    pub period_label: String,
    pub period_id: String,
}

impl From<&PeriodEntry> for TimePeriod {
    fn from(entry: &PeriodEntry) -> Self {
        Self {
            domain_kind: entry.kind,
            period_label: entry.label.to_string(),
            period_id: entry.id.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub label: String,
    pub id: String,
}

impl From<&ScenarioEntry> for Scenario {
    fn from(entry: &ScenarioEntry) -> Self {
        Self {
            label: entry.label.to_string(),
            id: entry.id.to_string(),
        }
    }
}

/// The selected variable. The five fields always change together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub group_name: String,
    pub subgroup_name: Option<String>,
    pub domain: String,
    pub option_label: String,
    pub id: String,
}

impl Variable {
    /// Resolve the catalog domain, `None` if the stored code is unknown.
    pub fn domain(&self) -> Option<Domain> {
        Domain::from_code(&self.domain)
    }

    pub fn catalog_id(&self) -> Option<VariableId> {
        VariableId::from_code(&self.id)
    }
}

impl From<VariableId> for Variable {
    fn from(id: VariableId) -> Self {
        let entry = id.entry();
        Self {
            group_name: entry.group_name.to_string(),
            subgroup_name: entry.subgroup_name.map(str::to_string),
            domain: entry.domain.code().to_string(),
            option_label: entry.option_label.to_string(),
            id: entry.code.to_string(),
        }
    }
}

/// The full selection. `scenario` only matters for future periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub time_period: TimePeriod,
    pub scenario: Option<Scenario>,
    pub variable: Variable,
    /// Aggregation the climatology is averaged over, e.g. `annual`.
    pub temporal_mean: String,
    pub is_compact: bool,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            time_period: TimePeriod::from(DEFAULT_PERIOD),
            scenario: Some(Scenario::from(DEFAULT_SCENARIO)),
            variable: Variable::from(DEFAULT_VARIABLE),
            temporal_mean: DEFAULT_TEMPORAL_MEAN.to_string(),
            is_compact: false,
        }
    }
}

/// A discrete user action.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetTimePeriod(TimePeriod),
    SetScenario(Scenario),
    SetVariable(Variable),
    SetTemporalMean(String),
    SetViewportClass { is_compact: bool },
}

impl Action {
    /// Storage key and serialized payload for actions that touch persisted
    /// state. The temporal mean lives for the session only and the viewport
    /// flag is derived from the window, so neither is stored.
    fn persisted(&self) -> Option<(&'static str, serde_json::Result<String>)> {
        match self {
            Action::SetTimePeriod(period) => Some((TIME_PERIOD_KEY, serde_json::to_string(period))),
            Action::SetScenario(scenario) => Some((SCENARIO_KEY, serde_json::to_string(scenario))),
            Action::SetVariable(variable) => Some((VARIABLE_KEY, serde_json::to_string(variable))),
            Action::SetTemporalMean(_) | Action::SetViewportClass { .. } => None,
        }
    }
}

impl Selection {
    pub fn is_historical(&self) -> bool {
        self.time_period.domain_kind == DomainKind::Historical
    }

    /// Whether `action` changes anything when applied to this state.
    ///
    /// Setting a scenario while a historical period is selected is a no-op:
    /// historical data has no scenario dimension.
    pub fn accepts(&self, action: &Action) -> bool {
        !matches!(action, Action::SetScenario(_) if self.is_historical())
    }

    /// Pure transition function.
    pub fn reduce(self, action: Action) -> Selection {
        if !self.accepts(&action) {
            return self;
        }
        match action {
            Action::SetTimePeriod(time_period) => Selection {
                time_period,
                ..self
            },
            Action::SetScenario(scenario) => Selection {
                scenario: Some(scenario),
                ..self
            },
            Action::SetVariable(variable) => Selection { variable, ..self },
            Action::SetTemporalMean(temporal_mean) => Selection {
                temporal_mean,
                ..self
            },
            Action::SetViewportClass { is_compact } => Selection { is_compact, ..self },
        }
    }
}

/// Outcome of [`SelectionStore::dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Applied,
    Ignored,
}

/// Owns the current selection and persists each change.
pub struct SelectionStore<S> {
    state: Selection,
    storage: S,
}

impl<S: KeyValueStore> SelectionStore<S> {
    /// Seed the selection from storage. Missing or unreadable entries fall
    /// back to the catalog defaults one sub-state at a time.
    pub fn load(storage: S) -> Self {
        let defaults = Selection::default();
        let state = Selection {
            time_period: read(&storage, TIME_PERIOD_KEY).unwrap_or(defaults.time_period),
            scenario: read(&storage, SCENARIO_KEY).or(defaults.scenario),
            variable: read(&storage, VARIABLE_KEY).unwrap_or(defaults.variable),
            temporal_mean: defaults.temporal_mean,
            is_compact: defaults.is_compact,
        };
        Self { state, storage }
    }

    pub fn state(&self) -> &Selection {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn dispatch(&mut self, action: Action) -> Dispatch {
        if !self.state.accepts(&action) {
            warn!("ignoring {:?}: a historical period has no scenario", action);
            return Dispatch::Ignored;
        }
        let persisted = action.persisted();
        self.state = std::mem::take(&mut self.state).reduce(action);

        if let Some((key, payload)) = persisted {
            // Best-effort: a failed write leaves the in-memory state authoritative.
            match payload {
                Ok(json) => {
                    if let Err(e) = self.storage.set(key, &json) {
                        debug!("could not persist {}: {}", key, e);
                    }
                }
                Err(e) => debug!("could not serialize {}: {}", key, e),
            }
        }
        Dispatch::Applied
    }

    pub fn set_time_period(
        &mut self,
        domain_kind: DomainKind,
        period_label: &str,
        period_id: &str,
    ) -> Dispatch {
        self.dispatch(Action::SetTimePeriod(TimePeriod {
            domain_kind,
            period_label: period_label.to_string(),
            period_id: period_id.to_string(),
        }))
    }

    pub fn set_scenario(&mut self, label: &str, id: &str) -> Dispatch {
        self.dispatch(Action::SetScenario(Scenario {
            label: label.to_string(),
            id: id.to_string(),
        }))
    }

    pub fn set_variable(
        &mut self,
        group_name: &str,
        subgroup_name: Option<&str>,
        domain: &str,
        option_label: &str,
        id: &str,
    ) -> Dispatch {
        self.dispatch(Action::SetVariable(Variable {
            group_name: group_name.to_string(),
            subgroup_name: subgroup_name.map(str::to_string),
            domain: domain.to_string(),
            option_label: option_label.to_string(),
            id: id.to_string(),
        }))
    }

    pub fn set_temporal_mean(&mut self, temporal_mean: &str) -> Dispatch {
        self.dispatch(Action::SetTemporalMean(temporal_mean.to_string()))
    }

    pub fn set_viewport_class(&mut self, is_compact: bool) -> Dispatch {
        self.dispatch(Action::SetViewportClass { is_compact })
    }
}

fn read<T: DeserializeOwned>(storage: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = storage.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("discarding persisted {}: {}", key, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{find_period, find_scenario, PERIODS};
    use crate::persist::{MemoryStore, PersistError};

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), PersistError> {
            Err(PersistError::Unavailable("read-only".to_string()))
        }
    }

    fn historical() -> TimePeriod {
        TimePeriod::from(&PERIODS[0])
    }

    #[test]
    fn reduce_replaces_time_period() {
        let next = Selection::default().reduce(Action::SetTimePeriod(historical()));
        assert!(next.is_historical());
        assert_eq!(next.time_period.period_id, "1995_2014");
        assert_eq!(next.variable, Variable::from(DEFAULT_VARIABLE));
    }

    #[test]
    fn reduce_replaces_variable_atomically() {
        let next = Selection::default().reduce(Action::SetVariable(Variable::from(VariableId::Koppen)));
        assert_eq!(next.variable.id, "KOPPEN");
        assert_eq!(next.variable.domain, "KOPPEN");
        assert_eq!(next.variable.group_name, "Climate Classification");
        assert_eq!(next.variable.subgroup_name, None);
    }

    #[test]
    fn scenario_is_ignored_while_historical() {
        let state = Selection::default().reduce(Action::SetTimePeriod(historical()));
        let scenario = Scenario::from(find_scenario("ssp585").unwrap());
        assert!(!state.accepts(&Action::SetScenario(scenario.clone())));
        let next = state.clone().reduce(Action::SetScenario(scenario));
        assert_eq!(next, state);
    }

    #[test]
    fn viewport_flag_follows_width() {
        assert!(is_compact_width(768));
        assert!(!is_compact_width(769));
        let next = Selection::default().reduce(Action::SetViewportClass { is_compact: true });
        assert!(next.is_compact);
    }

    #[test]
    fn temporal_mean_is_kept_for_the_session_only() {
        let next = Selection::default().reduce(Action::SetTemporalMean("annual".to_string()));
        assert_eq!(next.temporal_mean, "annual");

        let mut store = SelectionStore::load(MemoryStore::default());
        assert_eq!(store.set_temporal_mean("annual"), Dispatch::Applied);
        assert!(store.storage().is_empty());
        let reloaded = SelectionStore::load(store.into_storage());
        assert_eq!(reloaded.state().temporal_mean, DEFAULT_TEMPORAL_MEAN);
    }

    #[test]
    fn store_persists_each_changed_sub_state() {
        let mut store = SelectionStore::load(MemoryStore::default());
        store.set_scenario("Future SSP3-7.0", "ssp370");
        store.dispatch(Action::SetVariable(Variable::from(VariableId::Ghi)));
        store.set_viewport_class(true);

        let storage = store.storage();
        assert_eq!(
            storage.get(SCENARIO_KEY).as_deref(),
            Some(r#"{"label":"Future SSP3-7.0","id":"ssp370"}"#)
        );
        assert!(storage.get(VARIABLE_KEY).unwrap().contains("\"id\":\"GHI\""));
        assert!(storage.get(TIME_PERIOD_KEY).is_none());
        assert_eq!(storage.len(), 2);
    }

    #[test]
    fn store_reloads_what_it_persisted() {
        let mut store = SelectionStore::load(MemoryStore::default());
        let period = find_period("2081_2100").unwrap();
        store.set_time_period(period.kind, period.label, period.id);
        store.dispatch(Action::SetVariable(Variable::from(VariableId::FrostDays)));

        let reloaded = SelectionStore::load(store.into_storage());
        assert_eq!(reloaded.state().time_period.period_id, "2081_2100");
        assert_eq!(reloaded.state().variable.id, "FD");
        assert_eq!(reloaded.state().scenario, Some(Scenario::from(DEFAULT_SCENARIO)));
    }

    #[test]
    fn unreadable_storage_falls_back_per_key() {
        let mut storage = MemoryStore::default();
        storage.set(TIME_PERIOD_KEY, "{not json").unwrap();
        storage
            .set(VARIABLE_KEY, &serde_json::to_string(&Variable::from(VariableId::WindSpeed100)).unwrap())
            .unwrap();

        let store = SelectionStore::load(storage);
        assert_eq!(store.state().time_period, TimePeriod::from(DEFAULT_PERIOD));
        assert_eq!(store.state().variable.id, "WS100");
    }

    #[test]
    fn failed_writes_do_not_block_updates() {
        let mut store = SelectionStore::load(ReadOnlyStore);
        assert_eq!(store.set_variable("Wind", None, "WS", "Wind speed at 100 m", "WS100"), Dispatch::Applied);
        assert_eq!(store.state().variable.id, "WS100");
    }

    #[test]
    fn store_reports_ignored_scenario() {
        let mut store = SelectionStore::load(MemoryStore::default());
        store.dispatch(Action::SetTimePeriod(historical()));
        assert_eq!(store.set_scenario("Future SSP5-8.5", "ssp585"), Dispatch::Ignored);
        assert!(store.storage().get(SCENARIO_KEY).is_none());
        assert_eq!(store.state().scenario, Some(Scenario::from(DEFAULT_SCENARIO)));
    }
}
