//! Selection subcommands.

use anyhow::anyhow;
use climact_core::catalog::{
    find_period, find_scenario, VariableId, PERIODS, SCENARIOS, TEMPORAL_MEANS,
};
use climact_core::persist::KeyValueStore;
use climact_core::query_key::{map_layer_key, tabular_key};
use climact_core::selection::{
    is_compact_width, Action, Dispatch, Scenario, Selection, SelectionStore, TimePeriod, Variable,
};
use log::info;

pub fn describe(selection: &Selection) -> String {
    let period = &selection.time_period;
    let scenario = match (&selection.scenario, selection.is_historical()) {
        (_, true) => "-".to_string(),
        (Some(scenario), false) => format!("{} [{}]", scenario.label, scenario.id),
        (None, false) => "(default)".to_string(),
    };
    let variable = &selection.variable;
    let variable_path = match &variable.subgroup_name {
        Some(subgroup) => format!("{} / {} / {}", variable.group_name, subgroup, variable.option_label),
        None => format!("{} / {}", variable.group_name, variable.option_label),
    };
    let layout = if selection.is_compact { "compact" } else { "wide" };

    [
        format!("Period:   {} ({:?})", period.period_label, period.domain_kind),
        format!("Scenario: {}", scenario),
        format!("Variable: {} [{}]", variable_path, variable.id),
        format!("Mean:     {}", selection.temporal_mean),
        format!("Layout:   {}", layout),
        format!("Data:     {}", tabular_key(selection)),
        format!("Layer:    {}", map_layer_key(selection)),
    ]
    .join("\n")
}

pub fn set_period<S: KeyValueStore>(
    store: &mut SelectionStore<S>,
    id: &str,
) -> anyhow::Result<String> {
    let entry = find_period(id).ok_or_else(|| anyhow!("unknown period {}", id))?;
    store.dispatch(Action::SetTimePeriod(TimePeriod::from(entry)));
    info!("period set to {}", entry.id);
    Ok(describe(store.state()))
}

pub fn set_scenario<S: KeyValueStore>(
    store: &mut SelectionStore<S>,
    id: &str,
) -> anyhow::Result<String> {
    let entry = find_scenario(id).ok_or_else(|| anyhow!("unknown scenario {}", id))?;
    match store.dispatch(Action::SetScenario(Scenario::from(entry))) {
        Dispatch::Applied => Ok(describe(store.state())),
        Dispatch::Ignored => Ok(format!(
            "Scenario unchanged: {} is a historical period",
            store.state().time_period.period_label
        )),
    }
}

pub fn set_variable<S: KeyValueStore>(
    store: &mut SelectionStore<S>,
    code: &str,
) -> anyhow::Result<String> {
    let id = VariableId::from_code(code).ok_or_else(|| anyhow!("unknown variable {}", code))?;
    store.dispatch(Action::SetVariable(Variable::from(id)));
    info!("variable set to {}", id.code());
    Ok(describe(store.state()))
}

/// Layout class `selection` takes at `width`. The flag is derived on every
/// start and never written to the state file.
pub fn viewport_class(selection: &Selection, width: u32) -> String {
    let is_compact = is_compact_width(width);
    let selection = selection.clone().reduce(Action::SetViewportClass { is_compact });
    format!("{}px -> {}", width, if selection.is_compact { "compact" } else { "wide" })
}

pub fn catalog_listing() -> String {
    let mut lines = vec!["Periods:".to_string()];
    lines.extend(
        PERIODS
            .iter()
            .map(|period| format!("  {:<10} {} ({:?})", period.id, period.label, period.kind)),
    );
    lines.push("Scenarios:".to_string());
    lines.extend(
        SCENARIOS
            .iter()
            .map(|scenario| format!("  {:<10} {}", scenario.id, scenario.label)),
    );
    lines.push("Temporal means:".to_string());
    lines.extend(TEMPORAL_MEANS.iter().map(|mean| format!("  {}", mean)));
    lines.push("Variables:".to_string());
    lines.extend(VariableId::all().map(|id| {
        let entry = id.entry();
        let group = match entry.subgroup_name {
            Some(subgroup) => format!("{} / {}", entry.group_name, subgroup),
            None => entry.group_name.to_string(),
        };
        format!(
            "  {:<10} {:<10} {} / {}",
            entry.code,
            entry.domain.code(),
            group,
            entry.option_label
        )
    }));
    lines.join("\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use climact_core::persist::JsonFileStore;

    #[test]
    fn describe_default_selection() {
        let text = describe(&Selection::default());
        assert!(text.contains("Period:   2046-2065 (Future)"));
        assert!(text.contains("Scenario: Future SSP2-4.5 [ssp245]"));
        assert!(text.contains("Variable: Temperature / Mean [T2MEAN]"));
        assert!(text.contains("Mean:     annual"));
        assert!(text.contains("Data:     TEMPS/T2MEAN/ssp245_2046_2065"));
        assert!(text.ends_with("Layer:    T2MEAN_ssp245_2046_2065"));
    }

    #[test]
    fn selection_survives_between_invocations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut store = SelectionStore::load(JsonFileStore::open(&path));
        set_period(&mut store, "2081_2100").unwrap();
        set_scenario(&mut store, "ssp585").unwrap();
        set_variable(&mut store, "FWI_HIGH").unwrap();

        let store = SelectionStore::load(JsonFileStore::open(&path));
        let text = describe(store.state());
        assert!(text.contains("Data:     FWI/FWI_HIGH/ssp585_2081_2100"));
        assert!(text.contains("Layout:   wide"));
    }

    #[test]
    fn viewport_class_does_not_touch_the_state_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let store = SelectionStore::load(JsonFileStore::open(&path));

        assert_eq!(viewport_class(store.state(), 400), "400px -> compact");
        assert_eq!(viewport_class(store.state(), 768), "768px -> compact");
        assert_eq!(viewport_class(store.state(), 1280), "1280px -> wide");
        assert!(!path.exists());
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let mut store = SelectionStore::load(climact_core::persist::MemoryStore::default());
        assert!(set_period(&mut store, "2030_2050").is_err());
        assert!(set_scenario(&mut store, "ssp126").is_err());
        assert!(set_variable(&mut store, "PRECIP").is_err());
        assert_eq!(store.state(), &Selection::default());
    }

    #[test]
    fn scenario_while_historical_is_reported() {
        let mut store = SelectionStore::load(climact_core::persist::MemoryStore::default());
        set_period(&mut store, "1995_2014").unwrap();
        let message = set_scenario(&mut store, "ssp370").unwrap();
        assert_eq!(message, "Scenario unchanged: 1995-2014 is a historical period");
        assert!(describe(store.state()).contains("Layer:    T2MEAN_hist"));
    }

    #[test]
    fn catalog_lists_every_variable() {
        let listing = catalog_listing();
        assert_eq!(listing.lines().count(), 1 + 3 + 1 + 3 + 1 + 1 + 1 + VariableId::COUNT);
        assert!(listing.contains("Extreme Events / Fire weather / High fire danger days"));
    }
}
