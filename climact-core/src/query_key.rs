//! Keys derived from a selection for the two external services.
//!
//! - tabular data service: `{domain}/{variable}/{period token}`
//! - WMS tile service: layer `{variable}_{period token}`
//!
//! The period token is `hist` for the historical period and
//! `{scenario}_{period}` for future periods. Keys are recomputed on every
//! selection change and never stored.

use crate::catalog::{DomainKind, DEFAULT_SCENARIO};
use crate::selection::Selection;
use std::fmt;

pub const HISTORICAL_TOKEN: &str = "hist";

pub fn period_token(selection: &Selection) -> String {
    match selection.time_period.domain_kind {
        DomainKind::Historical => HISTORICAL_TOKEN.to_string(),
        DomainKind::Future => {
            let scenario_id = selection
                .scenario
                .as_ref()
                .map(|s| s.id.as_str())
                .filter(|id| !id.is_empty())
                .unwrap_or(DEFAULT_SCENARIO.id);
            format!("{}_{}", scenario_id, selection.time_period.period_id)
        }
    }
}

/// Lookup key for the tabular data service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TabularKey {
    pub domain: String,
    pub variable_id: String,
    pub period_token: String,
}

impl TabularKey {
    pub fn path(&self) -> String {
        format!("{}/{}/{}", self.domain, self.variable_id, self.period_token)
    }
}

impl fmt::Display for TabularKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

pub fn tabular_key(selection: &Selection) -> TabularKey {
    TabularKey {
        domain: selection.variable.domain.clone(),
        variable_id: selection.variable.id.clone(),
        period_token: period_token(selection),
    }
}

/// WMS `LAYERS` / `QUERY_LAYERS` value.
pub fn map_layer_key(selection: &Selection) -> String {
    format!("{}_{}", selection.variable.id, period_token(selection))
}
