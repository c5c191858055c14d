//! Serializable line chart description.
//!
//! Handed to the charting layer as JSON.

use crate::axis::{axis_bounds, tick_interval, value_extent};
use climact_core::catalog::DEFAULT_SCENARIO;
use climact_core::selection::Selection;
use climact_core::series::SeriesPoint;
use serde::Serialize;

pub const SERIES_COLOR: &str = "#6EA9C0";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YAxis {
    pub min: f64,
    pub max: f64,
    pub tick_interval: f64,
    /// Unit string, shown horizontally above the axis.
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub title: String,
    pub subtitle: String,
    pub series_name: String,
    /// Month labels in response order.
    pub categories: Vec<String>,
    pub values: Vec<f64>,
    /// One tooltip per point.
    pub tooltips: Vec<String>,
    pub y_axis: YAxis,
    pub color: &'static str,
}

impl ChartSpec {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// `"{month}: {value} {unit}"` with the value at one decimal.
pub fn tooltip(month: &str, value: f64, unit: &str) -> String {
    if unit.is_empty() {
        format!("{}: {:.1}", month, value)
    } else {
        format!("{}: {:.1} {}", month, value, unit)
    }
}

/// Label of the time axis the selection points at, e.g.
/// `"Future SSP2-4.5, 2046-2065"` or `"Historical, 1995-2014"`.
pub fn period_caption(selection: &Selection) -> String {
    let lead = if selection.is_historical() {
        "Historical"
    } else {
        selection
            .scenario
            .as_ref()
            .map(|s| s.label.as_str())
            .filter(|label| !label.is_empty())
            .unwrap_or(DEFAULT_SCENARIO.label)
    };
    format!("{}, {}", lead, selection.time_period.period_label)
}

/// Build the chart for `points`. An empty series has no chart.
pub fn build_chart(points: &[SeriesPoint], selection: &Selection) -> Option<ChartSpec> {
    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    let (lo, hi) = value_extent(&values)?;

    let domain = selection.variable.domain();
    let unit = domain.map(|d| d.unit()).unwrap_or("");
    let bounds = axis_bounds(lo, hi);
    let variable = &selection.variable;

    let title = match &variable.subgroup_name {
        Some(subgroup) => format!("{} - {} - {}", variable.group_name, subgroup, variable.option_label),
        None => format!("{} - {}", variable.group_name, variable.option_label),
    };
    let caption = period_caption(selection);

    Some(ChartSpec {
        series_name: format!("{} ({})", variable.option_label, caption),
        title,
        subtitle: caption,
        categories: points.iter().map(|p| p.month.clone()).collect(),
        tooltips: points.iter().map(|p| tooltip(&p.month, p.value, unit)).collect(),
        values,
        y_axis: YAxis {
            min: bounds.min,
            max: bounds.max,
            tick_interval: tick_interval(hi - lo, domain),
            title: unit.to_string(),
        },
        color: SERIES_COLOR,
    })
}
