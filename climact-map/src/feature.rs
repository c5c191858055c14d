//! Interpretation of GetFeatureInfo values.
//!
//! The plain-text response carries the raster value on a `Value:` line.
//! Classification domains map the integer code through a fixed class table,
//! the aridity index is bucketed into UNEP classes, and everything else is a
//! measurement rounded for display. Temperatures arrive in kelvin and are
//! shown in °C.

use climact_core::catalog::{kelvin_to_celsius, Domain};
use std::fmt;

/// Shown for points outside the data or codes outside the class tables.
pub const NOT_APPLICABLE: &str = "N/A";

/// Köppen-Geiger classes occurring over the map domain (Beck et al. numbering).
pub static KOPPEN_CLASSES: [(i64, &str); 13] = [
    (4, "BWh"),
    (5, "BWk"),
    (6, "BSh"),
    (7, "BSk"),
    (8, "Csa"),
    (9, "Csb"),
    (10, "Csc"),
    (14, "Cfa"),
    (15, "Cfb"),
    (18, "Dsb"),
    (22, "Dwb"),
    (26, "Dfb"),
    (29, "ET"),
];

pub static TREWARTHA_CLASSES: [(i64, &str); 13] = [
    (1, "Ar"),
    (2, "Aw"),
    (3, "BW"),
    (4, "BS"),
    (5, "Cs"),
    (6, "Cw"),
    (7, "Cf"),
    (8, "Do"),
    (9, "Dc"),
    (10, "Eo"),
    (11, "Ec"),
    (12, "Ft"),
    (13, "Fi"),
];

/// UNEP aridity classes as `(exclusive upper bound, label)`, ascending.
pub static ARIDITY_CLASSES: [(f64, &str); 6] = [
    (0.05, "Hyper-arid"),
    (0.2, "Arid"),
    (0.5, "Semi-arid"),
    (0.65, "Dry sub-humid"),
    (0.75, "Humid"),
    (f64::INFINITY, "Very humid"),
];

#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    /// A class from a classification table.
    Category { code: i64, label: &'static str },
    /// A bucketed index that keeps its raw value for display.
    Index { label: &'static str, value: f64 },
    /// A continuous value shown with `decimals` places.
    Measurement { value: f64, decimals: usize },
    NotApplicable,
}

impl FeatureValue {
    pub fn is_applicable(&self) -> bool {
        !matches!(self, FeatureValue::NotApplicable)
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Category { label, .. } => f.write_str(label),
            FeatureValue::Index { label, value } => write!(f, "{} ({:.2})", label, value),
            FeatureValue::Measurement { value, decimals } => write!(f, "{:.*}", decimals, value),
            FeatureValue::NotApplicable => f.write_str(NOT_APPLICABLE),
        }
    }
}

/// Number on the first `Value:` line, if it is a finite number.
pub fn parse_value_line(text: &str) -> Option<f64> {
    let line = text.lines().find(|line| line.contains("Value:"))?;
    let (_, rest) = line.split_once("Value:")?;
    let value: f64 = rest.split_whitespace().next()?.parse().ok()?;
    value.is_finite().then_some(value)
}

fn lookup_class(table: &'static [(i64, &'static str)], value: f64) -> FeatureValue {
    if value.fract() != 0.0 {
        return FeatureValue::NotApplicable;
    }
    let code = value as i64;
    table
        .iter()
        .find(|(c, _)| *c == code)
        .map(|&(code, label)| FeatureValue::Category { code, label })
        .unwrap_or(FeatureValue::NotApplicable)
}

pub fn aridity_class(value: f64) -> &'static str {
    ARIDITY_CLASSES
        .iter()
        .find(|(upper, _)| value < *upper)
        .map(|(_, label)| *label)
        .unwrap_or(ARIDITY_CLASSES[ARIDITY_CLASSES.len() - 1].1)
}

/// Interpret a numeric raster value for `domain`.
pub fn classify(domain: Option<Domain>, value: f64) -> FeatureValue {
    match domain {
        Some(Domain::Koppen) => lookup_class(&KOPPEN_CLASSES, value),
        Some(Domain::Trewartha) => lookup_class(&TREWARTHA_CLASSES, value),
        Some(Domain::Aridity) => FeatureValue::Index {
            label: aridity_class(value),
            value,
        },
        Some(Domain::Energy) => FeatureValue::Measurement { value, decimals: 2 },
        Some(Domain::Temperature) => FeatureValue::Measurement {
            value: kelvin_to_celsius(value),
            decimals: 1,
        },
        _ => FeatureValue::Measurement { value, decimals: 1 },
    }
}

/// Parse a text/plain feature-info response for the variable domain code.
pub fn interpret_feature_value(domain: &str, raw_text: &str) -> FeatureValue {
    match parse_value_line(raw_text) {
        Some(value) => classify(Domain::from_code(domain), value),
        None => FeatureValue::NotApplicable,
    }
}
