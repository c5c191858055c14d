//! The fixed catalog of selectable variables, time periods and scenarios.
//!
//! Every identifier that ends up in a REST path or a WMS layer name comes
//! from the tables in this module. The tables are indexed by enum
//! discriminant so that adding a variant without a table row fails to
//! compile (the array length no longer matches `VariableId::COUNT`).

use serde::{Deserialize, Serialize};

/// Coarse category of a variable. Selects units, axis titles and the way a
/// map feature value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Domain {
    #[serde(rename = "TEMPS")]
    Temperature,
    #[serde(rename = "NDAYS")]
    DayCount,
    #[serde(rename = "FWI")]
    FireWeather,
    #[serde(rename = "WS")]
    WindSpeed,
    #[serde(rename = "ENERGY")]
    Energy,
    #[serde(rename = "KOPPEN")]
    Koppen,
    #[serde(rename = "TREWARTHA")]
    Trewartha,
    #[serde(rename = "UNEP")]
    Aridity,
}

impl Domain {
    pub const ALL: [Domain; 8] = [
        Domain::Temperature,
        Domain::DayCount,
        Domain::FireWeather,
        Domain::WindSpeed,
        Domain::Energy,
        Domain::Koppen,
        Domain::Trewartha,
        Domain::Aridity,
    ];

    /// Wire code used in REST paths and persisted selections.
    pub fn code(self) -> &'static str {
        match self {
            Domain::Temperature => "TEMPS",
            Domain::DayCount => "NDAYS",
            Domain::FireWeather => "FWI",
            Domain::WindSpeed => "WS",
            Domain::Energy => "ENERGY",
            Domain::Koppen => "KOPPEN",
            Domain::Trewartha => "TREWARTHA",
            Domain::Aridity => "UNEP",
        }
    }

    pub fn from_code(code: &str) -> Option<Domain> {
        Domain::ALL.into_iter().find(|d| d.code() == code)
    }

    /// Unit string shown on chart axes, tooltips and map popups.
    /// Classification and index domains are dimensionless.
    pub fn unit(self) -> &'static str {
        match self {
            Domain::Temperature => "°C",
            Domain::DayCount | Domain::FireWeather => "days",
            Domain::WindSpeed => "m/s",
            Domain::Energy => "kWh/m²",
            Domain::Koppen | Domain::Trewartha | Domain::Aridity => "",
        }
    }

    pub fn is_energy(self) -> bool {
        self == Domain::Energy
    }

    /// Domains whose values are categorical class codes.
    pub fn is_classification(self) -> bool {
        matches!(self, Domain::Koppen | Domain::Trewartha)
    }
}

/// Identifier of a catalog variable. The discriminant indexes [`VARIABLES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableId {
    T2Mean,
    T2Max,
    T2Min,
    SummerDays,
    TropicalNights,
    FrostDays,
    FireWeatherHigh,
    WindSpeed100,
    Ghi,
    Dni,
    Koppen,
    Trewartha,
    AridityIndex,
}

impl VariableId {
    pub const COUNT: usize = 13;

    pub fn entry(self) -> &'static VariableEntry {
        &VARIABLES[self as usize]
    }

    pub fn code(self) -> &'static str {
        self.entry().code
    }

    pub fn domain(self) -> Domain {
        self.entry().domain
    }

    pub fn from_code(code: &str) -> Option<VariableId> {
        VARIABLES.iter().find(|v| v.code == code).map(|v| v.id)
    }

    pub fn all() -> impl Iterator<Item = VariableId> {
        VARIABLES.iter().map(|v| v.id)
    }
}

/// One row of the variable catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableEntry {
    pub id: VariableId,
    /// Identifier used in REST paths and WMS layer names.
    pub code: &'static str,
    pub domain: Domain,
    pub group_name: &'static str,
    pub subgroup_name: Option<&'static str>,
    pub option_label: &'static str,
}

const fn variable(
    id: VariableId,
    code: &'static str,
    domain: Domain,
    group_name: &'static str,
    subgroup_name: Option<&'static str>,
    option_label: &'static str,
) -> VariableEntry {
    VariableEntry {
        id,
        code,
        domain,
        group_name,
        subgroup_name,
        option_label,
    }
}

pub static VARIABLES: [VariableEntry; VariableId::COUNT] = [
    variable(VariableId::T2Mean, "T2MEAN", Domain::Temperature, "Temperature", None, "Mean"),
    variable(VariableId::T2Max, "T2MAX", Domain::Temperature, "Temperature", None, "Maximum"),
    variable(VariableId::T2Min, "T2MIN", Domain::Temperature, "Temperature", None, "Minimum"),
    variable(
        VariableId::SummerDays,
        "SU",
        Domain::DayCount,
        "Extreme Events",
        Some("Number of days"),
        "Summer days",
    ),
    variable(
        VariableId::TropicalNights,
        "TR",
        Domain::DayCount,
        "Extreme Events",
        Some("Number of days"),
        "Tropical nights",
    ),
    variable(
        VariableId::FrostDays,
        "FD",
        Domain::DayCount,
        "Extreme Events",
        Some("Number of days"),
        "Frost days",
    ),
    variable(
        VariableId::FireWeatherHigh,
        "FWI_HIGH",
        Domain::FireWeather,
        "Extreme Events",
        Some("Fire weather"),
        "High fire danger days",
    ),
    variable(VariableId::WindSpeed100, "WS100", Domain::WindSpeed, "Wind", None, "Wind speed at 100 m"),
    variable(
        VariableId::Ghi,
        "GHI",
        Domain::Energy,
        "Energy",
        Some("Solar"),
        "Global horizontal irradiation",
    ),
    variable(
        VariableId::Dni,
        "DNI",
        Domain::Energy,
        "Energy",
        Some("Solar"),
        "Direct normal irradiation",
    ),
    variable(
        VariableId::Koppen,
        "KOPPEN",
        Domain::Koppen,
        "Climate Classification",
        None,
        "Köppen-Geiger",
    ),
    variable(
        VariableId::Trewartha,
        "TREWARTHA",
        Domain::Trewartha,
        "Climate Classification",
        None,
        "Trewartha",
    ),
    variable(
        VariableId::AridityIndex,
        "UNEP_AI",
        Domain::Aridity,
        "Climate Classification",
        None,
        "Aridity index (UNEP)",
    ),
];

/// Whether a time period is the historical reference or a future projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainKind {
    Historical,
    Future,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodEntry {
    pub kind: DomainKind,
    pub label: &'static str,
    pub id: &'static str,
}

pub static PERIODS: [PeriodEntry; 3] = [
    PeriodEntry {
        kind: DomainKind::Historical,
        label: "1995-2014",
        id: "1995_2014",
    },
    PeriodEntry {
        kind: DomainKind::Future,
        label: "2046-2065",
        id: "2046_2065",
    },
    PeriodEntry {
        kind: DomainKind::Future,
        label: "2081-2100",
        id: "2081_2100",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioEntry {
    pub label: &'static str,
    pub id: &'static str,
}

pub static SCENARIOS: [ScenarioEntry; 3] = [
    ScenarioEntry {
        label: "Future SSP2-4.5",
        id: "ssp245",
    },
    ScenarioEntry {
        label: "Future SSP3-7.0",
        id: "ssp370",
    },
    ScenarioEntry {
        label: "Future SSP5-8.5",
        id: "ssp585",
    },
];

pub static DEFAULT_PERIOD: &PeriodEntry = &PERIODS[1];
pub static DEFAULT_SCENARIO: &ScenarioEntry = &SCENARIOS[0];
pub const DEFAULT_VARIABLE: VariableId = VariableId::T2Mean;

pub fn find_period(id: &str) -> Option<&'static PeriodEntry> {
    PERIODS.iter().find(|p| p.id == id)
}

pub fn find_scenario(id: &str) -> Option<&'static ScenarioEntry> {
    SCENARIOS.iter().find(|s| s.id == id)
}

/// Aggregations the climatologies are averaged over. Only annual means are
/// published.
pub static TEMPORAL_MEANS: [&str; 1] = ["annual"];
pub const DEFAULT_TEMPORAL_MEAN: &str = "annual";

/// Temperature rasters are published in kelvin.
pub const KELVIN_OFFSET: f64 = 273.15;

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}
