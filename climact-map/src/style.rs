//! Palette and color range per variable.
//!
//! Temperature ranges are in kelvin, the unit of the published rasters.

use climact_core::catalog::VariableId;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleDescriptor {
    pub palette: &'static str,
    pub style_name: &'static str,
    pub color_scale_range: [f64; 2],
}

/// Used for any variable code outside the catalog.
pub const DEFAULT_STYLE: StyleDescriptor = StyleDescriptor {
    palette: "default",
    style_name: "default-scalar/default",
    color_scale_range: [278.15, 303.15],
};

const fn style(palette: &'static str, style_name: &'static str, min: f64, max: f64) -> StyleDescriptor {
    StyleDescriptor {
        palette,
        style_name,
        color_scale_range: [min, max],
    }
}

/// Indexed by `VariableId` discriminant.
pub static STYLES: [StyleDescriptor; VariableId::COUNT] = [
    // T2MEAN, T2MAX, T2MIN
    style("default", "default-scalar/default", 282.15, 302.15),
    style("default", "default-scalar/default", 284.15, 302.15),
    style("default", "default-scalar/default", 280.15, 295.15),
    // SU, TR, FD
    style("seq-YlOrRd", "default-scalar/seq-YlOrRd", 0.0, 180.0),
    style("seq-YlOrRd", "default-scalar/seq-YlOrRd", 0.0, 120.0),
    style("seq-Blues", "default-scalar/seq-Blues", 0.0, 60.0),
    // FWI_HIGH
    style("seq-OrRd", "default-scalar/seq-OrRd", 0.0, 90.0),
    // WS100
    style("seq-BuPu", "default-scalar/seq-BuPu", 3.0, 10.0),
    // GHI, DNI
    style("psu-inferno", "default-scalar/psu-inferno", 1400.0, 2200.0),
    style("psu-inferno", "default-scalar/psu-inferno", 1600.0, 2800.0),
    // KOPPEN, TREWARTHA
    style("div-Spectral", "default-scalar/div-Spectral", 1.0, 30.0),
    style("div-Spectral", "default-scalar/div-Spectral", 1.0, 13.0),
    // UNEP_AI
    style("div-BrBG", "default-scalar/div-BrBG", 0.0, 1.0),
];

pub fn style_for(id: VariableId) -> &'static StyleDescriptor {
    &STYLES[id as usize]
}

/// Style for a variable code; unknown codes get [`DEFAULT_STYLE`].
pub fn layer_params(variable_code: &str) -> StyleDescriptor {
    match VariableId::from_code(variable_code) {
        Some(id) => *style_for(id),
        None => {
            log::debug!("no style for {}, using default", variable_code);
            DEFAULT_STYLE
        }
    }
}
