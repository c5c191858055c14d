//! WMS request parameters for the selected layer.
//!
//! Parameters are returned as ordered `(name, value)` pairs; the HTTP layer
//! does the URL encoding.

use crate::style::{layer_params, StyleDescriptor};
use climact_core::catalog::{kelvin_to_celsius, Domain};
use climact_core::query_key::map_layer_key;
use climact_core::selection::Selection;

/// Color bands for continuous layers.
pub const CONTINUOUS_COLOR_BANDS: u32 = 250;

pub type QueryPairs = Vec<(&'static str, String)>;

/// Geographic point in EPSG:4326.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Visible map extent and its size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
    pub width: u32,
    pub height: u32,
}

/// Mainland Portugal at the initial zoom, centred near 39.5N 8W.
pub const DEFAULT_VIEWPORT: Viewport = Viewport {
    south: 36.8,
    west: -9.6,
    north: 42.2,
    east: -6.2,
    width: 600,
    height: 900,
};

impl Viewport {
    /// Pixel column and row of `point`, counted from the top-left corner.
    pub fn pixel(&self, point: LatLng) -> (i64, i64) {
        let i = (point.lng - self.west) / (self.east - self.west) * f64::from(self.width);
        let j = (self.north - point.lat) / (self.north - self.south) * f64::from(self.height);
        (i.round() as i64, j.round() as i64)
    }

    pub fn contains(&self, point: LatLng) -> bool {
        (self.south..=self.north).contains(&point.lat) && (self.west..=self.east).contains(&point.lng)
    }

    /// `south,west,north,east` (WMS 1.3.0 axis order for EPSG:4326).
    pub fn bbox(&self) -> String {
        format!("{},{},{},{}", self.south, self.west, self.north, self.east)
    }
}

fn color_bands(domain: Option<Domain>, style: &StyleDescriptor) -> u32 {
    match domain {
        Some(d) if d.is_classification() => {
            let [min, max] = style.color_scale_range;
            (max - min).round() as u32 + 1
        }
        _ => CONTINUOUS_COLOR_BANDS,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetMapParams {
    pub layer: String,
    pub style: StyleDescriptor,
    pub color_bands: u32,
}

impl GetMapParams {
    pub fn for_selection(selection: &Selection) -> Self {
        let style = layer_params(&selection.variable.id);
        Self {
            layer: map_layer_key(selection),
            color_bands: color_bands(selection.variable.domain(), &style),
            style,
        }
    }

    /// Tile parameters without the per-tile `BBOX`/`WIDTH`/`HEIGHT`, which the
    /// tiling layer adds.
    pub fn query_pairs(&self) -> QueryPairs {
        let [min, max] = self.style.color_scale_range;
        vec![
            ("SERVICE", "WMS".to_string()),
            ("REQUEST", "GetMap".to_string()),
            ("VERSION", "1.1.1".to_string()),
            ("LAYERS", self.layer.clone()),
            ("STYLES", self.style.style_name.to_string()),
            ("PALETTE", self.style.palette.to_string()),
            ("COLORSCALERANGE", format!("{},{}", min, max)),
            ("NUMCOLORBANDS", self.color_bands.to_string()),
            ("FORMAT", "image/png".to_string()),
            ("TRANSPARENT", "true".to_string()),
            ("INTERPOLATION", "bilinear".to_string()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendParams {
    pub layer: String,
    pub palette: &'static str,
    pub style_name: &'static str,
    /// In display units: temperature legends are labelled in °C.
    pub color_scale_range: [f64; 2],
}

impl LegendParams {
    pub fn for_selection(selection: &Selection) -> Self {
        let style = layer_params(&selection.variable.id);
        let [min, max] = style.color_scale_range;
        let color_scale_range = if selection.variable.domain() == Some(Domain::Temperature) {
            [kelvin_to_celsius(min), kelvin_to_celsius(max)]
        } else {
            [min, max]
        };
        Self {
            layer: map_layer_key(selection),
            palette: style.palette,
            style_name: style.style_name,
            color_scale_range,
        }
    }

    pub fn query_pairs(&self) -> QueryPairs {
        let [min, max] = self.color_scale_range;
        vec![
            ("REQUEST", "GetLegendGraphic".to_string()),
            ("LAYER", self.layer.clone()),
            ("PALETTE", self.palette.to_string()),
            ("STYLES", self.style_name.to_string()),
            ("COLORSCALERANGE", format!("{:.2},{:.2}", min, max)),
        ]
    }
}

/// Point query against the current layer.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureInfoRequest {
    pub layer: String,
    pub viewport: Viewport,
    pub point: LatLng,
}

impl FeatureInfoRequest {
    pub fn new(selection: &Selection, viewport: Viewport, point: LatLng) -> Self {
        Self {
            layer: map_layer_key(selection),
            viewport,
            point,
        }
    }

    pub fn query_pairs(&self) -> QueryPairs {
        let (i, j) = self.viewport.pixel(self.point);
        vec![
            ("REQUEST", "GetFeatureInfo".to_string()),
            ("SERVICE", "WMS".to_string()),
            ("VERSION", "1.3.0".to_string()),
            ("LAYERS", self.layer.clone()),
            ("QUERY_LAYERS", self.layer.clone()),
            ("INFO_FORMAT", "text/plain".to_string()),
            ("I", i.to_string()),
            ("J", j.to_string()),
            ("CRS", "EPSG:4326".to_string()),
            ("WIDTH", self.viewport.width.to_string()),
            ("HEIGHT", self.viewport.height.to_string()),
            ("BBOX", self.viewport.bbox()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use climact_core::catalog::{VariableId, PERIODS};
    use climact_core::selection::{Action, TimePeriod, Variable};

    fn param<'a>(pairs: &'a QueryPairs, name: &str) -> &'a str {
        pairs
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
            .unwrap_or_else(|| panic!("missing {}", name))
    }

    #[test]
    fn get_map_for_default_selection() {
        let pairs = GetMapParams::for_selection(&Selection::default()).query_pairs();
        assert_eq!(param(&pairs, "LAYERS"), "T2MEAN_ssp245_2046_2065");
        assert_eq!(param(&pairs, "STYLES"), "default-scalar/default");
        assert_eq!(param(&pairs, "COLORSCALERANGE"), "282.15,302.15");
        assert_eq!(param(&pairs, "NUMCOLORBANDS"), "250");
    }

    #[test]
    fn classification_layers_use_one_band_per_class() {
        let selection = Selection::default().reduce(Action::SetVariable(Variable::from(VariableId::Koppen)));
        assert_eq!(GetMapParams::for_selection(&selection).color_bands, 30);
        let selection = Selection::default().reduce(Action::SetVariable(Variable::from(VariableId::Trewartha)));
        assert_eq!(GetMapParams::for_selection(&selection).color_bands, 13);
    }

    #[test]
    fn temperature_legend_is_in_celsius() {
        let pairs = LegendParams::for_selection(&Selection::default()).query_pairs();
        assert_eq!(param(&pairs, "REQUEST"), "GetLegendGraphic");
        assert_eq!(param(&pairs, "COLORSCALERANGE"), "9.00,29.00");

        let selection = Selection::default().reduce(Action::SetVariable(Variable::from(VariableId::FrostDays)));
        let pairs = LegendParams::for_selection(&selection).query_pairs();
        assert_eq!(param(&pairs, "COLORSCALERANGE"), "0.00,60.00");
    }

    #[test]
    fn feature_info_pixel_position() {
        let viewport = Viewport {
            south: 38.0,
            west: -10.0,
            north: 42.0,
            east: -6.0,
            width: 400,
            height: 400,
        };
        let point = LatLng { lat: 41.0, lng: -9.0 };
        assert_eq!(viewport.pixel(point), (100, 100));
        assert!(viewport.contains(point));
        assert!(!viewport.contains(LatLng { lat: 43.0, lng: -9.0 }));

        let selection = Selection::default().reduce(Action::SetTimePeriod(TimePeriod::from(&PERIODS[0])));
        let pairs = FeatureInfoRequest::new(&selection, viewport, point).query_pairs();
        assert_eq!(param(&pairs, "QUERY_LAYERS"), "T2MEAN_hist");
        assert_eq!(param(&pairs, "I"), "100");
        assert_eq!(param(&pairs, "J"), "100");
        assert_eq!(param(&pairs, "BBOX"), "38,-10,42,-6");
        assert_eq!(param(&pairs, "INFO_FORMAT"), "text/plain");
    }
}
