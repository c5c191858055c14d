//! Tile load state for the current WMS layer.
//!
//! `Loading -> Loaded | Errored`. Any change of the layer key starts a new
//! load cycle from `Loading`, whatever the previous state was, and drops the
//! last click lookup.

use crate::click::{ClickTracker, Popup};
use crate::feature::FeatureValue;
use crate::wms::{GetMapParams, LatLng, LegendParams};
use climact_core::catalog::Domain;
use climact_core::query_key::map_layer_key;
use climact_core::selection::Selection;
use log::{debug, warn};

pub const MAP_UNAVAILABLE: &str = "Map unavailable";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileState {
    Loading,
    Loaded,
    Errored,
}

#[derive(Debug)]
pub struct MapPresenter {
    layer_key: Option<String>,
    state: TileState,
    get_map: Option<GetMapParams>,
    legend: Option<LegendParams>,
    clicks: ClickTracker,
}

impl Default for MapPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl MapPresenter {
    pub fn new() -> Self {
        Self {
            layer_key: None,
            state: TileState::Loading,
            get_map: None,
            legend: None,
            clicks: ClickTracker::new(),
        }
    }

    /// Follow the selection. Returns `true` when the layer changed and a
    /// new load cycle started.
    pub fn sync(&mut self, selection: &Selection) -> bool {
        let key = map_layer_key(selection);
        if self.layer_key.as_deref() == Some(key.as_str()) {
            return false;
        }
        debug!("map layer -> {}", key);
        self.layer_key = Some(key);
        self.state = TileState::Loading;
        self.get_map = Some(GetMapParams::for_selection(selection));
        self.legend = Some(LegendParams::for_selection(selection));
        self.clicks.clear();
        true
    }

    /// Record the value looked up by a single click on the current layer.
    pub fn on_click(&mut self, point: LatLng, value: FeatureValue) {
        if let Some(key) = &self.layer_key {
            self.clicks.record_click(key, point, value);
        }
    }

    pub fn on_double_click(&self, point: LatLng, domain: Option<Domain>) -> Option<Popup> {
        let key = self.layer_key.as_deref()?;
        self.clicks.double_click(key, point, domain)
    }

    pub fn on_tile_load(&mut self) {
        self.state = TileState::Loaded;
    }

    pub fn on_tile_error(&mut self) {
        warn!(
            "tile load failed for layer {}",
            self.layer_key.as_deref().unwrap_or("<none>")
        );
        self.state = TileState::Errored;
    }

    pub fn state(&self) -> TileState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == TileState::Loading
    }

    /// The only place a transport failure is shown to the viewer.
    pub fn status_message(&self) -> Option<&'static str> {
        (self.state == TileState::Errored).then_some(MAP_UNAVAILABLE)
    }

    pub fn layer_key(&self) -> Option<&str> {
        self.layer_key.as_deref()
    }

    pub fn get_map_params(&self) -> Option<&GetMapParams> {
        self.get_map.as_ref()
    }

    pub fn legend_params(&self) -> Option<&LegendParams> {
        self.legend.as_ref()
    }
}
