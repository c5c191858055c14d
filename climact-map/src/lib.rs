//! Map side of the ClimACT viewer.
//!
//! This crate provides:
//! - `style`: per-variable palette and color range table
//! - `wms`: GetMap, GetLegendGraphic and GetFeatureInfo parameters
//! - `tiles`: tile load state for the current layer
//! - `feature`: interpretation of feature-info values (classes, indices, measurements)
//! - `click`: single-click lookups and double-click popups
//! - `client` (feature `api`): HTTP client for the WMS endpoint

pub mod click;
pub mod feature;
pub mod style;
pub mod tiles;
pub mod wms;

#[cfg(feature = "api")]
pub mod client;
