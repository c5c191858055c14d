//! Turns monthly climatology series into chart descriptions.
//!
//! - `axis`: y-axis bounds and tick spacing
//! - `spec`: the serializable chart description handed to the charting layer
//! - `state`: request generations and the current chart view

pub mod axis;
pub mod spec;
pub mod state;
