//! Core types for the ClimACT climate data viewer.
//!
//! This crate provides:
//! - `catalog`: the fixed enumeration of variables, periods and scenarios
//! - `selection`: the selection state and its reducer-style store
//! - `persist`: key-value storage backends for the last selection
//! - `query_key`: REST path and WMS layer names derived from a selection
//! - `series`: the month/value points returned by the tabular service
//! - `config`: service endpoints
//! - `client` (feature `api`): HTTP client for the tabular data service

pub mod catalog;
pub mod config;
pub mod persist;
pub mod query_key;
pub mod selection;
pub mod series;

#[cfg(feature = "api")]
pub mod client;
