//! Chart view state and request generations.
//!
//! Every call to [`ChartPresenter::request`] tags the derived key with a new
//! generation. A response is applied only if it carries the latest
//! generation, so a slow response for an abandoned selection can never
//! overwrite the chart for the current one.

use crate::spec::{build_chart, ChartSpec};
use climact_core::query_key::{tabular_key, TabularKey};
use climact_core::selection::Selection;
use climact_core::series::{FetchError, SeriesPoint};
use log::{debug, info};

/// What the chart area shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartView {
    Idle,
    Loading,
    /// Empty series, unknown combination or unreachable service.
    NoData,
    Ready(ChartSpec),
}

/// A key to fetch, tagged with its generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularRequest {
    pub generation: u64,
    pub key: TabularKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    Stale,
}

#[derive(Debug)]
pub struct ChartPresenter {
    generation: u64,
    pending: Option<Selection>,
    view: ChartView,
}

impl Default for ChartPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartPresenter {
    pub fn new() -> Self {
        Self {
            generation: 0,
            pending: None,
            view: ChartView::Idle,
        }
    }

    pub fn view(&self) -> &ChartView {
        &self.view
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a fetch for `selection`, superseding any fetch in flight.
    pub fn request(&mut self, selection: &Selection) -> TabularRequest {
        self.generation += 1;
        self.pending = Some(selection.clone());
        self.view = ChartView::Loading;
        let key = tabular_key(selection);
        debug!("chart request #{} for {}", self.generation, key);
        TabularRequest {
            generation: self.generation,
            key,
        }
    }

    /// Apply the outcome of the fetch tagged `generation`.
    ///
    /// Failures and empty series both end in [`ChartView::NoData`]; the two
    /// are deliberately indistinguishable to the viewer.
    pub fn resolve(
        &mut self,
        generation: u64,
        outcome: Result<Vec<SeriesPoint>, FetchError>,
    ) -> Resolution {
        if generation != self.generation {
            debug!(
                "dropping stale chart response #{} (latest #{})",
                generation, self.generation
            );
            return Resolution::Stale;
        }
        let Some(selection) = self.pending.take() else {
            debug!("chart response #{} already applied", generation);
            return Resolution::Stale;
        };

        self.view = match outcome {
            Ok(points) => match build_chart(&points, &selection) {
                Some(chart) => ChartView::Ready(chart),
                None => ChartView::NoData,
            },
            Err(e) => {
                info!("no chart for {}: {}", tabular_key(&selection), e);
                ChartView::NoData
            }
        };
        Resolution::Applied
    }
}
