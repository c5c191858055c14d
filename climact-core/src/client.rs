//! HTTP client for the tabular data service.
//!
//! `GET {base}/data/{domain}/{variable}/{period token}` answers `200` with a
//! JSON array of `{month, value}`, or `400`/`404` with
//! `{success: false, error}` when the combination has no data.

use crate::config::ServiceConfig;
use crate::query_key::TabularKey;
use crate::series::{parse_series, ErrorBody, FetchError, SeriesPoint};
use log::{info, warn};
use reqwest::{Client, StatusCode};

#[derive(Debug, Clone)]
pub struct DataClient {
    http: Client,
    base_url: String,
}

impl DataClient {
    pub fn new(config: &ServiceConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(http: Client, config: &ServiceConfig) -> Self {
        Self {
            http,
            base_url: config.data_base_url.clone(),
        }
    }

    pub fn series_url(&self, key: &TabularKey) -> String {
        format!("{}/data/{}", self.base_url, key.path())
    }

    pub async fn fetch_series(&self, key: &TabularKey) -> Result<Vec<SeriesPoint>, FetchError> {
        let url = self.series_url(key);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if status != StatusCode::OK {
            let error = status_error(status, body);
            warn!("series request {} failed: {}", url, error);
            return Err(error);
        }

        let points = parse_series(&body).map_err(|e| FetchError::Decode(e.to_string()))?;
        info!("series request {} returned {} points", url, points.len());
        Ok(points)
    }
}

/// Error for a non-200 response. The message is the `error` field of the
/// JSON error body when there is one, the raw body otherwise.
pub fn status_error(status: StatusCode, body: String) -> FetchError {
    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(error_body) if !error_body.error.is_empty() => error_body.error,
        _ => body,
    };
    FetchError::Status {
        status: status.as_u16(),
        message,
    }
}
