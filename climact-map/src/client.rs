//! HTTP client for the WMS endpoint.

use crate::feature::{interpret_feature_value, FeatureValue};
use crate::wms::{FeatureInfoRequest, GetMapParams, LegendParams, QueryPairs};
use climact_core::config::ServiceConfig;
use climact_core::series::FetchError;
use log::{info, warn};
use reqwest::{Client, Url};

#[derive(Debug, Clone)]
pub struct WmsClient {
    http: Client,
    base_url: String,
}

impl WmsClient {
    pub fn new(config: &ServiceConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(http: Client, config: &ServiceConfig) -> Self {
        Self {
            http,
            base_url: config.wms_base_url.clone(),
        }
    }

    fn url(&self, pairs: &QueryPairs) -> Result<Url, FetchError> {
        Url::parse_with_params(&self.base_url, pairs.iter().map(|(k, v)| (*k, v.as_str())))
            .map_err(|e| FetchError::Transport(format!("bad WMS url {}: {}", self.base_url, e)))
    }

    /// Tile URL template without `BBOX`/`WIDTH`/`HEIGHT`.
    pub fn get_map_url(&self, params: &GetMapParams) -> Result<Url, FetchError> {
        self.url(&params.query_pairs())
    }

    pub fn legend_url(&self, params: &LegendParams) -> Result<Url, FetchError> {
        self.url(&params.query_pairs())
    }

    /// Raw text/plain response of a point query.
    pub async fn feature_info(&self, request: &FeatureInfoRequest) -> Result<String, FetchError> {
        let url = self.url(&request.query_pairs())?;
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(body)
    }

    /// Query and interpret the value under `request.point`. Failures are
    /// treated like points outside the data.
    pub async fn lookup(&self, request: &FeatureInfoRequest, domain: &str) -> FeatureValue {
        match self.feature_info(request).await {
            Ok(text) => {
                let value = interpret_feature_value(domain, &text);
                info!("feature info for {} at {:?}: {}", request.layer, request.point, value);
                value
            }
            Err(e) => {
                warn!("feature info for {} failed: {}", request.layer, e);
                FeatureValue::NotApplicable
            }
        }
    }
}
