//! Service endpoints.

/// Base URL of the tabular data service (`GET {base}/data/...`).
pub const DEFAULT_DATA_URL: &str = "http://localhost:3001/api";

/// Base URL of the WMS endpoint publishing the climate layers.
pub const DEFAULT_WMS_URL: &str = "http://localhost:80/thredds/wms/climact";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub data_base_url: String,
    pub wms_base_url: String,
}

impl ServiceConfig {
    pub fn new(data_base_url: impl Into<String>, wms_base_url: impl Into<String>) -> Self {
        Self {
            data_base_url: trim_base(data_base_url.into()),
            wms_base_url: trim_base(wms_base_url.into()),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_URL, DEFAULT_WMS_URL)
    }
}

fn trim_base(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
