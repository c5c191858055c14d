//! Month/value series returned by the tabular data service.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One point of a monthly climatology.
///
/// Series keep the order the service returned them in (chronological by
/// month) and are never re-sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub month: String,
    pub value: f64,
}

/// Error body the service sends with `400`/`404`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: String,
}

/// Why a series could not be obtained. Presenters collapse every variant
/// into the same "no data" view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed response: {0}")]
    Decode(String),
}

/// Parse a JSON response body into points.
pub fn parse_series(body: &str) -> serde_json::Result<Vec<SeriesPoint>> {
    serde_json::from_str(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_response_order() {
        let body = r#"[{"month":"Jan","value":9.8},{"month":"Feb","value":10.6},{"month":"Dec","value":10.1}]"#;
        let points = parse_series(body).unwrap();
        let months: Vec<&str> = points.iter().map(|p| p.month.as_str()).collect();
        assert_eq!(months, vec!["Jan", "Feb", "Dec"]);
        assert_eq!(points[1].value, 10.6);
    }

    #[test]
    fn parse_error_body() {
        let body: ErrorBody = serde_json::from_str(r#"{"success":false,"error":"Invalid period: x"}"#).unwrap();
        assert!(!body.success);
        assert_eq!(body.error, "Invalid period: x");
    }

    #[test]
    fn parse_rejects_non_numeric_values() {
        assert!(parse_series(r#"[{"month":"Jan","value":"n/a"}]"#).is_err());
    }
}
