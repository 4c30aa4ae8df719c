use reqwest::StatusCode;
use rust_decimal::Decimal;

use crate::models::InstrumentKind;

/// Failure talking to a backend service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("unexpected response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("response from {url} is missing {field}")]
    MissingField { url: String, field: &'static str },

    #[error("invalid {record} record {id}: {reason}")]
    InvalidRecord {
        record: &'static str,
        id: i64,
        reason: String,
    },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// HTTP status for `Status` errors.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Transport { source, .. } if source.is_timeout())
    }
}

/// Failure to price a single instrument.
///
/// The valuation aggregator absorbs these; they never fail a whole batch.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("no {kind} price found for {key}")]
    NotFound { kind: InstrumentKind, key: String },

    #[error("{kind} price lookup for {key} failed: {source}")]
    Api {
        kind: InstrumentKind,
        key: String,
        #[source]
        source: ApiError,
    },

    #[error("{kind} price for {key} is negative: {price}")]
    InvalidPrice {
        kind: InstrumentKind,
        key: String,
        price: Decimal,
    },
}

impl LookupError {
    /// True when the request to the market-data service timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, LookupError::Api { source, .. } if source.is_timeout())
    }

    pub fn from_api(kind: InstrumentKind, key: &str, err: ApiError) -> Self {
        if err.status() == Some(StatusCode::NOT_FOUND) {
            LookupError::NotFound {
                kind,
                key: key.to_string(),
            }
        } else {
            LookupError::Api {
                kind,
                key: key.to_string(),
                source: err,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_status_maps_to_not_found_lookup() {
        let err = ApiError::Status {
            url: "http://md/price/stock/ZZZ".to_string(),
            status: StatusCode::NOT_FOUND,
            body: String::new(),
        };
        let lookup = LookupError::from_api(InstrumentKind::Stock, "ZZZ", err);
        assert!(matches!(lookup, LookupError::NotFound { ref key, .. } if key == "ZZZ"));
        assert_eq!(lookup.to_string(), "no stock price found for ZZZ");
    }

    #[test]
    fn server_errors_keep_their_source() {
        let err = ApiError::Status {
            url: "http://md/price/mf/1".to_string(),
            status: StatusCode::BAD_GATEWAY,
            body: "upstream down".to_string(),
        };
        let lookup = LookupError::from_api(InstrumentKind::MutualFund, "1", err);
        assert!(matches!(lookup, LookupError::Api { .. }));
        assert!(lookup.to_string().contains("upstream down"));
    }
}
