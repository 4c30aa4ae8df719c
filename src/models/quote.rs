use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::InstrumentKind;

/// A live price for one instrument. Fetched on demand and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub kind: InstrumentKind,
    pub key: String,
    /// Last traded price, or NAV for mutual funds.
    pub price: Decimal,
    /// Display name reported by the market-data service (scheme or coin name).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub as_of: DateTime<Utc>,
}

impl PriceQuote {
    pub fn new(
        kind: InstrumentKind,
        key: impl Into<String>,
        price: Decimal,
        as_of: DateTime<Utc>,
    ) -> Self {
        Self {
            kind,
            key: key.into(),
            price,
            name: None,
            as_of,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
