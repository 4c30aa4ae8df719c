use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::client::segment;
use super::{LookupError, ServiceClient};
use crate::clock::{Clock, SystemClock};
use crate::models::{InstrumentKind, PriceQuote};

/// Current price of one instrument.
///
/// Each call is independent; callers run many of them concurrently and
/// decide how to treat individual failures.
#[async_trait::async_trait]
pub trait PriceLookup: Send + Sync {
    async fn fetch_price(&self, kind: InstrumentKind, key: &str)
        -> Result<PriceQuote, LookupError>;

    fn name(&self) -> &str;
}

#[derive(Debug, Deserialize)]
struct StockPriceResponse {
    current_price: Decimal,
    #[serde(default)]
    timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MutualFundPriceResponse {
    #[serde(default)]
    scheme_name: Option<String>,
    nav: Decimal,
}

#[derive(Debug, Deserialize)]
struct CryptoPriceResponse {
    #[serde(default)]
    name: Option<String>,
    current_price: Decimal,
}

/// Client for the market-data service's `/price/{kind}/{key}` endpoints.
pub struct MarketDataClient {
    service: ServiceClient,
    clock: Arc<dyn Clock>,
}

impl MarketDataClient {
    pub fn new(service: ServiceClient) -> Self {
        Self {
            service,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    async fn get<T: DeserializeOwned>(
        &self,
        kind: InstrumentKind,
        key: &str,
    ) -> Result<T, LookupError> {
        let path = format!("/price/{}/{}", kind.path_segment(), segment(key));
        self.service
            .get_json(&path)
            .await
            .map_err(|err| LookupError::from_api(kind, key, err))
    }
}

#[async_trait::async_trait]
impl PriceLookup for MarketDataClient {
    async fn fetch_price(
        &self,
        kind: InstrumentKind,
        key: &str,
    ) -> Result<PriceQuote, LookupError> {
        let (price, name, as_of) = match kind {
            InstrumentKind::Stock => {
                let body: StockPriceResponse = self.get(kind, key).await?;
                let as_of = body
                    .timestamp
                    .as_deref()
                    .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
                    .map(|ts| ts.with_timezone(&Utc));
                (body.current_price, None, as_of)
            }
            InstrumentKind::MutualFund => {
                let body: MutualFundPriceResponse = self.get(kind, key).await?;
                (body.nav, body.scheme_name, None)
            }
            InstrumentKind::Crypto => {
                let body: CryptoPriceResponse = self.get(kind, key).await?;
                (body.current_price, body.name, None)
            }
        };

        if price.is_sign_negative() && !price.is_zero() {
            return Err(LookupError::InvalidPrice {
                kind,
                key: key.to_string(),
                price,
            });
        }

        let mut quote = PriceQuote::new(kind, key, price, as_of.unwrap_or_else(|| self.clock.now()));
        quote.name = name.filter(|n| !n.is_empty());
        Ok(quote)
    }

    fn name(&self) -> &str {
        "market-data"
    }
}
