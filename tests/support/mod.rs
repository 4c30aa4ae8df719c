#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use folioview::api::{build_http_client, LookupError, PriceLookup, ServiceClient};
use folioview::config::HttpConfig;
use folioview::models::{InstrumentKind, PriceQuote};
use folioview::session::Session;
use rust_decimal::Decimal;

pub fn test_session() -> Session {
    Session::new("user-42", "test-token")
}

pub fn service(base_url: &str, session: Option<Session>) -> ServiceClient {
    let http = build_http_client(&HttpConfig::default()).expect("http client");
    ServiceClient::new(http, base_url, session)
}

/// In-memory price source. Keys without a configured price fail with `NotFound`.
pub struct FakePrices {
    prices: HashMap<String, Decimal>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakePrices {
    pub fn new() -> Self {
        Self {
            prices: HashMap::new(),
            delay: None,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_price(mut self, key: &str, price: Decimal) -> Self {
        self.prices.insert(key.to_string(), price);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of lookups that were pending at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceLookup for FakePrices {
    async fn fetch_price(
        &self,
        kind: InstrumentKind,
        key: &str,
    ) -> Result<PriceQuote, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.prices.get(key) {
            Some(price) => Ok(PriceQuote::new(
                kind,
                key,
                *price,
                Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            )),
            None => Err(LookupError::NotFound {
                kind,
                key: key.to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        "fake"
    }
}
