use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::models::{add_to_total, percent_of};
use super::summary::asset_class_summaries;
use super::{EnrichedHolding, PortfolioTotals, PortfolioValuation, PriceStatus};
use crate::api::{LookupError, PriceLookup};
use crate::clock::{Clock, SystemClock};
use crate::models::{Holding, PriceQuote};

/// Joins holdings with live prices and derives portfolio metrics.
pub struct ValuationAggregator {
    prices: Arc<dyn PriceLookup>,
    clock: Arc<dyn Clock>,
}

impl ValuationAggregator {
    pub fn new(prices: Arc<dyn PriceLookup>) -> Self {
        Self {
            prices,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Value every holding. Never fails: a failed price lookup degrades that
    /// one holding to cost-basis valuation.
    ///
    /// All lookups are in flight at once; each resolves to its own `Result`,
    /// so a slow or failing instrument cannot affect the others.
    pub async fn value(&self, holdings: Vec<Holding>) -> PortfolioValuation {
        let lookups = join_all(holdings.iter().map(|holding| self.lookup(holding))).await;

        let enriched = holdings
            .into_iter()
            .zip(lookups)
            .map(|(holding, lookup)| enrich(holding, lookup))
            .collect();

        summarize(enriched, self.clock.now())
    }

    async fn lookup(&self, holding: &Holding) -> Option<Result<PriceQuote, LookupError>> {
        let (kind, key) = holding.price_key()?;
        debug!(%kind, key, source = self.prices.name(), "looking up price");
        Some(self.prices.fetch_price(kind, key).await)
    }
}

/// Derive the per-holding metrics from a holding and its lookup outcome.
///
/// `lookup` is `None` for manual holdings, which are never priced.
/// Allocation is left at zero; [`summarize`] fills it in.
pub fn enrich(
    holding: Holding,
    lookup: Option<Result<PriceQuote, LookupError>>,
) -> EnrichedHolding {
    let invested_value = holding.invested_value();
    let mut name = holding.label().to_string();

    let (current_price, current_value, price_status) =
        match (holding.stated_current_value(), lookup) {
            (Some(stated), _) => (None, stated, PriceStatus::Stated),
            (None, Some(Ok(quote))) => match holding.value_at(quote.price) {
                Some(value) => {
                    if let Some(quote_name) = quote.name {
                        name = quote_name;
                    }
                    (Some(quote.price), value, PriceStatus::Live)
                }
                None => {
                    warn!(
                        holding = %holding.key(),
                        price = %quote.price,
                        "quoted value out of range; valuing at cost basis"
                    );
                    (holding.cost_basis_price(), invested_value, PriceStatus::Fallback)
                }
            },
            (None, Some(Err(err))) => {
                warn!(
                    holding = %holding.key(),
                    error = %err,
                    timeout = err.is_timeout(),
                    "price lookup failed; valuing at cost basis"
                );
                (holding.cost_basis_price(), invested_value, PriceStatus::Fallback)
            }
            (None, None) => (holding.cost_basis_price(), invested_value, PriceStatus::Fallback),
        };

    let gain_loss = current_value.saturating_sub(invested_value);

    EnrichedHolding {
        key: holding.key(),
        name,
        holding,
        current_price,
        current_value,
        invested_value,
        gain_loss,
        gain_loss_percent: percent_of(gain_loss, invested_value),
        allocation_percent: Decimal::ZERO,
        price_status,
    }
}

/// Two-phase totals: accumulate over every row, then map each row to its
/// share of the grand total.
pub fn summarize(mut holdings: Vec<EnrichedHolding>, as_of: DateTime<Utc>) -> PortfolioValuation {
    let mut totals = PortfolioTotals {
        holding_count: holdings.len(),
        ..PortfolioTotals::default()
    };
    for row in &holdings {
        totals.total_value = add_to_total(totals.total_value, row.current_value, "total_value");
        totals.total_invested =
            add_to_total(totals.total_invested, row.invested_value, "total_invested");
        if row.price_status == PriceStatus::Fallback {
            totals.fallback_count += 1;
        }
    }
    totals.return_amount = totals.total_value.saturating_sub(totals.total_invested);
    totals.return_percent = percent_of(totals.return_amount, totals.total_invested);

    for row in &mut holdings {
        row.allocation_percent = percent_of(row.current_value, totals.total_value);
    }

    let by_asset_class = asset_class_summaries(&holdings);

    PortfolioValuation {
        as_of,
        holdings,
        totals,
        by_asset_class,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InstrumentKind;
    use rust_decimal_macros::dec;

    fn quote(kind: InstrumentKind, key: &str, price: Decimal) -> PriceQuote {
        PriceQuote::new(kind, key, price, Utc::now())
    }

    fn not_found(key: &str) -> LookupError {
        LookupError::NotFound {
            kind: InstrumentKind::Stock,
            key: key.to_string(),
        }
    }

    #[test]
    fn live_quote_produces_gain() {
        let holding = Holding::stock(1, "AAPL", dec!(10), dec!(150));
        let row = enrich(
            holding,
            Some(Ok(quote(InstrumentKind::Stock, "AAPL", dec!(165)))),
        );

        assert_eq!(row.current_value, dec!(1650));
        assert_eq!(row.invested_value, dec!(1500));
        assert_eq!(row.gain_loss, dec!(150));
        assert_eq!(row.gain_loss_percent, dec!(10));
        assert_eq!(row.price_status, PriceStatus::Live);
    }

    #[test]
    fn failed_lookup_values_at_cost_basis() {
        let holding = Holding::stock(1, "AAPL", dec!(10), dec!(150));
        let row = enrich(holding, Some(Err(not_found("AAPL"))));

        assert_eq!(row.current_value, dec!(1500));
        assert_eq!(row.invested_value, dec!(1500));
        assert_eq!(row.gain_loss, dec!(0));
        assert_eq!(row.gain_loss_percent, dec!(0));
        assert_eq!(row.current_price, Some(dec!(150)));
        assert_eq!(row.price_status, PriceStatus::Fallback);
    }

    #[test]
    fn zero_cost_basis_yields_zero_percent() {
        let holding = Holding::crypto(3, "airdrop", "AIR", dec!(100), dec!(0));
        let row = enrich(
            holding,
            Some(Ok(quote(InstrumentKind::Crypto, "airdrop", dec!(2)))),
        );

        assert_eq!(row.current_value, dec!(200));
        assert_eq!(row.gain_loss, dec!(200));
        assert_eq!(row.gain_loss_percent, dec!(0));
    }

    #[test]
    fn manual_holdings_ignore_prices() {
        let holding = Holding::manual(5, "Flat", "Real Estate", dec!(100000), dec!(120000));
        let row = enrich(holding, None);

        assert_eq!(row.current_value, dec!(120000));
        assert_eq!(row.gain_loss_percent, dec!(20));
        assert_eq!(row.current_price, None);
        assert_eq!(row.price_status, PriceStatus::Stated);
    }

    #[test]
    fn fund_name_comes_from_quote() {
        let holding = Holding::mutual_fund(2, "119551", dec!(10), dec!(40));
        let row = enrich(
            holding,
            Some(Ok(
                quote(InstrumentKind::MutualFund, "119551", dec!(44)).with_name("Index Fund Direct")
            )),
        );
        assert_eq!(row.name, "Index Fund Direct");
        assert_eq!(row.gain_loss_percent, dec!(10));
    }

    #[test]
    fn summarize_allocates_against_grand_total() {
        let rows = vec![
            enrich(
                Holding::stock(1, "AAPL", dec!(10), dec!(150)),
                Some(Ok(quote(InstrumentKind::Stock, "AAPL", dec!(165)))),
            ),
            enrich(
                Holding::stock(2, "MSFT", dec!(1), dec!(350)),
                Some(Err(not_found("MSFT"))),
            ),
        ];

        let valuation = summarize(rows, Utc::now());
        let totals = &valuation.totals;
        assert_eq!(totals.total_value, dec!(2000));
        assert_eq!(totals.total_invested, dec!(1850));
        assert_eq!(totals.return_amount, dec!(150));
        assert_eq!(totals.holding_count, 2);
        assert_eq!(totals.fallback_count, 1);

        assert_eq!(valuation.holdings[0].allocation_percent, dec!(82.5));
        assert_eq!(valuation.holdings[1].allocation_percent, dec!(17.5));
    }

    #[test]
    fn empty_portfolio_has_zero_everything() {
        let valuation = summarize(Vec::new(), Utc::now());
        assert_eq!(valuation.totals, PortfolioTotals::default());
        assert!(valuation.holdings.is_empty());
        assert!(valuation.by_asset_class.is_empty());
    }

    #[test]
    fn zero_total_value_gives_zero_allocations() {
        let rows = vec![
            enrich(
                Holding::manual(1, "Written off", "Other", dec!(0), dec!(0)),
                None,
            ),
            enrich(
                Holding::stock(2, "DEAD", dec!(0), dec!(10)),
                Some(Ok(quote(InstrumentKind::Stock, "DEAD", dec!(0)))),
            ),
        ];

        let valuation = summarize(rows, Utc::now());
        assert_eq!(valuation.totals.total_value, dec!(0));
        assert_eq!(valuation.totals.return_percent, dec!(0));
        assert!(valuation
            .holdings
            .iter()
            .all(|row| row.allocation_percent.is_zero()));
    }

    #[test]
    fn oversized_quote_falls_back_to_cost_basis() {
        let huge = Decimal::from(1_000_000_000_000_000i64);
        let holding = Holding::stock(1, "BIG", huge, dec!(1));
        let row = enrich(holding, Some(Ok(quote(InstrumentKind::Stock, "BIG", huge))));

        assert_eq!(row.price_status, PriceStatus::Fallback);
        assert_eq!(row.current_price, Some(dec!(1)));
        assert_eq!(row.current_value, huge);
        assert_eq!(row.gain_loss, dec!(0));
    }

    #[test]
    fn oversized_cost_basis_does_not_break_the_batch() {
        let huge = Decimal::from(1_000_000_000_000_000i64);
        let rows = vec![
            enrich(
                Holding::stock(1, "BIG", huge, huge),
                Some(Ok(quote(InstrumentKind::Stock, "BIG", dec!(1)))),
            ),
            enrich(
                Holding::stock(2, "AAPL", dec!(10), dec!(150)),
                Some(Ok(quote(InstrumentKind::Stock, "AAPL", dec!(165)))),
            ),
        ];

        let valuation = summarize(rows, Utc::now());
        assert_eq!(valuation.holdings[0].invested_value, Decimal::MAX);
        assert_eq!(valuation.holdings[0].gain_loss_percent, dec!(0));
        assert_eq!(valuation.holdings[1].current_value, dec!(1650));
        assert_eq!(valuation.holdings[1].gain_loss_percent, dec!(10));
        assert_eq!(valuation.totals.total_invested, Decimal::MAX);
    }

    #[test]
    fn overflowing_totals_clamp() {
        let half = Decimal::MAX / Decimal::TWO + Decimal::ONE;
        let rows = vec![
            enrich(Holding::manual(1, "Estate", "Real Estate", dec!(1), half), None),
            enrich(Holding::manual(2, "Vault", "Gold", dec!(1), half), None),
        ];

        let valuation = summarize(rows, Utc::now());
        assert_eq!(valuation.totals.total_value, Decimal::MAX);
        assert_eq!(valuation.totals.total_invested, dec!(2));
        assert_eq!(valuation.totals.holding_count, 2);
        assert!(valuation
            .holdings
            .iter()
            .all(|row| row.allocation_percent.is_zero()));
    }
}
