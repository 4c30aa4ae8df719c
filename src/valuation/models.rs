use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tracing::warn;

use crate::models::{AssetClass, Holding};

/// Where a holding's current price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceStatus {
    /// Live quote from the market-data service.
    Live,
    /// Lookup failed; priced at cost basis.
    Fallback,
    /// Manual holding; values taken from the record.
    Stated,
}

/// A holding joined with its price and the metrics derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedHolding {
    pub key: String,
    pub name: String,
    pub holding: Holding,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_price: Option<Decimal>,
    pub current_value: Decimal,
    pub invested_value: Decimal,
    pub gain_loss: Decimal,
    pub gain_loss_percent: Decimal,
    /// Share of total portfolio value; filled in once totals are known.
    pub allocation_percent: Decimal,
    pub price_status: PriceStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PortfolioTotals {
    pub total_value: Decimal,
    pub total_invested: Decimal,
    pub return_amount: Decimal,
    pub return_percent: Decimal,
    pub holding_count: usize,
    /// Holdings valued at cost basis because their lookup failed.
    pub fallback_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetClassSummary {
    pub asset_class: AssetClass,
    pub total_value: Decimal,
    pub total_invested: Decimal,
    pub gain_loss: Decimal,
    pub gain_loss_percent: Decimal,
    pub count: usize,
}

/// Output of one valuation cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioValuation {
    pub as_of: DateTime<Utc>,
    pub holdings: Vec<EnrichedHolding>,
    pub totals: PortfolioTotals,
    pub by_asset_class: Vec<AssetClassSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldingFilter {
    #[default]
    All,
    Gainers,
    Losers,
}

/// `part / whole * 100`, or zero when `whole` is not positive.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(whole))
        .unwrap_or(Decimal::ZERO)
}

/// `total + value`, clamped to the `Decimal` bounds on overflow.
pub(crate) fn add_to_total(total: Decimal, value: Decimal, field: &'static str) -> Decimal {
    total.checked_add(value).unwrap_or_else(|| {
        warn!(field, "total overflowed; clamping to the decimal range");
        total.saturating_add(value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn percent_of_guards_zero_and_negative_denominators() {
        assert_eq!(percent_of(dec!(150), dec!(1500)), dec!(10));
        assert_eq!(percent_of(dec!(150), dec!(0)), dec!(0));
        assert_eq!(percent_of(dec!(0), dec!(0)), dec!(0));
        assert_eq!(percent_of(dec!(5), dec!(-10)), dec!(0));
    }

    #[test]
    fn totals_clamp_instead_of_overflowing() {
        let half = Decimal::MAX / Decimal::TWO + Decimal::ONE;
        assert_eq!(add_to_total(half, half, "test"), Decimal::MAX);
        assert_eq!(add_to_total(dec!(1), dec!(2), "test"), dec!(3));
    }
}
