use crate::config::DisplayConfig;
use crate::format::{format_money, format_percent, format_share};
use crate::valuation::{
    filter_holdings, percent_of, EnrichedHolding, HoldingFilter, PortfolioValuation, PriceStatus,
};

use super::types::{AllocationOutput, HoldingOutput, HoldingsOutput, SummaryOutput};

fn filter_name(filter: HoldingFilter) -> &'static str {
    match filter {
        HoldingFilter::All => "all",
        HoldingFilter::Gainers => "gainers",
        HoldingFilter::Losers => "losers",
    }
}

fn status_name(status: PriceStatus) -> &'static str {
    match status {
        PriceStatus::Live => "live",
        PriceStatus::Fallback => "fallback",
        PriceStatus::Stated => "stated",
    }
}

fn holding_output(row: &EnrichedHolding, display: &DisplayConfig) -> HoldingOutput {
    HoldingOutput {
        key: row.key.clone(),
        name: row.name.clone(),
        asset_class: row.holding.asset_class().to_string(),
        quantity: row.holding.quantity().map(|q| q.normalize().to_string()),
        current_price: row.current_price.map(|p| format_money(p, display)),
        current_value: format_money(row.current_value, display),
        invested_value: format_money(row.invested_value, display),
        gain_loss: format_money(row.gain_loss, display),
        gain_loss_percent: format_percent(row.gain_loss_percent),
        allocation_percent: format_share(row.allocation_percent),
        price_status: status_name(row.price_status).to_string(),
    }
}

pub fn holdings_output(
    valuation: &PortfolioValuation,
    filter: HoldingFilter,
    display: &DisplayConfig,
) -> HoldingsOutput {
    HoldingsOutput {
        as_of: valuation.as_of.to_rfc3339(),
        filter: filter_name(filter).to_string(),
        holdings: filter_holdings(&valuation.holdings, filter)
            .into_iter()
            .map(|row| holding_output(row, display))
            .collect(),
    }
}

pub fn summary_output(valuation: &PortfolioValuation, display: &DisplayConfig) -> SummaryOutput {
    let totals = &valuation.totals;
    SummaryOutput {
        as_of: valuation.as_of.to_rfc3339(),
        total_value: format_money(totals.total_value, display),
        total_invested: format_money(totals.total_invested, display),
        return_amount: format_money(totals.return_amount, display),
        return_percent: format_percent(totals.return_percent),
        holding_count: totals.holding_count,
        fallback_count: totals.fallback_count,
    }
}

/// Per-class rows, each with its share of the whole portfolio.
pub fn allocation_output(
    valuation: &PortfolioValuation,
    display: &DisplayConfig,
) -> Vec<AllocationOutput> {
    let grand_total = valuation.totals.total_value;
    valuation
        .by_asset_class
        .iter()
        .map(|class| AllocationOutput {
            asset_class: class.asset_class.to_string(),
            total_value: format_money(class.total_value, display),
            total_invested: format_money(class.total_invested, display),
            gain_loss: format_money(class.gain_loss, display),
            gain_loss_percent: format_percent(class.gain_loss_percent),
            allocation_percent: format_share(percent_of(class.total_value, grand_total)),
            count: class.count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::LookupError;
    use crate::models::{Holding, InstrumentKind, PriceQuote};
    use crate::valuation::{enrich, summarize};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn valuation() -> PortfolioValuation {
        let as_of = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let rows = vec![
            enrich(
                Holding::stock(1, "AAPL", dec!(10), dec!(150)),
                Some(Ok(PriceQuote::new(InstrumentKind::Stock, "AAPL", dec!(165), as_of))),
            ),
            enrich(
                Holding::stock(2, "MSFT", dec!(1), dec!(350)),
                Some(Err(LookupError::NotFound {
                    kind: InstrumentKind::Stock,
                    key: "MSFT".to_string(),
                })),
            ),
        ];
        summarize(rows, as_of)
    }

    #[test]
    fn holdings_render_metrics_and_status() {
        let output = holdings_output(&valuation(), HoldingFilter::All, &DisplayConfig::default());

        assert_eq!(output.filter, "all");
        assert_eq!(output.holdings.len(), 2);
        let aapl = &output.holdings[0];
        assert_eq!(aapl.key, "stock-1");
        assert_eq!(aapl.quantity.as_deref(), Some("10"));
        assert_eq!(aapl.current_value, "1650");
        assert_eq!(aapl.gain_loss, "150");
        assert_eq!(aapl.gain_loss_percent, "+10.00%");
        assert_eq!(aapl.allocation_percent, "82.50%");
        assert_eq!(aapl.price_status, "live");
        assert_eq!(output.holdings[1].price_status, "fallback");
    }

    #[test]
    fn gainers_filter_drops_flat_fallbacks() {
        let output =
            holdings_output(&valuation(), HoldingFilter::Gainers, &DisplayConfig::default());
        assert_eq!(output.holdings.len(), 1);
        assert_eq!(output.holdings[0].key, "stock-1");
    }

    #[test]
    fn summary_reports_fallbacks() {
        let output = summary_output(&valuation(), &DisplayConfig::default());
        assert_eq!(output.total_value, "2000");
        assert_eq!(output.total_invested, "1850");
        assert_eq!(output.return_amount, "150");
        assert_eq!(output.holding_count, 2);
        assert_eq!(output.fallback_count, 1);
        assert_eq!(output.as_of, "2024-05-01T12:00:00+00:00");
    }

    #[test]
    fn allocation_covers_whole_portfolio() {
        let rows = allocation_output(&valuation(), &DisplayConfig::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].asset_class, "Stocks");
        assert_eq!(rows[0].allocation_percent, "100.00%");
        assert_eq!(rows[0].count, 2);
    }
}
