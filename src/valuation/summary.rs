use rust_decimal::Decimal;

use super::models::{add_to_total, percent_of};
use super::{AssetClassSummary, EnrichedHolding, HoldingFilter};
use crate::models::AssetClass;

fn class_rank(class: &AssetClass) -> u8 {
    match class {
        AssetClass::Stocks => 0,
        AssetClass::Crypto => 1,
        AssetClass::MutualFunds => 2,
        AssetClass::Manual(_) => 3,
    }
}

/// Per-class totals. Classes without holdings are omitted.
///
/// Order: Stocks, Crypto, Mutual Funds, then manual asset types in the order
/// they first appear.
pub fn asset_class_summaries(holdings: &[EnrichedHolding]) -> Vec<AssetClassSummary> {
    let mut summaries: Vec<AssetClassSummary> = Vec::new();

    for row in holdings {
        let class = row.holding.asset_class();
        let summary = match summaries.iter().position(|s| s.asset_class == class) {
            Some(idx) => &mut summaries[idx],
            None => {
                summaries.push(AssetClassSummary {
                    asset_class: class,
                    total_value: Decimal::ZERO,
                    total_invested: Decimal::ZERO,
                    gain_loss: Decimal::ZERO,
                    gain_loss_percent: Decimal::ZERO,
                    count: 0,
                });
                let last = summaries.len() - 1;
                &mut summaries[last]
            }
        };
        summary.total_value = add_to_total(summary.total_value, row.current_value, "class_value");
        summary.total_invested =
            add_to_total(summary.total_invested, row.invested_value, "class_invested");
        summary.count += 1;
    }

    for summary in &mut summaries {
        summary.gain_loss = summary.total_value.saturating_sub(summary.total_invested);
        summary.gain_loss_percent = percent_of(summary.gain_loss, summary.total_invested);
    }

    // Stable sort keeps first-seen order among manual types.
    summaries.sort_by_key(|s| class_rank(&s.asset_class));
    summaries
}

/// Select rows for the gainers/losers views.
pub fn filter_holdings(holdings: &[EnrichedHolding], filter: HoldingFilter) -> Vec<&EnrichedHolding> {
    holdings
        .iter()
        .filter(|row| match filter {
            HoldingFilter::All => true,
            HoldingFilter::Gainers => row.gain_loss_percent > Decimal::ZERO,
            HoldingFilter::Losers => row.gain_loss_percent < Decimal::ZERO,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Holding, PriceQuote};
    use crate::valuation::enrich;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn priced(holding: Holding, price: Decimal) -> EnrichedHolding {
        let (kind, key) = holding.price_key().unwrap();
        let quote = PriceQuote::new(kind, key, price, Utc::now());
        enrich(holding, Some(Ok(quote)))
    }

    fn sample() -> Vec<EnrichedHolding> {
        vec![
            enrich(Holding::manual(10, "Coins", "Gold", dec!(1000), dec!(1100)), None),
            priced(Holding::mutual_fund(2, "119551", dec!(10), dec!(50)), dec!(45)),
            priced(Holding::stock(1, "AAPL", dec!(10), dec!(150)), dec!(165)),
            enrich(Holding::manual(11, "Flat", "Real Estate", dec!(5000), dec!(5000)), None),
            priced(Holding::stock(3, "TSLA", dec!(2), dec!(200)), dec!(180)),
            enrich(Holding::manual(12, "Bar", "Gold", dec!(500), dec!(600)), None),
        ]
    }

    #[test]
    fn groups_and_orders_classes() {
        let summaries = asset_class_summaries(&sample());
        let names: Vec<String> = summaries.iter().map(|s| s.asset_class.to_string()).collect();
        assert_eq!(names, vec!["Stocks", "Mutual Funds", "Gold", "Real Estate"]);

        let stocks = &summaries[0];
        assert_eq!(stocks.count, 2);
        assert_eq!(stocks.total_value, dec!(2010));
        assert_eq!(stocks.total_invested, dec!(1900));
        assert_eq!(stocks.gain_loss, dec!(110));

        let gold = &summaries[2];
        assert_eq!(gold.count, 2);
        assert_eq!(gold.total_value, dec!(1700));
        assert_eq!(gold.gain_loss_percent.round_dp(2), dec!(13.33));
    }

    #[test]
    fn zero_invested_class_has_zero_percent() {
        let rows = vec![enrich(Holding::manual(1, "Gift", "Gold", dec!(0), dec!(300)), None)];
        let summaries = asset_class_summaries(&rows);
        assert_eq!(summaries[0].gain_loss, dec!(300));
        assert_eq!(summaries[0].gain_loss_percent, dec!(0));
    }

    #[test]
    fn filters_gainers_and_losers() {
        let rows = sample();
        let gainers: Vec<&str> = filter_holdings(&rows, HoldingFilter::Gainers)
            .into_iter()
            .map(|r| r.key.as_str())
            .collect();
        assert_eq!(gainers, vec!["manual-10", "stock-1", "manual-12"]);

        let losers: Vec<&str> = filter_holdings(&rows, HoldingFilter::Losers)
            .into_iter()
            .map(|r| r.key.as_str())
            .collect();
        assert_eq!(losers, vec!["mf-2", "stock-3"]);

        assert_eq!(filter_holdings(&rows, HoldingFilter::All).len(), rows.len());
    }

    #[test]
    fn classes_without_holdings_are_omitted() {
        let summaries = asset_class_summaries(&sample());
        assert!(summaries
            .iter()
            .all(|s| s.asset_class != AssetClass::Crypto));
    }
}
