//! Portfolio valuation: joins holdings with live prices and derives
//! gain/loss, allocation and per-class totals.

mod aggregator;
mod models;
mod summary;

pub use aggregator::{enrich, summarize, ValuationAggregator};
pub use models::{
    percent_of, AssetClassSummary, EnrichedHolding, HoldingFilter, PortfolioTotals,
    PortfolioValuation, PriceStatus,
};
pub use summary::{asset_class_summaries, filter_holdings};
