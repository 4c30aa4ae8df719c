use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::api::{
    build_http_client, AuthClient, ExpenseClient, MarketDataClient, PortfolioClient,
    PriceLookup, ServiceClient,
};
use crate::clock::Clock;
use crate::config::Config;
use crate::models::Transaction;
use crate::session::Session;
use crate::transactions::{merge_transactions, purchases_from_holdings};
use crate::valuation::{PortfolioTotals, PortfolioValuation, ValuationAggregator};

/// Every backend client for one session, plus the valuation pipeline.
pub struct DashboardService {
    portfolio: PortfolioClient,
    expenses: ExpenseClient,
    aggregator: ValuationAggregator,
}

impl DashboardService {
    pub fn new(
        portfolio: PortfolioClient,
        expenses: ExpenseClient,
        prices: Arc<dyn PriceLookup>,
    ) -> Self {
        Self {
            portfolio,
            expenses,
            aggregator: ValuationAggregator::new(prices),
        }
    }

    /// Wire clients against the configured service URLs.
    pub fn from_config(config: &Config, session: Option<Session>) -> Result<Self> {
        let http = build_http_client(&config.http).context("Failed to create HTTP client")?;
        let services = &config.services;

        let portfolio = PortfolioClient::new(ServiceClient::new(
            http.clone(),
            &services.portfolio_url,
            session.clone(),
        ));
        let expenses = ExpenseClient::new(ServiceClient::new(
            http.clone(),
            &services.expense_url,
            session.clone(),
        ));
        let prices = MarketDataClient::new(ServiceClient::new(
            http,
            &services.market_data_url,
            session,
        ));

        Ok(Self::new(portfolio, expenses, Arc::new(prices)))
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.aggregator = self.aggregator.with_clock(clock);
        self
    }

    pub fn expenses(&self) -> &ExpenseClient {
        &self.expenses
    }

    /// Fetch holdings and value them. Only the holdings fetch can fail.
    pub async fn valuation(&self) -> Result<PortfolioValuation> {
        let holdings = self
            .portfolio
            .fetch_all_holdings()
            .await
            .context("Failed to fetch holdings")?;

        let valuation = self.aggregator.value(holdings.into_holdings()).await;
        info!(
            holdings = valuation.totals.holding_count,
            fallbacks = valuation.totals.fallback_count,
            total_value = %valuation.totals.total_value,
            "portfolio valued"
        );
        Ok(valuation)
    }

    pub async fn totals(&self) -> Result<PortfolioTotals> {
        Ok(self.valuation().await?.totals)
    }

    /// Expenses and asset purchases, newest first, optionally truncated.
    pub async fn transactions(&self, limit: Option<usize>) -> Result<Vec<Transaction>> {
        let (expenses, holdings) = tokio::try_join!(
            async {
                self.expenses
                    .list_expenses()
                    .await
                    .context("Failed to fetch expenses")
            },
            async {
                self.portfolio
                    .fetch_all_holdings()
                    .await
                    .context("Failed to fetch holdings")
            },
        )?;

        let purchases = purchases_from_holdings(&holdings.into_holdings());
        let mut feed = merge_transactions(&expenses, &purchases);
        if let Some(limit) = limit {
            feed.truncate(limit);
        }
        Ok(feed)
    }
}

/// Log in and return the new session.
pub async fn login(config: &Config, username: &str, password: &str) -> Result<Session> {
    let http = build_http_client(&config.http).context("Failed to create HTTP client")?;
    let auth = AuthClient::new(ServiceClient::new(http, &config.services.auth_url, None));
    auth.login(username, password)
        .await
        .context("Login failed")
}
