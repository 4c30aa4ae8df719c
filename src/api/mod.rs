//! HTTP clients for the backend services.

mod auth;
mod client;
mod error;
mod expense;
mod market_data;
mod portfolio;

pub use auth::AuthClient;
pub use client::{build_http_client, ServiceClient};
pub use error::{ApiError, LookupError};
pub use expense::ExpenseClient;
pub use market_data::{MarketDataClient, PriceLookup};
pub use portfolio::{HoldingSet, PortfolioClient};
