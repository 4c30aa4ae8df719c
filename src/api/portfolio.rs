//! Holding repository: reads the four holding lists from the portfolio service
//! and normalizes each schema into [`Holding`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use super::{ApiError, ServiceClient};
use crate::models::{deserialize_lenient_date, Holding, Position};

const STOCKS_PATH: &str = "/portfolio/v1/stocks";
const MUTUAL_FUNDS_PATH: &str = "/portfolio/v1/mutual-funds";
const CRYPTOS_PATH: &str = "/portfolio/v1/cryptos";
const MANUALS_PATH: &str = "/portfolio/v1/manuals";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StockRecord {
    id: i64,
    #[serde(default)]
    external_id: String,
    #[serde(default)]
    user_id: String,
    symbol: String,
    #[serde(default)]
    exchange: Option<String>,
    quantity: Decimal,
    purchase_price: Decimal,
    #[serde(default, deserialize_with = "deserialize_lenient_date")]
    purchase_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MutualFundRecord {
    id: i64,
    #[serde(default)]
    external_id: String,
    #[serde(default)]
    user_id: String,
    scheme_code: String,
    quantity: Decimal,
    purchase_price: Decimal,
    #[serde(default, deserialize_with = "deserialize_lenient_date")]
    purchase_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CryptoRecord {
    id: i64,
    #[serde(default)]
    external_id: String,
    #[serde(default)]
    user_id: String,
    coin_id: String,
    symbol: String,
    quantity: Decimal,
    purchase_price: Decimal,
    #[serde(default, deserialize_with = "deserialize_lenient_date")]
    purchase_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ManualRecord {
    id: i64,
    #[serde(default)]
    external_id: String,
    #[serde(default)]
    user_id: String,
    asset_name: String,
    asset_type: String,
    invested_value: Decimal,
    current_value: Decimal,
    #[serde(default, deserialize_with = "deserialize_lenient_date")]
    purchase_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_lenient_date")]
    maturity_date: Option<NaiveDate>,
}

fn ensure_non_negative(
    record: &'static str,
    id: i64,
    field: &str,
    value: Decimal,
) -> Result<(), ApiError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ApiError::InvalidRecord {
            record,
            id,
            reason: format!("{field} must not be negative (got {value})"),
        });
    }
    Ok(())
}

/// Checks a purchased record's quantity and unit cost, including that their
/// product fits in a `Decimal`.
fn ensure_valid_cost(
    record: &'static str,
    id: i64,
    quantity: Decimal,
    purchase_price: Decimal,
) -> Result<(), ApiError> {
    ensure_non_negative(record, id, "quantity", quantity)?;
    ensure_non_negative(record, id, "purchasePrice", purchase_price)?;
    if quantity.checked_mul(purchase_price).is_none() {
        return Err(ApiError::InvalidRecord {
            record,
            id,
            reason: format!("quantity {quantity} at {purchase_price} exceeds the decimal range"),
        });
    }
    Ok(())
}

impl StockRecord {
    fn into_holding(self) -> Result<Holding, ApiError> {
        ensure_valid_cost("stock", self.id, self.quantity, self.purchase_price)?;
        Ok(Holding {
            id: self.id,
            external_id: self.external_id,
            user_id: self.user_id,
            purchase_date: self.purchase_date,
            position: Position::Stock {
                symbol: self.symbol,
                exchange: self.exchange.filter(|e| !e.is_empty()),
                quantity: self.quantity,
                purchase_price: self.purchase_price,
            },
        })
    }
}

impl MutualFundRecord {
    fn into_holding(self) -> Result<Holding, ApiError> {
        ensure_valid_cost("mutual fund", self.id, self.quantity, self.purchase_price)?;
        Ok(Holding {
            id: self.id,
            external_id: self.external_id,
            user_id: self.user_id,
            purchase_date: self.purchase_date,
            position: Position::MutualFund {
                scheme_code: self.scheme_code,
                quantity: self.quantity,
                purchase_price: self.purchase_price,
            },
        })
    }
}

impl CryptoRecord {
    fn into_holding(self) -> Result<Holding, ApiError> {
        ensure_valid_cost("crypto", self.id, self.quantity, self.purchase_price)?;
        Ok(Holding {
            id: self.id,
            external_id: self.external_id,
            user_id: self.user_id,
            purchase_date: self.purchase_date,
            position: Position::Crypto {
                coin_id: self.coin_id,
                symbol: self.symbol,
                quantity: self.quantity,
                purchase_price: self.purchase_price,
            },
        })
    }
}

impl ManualRecord {
    fn into_holding(self) -> Result<Holding, ApiError> {
        ensure_non_negative("manual", self.id, "investedValue", self.invested_value)?;
        ensure_non_negative("manual", self.id, "currentValue", self.current_value)?;
        Ok(Holding {
            id: self.id,
            external_id: self.external_id,
            user_id: self.user_id,
            purchase_date: self.purchase_date,
            position: Position::Manual {
                asset_name: self.asset_name,
                asset_type: self.asset_type,
                invested_value: self.invested_value,
                current_value: self.current_value,
                maturity_date: self.maturity_date,
            },
        })
    }
}

/// Every holding of the user, split by asset type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoldingSet {
    pub stocks: Vec<Holding>,
    pub mutual_funds: Vec<Holding>,
    pub cryptos: Vec<Holding>,
    pub manuals: Vec<Holding>,
}

impl HoldingSet {
    pub fn len(&self) -> usize {
        self.stocks.len() + self.mutual_funds.len() + self.cryptos.len() + self.manuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten in the order stocks, mutual funds, cryptos, manuals.
    pub fn into_holdings(self) -> Vec<Holding> {
        let mut all = Vec::with_capacity(self.len());
        all.extend(self.stocks);
        all.extend(self.mutual_funds);
        all.extend(self.cryptos);
        all.extend(self.manuals);
        all
    }
}

/// Client for the portfolio service's holding endpoints.
#[derive(Debug, Clone)]
pub struct PortfolioClient {
    service: ServiceClient,
}

impl PortfolioClient {
    pub fn new(service: ServiceClient) -> Self {
        Self { service }
    }

    pub async fn fetch_stocks(&self) -> Result<Vec<Holding>, ApiError> {
        let records: Vec<StockRecord> = self.service.get_json(STOCKS_PATH).await?;
        records.into_iter().map(StockRecord::into_holding).collect()
    }

    pub async fn fetch_mutual_funds(&self) -> Result<Vec<Holding>, ApiError> {
        let records: Vec<MutualFundRecord> = self.service.get_json(MUTUAL_FUNDS_PATH).await?;
        records
            .into_iter()
            .map(MutualFundRecord::into_holding)
            .collect()
    }

    pub async fn fetch_cryptos(&self) -> Result<Vec<Holding>, ApiError> {
        let records: Vec<CryptoRecord> = self.service.get_json(CRYPTOS_PATH).await?;
        records.into_iter().map(CryptoRecord::into_holding).collect()
    }

    pub async fn fetch_manuals(&self) -> Result<Vec<Holding>, ApiError> {
        let records: Vec<ManualRecord> = self.service.get_json(MANUALS_PATH).await?;
        records.into_iter().map(ManualRecord::into_holding).collect()
    }

    /// Read all four lists concurrently. Any single failure fails the call.
    pub async fn fetch_all_holdings(&self) -> Result<HoldingSet, ApiError> {
        let (stocks, mutual_funds, cryptos, manuals) = tokio::try_join!(
            self.fetch_stocks(),
            self.fetch_mutual_funds(),
            self.fetch_cryptos(),
            self.fetch_manuals(),
        )?;

        debug!(
            stocks = stocks.len(),
            mutual_funds = mutual_funds.len(),
            cryptos = cryptos.len(),
            manuals = manuals.len(),
            "fetched holdings"
        );

        Ok(HoldingSet {
            stocks,
            mutual_funds,
            cryptos,
            manuals,
        })
    }
}
