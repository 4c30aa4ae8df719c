use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Instrument families the market-data service can price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentKind {
    Stock,
    MutualFund,
    Crypto,
}

impl InstrumentKind {
    /// Path segment used by the market-data price endpoints.
    pub fn path_segment(self) -> &'static str {
        match self {
            InstrumentKind::Stock => "stock",
            InstrumentKind::MutualFund => "mf",
            InstrumentKind::Crypto => "crypto",
        }
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstrumentKind::Stock => "stock",
            InstrumentKind::MutualFund => "mutual fund",
            InstrumentKind::Crypto => "crypto",
        };
        f.write_str(name)
    }
}

/// Grouping used for per-class summaries.
///
/// Manual holdings are grouped by their free-form asset type ("Gold",
/// "Real Estate", ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssetClass {
    Stocks,
    MutualFunds,
    Crypto,
    Manual(String),
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetClass::Stocks => f.write_str("Stocks"),
            AssetClass::MutualFunds => f.write_str("Mutual Funds"),
            AssetClass::Crypto => f.write_str("Crypto"),
            AssetClass::Manual(asset_type) => f.write_str(asset_type),
        }
    }
}

impl Serialize for AssetClass {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The asset-specific part of a holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Position {
    Stock {
        symbol: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        exchange: Option<String>,
        quantity: Decimal,
        purchase_price: Decimal,
    },
    MutualFund {
        scheme_code: String,
        quantity: Decimal,
        purchase_price: Decimal,
    },
    Crypto {
        coin_id: String,
        symbol: String,
        quantity: Decimal,
        purchase_price: Decimal,
    },
    /// Assets without a market price (gold, property, deposits). Both values
    /// are stated by the user.
    Manual {
        asset_name: String,
        asset_type: String,
        invested_value: Decimal,
        current_value: Decimal,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        maturity_date: Option<NaiveDate>,
    },
}

/// An owned quantity of an instrument plus its acquisition cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub id: i64,
    #[serde(default)]
    pub external_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub position: Position,
}

impl Holding {
    fn with_position(id: i64, position: Position) -> Self {
        Self {
            id,
            external_id: String::new(),
            user_id: String::new(),
            purchase_date: None,
            position,
        }
    }

    pub fn stock(id: i64, symbol: impl Into<String>, quantity: Decimal, purchase_price: Decimal) -> Self {
        Self::with_position(
            id,
            Position::Stock {
                symbol: symbol.into(),
                exchange: None,
                quantity,
                purchase_price,
            },
        )
    }

    pub fn mutual_fund(
        id: i64,
        scheme_code: impl Into<String>,
        quantity: Decimal,
        purchase_price: Decimal,
    ) -> Self {
        Self::with_position(
            id,
            Position::MutualFund {
                scheme_code: scheme_code.into(),
                quantity,
                purchase_price,
            },
        )
    }

    pub fn crypto(
        id: i64,
        coin_id: impl Into<String>,
        symbol: impl Into<String>,
        quantity: Decimal,
        purchase_price: Decimal,
    ) -> Self {
        Self::with_position(
            id,
            Position::Crypto {
                coin_id: coin_id.into(),
                symbol: symbol.into(),
                quantity,
                purchase_price,
            },
        )
    }

    pub fn manual(
        id: i64,
        asset_name: impl Into<String>,
        asset_type: impl Into<String>,
        invested_value: Decimal,
        current_value: Decimal,
    ) -> Self {
        Self::with_position(
            id,
            Position::Manual {
                asset_name: asset_name.into(),
                asset_type: asset_type.into(),
                invested_value,
                current_value,
                maturity_date: None,
            },
        )
    }

    pub fn with_purchase_date(mut self, date: NaiveDate) -> Self {
        self.purchase_date = Some(date);
        self
    }

    /// Identifier unique across asset types, e.g. `stock-3` or `manual-7`.
    pub fn key(&self) -> String {
        let prefix = match self.position {
            Position::Stock { .. } => "stock",
            Position::MutualFund { .. } => "mf",
            Position::Crypto { .. } => "crypto",
            Position::Manual { .. } => "manual",
        };
        format!("{prefix}-{}", self.id)
    }

    /// Short human label: ticker, scheme code, coin symbol or asset name.
    pub fn label(&self) -> &str {
        match &self.position {
            Position::Stock { symbol, .. } => symbol,
            Position::MutualFund { scheme_code, .. } => scheme_code,
            Position::Crypto { symbol, .. } => symbol,
            Position::Manual { asset_name, .. } => asset_name,
        }
    }

    /// The instrument to price, or `None` for manual holdings.
    pub fn price_key(&self) -> Option<(InstrumentKind, &str)> {
        match &self.position {
            Position::Stock { symbol, .. } => Some((InstrumentKind::Stock, symbol)),
            Position::MutualFund { scheme_code, .. } => {
                Some((InstrumentKind::MutualFund, scheme_code))
            }
            Position::Crypto { coin_id, .. } => Some((InstrumentKind::Crypto, coin_id)),
            Position::Manual { .. } => None,
        }
    }

    pub fn quantity(&self) -> Option<Decimal> {
        match &self.position {
            Position::Stock { quantity, .. }
            | Position::MutualFund { quantity, .. }
            | Position::Crypto { quantity, .. } => Some(*quantity),
            Position::Manual { .. } => None,
        }
    }

    /// Per-unit purchase price, or `None` for manual holdings.
    pub fn cost_basis_price(&self) -> Option<Decimal> {
        match &self.position {
            Position::Stock { purchase_price, .. }
            | Position::MutualFund { purchase_price, .. }
            | Position::Crypto { purchase_price, .. } => Some(*purchase_price),
            Position::Manual { .. } => None,
        }
    }

    /// Total amount paid for the holding.
    ///
    /// Saturates at the `Decimal` bounds. Records read from the portfolio
    /// service are checked to fit before they become holdings.
    pub fn invested_value(&self) -> Decimal {
        match &self.position {
            Position::Stock { quantity, purchase_price, .. }
            | Position::MutualFund { quantity, purchase_price, .. }
            | Position::Crypto { quantity, purchase_price, .. } => {
                quantity.saturating_mul(*purchase_price)
            }
            Position::Manual { invested_value, .. } => *invested_value,
        }
    }

    /// Current value stated on the record itself (manual holdings only).
    pub fn stated_current_value(&self) -> Option<Decimal> {
        match &self.position {
            Position::Manual { current_value, .. } => Some(*current_value),
            _ => None,
        }
    }

    /// Value of the holding at the given unit price, or `None` if the
    /// product does not fit in a `Decimal`.
    ///
    /// Manual holdings ignore the price and return their stated value.
    pub fn value_at(&self, unit_price: Decimal) -> Option<Decimal> {
        match (self.quantity(), self.stated_current_value()) {
            (_, Some(stated)) => Some(stated),
            (Some(quantity), None) => quantity.checked_mul(unit_price),
            (None, None) => Some(Decimal::ZERO),
        }
    }

    pub fn asset_class(&self) -> AssetClass {
        match &self.position {
            Position::Stock { .. } => AssetClass::Stocks,
            Position::MutualFund { .. } => AssetClass::MutualFunds,
            Position::Crypto { .. } => AssetClass::Crypto,
            Position::Manual { asset_type, .. } => AssetClass::Manual(asset_type.clone()),
        }
    }

    pub fn is_manual(&self) -> bool {
        matches!(self.position, Position::Manual { .. })
    }
}
