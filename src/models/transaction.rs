use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Expense,
    Asset,
}

/// One row of the unified activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub kind: TransactionKind,
    /// `None` when the source record carried no usable date.
    pub date: Option<NaiveDate>,
    pub description: String,
    /// Signed amount; money leaving the user is negative.
    pub amount: Decimal,
}

/// Money spent acquiring an asset, derived from a holding record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetPurchase {
    pub id: String,
    pub date: Option<NaiveDate>,
    pub description: String,
    pub invested_value: Decimal,
}

impl AssetPurchase {
    pub fn new(id: impl Into<String>, description: impl Into<String>, invested_value: Decimal) -> Self {
        Self {
            id: id.into(),
            date: None,
            description: description.into(),
            invested_value,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}
