use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::date::deserialize_lenient_date;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCategory {
    pub id: i64,
    #[serde(default)]
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
}

/// A ledger entry from the expense service. `amount` is the positive sum spent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i64,
    pub external_id: String,
    #[serde(default)]
    pub user_id: String,
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_lenient_date")]
    pub expense_date: Option<NaiveDate>,
    #[serde(default)]
    pub category: Option<ExpenseCategory>,
}

impl Expense {
    pub fn new(
        id: i64,
        external_id: impl Into<String>,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            external_id: external_id.into(),
            user_id: String::new(),
            amount,
            description: description.into(),
            expense_date: None,
            category: None,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.expense_date = Some(date);
        self
    }
}

/// Body for `POST /expense/v1/expenses`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: String,
    pub expense_date: NaiveDate,
    pub category_id: i64,
}

impl ExpenseRequest {
    /// Checks the fields the expense service would otherwise reject.
    pub fn validate(&self) -> Result<(), String> {
        if self.amount <= Decimal::ZERO {
            return Err(format!("expense amount must be positive, got {}", self.amount));
        }
        if self.description.trim().is_empty() {
            return Err("expense description must not be empty".to_string());
        }
        Ok(())
    }
}

/// Body for `POST /expense/v1/categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

impl CategoryRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("category name must not be empty".to_string());
        }
        Ok(())
    }
}
