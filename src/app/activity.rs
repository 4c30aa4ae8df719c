use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::api::ExpenseClient;
use crate::config::DisplayConfig;
use crate::format::format_money;
use crate::models::{
    parse_record_date, CategoryRequest, Expense, ExpenseCategory, ExpenseRequest, Transaction,
    TransactionKind,
};

use super::types::{CategoryOutput, ExpenseOutput, TransactionOutput};

pub fn transactions_output(
    transactions: &[Transaction],
    display: &DisplayConfig,
) -> Vec<TransactionOutput> {
    transactions
        .iter()
        .map(|t| TransactionOutput {
            id: t.id.clone(),
            kind: match t.kind {
                TransactionKind::Expense => "expense",
                TransactionKind::Asset => "asset",
            }
            .to_string(),
            date: t.date.map(|d| d.to_string()),
            description: t.description.clone(),
            amount: format_money(t.amount, display),
        })
        .collect()
}

fn expense_output(expense: &Expense, display: &DisplayConfig) -> ExpenseOutput {
    ExpenseOutput {
        id: expense.external_id.clone(),
        date: expense.expense_date.map(|d| d.to_string()),
        description: expense.description.clone(),
        amount: format_money(expense.amount, display),
        category: expense.category.as_ref().map(|c| c.name.clone()),
    }
}

pub fn expenses_output(expenses: &[Expense], display: &DisplayConfig) -> Vec<ExpenseOutput> {
    expenses.iter().map(|e| expense_output(e, display)).collect()
}

pub fn categories_output(categories: &[ExpenseCategory]) -> Vec<CategoryOutput> {
    categories
        .iter()
        .map(|c| CategoryOutput {
            id: c.id,
            name: c.name.clone(),
            parent_id: c.parent_id,
        })
        .collect()
}

/// Build an expense request from command-line strings.
///
/// `date` defaults to `today`.
pub fn parse_expense_request(
    amount: &str,
    description: &str,
    date: Option<&str>,
    category_id: i64,
    today: NaiveDate,
) -> Result<ExpenseRequest> {
    let amount =
        Decimal::from_str(amount.trim()).with_context(|| format!("Invalid amount: {amount}"))?;
    let expense_date = match date {
        Some(raw) => parse_record_date(raw).ok_or_else(|| anyhow!("Invalid date: {raw}"))?,
        None => today,
    };

    let request = ExpenseRequest {
        amount,
        description: description.trim().to_string(),
        expense_date,
        category_id,
    };
    request.validate().map_err(|e| anyhow!(e))?;
    Ok(request)
}

pub async fn add_expense(
    client: &ExpenseClient,
    request: &ExpenseRequest,
    display: &DisplayConfig,
) -> Result<ExpenseOutput> {
    let created = client
        .create_expense(request)
        .await
        .context("Failed to create expense")?;
    Ok(expense_output(&created, display))
}

pub async fn delete_expense(client: &ExpenseClient, external_id: &str) -> Result<serde_json::Value> {
    client
        .delete_expense(external_id)
        .await
        .with_context(|| format!("Failed to delete expense {external_id}"))?;
    Ok(serde_json::json!({ "deleted": external_id }))
}

pub async fn add_category(
    client: &ExpenseClient,
    name: &str,
    parent_id: Option<i64>,
) -> Result<CategoryOutput> {
    let request = CategoryRequest {
        name: name.trim().to_string(),
        parent_id,
    };
    request.validate().map_err(|e| anyhow!(e))?;

    let created = client
        .create_category(&request)
        .await
        .context("Failed to create category")?;
    Ok(CategoryOutput {
        id: created.id,
        name: created.name,
        parent_id: created.parent_id,
    })
}
