use serde::Serialize;

/// JSON output for one enriched holding
#[derive(Debug, Serialize)]
pub struct HoldingOutput {
    pub key: String,
    pub name: String,
    pub asset_class: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_price: Option<String>,
    pub current_value: String,
    pub invested_value: String,
    pub gain_loss: String,
    pub gain_loss_percent: String,
    pub allocation_percent: String,
    pub price_status: String,
}

/// JSON output for the holdings command
#[derive(Debug, Serialize)]
pub struct HoldingsOutput {
    pub as_of: String,
    pub filter: String,
    pub holdings: Vec<HoldingOutput>,
}

/// JSON output for portfolio totals
#[derive(Debug, Serialize)]
pub struct SummaryOutput {
    pub as_of: String,
    pub total_value: String,
    pub total_invested: String,
    pub return_amount: String,
    pub return_percent: String,
    pub holding_count: usize,
    /// Holdings valued at cost basis because no live price was available.
    pub fallback_count: usize,
}

/// JSON output for one asset class
#[derive(Debug, Serialize)]
pub struct AllocationOutput {
    pub asset_class: String,
    pub total_value: String,
    pub total_invested: String,
    pub gain_loss: String,
    pub gain_loss_percent: String,
    pub allocation_percent: String,
    pub count: usize,
}

/// JSON output for the unified transaction feed
#[derive(Debug, Serialize)]
pub struct TransactionOutput {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: Option<String>,
    pub description: String,
    pub amount: String,
}

/// JSON output for expenses
#[derive(Debug, Serialize)]
pub struct ExpenseOutput {
    pub id: String,
    pub date: Option<String>,
    pub description: String,
    pub amount: String,
    pub category: Option<String>,
}

/// JSON output for expense categories
#[derive(Debug, Serialize)]
pub struct CategoryOutput {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
}
