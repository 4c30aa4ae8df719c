use tracing::info;

use super::client::segment;
use super::{ApiError, ServiceClient};
use crate::models::{CategoryRequest, Expense, ExpenseCategory, ExpenseRequest};

const EXPENSES_PATH: &str = "/expense/v1/expenses";
const CATEGORIES_PATH: &str = "/expense/v1/categories";

/// Client for the expense ledger service.
#[derive(Debug, Clone)]
pub struct ExpenseClient {
    service: ServiceClient,
}

impl ExpenseClient {
    pub fn new(service: ServiceClient) -> Self {
        Self { service }
    }

    pub async fn list_expenses(&self) -> Result<Vec<Expense>, ApiError> {
        self.service.get_json(EXPENSES_PATH).await
    }

    pub async fn create_expense(&self, request: &ExpenseRequest) -> Result<Expense, ApiError> {
        request.validate().map_err(ApiError::InvalidRequest)?;
        let expense: Expense = self.service.post_json(EXPENSES_PATH, request).await?;
        info!(external_id = %expense.external_id, amount = %expense.amount, "expense created");
        Ok(expense)
    }

    pub async fn delete_expense(&self, external_id: &str) -> Result<(), ApiError> {
        if external_id.trim().is_empty() {
            return Err(ApiError::InvalidRequest(
                "expense id must not be empty".to_string(),
            ));
        }
        let path = format!("{EXPENSES_PATH}/{}", segment(external_id));
        self.service.delete(&path).await?;
        info!(external_id, "expense deleted");
        Ok(())
    }

    pub async fn list_categories(&self) -> Result<Vec<ExpenseCategory>, ApiError> {
        self.service.get_json(CATEGORIES_PATH).await
    }

    pub async fn create_category(
        &self,
        request: &CategoryRequest,
    ) -> Result<ExpenseCategory, ApiError> {
        request.validate().map_err(ApiError::InvalidRequest)?;
        self.service.post_json(CATEGORIES_PATH, request).await
    }
}
