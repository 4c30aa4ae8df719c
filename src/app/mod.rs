mod activity;
mod config;
mod portfolio;
mod session;
mod text;
mod types;

pub use activity::{
    add_category, add_expense, categories_output, delete_expense, expenses_output,
    parse_expense_request, transactions_output,
};
pub use config::config_output;
pub use portfolio::{allocation_output, holdings_output, summary_output};
pub use session::{login, logout, session_store};
pub use text::{
    allocation_text, categories_text, expenses_text, holdings_text, summary_text,
    transactions_text,
};
pub use types::{
    AllocationOutput, CategoryOutput, ExpenseOutput, HoldingOutput, HoldingsOutput,
    SummaryOutput, TransactionOutput,
};
