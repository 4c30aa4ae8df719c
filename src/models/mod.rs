mod date;
mod expense;
mod holding;
mod quote;
mod transaction;

pub use date::{deserialize_lenient_date, parse_record_date};
pub use expense::{CategoryRequest, Expense, ExpenseCategory, ExpenseRequest};
pub use holding::{AssetClass, Holding, InstrumentKind, Position};
pub use quote::PriceQuote;
pub use transaction::{AssetPurchase, Transaction, TransactionKind};
