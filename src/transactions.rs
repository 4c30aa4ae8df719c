//! Unified activity feed: expenses and asset purchases in one list, newest first.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::models::{AssetPurchase, Expense, Holding, Transaction, TransactionKind};

/// Purchase records for every priced holding.
///
/// Manual assets are valuations rather than purchases and are skipped.
pub fn purchases_from_holdings(holdings: &[Holding]) -> Vec<AssetPurchase> {
    holdings
        .iter()
        .filter(|holding| !holding.is_manual())
        .map(|holding| {
            let quantity = holding.quantity().unwrap_or_default().normalize();
            AssetPurchase {
                id: holding.key(),
                date: holding.purchase_date,
                description: format!("Bought {quantity} {}", holding.label()),
                invested_value: holding.invested_value(),
            }
        })
        .collect()
}

/// Newest first; undated records after all dated ones.
fn newest_first(a: &Option<NaiveDate>, b: &Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Merge expenses and purchases into one feed sorted by date descending.
///
/// Both kinds are money out, so every amount is negative. The sort is stable:
/// records on the same date keep merge order (expenses, then purchases).
pub fn merge_transactions(expenses: &[Expense], purchases: &[AssetPurchase]) -> Vec<Transaction> {
    let expense_rows = expenses.iter().map(|expense| Transaction {
        id: expense.external_id.clone(),
        kind: TransactionKind::Expense,
        date: expense.expense_date,
        description: expense.description.clone(),
        amount: -expense.amount.abs(),
    });

    let purchase_rows = purchases.iter().map(|purchase| Transaction {
        id: purchase.id.clone(),
        kind: TransactionKind::Asset,
        date: purchase.date,
        description: purchase.description.clone(),
        amount: -purchase.invested_value.abs(),
    });

    let mut merged: Vec<Transaction> = expense_rows.chain(purchase_rows).collect();
    merged.sort_by(|a, b| newest_first(&a.date, &b.date));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn newest_entry_comes_first_and_amounts_are_negative() {
        let expenses = vec![Expense::new(1, "exp-1", dec!(50), "Dinner").with_date(ymd(2024, 2, 1))];
        let purchases =
            vec![AssetPurchase::new("stock-1", "Bought 10 AAPL", dec!(1000)).with_date(ymd(2024, 1, 1))];

        let feed = merge_transactions(&expenses, &purchases);

        assert_eq!(feed.len(), 2);
        assert_eq!(feed[0].id, "exp-1");
        assert_eq!(feed[0].kind, TransactionKind::Expense);
        assert_eq!(feed[0].amount, dec!(-50));
        assert_eq!(feed[1].id, "stock-1");
        assert_eq!(feed[1].kind, TransactionKind::Asset);
        assert_eq!(feed[1].amount, dec!(-1000));
    }

    #[test]
    fn same_day_keeps_merge_order() {
        let day = ymd(2024, 3, 3);
        let expenses = vec![
            Expense::new(1, "a", dec!(1), "first").with_date(day),
            Expense::new(2, "b", dec!(2), "second").with_date(day),
        ];
        let purchases = vec![AssetPurchase::new("stock-9", "Bought 1 X", dec!(3)).with_date(day)];

        let ids: Vec<String> = merge_transactions(&expenses, &purchases)
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "stock-9"]);
    }

    #[test]
    fn undated_records_sink_to_the_end_in_order() {
        let expenses = vec![
            Expense::new(1, "undated-1", dec!(5), "?"),
            Expense::new(2, "old", dec!(5), "old").with_date(ymd(2023, 1, 1)),
        ];
        let purchases = vec![
            AssetPurchase::new("undated-2", "Bought 1 Y", dec!(7)),
            AssetPurchase::new("new", "Bought 1 Z", dec!(7)).with_date(ymd(2024, 6, 1)),
        ];

        let ids: Vec<String> = merge_transactions(&expenses, &purchases)
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["new", "old", "undated-1", "undated-2"]);
    }

    #[test]
    fn empty_inputs_give_empty_feed() {
        assert!(merge_transactions(&[], &[]).is_empty());
    }

    #[test]
    fn purchases_skip_manual_assets() {
        let holdings = vec![
            Holding::stock(1, "AAPL", dec!(10.000), dec!(100)).with_purchase_date(ymd(2024, 1, 2)),
            Holding::manual(2, "Coins", "Gold", dec!(900), dec!(950)),
            Holding::crypto(3, "bitcoin", "BTC", dec!(0.5), dec!(40000)),
        ];

        let purchases = purchases_from_holdings(&holdings);
        assert_eq!(purchases.len(), 2);
        assert_eq!(purchases[0].id, "stock-1");
        assert_eq!(purchases[0].description, "Bought 10 AAPL");
        assert_eq!(purchases[0].invested_value, dec!(1000));
        assert_eq!(purchases[0].date, Some(ymd(2024, 1, 2)));
        assert_eq!(purchases[1].description, "Bought 0.5 BTC");
        assert_eq!(purchases[1].invested_value, dec!(20000));
    }
}
