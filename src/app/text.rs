//! Plain-text rendering of command output for interactive use.

use super::types::{
    AllocationOutput, CategoryOutput, ExpenseOutput, HoldingsOutput, SummaryOutput,
    TransactionOutput,
};

pub fn holdings_text(output: &HoldingsOutput) -> String {
    if output.holdings.is_empty() {
        return format!("No holdings ({})\n", output.filter);
    }

    let mut out = format!(
        "{:<12} {:<28} {:<14} {:>14} {:>14} {:>14} {:>9} {:>8}\n",
        "KEY", "NAME", "CLASS", "VALUE", "INVESTED", "GAIN/LOSS", "RETURN", "ALLOC"
    );
    let mut any_fallback = false;
    for h in &output.holdings {
        let marker = if h.price_status == "fallback" {
            any_fallback = true;
            " *"
        } else {
            ""
        };
        out.push_str(&format!(
            "{:<12} {:<28} {:<14} {:>14} {:>14} {:>14} {:>9} {:>8}{marker}\n",
            h.key,
            h.name,
            h.asset_class,
            h.current_value,
            h.invested_value,
            h.gain_loss,
            h.gain_loss_percent,
            h.allocation_percent,
        ));
    }
    if any_fallback {
        out.push_str("\n* no live price; valued at cost basis\n");
    }
    out
}

pub fn summary_text(output: &SummaryOutput) -> String {
    let mut out = format!(
        "Total value:    {}\nTotal invested: {}\nReturn:         {} ({})\nHoldings:       {}\n",
        output.total_value,
        output.total_invested,
        output.return_amount,
        output.return_percent,
        output.holding_count,
    );
    if output.fallback_count > 0 {
        out.push_str(&format!(
            "Fallback:       {} valued at cost basis\n",
            output.fallback_count
        ));
    }
    out.push_str(&format!("As of:          {}\n", output.as_of));
    out
}

pub fn allocation_text(rows: &[AllocationOutput]) -> String {
    rows.iter()
        .map(|row| {
            format!(
                "{:<16} {:>14} {:>9} {:>8}  ({} holdings)\n",
                row.asset_class,
                row.total_value,
                row.gain_loss_percent,
                row.allocation_percent,
                row.count
            )
        })
        .collect()
}

pub fn transactions_text(rows: &[TransactionOutput]) -> String {
    rows.iter()
        .map(|row| {
            format!(
                "{:<10} {:<8} {:>14}  {}\n",
                row.date.as_deref().unwrap_or("-"),
                row.kind,
                row.amount,
                row.description
            )
        })
        .collect()
}

pub fn expenses_text(rows: &[ExpenseOutput]) -> String {
    rows.iter()
        .map(|row| {
            format!(
                "{:<10} {:>14}  {:<16} {}  [{}]\n",
                row.date.as_deref().unwrap_or("-"),
                row.amount,
                row.category.as_deref().unwrap_or("-"),
                row.description,
                row.id
            )
        })
        .collect()
}

pub fn categories_text(rows: &[CategoryOutput]) -> String {
    rows.iter()
        .map(|row| match row.parent_id {
            Some(parent) => format!("{:>5}  {} (parent {parent})\n", row.id, row.name),
            None => format!("{:>5}  {}\n", row.id, row.name),
        })
        .collect()
}
