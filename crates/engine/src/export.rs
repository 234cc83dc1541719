//! CSV export of expenses.

use std::io::Write;

use crate::{CategoryResolver, ResultEngine, Transaction};

const HEADER: [&str; 5] = ["date", "merchant", "category", "amount", "upi_id"];

/// Writes one row per expense (income-flagged rows are skipped), amounts in
/// major units with two decimals.
pub fn write_expenses_csv<W: Write>(
    writer: W,
    transactions: &[Transaction],
    resolver: &CategoryResolver,
) -> ResultEngine<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(HEADER)?;
    for tx in transactions.iter().filter(|tx| !tx.is_income) {
        let cents = tx.amount.cents();
        let amount = format!("{}.{:02}", cents / 100, cents % 100);
        csv.write_record([
            tx.timestamp.to_rfc3339().as_str(),
            tx.merchant_name.as_str(),
            resolver.resolve(&tx.category_id),
            amount.as_str(),
            tx.upi_id.as_deref().unwrap_or_default(),
        ])?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}
