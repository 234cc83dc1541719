//! Recent activity feed mixing income and expenses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CategoryResolver, IncomeEntry, MoneyCents, Transaction};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Income,
    Expense,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub kind: ActivityKind,
    /// Income source, or the category name of an expense.
    pub label: String,
    pub amount: MoneyCents,
    pub at: DateTime<Utc>,
}

/// Newest first; `limit` caps the number of entries.
pub fn recent_activity(
    income: &[IncomeEntry],
    transactions: &[Transaction],
    resolver: &CategoryResolver,
    limit: Option<usize>,
) -> Vec<ActivityEntry> {
    let mut entries: Vec<ActivityEntry> = income
        .iter()
        .map(|entry| ActivityEntry {
            kind: ActivityKind::Income,
            label: entry.source.clone(),
            amount: entry.amount,
            at: entry.created_at,
        })
        .chain(transactions.iter().map(|tx| ActivityEntry {
            kind: if tx.is_income {
                ActivityKind::Income
            } else {
                ActivityKind::Expense
            },
            label: resolver.resolve(&tx.category_id).to_string(),
            amount: tx.amount,
            at: tx.timestamp,
        }))
        .collect();

    entries.sort_by(|a, b| b.at.cmp(&a.at));
    if let Some(limit) = limit {
        entries.truncate(limit);
    }
    entries
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    use super::*;
    use crate::Category;

    #[test]
    fn newest_first_with_labels() {
        let t0 = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
        let food = Category {
            id: Uuid::new_v4(),
            name: "Food".to_string(),
        };
        let resolver = CategoryResolver::new(vec![food.clone()]);
        let income = vec![
            IncomeEntry::new(Uuid::new_v4(), Uuid::nil(), "Salary", MoneyCents::new(100), t0)
                .unwrap(),
        ];
        let txs = vec![
            Transaction::new(
                Uuid::new_v4(),
                Uuid::nil(),
                MoneyCents::new(50),
                food.id,
                t0 + Duration::hours(1),
                "Cafe",
            )
            .unwrap(),
            Transaction::new(
                Uuid::new_v4(),
                Uuid::nil(),
                MoneyCents::new(70),
                Uuid::new_v4(),
                t0 - Duration::hours(1),
                "Unknown",
            )
            .unwrap(),
        ];

        let feed = recent_activity(&income, &txs, &resolver, None);
        let labels: Vec<_> = feed.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Food", "Salary", "Other"]);
        assert_eq!(feed[1].kind, ActivityKind::Income);

        assert_eq!(recent_activity(&income, &txs, &resolver, Some(1)).len(), 1);
    }
}
