//! Monthly analytics snapshot.
//!
//! A snapshot is always recomputed from the full set of the user's rows for
//! that month, never incremented, so re-running it after any write converges
//! to `total_spent == sum(month's transactions)`.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, IncomeEntry, MoneyCents, ResultEngine, Transaction};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> ResultEngine<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidDate(format!("invalid month: {month}")));
        }
        Ok(Self { year, month })
    }

    /// Calendar month of `at` in `tz`.
    pub fn of<Tz: TimeZone>(at: &DateTime<Utc>, tz: &Tz) -> Self {
        let local = at.with_timezone(tz);
        Self {
            year: local.year(),
            month: local.month(),
        }
    }

    fn contains<Tz: TimeZone>(&self, at: &DateTime<Utc>, tz: &Tz) -> bool {
        Self::of(at, tz) == *self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySnapshot {
    pub user_id: Uuid,
    pub period: YearMonth,
    pub total_spent: MoneyCents,
    /// Category with the largest spend; ties go to the lowest id.
    pub top_category: Option<Uuid>,
    /// Month income minus month spending; may be negative.
    pub savings: MoneyCents,
}

impl MonthlySnapshot {
    /// Builds the snapshot for `period` out of all of the user's rows; rows
    /// outside the month or owned by other users are ignored.
    pub fn compute<Tz: TimeZone>(
        user_id: Uuid,
        period: YearMonth,
        transactions: &[Transaction],
        income: &[IncomeEntry],
        tz: &Tz,
    ) -> Self {
        let mut total_spent = MoneyCents::ZERO;
        let mut month_income = MoneyCents::ZERO;
        let mut per_category: HashMap<Uuid, MoneyCents> = HashMap::new();

        for tx in transactions
            .iter()
            .filter(|tx| tx.user_id == user_id && period.contains(&tx.timestamp, tz))
        {
            if tx.is_income {
                month_income += tx.amount;
                continue;
            }
            total_spent += tx.amount;
            *per_category.entry(tx.category_id).or_default() += tx.amount;
        }

        month_income += income
            .iter()
            .filter(|e| e.user_id == user_id && period.contains(&e.created_at, tz))
            .map(|e| e.amount)
            .sum();

        let top_category = per_category
            .into_iter()
            .max_by(|(id_a, a), (id_b, b)| a.cmp(b).then_with(|| id_b.cmp(id_a)))
            .map(|(id, _)| id);

        Self {
            user_id,
            period,
            total_spent,
            top_category,
            savings: month_income - total_spent,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, m, d, 12, 0, 0).unwrap()
    }

    fn tx(user: Uuid, category: Uuid, cents: i64, when: DateTime<Utc>) -> Transaction {
        Transaction::new(Uuid::new_v4(), user, MoneyCents::new(cents), category, when, "m").unwrap()
    }

    #[test]
    fn rejects_invalid_month() {
        assert!(YearMonth::new(2025, 0).is_err());
        assert!(YearMonth::new(2025, 13).is_err());
        assert!(YearMonth::new(2025, 12).is_ok());
    }

    #[test]
    fn totals_only_the_requested_month_and_user() {
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();
        let food = Uuid::new_v4();
        let rent = Uuid::new_v4();
        let txs = vec![
            tx(user, food, 100, at(3, 1)),
            tx(user, rent, 500, at(3, 5)),
            tx(user, food, 50, at(3, 20)),
            tx(user, food, 9999, at(4, 1)),
            tx(other, food, 9999, at(3, 2)),
        ];
        let income = vec![
            IncomeEntry::new(Uuid::new_v4(), user, "Salary", MoneyCents::new(2000), at(3, 1)).unwrap(),
            IncomeEntry::new(Uuid::new_v4(), user, "Salary", MoneyCents::new(2000), at(4, 1)).unwrap(),
        ];

        let snapshot = MonthlySnapshot::compute(
            user,
            YearMonth::new(2025, 3).unwrap(),
            &txs,
            &income,
            &Utc,
        );

        assert_eq!(snapshot.total_spent, MoneyCents::new(650));
        assert_eq!(snapshot.top_category, Some(rent));
        assert_eq!(snapshot.savings, MoneyCents::new(1350));
    }

    #[test]
    fn empty_month_has_no_top_category() {
        let snapshot = MonthlySnapshot::compute(
            Uuid::new_v4(),
            YearMonth::new(2025, 1).unwrap(),
            &[],
            &[],
            &Utc,
        );
        assert_eq!(snapshot.total_spent, MoneyCents::ZERO);
        assert_eq!(snapshot.top_category, None);
    }
}
