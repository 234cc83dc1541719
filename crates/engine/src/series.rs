//! Income vs expense time series.
//!
//! Both streams are bucketed by calendar date in the caller's timezone. This
//! is the only bucketing policy; month-level views use [`MonthlySnapshot`].
//!
//! [`MonthlySnapshot`]: crate::MonthlySnapshot

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::{IncomeEntry, MoneyCents, Transaction};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub income: MoneyCents,
    pub expense: MoneyCents,
}

pub(crate) fn local_date<Tz: TimeZone>(at: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    at.with_timezone(tz).date_naive()
}

/// Merges income entries and transactions into one ascending daily series.
///
/// Days present on only one side get `0` on the other. Transactions marked
/// `is_income` are counted as income.
pub fn merge_time_series<Tz: TimeZone>(
    income: &[IncomeEntry],
    transactions: &[Transaction],
    tz: &Tz,
) -> Vec<SeriesPoint> {
    let mut days: BTreeMap<NaiveDate, (MoneyCents, MoneyCents)> = BTreeMap::new();

    for entry in income {
        let day = days.entry(local_date(&entry.created_at, tz)).or_default();
        day.0 += entry.amount;
    }
    for tx in transactions {
        let day = days.entry(local_date(&tx.timestamp, tz)).or_default();
        if tx.is_income {
            day.0 += tx.amount;
        } else {
            day.1 += tx.amount;
        }
    }

    days.into_iter()
        .map(|(date, (income, expense))| SeriesPoint {
            date,
            income,
            expense,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use uuid::Uuid;

    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn income(cents: i64, when: DateTime<Utc>) -> IncomeEntry {
        IncomeEntry::new(Uuid::new_v4(), Uuid::nil(), "Salary", MoneyCents::new(cents), when).unwrap()
    }

    fn expense(cents: i64, when: DateTime<Utc>) -> Transaction {
        Transaction::new(
            Uuid::new_v4(),
            Uuid::nil(),
            MoneyCents::new(cents),
            Uuid::new_v4(),
            when,
            "Shop",
        )
        .unwrap()
    }

    #[test]
    fn empty_inputs_give_empty_series() {
        assert!(merge_time_series(&[], &[], &Utc).is_empty());
    }

    #[test]
    fn buckets_by_day_and_fills_missing_side() {
        let series = merge_time_series(
            &[income(1000, at(2025, 3, 2, 9)), income(500, at(2025, 3, 2, 18))],
            &[expense(200, at(2025, 3, 1, 12)), expense(300, at(2025, 3, 2, 10))],
            &Utc,
        );
        assert_eq!(
            series,
            vec![
                SeriesPoint {
                    date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                    income: MoneyCents::ZERO,
                    expense: MoneyCents::new(200),
                },
                SeriesPoint {
                    date: NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
                    income: MoneyCents::new(1500),
                    expense: MoneyCents::new(300),
                },
            ]
        );
    }

    #[test]
    fn day_boundary_follows_timezone() {
        // 20:00 UTC is already the next day in India (UTC+05:30).
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let series = merge_time_series(&[], &[expense(100, at(2025, 3, 1, 20))], &ist);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2025, 3, 2).unwrap());
    }

    #[test]
    fn income_flagged_transactions_count_as_income() {
        let series = merge_time_series(&[], &[expense(100, at(2025, 1, 1, 0)).as_income()], &Utc);
        assert_eq!(series[0].income, MoneyCents::new(100));
        assert_eq!(series[0].expense, MoneyCents::ZERO);
    }
}
