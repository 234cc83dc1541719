//! Per-category aggregation of transactions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    CategoryResolver, EngineError, IncomeEntry, MoneyCents, Percentage, ResultEngine, Transaction,
};

/// Aggregate bucket for one category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpend {
    pub total_spent: MoneyCents,
    pub percentage: Percentage,
}

/// A named bucket, used where an ordered list reads better than a map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub total_spent: MoneyCents,
    pub percentage: Percentage,
}

/// Category totals with their percentage of the monthly income.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryBreakdown {
    pub monthly_income: MoneyCents,
    pub buckets: BTreeMap<String, CategorySpend>,
}

impl CategoryBreakdown {
    pub fn get(&self, category: &str) -> Option<&CategorySpend> {
        self.buckets.get(category)
    }

    /// Sum of every bucket.
    pub fn total(&self) -> MoneyCents {
        self.buckets.values().map(|b| b.total_spent).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Buckets as a list ordered by category name.
    pub fn shares(&self) -> Vec<CategoryShare> {
        self.buckets
            .iter()
            .map(|(category, spend)| CategoryShare {
                category: category.clone(),
                total_spent: spend.total_spent,
                percentage: spend.percentage,
            })
            .collect()
    }
}

/// Sums transaction amounts per resolved category name.
#[derive(Clone, Copy, Debug)]
pub struct Aggregator<'a> {
    resolver: &'a CategoryResolver,
}

impl<'a> Aggregator<'a> {
    pub fn new(resolver: &'a CategoryResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &'a CategoryResolver {
        self.resolver
    }

    /// Totals per category name. Unknown ids all land in the fallback bucket.
    pub fn totals_by_category(&self, transactions: &[Transaction]) -> BTreeMap<String, MoneyCents> {
        let mut totals: BTreeMap<String, MoneyCents> = BTreeMap::new();
        for tx in transactions {
            let name = self.resolver.resolve(&tx.category_id);
            *totals.entry(name.to_string()).or_default() += tx.amount;
        }
        totals
    }

    /// Totals per category plus their share of `monthly_income`.
    ///
    /// A zero or negative income has no meaningful percentage and yields
    /// [`EngineError::IncomeNotSet`]; a total or percentage that does not fit
    /// yields [`EngineError::InvalidAmount`].
    pub fn aggregate_by_category(
        &self,
        transactions: &[Transaction],
        monthly_income: MoneyCents,
    ) -> ResultEngine<CategoryBreakdown> {
        if !monthly_income.is_positive() {
            return Err(EngineError::IncomeNotSet);
        }

        let too_large = || EngineError::InvalidAmount("category total too large".to_string());
        let mut totals: BTreeMap<String, MoneyCents> = BTreeMap::new();
        for tx in transactions {
            let total = totals
                .entry(self.resolver.resolve(&tx.category_id).to_string())
                .or_default();
            *total = total.checked_add(tx.amount).ok_or_else(too_large)?;
        }

        let mut buckets = BTreeMap::new();
        for (name, total_spent) in totals {
            let percentage = Percentage::of(total_spent, monthly_income).ok_or_else(too_large)?;
            buckets.insert(
                name,
                CategorySpend {
                    total_spent,
                    percentage,
                },
            );
        }

        Ok(CategoryBreakdown {
            monthly_income,
            buckets,
        })
    }
}

/// Income totals per source, in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeSummary {
    pub total: MoneyCents,
    pub by_source: Vec<(String, MoneyCents)>,
}

pub fn income_by_source(entries: &[IncomeEntry]) -> IncomeSummary {
    let mut summary = IncomeSummary::default();
    for entry in entries {
        summary.total += entry.amount;
        match summary
            .by_source
            .iter_mut()
            .find(|(source, _)| *source == entry.source)
        {
            Some((_, amount)) => *amount += entry.amount,
            None => summary.by_source.push((entry.source.clone(), entry.amount)),
        }
    }
    summary
}

/// Everything received minus everything spent, recomputed from the rows.
pub fn balance(income: &[IncomeEntry], transactions: &[Transaction]) -> MoneyCents {
    let received: MoneyCents = income.iter().map(|e| e.amount).sum();
    transactions.iter().fold(received, |acc, tx| {
        if tx.is_income {
            acc + tx.amount
        } else {
            acc - tx.amount
        }
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::Category;

    fn tx(category_id: Uuid, cents: i64) -> Transaction {
        Transaction::new(
            Uuid::new_v4(),
            Uuid::nil(),
            MoneyCents::new(cents),
            category_id,
            Utc::now(),
            "merchant",
        )
        .unwrap()
    }

    #[test]
    fn percentage_overflow_is_not_reported_as_missing_income() {
        let shop = Category {
            id: Uuid::new_v4(),
            name: "Shopping".to_string(),
        };
        let resolver = CategoryResolver::new([shop.clone()]);
        let rows: Vec<Transaction> = (0..100).map(|_| tx(shop.id, MoneyCents::MAX.cents())).collect();

        let err = Aggregator::new(&resolver)
            .aggregate_by_category(&rows, MoneyCents::new(1))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
    }

    #[test]
    fn overflowing_totals_are_an_error() {
        let shop = Category {
            id: Uuid::new_v4(),
            name: "Shopping".to_string(),
        };
        let resolver = CategoryResolver::new([shop.clone()]);
        let mut huge = tx(shop.id, 100);
        huge.amount = MoneyCents::new(i64::MAX / 2 + 1);

        let err = Aggregator::new(&resolver)
            .aggregate_by_category(&[huge.clone(), huge], MoneyCents::from_major(1000))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
    }

    #[test]
    fn food_example_is_fifteen_percent() {
        let food = Category {
            id: Uuid::new_v4(),
            name: "Food".to_string(),
        };
        let resolver = CategoryResolver::new([food.clone()]);
        let aggregator = Aggregator::new(&resolver);

        let breakdown = aggregator
            .aggregate_by_category(
                &[tx(food.id, 100_00), tx(food.id, 50_00)],
                MoneyCents::from_major(1000),
            )
            .unwrap();

        let bucket = breakdown.get("Food").unwrap();
        assert_eq!(bucket.total_spent, MoneyCents::from_major(150));
        assert_eq!(bucket.percentage.to_string(), "15.00");
        assert_eq!(breakdown.buckets.len(), 1);
    }

    #[test]
    fn zero_income_is_an_explicit_error() {
        let resolver = CategoryResolver::default();
        let aggregator = Aggregator::new(&resolver);
        let err = aggregator
            .aggregate_by_category(&[tx(Uuid::new_v4(), 100)], MoneyCents::ZERO)
            .unwrap_err();
        assert_eq!(err, EngineError::IncomeNotSet);
        assert_eq!(err.to_string(), "income not set");
    }

    #[test]
    fn unknown_categories_share_the_fallback_bucket() {
        let resolver = CategoryResolver::default();
        let totals = Aggregator::new(&resolver)
            .totals_by_category(&[tx(Uuid::new_v4(), 100), tx(Uuid::new_v4(), 250)]);
        assert_eq!(totals.get("Other"), Some(&MoneyCents::new(350)));
    }

    #[test]
    fn income_by_source_groups_and_totals() {
        let entry = |source: &str, cents| {
            IncomeEntry::new(Uuid::new_v4(), Uuid::nil(), source, MoneyCents::new(cents), Utc::now())
                .unwrap()
        };
        let summary = income_by_source(&[
            entry("Salary", 50_000),
            entry("Freelance", 10_000),
            entry("Salary", 5_000),
        ]);
        assert_eq!(summary.total, MoneyCents::new(65_000));
        assert_eq!(
            summary.by_source,
            vec![
                ("Salary".to_string(), MoneyCents::new(55_000)),
                ("Freelance".to_string(), MoneyCents::new(10_000)),
            ]
        );
    }
}
