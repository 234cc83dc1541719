//! Unnecessary-spend analysis.
//!
//! The result is what gets serialized into the assistant prompt, so it never
//! carries the user id.

use serde::{Deserialize, Serialize};

use crate::{
    Aggregator, CategorySpend, MoneyCents, Percentage, ResultEngine, Transaction, util::normalize_text,
};

/// Categories considered discretionary.
pub const UNNECESSARY_CATEGORIES: [&str; 3] = ["Entertainment", "Shopping", "Food"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnnecessaryExpense {
    pub category: String,
    #[serde(flatten)]
    pub spend: CategorySpend,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingAnalysis {
    pub monthly_income: MoneyCents,
    pub total_unnecessary_expense: MoneyCents,
    pub unnecessary_expenses: Vec<UnnecessaryExpense>,
}

impl SpendingAnalysis {
    /// Keeps the buckets whose category is in `UNNECESSARY_CATEGORIES`.
    ///
    /// Fails with `IncomeNotSet` like every percentage-of-income view.
    pub fn build(
        aggregator: &Aggregator<'_>,
        transactions: &[Transaction],
        monthly_income: MoneyCents,
    ) -> ResultEngine<Self> {
        let expenses: Vec<Transaction> = transactions
            .iter()
            .filter(|tx| !tx.is_income)
            .cloned()
            .collect();
        let breakdown = aggregator.aggregate_by_category(&expenses, monthly_income)?;

        let unnecessary: Vec<String> = UNNECESSARY_CATEGORIES
            .iter()
            .map(|name| normalize_text(name))
            .collect();
        let unnecessary_expenses: Vec<UnnecessaryExpense> = breakdown
            .buckets
            .into_iter()
            .filter(|(name, _)| unnecessary.contains(&normalize_text(name)))
            .map(|(category, spend)| UnnecessaryExpense { category, spend })
            .collect();

        Ok(Self {
            monthly_income,
            total_unnecessary_expense: unnecessary_expenses
                .iter()
                .map(|e| e.spend.total_spent)
                .sum(),
            unnecessary_expenses,
        })
    }

    /// Share of income going to unnecessary categories.
    pub fn percentage(&self) -> Percentage {
        Percentage::of(self.total_unnecessary_expense, self.monthly_income)
            .unwrap_or(Percentage::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::{Category, CategoryResolver, EngineError};

    fn category(name: &str) -> Category {
        Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
        }
    }

    #[test]
    fn keeps_only_unnecessary_categories() {
        let food = category("Food");
        let shopping = category("shopping");
        let rent = category("Rent");
        let resolver = CategoryResolver::new(vec![food.clone(), shopping.clone(), rent.clone()]);
        let aggregator = Aggregator::new(&resolver);
        let tx = |c: &Category, major| {
            Transaction::new(
                Uuid::new_v4(),
                Uuid::nil(),
                MoneyCents::from_major(major),
                c.id,
                Utc::now(),
                "m",
            )
            .unwrap()
        };

        let analysis = SpendingAnalysis::build(
            &aggregator,
            &[tx(&food, 100), tx(&shopping, 50), tx(&rent, 400)],
            MoneyCents::from_major(1000),
        )
        .unwrap();

        assert_eq!(analysis.total_unnecessary_expense, MoneyCents::from_major(150));
        assert_eq!(analysis.unnecessary_expenses.len(), 2);
        assert_eq!(analysis.percentage().to_string(), "15.00");

        let json = serde_json::to_value(&analysis).unwrap();
        assert!(json.get("userId").is_none());
        assert_eq!(json["unnecessaryExpenses"][0]["category"], "Food");
        assert_eq!(json["unnecessaryExpenses"][0]["percentage"], "10.00");
    }

    #[test]
    fn requires_income() {
        let resolver = CategoryResolver::default();
        let err = SpendingAnalysis::build(&Aggregator::new(&resolver), &[], MoneyCents::ZERO)
            .unwrap_err();
        assert_eq!(err, EngineError::IncomeNotSet);
    }
}
