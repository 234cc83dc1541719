//! Flags overspending and encouraged categories against fixed thresholds.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
    Aggregator, CategoryBreakdown, CategoryShare, MoneyCents, Percentage, ResultEngine,
    Transaction, util::normalize_text,
};

/// Categories whose low spending is worth encouraging.
pub const ENCOURAGED_CATEGORIES: [&str; 4] =
    ["Healthcare", "Education", "Investments", "Self-Development"];

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Categories above the overspend threshold.
    pub flagged: Vec<CategoryShare>,
    /// Allow-listed categories below the underspend threshold.
    pub encouraged: Vec<CategoryShare>,
}

#[derive(Clone, Debug)]
pub struct ThresholdClassifier {
    overspend: Percentage,
    underspend: Percentage,
    encouraged: BTreeSet<String>,
}

impl Default for ThresholdClassifier {
    fn default() -> Self {
        Self::new(Percentage::whole(30), Percentage::whole(20), ENCOURAGED_CATEGORIES)
    }
}

impl ThresholdClassifier {
    pub fn new<I, S>(overspend: Percentage, underspend: Percentage, encouraged: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            overspend,
            underspend,
            encouraged: encouraged
                .into_iter()
                .map(|name| normalize_text(name.as_ref()))
                .collect(),
        }
    }

    pub fn overspend_threshold(&self) -> Percentage {
        self.overspend
    }

    pub fn underspend_threshold(&self) -> Percentage {
        self.underspend
    }

    pub fn is_encouraged(&self, category: &str) -> bool {
        self.encouraged.contains(&normalize_text(category))
    }

    /// Strictly above `overspend` is flagged; strictly below `underspend` and
    /// allow-listed is encouraged. Output is ordered by category name.
    pub fn classify(&self, breakdown: &CategoryBreakdown) -> Classification {
        let mut result = Classification::default();
        for share in breakdown.shares() {
            if share.percentage > self.overspend {
                result.flagged.push(share);
            } else if share.percentage < self.underspend && self.is_encouraged(&share.category) {
                result.encouraged.push(share);
            }
        }
        result
    }

    /// Aggregates and classifies in one go, surfacing
    /// [`IncomeNotSet`](crate::EngineError::IncomeNotSet) for a missing income.
    pub fn classify_spending(
        &self,
        aggregator: &Aggregator<'_>,
        transactions: &[Transaction],
        monthly_income: MoneyCents,
    ) -> ResultEngine<Classification> {
        let breakdown = aggregator.aggregate_by_category(transactions, monthly_income)?;
        Ok(self.classify(&breakdown))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::CategorySpend;

    fn breakdown(entries: &[(&str, i64)]) -> CategoryBreakdown {
        let monthly_income = MoneyCents::from_major(1000);
        let buckets: BTreeMap<String, CategorySpend> = entries
            .iter()
            .map(|(name, major)| {
                let total_spent = MoneyCents::from_major(*major);
                (
                    name.to_string(),
                    CategorySpend {
                        total_spent,
                        percentage: Percentage::of(total_spent, monthly_income).unwrap(),
                    },
                )
            })
            .collect();
        CategoryBreakdown {
            monthly_income,
            buckets,
        }
    }

    fn names(shares: &[CategoryShare]) -> Vec<&str> {
        shares.iter().map(|s| s.category.as_str()).collect()
    }

    #[test]
    fn food_at_thirty_five_percent_is_flagged() {
        let result = ThresholdClassifier::default().classify(&breakdown(&[("Food", 350)]));
        assert_eq!(names(&result.flagged), vec!["Food"]);
        assert!(result.encouraged.is_empty());
    }

    #[test]
    fn exactly_at_threshold_is_not_flagged() {
        let result = ThresholdClassifier::default().classify(&breakdown(&[("Rent", 300)]));
        assert!(result.flagged.is_empty());
    }

    #[test]
    fn encouraged_requires_allow_list_and_low_share() {
        let result = ThresholdClassifier::default().classify(&breakdown(&[
            ("Education", 50),
            ("Healthcare", 250),
            ("Travel", 10),
        ]));
        assert_eq!(names(&result.encouraged), vec!["Education"]);
        assert!(result.flagged.is_empty());
    }

    #[test]
    fn allow_list_matching_ignores_case() {
        let classifier = ThresholdClassifier::default();
        assert!(classifier.is_encouraged("self-development"));
        assert!(!classifier.is_encouraged("Shopping"));
    }
}
