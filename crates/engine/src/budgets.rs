//! Monthly budgets per category and their comparison with actual spending.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Aggregator, MoneyCents, ResultEngine, Transaction};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub amount: MoneyCents,
}

impl Budget {
    pub fn new(user_id: Uuid, category_id: Uuid, amount: MoneyCents) -> ResultEngine<Self> {
        Ok(Self {
            user_id,
            category_id,
            amount: amount.ensure_positive("budget amount")?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub category_id: Uuid,
    pub category: String,
    pub planned: MoneyCents,
    pub spent: MoneyCents,
    /// Negative once the budget is exceeded.
    pub remaining: MoneyCents,
    pub over_budget: bool,
}

/// One line per budget, in the order given.
///
/// Spending is matched on category id, so two budgets whose ids resolve to
/// the same fallback name still get their own totals.
pub fn budget_vs_actual(
    aggregator: &Aggregator<'_>,
    budgets: &[Budget],
    transactions: &[Transaction],
) -> Vec<BudgetLine> {
    budgets
        .iter()
        .map(|budget| {
            let spent: MoneyCents = transactions
                .iter()
                .filter(|tx| !tx.is_income && tx.category_id == budget.category_id)
                .map(|tx| tx.amount)
                .sum();
            let remaining = budget.amount - spent;
            BudgetLine {
                category_id: budget.category_id,
                category: aggregator.resolver().resolve(&budget.category_id).to_string(),
                planned: budget.amount,
                spent,
                remaining,
                over_budget: remaining.is_negative(),
            }
        })
        .collect()
}
