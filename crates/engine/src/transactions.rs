//! Expense transactions and income entries.
//!
//! Both are immutable once recorded and owned by a single user. Constructors
//! validate the invariants every aggregate relies on: strictly positive
//! amounts and non-blank labels.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{MoneyCents, ResultEngine, util::normalize_label};

/// A single recorded spending (or, with `is_income`, receiving) event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: MoneyCents,
    pub category_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub merchant_name: String,
    pub upi_id: Option<String>,
    pub is_income: bool,
}

impl Transaction {
    pub fn new(
        id: Uuid,
        user_id: Uuid,
        amount: MoneyCents,
        category_id: Uuid,
        timestamp: DateTime<Utc>,
        merchant_name: &str,
    ) -> ResultEngine<Self> {
        Ok(Self {
            id,
            user_id,
            amount: amount.ensure_positive("transaction amount")?,
            category_id,
            timestamp,
            merchant_name: normalize_label(merchant_name, "merchant name")?,
            upi_id: None,
            is_income: false,
        })
    }

    /// Attaches a UPI id; blank ids are dropped.
    #[must_use]
    pub fn with_upi_id(mut self, upi_id: Option<&str>) -> Self {
        self.upi_id = upi_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);
        self
    }

    #[must_use]
    pub fn as_income(mut self) -> Self {
        self.is_income = true;
        self
    }
}

/// A single recorded income event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub source: String,
    pub amount: MoneyCents,
    pub created_at: DateTime<Utc>,
}

impl IncomeEntry {
    pub fn new(
        id: Uuid,
        user_id: Uuid,
        source: &str,
        amount: MoneyCents,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        Ok(Self {
            id,
            user_id,
            source: normalize_label(source, "income source")?,
            amount: amount.ensure_positive("income amount")?,
            created_at,
        })
    }
}

/// Validated input for recording an expense; the store assigns the id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewExpense {
    pub amount: MoneyCents,
    pub merchant_name: String,
    pub category_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub upi_id: Option<String>,
}

impl NewExpense {
    pub fn new(
        amount: MoneyCents,
        merchant_name: &str,
        category_id: Uuid,
        timestamp: DateTime<Utc>,
        upi_id: Option<&str>,
    ) -> ResultEngine<Self> {
        Ok(Self {
            amount: amount.ensure_positive("transaction amount")?,
            merchant_name: normalize_label(merchant_name, "merchant name")?,
            category_id,
            timestamp,
            upi_id: upi_id
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string),
        })
    }
}

/// Validated input for recording income.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewIncome {
    pub source: String,
    pub amount: MoneyCents,
    pub created_at: DateTime<Utc>,
}

impl NewIncome {
    pub fn new(source: &str, amount: MoneyCents, created_at: DateTime<Utc>) -> ResultEngine<Self> {
        Ok(Self {
            source: normalize_label(source, "income source")?,
            amount: amount.ensure_positive("income amount")?,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EngineError;

    #[test]
    fn transaction_rejects_non_positive_amounts() {
        let err = Transaction::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            MoneyCents::ZERO,
            Uuid::new_v4(),
            Utc::now(),
            "Cafe",
        )
        .unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidAmount("transaction amount must be > 0".to_string())
        );
    }

    #[test]
    fn transaction_requires_merchant() {
        let res = Transaction::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            MoneyCents::new(100),
            Uuid::new_v4(),
            Utc::now(),
            "  ",
        );
        assert!(matches!(res, Err(EngineError::InvalidName(_))));
    }

    #[test]
    fn blank_upi_id_is_dropped() {
        let expense = NewExpense::new(
            MoneyCents::new(100),
            "Metro",
            Uuid::new_v4(),
            Utc::now(),
            Some("  "),
        )
        .unwrap();
        assert_eq!(expense.upi_id, None);
    }

    #[test]
    fn income_requires_source() {
        assert!(NewIncome::new("", MoneyCents::new(100), Utc::now()).is_err());
        assert!(NewIncome::new("Salary", MoneyCents::new(-1), Utc::now()).is_err());
    }
}
