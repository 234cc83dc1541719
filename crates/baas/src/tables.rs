//! Row schemas of the hosted tables.
//!
//! Every response is decoded into one of these explicit types, then converted
//! into the engine's domain types, which re-validates amounts and labels.
//! Field names on the wire follow the hosted schema.

use chrono::{DateTime, NaiveDateTime, Utc};
use engine::{
    Asset, AssetCategory, Budget, Category, DEFAULT_EXPENSE_CATEGORY_ID, IncomeEntry, MoneyCents,
    MonthlySnapshot, ResultEngine, Transaction, UserProfile, YearMonth,
};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

pub const USERS: &str = "users";
pub const CATEGORIES: &str = "categories";
pub const TRANSACTIONS: &str = "transactions";
pub const INCOME: &str = "income";
pub const BUDGETS: &str = "budgets";
pub const ANALYTICS: &str = "analytics";
pub const ASSETS: &str = "asset_distribution";

/// Accepts RFC 3339 as well as the zone-less timestamps Postgres returns for
/// `timestamp` columns (read as UTC).
fn timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    if let Ok(at) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(at.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&raw, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

#[derive(Debug, Deserialize)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "monthlyincome")]
    pub monthly_income: Option<MoneyCents>,
    #[serde(default, rename = "totalbalance")]
    pub total_balance: Option<MoneyCents>,
}

impl UserRow {
    pub fn into_domain(self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email,
            name: self.name.unwrap_or_default(),
            monthly_income: self.monthly_income,
            total_balance: self.total_balance.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub name: &'a str,
    #[serde(rename = "totalbalance")]
    pub total_balance: MoneyCents,
}

/// Partial update of a `users` row; unset fields are left untouched.
#[derive(Debug, Default, Serialize)]
pub struct ProfilePatch {
    #[serde(rename = "monthlyincome", skip_serializing_if = "Option::is_none")]
    pub monthly_income: Option<MoneyCents>,
    #[serde(rename = "totalbalance", skip_serializing_if = "Option::is_none")]
    pub total_balance: Option<MoneyCents>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryRow {
    pub id: Uuid,
    pub name: String,
}

impl CategoryRow {
    pub fn into_domain(self) -> Category {
        Category {
            id: self.id,
            name: self.name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TransactionRow {
    pub id: Uuid,
    #[serde(rename = "userid")]
    pub user_id: Uuid,
    #[serde(default, rename = "upiid")]
    pub upi_id: Option<String>,
    pub amount: MoneyCents,
    #[serde(default, rename = "merchantName")]
    pub merchant_name: Option<String>,
    #[serde(default, rename = "categoryid")]
    pub category_id: Option<Uuid>,
    #[serde(rename = "transactiontime", deserialize_with = "timestamp")]
    pub transaction_time: DateTime<Utc>,
}

impl TransactionRow {
    /// Rows without a category fall into the default expense category.
    pub fn into_domain(self) -> ResultEngine<Transaction> {
        Ok(Transaction::new(
            self.id,
            self.user_id,
            self.amount,
            self.category_id.unwrap_or(DEFAULT_EXPENSE_CATEGORY_ID),
            self.transaction_time,
            self.merchant_name.as_deref().unwrap_or_default(),
        )?
        .with_upi_id(self.upi_id.as_deref()))
    }
}

#[derive(Debug, Serialize)]
pub struct NewTransactionRow<'a> {
    #[serde(rename = "userid")]
    pub user_id: Uuid,
    #[serde(rename = "upiid")]
    pub upi_id: Option<&'a str>,
    pub amount: MoneyCents,
    #[serde(rename = "merchantName")]
    pub merchant_name: &'a str,
    #[serde(rename = "categoryid")]
    pub category_id: Uuid,
    #[serde(rename = "transactiontime")]
    pub transaction_time: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct IncomeRow {
    pub id: Uuid,
    pub source: String,
    pub amount: MoneyCents,
    #[serde(deserialize_with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

impl IncomeRow {
    pub fn into_domain(self) -> ResultEngine<IncomeEntry> {
        IncomeEntry::new(
            self.id,
            self.user_id,
            &self.source,
            self.amount,
            self.created_at,
        )
    }
}

#[derive(Debug, Serialize)]
pub struct NewIncomeRow<'a> {
    pub source: &'a str,
    pub amount: MoneyCents,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    #[serde(rename = "isincome")]
    pub is_income: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BudgetRow {
    #[serde(rename = "userid")]
    pub user_id: Uuid,
    #[serde(rename = "categoryid")]
    pub category_id: Uuid,
    pub amount: MoneyCents,
}

impl BudgetRow {
    pub fn into_domain(self) -> ResultEngine<Budget> {
        Budget::new(self.user_id, self.category_id, self.amount)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyticsRow {
    #[serde(rename = "userid")]
    pub user_id: Uuid,
    pub month: u32,
    pub year: i32,
    #[serde(rename = "totalspent")]
    pub total_spent: MoneyCents,
    #[serde(rename = "topcategory")]
    pub top_category: Option<Uuid>,
    pub savings: MoneyCents,
}

impl AnalyticsRow {
    pub fn into_domain(self) -> ResultEngine<MonthlySnapshot> {
        Ok(MonthlySnapshot {
            user_id: self.user_id,
            period: YearMonth::new(self.year, self.month)?,
            total_spent: self.total_spent,
            top_category: self.top_category,
            savings: self.savings,
        })
    }
}

impl From<&MonthlySnapshot> for AnalyticsRow {
    fn from(snapshot: &MonthlySnapshot) -> Self {
        Self {
            user_id: snapshot.user_id,
            month: snapshot.period.month,
            year: snapshot.period.year,
            total_spent: snapshot.total_spent,
            top_category: snapshot.top_category,
            savings: snapshot.savings,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AssetRow {
    pub id: Uuid,
    #[serde(rename = "userid")]
    pub user_id: Uuid,
    pub category: String,
    pub value: MoneyCents,
    #[serde(deserialize_with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl AssetRow {
    pub fn into_domain(self) -> ResultEngine<Asset> {
        let category: AssetCategory = self.category.parse()?;
        Asset::new(self.id, self.user_id, category, self.value, self.created_at)
    }
}

#[derive(Debug, Serialize)]
pub struct NewAssetRow {
    #[serde(rename = "userid")]
    pub user_id: Uuid,
    pub category: AssetCategory,
    pub value: MoneyCents,
}

/// `id` of a freshly inserted row.
#[derive(Debug, Deserialize)]
pub struct IdRow {
    pub id: Uuid,
}
