use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generic response for endpoints that create a row.
#[derive(Debug, Serialize, Deserialize)]
pub struct Created {
    pub id: Uuid,
}

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Login {
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Signup {
        pub full_name: String,
        pub email: String,
        pub password: String,
    }

    /// Returned by login; `access_token` goes into `Authorization: Bearer`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SessionView {
        pub access_token: String,
        pub user_id: Uuid,
        pub email: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SignupCreated {
        pub user_id: Uuid,
        pub email: String,
    }
}

pub mod category {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryView {
        pub id: Uuid,
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoriesResponse {
        pub categories: Vec<CategoryView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Classify {
        pub merchant_name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ClassifyResponse {
        pub category_id: Uuid,
        pub category: String,
        /// `false` when no keyword matched and the default category was used.
        pub matched: bool,
    }
}

pub mod expense {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub amount_minor: i64,
        pub merchant_name: String,
        /// When absent the category is inferred from the merchant name.
        pub category_id: Option<Uuid>,
        pub upi_id: Option<String>,
        /// RFC3339 timestamp; defaults to now.
        pub occurred_at: Option<DateTime<FixedOffset>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: Uuid,
        pub amount_minor: i64,
        pub merchant_name: String,
        pub category_id: Uuid,
        pub category: String,
        pub upi_id: Option<String>,
        pub occurred_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseListResponse {
        pub expenses: Vec<ExpenseView>,
    }
}

pub mod income {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct IncomeNew {
        pub source: String,
        pub amount_minor: i64,
        /// RFC3339 timestamp; defaults to now.
        pub received_at: Option<DateTime<FixedOffset>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct IncomeView {
        pub id: Uuid,
        pub source: String,
        pub amount_minor: i64,
        pub received_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SourceTotal {
        pub source: String,
        pub amount_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct IncomeListResponse {
        pub income: Vec<IncomeView>,
        pub total_minor: i64,
        pub by_source: Vec<SourceTotal>,
    }
}

pub mod asset {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AssetNew {
        /// One of `Property`, `Vehicle`, `Stocks`, `Savings`, `Others`.
        pub category: String,
        pub value_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AssetView {
        pub id: Uuid,
        pub category: String,
        pub value_minor: i64,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AssetShareView {
        pub category: String,
        pub value_minor: i64,
        /// Share of the total, e.g. `"42.50"`.
        pub share: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AssetListResponse {
        pub assets: Vec<AssetView>,
        pub total_minor: i64,
        pub distribution: Vec<AssetShareView>,
    }
}

pub mod budget {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetUpsert {
        pub category_id: Uuid,
        pub amount_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetView {
        pub category_id: Uuid,
        pub category: String,
        pub amount_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetListResponse {
        pub budgets: Vec<BudgetView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetLineView {
        pub category_id: Uuid,
        pub category: String,
        pub planned_minor: i64,
        pub spent_minor: i64,
        pub remaining_minor: i64,
        pub over_budget: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetReport {
        pub lines: Vec<BudgetLineView>,
    }
}

pub mod profile {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProfileView {
        pub id: Uuid,
        pub email: String,
        pub name: String,
        pub monthly_income_minor: Option<i64>,
        pub total_balance_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MonthlyIncomeUpdate {
        pub monthly_income_minor: i64,
    }
}

pub mod dashboard {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SnapshotView {
        pub year: i32,
        pub month: u32,
        pub total_spent_minor: i64,
        pub top_category: Option<String>,
        pub savings_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Summary {
        pub total_income_minor: i64,
        pub total_expenses_minor: i64,
        pub balance_minor: i64,
        pub monthly_income_minor: Option<i64>,
        /// Snapshot of the current month, recomputed on read.
        pub current_month: SnapshotView,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SeriesPointView {
        pub date: NaiveDate,
        pub income_minor: i64,
        pub expense_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SeriesResponse {
        /// IANA name of the timezone used to bucket days.
        pub timezone: String,
        pub points: Vec<SeriesPointView>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ActivityQuery {
        pub limit: Option<usize>,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum ActivityKind {
        Income,
        Expense,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ActivityView {
        pub kind: ActivityKind,
        pub label: String,
        pub amount_minor: i64,
        pub at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ActivityResponse {
        pub entries: Vec<ActivityView>,
    }
}

pub mod insights {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryBucketView {
        pub category: String,
        pub total_spent_minor: i64,
        /// Percentage of monthly income with two decimals, e.g. `"15.00"`.
        pub percentage: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryBreakdownResponse {
        pub monthly_income_minor: i64,
        pub total_spent_minor: i64,
        pub categories: Vec<CategoryBucketView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ClassificationResponse {
        pub overspend_threshold: String,
        pub underspend_threshold: String,
        pub flagged: Vec<CategoryBucketView>,
        pub encouraged: Vec<CategoryBucketView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UnnecessaryResponse {
        pub monthly_income_minor: i64,
        pub total_unnecessary_minor: i64,
        pub percentage: String,
        pub categories: Vec<CategoryBucketView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProjectionPointView {
        pub year: u32,
        pub nifty_50_minor: i64,
        pub fixed_deposit_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProjectionResponse {
        pub principal_minor: i64,
        pub points: Vec<ProjectionPointView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AnalysisResponse {
        pub reply: String,
    }
}

pub mod chat {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ChatMessage {
        pub message: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ChatReply {
        pub reply: String,
    }
}

pub mod analytics {
    use super::*;

    /// Month to recompute; both default to the current month.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct Refresh {
        pub year: Option<i32>,
        pub month: Option<u32>,
    }
}
