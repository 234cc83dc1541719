//! Spending analytics for SpendoSense.
//!
//! Pure domain logic: amounts, category resolution, per-category aggregation
//! against the monthly income, threshold classification and the derived
//! views built on them. Nothing here performs I/O besides writing CSV to a
//! caller-provided writer.

pub use activity::{ActivityEntry, ActivityKind, recent_activity};
pub use aggregate::{
    Aggregator, CategoryBreakdown, CategoryShare, CategorySpend, IncomeSummary, balance,
    income_by_source,
};
pub use analysis::{SpendingAnalysis, UNNECESSARY_CATEGORIES, UnnecessaryExpense};
pub use assets::{Asset, AssetCategory, AssetShare, asset_distribution};
pub use budgets::{Budget, BudgetLine, budget_vs_actual};
pub use categories::{
    Category, CategoryResolver, DEFAULT_EXPENSE_CATEGORY_ID, FALLBACK_CATEGORY_NAME, KeywordRule,
    default_keyword_rules,
};
pub use classify::{Classification, ENCOURAGED_CATEGORIES, ThresholdClassifier};
pub use error::EngineError;
pub use export::write_expenses_csv;
pub use money::MoneyCents;
pub use percent::Percentage;
pub use projection::{PROJECTION_YEARS, ProjectionPoint, project_savings};
pub use series::{SeriesPoint, merge_time_series};
pub use snapshot::{MonthlySnapshot, YearMonth};
pub use transactions::{IncomeEntry, NewExpense, NewIncome, Transaction};
pub use users::{SignupForm, UserProfile};

mod activity;
mod aggregate;
mod analysis;
mod assets;
mod budgets;
mod categories;
mod classify;
mod error;
mod export;
mod money;
mod percent;
mod projection;
mod series;
mod snapshot;
mod transactions;
mod users;
mod util;

pub type ResultEngine<T> = Result<T, EngineError>;
