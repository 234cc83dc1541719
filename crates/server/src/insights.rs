//! Spending insight endpoints.
//!
//! Every percentage here is a share of the profile's monthly income, so
//! these views answer 422 until the income is set.

use api_types::{
    budget::{BudgetLineView, BudgetReport},
    insights::{
        AnalysisResponse, CategoryBreakdownResponse, CategoryBucketView, ClassificationResponse,
        ProjectionPointView, ProjectionResponse, UnnecessaryResponse,
    },
};
use axum::{Extension, Json, extract::State};
use baas::Session;
use engine::{
    Aggregator, CategoryShare, PROJECTION_YEARS, SpendingAnalysis, ThresholdClassifier,
    Transaction, budget_vs_actual, project_savings,
};

use crate::{ServerError, server::ServerState};

fn bucket_view(share: CategoryShare) -> CategoryBucketView {
    CategoryBucketView {
        category: share.category,
        total_spent_minor: share.total_spent.cents(),
        percentage: share.percentage.to_string(),
    }
}

fn expenses_only(transactions: Vec<Transaction>) -> Vec<Transaction> {
    transactions.into_iter().filter(|tx| !tx.is_income).collect()
}

async fn unnecessary_analysis(
    state: &ServerState,
    session: &Session,
) -> Result<SpendingAnalysis, ServerError> {
    let resolver = state.resolver(session).await?;
    let income = state.store.profile(session).await?.require_income()?;
    let transactions = state.store.transactions(session).await?;

    Ok(SpendingAnalysis::build(
        &Aggregator::new(&resolver),
        &transactions,
        income,
    )?)
}

pub async fn categories(
    Extension(session): Extension<Session>,
    State(state): State<ServerState>,
) -> Result<Json<CategoryBreakdownResponse>, ServerError> {
    let resolver = state.resolver(&session).await?;
    let income = state.store.profile(&session).await?.require_income()?;
    let transactions = expenses_only(state.store.transactions(&session).await?);

    let breakdown = Aggregator::new(&resolver).aggregate_by_category(&transactions, income)?;

    Ok(Json(CategoryBreakdownResponse {
        monthly_income_minor: breakdown.monthly_income.cents(),
        total_spent_minor: breakdown.total().cents(),
        categories: breakdown.shares().into_iter().map(bucket_view).collect(),
    }))
}

pub async fn classification(
    Extension(session): Extension<Session>,
    State(state): State<ServerState>,
) -> Result<Json<ClassificationResponse>, ServerError> {
    let resolver = state.resolver(&session).await?;
    let income = state.store.profile(&session).await?.require_income()?;
    let transactions = expenses_only(state.store.transactions(&session).await?);

    let classifier = ThresholdClassifier::default();
    let result =
        classifier.classify_spending(&Aggregator::new(&resolver), &transactions, income)?;

    Ok(Json(ClassificationResponse {
        overspend_threshold: classifier.overspend_threshold().to_string(),
        underspend_threshold: classifier.underspend_threshold().to_string(),
        flagged: result.flagged.into_iter().map(bucket_view).collect(),
        encouraged: result.encouraged.into_iter().map(bucket_view).collect(),
    }))
}

pub async fn unnecessary(
    Extension(session): Extension<Session>,
    State(state): State<ServerState>,
) -> Result<Json<UnnecessaryResponse>, ServerError> {
    let analysis = unnecessary_analysis(&state, &session).await?;
    let percentage = analysis.percentage().to_string();

    Ok(Json(UnnecessaryResponse {
        monthly_income_minor: analysis.monthly_income.cents(),
        total_unnecessary_minor: analysis.total_unnecessary_expense.cents(),
        percentage,
        categories: analysis
            .unnecessary_expenses
            .into_iter()
            .map(|expense| CategoryBucketView {
                category: expense.category,
                total_spent_minor: expense.spend.total_spent.cents(),
                percentage: expense.spend.percentage.to_string(),
            })
            .collect(),
    }))
}

/// What the unnecessary spend would grow to if invested instead.
pub async fn projection(
    Extension(session): Extension<Session>,
    State(state): State<ServerState>,
) -> Result<Json<ProjectionResponse>, ServerError> {
    let analysis = unnecessary_analysis(&state, &session).await?;
    let principal = analysis.total_unnecessary_expense;

    Ok(Json(ProjectionResponse {
        principal_minor: principal.cents(),
        points: project_savings(principal, PROJECTION_YEARS)
            .into_iter()
            .map(|point| ProjectionPointView {
                year: point.year,
                nifty_50_minor: point.nifty_50.cents(),
                fixed_deposit_minor: point.fixed_deposit.cents(),
            })
            .collect(),
    }))
}

pub async fn budgets(
    Extension(session): Extension<Session>,
    State(state): State<ServerState>,
) -> Result<Json<BudgetReport>, ServerError> {
    let resolver = state.resolver(&session).await?;
    let budgets = state.store.budgets(&session).await?;
    let transactions = state.store.transactions(&session).await?;

    let lines = budget_vs_actual(&Aggregator::new(&resolver), &budgets, &transactions)
        .into_iter()
        .map(|line| BudgetLineView {
            category_id: line.category_id,
            category: line.category,
            planned_minor: line.planned.cents(),
            spent_minor: line.spent.cents(),
            remaining_minor: line.remaining.cents(),
            over_budget: line.over_budget,
        })
        .collect();

    Ok(Json(BudgetReport { lines }))
}

pub async fn analysis(
    Extension(session): Extension<Session>,
    State(state): State<ServerState>,
) -> Result<Json<AnalysisResponse>, ServerError> {
    let analysis = unnecessary_analysis(&state, &session).await?;
    let reply = advisor::analyze(state.assistant.as_ref(), &analysis).await;

    Ok(Json(AnalysisResponse { reply }))
}
