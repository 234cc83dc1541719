//! The storage seam used by the server.

use async_trait::async_trait;
use engine::{
    Asset, AssetCategory, Budget, Category, IncomeEntry, MoneyCents, MonthlySnapshot, NewExpense,
    NewIncome, ResultEngine, SignupForm, Transaction, UserProfile,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::{
    Query, Session, SupabaseClient,
    error::{BaasError, Result},
    tables::{
        self, AnalyticsRow, AssetRow, BudgetRow, CategoryRow, IdRow, IncomeRow, NewAssetRow,
        NewIncomeRow, NewTransactionRow, NewUserRow, ProfilePatch, TransactionRow, UserRow,
    },
};

/// Fields of the user profile that can be changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub monthly_income: Option<MoneyCents>,
    pub total_balance: Option<MoneyCents>,
}

/// Result of a sign-up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registered {
    pub user_id: Uuid,
    pub email: String,
}

/// Auth and table access for one backend.
///
/// Every data operation takes the caller's [`Session`] and is scoped to
/// `session.user_id`.
#[async_trait]
pub trait Store: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session>;
    async fn sign_up(&self, form: &SignupForm) -> Result<Registered>;
    /// Resolves a bearer token into a session.
    async fn authenticate(&self, access_token: &str) -> Result<Session>;
    async fn sign_out(&self, session: &Session) -> Result<()>;

    async fn categories(&self, session: &Session) -> Result<Vec<Category>>;

    async fn profile(&self, session: &Session) -> Result<UserProfile>;
    async fn update_profile(&self, session: &Session, update: ProfileUpdate) -> Result<()>;

    /// Newest first.
    async fn transactions(&self, session: &Session) -> Result<Vec<Transaction>>;
    async fn insert_expense(&self, session: &Session, expense: &NewExpense) -> Result<Uuid>;

    /// Newest first.
    async fn income(&self, session: &Session) -> Result<Vec<IncomeEntry>>;
    async fn insert_income(&self, session: &Session, income: &NewIncome) -> Result<Uuid>;

    async fn budgets(&self, session: &Session) -> Result<Vec<Budget>>;
    /// One budget per category; a second write replaces the amount.
    async fn upsert_budget(&self, session: &Session, budget: &Budget) -> Result<()>;

    /// Oldest first.
    async fn assets(&self, session: &Session) -> Result<Vec<Asset>>;
    async fn insert_asset(
        &self,
        session: &Session,
        category: AssetCategory,
        value: MoneyCents,
    ) -> Result<Uuid>;

    /// Replaces the stored snapshot of `(user, year, month)`.
    async fn upsert_snapshot(&self, session: &Session, snapshot: &MonthlySnapshot) -> Result<()>;
}

/// [`Store`] backed by a Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseStore {
    client: SupabaseClient,
}

impl SupabaseStore {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    /// Selects rows and converts them, skipping rows that fail validation.
    async fn rows<R, T>(
        &self,
        session: &Session,
        query: Query,
        convert: impl Fn(R) -> ResultEngine<T>,
    ) -> Result<Vec<T>>
    where
        R: DeserializeOwned,
    {
        let rows: Vec<R> = self.client.select(&session.access_token, &query).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| match convert(row) {
                Ok(value) => Some(value),
                Err(err) => {
                    tracing::warn!(table = query.table_name(), "skipping invalid row: {err}");
                    None
                }
            })
            .collect())
    }

    async fn insert_returning_id<B: serde::Serialize + Sync>(
        &self,
        session: &Session,
        table: &str,
        row: &B,
    ) -> Result<Uuid> {
        let ids: Vec<IdRow> = self
            .client
            .insert(&session.access_token, table, std::slice::from_ref(row))
            .await?;
        ids.into_iter()
            .next()
            .map(|row| row.id)
            .ok_or_else(|| BaasError::NotFound(format!("inserted {table} row")))
    }
}

#[async_trait]
impl Store for SupabaseStore {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        self.client.sign_in_with_password(email, password).await
    }

    async fn sign_up(&self, form: &SignupForm) -> Result<Registered> {
        let signed_up = self
            .client
            .sign_up(&form.email, &form.password, &form.full_name)
            .await?;
        let token = signed_up
            .access_token
            .as_deref()
            .unwrap_or(self.client.anon_key());
        let profile = NewUserRow {
            id: signed_up.user_id,
            email: &signed_up.email,
            name: &form.full_name,
            total_balance: MoneyCents::ZERO,
        };
        let _: Vec<IdRow> = self
            .client
            .insert(token, tables::USERS, std::slice::from_ref(&profile))
            .await?;
        tracing::info!(user_id = %signed_up.user_id, "user registered");
        Ok(Registered {
            user_id: signed_up.user_id,
            email: signed_up.email,
        })
    }

    async fn authenticate(&self, access_token: &str) -> Result<Session> {
        self.client.user(access_token).await
    }

    async fn sign_out(&self, session: &Session) -> Result<()> {
        self.client.sign_out(session).await
    }

    async fn categories(&self, session: &Session) -> Result<Vec<Category>> {
        let query = Query::table(tables::CATEGORIES)
            .select("id,name")
            .order("name", true);
        self.rows(session, query, |row: CategoryRow| Ok(row.into_domain()))
            .await
    }

    async fn profile(&self, session: &Session) -> Result<UserProfile> {
        let query = Query::table(tables::USERS)
            .select("*")
            .eq("id", session.user_id);
        let row: Option<UserRow> = self
            .client
            .select_single(&session.access_token, &query)
            .await?;
        row.map(UserRow::into_domain)
            .ok_or_else(|| BaasError::NotFound(format!("user {}", session.user_id)))
    }

    async fn update_profile(&self, session: &Session, update: ProfileUpdate) -> Result<()> {
        let patch = ProfilePatch {
            monthly_income: update.monthly_income,
            total_balance: update.total_balance,
        };
        let query = Query::table(tables::USERS).eq("id", session.user_id);
        self.client
            .update(&session.access_token, &query, &patch)
            .await
    }

    async fn transactions(&self, session: &Session) -> Result<Vec<Transaction>> {
        let query = Query::table(tables::TRANSACTIONS)
            .select("*")
            .eq("userid", session.user_id)
            .order("transactiontime", false);
        self.rows(session, query, TransactionRow::into_domain).await
    }

    async fn insert_expense(&self, session: &Session, expense: &NewExpense) -> Result<Uuid> {
        let row = NewTransactionRow {
            user_id: session.user_id,
            upi_id: expense.upi_id.as_deref(),
            amount: expense.amount,
            merchant_name: &expense.merchant_name,
            category_id: expense.category_id,
            transaction_time: expense.timestamp,
        };
        self.insert_returning_id(session, tables::TRANSACTIONS, &row)
            .await
    }

    async fn income(&self, session: &Session) -> Result<Vec<IncomeEntry>> {
        let query = Query::table(tables::INCOME)
            .select("*")
            .eq("userId", session.user_id)
            .order("created_at", false);
        self.rows(session, query, IncomeRow::into_domain).await
    }

    async fn insert_income(&self, session: &Session, income: &NewIncome) -> Result<Uuid> {
        let row = NewIncomeRow {
            source: &income.source,
            amount: income.amount,
            created_at: income.created_at,
            user_id: session.user_id,
            is_income: true,
        };
        self.insert_returning_id(session, tables::INCOME, &row)
            .await
    }

    async fn budgets(&self, session: &Session) -> Result<Vec<Budget>> {
        let query = Query::table(tables::BUDGETS)
            .select("userid,categoryid,amount")
            .eq("userid", session.user_id);
        self.rows(session, query, BudgetRow::into_domain).await
    }

    async fn upsert_budget(&self, session: &Session, budget: &Budget) -> Result<()> {
        let row = BudgetRow {
            user_id: session.user_id,
            category_id: budget.category_id,
            amount: budget.amount,
        };
        self.client
            .upsert(
                &session.access_token,
                tables::BUDGETS,
                "userid,categoryid",
                std::slice::from_ref(&row),
            )
            .await
    }

    async fn assets(&self, session: &Session) -> Result<Vec<Asset>> {
        let query = Query::table(tables::ASSETS)
            .select("*")
            .eq("userid", session.user_id)
            .order("created_at", true);
        self.rows(session, query, AssetRow::into_domain).await
    }

    async fn insert_asset(
        &self,
        session: &Session,
        category: AssetCategory,
        value: MoneyCents,
    ) -> Result<Uuid> {
        let row = NewAssetRow {
            user_id: session.user_id,
            category,
            value,
        };
        self.insert_returning_id(session, tables::ASSETS, &row)
            .await
    }

    async fn upsert_snapshot(&self, session: &Session, snapshot: &MonthlySnapshot) -> Result<()> {
        let row = AnalyticsRow::from(snapshot);
        self.client
            .upsert(
                &session.access_token,
                tables::ANALYTICS,
                "userid,month,year",
                std::slice::from_ref(&row),
            )
            .await
    }
}
