//! In-process [`Store`] for tests and offline runs.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use engine::{
    Asset, AssetCategory, Budget, Category, IncomeEntry, MoneyCents, MonthlySnapshot, NewExpense,
    NewIncome, SignupForm, Transaction, UserProfile, YearMonth, default_keyword_rules,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    Registered, Session, Store,
    error::{BaasError, Result},
    store::ProfileUpdate,
};

#[derive(Debug)]
struct Account {
    user_id: Uuid,
    password: String,
}

#[derive(Debug, Default)]
struct State {
    accounts: HashMap<String, Account>,
    sessions: HashMap<String, Session>,
    profiles: HashMap<Uuid, UserProfile>,
    transactions: Vec<Transaction>,
    income: Vec<IncomeEntry>,
    budgets: Vec<Budget>,
    assets: Vec<Asset>,
    snapshots: HashMap<(Uuid, YearMonth), MonthlySnapshot>,
}

#[derive(Debug)]
pub struct MemoryStore {
    categories: Vec<Category>,
    state: RwLock<State>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Seeds the category table with the built-in keyword categories.
    pub fn new() -> Self {
        let categories = default_keyword_rules()
            .into_iter()
            .map(|rule| Category {
                id: rule.category_id,
                name: rule.name,
            })
            .collect();
        Self::with_categories(categories)
    }

    pub fn with_categories(categories: Vec<Category>) -> Self {
        Self {
            categories,
            state: RwLock::new(State::default()),
        }
    }

    /// Stored snapshot of a month, if one was written.
    pub async fn snapshot(&self, user_id: Uuid, period: YearMonth) -> Option<MonthlySnapshot> {
        self.state
            .read()
            .await
            .snapshots
            .get(&(user_id, period))
            .cloned()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let email = email.trim().to_lowercase();
        let mut state = self.state.write().await;
        let user_id = match state.accounts.get(&email) {
            Some(account) if account.password == password => account.user_id,
            _ => return Err(BaasError::Unauthorized("invalid login credentials".to_string())),
        };
        let session = Session {
            access_token: format!("mem-{}", Uuid::new_v4()),
            user_id,
            email,
        };
        state
            .sessions
            .insert(session.access_token.clone(), session.clone());
        Ok(session)
    }

    async fn sign_up(&self, form: &SignupForm) -> Result<Registered> {
        let mut state = self.state.write().await;
        if state.accounts.contains_key(&form.email) {
            return Err(BaasError::Conflict("user already registered".to_string()));
        }
        let user_id = Uuid::new_v4();
        state.accounts.insert(
            form.email.clone(),
            Account {
                user_id,
                password: form.password.clone(),
            },
        );
        state.profiles.insert(
            user_id,
            UserProfile {
                id: user_id,
                email: form.email.clone(),
                name: form.full_name.clone(),
                monthly_income: None,
                total_balance: MoneyCents::ZERO,
            },
        );
        Ok(Registered {
            user_id,
            email: form.email.clone(),
        })
    }

    async fn authenticate(&self, access_token: &str) -> Result<Session> {
        self.state
            .read()
            .await
            .sessions
            .get(access_token)
            .cloned()
            .ok_or_else(|| BaasError::Unauthorized("invalid access token".to_string()))
    }

    async fn sign_out(&self, session: &Session) -> Result<()> {
        self.state
            .write()
            .await
            .sessions
            .remove(&session.access_token);
        Ok(())
    }

    async fn categories(&self, _session: &Session) -> Result<Vec<Category>> {
        let mut categories = self.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn profile(&self, session: &Session) -> Result<UserProfile> {
        self.state
            .read()
            .await
            .profiles
            .get(&session.user_id)
            .cloned()
            .ok_or_else(|| BaasError::NotFound(format!("user {}", session.user_id)))
    }

    async fn update_profile(&self, session: &Session, update: ProfileUpdate) -> Result<()> {
        let mut state = self.state.write().await;
        let profile = state
            .profiles
            .get_mut(&session.user_id)
            .ok_or_else(|| BaasError::NotFound(format!("user {}", session.user_id)))?;
        if let Some(income) = update.monthly_income {
            profile.monthly_income = Some(income);
        }
        if let Some(balance) = update.total_balance {
            profile.total_balance = balance;
        }
        Ok(())
    }

    async fn transactions(&self, session: &Session) -> Result<Vec<Transaction>> {
        let state = self.state.read().await;
        let mut rows: Vec<Transaction> = state
            .transactions
            .iter()
            .filter(|tx| tx.user_id == session.user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(rows)
    }

    async fn insert_expense(&self, session: &Session, expense: &NewExpense) -> Result<Uuid> {
        let tx = Transaction::new(
            Uuid::new_v4(),
            session.user_id,
            expense.amount,
            expense.category_id,
            expense.timestamp,
            &expense.merchant_name,
        )?
        .with_upi_id(expense.upi_id.as_deref());
        let id = tx.id;
        self.state.write().await.transactions.push(tx);
        Ok(id)
    }

    async fn income(&self, session: &Session) -> Result<Vec<IncomeEntry>> {
        let state = self.state.read().await;
        let mut rows: Vec<IncomeEntry> = state
            .income
            .iter()
            .filter(|entry| entry.user_id == session.user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn insert_income(&self, session: &Session, income: &NewIncome) -> Result<Uuid> {
        let entry = IncomeEntry::new(
            Uuid::new_v4(),
            session.user_id,
            &income.source,
            income.amount,
            income.created_at,
        )?;
        let id = entry.id;
        self.state.write().await.income.push(entry);
        Ok(id)
    }

    async fn budgets(&self, session: &Session) -> Result<Vec<Budget>> {
        Ok(self
            .state
            .read()
            .await
            .budgets
            .iter()
            .filter(|b| b.user_id == session.user_id)
            .cloned()
            .collect())
    }

    async fn upsert_budget(&self, session: &Session, budget: &Budget) -> Result<()> {
        let budget = Budget::new(session.user_id, budget.category_id, budget.amount)?;
        let mut state = self.state.write().await;
        let budgets = &mut state.budgets;
        match budgets
            .iter_mut()
            .find(|b| b.user_id == budget.user_id && b.category_id == budget.category_id)
        {
            Some(existing) => existing.amount = budget.amount,
            None => budgets.push(budget),
        }
        Ok(())
    }

    async fn assets(&self, session: &Session) -> Result<Vec<Asset>> {
        let state = self.state.read().await;
        let mut rows: Vec<Asset> = state
            .assets
            .iter()
            .filter(|a| a.user_id == session.user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(rows)
    }

    async fn insert_asset(
        &self,
        session: &Session,
        category: AssetCategory,
        value: MoneyCents,
    ) -> Result<Uuid> {
        let asset = Asset::new(Uuid::new_v4(), session.user_id, category, value, Utc::now())?;
        let id = asset.id;
        self.state.write().await.assets.push(asset);
        Ok(id)
    }

    async fn upsert_snapshot(&self, session: &Session, snapshot: &MonthlySnapshot) -> Result<()> {
        let mut snapshot = snapshot.clone();
        snapshot.user_id = session.user_id;
        self.state
            .write()
            .await
            .snapshots
            .insert((session.user_id, snapshot.period), snapshot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn signed_in(store: &MemoryStore) -> Session {
        let form = SignupForm::new("Asha Rao", "asha@example.com", "secret123").unwrap();
        store.sign_up(&form).await.unwrap();
        store.sign_in("Asha@Example.com", "secret123").await.unwrap()
    }

    #[tokio::test]
    async fn sign_in_checks_password() {
        let store = MemoryStore::new();
        let session = signed_in(&store).await;
        assert!(matches!(
            store.sign_in("asha@example.com", "wrong").await,
            Err(BaasError::Unauthorized(_))
        ));
        assert_eq!(store.authenticate(&session.access_token).await.unwrap(), session);

        store.sign_out(&session).await.unwrap();
        assert!(store.authenticate(&session.access_token).await.is_err());
    }

    #[tokio::test]
    async fn duplicate_signup_conflicts() {
        let store = MemoryStore::new();
        signed_in(&store).await;
        let form = SignupForm::new("Asha", "asha@example.com", "secret123").unwrap();
        assert!(matches!(store.sign_up(&form).await, Err(BaasError::Conflict(_))));
    }

    #[tokio::test]
    async fn rows_are_scoped_to_the_session_user() {
        let store = MemoryStore::new();
        let asha = signed_in(&store).await;
        let other_form = SignupForm::new("Ravi", "ravi@example.com", "secret123").unwrap();
        store.sign_up(&other_form).await.unwrap();
        let ravi = store.sign_in("ravi@example.com", "secret123").await.unwrap();

        let expense = NewExpense::new(
            MoneyCents::from_major(10),
            "Cafe",
            Uuid::new_v4(),
            Utc::now(),
            None,
        )
        .unwrap();
        store.insert_expense(&asha, &expense).await.unwrap();

        assert_eq!(store.transactions(&asha).await.unwrap().len(), 1);
        assert!(store.transactions(&ravi).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn budget_upsert_replaces_amount() {
        let store = MemoryStore::new();
        let session = signed_in(&store).await;
        let category = Uuid::new_v4();
        for major in [100, 250] {
            let budget = Budget::new(session.user_id, category, MoneyCents::from_major(major)).unwrap();
            store.upsert_budget(&session, &budget).await.unwrap();
        }
        let budgets = store.budgets(&session).await.unwrap();
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets[0].amount, MoneyCents::from_major(250));
    }
}
