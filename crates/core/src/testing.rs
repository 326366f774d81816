//! In-memory repositories for service tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDate;
use pennywise_shared::types::{
    AccountId, BudgetId, CategoryId, RecurringTransactionId, TransactionId, UserId,
};

use crate::budget::Budget;
use crate::records::{Account, Category, NewCategory, RecurringTransaction, Transaction};
use crate::repository::{
    AccountRepository, BudgetRepository, CategoryRepository, RepositoryError,
    TransactionRepository,
};

/// Mock store implementing every repository trait.
#[derive(Default)]
pub(crate) struct InMemoryStore {
    pub transactions: Mutex<Vec<Transaction>>,
    pub recurring: Mutex<Vec<RecurringTransaction>>,
    pub budgets: Mutex<Vec<Budget>>,
    pub categories: Mutex<Vec<Category>>,
    pub accounts: Mutex<Vec<Account>>,
    unavailable: AtomicBool,
    reject_budget_saves: AtomicBool,
    calls: Mutex<usize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with a storage error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Makes budget saves fail while every other call succeeds.
    pub fn set_reject_budget_saves(&self, reject: bool) {
        self.reject_budget_saves.store(reject, Ordering::SeqCst);
    }

    /// Number of repository calls made so far.
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    pub fn add_category(&self, category: Category) {
        self.categories.lock().unwrap().push(category);
    }

    pub fn add_account(&self, account: Account) {
        self.accounts.lock().unwrap().push(account);
    }

    pub fn add_transaction(&self, tx: Transaction) -> Transaction {
        let tx = tx.with_id(TransactionId::new());
        self.transactions.lock().unwrap().push(tx.clone());
        tx
    }

    pub fn add_recurring(&self, rt: RecurringTransaction) {
        let rt = rt.with_id(RecurringTransactionId::new());
        self.recurring.lock().unwrap().push(rt);
    }

    pub fn add_budget(&self, budget: Budget) -> BudgetId {
        let id = BudgetId::new();
        self.budgets.lock().unwrap().push(budget.with_id(id));
        id
    }

    fn check(&self) -> Result<(), RepositoryError> {
        *self.calls.lock().unwrap() += 1;
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::Storage("connection refused".to_string()));
        }
        Ok(())
    }
}

impl TransactionRepository for InMemoryStore {
    async fn find_by_user_and_range(
        &self,
        user_id: UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, RepositoryError> {
        self.check()?;
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == user_id && t.date >= start && t.date <= end)
            .cloned()
            .collect())
    }

    async fn find_recurring_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<RecurringTransaction>, RepositoryError> {
        self.check()?;
        Ok(self
            .recurring
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.template.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn save_transaction(
        &self,
        transaction: Transaction,
    ) -> Result<Transaction, RepositoryError> {
        self.check()?;
        let mut rows = self.transactions.lock().unwrap();
        match transaction.id {
            None => {
                let saved = transaction.with_id(TransactionId::new());
                rows.push(saved.clone());
                Ok(saved)
            }
            Some(id) => {
                let row = rows
                    .iter_mut()
                    .find(|t| t.id == Some(id) && t.user_id == transaction.user_id)
                    .ok_or_else(|| RepositoryError::NotFound(id.into_inner()))?;
                *row = transaction.clone();
                Ok(transaction)
            }
        }
    }

    async fn delete_transaction(
        &self,
        user_id: UserId,
        id: TransactionId,
    ) -> Result<(), RepositoryError> {
        self.check()?;
        let mut rows = self.transactions.lock().unwrap();
        let before = rows.len();
        rows.retain(|t| !(t.id == Some(id) && t.user_id == user_id));
        if rows.len() == before {
            return Err(RepositoryError::NotFound(id.into_inner()));
        }
        Ok(())
    }

    async fn save_recurring(
        &self,
        recurring: RecurringTransaction,
    ) -> Result<RecurringTransaction, RepositoryError> {
        self.check()?;
        let saved = match recurring.id {
            Some(_) => recurring,
            None => recurring.with_id(RecurringTransactionId::new()),
        };
        let mut rows = self.recurring.lock().unwrap();
        rows.retain(|r| r.id != saved.id);
        rows.push(saved.clone());
        Ok(saved)
    }

    async fn delete_recurring(
        &self,
        user_id: UserId,
        id: RecurringTransactionId,
    ) -> Result<(), RepositoryError> {
        self.check()?;
        let mut rows = self.recurring.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| !(r.id == Some(id) && r.template.user_id == user_id));
        if rows.len() == before {
            return Err(RepositoryError::NotFound(id.into_inner()));
        }
        Ok(())
    }
}

impl BudgetRepository for InMemoryStore {
    async fn find_by_user_and_range(
        &self,
        user_id: UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Budget>, RepositoryError> {
        self.check()?;
        Ok(self
            .budgets
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.user_id == user_id && b.start_date <= end && b.end_date >= start)
            .cloned()
            .collect())
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Budget>, RepositoryError> {
        self.check()?;
        Ok(self
            .budgets
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(
        &self,
        user_id: UserId,
        id: BudgetId,
    ) -> Result<Option<Budget>, RepositoryError> {
        self.check()?;
        Ok(self
            .budgets
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == Some(id) && b.user_id == user_id)
            .cloned())
    }

    async fn save(&self, budget: Budget) -> Result<Budget, RepositoryError> {
        self.check()?;
        if self.reject_budget_saves.load(Ordering::SeqCst) {
            return Err(RepositoryError::Storage("budget insert failed".to_string()));
        }
        let mut rows = self.budgets.lock().unwrap();
        match budget.id {
            None => {
                let saved = budget.with_id(BudgetId::new());
                rows.push(saved.clone());
                Ok(saved)
            }
            Some(id) => {
                let row = rows
                    .iter_mut()
                    .find(|b| b.id == Some(id) && b.user_id == budget.user_id)
                    .ok_or_else(|| RepositoryError::NotFound(id.into_inner()))?;
                *row = budget.clone();
                Ok(budget)
            }
        }
    }

    async fn delete(&self, user_id: UserId, id: BudgetId) -> Result<(), RepositoryError> {
        self.check()?;
        let mut rows = self.budgets.lock().unwrap();
        let before = rows.len();
        rows.retain(|b| !(b.id == Some(id) && b.user_id == user_id));
        if rows.len() == before {
            return Err(RepositoryError::NotFound(id.into_inner()));
        }
        Ok(())
    }
}

impl CategoryRepository for InMemoryStore {
    async fn find_visible_to_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Category>, RepositoryError> {
        self.check()?;
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.is_visible_to(user_id))
            .cloned()
            .collect())
    }

    async fn find_visible_by_id(
        &self,
        user_id: UserId,
        id: CategoryId,
    ) -> Result<Option<Category>, RepositoryError> {
        self.check()?;
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id && c.is_visible_to(user_id))
            .cloned())
    }

    async fn create(&self, category: NewCategory) -> Result<Category, RepositoryError> {
        self.check()?;
        let created = Category {
            id: CategoryId::new(),
            user_id: Some(category.user_id),
            name: category.name,
            category_type: category.category_type,
            color: category.color,
        };
        self.categories.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn delete(&self, user_id: UserId, id: CategoryId) -> Result<(), RepositoryError> {
        self.check()?;
        let mut rows = self.categories.lock().unwrap();
        let before = rows.len();
        rows.retain(|c| !(c.id == id && c.user_id == Some(user_id)));
        if rows.len() == before {
            return Err(RepositoryError::NotFound(id.into_inner()));
        }
        Ok(())
    }
}

impl AccountRepository for InMemoryStore {
    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Account>, RepositoryError> {
        self.check()?;
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(
        &self,
        user_id: UserId,
        id: AccountId,
    ) -> Result<Option<Account>, RepositoryError> {
        self.check()?;
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id && a.user_id == user_id)
            .cloned())
    }
}
