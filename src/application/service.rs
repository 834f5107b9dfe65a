use std::sync::Arc;

use crate::domain::{Account, AccountId, UNASSIGNED_ID};
use crate::storage::{AccountStore, Repository};

use super::AppError;

/// Application service providing the account-ledger operations.
/// This is the primary interface for any client (HTTP, CLI, tests).
///
/// Each operation is a single linear request/response: one read, at most one
/// write, no retries. The get-then-update pair is not atomic; concurrent
/// withdrawals against the same account can lose updates.
pub struct LedgerService {
    store: Arc<dyn AccountStore>,
}

impl LedgerService {
    /// Create a new ledger service with the given account store.
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Initialize a new SQLite-backed service at the given path.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::new(Arc::new(repo)))
    }

    /// Open a new account. The store assigns the id.
    pub async fn open_account(&self, name: String, balance: f64) -> Result<Account, AppError> {
        if name.is_empty() {
            return Err(AppError::InvalidParameter("name must not be empty".into()));
        }

        let account = self.store.create(Account::new(name, balance)).await?;
        Ok(account)
    }

    /// Get an account by id.
    pub async fn get_account(&self, id: AccountId) -> Result<Account, AppError> {
        let account = self
            .store
            .get(id)
            .await?
            .ok_or(AppError::AccountNotFound(id))?;

        // Stores that signal absence with a zeroed record instead of None.
        if account.id == UNASSIGNED_ID {
            return Err(AppError::AccountNotFound(id));
        }

        Ok(account)
    }

    /// Withdraw an amount from an account and return the new balance.
    /// Fails without touching the store when funds are insufficient.
    pub async fn withdraw(&self, id: AccountId, amount: f64) -> Result<f64, AppError> {
        let mut account = self.get_account(id).await?;

        if account.balance < amount {
            return Err(AppError::InsufficientFunds {
                balance: account.balance,
                requested: amount,
            });
        }

        account.balance -= amount;
        self.store.update(&account).await?;

        Ok(account.balance)
    }

    /// Deposit an amount into an account and return the new balance.
    pub async fn deposit(&self, id: AccountId, amount: f64) -> Result<f64, AppError> {
        let mut account = self.get_account(id).await?;

        account.balance += amount;
        self.store.update(&account).await?;

        Ok(account.balance)
    }
}
