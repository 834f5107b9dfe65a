use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::domain::{Account, AccountId};

use super::MIGRATION_001_INITIAL;

/// Persistence contract consumed by the ledger service.
///
/// Any key-value lookup by numeric id works: SQLite in production, an
/// in-memory mock in tests. Errors are opaque to the caller; the service
/// surfaces every failure the same way.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Fetch an account by id. `None` means no such account.
    async fn get(&self, id: AccountId) -> Result<Option<Account>>;

    /// Persist a new account and return it with its assigned id.
    async fn create(&self, account: Account) -> Result<Account>;

    /// Overwrite the stored account identified by `account.id`.
    async fn update(&self, account: &Account) -> Result<()>;
}

/// SQLite-backed account store.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given path.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;

        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    fn row_to_account(row: &sqlx::sqlite::SqliteRow) -> Account {
        Account {
            id: row.get::<i64, _>("id") as AccountId,
            name: row.get("name"),
            balance: row.get("balance"),
        }
    }
}

#[async_trait]
impl AccountStore for Repository {
    async fn get(&self, id: AccountId) -> Result<Option<Account>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, balance
            FROM accounts
            WHERE id = ?
            "#,
        )
        .bind(id as i64)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch account")?;

        Ok(row.as_ref().map(Self::row_to_account))
    }

    async fn create(&self, mut account: Account) -> Result<Account> {
        let result = sqlx::query(
            r#"
            INSERT INTO accounts (name, balance)
            VALUES (?, ?)
            "#,
        )
        .bind(&account.name)
        .bind(account.balance)
        .execute(&self.pool)
        .await
        .context("Failed to save account")?;

        // AUTOINCREMENT starts at 1, so assigned ids never collide with the
        // unassigned sentinel.
        account.id = result.last_insert_rowid() as AccountId;
        Ok(account)
    }

    async fn update(&self, account: &Account) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE accounts
            SET name = ?, balance = ?
            WHERE id = ?
            "#,
        )
        .bind(&account.name)
        .bind(account.balance)
        .bind(account.id as i64)
        .execute(&self.pool)
        .await
        .context("Failed to update account")?;

        Ok(())
    }
}
