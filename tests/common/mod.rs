// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{Result, bail};
use async_trait::async_trait;
use tempfile::TempDir;

use walletd::application::LedgerService;
use walletd::domain::{Account, AccountId};
use walletd::storage::AccountStore;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = LedgerService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// In-memory account store with scriptable failures. Stands in for the
/// persistence collaborator so service behavior can be pinned down without
/// a database: which calls happen, in what shape, and how failures map.
pub struct MockStore {
    accounts: Mutex<HashMap<AccountId, Account>>,
    next_id: Mutex<AccountId>,
    pub fail_get: AtomicBool,
    pub fail_create: AtomicBool,
    pub fail_update: AtomicBool,
    /// Every account passed to `update`, in call order.
    pub updates: Mutex<Vec<Account>>,
}

impl MockStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            accounts: Mutex::new(HashMap::new()),
            next_id: Mutex::new(1),
            fail_get: AtomicBool::new(false),
            fail_create: AtomicBool::new(false),
            fail_update: AtomicBool::new(false),
            updates: Mutex::new(Vec::new()),
        })
    }

    /// Seed a record under an explicit lookup key. The stored record keeps
    /// whatever id it carries, so a zeroed record can sit under a real key.
    pub fn seed(&self, key: AccountId, account: Account) {
        self.accounts.lock().unwrap().insert(key, account);
    }

    pub fn update_count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }
}

#[async_trait]
impl AccountStore for MockStore {
    async fn get(&self, id: AccountId) -> Result<Option<Account>> {
        if self.fail_get.load(Ordering::SeqCst) {
            bail!("connection reset by peer");
        }
        Ok(self.accounts.lock().unwrap().get(&id).cloned())
    }

    async fn create(&self, mut account: Account) -> Result<Account> {
        if self.fail_create.load(Ordering::SeqCst) {
            bail!("disk full");
        }
        let mut next_id = self.next_id.lock().unwrap();
        account.id = *next_id;
        *next_id += 1;
        self.accounts
            .lock()
            .unwrap()
            .insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, account: &Account) -> Result<()> {
        if self.fail_update.load(Ordering::SeqCst) {
            bail!("database is locked");
        }
        self.updates.lock().unwrap().push(account.clone());
        self.accounts
            .lock()
            .unwrap()
            .insert(account.id, account.clone());
        Ok(())
    }
}

/// In-process HTTP server bound to an ephemeral port, serving the same
/// router as prod.
pub struct TestServer {
    pub base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn(service: LedgerService) -> Self {
        let app = walletd::http::router(Arc::new(service));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
