use serde::{Deserialize, Serialize};

pub type AccountId = u64;

/// Sentinel id for an account the store hasn't assigned an id to yet.
/// Stored accounts always have ids starting at 1.
pub const UNASSIGNED_ID: AccountId = 0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub id: AccountId,
    pub name: String,
    pub balance: f64,
}

impl Account {
    /// Create an account that has not been persisted yet.
    /// The store assigns the real id on create.
    pub fn new(name: impl Into<String>, balance: f64) -> Self {
        Self {
            id: UNASSIGNED_ID,
            name: name.into(),
            balance,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id != UNASSIGNED_ID
    }
}
