use thiserror::Error;

use crate::domain::AccountId;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("not enough money: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: f64, requested: f64 },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("unexpected storage error")]
    Storage(#[from] anyhow::Error),
}
