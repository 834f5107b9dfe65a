//! HTTP surface: axum router + handlers mapping JSON requests to the
//! ledger service and domain errors to status codes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection, rejection::PathRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;

use crate::application::{AppError, LedgerService};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct OpenAccountRequest {
    pub name: String,
    pub balance: f64,
}

#[derive(Debug, Deserialize)]
pub struct TransactionRequest {
    pub amount: f64,
}

/// Build the full HTTP router (public entrypoint used by `cli` and tests).
pub fn router(service: Arc<LedgerService>) -> Router {
    Router::new()
        .route("/accounts", post(open_account))
        .route("/accounts/:id", get(get_account))
        .route("/accounts/:id/withdraw", post(withdraw))
        .route("/accounts/:id/deposit", post(deposit))
        .with_state(service)
}

pub async fn open_account(
    State(service): State<Arc<LedgerService>>,
    body: Result<Json<OpenAccountRequest>, JsonRejection>,
) -> axum::response::Response {
    let Ok(Json(req)) = body else {
        return invalid_parameter("malformed request body");
    };

    match service.open_account(req.name, req.balance).await {
        Ok(account) => (StatusCode::CREATED, Json(account)).into_response(),
        Err(err) => error_to_response(err),
    }
}

pub async fn get_account(
    State(service): State<Arc<LedgerService>>,
    id: Result<Path<u64>, PathRejection>,
) -> axum::response::Response {
    let Ok(Path(id)) = id else {
        return invalid_parameter("malformed account id");
    };

    match service.get_account(id).await {
        Ok(account) => (StatusCode::OK, Json(account)).into_response(),
        Err(err) => error_to_response(err),
    }
}

pub async fn withdraw(
    State(service): State<Arc<LedgerService>>,
    id: Result<Path<u64>, PathRejection>,
    body: Result<Json<TransactionRequest>, JsonRejection>,
) -> axum::response::Response {
    let Ok(Path(id)) = id else {
        return invalid_parameter("malformed account id");
    };
    let Ok(Json(req)) = body else {
        return invalid_parameter("malformed request body");
    };

    match service.withdraw(id, req.amount).await {
        Ok(balance) => balance_response(balance),
        Err(err) => error_to_response(err),
    }
}

pub async fn deposit(
    State(service): State<Arc<LedgerService>>,
    id: Result<Path<u64>, PathRejection>,
    body: Result<Json<TransactionRequest>, JsonRejection>,
) -> axum::response::Response {
    let Ok(Path(id)) = id else {
        return invalid_parameter("malformed account id");
    };
    let Ok(Json(req)) = body else {
        return invalid_parameter("malformed request body");
    };

    match service.deposit(id, req.amount).await {
        Ok(balance) => balance_response(balance),
        Err(err) => error_to_response(err),
    }
}

fn balance_response(balance: f64) -> axum::response::Response {
    (StatusCode::OK, format!("Balance: {}", balance)).into_response()
}

pub fn error_to_response(err: AppError) -> axum::response::Response {
    match err {
        AppError::AccountNotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "not_found", err.to_string())
        }
        AppError::InsufficientFunds { .. } => {
            json_error(StatusCode::BAD_REQUEST, "not_enough_money", err.to_string())
        }
        AppError::InvalidParameter(_) => json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "invalid_parameter",
            err.to_string(),
        ),
        AppError::Storage(source) => {
            // The underlying storage error is logged, never surfaced.
            tracing::error!(error = ?source, "storage failure");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "unexpected",
                "unexpected storage error",
            )
        }
    }
}

fn invalid_parameter(message: &'static str) -> axum::response::Response {
    json_error(StatusCode::UNPROCESSABLE_ENTITY, "invalid_parameter", message)
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
