//! Signature handlers

use crate::dto::{ApiResponse, SignTransactionRequest, SignedTransactionResponse};
use crate::error::{ApiError, ApiResult};
use crate::handlers::devices::parse_device_id;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

/// `POST /api/v1/devices/{id}/signatures` - extend the device's chain
pub async fn create_signature(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<SignTransactionRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiResponse<SignedTransactionResponse>>)> {
    let id = parse_device_id(&id)?;
    let Json(request) = payload.map_err(|_| ApiError::InvalidRequestBody)?;

    let transaction = state
        .manager
        .create_signed_transaction(id, request.data.into_bytes())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(SignedTransactionResponse::from(
            transaction,
        ))),
    ))
}

/// `GET /api/v1/devices/{id}/signatures` - the device's chain in order
pub async fn list_signatures(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Vec<SignedTransactionResponse>>>> {
    let id = parse_device_id(&id)?;

    let transactions = state.manager.get_signed_transactions(id).await?;

    let summaries = transactions
        .into_iter()
        .map(SignedTransactionResponse::from)
        .collect();
    Ok(Json(ApiResponse::new(summaries)))
}
