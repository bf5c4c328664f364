//! Device handlers

use crate::dto::{ApiResponse, CreateDeviceRequest, DeviceResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use sigchain_types::DeviceId;
use std::sync::Arc;

/// `GET /api/v1/devices` - list device summaries
pub async fn list_devices(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ApiResponse<Vec<DeviceResponse>>>> {
    let devices = state.manager.get_devices().await?;

    let summaries = devices.into_iter().map(DeviceResponse::from).collect();
    Ok(Json(ApiResponse::new(summaries)))
}

/// `POST /api/v1/devices/{id}` - create a device with a caller-chosen id
pub async fn create_device(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<CreateDeviceRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiResponse<DeviceResponse>>)> {
    let id = parse_device_id(&id)?;
    let Json(request) = payload.map_err(|_| ApiError::InvalidRequestBody)?;

    let device = state
        .manager
        .create_device(id, &request.label, &request.algorithm)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(DeviceResponse::from(device))),
    ))
}

/// `GET /api/v1/devices/{id}` - fetch one device summary
pub async fn get_device(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<DeviceResponse>>> {
    let id = parse_device_id(&id)?;

    let device = state.manager.get_device(id).await?;
    Ok(Json(ApiResponse::new(DeviceResponse::from(device))))
}

pub(crate) fn parse_device_id(raw: &str) -> ApiResult<DeviceId> {
    DeviceId::parse(raw).map_err(|_| ApiError::InvalidDeviceId)
}
