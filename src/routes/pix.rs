use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};

use crate::{
    dto::pix::{CheckStatusRequest, CreatePixRequest, CreatePixResponse, TransactionStatus},
    error::{AppError, AppResult},
    response::{ApiResponse, ErrorResponse},
    services::pix_service::{self, INVALID_ORDER},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create-pix", post(create_pix))
        .route("/check-status", post(check_status))
}

#[utoipa::path(
    post,
    path = "/api/create-pix",
    request_body = CreatePixRequest,
    responses(
        (status = 200, description = "PIX transaction created, or rejected by the gateway (success = false)", body = CreatePixResponse),
        (status = 400, description = "Unreadable order or missing CPF/phone", body = ErrorResponse),
        (status = 500, description = "Credentials missing or gateway unreachable", body = ErrorResponse),
    ),
    tag = "Pix"
)]
pub async fn create_pix(
    State(state): State<AppState>,
    payload: Result<Json<CreatePixRequest>, JsonRejection>,
) -> AppResult<Json<CreatePixResponse>> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "unreadable create-pix body");
        AppError::Validation(INVALID_ORDER.into())
    })?;
    let created = pix_service::create_pix(&state, payload).await?;
    Ok(Json(created))
}

#[utoipa::path(
    post,
    path = "/api/check-status",
    request_body = CheckStatusRequest,
    responses(
        (status = 200, description = "Current gateway status", body = ApiResponse<TransactionStatus>),
        (status = 400, description = "Transaction ID is required", body = ErrorResponse),
        (status = 500, description = "Status lookup failed", body = ErrorResponse),
    ),
    tag = "Pix"
)]
pub async fn check_status(
    State(state): State<AppState>,
    payload: Result<Json<CheckStatusRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<TransactionStatus>>> {
    // An unreadable body is treated like one without an id.
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    let status = pix_service::check_status(&state, payload).await?;
    Ok(Json(status))
}
