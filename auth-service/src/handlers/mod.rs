use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

use crate::{dtos::LoginRequest, AppState};

/// Exchange verified credentials for a signed access token.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let res = state.auth_service.authenticate(req).await?;
    Ok((StatusCode::OK, Json(res)))
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": state.config.service_name,
    }))
}
