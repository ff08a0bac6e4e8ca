use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

use crate::{dtos::PromotionRequest, middleware::AuthUser, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub restaurant_id: Option<String>,
}

pub async fn search_promotions(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let res = match params.restaurant_id.as_deref().filter(|id| !id.is_empty()) {
        Some(restaurant_id) => {
            state
                .promotion_service
                .search_promotions_by_restaurant(restaurant_id)
                .await?
        }
        None => state.promotion_service.search_promotions().await?,
    };
    Ok((StatusCode::OK, Json(res)))
}

pub async fn search_promotion(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let res = state.promotion_service.search_promotion(&id).await?;
    Ok((StatusCode::OK, Json(res)))
}

pub async fn search_promotions_by_user_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let res = state
        .promotion_service
        .search_promotions_by_user_preferences(&user_id)
        .await?;
    Ok((StatusCode::OK, Json(res)))
}

pub async fn create_promotion(
    State(state): State<AppState>,
    AuthUser(context): AuthUser,
    ValidatedJson(req): ValidatedJson<PromotionRequest>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(user = %context.user_id, "Create promotion requested");
    let res = state.promotion_service.create_promotion(req).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn update_promotion(
    State(state): State<AppState>,
    AuthUser(context): AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<PromotionRequest>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(user = %context.user_id, id = %id, "Update promotion requested");
    let res = state.promotion_service.update_promotion(req, &id).await?;
    Ok((StatusCode::OK, Json(res)))
}

pub async fn remove_promotion(
    State(state): State<AppState>,
    AuthUser(context): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(user = %context.user_id, id = %id, "Delete promotion requested");
    state.promotion_service.remove_promotion(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": state.config.service_name,
    }))
}
