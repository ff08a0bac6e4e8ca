//! Request authorizer: every protected call passes a fixed gate sequence
//! before its handler runs. Token checks (1-5) always precede the resource
//! policy (6); the first failed gate short-circuits the rest. Requests are
//! evaluated independently, with no cross-request state: the only inputs
//! are the token's claims and a fresh read of the current records.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, Method, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use service_core::error::AppError;
use service_core::extract::ErrorResponse;

use crate::{
    models::{User, UserType},
    services::ServiceError,
    AppState,
};

const PROMOTION_NAMESPACE: &str = "/valefood/promotions";

/// Identity of the caller, attached to the request after authorization so
/// handlers can filter by the acting user.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: String,
    pub email: String,
    pub user_type: UserType,
}

pub async fn authorize_request(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let context = authorize(&state, &method, &path, req.headers()).await?;

    req.extensions_mut().insert(context);
    Ok(next.run(req).await)
}

async fn authorize(
    state: &AppState,
    method: &Method,
    path: &str,
    headers: &HeaderMap,
) -> Result<AuthContext, ServiceError> {
    // Gate 1: a token must be present at all.
    let token = match extract_token(headers) {
        Some(token) => token,
        None => {
            tracing::info!("Access token was not provided");
            return Err(ServiceError::InvalidCredentials);
        }
    };

    // Gate 2: signature and expiry, checked together by the codec.
    let claims = state.codec.parse_and_verify(token).map_err(|e| {
        tracing::info!(error = %e, "Failed to validate the access token");
        ServiceError::InvalidCredentials
    })?;

    // Gate 3: tokens minted by a different trust domain are refused even
    // when the key format matches.
    if claims.iss != state.config.token.issuer {
        tracing::info!("Provided token issuer is not valid");
        return Err(ServiceError::InvalidCredentials);
    }

    // Gate 4: the subject must resolve to a current user. A dangling
    // subject is indistinguishable from a bad token.
    let user = state
        .users
        .get_by_email(&claims.sub)
        .await?
        .ok_or_else(|| {
            tracing::info!("User was not found for the provided token subject");
            ServiceError::InvalidCredentials
        })?;

    // Gate 5: refuse tokens issued before a role change.
    if claims.role != user.user_type.as_str() {
        tracing::info!("User type does not match the provided token role");
        return Err(ServiceError::InvalidCredentials);
    }

    // Gate 6: resource policy.
    enforce_promotion_policy(state, method, path, &user).await?;

    Ok(AuthContext {
        user_id: user.id,
        email: user.email,
        user_type: user.user_type,
    })
}

/// Ownership and role policy for the promotion namespace. Does nothing for
/// paths outside it.
pub async fn enforce_promotion_policy(
    state: &AppState,
    method: &Method,
    path: &str,
    user: &User,
) -> Result<(), ServiceError> {
    if !path.starts_with(PROMOTION_NAMESPACE) {
        return Ok(());
    }

    // Only operator accounts may mutate promotions; reads stay open to
    // every authenticated user.
    if user.user_type != UserType::Restaurant && method != Method::GET {
        tracing::info!(user = %user.id, "User is not authorized to manage promotions");
        return Err(ServiceError::InvalidUserType);
    }

    // Updates and deletes additionally require owning the target.
    if method == Method::PUT || method == Method::DELETE {
        let promotion_id = match promotion_id_from_path(path) {
            Some(id) => id,
            None => {
                // Fail closed: a mutating request without a target id cannot
                // be ownership-checked, so it is refused outright.
                tracing::info!(path = %path, "Mutating request without a promotion id");
                return Err(ServiceError::InvalidCredentials);
            }
        };
        resolve_ownership(state, promotion_id, user).await?;
    }

    Ok(())
}

/// Sequential chain walk: promotion -> restaurant -> owning user, one store
/// round-trip per hop, stopping at the first hop that does not resolve.
async fn resolve_ownership(
    state: &AppState,
    promotion_id: &str,
    user: &User,
) -> Result<(), ServiceError> {
    let promotion = state
        .promotions
        .get_by_id(promotion_id)
        .await?
        .ok_or_else(|| {
            tracing::info!(id = %promotion_id, "Promotion does not exist");
            ServiceError::PromotionNotFound
        })?;

    let restaurant = state
        .restaurants
        .get_by_id(&promotion.restaurant_id)
        .await?
        .ok_or_else(|| {
            tracing::info!(id = %promotion.restaurant_id, "Restaurant does not exist");
            ServiceError::RestaurantNotFound
        })?;

    if restaurant.user_id != user.id {
        tracing::info!(user = %user.id, restaurant = %restaurant.id, "User does not own the target restaurant");
        return Err(ServiceError::InvalidCredentials);
    }

    Ok(())
}

/// Bearer scheme on the Authorization header, with the legacy `token`
/// header accepted verbatim as a fallback.
fn extract_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .or_else(|| headers.get("token").and_then(|value| value.to_str().ok()))
}

/// The promotion id is positional: `/valefood/promotions/{id}`. Anything
/// past the id segment is not part of the id.
fn promotion_id_from_path(path: &str) -> Option<&str> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .nth(2)
        .filter(|s| !s.is_empty())
}

/// Extractor handing handlers the authorization context installed by the
/// middleware.
pub struct AuthUser(pub AuthContext);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let context = parts.extensions.get::<AuthContext>().ok_or((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Authorization context missing from request extensions".to_string(),
            }),
        ))?;

        Ok(AuthUser(context.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promotion_id_is_the_third_segment() {
        assert_eq!(
            promotion_id_from_path("/valefood/promotions/p-1"),
            Some("p-1")
        );
        assert_eq!(promotion_id_from_path("/valefood/promotions"), None);
        assert_eq!(promotion_id_from_path("/valefood/promotions/"), None);
    }

    #[test]
    fn bearer_header_wins_over_legacy_token_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer abc".parse().unwrap());
        headers.insert("token", "legacy".parse().unwrap());
        assert_eq!(extract_token(&headers), Some("abc"));

        let mut legacy_only = HeaderMap::new();
        legacy_only.insert("token", "legacy".parse().unwrap());
        assert_eq!(extract_token(&legacy_only), Some("legacy"));

        assert_eq!(extract_token(&HeaderMap::new()), None);
    }
}
