mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{seeded_state, token_for};
use http_body_util::BodyExt;
use promotion_service::{
    build_router,
    dtos::PromotionResponse,
    models::{Restaurant, User, UserType},
};
use serde_json::{json, Value};
use tower::util::ServiceExt;

fn get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

fn with_json(method: &str, uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn promotion_lifecycle_as_owning_operator() {
    let (state, _) = seeded_state().await;
    let app = build_router(state);
    let token = token_for("owner1@example.com", "RESTAURANT");

    // Create without a client-chosen id
    let created = app
        .clone()
        .oneshot(with_json(
            "POST",
            "/valefood/promotions",
            &token,
            json!({
                "restaurantId": "r-1",
                "title": "Two for one",
                "description": "Every Tuesday",
                "category": "pizza",
                "price": 12.5
            }),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: PromotionResponse = json_body(created).await;
    assert!(!created.id.is_empty());
    assert_eq!(created.restaurant_id, "r-1");

    // Fetch it back
    let fetched = app
        .clone()
        .oneshot(get(
            &format!("/valefood/promotions/{}", created.id),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(fetched.status(), StatusCode::OK);
    let fetched: PromotionResponse = json_body(fetched).await;
    assert_eq!(fetched.title, "Two for one");

    // Listed under its restaurant (alongside the seeded p-1)
    let listed = app
        .clone()
        .oneshot(get("/valefood/promotions?restaurantId=r-1", &token))
        .await
        .unwrap();
    assert_eq!(listed.status(), StatusCode::OK);
    let listed: Vec<PromotionResponse> = json_body(listed).await;
    assert!(listed.iter().any(|p| p.id == created.id));

    // Update keeps the id from the path
    let updated = app
        .clone()
        .oneshot(with_json(
            "PUT",
            &format!("/valefood/promotions/{}", created.id),
            &token,
            json!({
                "restaurantId": "r-1",
                "title": "Three for one",
                "description": "Every Tuesday",
                "category": "pizza",
                "price": 12.5
            }),
        ))
        .await
        .unwrap();
    assert_eq!(updated.status(), StatusCode::OK);
    let updated: PromotionResponse = json_body(updated).await;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "Three for one");

    // Delete, then the fetch misses
    let deleted = app
        .clone()
        .oneshot(with_json(
            "DELETE",
            &format!("/valefood/promotions/{}", created.id),
            &token,
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = app
        .oneshot(get(
            &format!("/valefood/promotions/{}", created.id),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_for_unknown_restaurant_is_not_found() {
    let (state, _) = seeded_state().await;
    let response = build_router(state)
        .oneshot(with_json(
            "POST",
            "/valefood/promotions",
            &token_for("owner1@example.com", "RESTAURANT"),
            json!({
                "restaurantId": "r-ghost",
                "title": "Nope",
                "description": "",
                "category": "pizza",
                "price": 1.0
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_for_customer_owned_restaurant_is_forbidden() {
    let (state, store) = seeded_state().await;

    // A restaurant record whose owner is a customer account
    store
        .restaurants
        .insert(Restaurant {
            id: "r-odd".to_string(),
            user_id: "c-1".to_string(),
        })
        .await;

    let response = build_router(state)
        .oneshot(with_json(
            "POST",
            "/valefood/promotions",
            &token_for("owner1@example.com", "RESTAURANT"),
            json!({
                "restaurantId": "r-odd",
                "title": "Nope",
                "description": "",
                "category": "pizza",
                "price": 1.0
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn invalid_body_is_unprocessable() {
    let (state, _) = seeded_state().await;
    let response = build_router(state)
        .oneshot(with_json(
            "POST",
            "/valefood/promotions",
            &token_for("owner1@example.com", "RESTAURANT"),
            json!({
                "restaurantId": "",
                "title": "",
                "description": "",
                "category": "pizza",
                "price": -1.0
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn health_endpoint_needs_no_token() {
    let (state, _) = seeded_state().await;

    let response = build_router(state)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "promotion-service");
}

#[tokio::test]
async fn preference_search_returns_matching_promotions() {
    let (state, _) = seeded_state().await;
    let app = build_router(state);
    let token = token_for("customer@example.com", "CUSTOMER");

    let response = app
        .clone()
        .oneshot(get("/valefood/promotions/users/c-1", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let matched: Vec<PromotionResponse> = json_body(response).await;
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, "p-1");

    let unknown = app
        .oneshot(get("/valefood/promotions/users/u-ghost", &token))
        .await
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn preference_search_for_user_without_preferences_is_empty() {
    let (state, store) = seeded_state().await;

    store
        .users
        .insert(User {
            id: "c-2".to_string(),
            name: "Second Customer".to_string(),
            email: "customer2@example.com".to_string(),
            user_type: UserType::Customer,
            preferred_categories: Vec::new(),
        })
        .await;

    let response = build_router(state)
        .oneshot(get(
            "/valefood/promotions/users/c-2",
            &token_for("customer2@example.com", "CUSTOMER"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let matched: Vec<PromotionResponse> = json_body(response).await;
    assert!(matched.is_empty());
}
