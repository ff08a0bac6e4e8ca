use crate::{
    dtos::{PromotionRequest, PromotionResponse},
    models::{Promotion, UserType},
    repository::{PromotionRepository, RestaurantRepository, UserRepository},
    services::ServiceError,
};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct PromotionService {
    promotions: Arc<dyn PromotionRepository>,
    restaurants: Arc<dyn RestaurantRepository>,
    users: Arc<dyn UserRepository>,
}

impl PromotionService {
    pub fn new(
        promotions: Arc<dyn PromotionRepository>,
        restaurants: Arc<dyn RestaurantRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            promotions,
            restaurants,
            users,
        }
    }

    pub async fn search_promotions(&self) -> Result<Vec<PromotionResponse>, ServiceError> {
        let promotions = self.promotions.get_all().await?;
        Ok(promotions.into_iter().map(Into::into).collect())
    }

    pub async fn search_promotions_by_restaurant(
        &self,
        restaurant_id: &str,
    ) -> Result<Vec<PromotionResponse>, ServiceError> {
        let promotions = self.promotions.get_by_restaurant_id(restaurant_id).await?;
        Ok(promotions.into_iter().map(Into::into).collect())
    }

    pub async fn search_promotion(&self, id: &str) -> Result<PromotionResponse, ServiceError> {
        match self.promotions.get_by_id(id).await? {
            Some(promotion) => Ok(promotion.into()),
            None => {
                tracing::warn!(id = %id, "Promotion was not found");
                Err(ServiceError::PromotionNotFound)
            }
        }
    }

    pub async fn create_promotion(
        &self,
        request: PromotionRequest,
    ) -> Result<PromotionResponse, ServiceError> {
        self.validate_restaurant(&request.restaurant_id).await?;
        let promotion = build_promotion(request, None);
        self.promotions.save(promotion.clone()).await?;
        tracing::info!(id = %promotion.id, "Promotion was successfully created");
        Ok(promotion.into())
    }

    pub async fn update_promotion(
        &self,
        request: PromotionRequest,
        id: &str,
    ) -> Result<PromotionResponse, ServiceError> {
        let existing = self
            .promotions
            .get_by_id(id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(id = %id, "Promotion was not found");
                ServiceError::PromotionNotFound
            })?;
        self.validate_restaurant(&request.restaurant_id).await?;
        let updated = build_promotion(request, Some(existing.id));
        self.promotions.save(updated.clone()).await?;
        tracing::info!(id = %updated.id, "Promotion was successfully updated");
        Ok(updated.into())
    }

    /// Idempotent: deleting an id that does not exist is a logged no-op.
    pub async fn remove_promotion(&self, id: &str) -> Result<(), ServiceError> {
        if self.promotions.get_by_id(id).await?.is_some() {
            self.promotions.delete(id).await?;
            tracing::info!(id = %id, "Promotion was successfully removed");
        } else {
            tracing::info!(id = %id, "Promotion not found; delete request ignored");
        }
        Ok(())
    }

    pub async fn search_promotions_by_user_preferences(
        &self,
        user_id: &str,
    ) -> Result<Vec<PromotionResponse>, ServiceError> {
        let user = self.users.get_by_id(user_id).await?.ok_or_else(|| {
            tracing::warn!(id = %user_id, "User not found");
            ServiceError::UserNotFound
        })?;

        if user.preferred_categories.is_empty() {
            return Ok(Vec::new());
        }

        let preferred: Vec<String> = user
            .preferred_categories
            .iter()
            .map(|c| c.to_lowercase())
            .collect();

        let promotions = self.promotions.get_all().await?;
        Ok(promotions
            .into_iter()
            .filter(|p| preferred.contains(&p.category.to_lowercase()))
            .map(Into::into)
            .collect())
    }

    /// A promotion may only reference an existing restaurant whose owner is
    /// an operator account.
    async fn validate_restaurant(&self, restaurant_id: &str) -> Result<(), ServiceError> {
        let restaurant = self.restaurants.get_by_id(restaurant_id).await?.ok_or_else(|| {
            tracing::warn!(id = %restaurant_id, "Restaurant was not found");
            ServiceError::RestaurantNotFound
        })?;

        let user = self
            .users
            .get_by_id(&restaurant.user_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(restaurant = %restaurant_id, "User associated with restaurant was not found");
                ServiceError::UserNotFound
            })?;

        if user.user_type != UserType::Restaurant {
            tracing::info!(user = %user.id, restaurant = %restaurant_id, "Associated user is not an operator");
            return Err(ServiceError::InvalidUserType);
        }

        Ok(())
    }
}

fn build_promotion(request: PromotionRequest, override_id: Option<String>) -> Promotion {
    let id = override_id
        .or(request.id)
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    Promotion {
        id,
        restaurant_id: request.restaurant_id,
        title: request.title,
        description: request.description,
        category: request.category,
        price: request.price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Restaurant, User};
    use crate::repository::{
        MemoryPromotionRepository, MemoryRestaurantRepository, MemoryUserRepository,
    };

    async fn service_with_operator() -> (PromotionService, Arc<MemoryPromotionRepository>) {
        let promotions = Arc::new(MemoryPromotionRepository::new());
        let restaurants = MemoryRestaurantRepository::new();
        let users = MemoryUserRepository::new();

        users
            .insert(User {
                id: "op-1".to_string(),
                name: "Op".to_string(),
                email: "op@example.com".to_string(),
                user_type: UserType::Restaurant,
                preferred_categories: vec![],
            })
            .await;
        restaurants
            .insert(Restaurant {
                id: "r-1".to_string(),
                user_id: "op-1".to_string(),
            })
            .await;

        let service = PromotionService::new(
            promotions.clone(),
            Arc::new(restaurants),
            Arc::new(users),
        );
        (service, promotions)
    }

    fn request(id: Option<&str>) -> PromotionRequest {
        PromotionRequest {
            id: id.map(str::to_string),
            restaurant_id: "r-1".to_string(),
            title: "Two for one".to_string(),
            description: "All pizzas".to_string(),
            category: "pizza".to_string(),
            price: 9.90,
        }
    }

    #[tokio::test]
    async fn delete_of_absent_promotion_is_a_no_op() {
        let (service, promotions) = service_with_operator().await;
        service.create_promotion(request(Some("p-1"))).await.unwrap();

        service.remove_promotion("does-not-exist").await.unwrap();

        // Nothing was touched
        assert_eq!(promotions.get_all().await.unwrap().len(), 1);

        service.remove_promotion("p-1").await.unwrap();
        assert!(promotions.get_all().await.unwrap().is_empty());

        // Second delete of the same id still succeeds
        service.remove_promotion("p-1").await.unwrap();
    }

    #[tokio::test]
    async fn create_generates_id_when_absent() {
        let (service, _) = service_with_operator().await;
        let created = service.create_promotion(request(None)).await.unwrap();
        assert!(!created.id.is_empty());
    }

    #[tokio::test]
    async fn create_rejects_unknown_restaurant() {
        let (service, _) = service_with_operator().await;
        let mut req = request(None);
        req.restaurant_id = "r-unknown".to_string();
        assert!(matches!(
            service.create_promotion(req).await,
            Err(ServiceError::RestaurantNotFound)
        ));
    }

    #[tokio::test]
    async fn update_keeps_the_existing_id() {
        let (service, _) = service_with_operator().await;
        service.create_promotion(request(Some("p-1"))).await.unwrap();

        let mut req = request(Some("p-other"));
        req.title = "Three for one".to_string();
        let updated = service.update_promotion(req, "p-1").await.unwrap();

        assert_eq!(updated.id, "p-1");
        assert_eq!(updated.title, "Three for one");
    }

    #[tokio::test]
    async fn preference_match_is_case_insensitive() {
        let (service, _) = service_with_operator().await;
        service.create_promotion(request(Some("p-1"))).await.unwrap();

        let users = MemoryUserRepository::new();
        users
            .insert(User {
                id: "c-1".to_string(),
                name: "Cust".to_string(),
                email: "cust@example.com".to_string(),
                user_type: UserType::Customer,
                preferred_categories: vec!["PIZZA".to_string()],
            })
            .await;

        let service = PromotionService::new(
            service.promotions.clone(),
            service.restaurants.clone(),
            Arc::new(users),
        );

        let found = service
            .search_promotions_by_user_preferences("c-1")
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "p-1");
    }
}
