use super::{ListOptions, RatingRepository};
use crate::connection::ConnectionState;
use crate::db::RepositoryError;
use crate::models::validation::normalize_text;
use crate::models::{package_order, NewRating, Rating};
use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct InMemoryRatingRepository {
    ratings: RwLock<Vec<Rating>>,
}

impl InMemoryRatingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn update<F>(&self, id: &str, apply: F) -> Result<Rating, RepositoryError>
    where
        F: FnOnce(&mut Rating) + Send,
    {
        let mut ratings = self.ratings.write().await;
        let rating = ratings
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

        apply(rating);
        rating.updated_at = Utc::now();
        Ok(rating.clone())
    }
}

#[async_trait]
impl RatingRepository for InMemoryRatingRepository {
    #[tracing::instrument(name = "Save new rating in memory", skip(self, rating))]
    async fn create(&self, rating: NewRating) -> Result<Rating, RepositoryError> {
        let rating = rating
            .normalize()?
            .into_rating(ObjectId::new().to_hex(), Utc::now());

        self.ratings.write().await.push(rating.clone());
        tracing::info!("New rating {} has been saved", rating.id);
        Ok(rating)
    }

    async fn get(&self, id: &str) -> Result<Option<Rating>, RepositoryError> {
        let ratings = self.ratings.read().await;
        Ok(ratings.iter().find(|r| r.id == id).cloned())
    }

    async fn list_by_package(
        &self,
        package_id: &str,
        options: ListOptions,
    ) -> Result<Vec<Rating>, RepositoryError> {
        let mut found: Vec<Rating> = self
            .ratings
            .read()
            .await
            .iter()
            .filter(|r| r.package_id == package_id)
            .filter(|r| !options.approved_only || r.is_approved)
            .cloned()
            .collect();

        found.sort_by(package_order);
        Ok(found)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Rating>, RepositoryError> {
        let mut found: Vec<Rating> = self
            .ratings
            .read()
            .await
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();

        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Rating>, RepositoryError> {
        let mut found: Vec<Rating> = self
            .ratings
            .read()
            .await
            .iter()
            .filter(|r| r.is_approved)
            .cloned()
            .collect();

        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found.truncate(limit);
        Ok(found)
    }

    #[tracing::instrument(name = "Moderate rating in memory", skip(self, admin_response))]
    async fn set_approval(
        &self,
        id: &str,
        is_approved: bool,
        admin_response: Option<String>,
    ) -> Result<Rating, RepositoryError> {
        // validate before taking the lock so a bad response changes nothing
        let admin_response = match admin_response {
            Some(text) => Some(normalize_text("adminResponse", text)?),
            None => None,
        };

        self.update(id, move |rating| {
            rating.is_approved = is_approved;
            if let Some(response) = admin_response {
                rating.admin_response = response;
            }
        })
        .await
    }

    async fn set_verified(&self, id: &str, is_verified: bool) -> Result<Rating, RepositoryError> {
        self.update(id, move |rating| rating.is_verified = is_verified)
            .await
    }

    fn connection_state(&self) -> ConnectionState {
        ConnectionState::Connected
    }
}
