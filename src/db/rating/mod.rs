//! Rating storage.
//!
//! Routes depend on `Arc<dyn RatingRepository>` only. `MongoRatingRepository`
//! is the production store; `InMemoryRatingRepository` keeps the same
//! semantics in process memory for tests and local runs.

use super::RepositoryError;
use crate::connection::ConnectionState;
use crate::models::{NewRating, PackageSummary, Rating};
use async_trait::async_trait;
use serde::Deserialize;

mod memory;
mod mongo;

pub use memory::InMemoryRatingRepository;
pub use mongo::MongoRatingRepository;

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOptions {
    /// Skip ratings hidden by moderation
    #[serde(default)]
    pub approved_only: bool,
}

impl ListOptions {
    pub fn approved_only() -> Self {
        Self {
            approved_only: true,
        }
    }
}

#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Validates and stores a submission, returning it with id and timestamps.
    async fn create(&self, rating: NewRating) -> Result<Rating, RepositoryError>;

    async fn get(&self, id: &str) -> Result<Option<Rating>, RepositoryError>;

    /// Ratings of one package: approved first, then by score, newest first.
    async fn list_by_package(
        &self,
        package_id: &str,
        options: ListOptions,
    ) -> Result<Vec<Rating>, RepositoryError>;

    /// A user's ratings, newest first.
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Rating>, RepositoryError>;

    /// Approved ratings across all packages, newest first.
    async fn list_recent(&self, limit: usize) -> Result<Vec<Rating>, RepositoryError>;

    /// Moderation. A provided response replaces the stored one (blank clears
    /// it); `None` leaves it as is.
    async fn set_approval(
        &self,
        id: &str,
        is_approved: bool,
        admin_response: Option<String>,
    ) -> Result<Rating, RepositoryError>;

    async fn set_verified(&self, id: &str, is_verified: bool) -> Result<Rating, RepositoryError>;

    fn connection_state(&self) -> ConnectionState;

    async fn package_summary(&self, package_id: &str) -> Result<PackageSummary, RepositoryError> {
        let ratings = self
            .list_by_package(package_id, ListOptions::approved_only())
            .await?;
        Ok(PackageSummary::from_ratings(package_id, &ratings))
    }
}
