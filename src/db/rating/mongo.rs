use super::{ListOptions, RatingRepository};
use crate::connection::{ConnectionManager, ConnectionState, MongoConnector};
use crate::db::RepositoryError;
use crate::models::validation::normalize_text;
use crate::models::{NewRating, Rating, TravelExperience, INDEXES};
use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::Instrument;

const COLLECTION: &str = "ratings";

/// Stored shape of a rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RatingDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    package_id: String,
    user_id: String,
    user_email: String,
    user_name: String,
    rating: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    review: Option<String>,
    #[serde(default)]
    is_verified: bool,
    #[serde(default = "approved_by_default")]
    is_approved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    admin_response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    travel_date: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    travel_experience: Option<TravelExperience>,
    created_at: DateTime,
    updated_at: DateTime,
}

fn approved_by_default() -> bool {
    true
}

impl RatingDocument {
    fn from_rating(id: ObjectId, rating: &Rating) -> Self {
        Self {
            id,
            package_id: rating.package_id.clone(),
            user_id: rating.user_id.clone(),
            user_email: rating.user_email.clone(),
            user_name: rating.user_name.clone(),
            rating: rating.rating,
            review: rating.review.clone(),
            is_verified: rating.is_verified,
            is_approved: rating.is_approved,
            admin_response: rating.admin_response.clone(),
            travel_date: rating.travel_date.map(DateTime::from_chrono),
            travel_experience: rating.travel_experience,
            created_at: DateTime::from_chrono(rating.created_at),
            updated_at: DateTime::from_chrono(rating.updated_at),
        }
    }
}

impl From<RatingDocument> for Rating {
    fn from(document: RatingDocument) -> Self {
        Self {
            id: document.id.to_hex(),
            package_id: document.package_id,
            user_id: document.user_id,
            user_email: document.user_email,
            user_name: document.user_name,
            rating: document.rating,
            review: document.review,
            is_verified: document.is_verified,
            is_approved: document.is_approved,
            admin_response: document.admin_response,
            travel_date: document.travel_date.map(DateTime::to_chrono),
            travel_experience: document.travel_experience,
            created_at: document.created_at.to_chrono(),
            updated_at: document.updated_at.to_chrono(),
        }
    }
}

fn package_filter(package_id: &str, options: ListOptions) -> Document {
    let mut filter = doc! { "packageId": package_id };
    if options.approved_only {
        filter.insert("isApproved", true);
    }
    filter
}

/// Walks the (packageId, isApproved, rating) index backwards.
fn package_sort() -> Document {
    doc! { "isApproved": -1, "rating": -1, "createdAt": -1 }
}

fn approval_update(is_approved: bool, admin_response: Option<Option<String>>) -> Document {
    let mut set = doc! {
        "isApproved": is_approved,
        "updatedAt": DateTime::from_chrono(Utc::now()),
    };
    let mut update = Document::new();

    match admin_response {
        Some(Some(response)) => {
            set.insert("adminResponse", response);
        }
        Some(None) => {
            update.insert("$unset", doc! { "adminResponse": "" });
        }
        None => {}
    }

    update.insert("$set", set);
    update
}

fn index_models() -> Vec<IndexModel> {
    INDEXES
        .iter()
        .map(|index| {
            let keys = index
                .keys
                .iter()
                .fold(Document::new(), |mut keys, (field, direction)| {
                    keys.insert(*field, *direction);
                    keys
                });
            IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().name(index.name.to_string()).build())
                .build()
        })
        .collect()
}

pub struct MongoRatingRepository {
    connection: Arc<ConnectionManager<MongoConnector>>,
}

impl MongoRatingRepository {
    pub fn new(connection: Arc<ConnectionManager<MongoConnector>>) -> Self {
        Self { connection }
    }

    fn collection(&self) -> Result<Collection<RatingDocument>, RepositoryError> {
        Ok(self.connection.handle()?.collection(COLLECTION))
    }

    /// Creates the query indexes; existing ones with the same keys are kept.
    pub async fn ensure_indexes(&self) -> Result<(), RepositoryError> {
        let query_span = tracing::info_span!("Creating rating indexes");
        self.collection()?
            .create_indexes(index_models(), None)
            .instrument(query_span)
            .await?;
        Ok(())
    }

    async fn find(
        &self,
        filter: Document,
        options: FindOptions,
    ) -> Result<Vec<Rating>, RepositoryError> {
        let documents: Vec<RatingDocument> = self
            .collection()?
            .find(filter, options)
            .await?
            .try_collect()
            .await?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn find_and_update(&self, id: &str, update: Document) -> Result<Rating, RepositoryError> {
        let not_found = || RepositoryError::NotFound(id.to_string());
        let object_id = ObjectId::parse_str(id).map_err(|_| not_found())?;
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection()?
            .find_one_and_update(doc! { "_id": object_id }, update, options)
            .await?
            .map(Into::into)
            .ok_or_else(not_found)
    }
}

#[async_trait]
impl RatingRepository for MongoRatingRepository {
    async fn create(&self, rating: NewRating) -> Result<Rating, RepositoryError> {
        let rating = rating.normalize()?;
        let collection = self.collection()?;

        let object_id = ObjectId::new();
        let rating = rating.into_rating(object_id.to_hex(), Utc::now());
        let document = RatingDocument::from_rating(object_id, &rating);

        let query_span = tracing::info_span!("Saving new rating into the database");
        collection
            .insert_one(&document, None)
            .instrument(query_span)
            .await
            .map_err(|err| {
                tracing::error!("Failed to execute query: {:?}", err);
                RepositoryError::from(err)
            })?;

        tracing::info!("New rating {} has been saved to database", rating.id);
        Ok(rating)
    }

    async fn get(&self, id: &str) -> Result<Option<Rating>, RepositoryError> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let query_span = tracing::info_span!("Fetch rating by id", id);
        let document = self
            .collection()?
            .find_one(doc! { "_id": object_id }, None)
            .instrument(query_span)
            .await?;

        Ok(document.map(Into::into))
    }

    async fn list_by_package(
        &self,
        package_id: &str,
        options: ListOptions,
    ) -> Result<Vec<Rating>, RepositoryError> {
        let query_span = tracing::info_span!(
            "Fetch package ratings",
            package_id,
            approved_only = options.approved_only
        );
        let find_options = FindOptions::builder().sort(package_sort()).build();

        self.find(package_filter(package_id, options), find_options)
            .instrument(query_span)
            .await
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Rating>, RepositoryError> {
        let query_span = tracing::info_span!("Fetch user ratings", user_id);
        let find_options = FindOptions::builder().sort(doc! { "createdAt": -1 }).build();

        self.find(doc! { "userId": user_id }, find_options)
            .instrument(query_span)
            .await
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Rating>, RepositoryError> {
        // a zero limit means "no limit" to the server
        if limit == 0 {
            return Ok(Vec::new());
        }
        let query_span = tracing::info_span!("Fetch recent ratings", limit);
        let find_options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .limit(limit as i64)
            .build();

        self.find(doc! { "isApproved": true }, find_options)
            .instrument(query_span)
            .await
    }

    async fn set_approval(
        &self,
        id: &str,
        is_approved: bool,
        admin_response: Option<String>,
    ) -> Result<Rating, RepositoryError> {
        let admin_response = match admin_response {
            Some(text) => Some(normalize_text("adminResponse", text)?),
            None => None,
        };

        let query_span = tracing::info_span!("Moderate rating", id, is_approved);
        self.find_and_update(id, approval_update(is_approved, admin_response))
            .instrument(query_span)
            .await
    }

    async fn set_verified(&self, id: &str, is_verified: bool) -> Result<Rating, RepositoryError> {
        let update = doc! {
            "$set": {
                "isVerified": is_verified,
                "updatedAt": DateTime::from_chrono(Utc::now()),
            }
        };

        let query_span = tracing::info_span!("Verify rating", id, is_verified);
        self.find_and_update(id, update).instrument(query_span).await
    }

    fn connection_state(&self) -> ConnectionState {
        self.connection.state()
    }
}
