use crate::models;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::convert::From;

/// What visitors of the site see; contact details stay private.
#[derive(Debug, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Public {
    pub id: String,
    pub package_id: String,
    pub user_name: String,
    pub rating: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    pub is_verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_experience: Option<models::TravelExperience>,
    pub created_at: DateTime<Utc>,
}

impl From<models::Rating> for Public {
    fn from(rating: models::Rating) -> Self {
        Self {
            id: rating.id,
            package_id: rating.package_id,
            user_name: rating.user_name,
            rating: rating.rating,
            review: rating.review,
            is_verified: rating.is_verified,
            admin_response: rating.admin_response,
            travel_date: rating.travel_date,
            travel_experience: rating.travel_experience,
            created_at: rating.created_at,
        }
    }
}
