use crate::models;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::convert::From;

#[derive(Debug, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: String,
    pub package_id: String,
    pub user_id: String,
    pub user_email: String,
    pub user_name: String,
    pub rating: i32,
    pub review: Option<String>,
    pub is_verified: bool,
    pub is_approved: bool, // hidden from the public listing when false
    pub admin_response: Option<String>,
    pub travel_date: Option<DateTime<Utc>>,
    pub travel_experience: Option<models::TravelExperience>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<models::Rating> for Admin {
    fn from(rating: models::Rating) -> Self {
        Self {
            id: rating.id,
            package_id: rating.package_id,
            user_id: rating.user_id,
            user_email: rating.user_email,
            user_name: rating.user_name,
            rating: rating.rating,
            review: rating.review,
            is_verified: rating.is_verified,
            is_approved: rating.is_approved,
            admin_response: rating.admin_response,
            travel_date: rating.travel_date,
            travel_experience: rating.travel_experience,
            created_at: rating.created_at,
            updated_at: rating.updated_at,
        }
    }
}
