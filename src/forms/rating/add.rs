use crate::models;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TravelExperience {
    #[validate(minimum = 1)]
    #[validate(maximum = 5)]
    pub accommodation: Option<i32>,
    #[validate(minimum = 1)]
    #[validate(maximum = 5)]
    pub transportation: Option<i32>,
    #[validate(minimum = 1)]
    #[validate(maximum = 5)]
    pub guide: Option<i32>,
    #[validate(minimum = 1)]
    #[validate(maximum = 5)]
    pub value: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddRating {
    #[validate(min_length = 1)]
    pub package_id: String,
    #[validate(min_length = 1)]
    pub user_id: String,
    #[validate(min_length = 1)]
    pub user_email: String,
    #[validate(min_length = 1)]
    pub user_name: String,
    #[validate(minimum = 1)]
    #[validate(maximum = 5)]
    pub rating: i32,
    pub review: Option<String>, // length is checked after trimming, by the model
    pub travel_date: Option<DateTime<Utc>>,
    #[validate]
    pub travel_experience: Option<TravelExperience>,
}

impl From<TravelExperience> for models::TravelExperience {
    fn from(form: TravelExperience) -> Self {
        Self {
            accommodation: form.accommodation,
            transportation: form.transportation,
            guide: form.guide,
            value: form.value,
        }
    }
}

impl From<AddRating> for models::NewRating {
    fn from(form: AddRating) -> Self {
        Self {
            package_id: form.package_id,
            user_id: form.user_id,
            user_email: form.user_email,
            user_name: form.user_name,
            rating: form.rating,
            review: form.review,
            travel_date: form.travel_date,
            travel_experience: form.travel_experience.map(Into::into),
        }
    }
}
