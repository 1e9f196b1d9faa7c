use super::validation::{check_required, check_score, normalize_text, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A stored review of a tour package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: String,
    pub package_id: String,
    pub user_id: String,    // external user, not owned here
    pub user_email: String, // snapshot at submission time
    pub user_name: String,
    pub rating: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    pub is_verified: bool,
    pub is_approved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_experience: Option<TravelExperience>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-category scores, each independently optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelExperience {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accommodation: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transportation: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guide: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i32>,
}

impl TravelExperience {
    pub fn scores(&self) -> [(&'static str, Option<i32>); 4] {
        [
            ("accommodation", self.accommodation),
            ("transportation", self.transportation),
            ("guide", self.guide),
            ("value", self.value),
        ]
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for (name, score) in self.scores() {
            if let Some(score) = score {
                check_score(&format!("travelExperience.{}", name), score)?;
            }
        }
        Ok(())
    }
}

/// A user's submission, before it has an id or timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRating {
    pub package_id: String,
    pub user_id: String,
    pub user_email: String,
    pub user_name: String,
    pub rating: i32,
    #[serde(default)]
    pub review: Option<String>,
    #[serde(default)]
    pub travel_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub travel_experience: Option<TravelExperience>,
}

impl NewRating {
    /// Trims text fields and checks every field rule, failing on the first
    /// violation. Nothing is persisted by this call.
    pub fn normalize(mut self) -> Result<Self, ValidationError> {
        self.package_id = self.package_id.trim().to_string();
        self.user_id = self.user_id.trim().to_string();
        self.user_email = self.user_email.trim().to_string();
        self.user_name = self.user_name.trim().to_string();

        check_required("packageId", &self.package_id)?;
        check_required("userId", &self.user_id)?;
        check_required("userEmail", &self.user_email)?;
        check_required("userName", &self.user_name)?;
        check_score("rating", self.rating)?;

        self.review = match self.review.take() {
            Some(review) => normalize_text("review", review)?,
            None => None,
        };

        if let Some(experience) = &self.travel_experience {
            experience.validate()?;
        }

        Ok(self)
    }

    /// Builds the stored entity with moderation defaults applied.
    pub fn into_rating(self, id: String, now: DateTime<Utc>) -> Rating {
        Rating {
            id,
            package_id: self.package_id,
            user_id: self.user_id,
            user_email: self.user_email,
            user_name: self.user_name,
            rating: self.rating,
            review: self.review,
            is_verified: false,
            is_approved: true,
            admin_response: None,
            travel_date: self.travel_date,
            travel_experience: self.travel_experience,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Order used when listing a package: approved first, then by score, newest first.
pub fn package_order(a: &Rating, b: &Rating) -> Ordering {
    b.is_approved
        .cmp(&a.is_approved)
        .then_with(|| b.rating.cmp(&a.rating))
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Index declaration, keys in order with their direction (1 asc, -1 desc).
#[derive(Debug, Clone, Copy)]
pub struct IndexSpec {
    pub name: &'static str,
    pub keys: &'static [(&'static str, i32)],
}

pub const INDEXES: &[IndexSpec] = &[
    IndexSpec {
        name: "packageId_1",
        keys: &[("packageId", 1)],
    },
    IndexSpec {
        name: "userId_1",
        keys: &[("userId", 1)],
    },
    IndexSpec {
        name: "rating_1",
        keys: &[("rating", 1)],
    },
    IndexSpec {
        name: "isApproved_1",
        keys: &[("isApproved", 1)],
    },
    IndexSpec {
        name: "createdAt_-1",
        keys: &[("createdAt", -1)],
    },
    IndexSpec {
        name: "packageId_1_isApproved_1_rating_1",
        keys: &[("packageId", 1), ("isApproved", 1), ("rating", 1)],
    },
];
