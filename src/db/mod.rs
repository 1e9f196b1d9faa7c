mod errors;
pub mod rating;

pub use errors::RepositoryError;
pub use rating::{InMemoryRatingRepository, ListOptions, MongoRatingRepository, RatingRepository};
