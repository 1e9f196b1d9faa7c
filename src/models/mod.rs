pub mod rating;
mod summary;
pub mod validation;

pub use rating::*;
pub use summary::*;
pub use validation::ValidationError;
