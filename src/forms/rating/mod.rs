mod add;
mod moderate;

pub use add::AddRating as Add;
pub use add::TravelExperience;
pub use moderate::Approval;
pub use moderate::Verification;
