pub mod health_checks;
pub(crate) mod rating;
mod redirect;

pub use health_checks::*;
pub use redirect::*;
