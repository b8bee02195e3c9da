pub mod input_validation;
pub mod rating_engine;

pub use input_validation::{validate_rating_input, DomainWarning};
pub use rating_engine::{RatingEngine, RatingPolicy};
