pub mod grade;
pub mod rating;

pub use grade::*;
pub use rating::*;
