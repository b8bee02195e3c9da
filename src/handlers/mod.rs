pub mod health;
pub mod metrics;
pub mod rating;

pub use health::health_check;
pub use metrics::metrics_handler;
pub use rating::{
    calculate_batch, calculate_rating, create_rating_routes, get_rating_scale, BatchRatingRequest,
    BatchRatingResponse, RatingScaleResponse,
};
