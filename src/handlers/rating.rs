use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    error::AppError,
    models::{Rating, RatingInput, RatingResult, RiskCategory},
    services::validate_rating_input,
    utils::monitoring::{record_rating, record_validation_failure},
    AppState,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct BatchRatingRequest {
    pub inputs: Vec<RatingInput>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BatchRatingResponse {
    pub results: Vec<RatingResult>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeBand {
    pub rating: Rating,
    /// `None` for the bottom grade.
    pub min_score: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWeight {
    pub category: RiskCategory,
    pub weight: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingScaleResponse {
    pub grades: Vec<GradeBand>,
    pub categories: Vec<CategoryWeight>,
    pub clamp_all_categories: bool,
}

pub fn create_rating_routes() -> Router<AppState> {
    Router::new()
        .route("/calculate", post(calculate_rating))
        .route("/batch", post(calculate_batch))
        .route("/scale", get(get_rating_scale))
}

/// POST /rating/calculate
pub async fn calculate_rating(
    State(state): State<AppState>,
    payload: Result<Json<RatingInput>, JsonRejection>,
) -> Result<Json<RatingResult>, AppError> {
    let Json(input) = payload.map_err(reject)?;

    validate(&input)?;
    let result = rate(&state, &input);

    info!(
        project_id = %input.project_id,
        total_score = result.total_score,
        rating = %result.rating,
        "Rating calculated"
    );
    Ok(Json(result))
}

/// POST /rating/batch. Every input is validated before any is scored; one bad
/// input rejects the whole batch.
pub async fn calculate_batch(
    State(state): State<AppState>,
    payload: Result<Json<BatchRatingRequest>, JsonRejection>,
) -> Result<Json<BatchRatingResponse>, AppError> {
    let Json(request) = payload.map_err(reject)?;

    let max = state.settings.rating.max_batch_size;
    if request.inputs.is_empty() || request.inputs.len() > max {
        record_validation_failure();
        return Err(AppError::ValidationError(format!(
            "inputs must contain between 1 and {} items, got {}",
            max,
            request.inputs.len()
        )));
    }

    for (index, input) in request.inputs.iter().enumerate() {
        validate(input).map_err(|e| match e {
            AppError::ValidationError(msg) => {
                AppError::ValidationError(format!("inputs[{}]: {}", index, msg))
            }
            other => other,
        })?;
    }

    let results: Vec<RatingResult> = request
        .inputs
        .iter()
        .map(|input| rate(&state, input))
        .collect();

    info!(count = results.len(), "Batch rating calculated");
    Ok(Json(BatchRatingResponse { results }))
}

/// GET /rating/scale
pub async fn get_rating_scale(State(state): State<AppState>) -> Json<RatingScaleResponse> {
    let grades = Rating::ALL
        .iter()
        .map(|rating| GradeBand {
            rating: *rating,
            min_score: rating.min_score(),
        })
        .collect();

    let categories = RiskCategory::ALL
        .iter()
        .map(|category| CategoryWeight {
            category: *category,
            weight: category.weight(),
        })
        .collect();

    Json(RatingScaleResponse {
        grades,
        categories,
        clamp_all_categories: state.engine.policy().clamp_all_categories,
    })
}

fn reject(rejection: JsonRejection) -> AppError {
    warn!("Rejected rating request body: {}", rejection.body_text());
    record_validation_failure();
    AppError::from(rejection)
}

fn validate(input: &RatingInput) -> Result<(), AppError> {
    validate_rating_input(input).map(|_| ()).map_err(|e| {
        record_validation_failure();
        e
    })
}

fn rate(state: &AppState, input: &RatingInput) -> RatingResult {
    let result = state.engine.calculate_rating(input);
    record_rating(result.rating, result.total_score);
    result
}
