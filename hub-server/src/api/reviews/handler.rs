//! Review API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::common::AppResult;
use crate::core::AppState;
use crate::db::models::{Review, ReviewCreate, ReviewView};
use crate::identity::{AdminUser, CurrentUser};

/// GET /api/products/:id/reviews - masked, newest first
pub async fn list_for_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<ReviewView>>> {
    let reviews = state.reviews.find_by_product(&id).await?;
    Ok(Json(reviews.into_iter().map(ReviewView::from).collect()))
}

/// POST /api/reviews - authenticated customer
pub async fn add(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<ReviewCreate>,
) -> AppResult<Json<ReviewView>> {
    // The profile supplies the phone stored (unmasked) with the review.
    let profile = state.identity.profile(&user.id).await?;
    let review = state
        .reviews
        .add_rating(payload, &user.id, &profile.name, &profile.phone)
        .await?;
    Ok(Json(ReviewView::from(review)))
}

/// GET /api/reviews - admin, unmasked, newest first
pub async fn list_all(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<Vec<Review>>> {
    let reviews = state.reviews.find_all().await?;
    Ok(Json(reviews))
}

/// DELETE /api/reviews/:id - admin, backs the rating out of the aggregate
pub async fn delete(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    state.reviews.delete(&id).await?;
    Ok(Json(true))
}
