use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::error::parse_path_id;
use super::validation::{JsonObject, validate_film_input, validate_review_input};
use super::{ApiError, AppState, FilmDetailDto, FilmListDto, ReviewDto};

/// GET /api/v1/films/
pub async fn list_films(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<FilmListDto>>, ApiError> {
    let films = state.film_service.list_films().await?;
    Ok(Json(films.into_iter().map(FilmListDto::from).collect()))
}

/// POST /api/v1/films/
pub async fn create_film(
    State(state): State<Arc<AppState>>,
    JsonObject(body): JsonObject,
) -> Result<(StatusCode, Json<FilmDetailDto>), ApiError> {
    let input = validate_film_input(&body, state.director_service.as_ref()).await?;
    let film = state.film_service.create_film(input).await?;
    Ok((StatusCode::CREATED, Json(film.into())))
}

/// GET /api/v1/films/{id}/
pub async fn get_film(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<FilmDetailDto>, ApiError> {
    let id = parse_path_id(&raw_id, ApiError::film_not_found)?;
    let film = state.film_service.get_film(id).await?;
    Ok(Json(film.into()))
}

/// PUT /api/v1/films/{id}/
///
/// Full replace. Answers 201 on success.
pub async fn update_film(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    JsonObject(body): JsonObject,
) -> Result<(StatusCode, Json<FilmDetailDto>), ApiError> {
    let id = parse_path_id(&raw_id, ApiError::film_not_found)?;
    state.film_service.get_film(id).await?;

    let input = validate_film_input(&body, state.director_service.as_ref()).await?;
    let film = state.film_service.update_film(id, input).await?;
    Ok((StatusCode::CREATED, Json(film.into())))
}

/// DELETE /api/v1/films/{id}/
pub async fn delete_film(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_path_id(&raw_id, ApiError::film_not_found)?;
    state.film_service.delete_film(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/films/{id}/reviews/
pub async fn list_reviews(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Vec<ReviewDto>>, ApiError> {
    let id = parse_path_id(&raw_id, ApiError::film_not_found)?;
    let reviews = state.film_service.list_reviews(id).await?;
    Ok(Json(reviews.into_iter().map(ReviewDto::from).collect()))
}

/// POST /api/v1/films/{id}/reviews/
pub async fn create_review(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    JsonObject(body): JsonObject,
) -> Result<(StatusCode, Json<ReviewDto>), ApiError> {
    let id = parse_path_id(&raw_id, ApiError::film_not_found)?;
    state.film_service.get_film(id).await?;

    let input = validate_review_input(&body)?;
    let review = state.film_service.add_review(id, input).await?;
    Ok((StatusCode::CREATED, Json(review.into())))
}
