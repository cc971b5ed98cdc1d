use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::error::parse_path_id;
use super::validation::{JsonObject, validate_genre_input};
use super::{ApiError, AppState, GenreDto, PageDto, PageQuery};

const COLLECTION_PATH: &str = "/api/v1/genres/";

pub async fn list_genres(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageDto<GenreDto>>, ApiError> {
    let request = query.to_request(state.config.pagination.page_size)?;
    let page = state.genre_service.list_genres(request).await?;
    Ok(Json(PageDto::from_page(page, COLLECTION_PATH)))
}

pub async fn create_genre(
    State(state): State<Arc<AppState>>,
    JsonObject(body): JsonObject,
) -> Result<(StatusCode, Json<GenreDto>), ApiError> {
    let input = validate_genre_input(&body)?;
    let genre = state.genre_service.create_genre(input).await?;
    Ok((StatusCode::CREATED, Json(genre.into())))
}

pub async fn get_genre(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<GenreDto>, ApiError> {
    let id = parse_path_id(&raw_id, ApiError::genre_not_found)?;
    let genre = state.genre_service.get_genre(id).await?;
    Ok(Json(genre.into()))
}

pub async fn update_genre(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    JsonObject(body): JsonObject,
) -> Result<Json<GenreDto>, ApiError> {
    let id = parse_path_id(&raw_id, ApiError::genre_not_found)?;
    state.genre_service.get_genre(id).await?;

    let input = validate_genre_input(&body)?;
    let genre = state.genre_service.update_genre(id, input).await?;
    Ok(Json(genre.into()))
}

/// Films lose the genre but are kept.
pub async fn delete_genre(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_path_id(&raw_id, ApiError::genre_not_found)?;
    state.genre_service.delete_genre(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
