use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::error::parse_path_id;
use super::validation::{JsonObject, validate_director_input};
use super::{ApiError, AppState, DirectorDto, PageDto, PageQuery};

const COLLECTION_PATH: &str = "/api/v1/directors/";

pub async fn list_directors(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageDto<DirectorDto>>, ApiError> {
    let request = query.to_request(state.config.pagination.page_size)?;
    let page = state.director_service.list_directors(request).await?;
    Ok(Json(PageDto::from_page(page, COLLECTION_PATH)))
}

pub async fn create_director(
    State(state): State<Arc<AppState>>,
    JsonObject(body): JsonObject,
) -> Result<(StatusCode, Json<DirectorDto>), ApiError> {
    let input = validate_director_input(&body)?;
    let director = state.director_service.create_director(input).await?;
    Ok((StatusCode::CREATED, Json(director.into())))
}

pub async fn get_director(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<DirectorDto>, ApiError> {
    let id = parse_path_id(&raw_id, ApiError::director_not_found)?;
    let director = state.director_service.get_director(id).await?;
    Ok(Json(director.into()))
}

pub async fn update_director(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    JsonObject(body): JsonObject,
) -> Result<Json<DirectorDto>, ApiError> {
    let id = parse_path_id(&raw_id, ApiError::director_not_found)?;
    state.director_service.get_director(id).await?;

    let input = validate_director_input(&body)?;
    let director = state.director_service.update_director(id, input).await?;
    Ok(Json(director.into()))
}

/// Deleting a director also deletes its films and their reviews.
pub async fn delete_director(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_path_id(&raw_id, ApiError::director_not_found)?;
    state.director_service.delete_director(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
