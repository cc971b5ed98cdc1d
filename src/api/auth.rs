use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use super::validation::{JsonObject, validate_login, validate_registration};
use super::{ApiError, AppState, RegisteredDto, TokenDto};

/// POST /auth/register/
///
/// New accounts start inactive and cannot log in until activated.
pub async fn register(
    State(state): State<Arc<AppState>>,
    JsonObject(body): JsonObject,
) -> Result<(StatusCode, Json<RegisteredDto>), ApiError> {
    let credentials = validate_registration(&body).map_err(ApiError::RegistrationInvalid)?;

    let user_id = state
        .auth_service
        .register(&credentials.username, &credentials.password)
        .await?;

    Ok((StatusCode::CREATED, Json(RegisteredDto { user_id })))
}

/// POST /auth/login/
///
/// Returns the user's token, the same one on every successful login.
pub async fn login(
    State(state): State<Arc<AppState>>,
    JsonObject(body): JsonObject,
) -> Result<Json<TokenDto>, ApiError> {
    let credentials = validate_login(&body)?;

    let key = state
        .auth_service
        .login(&credentials.username, &credentials.password)
        .await?;

    Ok(Json(TokenDto { key }))
}
