use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use super::validation::FieldErrors;
use crate::services::{AuthError, DirectorError, FilmError, GenreError};

pub const FILM_NOT_FOUND: &str = "Film not found!";
pub const DIRECTOR_NOT_FOUND: &str = "Director not found!";
pub const GENRE_NOT_FOUND: &str = "Genre not found!";
pub const INVALID_PAGE: &str = "Invalid page.";
pub const USERNAME_TAKEN: &str = "A user with that username already exists.";

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    Validation(FieldErrors),

    /// Registration failures are wrapped in an `errors` envelope.
    RegistrationInvalid(FieldErrors),

    Unauthorized,

    DatabaseError(String),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Validation(errors) | Self::RegistrationInvalid(errors) => {
                write!(f, "Validation error: {errors:?}")
            }
            Self::Unauthorized => write!(f, "Unauthorized"),
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::InternalError(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": msg }))).into_response()
            }
            Self::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            Self::RegistrationInvalid(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            Self::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "A database error occurred" })),
                )
                    .into_response()
            }
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "An internal error occurred" })),
                )
                    .into_response()
            }
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(format!("{err:#}"))
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<FilmError> for ApiError {
    fn from(err: FilmError) -> Self {
        match err {
            FilmError::NotFound(_) => Self::film_not_found(),
            // Only the first unknown id is reported, matching how the
            // relation field stops at the first bad primary key.
            FilmError::UnknownGenres(ids) => Self::Validation(FieldErrors::single(
                "genres",
                format!(
                    "Invalid pk \"{}\" - object does not exist.",
                    ids.first().copied().unwrap_or_default()
                ),
            )),
            FilmError::Database(msg) => Self::DatabaseError(msg),
        }
    }
}

impl From<DirectorError> for ApiError {
    fn from(err: DirectorError) -> Self {
        match err {
            DirectorError::NotFound(_) => Self::director_not_found(),
            DirectorError::InvalidPage(_) => Self::NotFound(INVALID_PAGE.to_string()),
            DirectorError::Database(msg) => Self::DatabaseError(msg),
        }
    }
}

impl From<GenreError> for ApiError {
    fn from(err: GenreError) -> Self {
        match err {
            GenreError::NotFound(_) => Self::genre_not_found(),
            GenreError::InvalidPage(_) => Self::NotFound(INVALID_PAGE.to_string()),
            GenreError::Database(msg) => Self::DatabaseError(msg),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::Unauthorized,
            AuthError::UsernameTaken(_) => {
                Self::RegistrationInvalid(FieldErrors::single("username", USERNAME_TAKEN))
            }
            AuthError::UserNotFound(name) => Self::NotFound(format!("User {name} not found")),
            AuthError::Database(msg) => Self::DatabaseError(msg),
        }
    }
}

impl ApiError {
    #[must_use]
    pub fn invalid_page() -> Self {
        Self::NotFound(INVALID_PAGE.to_string())
    }

    #[must_use]
    pub fn film_not_found() -> Self {
        Self::NotFound(FILM_NOT_FOUND.to_string())
    }

    #[must_use]
    pub fn director_not_found() -> Self {
        Self::NotFound(DIRECTOR_NOT_FOUND.to_string())
    }

    #[must_use]
    pub fn genre_not_found() -> Self {
        Self::NotFound(GENRE_NOT_FOUND.to_string())
    }
}

/// Parses an `{id}` path segment. Anything that is not an `i32` can never
/// name a row, so it resolves to the resource's not-found error.
pub fn parse_path_id(raw: &str, not_found: fn() -> ApiError) -> Result<i32, ApiError> {
    raw.parse().map_err(|_| not_found())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_unknown_genres_maps_to_invalid_pk() {
        let (status, body) = body_json(FilmError::UnknownGenres(vec![42, 43]).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"genres": ["Invalid pk \"42\" - object does not exist."]})
        );
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let (status, body) = body_json(FilmError::NotFound(7).into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Film not found!"}));
    }

    #[tokio::test]
    async fn test_unparsable_path_id_is_not_found() {
        assert_eq!(parse_path_id("42", ApiError::film_not_found).unwrap(), 42);

        for raw in ["2147483648", "abc", "", "1.5"] {
            let err = parse_path_id(raw, ApiError::genre_not_found).unwrap_err();
            let (status, body) = body_json(err).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body, json!({"error": "Genre not found!"}));
        }
    }

    #[tokio::test]
    async fn test_unauthorized_has_empty_body() {
        let (status, body) = body_json(AuthError::InvalidCredentials.into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_database_error_hides_details() {
        let (status, body) =
            body_json(DirectorError::Database("disk I/O error".to_string()).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "A database error occurred"}));
    }
}
